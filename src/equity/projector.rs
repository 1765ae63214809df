//! Per-year equity value across all grants of an offer

use chrono::NaiveDate;
use log::debug;

use super::refresh::refresh_value;
use super::vesting::grant_vested_value;
use crate::dates;
use crate::math::future_value;
use crate::offer::{CompensationOffer, EquityGrant};

/// Company valuation at which an exit leaves equity value unchanged
pub const EXIT_REFERENCE_VALUATION: f64 = 1_000_000_000.0;

/// Linear liquidity multiplier for an exit at `exit_valuation`
pub fn exit_multiplier(exit_valuation: f64) -> f64 {
    exit_valuation / EXIT_REFERENCE_VALUATION
}

/// Combines vesting and refresh grants into a yearly equity value
#[derive(Debug, Clone, Copy, Default)]
pub struct EquityProjector;

impl EquityProjector {
    pub fn new() -> Self {
        Self
    }

    /// Total equity value of `offer` in projection year `year` (1-indexed)
    pub fn year_equity_value(&self, offer: &CompensationOffer, year: u32) -> f64 {
        let year_date = dates::projection_year_date(offer.start_date, year);

        let total: f64 = offer
            .equity_grants
            .iter()
            .map(|grant| self.grant_value_for_year(grant, year_date, year))
            .sum();

        debug!("{}: year {} ({}) equity {:.2}", offer.name, year, year_date, total);
        total
    }

    /// Vested plus refresh value of one grant at `year_date`
    pub fn grant_value_for_year(&self, grant: &EquityGrant, year_date: NaiveDate, year: u32) -> f64 {
        let vested = grant_vested_value(grant, year_date, grant.growth_rate);
        vested + self.refresh_for_year(grant, year_date, year)
    }

    /// Refresh value of one grant, eligible from year 2 onwards.
    ///
    /// Grows at the grant's growth rate over the years since the grant date.
    pub fn refresh_for_year(&self, grant: &EquityGrant, year_date: NaiveDate, year: u32) -> f64 {
        let rate = grant.effective_refresh_rate();
        if rate <= 0.0 || year <= 1 {
            return 0.0;
        }

        let years_since_grant = dates::years_between(grant.start_date, year_date);
        let refresh = refresh_value(grant.value, rate, years_since_grant);

        if grant.growth_rate > 0.0 {
            future_value(refresh, grant.growth_rate, years_since_grant)
        } else {
            refresh
        }
    }

    /// Vested equity per year with an exit multiplier from `exit_year` on.
    ///
    /// Refresh grants are not part of the exit path; only vested value is
    /// carried and scaled.
    pub fn exit_adjusted_equity(
        &self,
        offer: &CompensationOffer,
        exit_valuation: f64,
        exit_year: u32,
        years: u32,
    ) -> Vec<f64> {
        let multiplier = exit_multiplier(exit_valuation);

        (1..=years)
            .map(|year| {
                let year_date = dates::projection_year_date(offer.start_date, year);
                let vested: f64 = offer
                    .equity_grants
                    .iter()
                    .map(|grant| grant_vested_value(grant, year_date, grant.growth_rate))
                    .sum();

                if year >= exit_year {
                    vested * multiplier
                } else {
                    vested
                }
            })
            .collect()
    }

    /// Vested value of a single grant per year under `growth_rate`.
    ///
    /// With an exit valuation, only the final projected year is rescaled.
    pub fn model_equity_growth(
        &self,
        grant: &EquityGrant,
        growth_rate: f64,
        years: u32,
        exit_valuation: Option<f64>,
    ) -> Vec<f64> {
        let exit = exit_valuation.filter(|valuation| *valuation != 0.0);

        (1..=years)
            .map(|year| {
                let year_date = dates::projection_year_date(grant.start_date, year);
                let vested = grant_vested_value(grant, year_date, growth_rate);
                match exit {
                    Some(valuation) if year == years => vested * exit_multiplier(valuation),
                    _ => vested,
                }
            })
            .collect()
    }
}
