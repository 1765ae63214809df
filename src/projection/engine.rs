//! Compensation projection engine

use log::debug;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::yearly::{CompensationBreakdown, OfferProjection, YearlyProjection};
use crate::equity::EquityProjector;
use crate::offer::CompensationOffer;

/// Shortest accepted projection horizon
pub const MIN_PROJECTION_YEARS: u32 = 1;

/// Longest accepted projection horizon
pub const MAX_PROJECTION_YEARS: u32 = 6;

/// Default projection horizon
pub const DEFAULT_PROJECTION_YEARS: u32 = 4;

/// Exit year used when a scenario does not name one
pub const DEFAULT_EXIT_YEAR: u32 = 4;

/// Configuration for a projection run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionConfig {
    /// Number of years to project
    #[serde(default = "default_projection_years")]
    pub projection_years: u32,

    /// Exit year applied to exit scenarios without an explicit year
    #[serde(default = "default_exit_year")]
    pub default_exit_year: u32,
}

fn default_projection_years() -> u32 { DEFAULT_PROJECTION_YEARS }
fn default_exit_year() -> u32 { DEFAULT_EXIT_YEAR }

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            projection_years: DEFAULT_PROJECTION_YEARS,
            default_exit_year: DEFAULT_EXIT_YEAR,
        }
    }
}

/// Projects base salary, bonus and equity year by year
#[derive(Debug, Clone, Copy, Default)]
pub struct CompensationProjector {
    equity: EquityProjector,
}

impl CompensationProjector {
    pub fn new() -> Self {
        Self {
            equity: EquityProjector::new(),
        }
    }

    /// Equity projector used for the equity column
    pub fn equity(&self) -> &EquityProjector {
        &self.equity
    }

    /// Run projection for a single offer
    pub fn project(&self, offer: &CompensationOffer, years: u32) -> OfferProjection {
        let rows = (1..=years).map(|year| self.project_year(offer, year)).collect();
        debug!("Projected {} over {} year(s)", offer.name, years);
        OfferProjection::new(offer.name.clone(), rows)
    }

    /// Compensation for one projection year
    pub fn project_year(&self, offer: &CompensationOffer, year: u32) -> YearlyProjection {
        YearlyProjection::new(
            year,
            offer.base_salary,
            self.bonus_for_year(offer, year),
            self.equity.year_equity_value(offer, year),
        )
    }

    /// Recurring bonus, plus the signing bonus in year 1 only
    pub fn bonus_for_year(&self, offer: &CompensationOffer, year: u32) -> f64 {
        if year == 1 {
            offer.signing_bonus + offer.annual_bonus()
        } else {
            offer.annual_bonus()
        }
    }

    /// Project several offers, preserving their order
    pub fn compare(&self, offers: &[CompensationOffer], years: u32) -> Vec<OfferProjection> {
        offers.iter().map(|offer| self.project(offer, years)).collect()
    }

    /// Same as `compare`, with offers projected in parallel
    pub fn compare_parallel(&self, offers: &[CompensationOffer], years: u32) -> Vec<OfferProjection> {
        offers.par_iter().map(|offer| self.project(offer, years)).collect()
    }

    pub fn cagr(&self, offer: &CompensationOffer, years: u32) -> f64 {
        self.project(offer, years).cagr()
    }

    pub fn total_value(&self, offer: &CompensationOffer, years: u32) -> f64 {
        self.project(offer, years).total_value()
    }

    pub fn breakdown_percentages(&self, offer: &CompensationOffer, years: u32) -> CompensationBreakdown {
        self.project(offer, years).breakdown()
    }
}
