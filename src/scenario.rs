//! What-if scenarios over a base offer
//!
//! Each scenario builds a transformed offer (or transformed projection) and
//! feeds it through the same `CompensationProjector` as the base case. The
//! caller's offer is never modified.

use chrono::NaiveDate;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::equity::{EquityProjector, EXIT_REFERENCE_VALUATION};
use crate::offer::CompensationOffer;
use crate::projection::{CompensationProjector, OfferProjection, ProjectionConfig};
use crate::request::ScenarioRequest;

/// Errors from comparing projections
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScenarioError {
    #[error("cannot compare a {base}-year base projection with a {scenario}-year scenario")]
    YearCountMismatch { base: usize, scenario: usize },
}

/// A single what-if adjustment, keyed by `type` on the wire
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Scenario {
    /// Move the hire date; grants keep their offset from it
    StartDate { new_start_date: NaiveDate },

    /// Liquidity event at `exit_valuation` from `exit_year` onwards
    Exit {
        exit_valuation: f64,
        #[serde(default)]
        exit_year: Option<u32>,
    },

    /// Replace every grant's growth rate
    GrowthRate { growth_rate: f64 },

    /// Replace every grant's refresh rate (percent)
    RefreshRate { refresh_rate: f64 },
}

impl Scenario {
    /// Parse a loosely-typed descriptor.
    ///
    /// Returns `None` for unknown types, missing or mistyped fields and
    /// out-of-range values.
    pub fn from_descriptor(descriptor: &serde_json::Value) -> Option<Self> {
        let scenario: Scenario = match serde_json::from_value(descriptor.clone()) {
            Ok(s) => s,
            Err(e) => {
                warn!("Skipping scenario descriptor {}: {}", descriptor, e);
                return None;
            }
        };

        if scenario.is_in_range() {
            Some(scenario)
        } else {
            warn!("Skipping out-of-range scenario {:?}", scenario);
            None
        }
    }

    fn is_in_range(&self) -> bool {
        match *self {
            Scenario::StartDate { .. } => true,
            Scenario::Exit { exit_valuation, exit_year } => {
                exit_valuation.is_finite() && exit_valuation > 0.0 && exit_year.map_or(true, |y| y >= 1)
            }
            Scenario::GrowthRate { growth_rate } => growth_rate.is_finite(),
            Scenario::RefreshRate { refresh_rate } => refresh_rate.is_finite() && refresh_rate >= 0.0,
        }
    }

    /// Short human-readable label.
    ///
    /// Refresh rates print in shortest float form, so `25.0` reads
    /// `25% Refresh` rather than `25.0% Refresh`.
    pub fn label(&self) -> String {
        match self {
            Scenario::StartDate { .. } => "Start Date Change".to_string(),
            Scenario::Exit { exit_valuation, .. } => {
                format!("Exit at ${:.1}B", exit_valuation / EXIT_REFERENCE_VALUATION)
            }
            Scenario::GrowthRate { growth_rate } => format!("{:.0}% Growth", growth_rate * 100.0),
            Scenario::RefreshRate { refresh_rate } => format!("{}% Refresh", refresh_rate),
        }
    }
}

/// Change in total compensation for one year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearlyImpact {
    pub year: u32,
    pub difference: f64,
    pub percentage_change: f64,
}

/// Scenario-vs-base comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioImpact {
    pub scenario_name: String,
    pub total_difference: f64,
    pub percentage_change: f64,
    pub yearly_differences: Vec<YearlyImpact>,
}

/// Runs scenarios against a base offer
#[derive(Debug, Clone, Default)]
pub struct ScenarioEngine {
    projector: CompensationProjector,
    config: ProjectionConfig,
}

impl ScenarioEngine {
    /// Create an engine with the default configuration
    pub fn new() -> Self {
        Self::with_config(ProjectionConfig::default())
    }

    pub fn with_config(config: ProjectionConfig) -> Self {
        Self {
            projector: CompensationProjector::new(),
            config,
        }
    }

    pub fn config(&self) -> &ProjectionConfig {
        &self.config
    }

    fn equity(&self) -> &EquityProjector {
        self.projector.equity()
    }

    /// Plain projection of the offer
    pub fn project(&self, offer: &CompensationOffer, years: u32) -> OfferProjection {
        self.projector.project(offer, years)
    }

    /// Re-project with the hire date (and every grant date) shifted
    pub fn simulate_start_date(
        &self,
        offer: &CompensationOffer,
        new_start_date: NaiveDate,
        years: u32,
    ) -> OfferProjection {
        self.projector.project(&offer.rescheduled(new_start_date), years)
    }

    /// Base salary and bonus as usual, equity replaced by the exit-adjusted path
    pub fn simulate_exit(
        &self,
        offer: &CompensationOffer,
        exit_valuation: f64,
        exit_year: u32,
        years: u32,
    ) -> OfferProjection {
        let base = self.projector.project(offer, years);
        let exit_equity = self
            .equity()
            .exit_adjusted_equity(offer, exit_valuation, exit_year, years);

        let adjusted = base
            .years
            .iter()
            .zip(exit_equity)
            .map(|(year, equity)| year.with_equity_value(equity))
            .collect();

        OfferProjection::new(format!("{} (Exit Scenario)", offer.name), adjusted)
    }

    /// Re-project with every grant growing at `growth_rate`
    pub fn simulate_growth_rate(&self, offer: &CompensationOffer, growth_rate: f64, years: u32) -> OfferProjection {
        self.projector.project(&offer.with_growth_override(growth_rate), years)
    }

    /// Re-project with every grant refreshing at `refresh_rate` percent
    pub fn simulate_refresh_rate(&self, offer: &CompensationOffer, refresh_rate: f64, years: u32) -> OfferProjection {
        self.projector.project(&offer.with_refresh_override(refresh_rate), years)
    }

    /// Apply one scenario; the projection keeps the name its transform produces
    pub fn run_scenario(&self, offer: &CompensationOffer, scenario: &Scenario, years: u32) -> OfferProjection {
        match *scenario {
            Scenario::StartDate { new_start_date } => self.simulate_start_date(offer, new_start_date, years),
            Scenario::Exit { exit_valuation, exit_year } => {
                let exit_year = exit_year.unwrap_or(self.config.default_exit_year);
                self.simulate_exit(offer, exit_valuation, exit_year, years)
            }
            Scenario::GrowthRate { growth_rate } => self.simulate_growth_rate(offer, growth_rate, years),
            Scenario::RefreshRate { refresh_rate } => self.simulate_refresh_rate(offer, refresh_rate, years),
        }
    }

    /// Handle a single scenario request.
    ///
    /// A new start date takes priority, then a positive exit valuation (at the
    /// default exit year); with neither, the base projection is returned.
    pub fn run_request(&self, request: &ScenarioRequest) -> OfferProjection {
        let years = request.projection_years;

        if let Some(new_start_date) = request.new_start_date {
            return self.simulate_start_date(&request.offer, new_start_date, years);
        }

        match request.exit_valuation {
            Some(valuation) if valuation > 0.0 => {
                self.simulate_exit(&request.offer, valuation, self.config.default_exit_year, years)
            }
            _ => self.project(&request.offer, years),
        }
    }

    /// Base projection followed by one projection per usable descriptor.
    ///
    /// Output names are `Scenario {n}: {label}` where `n` is the descriptor's
    /// 1-based position in `descriptors`; skipped descriptors still use up
    /// their number.
    pub fn compare_scenarios(
        &self,
        base_offer: &CompensationOffer,
        descriptors: &[serde_json::Value],
        years: u32,
    ) -> Vec<OfferProjection> {
        let mut projections = Vec::with_capacity(descriptors.len() + 1);
        projections.push(self.project(base_offer, years));

        for (i, descriptor) in descriptors.iter().enumerate() {
            let Some(scenario) = Scenario::from_descriptor(descriptor) else {
                continue;
            };
            let mut projection = self.run_scenario(base_offer, &scenario, years);
            projection.offer_name = format!("Scenario {}: {}", i + 1, scenario.label());
            projections.push(projection);
        }

        info!(
            "Ran {} of {} scenario(s) for {}",
            projections.len() - 1,
            descriptors.len(),
            base_offer.name
        );
        projections
    }

    /// Batch over the configured projection horizon
    pub fn run_batch(&self, base_offer: &CompensationOffer, descriptors: &[serde_json::Value]) -> Vec<OfferProjection> {
        self.compare_scenarios(base_offer, descriptors, self.config.projection_years)
    }
}

/// Difference between a scenario and its base, overall and per year.
///
/// Percentages are relative to the base and are zero wherever the base total
/// is not positive.
pub fn scenario_impact(base: &OfferProjection, scenario: &OfferProjection) -> Result<ScenarioImpact, ScenarioError> {
    if base.years.len() != scenario.years.len() {
        return Err(ScenarioError::YearCountMismatch {
            base: base.years.len(),
            scenario: scenario.years.len(),
        });
    }

    let base_total = base.total_value();
    let total_difference = scenario.total_value() - base_total;

    let yearly_differences = base
        .years
        .iter()
        .zip(&scenario.years)
        .map(|(b, s)| {
            let difference = s.total - b.total;
            YearlyImpact {
                year: b.year,
                difference,
                percentage_change: percent_of(difference, b.total),
            }
        })
        .collect();

    Ok(ScenarioImpact {
        scenario_name: scenario.offer_name.clone(),
        total_difference,
        percentage_change: percent_of(total_difference, base_total),
        yearly_differences,
    })
}

fn percent_of(difference: f64, base: f64) -> f64 {
    if base > 0.0 {
        difference / base * 100.0
    } else {
        0.0
    }
}
