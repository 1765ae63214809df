//! Boundary request types and input validation
//!
//! The projection core assumes well-formed input. Everything here runs before
//! the core is invoked and rejects requests that fall outside the accepted
//! ranges.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::offer::CompensationOffer;
use crate::projection::{DEFAULT_PROJECTION_YEARS, MAX_PROJECTION_YEARS, MIN_PROJECTION_YEARS};

/// Most offers accepted in one comparison
pub const MAX_OFFERS_PER_COMPARISON: usize = 10;

/// Input rejected at the boundary
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    #[error("{offer}: {field} must be non-negative, got {value}")]
    NegativeAmount {
        offer: String,
        field: String,
        value: f64,
    },

    #[error("{offer}: {field} must be a finite number")]
    NonFinite { offer: String, field: String },

    #[error("{offer}: bonus_percentage must be within [0, 100], got {value}")]
    BonusPercentageOutOfRange { offer: String, value: f64 },

    #[error("{offer}: equity_grants[{grant}] vesting duration must be at least 1 month")]
    ZeroVestingDuration { offer: String, grant: usize },

    #[error("projection years must be within [1, 6], got {0}")]
    YearsOutOfRange(u32),

    #[error("at least one offer must be provided")]
    NoOffers,

    #[error("at most 10 offers can be compared at once, got {0}")]
    TooManyOffers(usize),

    #[error("exit valuation must be non-negative, got {0}")]
    NegativeExitValuation(f64),
}

fn default_projection_years() -> u32 { DEFAULT_PROJECTION_YEARS }

/// Compare several offers over the same horizon
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonRequest {
    pub offers: Vec<CompensationOffer>,

    #[serde(default = "default_projection_years")]
    pub projection_years: u32,
}

impl ComparisonRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_comparison(&self.offers, self.projection_years)
    }
}

/// Single what-if request: a start date shift, an exit, or neither
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioRequest {
    pub offer: CompensationOffer,

    #[serde(default)]
    pub new_start_date: Option<NaiveDate>,

    #[serde(default)]
    pub exit_valuation: Option<f64>,

    #[serde(default = "default_projection_years")]
    pub projection_years: u32,
}

impl ScenarioRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_offer(&self.offer)?;
        validate_years(self.projection_years)?;
        match self.exit_valuation {
            Some(v) if !v.is_finite() => Err(ValidationError::NonFinite {
                offer: self.offer.name.clone(),
                field: "exit_valuation".to_string(),
            }),
            Some(v) if v < 0.0 => Err(ValidationError::NegativeExitValuation(v)),
            _ => Ok(()),
        }
    }
}

/// A base offer and a list of loosely-typed scenario descriptors.
///
/// Descriptors stay as raw JSON; malformed entries are skipped when the batch
/// runs rather than rejected here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchScenarioRequest {
    pub base_offer: CompensationOffer,

    #[serde(default)]
    pub scenarios: Vec<serde_json::Value>,

    #[serde(default = "default_projection_years")]
    pub projection_years: u32,
}

impl BatchScenarioRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_offer(&self.base_offer)?;
        validate_years(self.projection_years)
    }
}

/// Check a projection horizon against the accepted range
pub fn validate_years(years: u32) -> Result<(), ValidationError> {
    if (MIN_PROJECTION_YEARS..=MAX_PROJECTION_YEARS).contains(&years) {
        Ok(())
    } else {
        Err(ValidationError::YearsOutOfRange(years))
    }
}

/// Check the offer count and every offer in a comparison
pub fn validate_comparison(offers: &[CompensationOffer], years: u32) -> Result<(), ValidationError> {
    if offers.is_empty() {
        return Err(ValidationError::NoOffers);
    }
    if offers.len() > MAX_OFFERS_PER_COMPARISON {
        return Err(ValidationError::TooManyOffers(offers.len()));
    }
    validate_years(years)?;
    offers.iter().try_for_each(validate_offer)
}

/// Check money fields, percentages and vesting durations of one offer
pub fn validate_offer(offer: &CompensationOffer) -> Result<(), ValidationError> {
    let name = &offer.name;

    check_amount(name, "base_salary", offer.base_salary)?;
    check_amount(name, "signing_bonus", offer.signing_bonus)?;
    check_amount(name, "bonus_fixed", offer.bonus_fixed)?;

    check_finite(name, "bonus_percentage", offer.bonus_percentage)?;
    if !(0.0..=100.0).contains(&offer.bonus_percentage) {
        return Err(ValidationError::BonusPercentageOutOfRange {
            offer: name.clone(),
            value: offer.bonus_percentage,
        });
    }

    for (i, grant) in offer.equity_grants.iter().enumerate() {
        check_amount(name, &format!("equity_grants[{}].value", i), grant.value)?;
        check_finite(name, &format!("equity_grants[{}].growth_rate", i), grant.growth_rate)?;
        if let Some(rate) = grant.refresh_rate {
            check_amount(name, &format!("equity_grants[{}].refresh_rate", i), rate)?;
        }
        if grant.vesting_schedule.duration_months == 0 {
            return Err(ValidationError::ZeroVestingDuration {
                offer: name.clone(),
                grant: i,
            });
        }
    }

    Ok(())
}

fn check_finite(offer: &str, field: &str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::NonFinite {
            offer: offer.to_string(),
            field: field.to_string(),
        })
    }
}

fn check_amount(offer: &str, field: &str, value: f64) -> Result<(), ValidationError> {
    check_finite(offer, field, value)?;
    if value < 0.0 {
        return Err(ValidationError::NegativeAmount {
            offer: offer.to_string(),
            field: field.to_string(),
            value,
        });
    }
    Ok(())
}
