//! Compensation Projection - multi-year offer modelling and what-if analysis
//!
//! This library provides:
//! - Month-granularity vesting with cliffs and quarterly/annual tranches
//! - Refresh grants and compounding equity growth
//! - Year-by-year projections of base salary, bonus and equity
//! - Comparison metrics (CAGR, total value, component breakdown)
//! - Scenarios: start date shift, growth and refresh overrides, exit events

pub mod dates;
pub mod math;
pub mod offer;
pub mod equity;
pub mod projection;
pub mod request;
pub mod scenario;

// Re-export commonly used types
pub use offer::{CompensationOffer, EquityGrant, GrantKind, VestingFrequency, VestingSchedule};
pub use equity::EquityProjector;
pub use projection::{CompensationProjector, OfferProjection, ProjectionConfig, YearlyProjection};
pub use request::{BatchScenarioRequest, ComparisonRequest, ScenarioRequest, ValidationError};
pub use scenario::{scenario_impact, Scenario, ScenarioEngine, ScenarioImpact};
