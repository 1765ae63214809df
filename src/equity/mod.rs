//! Equity valuation: vesting, refresh grants and per-year equity totals

mod vesting;
mod refresh;
mod projector;

pub use vesting::{vested_fraction, vested_value, grant_vested_value, vesting_schedule, VestingScheduleRow};
pub use refresh::refresh_value;
pub use projector::{EquityProjector, exit_multiplier, EXIT_REFERENCE_VALUATION};
