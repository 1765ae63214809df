//! Compensation offer data structures and JSON loading

mod data;
pub mod loader;

pub use data::{CompensationOffer, EquityGrant, GrantKind, VestingFrequency, VestingSchedule};
pub use loader::{load_offers, load_offers_from_reader, load_json, OfferLoadError};
