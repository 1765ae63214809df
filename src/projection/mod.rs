//! Year-by-year compensation projections

mod engine;
mod yearly;
mod export;

pub use engine::{
    CompensationProjector, ProjectionConfig, DEFAULT_EXIT_YEAR, DEFAULT_PROJECTION_YEARS,
    MAX_PROJECTION_YEARS, MIN_PROJECTION_YEARS,
};
pub use yearly::{CompensationBreakdown, OfferProjection, ProjectionSummary, YearlyProjection};
pub use export::{write_projections_csv, write_projections_csv_path};
