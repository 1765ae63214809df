//! Refresh grant sizing

/// Size of a refresh grant as a flat percentage of the original grant.
///
/// The refresh does not grow with the years since the original grant on its
/// own; callers compound it afterwards when the grant carries a growth rate.
pub fn refresh_value(
    original_grant_value: f64,
    refresh_rate_percent: f64,
    _years_since_original: f64,
) -> f64 {
    if refresh_rate_percent <= 0.0 {
        return 0.0;
    }
    original_grant_value * (refresh_rate_percent / 100.0)
}
