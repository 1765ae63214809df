//! Small numeric helpers shared by the projectors and the CLI

/// Compound `initial_value` forward at `growth_rate` for a real number of years
pub fn future_value(initial_value: f64, growth_rate: f64, years: f64) -> f64 {
    initial_value * (1.0 + growth_rate).powf(years)
}

/// Compound annual growth rate between two values spaced `years` apart.
///
/// Returns 0.0 when the start value is not positive or the span is empty.
pub fn cagr_between(initial_value: f64, final_value: f64, years: f64) -> f64 {
    if initial_value <= 0.0 || years <= 0.0 {
        return 0.0;
    }
    (final_value / initial_value).powf(1.0 / years) - 1.0
}

/// Round to the nearest thousand, ties to even
pub fn round_to_nearest_thousand(value: f64) -> f64 {
    (value / 1000.0).round_ties_even() * 1000.0
}

/// Compact display form: `$1.2M`, `$180K`, `$950`
pub fn format_currency(value: f64) -> String {
    if value >= 1_000_000.0 {
        format!("${:.1}M", value / 1_000_000.0)
    } else if value >= 1_000.0 {
        format!("${:.0}K", value / 1_000.0)
    } else {
        format!("${:.0}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_future_value() {
        assert_relative_eq!(future_value(100.0, 0.10, 2.0), 121.0, epsilon = 1e-9);
        assert_relative_eq!(future_value(100.0, 0.10, 0.0), 100.0);
        assert_relative_eq!(future_value(100.0, 0.21, 0.5), 110.0, epsilon = 1e-9);
    }

    #[test]
    fn test_cagr_between() {
        assert_relative_eq!(cagr_between(100.0, 121.0, 2.0), 0.10, epsilon = 1e-12);
        assert_eq!(cagr_between(0.0, 121.0, 2.0), 0.0);
        assert_eq!(cagr_between(100.0, 121.0, 0.0), 0.0);
    }

    #[test]
    fn test_round_to_nearest_thousand() {
        assert_eq!(round_to_nearest_thousand(180_499.0), 180_000.0);
        assert_eq!(round_to_nearest_thousand(180_501.0), 181_000.0);
        assert_eq!(round_to_nearest_thousand(2_500.0), 2_000.0);
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(1_240_000.0), "$1.2M");
        assert_eq!(format_currency(180_000.0), "$180K");
        assert_eq!(format_currency(950.0), "$950");
    }
}
