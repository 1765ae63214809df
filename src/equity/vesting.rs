//! Vesting arithmetic at month granularity

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::dates;
use crate::math::future_value;
use crate::offer::{EquityGrant, VestingSchedule};

/// Fraction of a grant vested after `elapsed_months` of vesting.
///
/// Zero before the cliff (including negative elapsed time), one once the
/// full duration has passed, and linear in between, rounded down to the last
/// completed tranche for quarterly and annual schedules.
pub fn vested_fraction(schedule: &VestingSchedule, elapsed_months: i32) -> f64 {
    // Compare as i64 so month counts above i32::MAX cannot wrap
    let elapsed = i64::from(elapsed_months);
    let duration = i64::from(schedule.duration_months);
    if elapsed < i64::from(schedule.cliff_months) {
        return 0.0;
    }
    if elapsed >= duration {
        return 1.0;
    }

    // 0 <= elapsed < duration here, so duration is positive
    let tranche = i64::from(schedule.frequency.months_per_tranche());
    let vested_months = (elapsed / tranche) * tranche;
    vested_months as f64 / duration as f64
}

/// Value vested as of `as_of`.
///
/// Vesting is measured from `vesting_start`; growth compounds from
/// `grant_start` using fractional years, and only when `growth_rate` is
/// positive.
pub fn vested_value(
    grant_value: f64,
    grant_start: NaiveDate,
    vesting_start: NaiveDate,
    schedule: &VestingSchedule,
    as_of: NaiveDate,
    growth_rate: f64,
) -> f64 {
    let elapsed_months = dates::months_between(vesting_start, as_of);
    let mut value = grant_value * vested_fraction(schedule, elapsed_months);

    if growth_rate > 0.0 {
        let years_since_grant = dates::years_between(grant_start, as_of);
        value = future_value(value, growth_rate, years_since_grant);
    }

    value.max(0.0)
}

/// Vested value of a grant that starts vesting on its grant date
pub fn grant_vested_value(grant: &EquityGrant, as_of: NaiveDate, growth_rate: f64) -> f64 {
    vested_value(
        grant.value,
        grant.start_date,
        grant.start_date,
        &grant.vesting_schedule,
        as_of,
        growth_rate,
    )
}

/// One year of a grant's vesting schedule, without growth
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VestingScheduleRow {
    pub year: u32,
    pub date: NaiveDate,
    pub vesting_percentage: f64,
    pub vested_value: f64,
    pub months_since_grant: i32,
}

/// Year-by-year vesting detail for a single grant, anchored on its grant date
pub fn vesting_schedule(grant: &EquityGrant, years: u32) -> Vec<VestingScheduleRow> {
    (1..=years)
        .map(|year| {
            let date = dates::projection_year_date(grant.start_date, year);
            let months_since_grant = dates::months_between(grant.start_date, date);
            let vesting_percentage = vested_fraction(&grant.vesting_schedule, months_since_grant);
            VestingScheduleRow {
                year,
                date,
                vesting_percentage,
                vested_value: grant.value * vesting_percentage,
                months_since_grant,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::offer::{GrantKind, VestingFrequency};
    use approx::assert_relative_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_fraction_before_cliff_is_zero() {
        let schedule = VestingSchedule::standard_four_year();
        assert_eq!(vested_fraction(&schedule, 0), 0.0);
        assert_eq!(vested_fraction(&schedule, 11), 0.0);
        assert_eq!(vested_fraction(&schedule, -5), 0.0);
    }

    #[test]
    fn test_fraction_negative_elapsed_without_cliff() {
        let schedule = VestingSchedule::new(0, 48, VestingFrequency::Monthly);
        assert_eq!(vested_fraction(&schedule, -1), 0.0);
        assert_eq!(vested_fraction(&schedule, 0), 0.0);
    }

    #[test]
    fn test_fraction_monthly_is_linear() {
        let schedule = VestingSchedule::standard_four_year();
        assert_eq!(vested_fraction(&schedule, 12), 0.25);
        assert_eq!(vested_fraction(&schedule, 13), 13.0 / 48.0);
        assert_eq!(vested_fraction(&schedule, 36), 0.75);
        assert_eq!(vested_fraction(&schedule, 48), 1.0);
        assert_eq!(vested_fraction(&schedule, 60), 1.0);
    }

    #[test]
    fn test_fraction_quarterly_rounds_down() {
        let schedule = VestingSchedule::new(0, 48, VestingFrequency::Quarterly);
        assert_eq!(vested_fraction(&schedule, 2), 0.0);
        assert_eq!(vested_fraction(&schedule, 3), 3.0 / 48.0);
        assert_eq!(vested_fraction(&schedule, 5), 3.0 / 48.0);
        assert_eq!(vested_fraction(&schedule, 14), 12.0 / 48.0);
    }

    #[test]
    fn test_fraction_annual_rounds_down() {
        let schedule = VestingSchedule::new(0, 48, VestingFrequency::Annually);
        assert_eq!(vested_fraction(&schedule, 11), 0.0);
        assert_eq!(vested_fraction(&schedule, 23), 0.25);
        assert_eq!(vested_fraction(&schedule, 24), 0.5);
        assert_eq!(vested_fraction(&schedule, 47), 0.75);
    }

    #[test]
    fn test_fraction_full_vest_with_uneven_duration() {
        // 50 months is not a whole number of quarters; full vest is still 100%
        let schedule = VestingSchedule::new(0, 50, VestingFrequency::Quarterly);
        assert_eq!(vested_fraction(&schedule, 48), 48.0 / 50.0);
        assert_eq!(vested_fraction(&schedule, 50), 1.0);
    }

    #[test]
    fn test_fraction_cliff_beyond_duration() {
        let schedule = VestingSchedule::new(60, 48, VestingFrequency::Monthly);
        assert_eq!(vested_fraction(&schedule, 48), 0.0);
        assert_eq!(vested_fraction(&schedule, 59), 0.0);
        assert_eq!(vested_fraction(&schedule, 60), 1.0);
    }

    #[test]
    fn test_fraction_monotonic() {
        for frequency in [
            VestingFrequency::Monthly,
            VestingFrequency::Quarterly,
            VestingFrequency::Annually,
        ] {
            let schedule = VestingSchedule::new(6, 48, frequency);
            let mut previous = 0.0;
            for month in -12..72 {
                let fraction = vested_fraction(&schedule, month);
                assert!(fraction >= previous, "{:?} decreased at month {}", frequency, month);
                previous = fraction;
            }
        }
    }

    #[test]
    fn test_vested_value_without_growth() {
        let schedule = VestingSchedule::standard_four_year();
        let start = date(2024, 1, 1);
        assert_eq!(vested_value(200_000.0, start, start, &schedule, date(2024, 12, 31), 0.0), 0.0);
        assert_eq!(vested_value(200_000.0, start, start, &schedule, date(2025, 1, 1), 0.0), 50_000.0);
        assert_eq!(vested_value(200_000.0, start, start, &schedule, date(2028, 1, 1), 0.0), 200_000.0);
    }

    #[test]
    fn test_vested_value_growth_from_grant_date() {
        let schedule = VestingSchedule::new(0, 12, VestingFrequency::Monthly);
        let grant_start = date(2023, 1, 1);
        let vesting_start = date(2024, 1, 1);
        let as_of = date(2025, 1, 1);

        // Fully vested, two years of growth measured from the grant date
        let value = vested_value(100_000.0, grant_start, vesting_start, &schedule, as_of, 0.10);
        assert_relative_eq!(value, 121_000.0, epsilon = 1e-6);
    }

    #[test]
    fn test_vested_value_fractional_growth_years() {
        let schedule = VestingSchedule::new(0, 6, VestingFrequency::Monthly);
        let start = date(2024, 1, 1);
        let value = vested_value(100_000.0, start, start, &schedule, date(2024, 7, 1), 0.21);
        assert_relative_eq!(value, 110_000.0, epsilon = 1e-6);
    }

    #[test]
    fn test_fraction_with_month_counts_beyond_i32() {
        let long_cliff = VestingSchedule::new(3_000_000_000, 48, VestingFrequency::Monthly);
        assert_eq!(vested_fraction(&long_cliff, 12), 0.0);
        assert_eq!(vested_fraction(&long_cliff, i32::MAX), 0.0);

        let long_duration = VestingSchedule::new(0, 3_000_000_000, VestingFrequency::Monthly);
        assert_eq!(vested_fraction(&long_duration, 1), 1.0 / 3_000_000_000.0);
        assert!(vested_fraction(&long_duration, i32::MAX) < 1.0);

        let start = date(2024, 1, 1);
        let value = vested_value(200_000.0, start, start, &long_cliff, date(2026, 1, 1), 0.0);
        assert_eq!(value, 0.0);
    }

    #[test]
    fn test_negative_growth_is_ignored() {
        let schedule = VestingSchedule::standard_four_year();
        let start = date(2024, 1, 1);
        let value = vested_value(200_000.0, start, start, &schedule, date(2026, 1, 1), -0.5);
        assert_eq!(value, 100_000.0);
    }

    #[test]
    fn test_vesting_schedule_rows() {
        let grant = EquityGrant::new(
            GrantKind::Rsu,
            120_000.0,
            VestingSchedule::new(12, 36, VestingFrequency::Annually),
            date(2024, 5, 20),
        );
        let rows = vesting_schedule(&grant, 4);

        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].date, date(2024, 5, 20));
        assert_eq!(rows[0].vested_value, 0.0);
        assert_eq!(rows[1].months_since_grant, 12);
        assert_relative_eq!(rows[1].vested_value, 40_000.0, epsilon = 1e-9);
        assert_relative_eq!(rows[2].vesting_percentage, 24.0 / 36.0, epsilon = 1e-12);
        assert_eq!(rows[3].vested_value, 120_000.0);
    }
}
