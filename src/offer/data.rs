//! Offer, grant and vesting schedule value types
//!
//! All types are plain values. Scenario transforms never mutate an offer in
//! place; they build a new one through the `with_*` / `rescheduled` methods.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::dates;

/// How often vested equity is released
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VestingFrequency {
    #[default]
    Monthly,
    Quarterly,
    Annually,
}

impl VestingFrequency {
    /// Months covered by one vesting tranche
    pub fn months_per_tranche(&self) -> u32 {
        match self {
            VestingFrequency::Monthly => 1,
            VestingFrequency::Quarterly => 3,
            VestingFrequency::Annually => 12,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            VestingFrequency::Monthly => "monthly",
            VestingFrequency::Quarterly => "quarterly",
            VestingFrequency::Annually => "annually",
        }
    }
}

/// Equity instrument type.
///
/// Carried for reporting only; every kind is valued the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GrantKind {
    #[serde(rename = "RSU")]
    Rsu,
    #[serde(rename = "option")]
    StockOption,
    #[serde(rename = "ISO")]
    Iso,
}

/// Vesting terms for a grant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VestingSchedule {
    /// Months before any vesting credit is given
    pub cliff_months: u32,

    /// Months until the grant is fully vested (at least 1)
    pub duration_months: u32,

    #[serde(default)]
    pub frequency: VestingFrequency,
}

impl VestingSchedule {
    pub fn new(cliff_months: u32, duration_months: u32, frequency: VestingFrequency) -> Self {
        Self {
            cliff_months,
            duration_months,
            frequency,
        }
    }

    /// Common four-year schedule with a one-year cliff, vesting monthly
    pub fn standard_four_year() -> Self {
        Self::new(12, 48, VestingFrequency::Monthly)
    }
}

impl Default for VestingSchedule {
    fn default() -> Self {
        Self::standard_four_year()
    }
}

/// A single equity grant within an offer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquityGrant {
    /// Instrument type
    #[serde(rename = "type", alias = "kind")]
    pub kind: GrantKind,

    /// Total grant value
    pub value: f64,

    pub vesting_schedule: VestingSchedule,

    /// Grant date; vesting and growth are both measured from here
    pub start_date: NaiveDate,

    /// Annual refresh grant size as a percentage of `value`
    #[serde(default)]
    pub refresh_rate: Option<f64>,

    /// Annual appreciation applied to vested and refresh value
    #[serde(default)]
    pub growth_rate: f64,
}

impl EquityGrant {
    pub fn new(
        kind: GrantKind,
        value: f64,
        vesting_schedule: VestingSchedule,
        start_date: NaiveDate,
    ) -> Self {
        Self {
            kind,
            value,
            vesting_schedule,
            start_date,
            refresh_rate: None,
            growth_rate: 0.0,
        }
    }

    pub fn with_refresh_rate(mut self, refresh_rate: f64) -> Self {
        self.refresh_rate = Some(refresh_rate);
        self
    }

    pub fn with_growth_rate(mut self, growth_rate: f64) -> Self {
        self.growth_rate = growth_rate;
        self
    }

    /// Refresh rate with "not set" treated as zero
    pub fn effective_refresh_rate(&self) -> f64 {
        self.refresh_rate.unwrap_or(0.0)
    }
}

/// A complete compensation offer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompensationOffer {
    /// Name used to label projections
    #[serde(alias = "offer_name")]
    pub name: String,

    /// Annual base salary
    pub base_salary: f64,

    /// One-time bonus paid in year 1
    #[serde(default)]
    pub signing_bonus: f64,

    /// Annual bonus as a percentage of base salary, 0-100
    #[serde(default)]
    pub bonus_percentage: f64,

    /// Fixed annual bonus
    #[serde(default)]
    pub bonus_fixed: f64,

    #[serde(default)]
    pub equity_grants: Vec<EquityGrant>,

    /// Employment start date
    pub start_date: NaiveDate,
}

impl CompensationOffer {
    pub fn new(name: impl Into<String>, base_salary: f64, start_date: NaiveDate) -> Self {
        Self {
            name: name.into(),
            base_salary,
            signing_bonus: 0.0,
            bonus_percentage: 0.0,
            bonus_fixed: 0.0,
            equity_grants: Vec::new(),
            start_date,
        }
    }

    pub fn with_signing_bonus(mut self, signing_bonus: f64) -> Self {
        self.signing_bonus = signing_bonus;
        self
    }

    pub fn with_bonus_percentage(mut self, bonus_percentage: f64) -> Self {
        self.bonus_percentage = bonus_percentage;
        self
    }

    pub fn with_bonus_fixed(mut self, bonus_fixed: f64) -> Self {
        self.bonus_fixed = bonus_fixed;
        self
    }

    pub fn with_grant(mut self, grant: EquityGrant) -> Self {
        self.equity_grants.push(grant);
        self
    }

    /// Recurring bonus (fixed + percentage of base), excluding the signing bonus
    pub fn annual_bonus(&self) -> f64 {
        self.bonus_fixed + self.base_salary * self.bonus_percentage / 100.0
    }

    /// Copy of this offer starting on `new_start_date`.
    ///
    /// Every grant moves by the same day count so its offset from the hire
    /// date is preserved.
    pub fn rescheduled(&self, new_start_date: NaiveDate) -> Self {
        let offset_days = dates::days_between(self.start_date, new_start_date);
        Self {
            start_date: new_start_date,
            equity_grants: self
                .equity_grants
                .iter()
                .map(|grant| EquityGrant {
                    start_date: dates::shift_days(grant.start_date, offset_days),
                    ..grant.clone()
                })
                .collect(),
            ..self.clone()
        }
    }

    /// Copy of this offer with every grant's growth rate replaced
    pub fn with_growth_override(&self, growth_rate: f64) -> Self {
        self.map_grants(|grant| grant.with_growth_rate(growth_rate))
    }

    /// Copy of this offer with every grant's refresh rate replaced
    pub fn with_refresh_override(&self, refresh_rate: f64) -> Self {
        self.map_grants(|grant| grant.with_refresh_rate(refresh_rate))
    }

    fn map_grants(&self, f: impl Fn(EquityGrant) -> EquityGrant) -> Self {
        Self {
            equity_grants: self.equity_grants.iter().cloned().map(f).collect(),
            ..self.clone()
        }
    }
}
