//! Projection output structures

use serde::{Deserialize, Serialize};

use crate::math::cagr_between;

/// Compensation for a single projected year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearlyProjection {
    /// Projection year (1-indexed)
    pub year: u32,
    pub base_salary: f64,
    pub bonus: f64,
    pub equity_value: f64,
    /// Always `base_salary + bonus + equity_value`
    pub total: f64,
}

impl YearlyProjection {
    pub fn new(year: u32, base_salary: f64, bonus: f64, equity_value: f64) -> Self {
        Self {
            year,
            base_salary,
            bonus,
            equity_value,
            total: base_salary + bonus + equity_value,
        }
    }

    /// Same year with a different equity value and a recomputed total
    pub fn with_equity_value(&self, equity_value: f64) -> Self {
        Self::new(self.year, self.base_salary, self.bonus, equity_value)
    }
}

/// Multi-year projection for one offer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OfferProjection {
    pub offer_name: String,

    /// Years 1..=N in order
    pub years: Vec<YearlyProjection>,
}

impl OfferProjection {
    pub fn new(offer_name: impl Into<String>, years: Vec<YearlyProjection>) -> Self {
        Self {
            offer_name: offer_name.into(),
            years,
        }
    }

    /// Sum of yearly totals
    pub fn total_value(&self) -> f64 {
        self.years.iter().map(|y| y.total).sum()
    }

    /// Compound annual growth of the yearly total from the first to the last year.
    ///
    /// Zero for fewer than two years or a non-positive first year.
    pub fn cagr(&self) -> f64 {
        match (self.years.first(), self.years.last()) {
            (Some(first), Some(last)) if self.years.len() >= 2 => {
                cagr_between(first.total, last.total, (self.years.len() - 1) as f64)
            }
            _ => 0.0,
        }
    }

    /// Share of base, bonus and equity in the summed total, in percent
    pub fn breakdown(&self) -> CompensationBreakdown {
        let total_base: f64 = self.years.iter().map(|y| y.base_salary).sum();
        let total_bonus: f64 = self.years.iter().map(|y| y.bonus).sum();
        let total_equity: f64 = self.years.iter().map(|y| y.equity_value).sum();
        let total_comp = total_base + total_bonus + total_equity;

        if total_comp == 0.0 {
            return CompensationBreakdown::default();
        }

        CompensationBreakdown {
            base: total_base / total_comp * 100.0,
            bonus: total_bonus / total_comp * 100.0,
            equity: total_equity / total_comp * 100.0,
        }
    }

    /// Get summary statistics
    pub fn summary(&self) -> ProjectionSummary {
        ProjectionSummary {
            offer_name: self.offer_name.clone(),
            total_years: self.years.len() as u32,
            total_value: self.total_value(),
            first_year_total: self.years.first().map(|y| y.total).unwrap_or(0.0),
            final_year_total: self.years.last().map(|y| y.total).unwrap_or(0.0),
            cagr: self.cagr(),
            breakdown: self.breakdown(),
        }
    }
}

/// Percentage split of total compensation
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CompensationBreakdown {
    pub base: f64,
    pub bonus: f64,
    pub equity: f64,
}

/// Summary statistics for a projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionSummary {
    pub offer_name: String,
    pub total_years: u32,
    pub total_value: f64,
    pub first_year_total: f64,
    pub final_year_total: f64,
    pub cagr: f64,
    pub breakdown: CompensationBreakdown,
}
