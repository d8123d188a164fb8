use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Tax owed by a sole proprietor. Every amount is whole dollars.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolePropBreakdown {
    pub federal_tax: Decimal,
    pub state_tax: Decimal,
    pub self_employment_tax: Decimal,
    pub total_tax: Decimal,
}

impl SolePropBreakdown {
    /// Builds the breakdown; the total is always the sum of the parts.
    pub fn new(
        federal_tax: Decimal,
        state_tax: Decimal,
        self_employment_tax: Decimal,
    ) -> Self {
        Self {
            federal_tax,
            state_tax,
            self_employment_tax,
            total_tax: federal_tax + state_tax + self_employment_tax,
        }
    }
}

/// Tax owed by an S-Corp owner plus the salary/distribution split.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SCorpBreakdown {
    pub federal_tax: Decimal,
    pub state_tax: Decimal,
    pub payroll_tax: Decimal,
    pub reasonable_salary: Decimal,
    pub distribution: Decimal,
    pub total_tax: Decimal,
}

impl SCorpBreakdown {
    /// Builds the breakdown; the total is always the sum of the three taxes.
    pub fn new(
        federal_tax: Decimal,
        state_tax: Decimal,
        payroll_tax: Decimal,
        reasonable_salary: Decimal,
        distribution: Decimal,
    ) -> Self {
        Self {
            federal_tax,
            state_tax,
            payroll_tax,
            reasonable_salary,
            distribution,
            total_tax: federal_tax + state_tax + payroll_tax,
        }
    }
}

/// Difference between the two structures' totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxSavings {
    /// Sole-prop total minus S-Corp total. Negative when the S-Corp costs more.
    pub amount: Decimal,
    /// `amount` as a percentage of the sole-prop total, one decimal place.
    pub percentage: Decimal,
}

/// Side-by-side result for one profit figure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxComparison {
    pub profit: Decimal,
    pub sole_prop: SolePropBreakdown,
    pub s_corp: SCorpBreakdown,
    pub savings: TaxSavings,
}

/// How savings move between two profit levels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavingsDelta {
    pub current_savings: TaxSavings,
    pub target_savings: TaxSavings,
    pub additional_savings: TaxSavings,
}

/// One row of a projection table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxProjection {
    pub profit: Decimal,
    pub sole_prop_tax: Decimal,
    pub s_corp_tax: Decimal,
    pub savings: Decimal,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProfitRangeError {
    #[error("step must be positive, got {0}")]
    NonPositiveStep(Decimal),

    #[error("range end {end} is below start {start}")]
    EndBeforeStart { start: Decimal, end: Decimal },

    #[error("range start must be non-negative, got {0}")]
    NegativeStart(Decimal),

    #[error("range would produce more than {max} profits")]
    TooManyPoints { max: usize },
}

/// Upper bound on the number of profits a range may expand to.
pub const MAX_PROFIT_POINTS: usize = 10_000;

/// Inclusive profit sweep, e.g. `50,000..=500,000` in steps of `10,000`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfitRange {
    pub start: Decimal,
    pub end: Decimal,
    pub step: Decimal,
}

impl ProfitRange {
    /// # Errors
    ///
    /// Returns [`ProfitRangeError`] for a negative start, an end below the
    /// start, a step that is not positive, or a sweep longer than
    /// [`MAX_PROFIT_POINTS`].
    pub fn new(
        start: Decimal,
        end: Decimal,
        step: Decimal,
    ) -> Result<Self, ProfitRangeError> {
        if start < Decimal::ZERO {
            return Err(ProfitRangeError::NegativeStart(start));
        }
        if end < start {
            return Err(ProfitRangeError::EndBeforeStart { start, end });
        }
        if step <= Decimal::ZERO {
            return Err(ProfitRangeError::NonPositiveStep(step));
        }

        let too_many = ProfitRangeError::TooManyPoints {
            max: MAX_PROFIT_POINTS,
        };
        let intervals = (end - start).checked_div(step).ok_or(too_many.clone())?;
        if intervals.floor() >= Decimal::from(MAX_PROFIT_POINTS) {
            return Err(too_many);
        }
        Ok(Self { start, end, step })
    }

    /// Profits from `start` up to and including `end` (when it lands on a step).
    pub fn profits(&self) -> Vec<Decimal> {
        let mut profits = Vec::new();
        let mut profit = self.start;
        while profit <= self.end && profits.len() < MAX_PROFIT_POINTS {
            profits.push(profit);
            match profit.checked_add(self.step) {
                Some(next) => profit = next,
                None => break,
            }
        }
        profits
    }
}

impl Default for ProfitRange {
    fn default() -> Self {
        Self {
            start: Decimal::from(50_000),
            end: Decimal::from(500_000),
            step: Decimal::from(10_000),
        }
    }
}
