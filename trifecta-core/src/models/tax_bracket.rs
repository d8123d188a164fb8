use std::ops::Deref;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single progressive bracket. `max_income` is `None` for the top bracket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    pub min_income: Decimal,
    pub max_income: Option<Decimal>,
    pub rate: Decimal,
}

impl TaxBracket {
    pub fn new(
        min_income: Decimal,
        max_income: Option<Decimal>,
        rate: Decimal,
    ) -> Self {
        Self {
            min_income,
            max_income,
            rate,
        }
    }

    /// Width of the bracket, or `None` when it is unbounded.
    pub fn width(&self) -> Option<Decimal> {
        self.max_income.map(|max| max - self.min_income)
    }
}

/// Errors raised while assembling a [`TaxRateTable`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TaxRateTableError {
    #[error("tax rate table has no brackets")]
    Empty,

    #[error("first bracket must start at 0, starts at {0}")]
    FirstBracketNotAtZero(Decimal),

    #[error("bracket {index} starts at {found}, expected {expected}")]
    Discontinuous {
        index: usize,
        expected: Decimal,
        found: Decimal,
    },

    #[error("bracket {index} has max {max} not above min {min}")]
    InvertedRange {
        index: usize,
        min: Decimal,
        max: Decimal,
    },

    #[error("bracket {index} rate must be between 0 and 1, got {rate}")]
    InvalidRate { index: usize, rate: Decimal },

    #[error("only the last bracket may be unbounded (bracket {0})")]
    UnboundedBeforeEnd(usize),

    #[error("last bracket must be unbounded")]
    BoundedTop,
}

/// Ordered, gap-free bracket schedule covering `[0, ∞)`.
///
/// Construction validates the schedule; the federal tax walk in
/// [`crate::calculations::federal`] relies on it being contiguous.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<TaxBracket>", into = "Vec<TaxBracket>")]
pub struct TaxRateTable {
    brackets: Vec<TaxBracket>,
}

impl TaxRateTable {
    /// Validates and wraps a bracket list.
    ///
    /// # Errors
    ///
    /// Returns [`TaxRateTableError`] when the list is empty, does not start at
    /// zero, has gaps or overlaps, contains an inverted range or a rate
    /// outside `[0, 1]`, or does not end with an unbounded bracket.
    pub fn new(brackets: Vec<TaxBracket>) -> Result<Self, TaxRateTableError> {
        let first = brackets.first().ok_or(TaxRateTableError::Empty)?;
        if first.min_income != Decimal::ZERO {
            return Err(TaxRateTableError::FirstBracketNotAtZero(first.min_income));
        }

        let last_index = brackets.len() - 1;
        let mut expected_min = Decimal::ZERO;

        for (index, bracket) in brackets.iter().enumerate() {
            if bracket.min_income != expected_min {
                return Err(TaxRateTableError::Discontinuous {
                    index,
                    expected: expected_min,
                    found: bracket.min_income,
                });
            }
            if bracket.rate < Decimal::ZERO || bracket.rate > Decimal::ONE {
                return Err(TaxRateTableError::InvalidRate {
                    index,
                    rate: bracket.rate,
                });
            }
            match bracket.max_income {
                Some(max) if max <= bracket.min_income => {
                    return Err(TaxRateTableError::InvertedRange {
                        index,
                        min: bracket.min_income,
                        max,
                    });
                }
                Some(max) => expected_min = max,
                None if index != last_index => {
                    return Err(TaxRateTableError::UnboundedBeforeEnd(index));
                }
                None => {}
            }
        }

        if brackets[last_index].max_income.is_some() {
            return Err(TaxRateTableError::BoundedTop);
        }

        Ok(Self { brackets })
    }

    pub fn brackets(&self) -> &[TaxBracket] {
        &self.brackets
    }
}

impl Deref for TaxRateTable {
    type Target = [TaxBracket];

    fn deref(&self) -> &Self::Target {
        &self.brackets
    }
}

impl TryFrom<Vec<TaxBracket>> for TaxRateTable {
    type Error = TaxRateTableError;

    fn try_from(brackets: Vec<TaxBracket>) -> Result<Self, Self::Error> {
        Self::new(brackets)
    }
}

impl From<TaxRateTable> for Vec<TaxBracket> {
    fn from(table: TaxRateTable) -> Self {
        table.brackets
    }
}
