//! Progressive federal income tax.
//!
//! The bracket walk taxes each slice of income at the rate of the bracket it
//! falls in:
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | Start with the full income as the remaining amount |
//! | 2    | For each bracket, take the smaller of the remaining amount and the bracket width |
//! | 3    | Add that slice × bracket rate to the running tax |
//! | 4    | Subtract the slice from the remaining amount; stop once nothing remains |
//! | 5    | Round the accumulated tax to a whole dollar |
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use trifecta_core::TaxRates;
//! use trifecta_core::calculations::federal::calculate_federal_tax;
//!
//! let rates = TaxRates::tax_year_2023();
//!
//! assert_eq!(calculate_federal_tax(dec!(11000), &rates.sole_prop_brackets), dec!(1100));
//! assert_eq!(calculate_federal_tax(dec!(100000), &rates.sole_prop_brackets), dec!(17400));
//! ```

use rust_decimal::Decimal;
use tracing::{trace, warn};

use crate::TaxBracket;
use crate::calculations::common::round_to_dollar;

/// Computes progressive tax on `income` using `brackets`.
///
/// Brackets must be ordered, contiguous from zero, and end with an unbounded
/// bracket; [`crate::TaxRateTable`] guarantees this. Any other slice yields a
/// result without raising an error. Zero or negative income owes nothing.
pub fn calculate_federal_tax(
    income: Decimal,
    brackets: &[TaxBracket],
) -> Decimal {
    if income < Decimal::ZERO {
        warn!(income = %income, "Negative income; no federal tax applies");
    }

    let mut tax = Decimal::ZERO;
    let mut remaining = income;

    for bracket in brackets {
        if remaining <= Decimal::ZERO {
            break;
        }

        let taxable_in_bracket = match bracket.width() {
            Some(width) => remaining.min(width),
            None => remaining,
        };
        tax += taxable_in_bracket * bracket.rate;
        remaining -= taxable_in_bracket;

        trace!(
            min_income = %bracket.min_income,
            rate = %bracket.rate,
            taxable = %taxable_in_bracket,
            running_tax = %tax,
            "Applied federal bracket"
        );
    }

    if remaining > Decimal::ZERO {
        warn!(
            untaxed = %remaining,
            "Income exceeds the top bracket; schedule is missing an unbounded bracket"
        );
    }

    round_to_dollar(tax)
}
