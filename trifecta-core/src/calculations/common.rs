//! Common utility functions for tax calculations.
//!
//! This module provides the rounding and formatting helpers shared by the
//! bracket walk, the flat-rate taxes and the advisory messages.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a value to a whole dollar, with halves rounded toward positive
/// infinity.
///
/// Every tax component is rounded on its own with this function before the
/// components are summed, so totals are always exact sums of whole dollars.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use trifecta_core::calculations::common::round_to_dollar;
///
/// assert_eq!(round_to_dollar(dec!(13049.055)), dec!(13049));
/// assert_eq!(round_to_dollar(dec!(2.5)), dec!(3));
/// assert_eq!(round_to_dollar(dec!(-2.5)), dec!(-2)); // toward +∞
/// ```
pub fn round_to_dollar(value: Decimal) -> Decimal {
    (value + Decimal::new(5, 1)).floor()
}

/// Rounds a percentage to one decimal place, halves away from zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use trifecta_core::calculations::common::round_percentage;
///
/// assert_eq!(round_percentage(dec!(27.405)), dec!(27.4));
/// assert_eq!(round_percentage(dec!(27.45)), dec!(27.5));
/// ```
pub fn round_percentage(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
}

/// `part` as a percentage of `whole`, rounded to one decimal place.
///
/// Returns zero when `whole` is zero.
pub fn percentage_of(
    part: Decimal,
    whole: Decimal,
) -> Decimal {
    if whole.is_zero() {
        return Decimal::ZERO;
    }
    round_percentage(part / whole * Decimal::ONE_HUNDRED)
}

/// Formats a whole-dollar amount as `$12,345` (or `-$12,345`).
///
/// Cents are dropped after rounding to a dollar.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use trifecta_core::calculations::common::format_currency;
///
/// assert_eq!(format_currency(dec!(9989)), "$9,989");
/// assert_eq!(format_currency(dec!(-1234567)), "-$1,234,567");
/// ```
pub fn format_currency(amount: Decimal) -> String {
    let rounded = round_to_dollar(amount);
    let digits = rounded.abs().trunc().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    // =========================================================================
    // round_to_dollar tests
    // =========================================================================

    #[test]
    fn round_to_dollar_rounds_down_below_midpoint() {
        assert_eq!(round_to_dollar(dec!(100.49)), dec!(100));
    }

    #[test]
    fn round_to_dollar_rounds_up_at_midpoint() {
        assert_eq!(round_to_dollar(dec!(100.50)), dec!(101));
    }

    #[test]
    fn round_to_dollar_rounds_negative_midpoint_toward_positive() {
        assert_eq!(round_to_dollar(dec!(-100.50)), dec!(-100));
        assert_eq!(round_to_dollar(dec!(-100.51)), dec!(-101));
    }

    #[test]
    fn round_to_dollar_preserves_whole_values() {
        assert_eq!(round_to_dollar(dec!(6000)), dec!(6000));
        assert_eq!(round_to_dollar(dec!(0)), dec!(0));
    }

    // =========================================================================
    // percentage tests
    // =========================================================================

    #[test]
    fn percentage_of_rounds_to_one_place() {
        assert_eq!(percentage_of(dec!(1), dec!(3)), dec!(33.3));
        assert_eq!(percentage_of(dec!(2), dec!(3)), dec!(66.7));
    }

    #[test]
    fn percentage_of_handles_negative_part() {
        assert_eq!(percentage_of(dec!(-50), dec!(200)), dec!(-25.0));
    }

    #[test]
    fn percentage_of_zero_whole_is_zero() {
        assert_eq!(percentage_of(dec!(10), dec!(0)), dec!(0));
    }

    // =========================================================================
    // format_currency tests
    // =========================================================================

    #[test]
    fn format_currency_groups_thousands() {
        assert_eq!(format_currency(dec!(2000)), "$2,000");
        assert_eq!(format_currency(dec!(999)), "$999");
        assert_eq!(format_currency(dec!(100000)), "$100,000");
        assert_eq!(format_currency(dec!(1000000)), "$1,000,000");
    }

    #[test]
    fn format_currency_rounds_cents() {
        assert_eq!(format_currency(dec!(1234.6)), "$1,235");
    }

    #[test]
    fn format_currency_marks_negative_amounts() {
        assert_eq!(format_currency(dec!(-500)), "-$500");
    }

    #[test]
    fn format_currency_handles_zero() {
        assert_eq!(format_currency(dec!(0)), "$0");
    }
}
