//! Flat-rate taxes: state income tax, self-employment tax and payroll tax.
//!
//! Each function rounds its own result to a whole dollar.

use rust_decimal::Decimal;

use crate::calculations::common::round_to_dollar;

/// State income tax: `income × state_rate`.
pub fn calculate_state_tax(
    income: Decimal,
    state_rate: Decimal,
) -> Decimal {
    round_to_dollar(income * state_rate)
}

/// Self-employment tax on net profit.
///
/// Only `net_earnings_factor` (92.35%) of the profit counts as SE earnings;
/// the SE rate applies to that share. Rounding happens once, at the end.
///
/// ```
/// use rust_decimal_macros::dec;
/// use trifecta_core::calculations::flat_rate::calculate_self_employment_tax;
///
/// // 100,000 × 0.9235 × 0.1413 = 13,049.055
/// let tax = calculate_self_employment_tax(dec!(100000), dec!(0.9235), dec!(0.1413));
/// assert_eq!(tax, dec!(13049));
/// ```
pub fn calculate_self_employment_tax(
    income: Decimal,
    net_earnings_factor: Decimal,
    se_rate: Decimal,
) -> Decimal {
    let se_income = income * net_earnings_factor;
    round_to_dollar(se_income * se_rate)
}

/// Employer-side payroll tax on an S-Corp salary.
pub fn calculate_payroll_tax(
    salary: Decimal,
    payroll_rate: Decimal,
) -> Decimal {
    round_to_dollar(salary * payroll_rate)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn state_tax_applies_flat_rate() {
        assert_eq!(calculate_state_tax(dec!(100000), dec!(0.06)), dec!(6000));
    }

    #[test]
    fn state_tax_rounds_to_dollar() {
        // 12,345 × 6% = 740.70
        assert_eq!(calculate_state_tax(dec!(12345), dec!(0.06)), dec!(741));
    }

    #[test]
    fn state_tax_on_zero_income_is_zero() {
        assert_eq!(calculate_state_tax(dec!(0), dec!(0.06)), dec!(0));
    }

    #[test]
    fn self_employment_tax_applies_net_earnings_factor_first() {
        // 50,000 × 0.9235 = 46,175; × 14.13% = 6,524.5275
        assert_eq!(
            calculate_self_employment_tax(dec!(50000), dec!(0.9235), dec!(0.1413)),
            dec!(6525)
        );
    }

    #[test]
    fn self_employment_tax_with_full_factor_is_plain_rate() {
        assert_eq!(
            calculate_self_employment_tax(dec!(10000), dec!(1), dec!(0.1413)),
            dec!(1413)
        );
    }

    #[test]
    fn payroll_tax_applies_employer_rate() {
        assert_eq!(calculate_payroll_tax(dec!(40000), dec!(0.0765)), dec!(3060));
    }

    #[test]
    fn payroll_tax_rounds_half_up() {
        // 10 × 0.0765 = 0.765
        assert_eq!(calculate_payroll_tax(dec!(10), dec!(0.0765)), dec!(1));
        // 6 × 0.0765 = 0.459
        assert_eq!(calculate_payroll_tax(dec!(6), dec!(0.0765)), dec!(0));
    }
}
