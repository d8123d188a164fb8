//! Sole proprietorship vs. S-Corporation comparison.
//!
//! # Comparison Structure
//!
//! | Component | Sole proprietorship | S-Corporation |
//! |-----------|---------------------|---------------|
//! | Federal   | Brackets on full profit | Brackets on full profit |
//! | State     | Flat rate on full profit | Flat rate on full profit |
//! | SE / payroll | SE tax on 92.35% of profit | Payroll tax on the reasonable salary only |
//! | Total     | Sum of the three | Sum of the three |
//!
//! The S-Corp owner's reasonable salary is `round(profit × 40%)` and the
//! distribution is whatever remains, so the two always add up to the profit.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use trifecta_core::{TaxComparator, TaxRates};
//!
//! let rates = TaxRates::tax_year_2023();
//! let comparison = TaxComparator::new(&rates).compare(dec!(100000));
//!
//! assert_eq!(comparison.sole_prop.total_tax, dec!(36449));
//! assert_eq!(comparison.s_corp.total_tax, dec!(26460));
//! assert_eq!(comparison.savings.amount, dec!(9989));
//! assert_eq!(comparison.savings.percentage, dec!(27.4));
//! ```

use std::sync::LazyLock;

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::calculations::common::{percentage_of, round_to_dollar};
use crate::calculations::federal::calculate_federal_tax;
use crate::calculations::flat_rate::{
    calculate_payroll_tax, calculate_self_employment_tax, calculate_state_tax,
};
use crate::models::{
    SCorpBreakdown, SavingsDelta, SolePropBreakdown, TaxComparison, TaxProjection, TaxRates,
    TaxSavings,
};

static DEFAULT_RATES: LazyLock<TaxRates> = LazyLock::new(TaxRates::tax_year_2023);

/// The built-in 2023 rates, built on first use and shared afterwards.
pub fn default_rates() -> &'static TaxRates {
    &DEFAULT_RATES
}

/// Compares both structures for `profit` using [`default_rates`].
pub fn compare_structures(profit: Decimal) -> TaxComparison {
    TaxComparator::new(default_rates()).compare(profit)
}

/// Calculator for the structure comparison.
///
/// Borrows a [`TaxRates`] and holds no other state, so every method is a pure
/// function of its arguments.
#[derive(Debug, Clone, Copy)]
pub struct TaxComparator<'a> {
    rates: &'a TaxRates,
}

impl<'a> TaxComparator<'a> {
    pub fn new(rates: &'a TaxRates) -> Self {
        Self { rates }
    }

    pub fn rates(&self) -> &'a TaxRates {
        self.rates
    }

    /// Computes both breakdowns and the savings for `profit`.
    ///
    /// Negative profit is not rejected; it is logged and flows through the
    /// same formulas.
    pub fn compare(
        &self,
        profit: Decimal,
    ) -> TaxComparison {
        if profit < Decimal::ZERO {
            warn!(profit = %profit, "Comparing structures for a negative profit");
        }

        let sole_prop = self.sole_prop_breakdown(profit);
        let s_corp = self.s_corp_breakdown(profit);
        let savings = self.savings(&sole_prop, &s_corp);

        debug!(
            profit = %profit,
            sole_prop_total = %sole_prop.total_tax,
            s_corp_total = %s_corp.total_tax,
            savings = %savings.amount,
            "Compared business structures"
        );

        TaxComparison {
            profit,
            sole_prop,
            s_corp,
            savings,
        }
    }

    /// Savings at the current profit, at the target profit, and the change
    /// between them.
    pub fn calculate_tax_savings(
        &self,
        current_profit: Decimal,
        target_profit: Decimal,
    ) -> SavingsDelta {
        let current = self.compare(current_profit).savings;
        let target = self.compare(target_profit).savings;

        let additional_savings = TaxSavings {
            amount: target.amount - current.amount,
            percentage: target.percentage - current.percentage,
        };

        SavingsDelta {
            current_savings: current,
            target_savings: target,
            additional_savings,
        }
    }

    /// One projection row per profit, in the order given.
    pub fn project(
        &self,
        profits: &[Decimal],
    ) -> Vec<TaxProjection> {
        profits
            .iter()
            .map(|&profit| {
                let comparison = self.compare(profit);
                TaxProjection {
                    profit,
                    sole_prop_tax: comparison.sole_prop.total_tax,
                    s_corp_tax: comparison.s_corp.total_tax,
                    savings: comparison.savings.amount,
                }
            })
            .collect()
    }

    fn sole_prop_breakdown(
        &self,
        profit: Decimal,
    ) -> SolePropBreakdown {
        let federal_tax = calculate_federal_tax(profit, &self.rates.sole_prop_brackets);
        let state_tax = calculate_state_tax(profit, self.rates.state_tax_rate);
        let self_employment_tax = calculate_self_employment_tax(
            profit,
            self.rates.se_net_earnings_factor,
            self.rates.self_employment_tax_rate,
        );

        SolePropBreakdown::new(federal_tax, state_tax, self_employment_tax)
    }

    fn s_corp_breakdown(
        &self,
        profit: Decimal,
    ) -> SCorpBreakdown {
        let (reasonable_salary, distribution) = self.split_profit(profit);

        // Federal tax still uses the full profit, not salary plus distribution.
        let federal_tax = calculate_federal_tax(profit, &self.rates.s_corp_brackets);
        let state_tax = calculate_state_tax(profit, self.rates.state_tax_rate);
        let payroll_tax = calculate_payroll_tax(reasonable_salary, self.rates.payroll_tax_rate);

        SCorpBreakdown::new(
            federal_tax,
            state_tax,
            payroll_tax,
            reasonable_salary,
            distribution,
        )
    }

    /// Splits profit into `(reasonable_salary, distribution)`.
    fn split_profit(
        &self,
        profit: Decimal,
    ) -> (Decimal, Decimal) {
        let reasonable_salary = round_to_dollar(profit * self.rates.s_corp_salary_ratio);
        (reasonable_salary, profit - reasonable_salary)
    }

    fn savings(
        &self,
        sole_prop: &SolePropBreakdown,
        s_corp: &SCorpBreakdown,
    ) -> TaxSavings {
        let amount = sole_prop.total_tax - s_corp.total_tax;
        if sole_prop.total_tax.is_zero() {
            warn!("Sole proprietorship owes no tax; savings percentage reported as 0");
        }

        TaxSavings {
            amount,
            percentage: percentage_of(amount, sole_prop.total_tax),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use tracing_subscriber::fmt::format::FmtSpan;

    use super::*;
    use crate::models::{TaxBracket, TaxRateTable};

    fn comparator() -> TaxComparator<'static> {
        TaxComparator::new(default_rates())
    }

    fn init_test_tracing() -> tracing::subscriber::DefaultGuard {
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .with_span_events(FmtSpan::NONE)
            .with_test_writer()
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    // =========================================================================
    // compare tests
    // =========================================================================

    #[test]
    fn compare_one_hundred_thousand_matches_reference() {
        let result = comparator().compare(dec!(100000));

        assert_eq!(
            result.sole_prop,
            SolePropBreakdown {
                federal_tax: dec!(17400),
                state_tax: dec!(6000),
                self_employment_tax: dec!(13049),
                total_tax: dec!(36449),
            }
        );
        assert_eq!(
            result.s_corp,
            SCorpBreakdown {
                federal_tax: dec!(17400),
                state_tax: dec!(6000),
                payroll_tax: dec!(3060),
                reasonable_salary: dec!(40000),
                distribution: dec!(60000),
                total_tax: dec!(26460),
            }
        );
        assert_eq!(
            result.savings,
            TaxSavings {
                amount: dec!(9989),
                percentage: dec!(27.4),
            }
        );
    }

    #[test]
    fn compare_keeps_profit() {
        assert_eq!(comparator().compare(dec!(250000)).profit, dec!(250000));
    }

    #[test]
    fn compare_zero_profit_is_all_zero() {
        let result = comparator().compare(dec!(0));

        assert_eq!(result.sole_prop.total_tax, dec!(0));
        assert_eq!(result.s_corp.total_tax, dec!(0));
        assert_eq!(result.savings.amount, dec!(0));
        assert_eq!(result.savings.percentage, dec!(0));
    }

    #[test]
    fn compare_negative_profit_logs_and_still_splits() {
        let _guard = init_test_tracing();

        let result = comparator().compare(dec!(-10000));

        assert_eq!(result.sole_prop.federal_tax, dec!(0));
        assert_eq!(result.s_corp.reasonable_salary, dec!(-4000));
        assert_eq!(result.s_corp.distribution, dec!(-6000));
        // Warning is logged (verified by test_writer capturing output)
    }

    #[test]
    fn compare_high_profit() {
        let result = comparator().compare(dec!(500000));

        assert_eq!(result.sole_prop.total_tax, dec!(242144));
        assert_eq!(result.s_corp.total_tax, dec!(192199));
        assert_eq!(result.savings.amount, dec!(49945));
        assert_eq!(result.savings.percentage, dec!(20.6));
    }

    #[test]
    fn federal_and_state_tax_match_between_structures() {
        let result = comparator().compare(dec!(150000));

        assert_eq!(result.sole_prop.federal_tax, result.s_corp.federal_tax);
        assert_eq!(result.sole_prop.state_tax, result.s_corp.state_tax);
    }

    #[test]
    fn salary_and_distribution_add_up_to_profit() {
        for profit in [
            dec!(0),
            dec!(5),
            dec!(1234.5),
            dec!(12345),
            dec!(99999.99),
            dec!(500000),
        ] {
            let s_corp = comparator().compare(profit).s_corp;
            assert_eq!(s_corp.reasonable_salary + s_corp.distribution, profit);
        }
    }

    #[test]
    fn salary_is_rounded_but_distribution_is_not() {
        let s_corp = comparator().compare(dec!(1234.5)).s_corp;

        assert_eq!(s_corp.reasonable_salary, dec!(494));
        assert_eq!(s_corp.distribution, dec!(740.5));
    }

    #[test]
    fn totals_are_sums_of_components() {
        for step in 0..=50 {
            let profit = Decimal::from(step * 10_000);
            let result = comparator().compare(profit);

            assert_eq!(
                result.sole_prop.total_tax,
                result.sole_prop.federal_tax
                    + result.sole_prop.state_tax
                    + result.sole_prop.self_employment_tax
            );
            assert_eq!(
                result.s_corp.total_tax,
                result.s_corp.federal_tax + result.s_corp.state_tax + result.s_corp.payroll_tax
            );
            assert_eq!(
                result.savings.amount,
                result.sole_prop.total_tax - result.s_corp.total_tax
            );
        }
    }

    #[test]
    fn compare_is_idempotent() {
        let first = comparator().compare(dec!(123456));
        let second = comparator().compare(dec!(123456));

        assert_eq!(first, second);
    }

    #[test]
    fn compare_structures_uses_default_rates() {
        assert_eq!(
            compare_structures(dec!(100000)),
            TaxComparator::new(&TaxRates::tax_year_2023()).compare(dec!(100000))
        );
    }

    #[test]
    fn savings_can_be_negative_with_expensive_payroll() {
        let rates = TaxRates {
            payroll_tax_rate: dec!(0.50),
            s_corp_salary_ratio: dec!(1),
            ..TaxRates::default()
        };

        let result = TaxComparator::new(&rates).compare(dec!(100000));

        assert!(result.savings.amount < Decimal::ZERO);
        assert!(result.savings.percentage < Decimal::ZERO);
    }

    #[test]
    fn custom_schedule_is_used_for_each_structure() {
        let flat = TaxRateTable::new(vec![TaxBracket::new(dec!(0), None, dec!(0.20))]).unwrap();
        let rates = TaxRates {
            s_corp_brackets: flat,
            ..TaxRates::default()
        };

        let result = TaxComparator::new(&rates).compare(dec!(100000));

        assert_eq!(result.sole_prop.federal_tax, dec!(17400));
        assert_eq!(result.s_corp.federal_tax, dec!(20000));
    }

    // =========================================================================
    // calculate_tax_savings tests
    // =========================================================================

    #[test]
    fn calculate_tax_savings_reports_both_points_and_difference() {
        let delta = comparator().calculate_tax_savings(dec!(100000), dec!(200000));

        assert_eq!(delta.current_savings.amount, dec!(9989));
        assert_eq!(delta.target_savings.amount, dec!(19978));
        assert_eq!(delta.additional_savings.amount, dec!(9989));
        // 24.7 - 27.4
        assert_eq!(delta.additional_savings.percentage, dec!(-2.7));
    }

    #[test]
    fn calculate_tax_savings_same_profit_has_no_difference() {
        let delta = comparator().calculate_tax_savings(dec!(75000), dec!(75000));

        assert_eq!(delta.additional_savings.amount, dec!(0));
        assert_eq!(delta.additional_savings.percentage, dec!(0));
    }

    // =========================================================================
    // project tests
    // =========================================================================

    #[test]
    fn project_returns_row_per_profit_in_order() {
        let rows = comparator().project(&[dec!(100000), dec!(50000)]);

        assert_eq!(
            rows,
            vec![
                TaxProjection {
                    profit: dec!(100000),
                    sole_prop_tax: dec!(36449),
                    s_corp_tax: dec!(26460),
                    savings: dec!(9989),
                },
                TaxProjection {
                    profit: dec!(50000),
                    sole_prop_tax: dec!(15833),
                    s_corp_tax: dec!(10838),
                    savings: dec!(4995),
                },
            ]
        );
    }

    #[test]
    fn project_empty_input_is_empty() {
        assert!(comparator().project(&[]).is_empty());
    }
}
