use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::tax_bracket::{TaxBracket, TaxRateTable};

/// Errors raised by [`TaxRates::validate`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TaxRatesError {
    /// A flat rate or ratio fell outside `[0, 1]`.
    #[error("{field} must be between 0 and 1, got {value}")]
    RateOutOfRange { field: &'static str, value: Decimal },

    /// A currency threshold was negative.
    #[error("{field} must be non-negative, got {value}")]
    NegativeThreshold { field: &'static str, value: Decimal },
}

/// Every constant the structure comparison depends on.
///
/// Built once (see [`TaxRates::tax_year_2023`]) and shared by reference; a
/// comparison never mutates it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxRates {
    pub tax_year: i32,

    /// Federal schedule applied to a sole proprietor's profit.
    pub sole_prop_brackets: TaxRateTable,

    /// Federal schedule applied to an S-Corp owner's profit.
    ///
    /// Identical to the sole-proprietorship schedule in the shipped data; kept
    /// separate so the two paths can diverge.
    pub s_corp_brackets: TaxRateTable,

    /// Flat state income tax rate.
    pub state_tax_rate: Decimal,

    /// Self-employment tax rate applied after the net earnings factor.
    pub self_employment_tax_rate: Decimal,

    /// Share of net profit that counts as SE earnings (92.35%).
    pub se_net_earnings_factor: Decimal,

    /// Employer-side payroll tax rate on the S-Corp salary.
    pub payroll_tax_rate: Decimal,

    /// Share of profit paid out as the S-Corp owner's reasonable salary.
    pub s_corp_salary_ratio: Decimal,

    /// Minimum annual savings that justifies running an S-Corp.
    pub break_even_savings: Decimal,

    /// Annual liability at which quarterly estimated payments are expected.
    pub quarterly_estimate_threshold: Decimal,

    /// Profit above which advanced strategies are worth reviewing.
    pub high_profit_threshold: Decimal,

    /// Profit above which an S-Corp election is worth considering.
    pub s_corp_consideration_threshold: Decimal,
}

impl TaxRates {
    /// 2023 single-filer federal schedule and the flat rates used by the
    /// comparison.
    pub fn tax_year_2023() -> Self {
        let brackets = federal_brackets_2023();
        Self {
            tax_year: 2023,
            sole_prop_brackets: brackets.clone(),
            s_corp_brackets: brackets,
            state_tax_rate: Decimal::new(6, 2),
            self_employment_tax_rate: Decimal::new(1413, 4),
            se_net_earnings_factor: Decimal::new(9235, 4),
            payroll_tax_rate: Decimal::new(765, 4),
            s_corp_salary_ratio: Decimal::new(40, 2),
            break_even_savings: Decimal::from(2000),
            quarterly_estimate_threshold: Decimal::from(1000),
            high_profit_threshold: Decimal::from(200_000),
            s_corp_consideration_threshold: Decimal::from(100_000),
        }
    }

    /// Checks the flat rates and thresholds. Bracket tables are validated
    /// when they are built.
    ///
    /// # Errors
    ///
    /// Returns [`TaxRatesError`] for the first rate outside `[0, 1]` or the
    /// first negative threshold.
    pub fn validate(&self) -> Result<(), TaxRatesError> {
        let rates = [
            ("state_tax_rate", self.state_tax_rate),
            ("self_employment_tax_rate", self.self_employment_tax_rate),
            ("se_net_earnings_factor", self.se_net_earnings_factor),
            ("payroll_tax_rate", self.payroll_tax_rate),
            ("s_corp_salary_ratio", self.s_corp_salary_ratio),
        ];
        for (field, value) in rates {
            if value < Decimal::ZERO || value > Decimal::ONE {
                return Err(TaxRatesError::RateOutOfRange { field, value });
            }
        }

        let thresholds = [
            ("break_even_savings", self.break_even_savings),
            ("quarterly_estimate_threshold", self.quarterly_estimate_threshold),
            ("high_profit_threshold", self.high_profit_threshold),
            (
                "s_corp_consideration_threshold",
                self.s_corp_consideration_threshold,
            ),
        ];
        for (field, value) in thresholds {
            if value < Decimal::ZERO {
                return Err(TaxRatesError::NegativeThreshold { field, value });
            }
        }

        Ok(())
    }
}

impl Default for TaxRates {
    fn default() -> Self {
        Self::tax_year_2023()
    }
}

fn federal_brackets_2023() -> TaxRateTable {
    let bounds: [(i64, Option<i64>, i64); 7] = [
        (0, Some(11_000), 10),
        (11_000, Some(44_725), 12),
        (44_725, Some(95_375), 22),
        (95_375, Some(182_050), 24),
        (182_050, Some(231_250), 32),
        (231_250, Some(578_125), 35),
        (578_125, None, 37),
    ];
    let brackets = bounds
        .into_iter()
        .map(|(min, max, pct)| {
            TaxBracket::new(
                Decimal::from(min),
                max.map(Decimal::from),
                Decimal::new(pct, 2),
            )
        })
        .collect();

    TaxRateTable::new(brackets).unwrap_or_else(|e| panic!("built-in 2023 schedule is invalid: {e}"))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn default_is_tax_year_2023() {
        assert_eq!(TaxRates::default(), TaxRates::tax_year_2023());
    }

    #[test]
    fn tax_year_2023_carries_published_constants() {
        let rates = TaxRates::tax_year_2023();

        assert_eq!(rates.tax_year, 2023);
        assert_eq!(rates.state_tax_rate, dec!(0.06));
        assert_eq!(rates.self_employment_tax_rate, dec!(0.1413));
        assert_eq!(rates.se_net_earnings_factor, dec!(0.9235));
        assert_eq!(rates.payroll_tax_rate, dec!(0.0765));
        assert_eq!(rates.s_corp_salary_ratio, dec!(0.40));
        assert_eq!(rates.break_even_savings, dec!(2000));
    }

    #[test]
    fn tax_year_2023_uses_seven_brackets_for_both_structures() {
        let rates = TaxRates::tax_year_2023();

        assert_eq!(rates.sole_prop_brackets.len(), 7);
        assert_eq!(rates.sole_prop_brackets, rates.s_corp_brackets);
        assert_eq!(rates.sole_prop_brackets[0].max_income, Some(dec!(11000)));
        assert_eq!(rates.sole_prop_brackets[6].min_income, dec!(578125));
        assert_eq!(rates.sole_prop_brackets[6].rate, dec!(0.37));
    }

    #[test]
    fn validate_accepts_defaults() {
        assert_eq!(TaxRates::default().validate(), Ok(()));
    }

    #[test]
    fn validate_rejects_rate_above_one() {
        let rates = TaxRates {
            payroll_tax_rate: dec!(1.2),
            ..TaxRates::default()
        };

        assert_eq!(
            rates.validate(),
            Err(TaxRatesError::RateOutOfRange {
                field: "payroll_tax_rate",
                value: dec!(1.2),
            })
        );
    }

    #[test]
    fn validate_rejects_negative_salary_ratio() {
        let rates = TaxRates {
            s_corp_salary_ratio: dec!(-0.1),
            ..TaxRates::default()
        };

        assert!(matches!(
            rates.validate(),
            Err(TaxRatesError::RateOutOfRange {
                field: "s_corp_salary_ratio",
                ..
            })
        ));
    }

    #[test]
    fn validate_rejects_negative_threshold() {
        let rates = TaxRates {
            break_even_savings: dec!(-1),
            ..TaxRates::default()
        };

        assert_eq!(
            rates.validate(),
            Err(TaxRatesError::NegativeThreshold {
                field: "break_even_savings",
                value: dec!(-1),
            })
        );
    }

    #[test]
    fn bracket_table_conversion_goes_through_validation() {
        // serde deserializes tables through this same TryFrom.
        let bad: Result<TaxRateTable, _> = TaxRateTable::try_from(vec![]);

        assert!(bad.is_err());
    }
}
