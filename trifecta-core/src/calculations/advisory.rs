//! Recommendation and alert helpers built on top of a [`TaxComparison`].
//!
//! None of these compute tax; they compare already computed totals against
//! the thresholds carried by [`TaxRates`].

use rust_decimal::Decimal;
use tracing::debug;

use crate::calculations::comparator::TaxComparator;
use crate::calculations::common::format_currency;
use crate::models::{
    AlertKind, AlertSeverity, BusinessGoal, BusinessStructure, Confidence,
    StructureRecommendation, TaxAlert, TaxComparison, TaxRates,
};

#[derive(Debug, Clone, Copy)]
pub struct TaxAdvisor<'a> {
    comparator: TaxComparator<'a>,
}

impl<'a> TaxAdvisor<'a> {
    pub fn new(rates: &'a TaxRates) -> Self {
        Self {
            comparator: TaxComparator::new(rates),
        }
    }

    fn rates(&self) -> &'a TaxRates {
        self.comparator.rates()
    }

    /// Recommends a structure for `profit`.
    ///
    /// The S-Corporation wins once the annual savings reach
    /// [`TaxRates::break_even_savings`]; below that the simpler sole
    /// proprietorship is preferred.
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use trifecta_core::calculations::TaxAdvisor;
    /// use trifecta_core::{BusinessStructure, TaxRates};
    ///
    /// let rates = TaxRates::tax_year_2023();
    /// let advisor = TaxAdvisor::new(&rates);
    ///
    /// let rec = advisor.recommend(dec!(100000), &[]);
    /// assert_eq!(rec.structure, BusinessStructure::SCorporation);
    /// assert_eq!(rec.reasons[0], "Annual tax savings of $9,989");
    /// ```
    pub fn recommend(
        &self,
        profit: Decimal,
        goals: &[BusinessGoal],
    ) -> StructureRecommendation {
        let comparison = self.comparator.compare(profit);
        let savings = comparison.savings.amount;
        let break_even = self.rates().break_even_savings;

        let mut reasons = Vec::new();
        let mut considerations = Vec::new();

        let structure = if savings >= break_even {
            reasons.push(format!(
                "Annual tax savings of {}",
                format_currency(savings)
            ));
            reasons.push("Significant payroll tax reduction on distributions".to_string());
            considerations.push("Requires reasonable salary payments".to_string());
            considerations.push("Additional compliance and filing requirements".to_string());
            BusinessStructure::SCorporation
        } else {
            reasons.push("Lower administrative complexity and costs".to_string());
            reasons.push("Simpler tax filing requirements".to_string());
            considerations.push(format!(
                "Limited tax savings: {} annually",
                format_currency(savings)
            ));
            BusinessStructure::SoleProprietorship
        };

        if goals.contains(&BusinessGoal::Growth) {
            considerations.push("Consider S-Corp for future scalability".to_string());
        }
        if goals.contains(&BusinessGoal::Simplicity) {
            reasons.push("Maintains operational simplicity".to_string());
        }

        let confidence = Confidence::High;

        debug!(
            profit = %profit,
            savings = %savings,
            structure = structure.as_str(),
            confidence = confidence.as_str(),
            "Recommended business structure"
        );

        StructureRecommendation {
            structure,
            confidence,
            reasons,
            considerations,
            tax_comparison: comparison,
        }
    }

    /// Fires when even the cheaper structure owes at least the quarterly
    /// estimate threshold for the year.
    pub fn check_quarterly_estimate_alert(
        &self,
        comparison: &TaxComparison,
    ) -> Option<TaxAlert> {
        let lowest_total = comparison
            .sole_prop
            .total_tax
            .min(comparison.s_corp.total_tax);
        let threshold = self.rates().quarterly_estimate_threshold;

        (lowest_total >= threshold).then(|| TaxAlert {
            kind: AlertKind::QuarterlyEstimate,
            severity: AlertSeverity::Info,
            message: format!(
                "Projected tax of at least {} exceeds {}; schedule quarterly estimated payments to avoid underpayment penalties",
                format_currency(lowest_total),
                format_currency(threshold)
            ),
        })
    }

    /// Fires once profit reaches the high-profit threshold, where deferring
    /// gains through opportunity zone funds becomes worth a look.
    pub fn check_opportunity_zone_alert(
        &self,
        comparison: &TaxComparison,
    ) -> Option<TaxAlert> {
        let threshold = self.rates().high_profit_threshold;

        (comparison.profit >= threshold).then(|| TaxAlert {
            kind: AlertKind::OpportunityZone,
            severity: AlertSeverity::Warning,
            message: format!(
                "Profit of {} reaches {}; consider reinvesting gains through Qualified Opportunity Zone funds",
                format_currency(comparison.profit),
                format_currency(threshold)
            ),
        })
    }

    /// Every alert that applies to `comparison`, quarterly estimate first.
    pub fn alerts(
        &self,
        comparison: &TaxComparison,
    ) -> Vec<TaxAlert> {
        [
            self.check_quarterly_estimate_alert(comparison),
            self.check_opportunity_zone_alert(comparison),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    /// Guidance when profit moves upward across a threshold.
    ///
    /// Crossing the S-Corp consideration threshold takes precedence: a jump
    /// from below it to above the high-profit threshold reports only the
    /// S-Corp election hint.
    pub fn profit_change_guidance(
        &self,
        previous_profit: Decimal,
        new_profit: Decimal,
    ) -> Option<TaxAlert> {
        let consider = self.rates().s_corp_consideration_threshold;
        let high = self.rates().high_profit_threshold;

        if new_profit >= consider && previous_profit < consider {
            Some(TaxAlert {
                kind: AlertKind::SCorpElection,
                severity: AlertSeverity::Info,
                message: "Consider S-Corporation election for potential tax savings at this profit level"
                    .to_string(),
            })
        } else if new_profit >= high && previous_profit < high {
            Some(TaxAlert {
                kind: AlertKind::HighProfit,
                severity: AlertSeverity::Warning,
                message: "High profit threshold reached - review quarterly estimates and advanced tax strategies"
                    .to_string(),
            })
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::calculations::comparator::default_rates;

    fn advisor() -> TaxAdvisor<'static> {
        TaxAdvisor::new(default_rates())
    }

    // =========================================================================
    // recommend tests
    // =========================================================================

    #[test]
    fn recommend_s_corp_when_savings_clear_break_even() {
        let rec = advisor().recommend(dec!(100000), &[]);

        assert_eq!(rec.structure, BusinessStructure::SCorporation);
        assert_eq!(rec.confidence, Confidence::High);
        assert_eq!(
            rec.reasons,
            vec![
                "Annual tax savings of $9,989".to_string(),
                "Significant payroll tax reduction on distributions".to_string(),
            ]
        );
        assert_eq!(
            rec.considerations,
            vec![
                "Requires reasonable salary payments".to_string(),
                "Additional compliance and filing requirements".to_string(),
            ]
        );
    }

    #[test]
    fn recommend_sole_prop_below_break_even() {
        // Savings at 10,000 profit are 999.
        let rec = advisor().recommend(dec!(10000), &[]);

        assert_eq!(rec.structure, BusinessStructure::SoleProprietorship);
        assert_eq!(rec.confidence, Confidence::High);
        assert_eq!(
            rec.considerations,
            vec!["Limited tax savings: $999 annually".to_string()]
        );
    }

    #[test]
    fn recommend_is_high_confidence_just_below_break_even() {
        // Savings at 20,000 profit are 1,998, two dollars short.
        let rec = advisor().recommend(dec!(20000), &[]);

        assert_eq!(rec.structure, BusinessStructure::SoleProprietorship);
        assert_eq!(rec.confidence, Confidence::High);
    }

    #[test]
    fn recommend_embeds_comparison() {
        let rec = advisor().recommend(dec!(100000), &[]);

        assert_eq!(rec.tax_comparison, advisor().comparator.compare(dec!(100000)));
    }

    #[test]
    fn recommend_growth_goal_adds_consideration() {
        let rec = advisor().recommend(dec!(10000), &[BusinessGoal::Growth]);

        assert_eq!(
            rec.considerations.last().map(String::as_str),
            Some("Consider S-Corp for future scalability")
        );
    }

    #[test]
    fn recommend_simplicity_goal_adds_reason() {
        let rec = advisor().recommend(dec!(100000), &[BusinessGoal::Simplicity]);

        assert_eq!(rec.reasons.len(), 3);
        assert_eq!(rec.reasons[2], "Maintains operational simplicity");
    }

    #[test]
    fn recommend_repeated_goal_applies_once() {
        let rec = advisor().recommend(dec!(100000), &[BusinessGoal::Growth, BusinessGoal::Growth]);

        assert_eq!(rec.considerations.len(), 3);
    }

    // =========================================================================
    // alert tests
    // =========================================================================

    #[test]
    fn quarterly_alert_fires_when_cheaper_structure_owes_threshold() {
        let comparison = advisor().comparator.compare(dec!(10000));

        let alert = advisor().check_quarterly_estimate_alert(&comparison).unwrap();

        assert_eq!(alert.kind, AlertKind::QuarterlyEstimate);
        assert_eq!(alert.severity, AlertSeverity::Info);
        assert!(alert.message.contains("$1,906"));
    }

    #[test]
    fn quarterly_alert_silent_for_small_liability() {
        let comparison = advisor().comparator.compare(dec!(1000));

        assert_eq!(advisor().check_quarterly_estimate_alert(&comparison), None);
    }

    #[test]
    fn opportunity_zone_alert_fires_at_threshold() {
        let comparison = advisor().comparator.compare(dec!(200000));

        let alert = advisor().check_opportunity_zone_alert(&comparison).unwrap();

        assert_eq!(alert.kind, AlertKind::OpportunityZone);
        assert_eq!(alert.severity, AlertSeverity::Warning);
        assert!(alert.message.contains("$200,000"));
    }

    #[test]
    fn opportunity_zone_alert_silent_below_threshold() {
        let comparison = advisor().comparator.compare(dec!(190000));

        assert_eq!(advisor().check_opportunity_zone_alert(&comparison), None);
    }

    #[test]
    fn alerts_collects_all_applicable() {
        let comparison = advisor().comparator.compare(dec!(250000));

        let kinds: Vec<_> = advisor()
            .alerts(&comparison)
            .into_iter()
            .map(|a| a.kind)
            .collect();

        assert_eq!(
            kinds,
            vec![AlertKind::QuarterlyEstimate, AlertKind::OpportunityZone]
        );
    }

    // =========================================================================
    // profit_change_guidance tests
    // =========================================================================

    #[test]
    fn guidance_on_crossing_one_hundred_thousand() {
        let alert = advisor()
            .profit_change_guidance(dec!(90000), dec!(100000))
            .unwrap();

        assert_eq!(alert.kind, AlertKind::SCorpElection);
    }

    #[test]
    fn guidance_on_crossing_two_hundred_thousand() {
        let alert = advisor()
            .profit_change_guidance(dec!(190000), dec!(210000))
            .unwrap();

        assert_eq!(alert.kind, AlertKind::HighProfit);
        assert_eq!(alert.severity, AlertSeverity::Warning);
    }

    #[test]
    fn guidance_prefers_s_corp_hint_on_large_jump() {
        let alert = advisor()
            .profit_change_guidance(dec!(50000), dec!(300000))
            .unwrap();

        assert_eq!(alert.kind, AlertKind::SCorpElection);
    }

    #[test]
    fn no_guidance_when_moving_down_or_within_band() {
        assert_eq!(advisor().profit_change_guidance(dec!(250000), dec!(90000)), None);
        assert_eq!(advisor().profit_change_guidance(dec!(110000), dec!(150000)), None);
    }
}
