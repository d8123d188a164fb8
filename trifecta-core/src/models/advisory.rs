use serde::{Deserialize, Serialize};

use super::comparison::TaxComparison;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BusinessStructure {
    SoleProprietorship,
    SCorporation,
}

impl BusinessStructure {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SoleProprietorship => "sole-proprietorship",
            Self::SCorporation => "s-corporation",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::SoleProprietorship => "Sole Proprietorship",
            Self::SCorporation => "S-Corporation",
        }
    }
}

/// Recommendations currently always carry `High`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
}

impl Confidence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
        }
    }
}

/// Owner goals that nudge a recommendation's reasons and considerations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BusinessGoal {
    Growth,
    Simplicity,
}

impl BusinessGoal {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Growth => "growth",
            Self::Simplicity => "simplicity",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "growth" => Some(Self::Growth),
            "simplicity" => Some(Self::Simplicity),
            _ => None,
        }
    }
}

/// Suggested structure with the comparison that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructureRecommendation {
    pub structure: BusinessStructure,
    pub confidence: Confidence,
    pub reasons: Vec<String>,
    pub considerations: Vec<String>,
    pub tax_comparison: TaxComparison,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AlertKind {
    QuarterlyEstimate,
    OpportunityZone,
    SCorpElection,
    HighProfit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    Info,
    Warning,
}

impl AlertSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
        }
    }
}

/// A threshold the owner should hear about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxAlert {
    pub kind: AlertKind,
    pub severity: AlertSeverity,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn business_goal_parse_is_case_insensitive() {
        assert_eq!(BusinessGoal::parse("Growth"), Some(BusinessGoal::Growth));
        assert_eq!(BusinessGoal::parse(" simplicity "), Some(BusinessGoal::Simplicity));
        assert_eq!(BusinessGoal::parse("exit"), None);
    }

    #[test]
    fn business_structure_codes_match_serialized_form() {
        assert_eq!(BusinessStructure::SoleProprietorship.as_str(), "sole-proprietorship");
        assert_eq!(BusinessStructure::SCorporation.as_str(), "s-corporation");
        assert_eq!(BusinessStructure::SCorporation.label(), "S-Corporation");
    }

    #[test]
    fn warning_outranks_info() {
        assert!(AlertSeverity::Warning > AlertSeverity::Info);
    }
}
