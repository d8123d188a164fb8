mod advisory;
mod comparison;
mod section;
mod tax_bracket;
mod tax_rates;

pub use advisory::{
    AlertKind, AlertSeverity, BusinessGoal, BusinessStructure, Confidence,
    StructureRecommendation, TaxAlert,
};
pub use comparison::{
    MAX_PROFIT_POINTS, ProfitRange, ProfitRangeError, SCorpBreakdown, SavingsDelta, SolePropBreakdown,
    TaxComparison, TaxProjection, TaxSavings,
};
pub use section::{
    NewTrifectaSection, SectionMetric, SectionPosition, SectionStatus, SectionUpdate,
    SubComponent, TrifectaSection, Trend,
};
pub use tax_bracket::{TaxBracket, TaxRateTable, TaxRateTableError};
pub use tax_rates::{TaxRates, TaxRatesError};
