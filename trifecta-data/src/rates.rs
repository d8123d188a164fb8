use std::fs;
use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info};
use trifecta_core::{TaxRates, TaxRatesError};

use crate::loader::{TaxBracketLoader, TaxBracketLoaderError};

#[derive(Debug, Error)]
pub enum RatesFileError {
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Bracket file {path}: {source}")]
    Brackets {
        path: String,
        #[source]
        source: TaxBracketLoaderError,
    },

    #[error("Invalid rates: {0}")]
    Invalid(#[from] TaxRatesError),
}

/// Overrides for [`TaxRates`] read from a TOML file.
///
/// Every key is optional; missing keys keep the 2023 defaults.
/// `brackets_csv` replaces both federal schedules and `s_corp_brackets_csv`
/// replaces only the S-Corp one. Relative paths resolve against the
/// directory of the TOML file.
///
/// ```toml
/// tax_year = 2024
/// state_tax_rate = "0.05"
/// brackets_csv = "federal_2024.csv"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RatesFile {
    pub tax_year: Option<i32>,
    pub brackets_csv: Option<PathBuf>,
    pub s_corp_brackets_csv: Option<PathBuf>,
    pub state_tax_rate: Option<Decimal>,
    pub self_employment_tax_rate: Option<Decimal>,
    pub se_net_earnings_factor: Option<Decimal>,
    pub payroll_tax_rate: Option<Decimal>,
    pub s_corp_salary_ratio: Option<Decimal>,
    pub break_even_savings: Option<Decimal>,
    pub quarterly_estimate_threshold: Option<Decimal>,
    pub high_profit_threshold: Option<Decimal>,
    pub s_corp_consideration_threshold: Option<Decimal>,
}

impl RatesFile {
    pub fn parse(toml_str: &str) -> Result<Self, RatesFileError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Apply the overrides on top of `base` and validate the result.
    ///
    /// `base_dir` anchors relative bracket paths.
    pub fn apply(
        self,
        mut base: TaxRates,
        base_dir: &Path,
    ) -> Result<TaxRates, RatesFileError> {
        if let Some(csv) = &self.brackets_csv {
            let table = load_brackets(&base_dir.join(csv))?;
            base.sole_prop_brackets = table.clone();
            base.s_corp_brackets = table;
        }
        if let Some(csv) = &self.s_corp_brackets_csv {
            base.s_corp_brackets = load_brackets(&base_dir.join(csv))?;
        }

        if let Some(year) = self.tax_year {
            base.tax_year = year;
        }
        override_field(&mut base.state_tax_rate, self.state_tax_rate);
        override_field(&mut base.self_employment_tax_rate, self.self_employment_tax_rate);
        override_field(&mut base.se_net_earnings_factor, self.se_net_earnings_factor);
        override_field(&mut base.payroll_tax_rate, self.payroll_tax_rate);
        override_field(&mut base.s_corp_salary_ratio, self.s_corp_salary_ratio);
        override_field(&mut base.break_even_savings, self.break_even_savings);
        override_field(
            &mut base.quarterly_estimate_threshold,
            self.quarterly_estimate_threshold,
        );
        override_field(&mut base.high_profit_threshold, self.high_profit_threshold);
        override_field(
            &mut base.s_corp_consideration_threshold,
            self.s_corp_consideration_threshold,
        );

        base.validate()?;
        debug!(tax_year = base.tax_year, "applied rate overrides");
        Ok(base)
    }
}

fn override_field(
    field: &mut Decimal,
    value: Option<Decimal>,
) {
    if let Some(value) = value {
        *field = value;
    }
}

fn load_brackets(path: &Path) -> Result<trifecta_core::TaxRateTable, RatesFileError> {
    TaxBracketLoader::load_from_path(path).map_err(|source| RatesFileError::Brackets {
        path: path.display().to_string(),
        source,
    })
}

/// Read a rates TOML file and apply it over the 2023 defaults.
pub fn load_rates(path: &Path) -> Result<TaxRates, RatesFileError> {
    let contents = fs::read_to_string(path).map_err(|source| RatesFileError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let base_dir = path.parent().unwrap_or_else(|| Path::new("."));

    let rates = RatesFile::parse(&contents)?.apply(TaxRates::tax_year_2023(), base_dir)?;
    info!(path = %path.display(), tax_year = rates.tax_year, "loaded tax rates");
    Ok(rates)
}
