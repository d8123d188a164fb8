use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;
use serde_json::json;
use tracing::{debug, info};

use trifecta_core::calculations::TaxAdvisor;
use trifecta_core::db::{RepositoryRegistry, StoreConfig};
use trifecta_core::{BusinessGoal, ProfitRange, SectionRepository, TaxComparator, TaxRates};
use trifecta_data::load_rates;
use trifecta_store::MemoryRepositoryFactory;

use crate::report;
use crate::utils::{parse_money, parse_profit_range};

/// Compare sole proprietorship and S-Corporation taxes for a business profit.
#[derive(Debug, Parser)]
#[command(name = "trifecta", version, about, long_about = None)]
pub struct Cli {
    /// TOML file overriding the built-in 2023 rates.
    #[arg(long, global = true)]
    pub rates: Option<PathBuf>,

    /// Section store backend.
    #[arg(long, global = true, default_value = "memory")]
    pub store: String,

    /// Section store connection string (`:memory:`, `seed` or a JSON path).
    #[arg(long, global = true, default_value = "seed")]
    pub store_conn: String,

    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Log filter, e.g. `debug` or `info,trifecta_core=trace`.
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Append log records to this file.
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// Hide log output on stderr.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Side-by-side tax breakdown for one profit, with alerts.
    Compare {
        #[arg(long, value_parser = parse_money, allow_hyphen_values = true)]
        profit: Decimal,
    },
    /// How much more an S-Corp saves at a target profit.
    Savings {
        #[arg(long, value_parser = parse_money, allow_hyphen_values = true)]
        current: Decimal,
        #[arg(long, value_parser = parse_money, allow_hyphen_values = true)]
        target: Decimal,
    },
    /// Tax totals across a range of profits.
    Project {
        /// START..END:STEP, defaults to 50,000..500,000:10,000.
        #[arg(long, value_parser = parse_profit_range)]
        range: Option<ProfitRange>,
    },
    /// Recommend a business structure.
    Recommend {
        #[arg(long, value_parser = parse_money, allow_hyphen_values = true)]
        profit: Decimal,
        /// growth or simplicity; may be repeated.
        #[arg(long = "goal", value_parser = parse_goal)]
        goals: Vec<BusinessGoal>,
    },
    /// Advice when profit moves across a planning threshold.
    Guidance {
        #[arg(long, value_parser = parse_money, allow_hyphen_values = true)]
        from: Decimal,
        #[arg(long, value_parser = parse_money, allow_hyphen_values = true)]
        to: Decimal,
    },
    /// Browse the Trifecta sections.
    Sections {
        #[command(subcommand)]
        command: SectionsCommand,
    },
}

#[derive(Debug, Subcommand)]
pub enum SectionsCommand {
    List,
    Show { id: i64 },
    /// Delete a section and print what remains.
    Delete { id: i64 },
}

fn parse_goal(s: &str) -> Result<BusinessGoal, String> {
    BusinessGoal::parse(s).ok_or_else(|| format!("unknown goal '{s}', expected growth or simplicity"))
}

/// Registry with every section store backend this binary ships.
pub fn build_registry() -> RepositoryRegistry {
    RepositoryRegistry::new().with_factory(Box::new(MemoryRepositoryFactory))
}

/// Rates from `path`, or the built-in 2023 rates when no file is given.
pub fn resolve_rates(path: Option<&Path>) -> Result<TaxRates> {
    match path {
        Some(path) => load_rates(path)
            .with_context(|| format!("Failed to load rates from {}", path.display())),
        None => Ok(TaxRates::tax_year_2023()),
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String> {
    let mut rendered = serde_json::to_string_pretty(value).context("Failed to render JSON")?;
    rendered.push('\n');
    Ok(rendered)
}

/// Runs a calculation command and returns the rendered output.
///
/// `Sections` commands need a store; see [`run_sections`].
pub fn run_calculation(
    rates: &TaxRates,
    command: &Command,
    format: OutputFormat,
) -> Result<String> {
    let comparator = TaxComparator::new(rates);
    let advisor = TaxAdvisor::new(rates);

    match command {
        Command::Compare { profit } => {
            let comparison = comparator.compare(*profit);
            let alerts = advisor.alerts(&comparison);
            match format {
                OutputFormat::Text => Ok(report::render_comparison(&comparison, &alerts)),
                OutputFormat::Json => to_json(&json!({
                    "comparison": comparison,
                    "alerts": alerts,
                })),
            }
        }
        Command::Savings { current, target } => {
            let delta = comparator.calculate_tax_savings(*current, *target);
            match format {
                OutputFormat::Text => Ok(report::render_savings_delta(&delta)),
                OutputFormat::Json => to_json(&delta),
            }
        }
        Command::Project { range } => {
            let range = range.unwrap_or_default();
            let rows = comparator.project(&range.profits());
            debug!(rows = rows.len(), "projected taxes");
            match format {
                OutputFormat::Text => Ok(report::render_projection(&rows)),
                OutputFormat::Json => to_json(&rows),
            }
        }
        Command::Recommend { profit, goals } => {
            let rec = advisor.recommend(*profit, goals);
            match format {
                OutputFormat::Text => Ok(report::render_recommendation(&rec, goals)),
                OutputFormat::Json => to_json(&rec),
            }
        }
        Command::Guidance { from, to } => {
            let guidance = advisor.profit_change_guidance(*from, *to);
            match format {
                OutputFormat::Text => Ok(report::render_guidance(guidance.as_ref())),
                OutputFormat::Json => to_json(&guidance),
            }
        }
        Command::Sections { .. } => {
            anyhow::bail!("section commands need a store; use run_sections")
        }
    }
}

pub async fn run_sections(
    repo: &dyn SectionRepository,
    command: &SectionsCommand,
    format: OutputFormat,
) -> Result<String> {
    match command {
        SectionsCommand::List => {
            let sections = repo.list_sections().await?;
            match format {
                OutputFormat::Text => Ok(report::render_section_list(&sections)),
                OutputFormat::Json => to_json(&sections),
            }
        }
        SectionsCommand::Show { id } => {
            let section = repo.get_section(*id).await?;
            match format {
                OutputFormat::Text => Ok(report::render_section(&section)),
                OutputFormat::Json => to_json(&section),
            }
        }
        SectionsCommand::Delete { id } => {
            let removed = repo.delete_section(*id).await?;
            let remaining = repo.list_sections().await?;
            match format {
                OutputFormat::Text => Ok(format!(
                    "Deleted #{} {}\n{}",
                    removed.id,
                    removed.name,
                    report::render_section_list(&remaining)
                )),
                OutputFormat::Json => to_json(&json!({
                    "deleted": removed,
                    "remaining": remaining,
                })),
            }
        }
    }
}

/// Executes a parsed command line and returns what should be printed.
pub async fn run(cli: &Cli) -> Result<String> {
    if let Command::Sections { command } = &cli.command {
        let config = StoreConfig::new(cli.store.as_str(), cli.store_conn.as_str());
        let repo = build_registry()
            .open(&config)
            .await
            .with_context(|| format!("Failed to open {} store", config.backend))?;
        return run_sections(repo.as_ref(), command, cli.format).await;
    }

    let rates = resolve_rates(cli.rates.as_deref())?;
    info!(tax_year = rates.tax_year, "using tax rates");
    run_calculation(&rates, &cli.command, cli.format)
}
