use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use trifecta_data::{SectionSeedLoader, TaxBracketLoader, load_rates};

/// Check data files before handing them to the comparator.
#[derive(Parser, Debug)]
#[command(name = "trifecta-data-loader")]
#[command(version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate a bracket CSV (columns: min_income, max_income, rate)
    Brackets {
        #[arg(short, long)]
        file: PathBuf,
    },
    /// Validate a rates TOML file and print the resulting rates
    Rates {
        #[arg(short, long)]
        file: PathBuf,
    },
    /// Validate a section seed JSON file
    Sections {
        #[arg(short, long)]
        file: PathBuf,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    match args.command {
        Command::Brackets { file } => {
            println!("Loading tax brackets from: {}", file.display());
            let table = TaxBracketLoader::load_from_path(&file)
                .with_context(|| format!("Failed to load brackets: {}", file.display()))?;
            for bracket in table.brackets() {
                let max = bracket
                    .max_income
                    .map(|max| max.to_string())
                    .unwrap_or_else(|| "-".to_string());
                println!("{:>12} {:>12} {:>6}", bracket.min_income, max, bracket.rate);
            }
            println!("Valid schedule with {} brackets.", table.len());
        }
        Command::Rates { file } => {
            let rates = load_rates(&file)
                .with_context(|| format!("Failed to load rates: {}", file.display()))?;
            let rendered =
                serde_json::to_string_pretty(&rates).context("Failed to render rates")?;
            println!("{rendered}");
        }
        Command::Sections { file } => {
            let sections = SectionSeedLoader::parse_path(&file)
                .with_context(|| format!("Failed to load sections: {}", file.display()))?;
            for section in &sections {
                println!(
                    "{:>3} {:<12} {:<10} {:?}",
                    section.id,
                    section.name,
                    section.position.as_str(),
                    section.status
                );
            }
            println!("Parsed {} sections.", sections.len());
        }
    }

    Ok(())
}
