use std::io::Write;

use anyhow::Context;
use clap::Parser;
use tracing::debug;

use trifecta_cli::app::{self, Cli};
use trifecta_cli::logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init_logging();

    let cli = Cli::parse();

    if let Some(level) = &cli.log_level {
        logging::set_log_level(level)?;
    }
    if let Some(path) = &cli.log_file {
        logging::enable_file_logging(path)?;
    }
    if cli.quiet {
        logging::set_console_enabled(false)?;
    }
    debug!(command = ?cli.command, "starting");

    let output = app::run(&cli).await?;

    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(output.as_bytes())
        .context("Failed to write output")?;
    Ok(())
}
