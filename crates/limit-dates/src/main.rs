use std::env;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use limit_dates_core::{BatchConfig, FailurePolicy, Jurisdiction};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const DATA_DIR_ENV: &str = "LIMIT_DATES_DATA_DIR";

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Derive deduplicated permit limit dates from per-jurisdiction DMR exports",
    long_about = None
)]
struct Cli {
    /// TOML file setting data_dir, output_dir, jurisdictions and on_error
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Directory holding <jurisdiction>_dmrs.csv (overrides LIMIT_DATES_DATA_DIR)
    #[arg(long, value_name = "DIR")]
    data_dir: Option<PathBuf>,
    /// Directory for <jurisdiction>_limit_dates.csv (defaults to the data directory)
    #[arg(long, value_name = "DIR")]
    output_dir: Option<PathBuf>,
    /// Process only this jurisdiction; repeat to select several
    #[arg(long = "jurisdiction", value_name = "CODE")]
    jurisdictions: Vec<Jurisdiction>,
    /// Keep going after a jurisdiction fails and report failures at the end
    #[arg(long)]
    continue_on_error: bool,
    /// Print the jurisdictions that would be processed and exit
    #[arg(long)]
    list: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .json()
        .init();

    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let config = resolve_config(&cli, env::var(DATA_DIR_ENV).ok())?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if cli.list {
        for jurisdiction in &config.jurisdictions {
            writeln!(out, "{jurisdiction}")?;
        }
        return Ok(());
    }

    info!(
        data_dir = %config.data_dir.display(),
        output_dir = %config.output_dir.display(),
        jurisdictions = config.jurisdictions.len(),
        on_error = ?config.on_error,
        "Starting limit dates run"
    );

    let summary = limit_dates_core::run(&config, &mut out).context("limit dates run aborted")?;

    info!(
        completed = summary.completed.len(),
        failed = summary.failed.len(),
        output_rows = summary.total_output_rows(),
        "Limit dates run finished"
    );

    if !summary.is_success() {
        for failure in &summary.failed {
            error!(
                jurisdiction = %failure.jurisdiction,
                error = %failure.error,
                "Jurisdiction failed"
            );
        }
        let failed: Vec<&str> = summary
            .failed
            .iter()
            .map(|failure| failure.jurisdiction.as_str())
            .collect();
        bail!(
            "{} of {} jurisdictions failed: {}",
            failed.len(),
            config.jurisdictions.len(),
            failed.join(", ")
        );
    }

    Ok(())
}

/// Layers configuration: defaults, then the TOML file, then the environment,
/// then command-line flags.
fn resolve_config(cli: &Cli, env_data_dir: Option<String>) -> Result<BatchConfig> {
    let mut config = match &cli.config {
        Some(path) => BatchConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => BatchConfig::default(),
    };

    if let Some(data_dir) = env_data_dir.filter(|dir| !dir.trim().is_empty()) {
        config.set_data_dir(data_dir);
    }
    if let Some(data_dir) = &cli.data_dir {
        config.set_data_dir(data_dir.clone());
    }
    if let Some(output_dir) = &cli.output_dir {
        config.output_dir = output_dir.clone();
    }
    if !cli.jurisdictions.is_empty() {
        config.jurisdictions = cli.jurisdictions.clone();
    }
    if cli.continue_on_error {
        config.on_error = FailurePolicy::Continue;
    }

    Ok(config)
}
