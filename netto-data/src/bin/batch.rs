use std::fs::File;
use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use netto_core::{Estimator, EstimatorFeatures, RateTable};
use netto_data::{ScenarioLoader, estimate_scenarios, write_results};
use tracing_subscriber::EnvFilter;

/// Estimate net salaries for every scenario in a CSV file.
///
/// The CSV file should have the following columns:
/// - gross_monthly: monthly gross pay (quote values that use a decimal comma)
/// - tax_class: I, II, III, IV, V or VI
/// - church_tax: true/false
/// - child_allowance: children allowance count, fractions allowed
/// - state: two-letter federal state code (optional, default BY)
/// - health_type: public or private (optional, default public)
/// - pkv_premium_monthly: private health premium (optional, default 0)
#[derive(Parser, Debug)]
#[command(name = "netto-batch")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the CSV file containing scenarios
    #[arg(short, long)]
    file: PathBuf,

    /// Write results to this file instead of stdout
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// Leave private health premiums out of the net figures
    #[arg(long, default_value_t = false)]
    exclude_private_premium: bool,
}

/// Honours `RUST_LOG`, otherwise only warnings. Logs go to stderr so the
/// CSV on stdout stays clean.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::from("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .without_time()
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    init_tracing();

    let args = Args::parse();

    eprintln!("Loading scenarios from: {}", args.file.display());

    let file = File::open(&args.file)
        .with_context(|| format!("Failed to open: {}", args.file.display()))?;

    let inputs = ScenarioLoader::parse(file)
        .with_context(|| format!("Failed to parse CSV: {}", args.file.display()))?;

    eprintln!("Parsed {} scenarios", inputs.len());

    let rates = RateTable::year_2026();
    let features = EstimatorFeatures {
        private_premium: !args.exclude_private_premium,
    };
    let rows = estimate_scenarios(&inputs, &Estimator::with_features(&rates, features));

    match &args.out {
        Some(path) => {
            let out = File::create(path)
                .with_context(|| format!("Failed to create: {}", path.display()))?;
            write_results(out, &rows).context("Failed to write results")?;
            eprintln!("Wrote {} results to {}", rows.len(), path.display());
        }
        None => write_results(io::stdout().lock(), &rows).context("Failed to write results")?,
    }

    Ok(())
}
