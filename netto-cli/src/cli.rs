use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};
use netto_core::parse::coerce_decimal;
use netto_core::{EstimateInput, FederalState, HealthType, TaxClass};

use crate::i18n::Language;

// ─── CLI definition ──────────────────────────────────────────────────────────

/// German net salary estimator.
///
/// Keeps one saved salary record, estimates social contributions, income
/// tax, solidarity surcharge and church tax for it, and prints a breakdown
/// or a printable report.
#[derive(Debug, Parser)]
#[command(name = "netto", version)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Default, Args)]
pub struct GlobalArgs {
    /// Configuration file (TOML). Defaults to `netto.toml` if present.
    #[arg(long, global = true, env = "NETTO_CONFIG")]
    pub config: Option<PathBuf>,

    /// Store backend (`sqlite` or `memory`).
    #[arg(long, global = true)]
    pub backend: Option<String>,

    /// Store connection string.
    /// For SQLite this is a file path (e.g. `netto.db`) or `:memory:`.
    #[arg(long, global = true)]
    pub store: Option<String>,

    /// Log filter, e.g. `debug` or `netto_core=trace`.
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Append logs to this file.
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// Output language.
    #[arg(long, global = true, value_enum)]
    pub lang: Option<Language>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// One-off estimate from defaults plus the given values; nothing is saved.
    Estimate {
        #[command(flatten)]
        input: InputArgs,

        /// Print input and result as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Change fields of the saved input and save it.
    Set(InputArgs),

    /// Show the breakdown for the saved input.
    Show {
        /// Print input and result as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Print the report sheet for the saved input.
    Report {
        /// Write the report to a file instead of stdout.
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Export the saved input as a JSON document.
    Export {
        /// Target file. Defaults to `toolstack-nettoit-v1-<date>.json`.
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Import a JSON document (exported or bare record) and save it.
    Import {
        file: PathBuf,
    },

    /// Delete the saved input and restore the defaults.
    Reset,
}

/// Field values as typed by the user. Anything left out keeps its current
/// value.
#[derive(Debug, Clone, Default, Args)]
pub struct InputArgs {
    /// Monthly gross salary in euros (`3700` or `3700,50`).
    #[arg(long)]
    pub gross: Option<String>,

    /// Tax class I to VI.
    #[arg(long)]
    pub tax_class: Option<String>,

    /// Children allowance count (0, 0.5, 1, 1.5, ...).
    #[arg(long)]
    pub children: Option<String>,

    /// Two-letter federal state code, e.g. `BY` or `NW`.
    #[arg(long)]
    pub state: Option<String>,

    /// `public` or `private`.
    #[arg(long)]
    pub health: Option<String>,

    /// Monthly private health premium in euros.
    #[arg(long)]
    pub pkv_premium: Option<String>,

    /// Church member (`true` or `false`).
    #[arg(long, action = ArgAction::Set)]
    pub church_tax: Option<bool>,
}

impl InputArgs {
    /// Merges the given values into `input`, coercing the way the input form
    /// does: unparseable amounts become 0, unknown codes the defaults.
    pub fn apply(
        &self,
        input: &mut EstimateInput,
    ) {
        if let Some(gross) = &self.gross {
            input.gross_monthly = coerce_decimal(gross);
        }
        if let Some(tax_class) = &self.tax_class {
            input.tax_class = TaxClass::parse_or_default(tax_class);
        }
        if let Some(children) = &self.children {
            input.child_allowance = coerce_decimal(children);
        }
        if let Some(state) = &self.state {
            input.state = FederalState::parse_or_default(state);
        }
        if let Some(health) = &self.health {
            input.health_type = HealthType::parse_or_default(health);
        }
        if let Some(premium) = &self.pkv_premium {
            input.pkv_premium_monthly = coerce_decimal(premium);
        }
        if let Some(church_tax) = self.church_tax {
            input.church_tax = church_tax;
        }
    }
}
