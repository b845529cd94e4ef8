use std::io;

use anyhow::Context;
use clap::Parser;
use tracing::debug;

use netto_cli::config::AppConfig;
use netto_cli::{Cli, Settings, app, logging};

// ─── entry point ─────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load(cli.global.config.as_deref()).context("Failed to load config")?;
    let settings = Settings::resolve(&cli.global, config).context("Invalid configuration")?;

    logging::init(settings.log_level.as_deref(), settings.log_file.as_deref())?;
    debug!(
        backend = %settings.store.backend,
        language = ?settings.language,
        "starting"
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();
    app::run(cli.command, settings, &mut out).await
}
