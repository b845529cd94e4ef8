//! Command execution against the saved record.

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{Local, Utc};
use netto_core::document::export_file_name;
use netto_core::store::{MemoryStoreFactory, StoreConfig, StoreRegistry};
use netto_core::{EstimateInput, EstimateResult, Estimator, EstimatorFeatures, RateTable};
use netto_store_sqlite::SqliteStoreFactory;
use serde::Serialize;
use tracing::{debug, info};

use crate::cli::{Command, GlobalArgs, InputArgs};
use crate::config::{AppConfig, ConfigError};
use crate::i18n::Language;
use crate::report::{render_breakdown, render_report};
use crate::state::AppState;

const DEFAULT_BACKEND: &str = "sqlite";
const DEFAULT_SQLITE_FILE: &str = "netto.db";

/// Registry with every backend this binary ships.
pub fn build_registry() -> StoreRegistry {
    let mut registry = StoreRegistry::new();
    registry.register(Box::new(MemoryStoreFactory));
    registry.register(Box::new(SqliteStoreFactory));
    registry
}

/// Effective settings after merging config file and command line.
#[derive(Debug, Clone)]
pub struct Settings {
    pub store: StoreConfig,
    pub log_level: Option<String>,
    pub log_file: Option<PathBuf>,
    pub language: Language,
    pub features: EstimatorFeatures,
    pub rates: RateTable,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            store: StoreConfig {
                backend: DEFAULT_BACKEND.to_string(),
                connection_string: DEFAULT_SQLITE_FILE.to_string(),
            },
            log_level: None,
            log_file: None,
            language: Language::default(),
            features: EstimatorFeatures::default(),
            rates: RateTable::year_2026(),
        }
    }
}

impl Settings {
    /// Command-line values win over the config file, the config file over
    /// the built-in defaults.
    pub fn resolve(
        args: &GlobalArgs,
        config: AppConfig,
    ) -> Result<Self, ConfigError> {
        let rates = config.rate_table()?;

        let backend = args
            .backend
            .clone()
            .or(config.store.backend)
            .unwrap_or_else(|| DEFAULT_BACKEND.to_string());
        let connection_string = args
            .store
            .clone()
            .or(config.store.connection_string)
            .unwrap_or_else(|| {
                if backend == DEFAULT_BACKEND {
                    DEFAULT_SQLITE_FILE.to_string()
                } else {
                    String::new()
                }
            });

        Ok(Self {
            store: StoreConfig {
                backend,
                connection_string,
            },
            log_level: args.log_level.clone().or(config.logging.level),
            log_file: args.log_file.clone().or(config.logging.file),
            language: args.lang.or(config.report.language).unwrap_or_default(),
            features: EstimatorFeatures::from(&config.features),
            rates,
        })
    }

    fn estimator(&self) -> Estimator<'_> {
        Estimator::with_features(&self.rates, self.features)
    }
}

/// Machine-readable output of `show --json` and `estimate --json`.
#[derive(Serialize)]
struct Snapshot<'a> {
    input: &'a EstimateInput,
    result: &'a EstimateResult,
}

fn write_json(
    out: &mut dyn Write,
    input: &EstimateInput,
    result: &EstimateResult,
) -> Result<()> {
    let json = serde_json::to_string_pretty(&Snapshot { input, result })
        .context("Failed to serialize estimate")?;
    writeln!(out, "{json}")?;
    Ok(())
}

/// One-off estimate from the defaults plus `args`. Opens no store.
fn estimate_once(
    settings: &Settings,
    args: &InputArgs,
    json: bool,
    out: &mut dyn Write,
) -> Result<()> {
    let mut input = EstimateInput::default();
    args.apply(&mut input);
    let result = settings.estimator().calculate(&input);

    if json {
        write_json(out, &input, &result)
    } else {
        write!(out, "{}", render_breakdown(&result, settings.language))?;
        Ok(())
    }
}

pub struct App {
    settings: Settings,
    state: AppState,
}

impl App {
    /// Opens the configured store and loads the saved record.
    pub async fn open(
        settings: Settings,
        registry: &StoreRegistry,
    ) -> Result<Self> {
        debug!("connecting to {} backend", settings.store.backend);
        let store = registry
            .create(&settings.store)
            .await
            .with_context(|| format!("Failed to open {} store", settings.store.backend))?;
        let state = AppState::load(store).await.context("Failed to load saved input")?;
        Ok(Self::with_state(settings, state))
    }

    pub fn with_state(
        settings: Settings,
        state: AppState,
    ) -> Self {
        Self { settings, state }
    }

    pub fn input(&self) -> &EstimateInput {
        self.state.input()
    }

    fn result(&self) -> EstimateResult {
        self.settings.estimator().calculate(self.state.input())
    }

    pub async fn execute(
        &mut self,
        command: Command,
        out: &mut dyn Write,
    ) -> Result<()> {
        let lang = self.settings.language;
        let labels = lang.labels();

        match command {
            Command::Estimate { input, json } => estimate_once(&self.settings, &input, json, out),

            Command::Set(args) => {
                let mut input = self.state.input().clone();
                args.apply(&mut input);
                self.state
                    .update(input, Utc::now())
                    .await
                    .context("Failed to save input")?;
                writeln!(out, "{}.", labels.saved)?;
                writeln!(out)?;
                write!(out, "{}", render_breakdown(&self.result(), lang))?;
                Ok(())
            }

            Command::Show { json } => {
                let result = self.result();
                if json {
                    write_json(out, self.state.input(), &result)
                } else {
                    write!(out, "{}", render_breakdown(&result, lang))?;
                    Ok(())
                }
            }

            Command::Report { out: path } => {
                let report = render_report(
                    self.state.input(),
                    &self.result(),
                    &self.settings.rates,
                    self.settings.features,
                    lang,
                    Local::now(),
                );
                match path {
                    Some(path) => {
                        fs::write(&path, report)
                            .with_context(|| format!("Failed to write {}", path.display()))?;
                        writeln!(out, "{} {}", labels.report_written_to, path.display())?;
                    }
                    None => write!(out, "{report}")?,
                }
                Ok(())
            }

            Command::Export { out: path } => {
                let path =
                    path.unwrap_or_else(|| PathBuf::from(export_file_name(Local::now().date_naive())));
                let json = self
                    .state
                    .export(Utc::now())
                    .context("Failed to build export")?;
                fs::write(&path, json)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                info!(path = %path.display(), "exported");
                writeln!(out, "{} {}", labels.exported_to, path.display())?;
                Ok(())
            }

            Command::Import { file } => {
                let text = fs::read_to_string(&file)
                    .with_context(|| format!("Failed to read {}", file.display()))?;
                self.state.import(&text, Utc::now()).await?;
                writeln!(out, "{} {}", labels.imported_from, file.display())?;
                writeln!(out)?;
                write!(out, "{}", render_breakdown(&self.result(), lang))?;
                Ok(())
            }

            Command::Reset => {
                self.state.reset().await.context("Failed to reset saved input")?;
                writeln!(out, "{}", labels.reset_done)?;
                Ok(())
            }
        }
    }
}

/// Runs one command. `estimate` never touches the store.
pub async fn run(
    command: Command,
    settings: Settings,
    out: &mut dyn Write,
) -> Result<()> {
    if let Command::Estimate { input, json } = &command {
        return estimate_once(&settings, input, *json, out);
    }

    let registry = build_registry();
    let mut app = App::open(settings, &registry).await?;
    app.execute(command, out).await
}
