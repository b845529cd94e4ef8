pub mod app;
pub mod cli;
pub mod config;
pub mod i18n;
pub mod logging;
pub mod report;
pub mod state;
pub mod utils;

pub use app::{App, Settings, build_registry, run};
pub use cli::{Cli, Command, GlobalArgs, InputArgs};
pub use i18n::Language;
