pub mod batch;
pub mod loader;

pub use batch::{BatchRow, estimate_scenarios, write_results};
pub use loader::{ScenarioLoadError, ScenarioLoader, ScenarioRecord};
