mod estimate_input;
mod estimate_result;
mod federal_state;
mod health_type;
mod rate_table;
mod tax_class;

pub use estimate_input::EstimateInput;
pub use estimate_result::{EstimateResult, SocialContributions, SocialNote, TaxBreakdown};
pub use federal_state::FederalState;
pub use health_type::HealthType;
pub use rate_table::{IncomeTaxTariff, RateTable, RateTableError};
pub use tax_class::TaxClass;
