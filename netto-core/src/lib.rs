pub mod calculations;
pub mod document;
pub mod models;
pub mod parse;
pub mod store;

pub use calculations::{Estimator, EstimatorFeatures, estimate};
pub use document::{DocumentError, DocumentMeta, PersistedDocument};
pub use models::*;
pub use store::{KeyValueStore, StoreError};
