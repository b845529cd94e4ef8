pub mod common;
pub mod estimator;
pub mod income_tax;
pub mod social;

pub use estimator::{Estimator, EstimatorFeatures, estimate};
pub use income_tax::IncomeTaxWorksheet;
pub use social::SocialContributionWorksheet;
