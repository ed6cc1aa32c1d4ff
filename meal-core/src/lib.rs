pub mod error;
pub mod models;
pub mod source;
pub mod validation;
pub mod wizard;

pub use error::WizardError;
pub use models::*;
pub use source::{RecommendationSource, SourceConfig, SourceError, SourceRegistry};
pub use validation::ValidationPolicy;
pub use wizard::{Transition, WizardController, WizardSettings, WizardState};
