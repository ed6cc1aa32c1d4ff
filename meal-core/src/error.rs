use thiserror::Error;

use crate::source::SourceError;

/// Errors surfaced by [`WizardController`](crate::wizard::WizardController).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WizardError {
    /// A field failed the strict validation policy.
    #[error("invalid {field}: {reason}")]
    InvalidInput { field: &'static str, reason: String },

    /// The recommendation source reported an error.
    #[error("recommendation fetch failed: {0}")]
    FetchFailed(#[from] SourceError),

    /// A fetch result arrived for a submission that was cancelled.
    #[error("discarded result of cancelled submission #{generation}")]
    NavigationRace { generation: u64 },
}
