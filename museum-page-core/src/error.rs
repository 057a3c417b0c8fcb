//! Unified error type definition

use serde::Serialize;
use thiserror::Error;

/// Core layer error type
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum CoreError {
    /// A page element the behavior depends on is missing
    #[error("Element not found: {0}")]
    ElementNotFound(String),

    /// The form has no field with this id
    #[error("Field not found: {0}")]
    FieldNotFound(String),

    /// A form submission is already in flight
    #[error("Submission already in progress for form: {0}")]
    SubmissionInProgress(String),

    /// The submission gateway rejected or failed to deliver the data
    #[error("Submission failed: {0}")]
    SubmissionFailed(String),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Validation error
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// serialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// The page adapter failed to perform an operation
    #[error("Page error: {0}")]
    PageError(String),
}

impl CoreError {
    /// Whether it is expected behavior (user input, element absent from this page, etc.), used
    /// for log classification.
    ///
    /// Level `warn` should be used when returning `true` and level `error` when returning `false`.
    /// **Please update this method simultaneously when new variants are added. **
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::ElementNotFound(_)
            | Self::FieldNotFound(_)
            | Self::SubmissionInProgress(_)
            | Self::ValidationError(_) => true,
            Self::SubmissionFailed(_)
            | Self::ConfigError(_)
            | Self::SerializationError(_)
            | Self::PageError(_) => false,
        }
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        Self::SerializationError(e.to_string())
    }
}

/// Core layer Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;
