//! Error handling for the resume critiquer

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CritiqueError {
    #[error("Please upload a resume file first")]
    NoFileProvided,

    #[error("Please wait {remaining_secs} more second(s) before analyzing again")]
    TooSoon { remaining_secs: u64 },

    #[error("Unreadable document: {0}")]
    UnreadableDocument(String),

    #[error("Feedback provider unavailable: {0}")]
    ProviderUnavailable(String),

    #[error("Feedback provider error: {0}")]
    ProviderError(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CritiqueError>;

impl CritiqueError {
    /// Short label used when rendering a failed trigger
    pub fn kind(&self) -> &'static str {
        match self {
            CritiqueError::NoFileProvided => "no-file",
            CritiqueError::TooSoon { .. } => "too-soon",
            CritiqueError::UnreadableDocument(_) => "unreadable-document",
            CritiqueError::ProviderUnavailable(_) => "provider-unavailable",
            CritiqueError::ProviderError(_) => "provider-error",
            CritiqueError::Unexpected(_) => "unexpected",
            CritiqueError::Io(_) => "io",
            CritiqueError::Configuration(_) => "configuration",
            CritiqueError::UnsupportedFormat(_) => "unsupported-format",
            CritiqueError::Serialization(_) => "serialization",
        }
    }

    /// Rejections are expected outcomes of the gate, not failures
    pub fn is_rejection(&self) -> bool {
        matches!(self, CritiqueError::TooSoon { .. } | CritiqueError::NoFileProvided)
    }
}

/// Convert anyhow errors to our custom error type
impl From<anyhow::Error> for CritiqueError {
    fn from(err: anyhow::Error) -> Self {
        CritiqueError::Unexpected(err.to_string())
    }
}

impl From<reqwest::Error> for CritiqueError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            CritiqueError::ProviderError(format!("request timed out: {}", err))
        } else {
            CritiqueError::ProviderError(err.to_string())
        }
    }
}
