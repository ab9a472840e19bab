use thiserror::Error;

/// The public error surface of `analyze`. Every variant is a
/// precondition or resource failure — the pipeline stages themselves
/// never fail once past this boundary, they only emit warnings.
#[derive(Debug, Error)]
pub enum PlagCheckError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("unsupported language '{0}' (expected java, python, or c)")]
    UnsupportedLanguage(String),

    #[error("at least two files are required, got {0}")]
    InsufficientInput(usize),

    #[error("analysis cancelled")]
    Cancelled,

    #[error("internal invariant violated: {0}")]
    InternalInvariantViolation(String),
}
