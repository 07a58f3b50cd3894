use thiserror::Error;

/// Errors reported by classifiers and dataset utilities.
#[derive(Debug, Error, PartialEq)]
pub enum ModelError {
    #[error("Training set is empty.")]
    EmptyDataset,

    #[error("Dataset must have at least two attributes, got {0}.")]
    TooFewAttributes(usize),

    #[error("Class attribute '{0}' must be nominal.")]
    UnsupportedClassAttribute(String),

    #[error("Instance has {found} values, expected {expected}.")]
    MalformedInstance { expected: usize, found: usize },

    #[error("Model wasn't fitted yet.")]
    NotFitted,

    #[error("Operation was cancelled.")]
    Cancelled,

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}
