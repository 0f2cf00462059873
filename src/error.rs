use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SignalError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Shape mismatch: reference has {reference} samples, degraded has {degraded}")]
    ShapeMismatch { reference: usize, degraded: usize },

    #[error("Insufficient data: need {needed} samples, have {available}")]
    InsufficientData { needed: usize, available: usize },

    #[error("Non-finite sample at index {index}")]
    NonFiniteSample { index: usize },
}

pub type Result<T> = std::result::Result<T, SignalError>;
