/// Error types for the picker core
use thiserror::Error;

/// Errors raised while turning loose input (strings, script rows, config
/// documents) into picker types. The state machine itself never fails.
#[derive(Error, Debug)]
pub enum PickerError {
    /// A date-time string did not match any accepted layout
    #[error("Invalid instant: {0}")]
    InvalidInstant(String),

    /// Side name other than "from" or "to"
    #[error("Unknown side: {0}")]
    UnknownSide(String),

    /// Detail name other than "hour", "minute" or "second"
    #[error("Unknown detail: {0}")]
    UnknownDetail(String),

    /// A range value with more than two comma separated parts
    #[error("Too many range parts (expected at most 2, found {0})")]
    TooManyParts(usize),

    /// Failed to parse a JSON document
    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Type alias for Results using PickerError
pub type Result<T> = std::result::Result<T, PickerError>;
