//! Error types for control system construction.

use thiserror::Error;

/// Result type for control system operations.
pub type ControlResult<T> = Result<T, ControlError>;

/// Errors that can occur while building a controller.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ControlError {
    /// Invalid argument provided to a control function.
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    /// Control-mode selector is neither `ON_OFF` nor `VCC`.
    #[error("Unknown control mode: {name}")]
    UnknownMode { name: String },
}
