//! Error types for simulation operations.

use rf_controls::ControlError;
use rf_project::{ProjectError, ValidationError};
use thiserror::Error;

/// Errors encountered while building or stepping a simulation.
#[derive(Error, Debug)]
pub enum SimError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    /// Unknown appliance or compressor key, or an invalid record.
    #[error("Configuration error: {0}")]
    Config(#[from] ProjectError),

    /// Unknown control mode or invalid controller settings.
    #[error("Control error: {0}")]
    Control(#[from] ControlError),

    #[error("Backend error: {message}")]
    Backend { message: String },
}

pub type SimResult<T> = Result<T, SimError>;

impl From<ValidationError> for SimError {
    fn from(e: ValidationError) -> Self {
        SimError::Config(ProjectError::Validation(e))
    }
}

impl From<rf_network::NetworkError> for SimError {
    fn from(e: rf_network::NetworkError) -> Self {
        SimError::Backend {
            message: e.to_string(),
        }
    }
}
