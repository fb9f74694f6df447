//! Error types for compressor parameter handling.

use rf_core::RfError;
use thiserror::Error;

/// Errors raised while validating a compressor record.
///
/// Evaluation itself is total and never fails.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompressorError {
    #[error("Invalid compressor parameter {field}: {what}")]
    InvalidParameter {
        field: &'static str,
        what: &'static str,
    },

    #[error(transparent)]
    Core(#[from] RfError),
}

pub type CompressorResult<T> = Result<T, CompressorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = CompressorError::InvalidParameter {
            field: "max_speed_rpm",
            what: "must exceed min_speed_rpm",
        };
        assert!(err.to_string().contains("max_speed_rpm"));
    }
}
