use thiserror::Error;

pub type RfResult<T> = Result<T, RfError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RfError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Unknown node name: {name}")]
    UnknownNode { name: String },

    #[error("Unknown control mode: {name} (expected ON_OFF or VCC)")]
    UnknownControlMode { name: String },

    #[error("Self-coupling is not allowed for node {node}")]
    SelfCoupling { node: crate::NodeId },
}
