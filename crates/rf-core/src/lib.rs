//! rf-core: shared foundation for the refrigeration simulator.
//!
//! Contains:
//! - ids (node identifiers, compartments, canonical coupling keys)
//! - mode (control strategy selector)
//! - numeric (tolerances + float helpers)
//! - units (uom SI types + constructors used at API boundaries)
//! - error (shared error types)

pub mod error;
pub mod ids;
pub mod mode;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{RfError, RfResult};
pub use ids::*;
pub use mode::ControlMode;
pub use numeric::*;
