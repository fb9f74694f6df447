//! rf-compressor: empirical compressor performance maps.
//!
//! The compressor is represented only by what it does to the thermal network:
//! electrical power drawn and cooling capacity extracted, both read off
//! biquadratic regressions in speed, condensing temperature and evaporating
//! temperature.
//!
//! # Example
//!
//! ```
//! use rf_compressor::{Biquadratic, CompressorModel, CompressorParameters};
//! use rf_core::ControlMode;
//!
//! let params = CompressorParameters {
//!     id: "demo".into(),
//!     name: "Demo".into(),
//!     power: Biquadratic { base: 100.0, ..Biquadratic::default() },
//!     capacity: Biquadratic { base: 150.0, ..Biquadratic::default() },
//!     min_speed_rpm: 1600.0,
//!     max_speed_rpm: 4500.0,
//!     on_off_speed_rpm: 3000.0,
//!     pressure_ratio_exponent: None,
//! };
//! let model = CompressorModel::new(params).unwrap();
//!
//! let perf = model.evaluate(3000.0, 40.0, -28.0, ControlMode::OnOff);
//! assert_eq!(perf.capacity_w, 150.0);
//! assert_eq!(model.evaluate(0.0, 40.0, -28.0, ControlMode::Vcc).power_w, 0.0);
//! ```

pub mod error;
pub mod model;
pub mod params;

// Re-exports
pub use error::{CompressorError, CompressorResult};
pub use model::{CompressorModel, Performance};
pub use params::{Biquadratic, CompressorParameters};
