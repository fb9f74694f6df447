//! Closed-loop appliance simulation.
//!
//! Provides:
//! - [`Simulation`]: one appliance, one compressor, one control strategy,
//!   advanced by explicit fixed-size ticks
//! - Runtime inputs between ticks (ambient, voltage fault, doors, food)
//! - Fixed-step batch runner with decimated recording and a run summary
//!
//! Each tick runs forward only: controller, compressor map, network
//! integration, then the derived proxy temperatures.

pub mod error;
pub mod run;
pub mod simulation;

pub use error::{SimError, SimResult};
pub use run::{RunSummary, Sample, SimOptions, SimRecord, TemperatureStats, run_sim};
pub use simulation::Simulation;
