//! Compressor and damper control for refrigeration appliances.
//!
//! Two interchangeable strategies share one interface,
//! `step(dt, readings) -> command`:
//! - **On/off**: fixed-speed compressor switched by a hysteresis thermostat
//! - **Variable capacity (VCC)**: PI speed modulation with integral clamping,
//!   run in cycles that end once the cabinet has stabilized near setpoint
//!
//! Both drive the damper between the compartments with an independent
//! hysteresis loop and stop the compressor on a sustained supply-voltage fault.
//!
//! # Design Principles
//!
//! - **Closed set of strategies**: [`Controller`] is an enum selected once at construction
//! - **Total at runtime**: stepping never fails; invalid settings are rejected up front
//! - **Own your state**: timers and integral state live inside the controller

pub mod controller;
pub mod error;
pub mod fault;
pub mod hysteresis;
pub mod on_off;
pub mod settings;
pub mod vcc;

pub use controller::{Command, Controller, DamperAction, Readings};
pub use error::{ControlError, ControlResult};
pub use fault::{VOLTAGE_FAULT_TRIGGER_S, VoltageFaultMonitor};
pub use hysteresis::{HysteresisBand, HysteresisSwitch};
pub use on_off::OnOffController;
pub use settings::{ControlSettings, PiGains, SpeedLimits};
pub use vcc::{STABILIZATION_MARGIN_C, VccController, VccState};
