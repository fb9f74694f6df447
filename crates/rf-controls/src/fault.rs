//! Supply-voltage fault protection.

use serde::{Deserialize, Serialize};

/// Seconds a voltage fault must persist before the compressor is stopped.
pub const VOLTAGE_FAULT_TRIGGER_S: f64 = 10.0;

/// Accumulates how long the voltage fault flag has been held.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VoltageFaultMonitor {
    fault: bool,
    duration_s: f64,
}

impl VoltageFaultMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_fault(&mut self, fault: bool) {
        self.fault = fault;
    }

    pub fn is_fault(&self) -> bool {
        self.fault
    }

    pub fn duration_s(&self) -> f64 {
        self.duration_s
    }

    /// Advance the timer by `dt_s`; returns `true` while the fault has tripped.
    pub fn update(&mut self, dt_s: f64) -> bool {
        if self.fault {
            self.duration_s += dt_s;
        } else {
            self.duration_s = 0.0;
        }
        self.is_tripped()
    }

    pub fn is_tripped(&self) -> bool {
        self.duration_s > VOLTAGE_FAULT_TRIGGER_S
    }
}
