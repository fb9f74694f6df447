//! Two-state thermostat with a dead band.

use serde::{Deserialize, Serialize};

use crate::error::{ControlError, ControlResult};

/// Setpoint and dead band for one compartment.
///
/// The actuator switches on above `setpoint + hysteresis` and off at or
/// below `setpoint`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HysteresisBand {
    pub setpoint_c: f64,
    pub hysteresis_c: f64,
}

impl HysteresisBand {
    pub fn new(setpoint_c: f64, hysteresis_c: f64) -> ControlResult<Self> {
        let band = Self {
            setpoint_c,
            hysteresis_c,
        };
        band.validate()?;
        Ok(band)
    }

    pub fn validate(&self) -> ControlResult<()> {
        if !self.setpoint_c.is_finite() {
            return Err(ControlError::InvalidArg {
                what: "setpoint must be finite",
            });
        }
        if !self.hysteresis_c.is_finite() || self.hysteresis_c < 0.0 {
            return Err(ControlError::InvalidArg {
                what: "hysteresis must be finite and non-negative",
            });
        }
        Ok(())
    }

    /// Upper switching bound `setpoint + hysteresis`.
    pub fn upper_c(&self) -> f64 {
        self.setpoint_c + self.hysteresis_c
    }
}

/// ON/OFF state machine driven by a [`HysteresisBand`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HysteresisSwitch {
    band: HysteresisBand,
    on: bool,
}

impl HysteresisSwitch {
    pub fn new(band: HysteresisBand, on: bool) -> Self {
        Self { band, on }
    }

    /// Power-up state: ON when the temperature is already at or above the upper bound.
    pub fn from_temperature(band: HysteresisBand, temperature_c: f64) -> Self {
        Self::new(band, temperature_c >= band.upper_c())
    }

    /// Feed one reading and return the new state. Inside the band the state is held.
    pub fn update(&mut self, temperature_c: f64) -> bool {
        if temperature_c <= self.band.setpoint_c {
            self.on = false;
        } else if temperature_c > self.band.upper_c() {
            self.on = true;
        }
        self.on
    }

    pub fn force_off(&mut self) {
        self.on = false;
    }

    pub fn is_on(&self) -> bool {
        self.on
    }

    pub fn band(&self) -> &HysteresisBand {
        &self.band
    }
}
