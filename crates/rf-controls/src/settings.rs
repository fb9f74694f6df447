//! Controller configuration.

use serde::{Deserialize, Serialize};

use crate::error::{ControlError, ControlResult};
use crate::hysteresis::HysteresisBand;

/// Compressor speed envelope.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpeedLimits {
    pub min_rpm: f64,
    pub max_rpm: f64,
    /// Fixed speed used by the on/off strategy.
    pub on_off_rpm: f64,
}

impl SpeedLimits {
    pub fn validate(&self) -> ControlResult<()> {
        if !(self.min_rpm.is_finite() && self.min_rpm > 0.0) {
            return Err(ControlError::InvalidArg {
                what: "min speed must be positive",
            });
        }
        if !(self.max_rpm.is_finite() && self.max_rpm > self.min_rpm) {
            return Err(ControlError::InvalidArg {
                what: "max speed must exceed min speed",
            });
        }
        if !(self.min_rpm..=self.max_rpm).contains(&self.on_off_rpm) {
            return Err(ControlError::InvalidArg {
                what: "on/off speed must lie within [min, max]",
            });
        }
        Ok(())
    }
}

/// PI gains for variable-capacity control.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PiGains {
    /// Proportional gain (rpm/K).
    pub kp: f64,
    /// Integral gain (rpm per accumulated K).
    pub ki: f64,
    /// Multiplier applied to errors below setpoint before integrating.
    pub negative_error_weight: f64,
}

impl PiGains {
    pub fn validate(&self) -> ControlResult<()> {
        if !(self.kp.is_finite() && self.kp >= 0.0) {
            return Err(ControlError::InvalidArg {
                what: "kp must be finite and non-negative",
            });
        }
        if !(self.ki.is_finite() && self.ki > 0.0) {
            return Err(ControlError::InvalidArg {
                what: "ki must be positive",
            });
        }
        if !(self.negative_error_weight.is_finite() && self.negative_error_weight > 0.0) {
            return Err(ControlError::InvalidArg {
                what: "negative error weight must be positive",
            });
        }
        Ok(())
    }
}

/// Everything a [`Controller`](crate::Controller) needs besides the readings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlSettings {
    /// Band on cabinet 1 driving the compressor.
    pub cooling: HysteresisBand,
    /// Band on cabinet 2 driving the damper.
    pub damper: HysteresisBand,
    pub speeds: SpeedLimits,
    pub pi: PiGains,
    /// Time below setpoint (plus margin) that ends a VCC cycle.
    pub stabilization_time_s: f64,
}

impl ControlSettings {
    pub fn validate(&self) -> ControlResult<()> {
        self.cooling.validate()?;
        self.damper.validate()?;
        self.speeds.validate()?;
        self.pi.validate()?;
        if !(self.stabilization_time_s.is_finite() && self.stabilization_time_s >= 0.0) {
            return Err(ControlError::InvalidArg {
                what: "stabilization time must be finite and non-negative",
            });
        }
        Ok(())
    }

    /// Upper bound of the integral accumulator, `(max - min) / ki`.
    pub fn integral_limit(&self) -> f64 {
        (self.speeds.max_rpm - self.speeds.min_rpm) / self.pi.ki
    }
}

#[cfg(test)]
pub(crate) fn test_settings() -> ControlSettings {
    ControlSettings {
        cooling: HysteresisBand::new(-18.0, 2.0).unwrap(),
        damper: HysteresisBand::new(4.0, 1.0).unwrap(),
        speeds: SpeedLimits {
            min_rpm: 1600.0,
            max_rpm: 4500.0,
            on_off_rpm: 3000.0,
        },
        pi: PiGains {
            kp: 300.0,
            ki: 10.0,
            negative_error_weight: 1.0,
        },
        stabilization_time_s: 20.0 * 60.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_test_settings_are_valid() {
        let s = test_settings();
        s.validate().unwrap();
        assert_eq!(s.integral_limit(), 290.0);
    }

    #[test]
    fn rejects_bad_speeds() {
        let mut s = test_settings();
        s.speeds.on_off_rpm = 5000.0;
        assert!(s.validate().is_err());

        let mut s = test_settings();
        s.speeds.max_rpm = 1000.0;
        assert!(s.validate().is_err());
    }

    #[test]
    fn rejects_bad_gains() {
        let mut s = test_settings();
        s.pi.ki = 0.0;
        assert!(s.validate().is_err());

        let mut s = test_settings();
        s.pi.negative_error_weight = -1.0;
        assert!(s.validate().is_err());
    }
}
