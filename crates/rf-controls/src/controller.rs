//! Strategy selection and the shared step interface.

use std::str::FromStr;

use rf_core::{Compartment, ControlMode};
use serde::{Deserialize, Serialize};

use crate::error::{ControlError, ControlResult};
use crate::hysteresis::HysteresisBand;
use crate::on_off::OnOffController;
use crate::settings::ControlSettings;
use crate::vcc::{VccController, VccState};

/// Cabinet temperatures sampled at the start of a tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Readings {
    pub cabinet_1_c: f64,
    pub cabinet_2_c: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DamperAction {
    Open,
    Closed,
}

impl DamperAction {
    pub fn from_open(open: bool) -> Self {
        if open { Self::Open } else { Self::Closed }
    }

    pub fn is_open(self) -> bool {
        matches!(self, Self::Open)
    }
}

/// Actuator outputs for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Command {
    pub speed_rpm: f64,
    pub damper: DamperAction,
}

/// The control strategy chosen at construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Controller {
    OnOff(OnOffController),
    Vcc(VccController),
}

impl Controller {
    pub fn new(
        mode: ControlMode,
        settings: ControlSettings,
        initial: &Readings,
    ) -> ControlResult<Self> {
        Ok(match mode {
            ControlMode::OnOff => Self::OnOff(OnOffController::new(settings, initial)?),
            ControlMode::Vcc => Self::Vcc(VccController::new(settings, initial)?),
        })
    }

    /// Build from a textual selector such as `"ON_OFF"` or `"VCC"`.
    pub fn from_selector(
        selector: &str,
        settings: ControlSettings,
        initial: &Readings,
    ) -> ControlResult<Self> {
        let mode = ControlMode::from_str(selector).map_err(|_| ControlError::UnknownMode {
            name: selector.to_string(),
        })?;
        Self::new(mode, settings, initial)
    }

    pub fn mode(&self) -> ControlMode {
        match self {
            Self::OnOff(_) => ControlMode::OnOff,
            Self::Vcc(_) => ControlMode::Vcc,
        }
    }

    pub fn step(&mut self, dt_s: f64, readings: &Readings) -> Command {
        match self {
            Self::OnOff(c) => c.step(dt_s, readings),
            Self::Vcc(c) => c.step(dt_s, readings),
        }
    }

    pub fn set_voltage_fault(&mut self, fault: bool) {
        match self {
            Self::OnOff(c) => c.set_voltage_fault(fault),
            Self::Vcc(c) => c.set_voltage_fault(fault),
        }
    }

    pub fn speed_rpm(&self) -> f64 {
        match self {
            Self::OnOff(c) => c.speed_rpm(),
            Self::Vcc(c) => c.speed_rpm(),
        }
    }

    pub fn damper(&self) -> DamperAction {
        match self {
            Self::OnOff(c) => c.damper(),
            Self::Vcc(c) => c.damper(),
        }
    }

    pub fn settings(&self) -> &ControlSettings {
        match self {
            Self::OnOff(c) => c.settings(),
            Self::Vcc(c) => c.settings(),
        }
    }

    /// Band controlling the given compartment: cooling for the first, damper for the second.
    pub fn band(&self, compartment: Compartment) -> &HysteresisBand {
        let settings = self.settings();
        match compartment {
            Compartment::First => &settings.cooling,
            Compartment::Second => &settings.damper,
        }
    }

    pub fn setpoint_c(&self, compartment: Compartment) -> f64 {
        self.band(compartment).setpoint_c
    }

    /// Cycle state, present only under VCC.
    pub fn vcc_state(&self) -> Option<&VccState> {
        match self {
            Self::OnOff(_) => None,
            Self::Vcc(c) => Some(c.state()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::test_settings;

    const WARM: Readings = Readings {
        cabinet_1_c: -10.0,
        cabinet_2_c: 8.0,
    };

    #[test]
    fn selector_picks_strategy() {
        let c = Controller::from_selector("ON_OFF", test_settings(), &WARM).unwrap();
        assert_eq!(c.mode(), ControlMode::OnOff);
        assert!(c.vcc_state().is_none());

        let c = Controller::from_selector("VCC", test_settings(), &WARM).unwrap();
        assert_eq!(c.mode(), ControlMode::Vcc);
        assert!(!c.vcc_state().unwrap().is_active);
    }

    #[test]
    fn unknown_selector_is_fatal() {
        let err = Controller::from_selector("TURBO", test_settings(), &WARM).unwrap_err();
        assert_eq!(
            err,
            ControlError::UnknownMode {
                name: "TURBO".into()
            }
        );
    }

    #[test]
    fn invalid_settings_are_rejected() {
        let mut settings = test_settings();
        settings.pi.ki = -1.0;
        assert!(Controller::new(ControlMode::Vcc, settings, &WARM).is_err());
    }

    #[test]
    fn setpoints_per_compartment() {
        let c = Controller::new(ControlMode::OnOff, test_settings(), &WARM).unwrap();
        assert_eq!(c.setpoint_c(Compartment::First), -18.0);
        assert_eq!(c.setpoint_c(Compartment::Second), 4.0);
    }

    #[test]
    fn both_strategies_drive_the_damper_identically() {
        let mut on_off = Controller::new(ControlMode::OnOff, test_settings(), &WARM).unwrap();
        let mut vcc = Controller::new(ControlMode::Vcc, test_settings(), &WARM).unwrap();
        for t2 in [8.0, 4.5, 4.0, 4.8, 5.2, 3.0] {
            let r = Readings {
                cabinet_1_c: -17.0,
                cabinet_2_c: t2,
            };
            assert_eq!(on_off.step(60.0, &r).damper, vcc.step(60.0, &r).damper);
        }
    }
}
