//! Fixed-speed thermostat control.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::controller::{Command, DamperAction, Readings};
use crate::error::ControlResult;
use crate::fault::VoltageFaultMonitor;
use crate::hysteresis::HysteresisSwitch;
use crate::settings::ControlSettings;

/// Runs the compressor at its nominal speed whenever cabinet 1 calls for cooling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OnOffController {
    settings: ControlSettings,
    cooling: HysteresisSwitch,
    damper: HysteresisSwitch,
    fault: VoltageFaultMonitor,
    speed_rpm: f64,
}

impl OnOffController {
    /// Power-up state follows the readings: cooling starts ON at or above the upper bound.
    pub fn new(settings: ControlSettings, initial: &Readings) -> ControlResult<Self> {
        let cooling_on =
            HysteresisSwitch::from_temperature(settings.cooling, initial.cabinet_1_c).is_on();
        Self::with_cooling(settings, initial, cooling_on)
    }

    /// Start with an explicit compressor state instead of deriving it from the readings.
    pub fn with_cooling(
        settings: ControlSettings,
        initial: &Readings,
        cooling_on: bool,
    ) -> ControlResult<Self> {
        settings.validate()?;
        let cooling = HysteresisSwitch::new(settings.cooling, cooling_on);
        let damper = HysteresisSwitch::from_temperature(settings.damper, initial.cabinet_2_c);
        let speed_rpm = if cooling.is_on() {
            settings.speeds.on_off_rpm
        } else {
            0.0
        };
        Ok(Self {
            settings,
            cooling,
            damper,
            fault: VoltageFaultMonitor::new(),
            speed_rpm,
        })
    }

    pub fn step(&mut self, dt_s: f64, readings: &Readings) -> Command {
        let on = self.cooling.update(readings.cabinet_1_c);
        if self.fault.update(dt_s) {
            if on {
                debug!(
                    duration_s = self.fault.duration_s(),
                    "voltage fault tripped, stopping compressor"
                );
            }
            self.cooling.force_off();
            self.speed_rpm = 0.0;
        } else {
            self.speed_rpm = if on {
                self.settings.speeds.on_off_rpm
            } else {
                0.0
            };
        }
        Command {
            speed_rpm: self.speed_rpm,
            damper: DamperAction::from_open(self.damper.update(readings.cabinet_2_c)),
        }
    }

    pub fn set_voltage_fault(&mut self, fault: bool) {
        self.fault.set_fault(fault);
    }

    pub fn speed_rpm(&self) -> f64 {
        self.speed_rpm
    }

    pub fn is_cooling(&self) -> bool {
        self.cooling.is_on()
    }

    pub fn damper(&self) -> DamperAction {
        DamperAction::from_open(self.damper.is_on())
    }

    pub fn settings(&self) -> &ControlSettings {
        &self.settings
    }
}
