//! Variable-capacity (VCC) compressor control.
//!
//! A cycle starts when cabinet 1 rises above `setpoint + hysteresis`. While
//! active, speed follows a clamped PI law on the cabinet 1 error:
//!
//! ```text
//! e        = T1 - setpoint
//! integral = clamp(integral + w(e), 0, (max - min) / ki)
//! speed    = clamp(min + kp * e + ki * integral, min, max)
//! ```
//!
//! where `w(e)` scales negative errors by `negative_error_weight`. The cycle
//! ends once cabinet 1 has spent longer than the stabilization time below
//! `setpoint + STABILIZATION_MARGIN_C`.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::controller::{Command, DamperAction, Readings};
use crate::error::ControlResult;
use crate::fault::VoltageFaultMonitor;
use crate::hysteresis::HysteresisSwitch;
use crate::settings::ControlSettings;

/// Band above setpoint that still counts as "stabilized".
pub const STABILIZATION_MARGIN_C: f64 = 0.05;

/// Cycle state of the VCC strategy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VccState {
    /// Accumulated (weighted) error, kept within `[0, (max - min) / ki]`.
    pub integral_error: f64,
    pub is_active: bool,
    pub cycle_duration_s: f64,
    pub time_below_setpoint_s: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VccController {
    settings: ControlSettings,
    state: VccState,
    damper: HysteresisSwitch,
    fault: VoltageFaultMonitor,
    speed_rpm: f64,
}

impl VccController {
    /// Starts IDLE; the first step above the band opens a cycle.
    pub fn new(settings: ControlSettings, initial: &Readings) -> ControlResult<Self> {
        settings.validate()?;
        let damper = HysteresisSwitch::from_temperature(settings.damper, initial.cabinet_2_c);
        Ok(Self {
            settings,
            state: VccState::default(),
            damper,
            fault: VoltageFaultMonitor::new(),
            speed_rpm: 0.0,
        })
    }

    pub fn step(&mut self, dt_s: f64, readings: &Readings) -> Command {
        let t1 = readings.cabinet_1_c;
        let band = self.settings.cooling;

        if self.fault.update(dt_s) {
            if self.state.is_active {
                debug!(
                    duration_s = self.fault.duration_s(),
                    "voltage fault tripped, ending VCC cycle"
                );
            }
            self.state.is_active = false;
            self.speed_rpm = 0.0;
        } else if !self.state.is_active {
            self.speed_rpm = 0.0;
            if t1 > band.upper_c() {
                debug!(cabinet_1_c = t1, "VCC cycle start");
                self.state = VccState {
                    is_active: true,
                    ..VccState::default()
                };
            }
        } else {
            self.state.cycle_duration_s += dt_s;
            self.speed_rpm = self.pi_speed(t1 - band.setpoint_c);

            if t1 < band.setpoint_c + STABILIZATION_MARGIN_C {
                self.state.time_below_setpoint_s += dt_s;
            }
            if self.state.time_below_setpoint_s > self.settings.stabilization_time_s {
                debug!(
                    cycle_duration_s = self.state.cycle_duration_s,
                    "VCC cycle stabilized"
                );
                self.state.is_active = false;
                self.speed_rpm = 0.0;
            }
        }

        Command {
            speed_rpm: self.speed_rpm,
            damper: DamperAction::from_open(self.damper.update(readings.cabinet_2_c)),
        }
    }

    fn pi_speed(&mut self, error: f64) -> f64 {
        let pi = self.settings.pi;
        let speeds = self.settings.speeds;
        let weighted = if error < 0.0 {
            error * pi.negative_error_weight
        } else {
            error
        };
        self.state.integral_error = (self.state.integral_error + weighted)
            .clamp(0.0, self.settings.integral_limit());
        let raw = speeds.min_rpm + pi.kp * error + pi.ki * self.state.integral_error;
        raw.clamp(speeds.min_rpm, speeds.max_rpm)
    }

    pub fn set_voltage_fault(&mut self, fault: bool) {
        self.fault.set_fault(fault);
    }

    pub fn state(&self) -> &VccState {
        &self.state
    }

    pub fn speed_rpm(&self) -> f64 {
        self.speed_rpm
    }

    pub fn damper(&self) -> DamperAction {
        DamperAction::from_open(self.damper.is_on())
    }

    pub fn settings(&self) -> &ControlSettings {
        &self.settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::test_settings;

    fn at(t1: f64) -> Readings {
        Readings {
            cabinet_1_c: t1,
            cabinet_2_c: 4.0,
        }
    }

    fn active(t1: f64) -> VccController {
        let mut c = VccController::new(test_settings(), &at(t1)).unwrap();
        c.step(60.0, &at(-15.0));
        assert!(c.state().is_active);
        c
    }

    #[test]
    fn starts_idle_and_activates_above_band() {
        let mut c = VccController::new(test_settings(), &at(-10.0)).unwrap();
        assert!(!c.state().is_active);
        assert_eq!(c.step(60.0, &at(-16.0)).speed_rpm, 0.0);
        assert!(!c.state().is_active);

        let cmd = c.step(60.0, &at(-15.9));
        assert!(c.state().is_active);
        assert_eq!(cmd.speed_rpm, 0.0);
        assert_eq!(c.state().cycle_duration_s, 0.0);
    }

    #[test]
    fn pi_law_matches_hand_calculation() {
        let mut c = active(-10.0);
        // e = 2, integral = 2 -> 1600 + 600 + 20
        let cmd = c.step(60.0, &at(-16.0));
        assert_eq!(cmd.speed_rpm, 2220.0);
        assert_eq!(c.state().integral_error, 2.0);
        assert_eq!(c.state().cycle_duration_s, 60.0);
    }

    #[test]
    fn integral_is_clamped() {
        let mut c = active(-10.0);
        for _ in 0..100 {
            c.step(60.0, &at(0.0));
        }
        assert_eq!(c.state().integral_error, 290.0);
        assert_eq!(c.speed_rpm(), 4500.0);

        for _ in 0..100 {
            c.step(1.0, &at(-30.0));
        }
        assert_eq!(c.state().integral_error, 0.0);
    }

    #[test]
    fn negative_errors_are_weighted() {
        let mut settings = test_settings();
        settings.pi.negative_error_weight = 3.0;
        let mut c = VccController::new(settings, &at(-10.0)).unwrap();
        c.step(60.0, &at(-15.0));
        c.step(60.0, &at(-8.0)); // e = 10
        c.step(60.0, &at(-19.0)); // e = -1, weighted -3
        assert_eq!(c.state().integral_error, 7.0);
    }

    #[test]
    fn cycle_ends_after_stabilization_and_resets_on_restart() {
        let mut c = active(-10.0);
        c.step(60.0, &at(-14.0));
        assert!(c.state().integral_error > 0.0);

        // 20 minutes is not enough; the 21st minute ends the cycle.
        for _ in 0..20 {
            c.step(60.0, &at(-17.98));
            assert!(c.state().is_active);
        }
        let cmd = c.step(60.0, &at(-17.98));
        assert!(!c.state().is_active);
        assert_eq!(cmd.speed_rpm, 0.0);

        let cmd = c.step(60.0, &at(-15.0));
        assert!(c.state().is_active);
        assert_eq!(cmd.speed_rpm, 0.0);
        assert_eq!(c.state().integral_error, 0.0);
        assert_eq!(c.state().time_below_setpoint_s, 0.0);
        assert_eq!(c.state().cycle_duration_s, 0.0);
    }

    #[test]
    fn voltage_fault_forces_idle() {
        let mut c = active(-10.0);
        c.set_voltage_fault(true);
        c.step(6.0, &at(-14.0));
        c.step(6.0, &at(-14.0));
        assert!(!c.state().is_active);
        assert_eq!(c.speed_rpm(), 0.0);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::settings::test_settings;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn speed_is_zero_or_within_limits(
            temps in prop::collection::vec(-30.0f64..10.0, 1..200),
            dt in 1.0f64..120.0,
        ) {
            let settings = test_settings();
            let limit = settings.integral_limit();
            let at = |t: f64| Readings { cabinet_1_c: t, cabinet_2_c: 4.0 };
            let mut c = VccController::new(settings, &at(temps[0])).unwrap();
            for t in temps {
                let cmd = c.step(dt, &at(t));
                let s = cmd.speed_rpm;
                prop_assert!(s == 0.0 || (1600.0..=4500.0).contains(&s));
                if c.state().is_active && c.state().cycle_duration_s > 0.0 {
                    prop_assert!((1600.0..=4500.0).contains(&s));
                } else {
                    prop_assert_eq!(s, 0.0);
                }
                prop_assert!(c.state().integral_error >= 0.0);
                prop_assert!(c.state().integral_error <= limit);
            }
        }
    }
}
