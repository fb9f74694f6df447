//! Compressor performance evaluation.

use rf_core::{ControlMode, celsius_to_kelvin};

use crate::error::CompressorResult;
use crate::params::CompressorParameters;

/// Electrical power and cooling capacity at one operating point.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Performance {
    pub power_w: f64,
    pub capacity_w: f64,
}

impl Performance {
    pub const OFF: Performance = Performance {
        power_w: 0.0,
        capacity_w: 0.0,
    };

    /// Coefficient of performance, `None` while the compressor draws no power.
    pub fn cop(&self) -> Option<f64> {
        (self.power_w > 0.0).then(|| self.capacity_w / self.power_w)
    }
}

/// Validated compressor map.
#[derive(Debug, Clone)]
pub struct CompressorModel {
    params: CompressorParameters,
}

impl CompressorModel {
    pub fn new(params: CompressorParameters) -> CompressorResult<Self> {
        params.validate()?;
        Ok(Self { params })
    }

    pub fn params(&self) -> &CompressorParameters {
        &self.params
    }

    /// Capacity derating `(Te_K / Tc_K)^n` in `[0, 1]`; 1 when no exponent is configured.
    pub fn volumetric_efficiency(&self, t_cond_c: f64, t_evap_c: f64) -> f64 {
        let Some(exp) = self.params.pressure_ratio_exponent else {
            return 1.0;
        };
        let tc_k = celsius_to_kelvin(t_cond_c);
        let te_k = celsius_to_kelvin(t_evap_c);
        if tc_k <= 0.0 || te_k <= 0.0 {
            return 0.0;
        }
        (te_k / tc_k).powf(exp).clamp(0.0, 1.0)
    }

    /// Power and capacity at `speed_rpm` with the given proxy temperatures.
    ///
    /// Zero speed means the compressor is off. Regression outputs are clamped
    /// at zero. In VCC mode both outputs are scaled by
    /// `speed / on_off_speed`; in on/off mode the map is used as is.
    pub fn evaluate(
        &self,
        speed_rpm: f64,
        t_cond_c: f64,
        t_evap_c: f64,
        mode: ControlMode,
    ) -> Performance {
        if speed_rpm <= 0.0 {
            return Performance::OFF;
        }

        let p = &self.params;
        let power = p.power.eval(speed_rpm, t_cond_c, t_evap_c).max(0.0);
        let capacity = p.capacity.eval(speed_rpm, t_cond_c, t_evap_c).max(0.0)
            * self.volumetric_efficiency(t_cond_c, t_evap_c);

        let scale = match mode {
            ControlMode::OnOff => 1.0,
            ControlMode::Vcc => speed_rpm / p.on_off_speed_rpm,
        };

        Performance {
            power_w: power * scale,
            capacity_w: capacity * scale,
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::params::Biquadratic;
    use proptest::prelude::*;

    fn arbitrary_map() -> impl Strategy<Value = Biquadratic> {
        prop::collection::vec(-100.0_f64..100.0, 10).prop_map(|c| Biquadratic {
            base: c[0],
            n: c[1] * 1e-2,
            n2: c[2] * 1e-6,
            tc: c[3],
            tc2: c[4] * 1e-2,
            te: c[5],
            te2: c[6] * 1e-2,
            n_tc: c[7] * 1e-4,
            n_te: c[8] * 1e-4,
            tc_te: c[9] * 1e-2,
        })
    }

    fn build(power: Biquadratic, capacity: Biquadratic) -> CompressorModel {
        CompressorModel::new(CompressorParameters {
            id: "prop".into(),
            name: String::new(),
            power,
            capacity,
            min_speed_rpm: 1600.0,
            max_speed_rpm: 4500.0,
            on_off_speed_rpm: 3000.0,
            pressure_ratio_exponent: Some(0.3),
        })
        .unwrap()
    }

    proptest! {
        #[test]
        fn zero_speed_yields_zero_output(
            power in arbitrary_map(),
            capacity in arbitrary_map(),
            tc in -20.0_f64..70.0,
            te in -50.0_f64..20.0,
        ) {
            let m = build(power, capacity);
            for mode in [ControlMode::OnOff, ControlMode::Vcc] {
                prop_assert_eq!(m.evaluate(0.0, tc, te, mode), Performance::OFF);
            }
        }

        #[test]
        fn outputs_never_negative(
            power in arbitrary_map(),
            capacity in arbitrary_map(),
            speed in 1600.0_f64..4500.0,
            tc in -20.0_f64..70.0,
            te in -50.0_f64..20.0,
        ) {
            let m = build(power, capacity);
            for mode in [ControlMode::OnOff, ControlMode::Vcc] {
                let perf = m.evaluate(speed, tc, te, mode);
                prop_assert!(perf.power_w >= 0.0);
                prop_assert!(perf.capacity_w >= 0.0);
            }
        }
    }
}
