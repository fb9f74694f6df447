//! Compressor regression records.

use rf_core::{ensure_finite, ensure_non_negative};
use serde::{Deserialize, Serialize};

use crate::error::{CompressorError, CompressorResult};

/// Second-order regression in speed `N`, condensing temperature `Tc` and
/// evaporating temperature `Te`:
///
/// ```text
/// f = base + n·N + n2·N² + tc·Tc + tc2·Tc² + te·Te + te2·Te²
///          + n_tc·N·Tc + n_te·N·Te + tc_te·Tc·Te
/// ```
///
/// Speed in rpm, temperatures in °C, result in W.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Biquadratic {
    pub base: f64,
    #[serde(default)]
    pub n: f64,
    #[serde(default)]
    pub n2: f64,
    #[serde(default)]
    pub tc: f64,
    #[serde(default)]
    pub tc2: f64,
    #[serde(default)]
    pub te: f64,
    #[serde(default)]
    pub te2: f64,
    #[serde(default)]
    pub n_tc: f64,
    #[serde(default)]
    pub n_te: f64,
    #[serde(default)]
    pub tc_te: f64,
}

impl Biquadratic {
    /// Raw regression value. May be negative outside the fitted envelope.
    pub fn eval(&self, speed: f64, t_cond: f64, t_evap: f64) -> f64 {
        self.base
            + self.n * speed
            + self.n2 * speed * speed
            + self.tc * t_cond
            + self.tc2 * t_cond * t_cond
            + self.te * t_evap
            + self.te2 * t_evap * t_evap
            + self.n_tc * speed * t_cond
            + self.n_te * speed * t_evap
            + self.tc_te * t_cond * t_evap
    }

    fn coefficients(&self) -> [f64; 10] {
        [
            self.base, self.n, self.n2, self.tc, self.tc2, self.te, self.te2, self.n_tc,
            self.n_te, self.tc_te,
        ]
    }

    fn validate(&self, field: &'static str) -> CompressorResult<()> {
        for c in self.coefficients() {
            ensure_finite(c, field)?;
        }
        Ok(())
    }
}

/// Regression coefficients and speed ratings of one compressor model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompressorParameters {
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// Electrical power map (W).
    pub power: Biquadratic,
    /// Cooling capacity map (W), fitted at `on_off_speed_rpm`.
    pub capacity: Biquadratic,
    pub min_speed_rpm: f64,
    pub max_speed_rpm: f64,
    /// Nominal fixed speed used by on/off control.
    pub on_off_speed_rpm: f64,
    /// Enables the volumetric-efficiency correction when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pressure_ratio_exponent: Option<f64>,
}

impl CompressorParameters {
    pub fn validate(&self) -> CompressorResult<()> {
        self.power.validate("power coefficients")?;
        self.capacity.validate("capacity coefficients")?;

        let min = ensure_finite(self.min_speed_rpm, "min_speed_rpm")?;
        let max = ensure_finite(self.max_speed_rpm, "max_speed_rpm")?;
        let nominal = ensure_finite(self.on_off_speed_rpm, "on_off_speed_rpm")?;

        if min <= 0.0 {
            return Err(CompressorError::InvalidParameter {
                field: "min_speed_rpm",
                what: "must be positive",
            });
        }
        if max <= min {
            return Err(CompressorError::InvalidParameter {
                field: "max_speed_rpm",
                what: "must exceed min_speed_rpm",
            });
        }
        if nominal < min || nominal > max {
            return Err(CompressorError::InvalidParameter {
                field: "on_off_speed_rpm",
                what: "must lie within [min_speed_rpm, max_speed_rpm]",
            });
        }
        if let Some(exp) = self.pressure_ratio_exponent {
            ensure_non_negative(exp, "pressure_ratio_exponent")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> CompressorParameters {
        CompressorParameters {
            id: "test".into(),
            name: String::new(),
            power: Biquadratic::default(),
            capacity: Biquadratic::default(),
            min_speed_rpm: 1600.0,
            max_speed_rpm: 4500.0,
            on_off_speed_rpm: 3000.0,
            pressure_ratio_exponent: None,
        }
    }

    #[test]
    fn each_term_contributes() {
        let f = Biquadratic {
            base: 1.0,
            n: 2.0,
            n2: 3.0,
            tc: 4.0,
            tc2: 5.0,
            te: 6.0,
            te2: 7.0,
            n_tc: 8.0,
            n_te: 9.0,
            tc_te: 10.0,
        };
        // N=2, Tc=3, Te=-1
        let expected = 1.0 + 4.0 + 12.0 + 12.0 + 45.0 - 6.0 + 7.0 + 48.0 - 18.0 - 30.0;
        assert_eq!(f.eval(2.0, 3.0, -1.0), expected);
    }

    #[test]
    fn valid_ratings_pass() {
        assert!(params().validate().is_ok());
    }

    #[test]
    fn speed_ordering_enforced() {
        let mut p = params();
        p.max_speed_rpm = 1000.0;
        assert!(p.validate().is_err());

        let mut p = params();
        p.on_off_speed_rpm = 5000.0;
        assert!(p.validate().is_err());

        let mut p = params();
        p.min_speed_rpm = 0.0;
        assert!(p.validate().is_err());
    }

    #[test]
    fn non_finite_coefficient_rejected() {
        let mut p = params();
        p.capacity.te2 = f64::NAN;
        assert!(matches!(p.validate(), Err(CompressorError::Core(_))));
    }

    #[test]
    fn negative_exponent_rejected() {
        let mut p = params();
        p.pressure_ratio_exponent = Some(-0.5);
        assert!(p.validate().is_err());
    }
}
