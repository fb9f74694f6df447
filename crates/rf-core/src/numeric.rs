use crate::RfError;

/// One tolerance for everything
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: f64,
    pub rel: f64,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

pub fn nearly_equal(a: f64, b: f64, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

pub fn ensure_finite(v: f64, what: &'static str) -> Result<f64, RfError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(RfError::NonFinite { what, value: v })
    }
}

/// Finite and `>= 0`.
pub fn ensure_non_negative(v: f64, what: &'static str) -> Result<f64, RfError> {
    let v = ensure_finite(v, what)?;
    if v < 0.0 {
        return Err(RfError::InvalidArg { what });
    }
    Ok(v)
}

/// Absolute zero expressed in degrees Celsius.
pub const ABSOLUTE_ZERO_C: f64 = -273.15;

#[inline]
pub fn celsius_to_kelvin(t_c: f64) -> f64 {
    t_c - ABSOLUTE_ZERO_C
}
