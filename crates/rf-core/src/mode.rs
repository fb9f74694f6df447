use core::fmt;
use core::str::FromStr;

use crate::error::RfError;

/// Compressor control strategy, selected once at construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ControlMode {
    /// Fixed-speed compressor switched by a hysteresis thermostat.
    #[cfg_attr(feature = "serde", serde(rename = "ON_OFF"))]
    OnOff,
    /// Variable-capacity compressor modulated by a PI loop.
    #[cfg_attr(feature = "serde", serde(rename = "VCC"))]
    Vcc,
}

impl ControlMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ControlMode::OnOff => "ON_OFF",
            ControlMode::Vcc => "VCC",
        }
    }
}

impl fmt::Display for ControlMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ControlMode {
    type Err = RfError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ON_OFF" => Ok(ControlMode::OnOff),
            "VCC" => Ok(ControlMode::Vcc),
            other => Err(RfError::UnknownControlMode {
                name: other.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_known_modes() {
        assert_eq!("ON_OFF".parse::<ControlMode>().unwrap(), ControlMode::OnOff);
        assert_eq!("VCC".parse::<ControlMode>().unwrap(), ControlMode::Vcc);
    }

    #[test]
    fn unknown_mode_is_rejected() {
        let err = "PID".parse::<ControlMode>().unwrap_err();
        assert_eq!(
            err,
            RfError::UnknownControlMode {
                name: "PID".to_string()
            }
        );
        assert!("on_off".parse::<ControlMode>().is_err());
    }
}
