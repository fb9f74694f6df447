//! Catalog schema definitions.

use rf_compressor::CompressorParameters;
use rf_core::Compartment;
use serde::{Deserialize, Serialize};

/// Catalog format version understood by this crate.
pub const CATALOG_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Catalog {
    pub version: u32,
    #[serde(default)]
    pub appliances: Vec<SystemConfig>,
    #[serde(default)]
    pub compressors: Vec<CompressorParameters>,
}

/// Immutable description of one appliance type.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SystemConfig {
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// Default compressor key.
    pub compressor: String,
    #[serde(default = "default_ambient_c")]
    pub ambient_c: f64,
    /// Compartment holding the evaporator; its band drives the compressor.
    pub compartment_1: CompartmentDef,
    /// Compartment fed through the damper; its band drives the damper.
    pub compartment_2: CompartmentDef,
    pub damper: DamperDef,
    pub pi: PiDef,
    pub proxies: ProxyOffsets,
}

impl SystemConfig {
    pub fn compartment(&self, compartment: Compartment) -> &CompartmentDef {
        match compartment {
            Compartment::First => &self.compartment_1,
            Compartment::Second => &self.compartment_2,
        }
    }
}

fn default_ambient_c() -> f64 {
    25.0
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CompartmentDef {
    pub setpoint_c: f64,
    pub hysteresis_c: f64,
    /// Cabinet air and liner; a zero mass leaves the compartment out of the model.
    pub cabinet: MassDef,
    pub ambient_conductance_w_per_k: f64,
    /// Added to the ambient conductance while the door is open.
    #[serde(default)]
    pub door_open_conductance_w_per_k: f64,
    pub food: FoodDef,
}

impl CompartmentDef {
    pub fn is_modeled(&self) -> bool {
        self.cabinet.mass_kg > 0.0
    }

    /// Starting temperature: the upper edge of the band.
    pub fn initial_temperature_c(&self) -> f64 {
        self.setpoint_c + self.hysteresis_c
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct MassDef {
    pub mass_kg: f64,
    pub specific_heat_j_per_kg_k: f64,
}

/// Default food load and its coupling to the cabinet.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct FoodDef {
    pub mass_kg: f64,
    pub specific_heat_j_per_kg_k: f64,
    pub conductance_w_per_k: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct DamperDef {
    pub open_conductance_w_per_k: f64,
    pub closed_conductance_w_per_k: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PiDef {
    pub kp: f64,
    pub ki: f64,
    #[serde(default = "default_negative_error_weight")]
    pub negative_error_weight: f64,
    pub stabilization_minutes: f64,
}

fn default_negative_error_weight() -> f64 {
    1.0
}

/// Offsets used to derive the compressor's operating temperatures.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ProxyOffsets {
    /// Condensing = ambient + offset.
    pub ambient_to_condensing_k: f64,
    /// Evaporating = cabinet 1 - offset.
    pub cabinet_to_evaporating_k: f64,
}
