//! Catalog validation logic.

use crate::schema::{CATALOG_VERSION, Catalog, CompartmentDef, MassDef, SystemConfig};
use rf_compressor::CompressorError;
use std::collections::HashSet;

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Duplicate ID: {id} in {context}")]
    DuplicateId { id: String, context: String },

    #[error("Missing reference: {id} in {context}")]
    MissingReference { id: String, context: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Invalid compressor {id}: {source}")]
    Compressor {
        id: String,
        #[source]
        source: CompressorError,
    },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

pub fn validate_catalog(catalog: &Catalog) -> Result<(), ValidationError> {
    if catalog.version != CATALOG_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: catalog.version,
        });
    }

    let mut compressor_ids = HashSet::new();
    for compressor in &catalog.compressors {
        if !compressor_ids.insert(compressor.id.as_str()) {
            return Err(ValidationError::DuplicateId {
                id: compressor.id.clone(),
                context: "compressors".to_string(),
            });
        }
        compressor
            .validate()
            .map_err(|source| ValidationError::Compressor {
                id: compressor.id.clone(),
                source,
            })?;
    }

    let mut appliance_ids = HashSet::new();
    for appliance in &catalog.appliances {
        if !appliance_ids.insert(appliance.id.as_str()) {
            return Err(ValidationError::DuplicateId {
                id: appliance.id.clone(),
                context: "appliances".to_string(),
            });
        }
        if !compressor_ids.contains(appliance.compressor.as_str()) {
            return Err(ValidationError::MissingReference {
                id: appliance.compressor.clone(),
                context: format!("appliance {} compressor", appliance.id),
            });
        }
        validate_system(appliance)?;
    }

    Ok(())
}

/// Checks one appliance record in isolation (no cross-references).
pub fn validate_system(system: &SystemConfig) -> Result<(), ValidationError> {
    check(&system.id, "ambient_c", system.ambient_c, true, "must be finite")?;

    validate_compartment(&system.id, "compartment_1", &system.compartment_1)?;
    validate_compartment(&system.id, "compartment_2", &system.compartment_2)?;
    if !system.compartment_1.is_modeled() {
        return Err(invalid(
            &system.id,
            "compartment_1.cabinet.mass_kg",
            system.compartment_1.cabinet.mass_kg,
            "the evaporator compartment must be modeled",
        ));
    }

    let damper = &system.damper;
    non_negative(&system.id, "damper.open_conductance_w_per_k", damper.open_conductance_w_per_k)?;
    non_negative(
        &system.id,
        "damper.closed_conductance_w_per_k",
        damper.closed_conductance_w_per_k,
    )?;

    let pi = &system.pi;
    non_negative(&system.id, "pi.kp", pi.kp)?;
    positive(&system.id, "pi.ki", pi.ki)?;
    positive(&system.id, "pi.negative_error_weight", pi.negative_error_weight)?;
    non_negative(&system.id, "pi.stabilization_minutes", pi.stabilization_minutes)?;

    let proxies = &system.proxies;
    check(
        &system.id,
        "proxies.ambient_to_condensing_k",
        proxies.ambient_to_condensing_k,
        true,
        "must be finite",
    )?;
    check(
        &system.id,
        "proxies.cabinet_to_evaporating_k",
        proxies.cabinet_to_evaporating_k,
        true,
        "must be finite",
    )?;
    Ok(())
}

fn validate_compartment(
    id: &str,
    name: &str,
    compartment: &CompartmentDef,
) -> Result<(), ValidationError> {
    check(
        id,
        &format!("{name}.setpoint_c"),
        compartment.setpoint_c,
        true,
        "must be finite",
    )?;
    non_negative(id, &format!("{name}.hysteresis_c"), compartment.hysteresis_c)?;
    validate_mass(id, &format!("{name}.cabinet"), &compartment.cabinet)?;
    non_negative(
        id,
        &format!("{name}.ambient_conductance_w_per_k"),
        compartment.ambient_conductance_w_per_k,
    )?;
    non_negative(
        id,
        &format!("{name}.door_open_conductance_w_per_k"),
        compartment.door_open_conductance_w_per_k,
    )?;

    let food = &compartment.food;
    validate_mass(
        id,
        &format!("{name}.food"),
        &MassDef {
            mass_kg: food.mass_kg,
            specific_heat_j_per_kg_k: food.specific_heat_j_per_kg_k,
        },
    )?;
    non_negative(
        id,
        &format!("{name}.food.conductance_w_per_k"),
        food.conductance_w_per_k,
    )?;
    Ok(())
}

fn validate_mass(id: &str, name: &str, mass: &MassDef) -> Result<(), ValidationError> {
    non_negative(id, &format!("{name}.mass_kg"), mass.mass_kg)?;
    if mass.mass_kg > 0.0 {
        positive(
            id,
            &format!("{name}.specific_heat_j_per_kg_k"),
            mass.specific_heat_j_per_kg_k,
        )?;
    }
    Ok(())
}

fn non_negative(id: &str, field: &str, value: f64) -> Result<(), ValidationError> {
    check(id, field, value, value >= 0.0, "must be finite and non-negative")
}

fn positive(id: &str, field: &str, value: f64) -> Result<(), ValidationError> {
    check(id, field, value, value > 0.0, "must be finite and positive")
}

fn check(id: &str, field: &str, value: f64, ok: bool, reason: &str) -> Result<(), ValidationError> {
    if value.is_finite() && ok {
        Ok(())
    } else {
        Err(invalid(id, field, value, reason))
    }
}

fn invalid(id: &str, field: &str, value: f64, reason: &str) -> ValidationError {
    ValidationError::InvalidValue {
        field: format!("{id}.{field}"),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
