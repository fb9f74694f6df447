use rf_project::{Catalog, ValidationError, validate_catalog, validate_system};

fn builtin() -> Catalog {
    Catalog::builtin().unwrap()
}

#[test]
fn rejects_duplicate_appliance() {
    let mut catalog = builtin();
    let copy = catalog.appliances[0].clone();
    catalog.appliances.push(copy);
    assert!(matches!(
        validate_catalog(&catalog),
        Err(ValidationError::DuplicateId { .. })
    ));
}

#[test]
fn rejects_missing_compressor_reference() {
    let mut catalog = builtin();
    catalog.appliances[0].compressor = "missing".to_string();
    assert!(matches!(
        validate_catalog(&catalog),
        Err(ValidationError::MissingReference { id, .. }) if id == "missing"
    ));
}

#[test]
fn rejects_bad_compressor_speeds() {
    let mut catalog = builtin();
    catalog.compressors[0].on_off_speed_rpm = 9000.0;
    assert!(matches!(
        validate_catalog(&catalog),
        Err(ValidationError::Compressor { .. })
    ));
}

#[test]
fn rejects_unsupported_version() {
    let mut catalog = builtin();
    catalog.version = 7;
    assert!(matches!(
        validate_catalog(&catalog),
        Err(ValidationError::UnsupportedVersion { version: 7 })
    ));
}

#[test]
fn rejects_invalid_gains_and_masses() {
    let base = builtin().appliances[0].clone();

    let mut system = base.clone();
    system.pi.ki = 0.0;
    assert!(validate_system(&system).is_err());

    let mut system = base.clone();
    system.pi.negative_error_weight = 0.0;
    assert!(validate_system(&system).is_err());

    let mut system = base.clone();
    system.compartment_2.food.specific_heat_j_per_kg_k = 0.0;
    assert!(validate_system(&system).is_err());

    let mut system = base.clone();
    system.damper.open_conductance_w_per_k = -1.0;
    assert!(validate_system(&system).is_err());

    let mut system = base.clone();
    system.compartment_1.hysteresis_c = f64::NAN;
    assert!(validate_system(&system).is_err());

    let mut system = base;
    system.compartment_1.cabinet.mass_kg = 0.0;
    assert!(validate_system(&system).is_err());
}

#[test]
fn absent_food_needs_no_specific_heat() {
    let mut system = builtin().appliances[0].clone();
    system.compartment_2.food.mass_kg = 0.0;
    system.compartment_2.food.specific_heat_j_per_kg_k = 0.0;
    validate_system(&system).unwrap();
}
