use rf_core::Compartment;
use rf_project::{Catalog, ProjectError};

#[test]
fn builtin_catalog_validates() {
    let catalog = Catalog::builtin().expect("builtin catalog should validate");
    for key in ["house_refrigerator", "bottle_cooler", "chest_freezer"] {
        let appliance = catalog.appliance(key).unwrap();
        assert!(catalog.compressor(&appliance.compressor).is_ok());
    }
    for key in ["reciprocating_r600a", "variable_speed_r600a"] {
        assert!(catalog.compressor(key).is_ok());
    }
}

#[test]
fn house_refrigerator_matches_reference_settings() {
    let catalog = Catalog::builtin().unwrap();
    let fridge = catalog.appliance("house_refrigerator").unwrap();
    assert_eq!(fridge.compartment_1.setpoint_c, -18.0);
    assert_eq!(fridge.compartment_1.hysteresis_c, 2.0);
    assert_eq!(fridge.compartment_1.initial_temperature_c(), -16.0);
    assert_eq!(fridge.ambient_c, 25.0);
    assert!(fridge.compartment(Compartment::Second).is_modeled());

    let compressor = catalog.compressor(&fridge.compressor).unwrap();
    assert_eq!(compressor.on_off_speed_rpm, 3000.0);
}

#[test]
fn single_compartment_appliances_leave_second_compartment_out() {
    let catalog = Catalog::builtin().unwrap();
    for key in ["bottle_cooler", "chest_freezer"] {
        let appliance = catalog.appliance(key).unwrap();
        assert!(!appliance.compartment_2.is_modeled(), "{key}");
    }
}

#[test]
fn chest_freezer_uses_default_negative_error_weight() {
    let catalog = Catalog::builtin().unwrap();
    let freezer = catalog.appliance("chest_freezer").unwrap();
    assert_eq!(freezer.pi.negative_error_weight, 1.0);
    let cooler = catalog.appliance("bottle_cooler").unwrap();
    assert_eq!(cooler.pi.negative_error_weight, 3.0);
}

#[test]
fn unknown_keys_are_rejected() {
    let catalog = Catalog::builtin().unwrap();
    assert!(matches!(
        catalog.appliance("wine_cellar"),
        Err(ProjectError::UnknownAppliance { key }) if key == "wine_cellar"
    ));
    assert!(matches!(
        catalog.compressor("scroll_r290"),
        Err(ProjectError::UnknownCompressor { key }) if key == "scroll_r290"
    ));
}
