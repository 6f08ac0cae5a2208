//! Shared test fixtures for integration tests.

#![allow(dead_code)]

use city_energy_plan::plan::types::{BuildingClass, Inventory};

/// Per-unit monthly consumption constants of the three form classes.
pub const APARTMENT_KWH: f64 = 250.0;
pub const HOUSE_KWH: f64 = 400.0;
pub const PUBLIC_KWH: f64 = 3000.0;

/// Single building class with one unit consuming 100 kWh/month (1200 kWh/year).
pub fn single_unit_inventory() -> Inventory {
    Inventory::new()
        .with(BuildingClass::new("Unit", 1, 100.0).expect("valid class"))
        .expect("unique name")
}

/// Inventory built the way the form builds it.
pub fn city_inventory(apartments: i64, houses: i64, public: i64) -> Inventory {
    let mut inventory = Inventory::new();
    for (name, count, monthly) in [
        ("Apartments", apartments, APARTMENT_KWH),
        ("Private houses", houses, HOUSE_KWH),
        ("Public buildings", public, PUBLIC_KWH),
    ] {
        inventory
            .push(BuildingClass::new(name, count, monthly).expect("valid class"))
            .expect("unique name");
    }
    inventory
}

/// Path of a scenario file shipped with the crate.
pub fn scenario_path(name: &str) -> std::path::PathBuf {
    std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("scenarios")
        .join(name)
}

/// Relative closeness check for projected values.
pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * b.abs().max(1.0)
}
