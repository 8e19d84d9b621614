// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use std::path::PathBuf;

use anyhow::Result;
use carwave::{FleetRegistry, Money, Vehicle};
use tempfile::TempDir;

/// Helper to get a snapshot path inside a fresh temporary directory
pub fn temp_snapshot() -> Result<(PathBuf, TempDir)> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("fleet.txt");
    Ok((path, temp_dir))
}

/// Build a vehicle from whole-unit prices
pub fn vehicle(make: &str, model: &str, year: i32, price: i64, deposit: i64, reg: &str) -> Vehicle {
    Vehicle::new(
        make,
        model,
        year,
        Money::from_units(price),
        Money::from_units(deposit),
        reg,
    )
}

/// Test fixture: a small fleet with every status represented
pub struct MixedFleet;

impl MixedFleet {
    pub fn registry() -> FleetRegistry {
        let mut registry = FleetRegistry::new();
        registry.add(vehicle("BMW", "M3 Competition", 2022, 900, 5000, "WI AA1000"));
        registry.add(vehicle("Mercedes", "AMG GT 63S", 2021, 1100, 7000, "WI BB2000"));
        registry.add(vehicle("Toyota", "Sienna", 2023, 400, 2000, "WI CC3000"));
        registry.add(vehicle("Ford", "Transit Custom", 2020, 300, 1500, "WI DD4000"));
        registry.add(vehicle("Tesla", "Model S Plaid", 2022, 1000, 9000, "WI EE5000"));

        registry.find_mut("WI BB2000").unwrap().rent().unwrap();
        registry.find_mut("WI DD4000").unwrap().mark_in_service();
        registry.find_mut("WI EE5000").unwrap().rent().unwrap();
        registry
    }
}
