use rand::Rng;

use crate::domain::{Money, Vehicle, generate_registration};

/// make, model, year, rental price, deposit (whole units)
const STANDARD_FLEET: [(&str, &str, i32, i64, i64); 8] = [
    ("BMW", "M3 Competition", 2022, 900, 5000),
    ("Mercedes", "AMG GT 63S", 2021, 1100, 7000),
    ("Toyota", "Sienna", 2023, 400, 2000),
    ("Ford", "Transit Custom", 2020, 300, 1500),
    ("Tesla", "Model S Plaid", 2022, 1000, 9000),
    ("Tesla", "Cybertruck", 2024, 1500, 15000),
    ("Toyota", "Corolla", 2022, 400, 5000),
    ("Skoda", "Fabia", 2022, 300, 2000),
];

/// The company's standard cars, each with a freshly generated registration.
pub fn seed_fleet<R: Rng + ?Sized>(rng: &mut R) -> Vec<Vehicle> {
    STANDARD_FLEET
        .iter()
        .map(|&(make, model, year, price, deposit)| {
            Vehicle::new(
                make,
                model,
                year,
                Money::from_units(price),
                Money::from_units(deposit),
                generate_registration(rng),
            )
        })
        .collect()
}
