use std::path::{Path, PathBuf};

use tracing::info;

use super::{AppError, FleetRegistry, seed_fleet};
use crate::domain::{Ledger, Money, Vehicle};
use crate::storage::LoadReport;

/// Everything one run of the program works on: the fleet, the revenue
/// ledger and the snapshot file they are saved to.
///
/// This is the primary interface for any front end (menu, one-shot CLI).
pub struct FleetSession {
    registry: FleetRegistry,
    ledger: Ledger,
    snapshot_path: PathBuf,
}

/// Result of a successful rental
#[derive(Debug, Clone)]
pub struct RentalResult {
    pub vehicle: Vehicle,
    pub charged: Money,
}

impl FleetSession {
    pub fn new(snapshot_path: impl Into<PathBuf>) -> Self {
        Self::with_registry(FleetRegistry::new(), snapshot_path)
    }

    pub fn with_registry(registry: FleetRegistry, snapshot_path: impl Into<PathBuf>) -> Self {
        Self {
            registry,
            ledger: Ledger::new(),
            snapshot_path: snapshot_path.into(),
        }
    }

    /// Load the snapshot at `snapshot_path` and, when `seed` is set, append
    /// the standard fleet after it.
    pub fn open(
        snapshot_path: impl Into<PathBuf>,
        seed: bool,
    ) -> Result<(Self, LoadReport), AppError> {
        let mut session = Self::new(snapshot_path);
        let report = session.registry.load_snapshot(&session.snapshot_path)?;

        if seed {
            let fleet = seed_fleet(&mut rand::rng());
            info!(vehicles = fleet.len(), "adding standard fleet");
            for vehicle in fleet {
                session.registry.add(vehicle);
            }
        }

        Ok((session, report))
    }

    pub fn registry(&self) -> &FleetRegistry {
        &self.registry
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn snapshot_path(&self) -> &Path {
        &self.snapshot_path
    }

    pub fn revenue(&self) -> Money {
        self.ledger.balance()
    }

    pub fn add_vehicle(&mut self, vehicle: Vehicle) {
        info!(registration = %vehicle.registration, "vehicle added");
        self.registry.add(vehicle);
    }

    /// Rent the car with this registration and credit its price to the ledger.
    /// The ledger is only touched when the rental succeeds.
    pub fn rent(&mut self, registration: &str) -> Result<RentalResult, AppError> {
        let vehicle = self
            .registry
            .find_rentable_mut(registration)
            .ok_or_else(|| AppError::VehicleNotFound(registration.to_string()))?;

        // the ledger only ever takes non-negative credits
        let charged = vehicle.rental_price;
        if charged.is_negative() {
            return Err(AppError::NegativePrice {
                registration: vehicle.registration.clone(),
                price: charged,
            });
        }
        vehicle.rent().map_err(|reason| AppError::InvalidState {
            registration: vehicle.registration.clone(),
            reason,
        })?;
        let vehicle = vehicle.clone();

        self.ledger.credit(charged);
        info!(registration = %vehicle.registration, %charged, "vehicle rented");
        Ok(RentalResult { vehicle, charged })
    }

    pub fn send_to_service(&mut self, registration: &str) -> Result<&Vehicle, AppError> {
        self.transition(registration, Vehicle::mark_in_service)
    }

    pub fn return_vehicle(&mut self, registration: &str) -> Result<&Vehicle, AppError> {
        self.transition(registration, Vehicle::return_vehicle)
    }

    pub fn mark_serviceable(&mut self, registration: &str) -> Result<&Vehicle, AppError> {
        self.transition(registration, Vehicle::mark_serviceable)
    }

    /// Save the fleet to the session's snapshot file.
    pub fn save(&self) -> Result<usize, AppError> {
        Ok(self.registry.save_snapshot(&self.snapshot_path)?)
    }

    fn transition(
        &mut self,
        registration: &str,
        apply: fn(&mut Vehicle),
    ) -> Result<&Vehicle, AppError> {
        let vehicle = self
            .registry
            .find_mut(registration)
            .ok_or_else(|| AppError::VehicleNotFound(registration.to_string()))?;
        apply(vehicle);
        Ok(vehicle)
    }
}
