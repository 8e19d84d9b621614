use std::path::Path;

use crate::domain::{Vehicle, VehicleStatus};
use crate::storage::{LoadReport, SnapshotError, read_snapshot, write_snapshot};

/// The whole fleet, in insertion order.
///
/// Registrations are not required to be unique: adding a second car with an
/// existing plate simply keeps both. Lookups return the first match.
#[derive(Debug, Clone, Default)]
pub struct FleetRegistry {
    vehicles: Vec<Vehicle>,
}

impl FleetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, vehicle: Vehicle) {
        self.vehicles.push(vehicle);
    }

    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }

    pub fn all(&self) -> impl Iterator<Item = &Vehicle> + '_ {
        self.vehicles.iter()
    }

    pub fn available(&self) -> impl Iterator<Item = &Vehicle> + '_ {
        self.with_status(VehicleStatus::Available)
    }

    pub fn rented(&self) -> impl Iterator<Item = &Vehicle> + '_ {
        self.with_status(VehicleStatus::Rented)
    }

    pub fn in_service(&self) -> impl Iterator<Item = &Vehicle> + '_ {
        self.with_status(VehicleStatus::InService)
    }

    /// Vehicles currently in `status`. Evaluated lazily on every call.
    pub fn with_status(&self, status: VehicleStatus) -> impl Iterator<Item = &Vehicle> + '_ {
        self.vehicles.iter().filter(move |v| v.status() == status)
    }

    /// First vehicle whose registration matches, ignoring case.
    pub fn find(&self, registration: &str) -> Option<&Vehicle> {
        self.vehicles
            .iter()
            .find(|v| v.has_registration(registration))
    }

    pub fn find_mut(&mut self, registration: &str) -> Option<&mut Vehicle> {
        self.vehicles
            .iter_mut()
            .find(|v| v.has_registration(registration))
    }

    /// Like `find_mut`, but when several cars share the plate an available
    /// one is preferred. Used when a customer asks to rent by registration.
    pub fn find_rentable_mut(&mut self, registration: &str) -> Option<&mut Vehicle> {
        let index = self
            .vehicles
            .iter()
            .position(|v| v.has_registration(registration) && v.is_available())
            .or_else(|| {
                self.vehicles
                    .iter()
                    .position(|v| v.has_registration(registration))
            })?;
        self.vehicles.get_mut(index)
    }

    /// Write the fleet to `path`, replacing the file.
    pub fn save_snapshot(&self, path: &Path) -> Result<usize, SnapshotError> {
        write_snapshot(path, &self.vehicles)
    }

    /// Append every vehicle stored at `path`. A missing file leaves the
    /// registry unchanged; malformed lines are skipped and listed in the report.
    pub fn load_snapshot(&mut self, path: &Path) -> Result<LoadReport, SnapshotError> {
        read_snapshot(path, |vehicle| self.vehicles.push(vehicle))
    }
}

impl FromIterator<Vehicle> for FleetRegistry {
    fn from_iter<I: IntoIterator<Item = Vehicle>>(iter: I) -> Self {
        Self {
            vehicles: iter.into_iter().collect(),
        }
    }
}
