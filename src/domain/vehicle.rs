use serde::Serialize;
use tracing::debug;

use super::Money;

/// Where a vehicle currently is. The three states are mutually exclusive,
/// so a car can never be rented and in the workshop at the same time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VehicleStatus {
    #[default]
    Available,
    Rented,
    InService,
}

impl VehicleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleStatus::Available => "available",
            VehicleStatus::Rented => "rented",
            VehicleStatus::InService => "in-service",
        }
    }

    pub fn is_rented(&self) -> bool {
        matches!(self, VehicleStatus::Rented)
    }

    pub fn is_in_service(&self) -> bool {
        matches!(self, VehicleStatus::InService)
    }
}

impl std::fmt::Display for VehicleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A rental car. Descriptive fields are public; the status only changes
/// through the transition methods below.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Vehicle {
    pub make: String,
    pub model: String,
    pub year: i32,
    /// Price charged per rental
    pub rental_price: Money,
    pub deposit: Money,
    /// Business key, compared case-insensitively
    pub registration: String,
    status: VehicleStatus,
}

impl Vehicle {
    pub fn new(
        make: impl Into<String>,
        model: impl Into<String>,
        year: i32,
        rental_price: Money,
        deposit: Money,
        registration: impl Into<String>,
    ) -> Self {
        Self {
            make: make.into(),
            model: model.into(),
            year,
            rental_price,
            deposit,
            registration: registration.into(),
            status: VehicleStatus::Available,
        }
    }

    pub fn status(&self) -> VehicleStatus {
        self.status
    }

    pub fn is_available(&self) -> bool {
        self.status == VehicleStatus::Available
    }

    pub fn is_rented(&self) -> bool {
        self.status.is_rented()
    }

    pub fn is_in_service(&self) -> bool {
        self.status.is_in_service()
    }

    /// Registration match ignoring case and surrounding whitespace on both sides.
    pub fn has_registration(&self, registration: &str) -> bool {
        self.registration.trim().to_lowercase() == registration.trim().to_lowercase()
    }

    /// Hand the car to a customer. Only an available car can be rented;
    /// on failure the status is left untouched.
    pub fn rent(&mut self) -> Result<(), InvalidState> {
        match self.status {
            VehicleStatus::InService => Err(InvalidState::InService),
            VehicleStatus::Rented => Err(InvalidState::AlreadyRented),
            VehicleStatus::Available => {
                self.set_status(VehicleStatus::Rented);
                Ok(())
            }
        }
    }

    /// Back on the lot. Also clears the in-service state.
    pub fn return_vehicle(&mut self) {
        self.set_status(VehicleStatus::Available);
    }

    /// Send to the workshop. Also ends a running rental.
    pub fn mark_in_service(&mut self) {
        self.set_status(VehicleStatus::InService);
    }

    /// Workshop is done with the car. Rented and available cars are unaffected.
    pub fn mark_serviceable(&mut self) {
        if self.status == VehicleStatus::InService {
            self.set_status(VehicleStatus::Available);
        }
    }

    fn set_status(&mut self, next: VehicleStatus) {
        debug!(
            registration = %self.registration,
            from = %self.status,
            to = %next,
            "vehicle status change"
        );
        self.status = next;
    }
}

impl std::fmt::Display for Vehicle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} ({}), registration: {}, price: {}, deposit: {}, status: {}",
            self.make,
            self.model,
            self.year,
            self.registration,
            self.rental_price,
            self.deposit,
            self.status
        )
    }
}

/// A transition was attempted from a status that forbids it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidState {
    InService,
    AlreadyRented,
}

impl std::fmt::Display for InvalidState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidState::InService => write!(f, "vehicle is in service and cannot be rented"),
            InvalidState::AlreadyRented => write!(f, "vehicle is already rented"),
        }
    }
}

impl std::error::Error for InvalidState {}
