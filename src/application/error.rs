use thiserror::Error;

use crate::domain::{InvalidState, Money, ParseMoneyError};
use crate::storage::SnapshotError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Vehicle not found: {0}")]
    VehicleNotFound(String),

    #[error("Vehicle {registration}: {reason}")]
    InvalidState {
        registration: String,
        reason: InvalidState,
    },

    #[error("Vehicle {registration} has a negative rental price ({price})")]
    NegativePrice { registration: String, price: Money },

    #[error("Invalid amount '{input}': {reason}")]
    InvalidAmount {
        input: String,
        reason: ParseMoneyError,
    },

    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
}
