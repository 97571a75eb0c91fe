use thiserror::Error;

use crate::models::{AppointmentId, CourierId, LocationIndex};

/// Errors reported by the dispatch core. None of them are fatal.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("appointment not found: {id}")]
    AppointmentNotFound { id: AppointmentId },

    #[error("courier not found: {id}")]
    CourierNotFound { id: CourierId },

    #[error("no location matches '{label}'")]
    UnknownLocation { label: String },

    #[error("courier pool is full (capacity {capacity})")]
    CapacityExceeded { capacity: usize },

    #[error("no route from location {from} to location {to}")]
    Unreachable { from: LocationIndex, to: LocationIndex },

    #[error("no pending appointments to dispatch")]
    NothingPending,

    #[error("no available courier for appointment #{appointment_id}")]
    NoCourierAvailable { appointment_id: AppointmentId },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl DispatchError {
    /// Dispatch preconditions that leave all state untouched
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            DispatchError::NothingPending | DispatchError::NoCourierAvailable { .. }
        )
    }
}

/// Crate-wide result type
pub type Result<T> = std::result::Result<T, DispatchError>;
