//! Catalog domain errors

use core_kernel::{PortError, RoomId};
use thiserror::Error;

/// Errors that can occur in the room catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Room does not exist
    #[error("Room not found: {0}")]
    RoomNotFound(RoomId),

    /// Room still has live (non-cancelled, non-completed) bookings
    #[error("Room {0} has live bookings and cannot be deleted")]
    RoomInUse(RoomId),

    /// Invalid admin input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Underlying store failure
    #[error("Store error: {0}")]
    Store(#[from] PortError),
}

impl CatalogError {
    pub fn validation(message: impl Into<String>) -> Self {
        CatalogError::Validation(message.into())
    }
}
