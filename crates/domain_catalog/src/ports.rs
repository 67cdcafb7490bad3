//! Catalog persistence port

use async_trait::async_trait;

use core_kernel::{DomainPort, PortError, RoomId};
use crate::room::Room;

/// Persistence port for rooms
#[async_trait]
pub trait RoomStore: DomainPort {
    /// Returns all rooms currently offered for booking
    async fn list_available(&self) -> Result<Vec<Room>, PortError>;

    /// Returns every room, including ones withdrawn from sale
    async fn list_all(&self) -> Result<Vec<Room>, PortError>;

    /// Fetches a room by id
    async fn get(&self, id: RoomId) -> Result<Room, PortError>;

    /// Inserts a new room
    async fn insert(&self, room: &Room) -> Result<(), PortError>;

    /// Replaces an existing room
    async fn update(&self, room: &Room) -> Result<(), PortError>;

    /// Removes a room
    async fn delete(&self, id: RoomId) -> Result<(), PortError>;

    /// Returns true if the room has bookings that still hold their dates
    /// (status is neither cancelled nor completed)
    async fn has_live_bookings(&self, id: RoomId) -> Result<bool, PortError>;
}
