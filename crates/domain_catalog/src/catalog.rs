//! Room catalog service
//!
//! Thin service over the `RoomStore` port. Reads are open to any caller;
//! create/update/delete are admin operations enforced at the API layer.

use std::sync::Arc;
use tracing::info;

use core_kernel::RoomId;
use crate::error::CatalogError;
use crate::ports::RoomStore;
use crate::room::{NewRoom, Room, RoomPatch};

/// Service for managing the room catalog
#[derive(Clone)]
pub struct RoomCatalog {
    store: Arc<dyn RoomStore>,
}

impl RoomCatalog {
    /// Creates a new catalog over the given store
    pub fn new(store: Arc<dyn RoomStore>) -> Self {
        Self { store }
    }

    /// Lists rooms currently offered for booking
    pub async fn list_available(&self) -> Result<Vec<Room>, CatalogError> {
        Ok(self.store.list_available().await?)
    }

    /// Lists every room, including withdrawn ones (admin view)
    pub async fn list_all(&self) -> Result<Vec<Room>, CatalogError> {
        Ok(self.store.list_all().await?)
    }

    /// Fetches a room by id
    pub async fn get(&self, id: RoomId) -> Result<Room, CatalogError> {
        self.store.get(id).await.map_err(|e| {
            if e.is_not_found() {
                CatalogError::RoomNotFound(id)
            } else {
                CatalogError::Store(e)
            }
        })
    }

    /// Creates a new room (admin only)
    ///
    /// # Errors
    ///
    /// Returns `Validation` if the name is empty, the price is not positive,
    /// or the occupancy is zero.
    pub async fn create(&self, data: NewRoom) -> Result<Room, CatalogError> {
        if data.name.trim().is_empty() {
            return Err(CatalogError::validation("Room name is required"));
        }
        if !data.price_per_night.is_positive() {
            return Err(CatalogError::validation("Nightly price must be positive"));
        }
        if data.max_occupancy == 0 {
            return Err(CatalogError::validation("Max occupancy must be at least 1"));
        }

        let room = Room::new(data);
        self.store.insert(&room).await?;
        info!(room_id = %room.id, name = %room.name, "room created");
        Ok(room)
    }

    /// Updates a room (admin only)
    pub async fn update(&self, id: RoomId, patch: RoomPatch) -> Result<Room, CatalogError> {
        if let Some(price) = &patch.price_per_night {
            if !price.is_positive() {
                return Err(CatalogError::validation("Nightly price must be positive"));
            }
        }
        if patch.max_occupancy == Some(0) {
            return Err(CatalogError::validation("Max occupancy must be at least 1"));
        }

        let mut room = self.get(id).await?;
        room.apply(patch);
        self.store.update(&room).await?;
        info!(room_id = %room.id, "room updated");
        Ok(room)
    }

    /// Deletes a room (admin only)
    ///
    /// # Errors
    ///
    /// Returns `RoomInUse` if the room still has bookings that hold their
    /// dates. Cancelling or completing those bookings first is required.
    pub async fn delete(&self, id: RoomId) -> Result<(), CatalogError> {
        // Confirm existence before the bookings check so a bad id reports NotFound
        let room = self.get(id).await?;

        if self.store.has_live_bookings(id).await? {
            return Err(CatalogError::RoomInUse(id));
        }

        self.store.delete(id).await?;
        info!(room_id = %room.id, name = %room.name, "room deleted");
        Ok(())
    }
}
