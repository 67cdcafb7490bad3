//! Room Catalog domain
//!
//! Read-mostly store of bookable room definitions: nightly price, capacity,
//! amenities, and an availability flag. Leaf dependency of the booking and
//! invoice domains.

pub mod room;
pub mod catalog;
pub mod ports;
pub mod error;

pub use room::{Room, RoomType, NewRoom, RoomPatch};
pub use catalog::RoomCatalog;
pub use ports::RoomStore;
pub use error::CatalogError;
