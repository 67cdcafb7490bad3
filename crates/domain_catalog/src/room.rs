//! Room aggregate

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{Money, RoomId};

/// Room category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomType {
    Standard,
    Deluxe,
    Suite,
}

impl RoomType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoomType::Standard => "standard",
            RoomType::Deluxe => "deluxe",
            RoomType::Suite => "suite",
        }
    }
}

impl std::str::FromStr for RoomType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "standard" => Ok(RoomType::Standard),
            "deluxe" => Ok(RoomType::Deluxe),
            "suite" => Ok(RoomType::Suite),
            other => Err(format!("Unknown room type: {}", other)),
        }
    }
}

/// A bookable room definition
///
/// Immutable except through explicit admin update via the catalog service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    /// Unique identifier
    pub id: RoomId,
    /// Display name
    pub name: String,
    /// Room category
    pub room_type: RoomType,
    /// Marketing description
    pub description: Option<String>,
    /// Nightly price (major currency units)
    pub price_per_night: Money,
    /// Maximum number of guests
    pub max_occupancy: u32,
    /// Amenity labels
    pub amenities: Vec<String>,
    /// Image references
    pub images: Vec<String>,
    /// Whether the room is currently offered for booking
    pub is_available: bool,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl Room {
    /// Creates a room from admin-supplied data
    pub fn new(data: NewRoom) -> Self {
        let now = Utc::now();
        Self {
            id: RoomId::new_v7(),
            name: data.name,
            room_type: data.room_type,
            description: data.description,
            price_per_night: data.price_per_night,
            max_occupancy: data.max_occupancy,
            amenities: data.amenities,
            images: data.images,
            is_available: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Applies an admin update, bumping the updated timestamp
    pub fn apply(&mut self, patch: RoomPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(room_type) = patch.room_type {
            self.room_type = room_type;
        }
        if let Some(description) = patch.description {
            self.description = Some(description);
        }
        if let Some(price) = patch.price_per_night {
            self.price_per_night = price;
        }
        if let Some(occupancy) = patch.max_occupancy {
            self.max_occupancy = occupancy;
        }
        if let Some(amenities) = patch.amenities {
            self.amenities = amenities;
        }
        if let Some(images) = patch.images {
            self.images = images;
        }
        if let Some(available) = patch.is_available {
            self.is_available = available;
        }
        self.updated_at = Utc::now();
    }
}

/// Admin-supplied data for creating a room
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewRoom {
    pub name: String,
    pub room_type: RoomType,
    pub description: Option<String>,
    pub price_per_night: Money,
    pub max_occupancy: u32,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default)]
    pub images: Vec<String>,
}

/// Partial admin update to a room
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoomPatch {
    pub name: Option<String>,
    pub room_type: Option<RoomType>,
    pub description: Option<String>,
    pub price_per_night: Option<Money>,
    pub max_occupancy: Option<u32>,
    pub amenities: Option<Vec<String>>,
    pub images: Option<Vec<String>>,
    pub is_available: Option<bool>,
}
