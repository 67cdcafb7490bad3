//! Room DTOs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use core_kernel::{Currency, Money};
use domain_catalog::{NewRoom, Room, RoomPatch, RoomType};

use crate::error::ApiError;

fn default_currency() -> String {
    "INR".to_string()
}

fn parse_currency(code: &str) -> Result<Currency, ApiError> {
    code.parse()
        .map_err(|_| ApiError::Validation(format!("Unknown currency code: {}", code)))
}

#[derive(Debug, Deserialize)]
pub struct CreateRoomRequest {
    pub name: String,
    pub room_type: RoomType,
    pub description: Option<String>,
    pub price_per_night: Decimal,
    #[serde(default = "default_currency")]
    pub currency: String,
    pub max_occupancy: u32,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default)]
    pub images: Vec<String>,
}

impl CreateRoomRequest {
    pub fn into_new_room(self) -> Result<NewRoom, ApiError> {
        let currency = parse_currency(&self.currency)?;
        Ok(NewRoom {
            name: self.name,
            room_type: self.room_type,
            description: self.description,
            price_per_night: Money::new(self.price_per_night, currency),
            max_occupancy: self.max_occupancy,
            amenities: self.amenities,
            images: self.images,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateRoomRequest {
    pub name: Option<String>,
    pub room_type: Option<RoomType>,
    pub description: Option<String>,
    pub price_per_night: Option<Decimal>,
    pub currency: Option<String>,
    pub max_occupancy: Option<u32>,
    pub amenities: Option<Vec<String>>,
    pub images: Option<Vec<String>>,
    pub is_available: Option<bool>,
}

impl UpdateRoomRequest {
    pub fn into_patch(self) -> Result<RoomPatch, ApiError> {
        let price_per_night = match self.price_per_night {
            Some(price) => {
                let currency = parse_currency(self.currency.as_deref().unwrap_or("INR"))?;
                Some(Money::new(price, currency))
            }
            None => None,
        };
        Ok(RoomPatch {
            name: self.name,
            room_type: self.room_type,
            description: self.description,
            price_per_night,
            max_occupancy: self.max_occupancy,
            amenities: self.amenities,
            images: self.images,
            is_available: self.is_available,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct RoomResponse {
    pub id: Uuid,
    pub name: String,
    pub room_type: String,
    pub description: Option<String>,
    pub price_per_night: Decimal,
    pub currency: String,
    pub max_occupancy: u32,
    pub amenities: Vec<String>,
    pub images: Vec<String>,
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Room> for RoomResponse {
    fn from(room: Room) -> Self {
        Self {
            id: room.id.into(),
            name: room.name,
            room_type: room.room_type.as_str().to_string(),
            description: room.description,
            price_per_night: room.price_per_night.amount(),
            currency: room.price_per_night.currency().code().to_string(),
            max_occupancy: room.max_occupancy,
            amenities: room.amenities,
            images: room.images,
            is_available: room.is_available,
            created_at: room.created_at,
            updated_at: room.updated_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AvailabilityQuery {
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
}

#[derive(Debug, Serialize)]
pub struct AvailabilityResponse {
    pub room_id: Uuid,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub available: bool,
}
