//! Room repository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use core_kernel::{Currency, DomainPort, Money, PortError, RoomId};
use domain_catalog::{Room, RoomStore, RoomType};

use crate::error::DatabaseError;

/// Database row for a room
#[derive(Debug, Clone, FromRow)]
pub struct RoomRow {
    pub id: Uuid,
    pub name: String,
    pub room_type: String,
    pub description: Option<String>,
    pub price_per_night: Decimal,
    pub currency: String,
    pub max_occupancy: i32,
    pub amenities: Vec<String>,
    pub images: Vec<String>,
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<RoomRow> for Room {
    type Error = DatabaseError;

    fn try_from(row: RoomRow) -> Result<Self, Self::Error> {
        let room_type: RoomType = row
            .room_type
            .parse()
            .map_err(DatabaseError::CorruptRow)?;
        let currency: Currency = row
            .currency
            .parse()
            .map_err(|e: core_kernel::MoneyError| DatabaseError::CorruptRow(e.to_string()))?;

        Ok(Room {
            id: RoomId::from(row.id),
            name: row.name,
            room_type,
            description: row.description,
            price_per_night: Money::new(row.price_per_night, currency),
            max_occupancy: row.max_occupancy as u32,
            amenities: row.amenities,
            images: row.images,
            is_available: row.is_available,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

const SELECT_COLUMNS: &str = "id, name, room_type, description, price_per_night, currency, \
     max_occupancy, amenities, images, is_available, created_at, updated_at";

/// PostgreSQL-backed room store
#[derive(Debug, Clone)]
pub struct RoomRepository {
    pool: PgPool,
}

impl RoomRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_where(&self, clause: &str) -> Result<Vec<Room>, DatabaseError> {
        let sql = format!(
            "SELECT {} FROM rooms {} ORDER BY created_at",
            SELECT_COLUMNS, clause
        );
        let rows: Vec<RoomRow> = sqlx::query_as(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DatabaseError::from(&e))?;
        rows.into_iter().map(Room::try_from).collect()
    }
}

impl DomainPort for RoomRepository {}

#[async_trait]
impl RoomStore for RoomRepository {
    async fn list_available(&self) -> Result<Vec<Room>, PortError> {
        Ok(self.fetch_where("WHERE is_available = TRUE").await?)
    }

    async fn list_all(&self) -> Result<Vec<Room>, PortError> {
        Ok(self.fetch_where("").await?)
    }

    async fn get(&self, id: RoomId) -> Result<Room, PortError> {
        let sql = format!("SELECT {} FROM rooms WHERE id = $1", SELECT_COLUMNS);
        let row: Option<RoomRow> = sqlx::query_as(&sql)
            .bind(Uuid::from(id))
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DatabaseError::from(&e))?;

        let row = row.ok_or_else(|| DatabaseError::not_found("Room", id))?;
        Ok(Room::try_from(row)?)
    }

    async fn insert(&self, room: &Room) -> Result<(), PortError> {
        sqlx::query(
            r#"
            INSERT INTO rooms (
                id, name, room_type, description, price_per_night, currency,
                max_occupancy, amenities, images, is_available, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(Uuid::from(room.id))
        .bind(&room.name)
        .bind(room.room_type.as_str())
        .bind(&room.description)
        .bind(room.price_per_night.amount())
        .bind(room.price_per_night.currency().code())
        .bind(room.max_occupancy as i32)
        .bind(&room.amenities)
        .bind(&room.images)
        .bind(room.is_available)
        .bind(room.created_at)
        .bind(room.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| DatabaseError::from(&e))?;
        Ok(())
    }

    async fn update(&self, room: &Room) -> Result<(), PortError> {
        let result = sqlx::query(
            r#"
            UPDATE rooms SET
                name = $2, room_type = $3, description = $4, price_per_night = $5,
                currency = $6, max_occupancy = $7, amenities = $8, images = $9,
                is_available = $10, updated_at = $11
            WHERE id = $1
            "#,
        )
        .bind(Uuid::from(room.id))
        .bind(&room.name)
        .bind(room.room_type.as_str())
        .bind(&room.description)
        .bind(room.price_per_night.amount())
        .bind(room.price_per_night.currency().code())
        .bind(room.max_occupancy as i32)
        .bind(&room.amenities)
        .bind(&room.images)
        .bind(room.is_available)
        .bind(room.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| DatabaseError::from(&e))?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("Room", room.id).into());
        }
        Ok(())
    }

    async fn delete(&self, id: RoomId) -> Result<(), PortError> {
        let result = sqlx::query("DELETE FROM rooms WHERE id = $1")
            .bind(Uuid::from(id))
            .execute(&self.pool)
            .await
            .map_err(|e| DatabaseError::from(&e))?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("Room", id).into());
        }
        Ok(())
    }

    async fn has_live_bookings(&self, id: RoomId) -> Result<bool, PortError> {
        let live: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM bookings
                WHERE room_id = $1 AND status NOT IN ('cancelled', 'completed')
            )
            "#,
        )
        .bind(Uuid::from(id))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DatabaseError::from(&e))?;
        Ok(live)
    }
}
