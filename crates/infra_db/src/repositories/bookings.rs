//! Booking repository
//!
//! `create_if_available` is the only write path for new bookings. It locks
//! the room row, re-checks the overlap predicate inside the transaction,
//! and inserts. An exclusion constraint on the table is the backstop; a
//! 23P01 violation surfaces as the same conflict error.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use core_kernel::{BookingId, Currency, DomainPort, Money, PortError, RoomId, StayPeriod};
use domain_booking::{
    Booking, BookingFilter, BookingStatus, BookingStore, GuestDetails, PaymentStatus,
};

use crate::error::DatabaseError;

/// Database row for a booking
#[derive(Debug, Clone, FromRow)]
pub struct BookingRow {
    pub id: Uuid,
    pub booking_number: i64,
    pub room_id: Uuid,
    pub guest_name: String,
    pub guest_phone: String,
    pub guest_email: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub total_amount: Decimal,
    pub currency: String,
    pub status: String,
    pub payment_status: String,
    pub payment_ref: Option<String>,
    pub special_requests: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<BookingRow> for Booking {
    type Error = DatabaseError;

    fn try_from(row: BookingRow) -> Result<Self, Self::Error> {
        let status: BookingStatus = row.status.parse().map_err(DatabaseError::CorruptRow)?;
        let payment_status: PaymentStatus = row
            .payment_status
            .parse()
            .map_err(DatabaseError::CorruptRow)?;
        let currency: Currency = row
            .currency
            .parse()
            .map_err(|e: core_kernel::MoneyError| DatabaseError::CorruptRow(e.to_string()))?;
        let stay = StayPeriod::new(row.check_in, row.check_out)
            .map_err(|e| DatabaseError::CorruptRow(e.to_string()))?;

        Ok(Booking {
            id: BookingId::from(row.id),
            booking_number: row.booking_number,
            room_id: RoomId::from(row.room_id),
            guest: GuestDetails {
                name: row.guest_name,
                phone: row.guest_phone,
                email: row.guest_email,
            },
            stay,
            total_amount: Money::new(row.total_amount, currency),
            status,
            payment_status,
            payment_ref: row.payment_ref,
            special_requests: row.special_requests,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

const SELECT_COLUMNS: &str = "id, booking_number, room_id, guest_name, guest_phone, \
     guest_email, check_in, check_out, total_amount, currency, status, payment_status, \
     payment_ref, special_requests, created_at, updated_at";

/// PostgreSQL-backed booking store
#[derive(Debug, Clone)]
pub struct BookingRepository {
    pool: PgPool,
}

impl BookingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl DomainPort for BookingRepository {}

#[async_trait]
impl BookingStore for BookingRepository {
    async fn create_if_available(&self, booking: Booking) -> Result<Booking, PortError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DatabaseError::from(&e))?;

        // Serialize concurrent creates for the same room
        let room: Option<Uuid> = sqlx::query_scalar("SELECT id FROM rooms WHERE id = $1 FOR UPDATE")
            .bind(Uuid::from(booking.room_id))
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| DatabaseError::from(&e))?;
        if room.is_none() {
            return Err(DatabaseError::not_found("Room", booking.room_id).into());
        }

        let conflict: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM bookings
                WHERE room_id = $1
                  AND status != 'cancelled'
                  AND check_in < $3
                  AND $2 < check_out
            )
            "#,
        )
        .bind(Uuid::from(booking.room_id))
        .bind(booking.stay.check_in())
        .bind(booking.stay.check_out())
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| DatabaseError::from(&e))?;
        if conflict {
            return Err(PortError::conflict(format!(
                "Room {} already booked for overlapping dates",
                booking.room_id
            )));
        }

        let row: BookingRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO bookings (
                id, room_id, guest_name, guest_phone, guest_email,
                check_in, check_out, total_amount, currency, status,
                payment_status, payment_ref, special_requests, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            RETURNING {}
            "#,
            SELECT_COLUMNS
        ))
        .bind(Uuid::from(booking.id))
        .bind(Uuid::from(booking.room_id))
        .bind(&booking.guest.name)
        .bind(&booking.guest.phone)
        .bind(&booking.guest.email)
        .bind(booking.stay.check_in())
        .bind(booking.stay.check_out())
        .bind(booking.total_amount.amount())
        .bind(booking.total_amount.currency().code())
        .bind(booking.status.as_str())
        .bind(booking.payment_status.as_str())
        .bind(&booking.payment_ref)
        .bind(&booking.special_requests)
        .bind(booking.created_at)
        .bind(booking.updated_at)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| DatabaseError::from(&e))?;

        tx.commit().await.map_err(|e| DatabaseError::from(&e))?;
        Ok(Booking::try_from(row)?)
    }

    async fn get(&self, id: BookingId) -> Result<Booking, PortError> {
        let sql = format!("SELECT {} FROM bookings WHERE id = $1", SELECT_COLUMNS);
        let row: Option<BookingRow> = sqlx::query_as(&sql)
            .bind(Uuid::from(id))
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DatabaseError::from(&e))?;

        let row = row.ok_or_else(|| DatabaseError::not_found("Booking", id))?;
        Ok(Booking::try_from(row)?)
    }

    async fn list(&self, filter: &BookingFilter) -> Result<Vec<Booking>, PortError> {
        let sql = format!(
            r#"
            SELECT {} FROM bookings
            WHERE ($1::uuid IS NULL OR room_id = $1)
              AND ($2::text IS NULL OR status = $2)
              AND ($3::text IS NULL OR payment_status = $3)
              AND ($4::text IS NULL OR LOWER(guest_email) = LOWER($4))
            ORDER BY booking_number
            "#,
            SELECT_COLUMNS
        );
        let rows: Vec<BookingRow> = sqlx::query_as(&sql)
            .bind(filter.room_id.map(Uuid::from))
            .bind(filter.status.map(|s| s.as_str()))
            .bind(filter.payment_status.map(|s| s.as_str()))
            .bind(filter.guest_email.as_deref())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DatabaseError::from(&e))?;

        Ok(rows
            .into_iter()
            .map(Booking::try_from)
            .collect::<Result<Vec<_>, _>>()?)
    }

    async fn has_conflict(
        &self,
        room_id: RoomId,
        stay: &StayPeriod,
    ) -> Result<bool, PortError> {
        let conflict: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM bookings
                WHERE room_id = $1
                  AND status != 'cancelled'
                  AND check_in < $3
                  AND $2 < check_out
            )
            "#,
        )
        .bind(Uuid::from(room_id))
        .bind(stay.check_in())
        .bind(stay.check_out())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DatabaseError::from(&e))?;
        Ok(conflict)
    }

    async fn update(&self, booking: &Booking) -> Result<(), PortError> {
        let result = sqlx::query(
            r#"
            UPDATE bookings SET
                status = $2, payment_status = $3, payment_ref = $4, updated_at = $5
            WHERE id = $1
            "#,
        )
        .bind(Uuid::from(booking.id))
        .bind(booking.status.as_str())
        .bind(booking.payment_status.as_str())
        .bind(&booking.payment_ref)
        .bind(booking.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| DatabaseError::from(&e))?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("Booking", booking.id).into());
        }
        Ok(())
    }
}
