//! Payment order repository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use core_kernel::{BookingId, DomainPort, PortError};
use domain_payment::{OrderStatus, PaymentOrder, PaymentOrderStore};

use crate::error::DatabaseError;

/// Database row for a payment order
#[derive(Debug, Clone, FromRow)]
pub struct PaymentOrderRow {
    pub id: String,
    pub booking_id: Uuid,
    pub amount_minor: i64,
    pub currency: String,
    pub receipt: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<PaymentOrderRow> for PaymentOrder {
    type Error = DatabaseError;

    fn try_from(row: PaymentOrderRow) -> Result<Self, Self::Error> {
        let status: OrderStatus = row.status.parse().map_err(DatabaseError::CorruptRow)?;
        Ok(PaymentOrder {
            id: row.id,
            booking_id: BookingId::from(row.booking_id),
            amount_minor: row.amount_minor,
            currency: row.currency,
            receipt: row.receipt,
            status,
            created_at: row.created_at,
        })
    }
}

const SELECT_COLUMNS: &str =
    "id, booking_id, amount_minor, currency, receipt, status, created_at";

/// PostgreSQL-backed payment order store
#[derive(Debug, Clone)]
pub struct PaymentOrderRepository {
    pool: PgPool,
}

impl PaymentOrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl DomainPort for PaymentOrderRepository {}

#[async_trait]
impl PaymentOrderStore for PaymentOrderRepository {
    async fn insert(&self, order: &PaymentOrder) -> Result<(), PortError> {
        sqlx::query(
            r#"
            INSERT INTO payment_orders (
                id, booking_id, amount_minor, currency, receipt, status, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(&order.id)
        .bind(Uuid::from(order.booking_id))
        .bind(order.amount_minor)
        .bind(&order.currency)
        .bind(&order.receipt)
        .bind(order.status.as_str())
        .bind(order.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| DatabaseError::from(&e))?;
        Ok(())
    }

    async fn get(&self, order_id: &str) -> Result<PaymentOrder, PortError> {
        let sql = format!(
            "SELECT {} FROM payment_orders WHERE id = $1",
            SELECT_COLUMNS
        );
        let row: Option<PaymentOrderRow> = sqlx::query_as(&sql)
            .bind(order_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DatabaseError::from(&e))?;

        let row = row.ok_or_else(|| DatabaseError::not_found("PaymentOrder", order_id))?;
        Ok(PaymentOrder::try_from(row)?)
    }

    async fn find_open_for_booking(
        &self,
        booking_id: BookingId,
    ) -> Result<Option<PaymentOrder>, PortError> {
        let sql = format!(
            r#"
            SELECT {} FROM payment_orders
            WHERE booking_id = $1 AND status != 'paid'
            ORDER BY created_at DESC
            LIMIT 1
            "#,
            SELECT_COLUMNS
        );
        let row: Option<PaymentOrderRow> = sqlx::query_as(&sql)
            .bind(Uuid::from(booking_id))
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DatabaseError::from(&e))?;

        Ok(row.map(PaymentOrder::try_from).transpose()?)
    }

    async fn mark_paid(&self, order_id: &str) -> Result<(), PortError> {
        let result = sqlx::query("UPDATE payment_orders SET status = 'paid' WHERE id = $1")
            .bind(order_id)
            .execute(&self.pool)
            .await
            .map_err(|e| DatabaseError::from(&e))?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("PaymentOrder", order_id).into());
        }
        Ok(())
    }
}
