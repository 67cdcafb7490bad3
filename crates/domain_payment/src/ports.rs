//! Payment persistence port

use async_trait::async_trait;

use core_kernel::{BookingId, DomainPort, PortError};
use crate::order::PaymentOrder;

/// Persistence port for payment orders
///
/// Backs the idempotency guarantee of order creation: one open order per
/// booking-payment attempt.
#[async_trait]
pub trait PaymentOrderStore: DomainPort {
    /// Records a newly opened order
    async fn insert(&self, order: &PaymentOrder) -> Result<(), PortError>;

    /// Fetches an order by its gateway-issued id
    async fn get(&self, order_id: &str) -> Result<PaymentOrder, PortError>;

    /// Returns the open (not yet paid) order for a booking, if any
    async fn find_open_for_booking(
        &self,
        booking_id: BookingId,
    ) -> Result<Option<PaymentOrder>, PortError>;

    /// Marks an order as paid
    async fn mark_paid(&self, order_id: &str) -> Result<(), PortError>;
}
