//! Payment orchestration service
//!
//! Bridges the booking ledger and the external gateway: opens orders
//! (idempotently per booking), builds the checkout hand-off, and settles
//! checkout outcomes onto the booking record.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use domain_booking::{Booking, BookingLedger, PaymentStatus};

use crate::checkout::{CheckoutOutcome, CheckoutPrefill, CheckoutSession};
use crate::error::PaymentError;
use crate::gateway::PaymentGateway;
use crate::order::{receipt_for, CreateOrderRequest, OrderStatus, PaymentOrder};
use crate::ports::PaymentOrderStore;
use crate::signature;

/// The result of settling a checkout outcome
#[derive(Debug, Clone)]
pub enum Settlement {
    /// Signature verified; the booking is now paid and confirmed
    Paid(Booking),
    /// Replayed success callback; the booking was already paid by this
    /// payment and nothing changed
    AlreadyPaid(Booking),
    /// Guest dismissed the checkout; the booking stays pending
    LeftPending,
    /// The attempt failed; the booking is marked payment-failed
    MarkedFailed(Booking),
}

/// Service driving the order/verify handshake
#[derive(Clone)]
pub struct PaymentService {
    gateway: Arc<dyn PaymentGateway>,
    orders: Arc<dyn PaymentOrderStore>,
    ledger: BookingLedger,
    key_secret: String,
}

impl PaymentService {
    /// Creates the service
    ///
    /// `key_secret` is the merchant secret that signs success callbacks;
    /// it must match the credential configured on the gateway adapter.
    pub fn new(
        gateway: Arc<dyn PaymentGateway>,
        orders: Arc<dyn PaymentOrderStore>,
        ledger: BookingLedger,
        key_secret: impl Into<String>,
    ) -> Self {
        Self {
            gateway,
            orders,
            ledger,
            key_secret: key_secret.into(),
        }
    }

    /// Opens a payment order for a booking, idempotently
    ///
    /// A retry for a booking that already has an open order with the same
    /// amount returns that order instead of opening a second one, so a
    /// guest can never be double-charged by retrying.
    ///
    /// # Errors
    ///
    /// `AlreadyPaid` if the booking is settled; `GatewayUnavailable` /
    /// `GatewayRejected` from the processor.
    pub async fn create_order(&self, booking: &Booking) -> Result<PaymentOrder, PaymentError> {
        if booking.payment_status == PaymentStatus::Paid {
            return Err(PaymentError::AlreadyPaid);
        }

        let amount_minor = booking.total_amount.to_minor();
        if let Some(existing) = self.orders.find_open_for_booking(booking.id).await? {
            if existing.amount_minor == amount_minor {
                info!(
                    booking_id = %booking.id,
                    order_id = %existing.id,
                    "reusing open payment order"
                );
                return Ok(existing);
            }
            // Amount changed since the order was opened (e.g. dates edited);
            // the stale order is abandoned and a fresh one opened.
            warn!(
                booking_id = %booking.id,
                order_id = %existing.id,
                stale_amount = existing.amount_minor,
                amount = amount_minor,
                "open order amount is stale, opening a new order"
            );
        }

        let request = CreateOrderRequest {
            amount: amount_minor,
            currency: booking.total_amount.currency().code().to_string(),
            receipt: receipt_for(booking.booking_number),
        };
        let gateway_order = self.gateway.create_order(&request).await?;

        let order = PaymentOrder {
            id: gateway_order.id,
            booking_id: booking.id,
            amount_minor: gateway_order.amount,
            currency: gateway_order.currency,
            receipt: gateway_order.receipt,
            status: OrderStatus::Created,
            created_at: Utc::now(),
        };
        self.orders.insert(&order).await?;

        info!(
            booking_id = %booking.id,
            order_id = %order.id,
            amount_minor = order.amount_minor,
            "payment order opened"
        );
        Ok(order)
    }

    /// Builds the hand-off data for the hosted checkout UI
    pub fn checkout_session(&self, booking: &Booking, order: &PaymentOrder) -> CheckoutSession {
        CheckoutSession {
            booking_id: booking.id,
            order_id: order.id.clone(),
            amount_minor: order.amount_minor,
            currency: order.currency.clone(),
            prefill: CheckoutPrefill {
                name: booking.guest.name.clone(),
                email: booking.guest.email.clone(),
                contact: booking.guest.phone.clone(),
            },
        }
    }

    /// Settles a checkout outcome onto the booking
    ///
    /// Success callbacks are verified (HMAC signature plus order/booking
    /// correlation) before anything is believed. Settlement is idempotent:
    /// a replayed identical success callback returns `AlreadyPaid` without
    /// error and without touching the booking again. Dismissal is not an
    /// error; the booking simply stays pending until the guest retries.
    pub async fn settle(&self, outcome: CheckoutOutcome) -> Result<Settlement, PaymentError> {
        match outcome {
            CheckoutOutcome::Success {
                order_id,
                payment_id,
                signature: sig,
            } => self.settle_success(order_id, payment_id, sig).await,
            CheckoutOutcome::Dismissed => {
                info!("checkout dismissed; booking left pending");
                Ok(Settlement::LeftPending)
            }
            CheckoutOutcome::Failed { reason } => {
                warn!(reason = %reason, "checkout reported failure");
                Ok(Settlement::LeftPending)
            }
        }
    }

    /// Like `settle`, but ties a reported failure to a specific booking so
    /// its payment status can be marked failed
    pub async fn settle_for_booking(
        &self,
        booking_id: core_kernel::BookingId,
        outcome: CheckoutOutcome,
    ) -> Result<Settlement, PaymentError> {
        match outcome {
            CheckoutOutcome::Failed { reason } => {
                warn!(booking_id = %booking_id, reason = %reason, "payment attempt failed");
                let booking = self
                    .ledger
                    .update_payment_status(booking_id, PaymentStatus::Failed, None)
                    .await?;
                Ok(Settlement::MarkedFailed(booking))
            }
            other => self.settle(other).await,
        }
    }

    async fn settle_success(
        &self,
        order_id: String,
        payment_id: String,
        sig: String,
    ) -> Result<Settlement, PaymentError> {
        let order = self.orders.get(&order_id).await.map_err(|e| {
            if e.is_not_found() {
                PaymentError::UnknownOrder(order_id.clone())
            } else {
                PaymentError::Store(e)
            }
        })?;

        let booking = self.ledger.get(order.booking_id).await?;

        // Nothing is believed before the signature checks out, including a
        // claim that merely names an already-settled payment
        if !signature::verify(&self.key_secret, &order_id, &payment_id, &sig) {
            warn!(
                booking_id = %booking.id,
                order_id = %order_id,
                "callback signature mismatch"
            );
            return Err(PaymentError::VerificationFailed(
                "signature mismatch".to_string(),
            ));
        }

        // Replay of an already-applied success callback: idempotent accept
        if booking.payment_status == PaymentStatus::Paid {
            return if booking.payment_ref.as_deref() == Some(payment_id.as_str()) {
                info!(
                    booking_id = %booking.id,
                    payment_id = %payment_id,
                    "duplicate success callback ignored"
                );
                Ok(Settlement::AlreadyPaid(booking))
            } else {
                Err(PaymentError::VerificationFailed(
                    "booking already paid by a different payment".to_string(),
                ))
            };
        }

        // A previously failed attempt re-enters the flow before settling
        if booking.payment_status == PaymentStatus::Failed {
            self.ledger
                .update_payment_status(booking.id, PaymentStatus::Pending, None)
                .await?;
        }

        self.orders.mark_paid(&order_id).await?;
        let booking = self
            .ledger
            .update_payment_status(booking.id, PaymentStatus::Paid, Some(payment_id.clone()))
            .await?;

        info!(
            booking_id = %booking.id,
            order_id = %order_id,
            payment_id = %payment_id,
            "payment verified and applied"
        );
        Ok(Settlement::Paid(booking))
    }
}
