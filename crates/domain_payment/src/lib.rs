//! Payment domain
//!
//! Drives the external payment processor through a three-step handshake:
//! open an order, hand off to the hosted checkout UI, then verify the
//! signed success callback and reconcile the result onto the booking.
//!
//! The hand-off is user-driven and may be abandoned indefinitely; a booking
//! left with a pending payment is a normal resting state, not an error.

pub mod order;
pub mod checkout;
pub mod signature;
pub mod gateway;
pub mod service;
pub mod ports;
pub mod error;

pub use order::{PaymentOrder, OrderStatus, CreateOrderRequest, GatewayOrder};
pub use checkout::{CheckoutPrefill, CheckoutSession, CheckoutOutcome};
pub use gateway::{PaymentGateway, HttpGateway, GatewayConfig};
pub use service::{PaymentService, Settlement};
pub use ports::PaymentOrderStore;
pub use error::PaymentError;
