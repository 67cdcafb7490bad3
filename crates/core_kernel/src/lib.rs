//! Core Kernel - Foundational types and utilities for the booking system
//!
//! This crate provides the fundamental building blocks used across all domain modules:
//! - Money types with precise decimal arithmetic
//! - Stay periods (half-open calendar date ranges at day granularity)
//! - Common identifiers and value objects

pub mod money;
pub mod stay;
pub mod identifiers;
pub mod ports;

pub use money::{Money, Currency, Rate, MoneyError};
pub use stay::{StayPeriod, StayError};
pub use identifiers::{RoomId, BookingId, InvoiceId};
pub use ports::{PortError, DomainPort};
