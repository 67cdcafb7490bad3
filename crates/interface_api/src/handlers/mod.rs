//! Request handlers

pub mod health;
pub mod rooms;
pub mod bookings;
pub mod payments;
pub mod invoices;
