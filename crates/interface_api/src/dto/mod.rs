//! Request/response data transfer objects

pub mod rooms;
pub mod bookings;
pub mod payments;
