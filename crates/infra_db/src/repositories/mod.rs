//! PostgreSQL repository implementations
//!
//! Each repository owns the row mapping for one aggregate and implements
//! the corresponding domain port directly, translating `DatabaseError`
//! into `PortError` at the boundary.

pub mod rooms;
pub mod bookings;
pub mod payment_orders;

pub use rooms::RoomRepository;
pub use bookings::BookingRepository;
pub use payment_orders::PaymentOrderRepository;
