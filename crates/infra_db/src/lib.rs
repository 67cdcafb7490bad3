//! Infrastructure Database Layer
//!
//! PostgreSQL adapters for the booking system's persistence ports, plus an
//! in-memory store for tests and local development.
//!
//! # Architecture
//!
//! The crate follows the repository pattern: each repository owns the row
//! mapping for one aggregate and implements the domain's port trait, so the
//! domain services never see SQLx types or SQL.
//!
//! # Concurrency
//!
//! Booking creation is the contended path. `BookingRepository` re-checks
//! room availability inside the insert transaction while holding a lock on
//! the room row, and the schema carries an exclusion constraint over
//! `(room_id, stay daterange)` for non-cancelled bookings as a backstop.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::{DatabaseConfig, create_pool, RoomRepository};
//!
//! let pool = create_pool(DatabaseConfig::new("postgres://localhost/booking")).await?;
//! let rooms = RoomRepository::new(pool);
//! ```

pub mod pool;
pub mod error;
pub mod memory;
pub mod repositories;

pub use pool::{DatabasePool, DatabaseConfig, create_pool, create_pool_from_url};
pub use error::DatabaseError;
pub use memory::InMemoryStore;
pub use repositories::{BookingRepository, PaymentOrderRepository, RoomRepository};
