//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! booking system test suite.
//!
//! # Modules
//!
//! - `fixtures`: Pre-built test data for common entities
//! - `builders`: Builder patterns for test data construction
//! - `gateway`: A scripted in-process payment gateway

pub mod fixtures;
pub mod builders;
pub mod gateway;

pub use fixtures::*;
pub use builders::*;
pub use gateway::*;
