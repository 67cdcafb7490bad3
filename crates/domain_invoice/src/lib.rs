//! Invoice domain
//!
//! Turns a paid booking into a formatted, numbered invoice document. The
//! invoice is derived, never authoritative: every figure is recomputed
//! through the pricing engine from the booking's stored dates and the
//! room's rate. Rendering to PDF/HTML is an external concern; this crate
//! produces the data document only.

pub mod invoice;
pub mod generator;
pub mod error;

pub use invoice::{Invoice, InvoiceItem, HotelDetails, invoice_id, invoice_number};
pub use generator::InvoiceGenerator;
pub use error::InvoiceError;
