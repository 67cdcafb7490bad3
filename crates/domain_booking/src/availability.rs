//! Availability checking
//!
//! Decides whether any existing non-cancelled booking overlaps a requested
//! stay. The result is advisory: two concurrent requests can both see a
//! free room, so booking creation re-checks inside the store's own
//! transaction (`BookingStore::create_if_available`).

use core_kernel::StayPeriod;
use crate::booking::Booking;

/// Returns true if none of the existing bookings conflicts with the stay
///
/// Cancelled bookings release their dates and never count. Overlap uses
/// half-open semantics, so same-day turnover (one booking's check-out equal
/// to another's check-in) is allowed.
pub fn is_available<'a, I>(existing: I, stay: &StayPeriod) -> bool
where
    I: IntoIterator<Item = &'a Booking>,
{
    existing
        .into_iter()
        .filter(|b| b.status.holds_dates())
        .all(|b| !b.stay.overlaps(stay))
}
