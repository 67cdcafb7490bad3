//! Stay periods - half-open calendar date ranges
//!
//! Check-in and check-out are day-granularity dates with no time-of-day
//! semantics. A stay occupies the half-open interval `[check_in, check_out)`,
//! so a check-out date equal to another stay's check-in date is not a
//! conflict (same-day turnover).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors related to stay period construction
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StayError {
    #[error("Invalid date range: check-out {check_out} must be strictly after check-in {check_in}")]
    InvalidDateRange {
        check_in: NaiveDate,
        check_out: NaiveDate,
    },
}

/// A half-open `[check_in, check_out)` date range for a room stay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StayPeriod {
    check_in: NaiveDate,
    check_out: NaiveDate,
}

impl StayPeriod {
    /// Creates a new stay period
    ///
    /// # Errors
    ///
    /// Returns `StayError::InvalidDateRange` unless check-out is strictly
    /// after check-in (a stay is always at least one night).
    pub fn new(check_in: NaiveDate, check_out: NaiveDate) -> Result<Self, StayError> {
        if check_out <= check_in {
            return Err(StayError::InvalidDateRange {
                check_in,
                check_out,
            });
        }
        Ok(Self {
            check_in,
            check_out,
        })
    }

    /// Returns the check-in date (inclusive)
    pub fn check_in(&self) -> NaiveDate {
        self.check_in
    }

    /// Returns the check-out date (exclusive)
    pub fn check_out(&self) -> NaiveDate {
        self.check_out
    }

    /// Returns the number of nights in the stay, always >= 1
    pub fn nights(&self) -> u32 {
        (self.check_out - self.check_in).num_days() as u32
    }

    /// Returns true if this stay overlaps another on the same room
    ///
    /// Half-open semantics: `[a, b)` and `[c, d)` overlap iff `a < d && c < b`.
    /// Equal boundary dates are not an overlap.
    pub fn overlaps(&self, other: &StayPeriod) -> bool {
        self.check_in < other.check_out && other.check_in < self.check_out
    }

    /// Returns true if the stay contains the given night
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.check_in && date < self.check_out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_valid_stay() {
        let stay = StayPeriod::new(date(2024, 3, 10), date(2024, 3, 13)).unwrap();
        assert_eq!(stay.nights(), 3);
    }

    #[test]
    fn test_zero_night_stay_rejected() {
        let result = StayPeriod::new(date(2024, 3, 10), date(2024, 3, 10));
        assert!(matches!(result, Err(StayError::InvalidDateRange { .. })));
    }

    #[test]
    fn test_reversed_dates_rejected() {
        let result = StayPeriod::new(date(2024, 3, 13), date(2024, 3, 10));
        assert!(matches!(result, Err(StayError::InvalidDateRange { .. })));
    }

    #[test]
    fn test_overlap() {
        let a = StayPeriod::new(date(2024, 3, 10), date(2024, 3, 13)).unwrap();
        let b = StayPeriod::new(date(2024, 3, 12), date(2024, 3, 15)).unwrap();
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn test_same_day_turnover_is_not_overlap() {
        let a = StayPeriod::new(date(2024, 3, 8), date(2024, 3, 10)).unwrap();
        let b = StayPeriod::new(date(2024, 3, 10), date(2024, 3, 12)).unwrap();
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));
    }

    #[test]
    fn test_containment_is_overlap() {
        let outer = StayPeriod::new(date(2024, 3, 1), date(2024, 3, 31)).unwrap();
        let inner = StayPeriod::new(date(2024, 3, 10), date(2024, 3, 12)).unwrap();
        assert!(outer.overlaps(&inner));
        assert!(inner.overlaps(&outer));
    }

    #[test]
    fn test_contains() {
        let stay = StayPeriod::new(date(2024, 3, 10), date(2024, 3, 13)).unwrap();
        assert!(stay.contains(date(2024, 3, 10)));
        assert!(stay.contains(date(2024, 3, 12)));
        assert!(!stay.contains(date(2024, 3, 13)));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn arb_stay() -> impl Strategy<Value = StayPeriod> {
        (0i64..3650, 1i64..60).prop_map(|(start, len)| {
            let epoch = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
            let check_in = epoch + chrono::Duration::days(start);
            let check_out = check_in + chrono::Duration::days(len);
            StayPeriod::new(check_in, check_out).unwrap()
        })
    }

    proptest! {
        #[test]
        fn overlap_is_symmetric(a in arb_stay(), b in arb_stay()) {
            prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
        }

        #[test]
        fn stay_never_overlaps_its_successor(a in arb_stay(), len in 1i64..30) {
            let next = StayPeriod::new(
                a.check_out(),
                a.check_out() + chrono::Duration::days(len),
            ).unwrap();
            prop_assert!(!a.overlaps(&next));
        }

        #[test]
        fn nights_matches_day_span(a in arb_stay()) {
            let span = (a.check_out() - a.check_in()).num_days();
            prop_assert_eq!(a.nights() as i64, span);
        }
    }
}
