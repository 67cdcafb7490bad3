//! Comprehensive tests for domain_booking

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use core_kernel::{Currency, Money, RoomId, StayPeriod};

use domain_booking::availability::is_available;
use domain_booking::booking::{Booking, BookingStatus, GuestDetails, PaymentStatus};
use domain_booking::pricing::{price, GST_RATE};
use domain_catalog::{NewRoom, Room, RoomType};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn stay(ci: NaiveDate, co: NaiveDate) -> StayPeriod {
    StayPeriod::new(ci, co).unwrap()
}

fn guest() -> GuestDetails {
    GuestDetails {
        name: "John Doe".to_string(),
        phone: "+91 9876543210".to_string(),
        email: "john@example.com".to_string(),
    }
}

fn room_at(rate: rust_decimal::Decimal) -> Room {
    Room::new(NewRoom {
        name: "Test Room".to_string(),
        room_type: RoomType::Standard,
        description: None,
        price_per_night: Money::new(rate, Currency::INR),
        max_occupancy: 2,
        amenities: vec![],
        images: vec![],
    })
}

fn booking_for(room_id: RoomId, ci: NaiveDate, co: NaiveDate) -> Booking {
    Booking::new(
        room_id,
        guest(),
        stay(ci, co),
        Money::new(dec!(8850), Currency::INR),
        None,
    )
}

// ============================================================================
// Availability Tests
// ============================================================================

mod availability_tests {
    use super::*;

    #[test]
    fn test_completed_booking_still_blocks() {
        let room_id = RoomId::new();
        let mut completed = booking_for(room_id, date(2024, 3, 10), date(2024, 3, 13));
        completed.update_status(BookingStatus::Confirmed).unwrap();
        completed.update_status(BookingStatus::Completed).unwrap();

        let requested = stay(date(2024, 3, 11), date(2024, 3, 12));
        assert!(!is_available([completed].iter(), &requested));
    }

    #[test]
    fn test_enclosing_stay_blocks() {
        let room_id = RoomId::new();
        let existing = vec![booking_for(room_id, date(2024, 3, 11), date(2024, 3, 12))];

        let requested = stay(date(2024, 3, 10), date(2024, 3, 15));
        assert!(!is_available(existing.iter(), &requested));
    }
}

// ============================================================================
// Pricing Tests
// ============================================================================

mod pricing_tests {
    use super::*;

    #[test]
    fn test_gst_rate_is_eighteen_percent() {
        assert_eq!(GST_RATE, dec!(0.18));
    }

    #[test]
    fn test_rate_card() {
        let s = stay(date(2024, 3, 10), date(2024, 3, 13));

        let standard = price(&room_at(dec!(2500)), &s);
        assert_eq!(standard.total.amount(), dec!(8850));

        let deluxe = price(&room_at(dec!(3500)), &s);
        assert_eq!(deluxe.subtotal.amount(), dec!(10500));
        assert_eq!(deluxe.tax.amount(), dec!(1890));
        assert_eq!(deluxe.total.amount(), dec!(12390));

        let suite = price(&room_at(dec!(5000)), &s);
        assert_eq!(suite.total.amount(), dec!(17700));
    }

    #[test]
    fn test_total_in_minor_units() {
        // 2000 x 3 nights = 6000, +18% GST = 7080 -> 708000 paise
        let s = stay(date(2024, 6, 1), date(2024, 6, 4));
        let quote = price(&room_at(dec!(2000)), &s);

        assert_eq!(quote.total.amount(), dec!(7080));
        assert_eq!(quote.total.to_minor(), 708_000);
    }
}

// ============================================================================
// Status Machine Tests
// ============================================================================

mod status_tests {
    use super::*;

    #[test]
    fn test_pending_cannot_complete_directly() {
        let mut b = booking_for(RoomId::new(), date(2024, 3, 10), date(2024, 3, 13));
        assert!(b.update_status(BookingStatus::Completed).is_err());
    }

    #[test]
    fn test_cancelled_is_terminal() {
        let mut b = booking_for(RoomId::new(), date(2024, 3, 10), date(2024, 3, 13));
        b.update_status(BookingStatus::Cancelled).unwrap();

        assert!(b.update_status(BookingStatus::Pending).is_err());
        assert!(b.update_status(BookingStatus::Confirmed).is_err());
        assert!(b.update_status(BookingStatus::Completed).is_err());
    }

    #[test]
    fn test_refund_only_after_paid() {
        let mut b = booking_for(RoomId::new(), date(2024, 3, 10), date(2024, 3, 13));
        assert!(b
            .update_payment_status(PaymentStatus::Refunded, None)
            .is_err());

        b.update_payment_status(PaymentStatus::Paid, Some("pay_1".to_string()))
            .unwrap();
        assert!(b
            .update_payment_status(PaymentStatus::Refunded, None)
            .is_ok());
    }

    #[test]
    fn test_payment_ref_survives_refund() {
        let mut b = booking_for(RoomId::new(), date(2024, 3, 10), date(2024, 3, 13));
        b.update_payment_status(PaymentStatus::Paid, Some("pay_1".to_string()))
            .unwrap();
        b.update_payment_status(PaymentStatus::Refunded, None).unwrap();

        assert_eq!(b.payment_ref.as_deref(), Some("pay_1"));
    }

    #[test]
    fn test_status_round_trip() {
        for s in [
            BookingStatus::Pending,
            BookingStatus::Confirmed,
            BookingStatus::Completed,
            BookingStatus::Cancelled,
        ] {
            assert_eq!(s.as_str().parse::<BookingStatus>().unwrap(), s);
        }
    }
}

// ============================================================================
// Serde Tests
// ============================================================================

mod serde_tests {
    use super::*;

    #[test]
    fn test_booking_serializes_statuses_lowercase() {
        let b = booking_for(RoomId::new(), date(2024, 3, 10), date(2024, 3, 13));
        let json = serde_json::to_value(&b).unwrap();

        assert_eq!(json["status"], "pending");
        assert_eq!(json["payment_status"], "pending");
    }
}
