//! Pre-built test data for common entities

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use core_kernel::{Currency, Money, StayPeriod};
use domain_booking::GuestDetails;
use domain_catalog::{NewRoom, Room, RoomType};

/// Standard nightly rates used across the test suite
pub struct MoneyFixtures;

impl MoneyFixtures {
    pub fn standard_rate() -> Money {
        Money::new(dec!(2500), Currency::INR)
    }

    pub fn deluxe_rate() -> Money {
        Money::new(dec!(3500), Currency::INR)
    }

    pub fn suite_rate() -> Money {
        Money::new(dec!(5000), Currency::INR)
    }
}

/// Common calendar fixtures
pub struct DateFixtures;

impl DateFixtures {
    pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// A three-night stay in March
    pub fn march_stay() -> StayPeriod {
        StayPeriod::new(Self::date(2024, 3, 10), Self::date(2024, 3, 13)).unwrap()
    }
}

/// Room fixtures at the standard rate card
pub struct RoomFixtures;

impl RoomFixtures {
    pub fn standard() -> Room {
        Room::new(NewRoom {
            name: "Mountain View Standard".to_string(),
            room_type: RoomType::Standard,
            description: Some("Cozy room with a view of the Kalsubai trail".to_string()),
            price_per_night: MoneyFixtures::standard_rate(),
            max_occupancy: 2,
            amenities: vec!["Free WiFi".to_string(), "Hot water".to_string()],
            images: vec![],
        })
    }

    pub fn deluxe() -> Room {
        Room::new(NewRoom {
            name: "Deluxe Valley View".to_string(),
            room_type: RoomType::Deluxe,
            description: None,
            price_per_night: MoneyFixtures::deluxe_rate(),
            max_occupancy: 3,
            amenities: vec!["Free WiFi".to_string(), "Balcony".to_string()],
            images: vec![],
        })
    }

    pub fn suite() -> Room {
        Room::new(NewRoom {
            name: "Summit Suite".to_string(),
            room_type: RoomType::Suite,
            description: None,
            price_per_night: MoneyFixtures::suite_rate(),
            max_occupancy: 4,
            amenities: vec!["Free WiFi".to_string(), "Living area".to_string()],
            images: vec![],
        })
    }
}

/// Guest fixtures
pub struct GuestFixtures;

impl GuestFixtures {
    pub fn john() -> GuestDetails {
        GuestDetails {
            name: "John Doe".to_string(),
            phone: "+91 9876543210".to_string(),
            email: "john@example.com".to_string(),
        }
    }

    pub fn jane() -> GuestDetails {
        GuestDetails {
            name: "Jane Smith".to_string(),
            phone: "+91 9123456780".to_string(),
            email: "jane@example.com".to_string(),
        }
    }
}
