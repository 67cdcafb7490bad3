//! Test data builders
//!
//! Builders let tests specify only the relevant fields and fall back to
//! fixture defaults for everything else.

use chrono::NaiveDate;

use core_kernel::{Money, RoomId, StayPeriod};
use domain_booking::{Booking, BookingRequest, GuestDetails};
use domain_catalog::{NewRoom, Room, RoomType};

use crate::fixtures::{DateFixtures, GuestFixtures, MoneyFixtures};

/// Builder for test rooms
pub struct RoomBuilder {
    name: String,
    room_type: RoomType,
    price_per_night: Money,
    max_occupancy: u32,
    amenities: Vec<String>,
}

impl Default for RoomBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RoomBuilder {
    pub fn new() -> Self {
        Self {
            name: "Mountain View Standard".to_string(),
            room_type: RoomType::Standard,
            price_per_night: MoneyFixtures::standard_rate(),
            max_occupancy: 2,
            amenities: vec![],
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_room_type(mut self, room_type: RoomType) -> Self {
        self.room_type = room_type;
        self
    }

    pub fn with_price(mut self, price: Money) -> Self {
        self.price_per_night = price;
        self
    }

    pub fn with_max_occupancy(mut self, occupancy: u32) -> Self {
        self.max_occupancy = occupancy;
        self
    }

    pub fn with_amenities(mut self, amenities: Vec<String>) -> Self {
        self.amenities = amenities;
        self
    }

    pub fn build(self) -> Room {
        Room::new(NewRoom {
            name: self.name,
            room_type: self.room_type,
            description: None,
            price_per_night: self.price_per_night,
            max_occupancy: self.max_occupancy,
            amenities: self.amenities,
            images: vec![],
        })
    }
}

/// Builder for booking requests
pub struct BookingRequestBuilder {
    room_id: RoomId,
    guest: GuestDetails,
    check_in: NaiveDate,
    check_out: NaiveDate,
    special_requests: Option<String>,
}

impl BookingRequestBuilder {
    pub fn for_room(room_id: RoomId) -> Self {
        Self {
            room_id,
            guest: GuestFixtures::john(),
            check_in: DateFixtures::date(2024, 3, 10),
            check_out: DateFixtures::date(2024, 3, 13),
            special_requests: None,
        }
    }

    pub fn with_guest(mut self, guest: GuestDetails) -> Self {
        self.guest = guest;
        self
    }

    pub fn with_dates(mut self, check_in: NaiveDate, check_out: NaiveDate) -> Self {
        self.check_in = check_in;
        self.check_out = check_out;
        self
    }

    pub fn with_special_requests(mut self, requests: impl Into<String>) -> Self {
        self.special_requests = Some(requests.into());
        self
    }

    pub fn build(self) -> BookingRequest {
        BookingRequest {
            room_id: self.room_id,
            guest: self.guest,
            check_in: self.check_in,
            check_out: self.check_out,
            special_requests: self.special_requests,
        }
    }
}

/// Builder for booking records, bypassing the ledger
pub struct BookingBuilder {
    room_id: RoomId,
    guest: GuestDetails,
    stay: StayPeriod,
    total_amount: Money,
    booking_number: i64,
}

impl BookingBuilder {
    pub fn for_room(room_id: RoomId) -> Self {
        Self {
            room_id,
            guest: GuestFixtures::john(),
            stay: DateFixtures::march_stay(),
            total_amount: MoneyFixtures::standard_rate(),
            booking_number: 1,
        }
    }

    pub fn with_stay(mut self, stay: StayPeriod) -> Self {
        self.stay = stay;
        self
    }

    pub fn with_total(mut self, total: Money) -> Self {
        self.total_amount = total;
        self
    }

    pub fn with_booking_number(mut self, number: i64) -> Self {
        self.booking_number = number;
        self
    }

    pub fn build(self) -> Booking {
        let mut booking = Booking::new(
            self.room_id,
            self.guest,
            self.stay,
            self.total_amount,
            None,
        );
        booking.booking_number = self.booking_number;
        booking
    }
}
