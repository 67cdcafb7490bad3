//! Stay pricing
//!
//! Derives nights, rate, subtotal, GST, and total from a room and a stay.
//! The flat 18% GST rate matches the hotel's registration. The tax-inclusive
//! total is the single authoritative amount: it is stored on the booking,
//! charged through the gateway, and reproduced on the invoice.

use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use core_kernel::{Money, Rate, StayPeriod};
use domain_catalog::Room;

/// GST rate applied to room charges, as a decimal fraction
pub const GST_RATE: rust_decimal::Decimal = dec!(0.18);

/// Returns the GST rate
pub fn gst_rate() -> Rate {
    Rate::new(GST_RATE)
}

/// A fully derived price breakdown for a stay
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceQuote {
    /// Number of nights, always >= 1
    pub nights: u32,
    /// Flat per-night rate taken from the room
    pub rate: Money,
    /// `nights × rate`
    pub subtotal: Money,
    /// `subtotal × 18%`
    pub tax: Money,
    /// `subtotal + tax` — the amount charged and invoiced
    pub total: Money,
}

/// Prices a stay in the given room
///
/// Deterministic: the same room rate and stay always produce the same
/// figures, which is what lets the invoice generator recompute rather than
/// trust a cached total.
pub fn price(room: &Room, stay: &StayPeriod) -> PriceQuote {
    let nights = stay.nights();
    let rate = room.price_per_night;
    let subtotal = rate.multiply(rust_decimal::Decimal::from(nights));
    let tax = gst_rate().apply(&subtotal).round_to_currency();
    let total = subtotal + tax;

    PriceQuote {
        nights,
        rate,
        subtotal,
        tax,
        total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use core_kernel::Currency;
    use domain_catalog::{NewRoom, RoomType};
    use rust_decimal_macros::dec;

    fn room(rate: rust_decimal::Decimal) -> Room {
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

    fn stay(ci: (i32, u32, u32), co: (i32, u32, u32)) -> StayPeriod {
        StayPeriod::new(
            NaiveDate::from_ymd_opt(ci.0, ci.1, ci.2).unwrap(),
            NaiveDate::from_ymd_opt(co.0, co.1, co.2).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_pricing_determinism() {
        // 2500/night, 2024-03-10 to 2024-03-13
        let quote = price(&room(dec!(2500)), &stay((2024, 3, 10), (2024, 3, 13)));

        assert_eq!(quote.nights, 3);
        assert_eq!(quote.subtotal.amount(), dec!(7500));
        assert_eq!(quote.tax.amount(), dec!(1350));
        assert_eq!(quote.total.amount(), dec!(8850));
    }

    #[test]
    fn test_single_night() {
        let quote = price(&room(dec!(2000)), &stay((2024, 4, 1), (2024, 4, 2)));

        assert_eq!(quote.nights, 1);
        assert_eq!(quote.subtotal.amount(), dec!(2000));
        assert_eq!(quote.total.amount(), dec!(2360));
    }

    #[test]
    fn test_tax_rounds_to_currency() {
        // 999.50 × 1 night → tax 179.91
        let quote = price(&room(dec!(999.50)), &stay((2024, 4, 1), (2024, 4, 2)));

        assert_eq!(quote.tax.amount(), dec!(179.91));
        assert_eq!(quote.total.amount(), dec!(1179.41));
    }

    #[test]
    fn test_same_quote_twice_is_identical() {
        let r = room(dec!(3500));
        let s = stay((2024, 5, 1), (2024, 5, 6));
        assert_eq!(price(&r, &s), price(&r, &s));
    }
}
