//! End-to-end tests over the in-memory store
//!
//! Exercises the full guest journey (catalog, booking, payment, invoice)
//! through the real services, with only the persistence ports and the
//! gateway swapped for in-process doubles.

use std::sync::Arc;

use rust_decimal_macros::dec;

use core_kernel::{Currency, Money};
use domain_booking::{
    BookingError, BookingFilter, BookingLedger, BookingStatus, LogNotifier, PaymentStatus,
};
use domain_catalog::{CatalogError, RoomCatalog, RoomPatch, RoomStore};
use domain_invoice::InvoiceGenerator;
use domain_payment::{CheckoutOutcome, PaymentError, PaymentService, Settlement};
use infra_db::InMemoryStore;
use test_utils::{
    sign_callback, BookingRequestBuilder, DateFixtures, GatewayScript, GuestFixtures, MockGateway,
    MoneyFixtures, RoomBuilder,
};

const KEY_SECRET: &str = "test_key_secret";

/// Fully wired services over one shared in-memory store
struct World {
    catalog: RoomCatalog,
    ledger: BookingLedger,
    payments: PaymentService,
    invoices: InvoiceGenerator,
    gateway: Arc<MockGateway>,
    store: Arc<InMemoryStore>,
}

fn world() -> World {
    world_with_script(GatewayScript::Succeed)
}

fn world_with_script(script: GatewayScript) -> World {
    let store = Arc::new(InMemoryStore::new());
    let gateway = Arc::new(MockGateway::with_script(script));

    let catalog = RoomCatalog::new(store.clone());
    let ledger = BookingLedger::new(store.clone(), store.clone(), Arc::new(LogNotifier));
    let payments = PaymentService::new(
        gateway.clone(),
        store.clone(),
        ledger.clone(),
        KEY_SECRET,
    );

    World {
        catalog,
        ledger,
        payments,
        invoices: InvoiceGenerator::default(),
        gateway,
        store,
    }
}

/// Books the standard three-night March stay in a fresh room
async fn booked_world() -> (World, domain_catalog::Room, domain_booking::Booking) {
    let w = world();
    let room = RoomBuilder::new().build();
    RoomStore::insert(w.store.as_ref(), &room).await.unwrap();

    let booking = w
        .ledger
        .create(BookingRequestBuilder::for_room(room.id).build())
        .await
        .unwrap();
    (w, room, booking)
}

// ============================================================================
// Booking Flow Tests
// ============================================================================

mod booking_flow_tests {
    use super::*;

    #[tokio::test]
    async fn test_create_booking_prices_the_stay() {
        let (_w, _room, booking) = booked_world().await;

        // 2500 x 3 nights + 18% GST
        assert_eq!(booking.total_amount.amount(), dec!(8850));
        assert_eq!(booking.status, BookingStatus::Pending);
        assert_eq!(booking.payment_status, PaymentStatus::Pending);
        assert_eq!(booking.booking_number, 1);
    }

    #[tokio::test]
    async fn test_overlapping_booking_rejected() {
        let (w, room, _booking) = booked_world().await;

        let err = w
            .ledger
            .create(
                BookingRequestBuilder::for_room(room.id)
                    .with_guest(GuestFixtures::jane())
                    .with_dates(DateFixtures::date(2024, 3, 12), DateFixtures::date(2024, 3, 14))
                    .build(),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, BookingError::RoomUnavailable { .. }));
    }

    #[tokio::test]
    async fn test_same_day_turnover_accepted() {
        let (w, room, booking) = booked_world().await;

        let next = w
            .ledger
            .create(
                BookingRequestBuilder::for_room(room.id)
                    .with_guest(GuestFixtures::jane())
                    .with_dates(booking.stay.check_out(), DateFixtures::date(2024, 3, 15))
                    .build(),
            )
            .await
            .unwrap();
        assert_eq!(next.booking_number, 2);
    }

    #[tokio::test]
    async fn test_invalid_date_range_rejected() {
        let (w, room, _booking) = booked_world().await;

        let err = w
            .ledger
            .create(
                BookingRequestBuilder::for_room(room.id)
                    .with_dates(DateFixtures::date(2024, 5, 10), DateFixtures::date(2024, 5, 10))
                    .build(),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, BookingError::InvalidDateRange(_)));

        // Only the pre-existing booking is on the ledger
        let all = w.ledger.list(BookingFilter::default()).await.unwrap();
        assert_eq!(all.len(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_requests_yield_one_booking() {
        let (w, room, _booking) = booked_world().await;

        let request = || {
            BookingRequestBuilder::for_room(room.id)
                .with_dates(DateFixtures::date(2024, 7, 1), DateFixtures::date(2024, 7, 4))
                .build()
        };
        let (a, b) = tokio::join!(w.ledger.create(request()), w.ledger.create(request()));

        let successes = [a.is_ok(), b.is_ok()].iter().filter(|ok| **ok).count();
        assert_eq!(successes, 1);

        let loser = if a.is_err() { a } else { b };
        assert!(matches!(
            loser.unwrap_err(),
            BookingError::RoomUnavailable { .. }
        ));
    }

    #[tokio::test]
    async fn test_cancellation_frees_the_dates() {
        let (w, room, booking) = booked_world().await;

        w.ledger
            .update_status(booking.id, BookingStatus::Cancelled)
            .await
            .unwrap();

        let rebooked = w
            .ledger
            .create(
                BookingRequestBuilder::for_room(room.id)
                    .with_guest(GuestFixtures::jane())
                    .build(),
            )
            .await;
        assert!(rebooked.is_ok());
    }

    #[tokio::test]
    async fn test_list_filters_by_status() {
        let (w, _room, booking) = booked_world().await;

        let pending = w
            .ledger
            .list(BookingFilter {
                status: Some(BookingStatus::Pending),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].id, booking.id);

        let confirmed = w
            .ledger
            .list(BookingFilter {
                status: Some(BookingStatus::Confirmed),
                ..Default::default()
            })
            .await
            .unwrap();
        assert!(confirmed.is_empty());
    }
}

// ============================================================================
// Payment Flow Tests
// ============================================================================

mod payment_flow_tests {
    use super::*;

    #[tokio::test]
    async fn test_full_payment_journey() {
        let w = world();

        // A 2000/night room booked for three nights
        let room = w
            .catalog
            .create(domain_catalog::NewRoom {
                name: "Budget Twin".to_string(),
                room_type: domain_catalog::RoomType::Standard,
                description: None,
                price_per_night: Money::new(dec!(2000), Currency::INR),
                max_occupancy: 2,
                amenities: vec![],
                images: vec![],
            })
            .await
            .unwrap();
        let booking = w
            .ledger
            .create(
                BookingRequestBuilder::for_room(room.id)
                    .with_dates(DateFixtures::date(2024, 6, 1), DateFixtures::date(2024, 6, 4))
                    .build(),
            )
            .await
            .unwrap();
        assert_eq!(booking.total_amount.amount(), dec!(7080));

        // Open the order: amount in paise, receipt from the booking number
        let order = w.payments.create_order(&booking).await.unwrap();
        assert_eq!(order.amount_minor, 708_000);
        assert_eq!(order.currency, "INR");
        assert_eq!(order.receipt, format!("bkg-{}", booking.booking_number));

        let session = w.payments.checkout_session(&booking, &order);
        assert_eq!(session.order_id, order.id);
        assert_eq!(session.prefill.email, booking.guest.email);

        // Signed success callback settles the booking
        let outcome = CheckoutOutcome::Success {
            order_id: order.id.clone(),
            payment_id: "pay_abc123".to_string(),
            signature: sign_callback(KEY_SECRET, &order.id, "pay_abc123"),
        };
        let settlement = w.payments.settle(outcome).await.unwrap();
        let paid = match settlement {
            Settlement::Paid(b) => b,
            other => panic!("expected Paid, got {:?}", other),
        };
        assert_eq!(paid.payment_status, PaymentStatus::Paid);
        assert_eq!(paid.status, BookingStatus::Confirmed);
        assert_eq!(paid.payment_ref.as_deref(), Some("pay_abc123"));

        // The invoice recomputes to the paid total
        let invoice = w
            .invoices
            .generate(&paid, &room, "pay_abc123")
            .unwrap();
        assert_eq!(invoice.total.amount(), dec!(7080));
        assert_eq!(invoice.booking_number, paid.booking_number);
    }

    #[tokio::test]
    async fn test_order_creation_is_idempotent() {
        let (w, _room, booking) = booked_world().await;

        let first = w.payments.create_order(&booking).await.unwrap();
        let second = w.payments.create_order(&booking).await.unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(w.gateway.orders_opened(), 1);
    }

    #[tokio::test]
    async fn test_order_rejected_once_paid() {
        let (w, _room, booking) = booked_world().await;

        let order = w.payments.create_order(&booking).await.unwrap();
        let outcome = CheckoutOutcome::Success {
            order_id: order.id.clone(),
            payment_id: "pay_1".to_string(),
            signature: sign_callback(KEY_SECRET, &order.id, "pay_1"),
        };
        w.payments.settle(outcome).await.unwrap();

        let paid = w.ledger.get(booking.id).await.unwrap();
        let err = w.payments.create_order(&paid).await.unwrap_err();
        assert!(matches!(err, PaymentError::AlreadyPaid));
    }

    #[tokio::test]
    async fn test_replayed_callback_is_accepted_once() {
        let (w, _room, booking) = booked_world().await;

        let order = w.payments.create_order(&booking).await.unwrap();
        let outcome = || CheckoutOutcome::Success {
            order_id: order.id.clone(),
            payment_id: "pay_replay".to_string(),
            signature: sign_callback(KEY_SECRET, &order.id, "pay_replay"),
        };

        assert!(matches!(
            w.payments.settle(outcome()).await.unwrap(),
            Settlement::Paid(_)
        ));
        assert!(matches!(
            w.payments.settle(outcome()).await.unwrap(),
            Settlement::AlreadyPaid(_)
        ));

        // A different payment claiming the same order is refused
        let forged = CheckoutOutcome::Success {
            order_id: order.id.clone(),
            payment_id: "pay_other".to_string(),
            signature: sign_callback(KEY_SECRET, &order.id, "pay_other"),
        };
        let err = w.payments.settle(forged).await.unwrap_err();
        assert!(matches!(err, PaymentError::VerificationFailed(_)));
    }

    #[tokio::test]
    async fn test_replay_must_carry_a_valid_signature() {
        let (w, _room, booking) = booked_world().await;
        let order = w.payments.create_order(&booking).await.unwrap();

        let outcome = CheckoutOutcome::Success {
            order_id: order.id.clone(),
            payment_id: "pay_1".to_string(),
            signature: sign_callback(KEY_SECRET, &order.id, "pay_1"),
        };
        w.payments.settle(outcome).await.unwrap();

        // Naming the settled payment without a valid signature earns no
        // acknowledgement of the paid booking
        let unsigned = CheckoutOutcome::Success {
            order_id: order.id.clone(),
            payment_id: "pay_1".to_string(),
            signature: "bogus".to_string(),
        };
        let err = w.payments.settle(unsigned).await.unwrap_err();
        assert!(matches!(err, PaymentError::VerificationFailed(_)));
    }

    #[tokio::test]
    async fn test_bad_signature_rejected() {
        let (w, _room, booking) = booked_world().await;
        let order = w.payments.create_order(&booking).await.unwrap();

        let outcome = CheckoutOutcome::Success {
            order_id: order.id.clone(),
            payment_id: "pay_1".to_string(),
            signature: sign_callback("wrong_secret", &order.id, "pay_1"),
        };
        let err = w.payments.settle(outcome).await.unwrap_err();
        assert!(matches!(err, PaymentError::VerificationFailed(_)));

        // The booking is untouched
        let booking = w.ledger.get(booking.id).await.unwrap();
        assert_eq!(booking.payment_status, PaymentStatus::Pending);
    }

    #[tokio::test]
    async fn test_unknown_order_rejected() {
        let w = world();
        let outcome = CheckoutOutcome::Success {
            order_id: "order_unknown".to_string(),
            payment_id: "pay_1".to_string(),
            signature: sign_callback(KEY_SECRET, "order_unknown", "pay_1"),
        };
        let err = w.payments.settle(outcome).await.unwrap_err();
        assert!(matches!(err, PaymentError::UnknownOrder(_)));
    }

    #[tokio::test]
    async fn test_dismissed_checkout_leaves_booking_pending() {
        let (w, _room, booking) = booked_world().await;
        w.payments.create_order(&booking).await.unwrap();

        let settlement = w.payments.settle(CheckoutOutcome::Dismissed).await.unwrap();
        assert!(matches!(settlement, Settlement::LeftPending));

        let booking = w.ledger.get(booking.id).await.unwrap();
        assert_eq!(booking.status, BookingStatus::Pending);
        assert_eq!(booking.payment_status, PaymentStatus::Pending);
    }

    #[tokio::test]
    async fn test_failed_attempt_can_be_retried() {
        let (w, _room, booking) = booked_world().await;
        let order = w.payments.create_order(&booking).await.unwrap();

        let settlement = w
            .payments
            .settle_for_booking(
                booking.id,
                CheckoutOutcome::Failed {
                    reason: "card declined".to_string(),
                },
            )
            .await
            .unwrap();
        let failed = match settlement {
            Settlement::MarkedFailed(b) => b,
            other => panic!("expected MarkedFailed, got {:?}", other),
        };
        assert_eq!(failed.payment_status, PaymentStatus::Failed);

        // The retry succeeds against the same open order
        let outcome = CheckoutOutcome::Success {
            order_id: order.id.clone(),
            payment_id: "pay_retry".to_string(),
            signature: sign_callback(KEY_SECRET, &order.id, "pay_retry"),
        };
        let settlement = w.payments.settle(outcome).await.unwrap();
        assert!(matches!(settlement, Settlement::Paid(_)));
    }

    #[tokio::test]
    async fn test_gateway_outage_surfaces_as_unavailable() {
        let w = world_with_script(GatewayScript::Unavailable);
        let room = w
            .catalog
            .create(domain_catalog::NewRoom {
                name: "Standard".to_string(),
                room_type: domain_catalog::RoomType::Standard,
                description: None,
                price_per_night: MoneyFixtures::standard_rate(),
                max_occupancy: 2,
                amenities: vec![],
                images: vec![],
            })
            .await
            .unwrap();
        let booking = w
            .ledger
            .create(BookingRequestBuilder::for_room(room.id).build())
            .await
            .unwrap();

        let err = w.payments.create_order(&booking).await.unwrap_err();
        assert!(matches!(err, PaymentError::GatewayUnavailable(_)));
    }
}

// ============================================================================
// Invoice Tests
// ============================================================================

mod invoice_tests {
    use super::*;

    #[tokio::test]
    async fn test_invoice_refused_before_payment() {
        let (w, room, booking) = booked_world().await;

        let err = w
            .invoices
            .generate(&booking, &room, "pay_1")
            .unwrap_err();
        assert!(matches!(
            err,
            domain_invoice::InvoiceError::BookingNotPaid(_)
        ));
    }

    #[tokio::test]
    async fn test_invoice_number_tracks_booking_number() {
        let (w, room, booking) = booked_world().await;

        let order = w.payments.create_order(&booking).await.unwrap();
        let outcome = CheckoutOutcome::Success {
            order_id: order.id.clone(),
            payment_id: "pay_1".to_string(),
            signature: sign_callback(KEY_SECRET, &order.id, "pay_1"),
        };
        let paid = match w.payments.settle(outcome).await.unwrap() {
            Settlement::Paid(b) => b,
            other => panic!("expected Paid, got {:?}", other),
        };

        let invoice = w
            .invoices
            .generate_on(&paid, &room, "pay_1", DateFixtures::date(2024, 4, 1))
            .unwrap();
        assert_eq!(invoice.number, "INV-202404-0001");
        assert_eq!(invoice.total.amount(), dec!(8850));
    }
}

// ============================================================================
// Catalog Tests
// ============================================================================

mod catalog_tests {
    use super::*;

    #[tokio::test]
    async fn test_room_crud() {
        let w = world();

        let room = w
            .catalog
            .create(domain_catalog::NewRoom {
                name: "Summit Suite".to_string(),
                room_type: domain_catalog::RoomType::Suite,
                description: None,
                price_per_night: MoneyFixtures::suite_rate(),
                max_occupancy: 4,
                amenities: vec![],
                images: vec![],
            })
            .await
            .unwrap();

        let updated = w
            .catalog
            .update(
                room.id,
                RoomPatch {
                    price_per_night: Some(Money::new(dec!(5500), Currency::INR)),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.price_per_night.amount(), dec!(5500));

        w.catalog.delete(room.id).await.unwrap();
        let err = w.catalog.get(room.id).await.unwrap_err();
        assert!(matches!(err, CatalogError::RoomNotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_refused_while_booked() {
        let (w, room, booking) = booked_world().await;

        let err = w.catalog.delete(room.id).await.unwrap_err();
        assert!(matches!(err, CatalogError::RoomInUse(_)));

        // Cancelling the booking unblocks deletion
        w.ledger
            .update_status(booking.id, BookingStatus::Cancelled)
            .await
            .unwrap();
        assert!(w.catalog.delete(room.id).await.is_ok());
    }

    #[tokio::test]
    async fn test_withdrawn_room_cannot_be_booked() {
        let (w, room, booking) = booked_world().await;
        w.ledger
            .update_status(booking.id, BookingStatus::Cancelled)
            .await
            .unwrap();

        w.catalog
            .update(
                room.id,
                RoomPatch {
                    is_available: Some(false),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let err = w
            .ledger
            .create(BookingRequestBuilder::for_room(room.id).build())
            .await
            .unwrap_err();
        assert!(matches!(err, BookingError::RoomNotOffered(_)));

        // And it drops out of the public listing
        assert!(w.catalog.list_available().await.unwrap().is_empty());
    }
}
