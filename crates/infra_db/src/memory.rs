//! In-memory store
//!
//! Implements every persistence port over a single mutex-guarded state.
//! The one lock is what makes `create_if_available` atomic here: the
//! overlap re-check and the insert happen under the same guard, matching
//! the transactional guarantee of the PostgreSQL repositories. Intended
//! for tests and local development.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use core_kernel::{BookingId, DomainPort, PortError, RoomId, StayPeriod};
use domain_booking::{Booking, BookingFilter, BookingStatus, BookingStore};
use domain_catalog::{Room, RoomStore};
use domain_payment::{PaymentOrder, PaymentOrderStore};

#[derive(Default)]
struct State {
    rooms: HashMap<RoomId, Room>,
    bookings: HashMap<BookingId, Booking>,
    orders: HashMap<String, PaymentOrder>,
    next_booking_number: i64,
}

/// Mutex-guarded in-memory implementation of all persistence ports
#[derive(Clone, Default)]
pub struct InMemoryStore {
    state: Arc<Mutex<State>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DomainPort for InMemoryStore {}

fn matches_filter(booking: &Booking, filter: &BookingFilter) -> bool {
    if let Some(room_id) = filter.room_id {
        if booking.room_id != room_id {
            return false;
        }
    }
    if let Some(status) = filter.status {
        if booking.status != status {
            return false;
        }
    }
    if let Some(payment_status) = filter.payment_status {
        if booking.payment_status != payment_status {
            return false;
        }
    }
    if let Some(ref email) = filter.guest_email {
        if !booking.guest.email.eq_ignore_ascii_case(email) {
            return false;
        }
    }
    true
}

fn room_is_free(state: &State, room_id: RoomId, stay: &StayPeriod) -> bool {
    domain_booking::is_available(
        state.bookings.values().filter(|b| b.room_id == room_id),
        stay,
    )
}

#[async_trait]
impl RoomStore for InMemoryStore {
    async fn list_available(&self) -> Result<Vec<Room>, PortError> {
        let state = self.state.lock().await;
        let mut rooms: Vec<Room> = state
            .rooms
            .values()
            .filter(|r| r.is_available)
            .cloned()
            .collect();
        rooms.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(rooms)
    }

    async fn list_all(&self) -> Result<Vec<Room>, PortError> {
        let state = self.state.lock().await;
        let mut rooms: Vec<Room> = state.rooms.values().cloned().collect();
        rooms.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(rooms)
    }

    async fn get(&self, id: RoomId) -> Result<Room, PortError> {
        let state = self.state.lock().await;
        state
            .rooms
            .get(&id)
            .cloned()
            .ok_or_else(|| PortError::not_found("Room", id))
    }

    async fn insert(&self, room: &Room) -> Result<(), PortError> {
        let mut state = self.state.lock().await;
        state.rooms.insert(room.id, room.clone());
        Ok(())
    }

    async fn update(&self, room: &Room) -> Result<(), PortError> {
        let mut state = self.state.lock().await;
        if !state.rooms.contains_key(&room.id) {
            return Err(PortError::not_found("Room", room.id));
        }
        state.rooms.insert(room.id, room.clone());
        Ok(())
    }

    async fn delete(&self, id: RoomId) -> Result<(), PortError> {
        let mut state = self.state.lock().await;
        state
            .rooms
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| PortError::not_found("Room", id))
    }

    async fn has_live_bookings(&self, id: RoomId) -> Result<bool, PortError> {
        let state = self.state.lock().await;
        Ok(state.bookings.values().any(|b| {
            b.room_id == id
                && !matches!(
                    b.status,
                    BookingStatus::Cancelled | BookingStatus::Completed
                )
        }))
    }
}

#[async_trait]
impl BookingStore for InMemoryStore {
    async fn create_if_available(&self, mut booking: Booking) -> Result<Booking, PortError> {
        let mut state = self.state.lock().await;

        if !room_is_free(&state, booking.room_id, &booking.stay) {
            return Err(PortError::conflict(format!(
                "Room {} already booked for overlapping dates",
                booking.room_id
            )));
        }

        state.next_booking_number += 1;
        booking.booking_number = state.next_booking_number;
        state.bookings.insert(booking.id, booking.clone());
        Ok(booking)
    }

    async fn get(&self, id: BookingId) -> Result<Booking, PortError> {
        let state = self.state.lock().await;
        state
            .bookings
            .get(&id)
            .cloned()
            .ok_or_else(|| PortError::not_found("Booking", id))
    }

    async fn list(&self, filter: &BookingFilter) -> Result<Vec<Booking>, PortError> {
        let state = self.state.lock().await;
        let mut bookings: Vec<Booking> = state
            .bookings
            .values()
            .filter(|b| matches_filter(b, filter))
            .cloned()
            .collect();
        bookings.sort_by_key(|b| b.booking_number);
        Ok(bookings)
    }

    async fn has_conflict(
        &self,
        room_id: RoomId,
        stay: &StayPeriod,
    ) -> Result<bool, PortError> {
        let state = self.state.lock().await;
        Ok(!room_is_free(&state, room_id, stay))
    }

    async fn update(&self, booking: &Booking) -> Result<(), PortError> {
        let mut state = self.state.lock().await;
        if !state.bookings.contains_key(&booking.id) {
            return Err(PortError::not_found("Booking", booking.id));
        }
        state.bookings.insert(booking.id, booking.clone());
        Ok(())
    }
}

#[async_trait]
impl PaymentOrderStore for InMemoryStore {
    async fn insert(&self, order: &PaymentOrder) -> Result<(), PortError> {
        let mut state = self.state.lock().await;
        state.orders.insert(order.id.clone(), order.clone());
        Ok(())
    }

    async fn get(&self, order_id: &str) -> Result<PaymentOrder, PortError> {
        let state = self.state.lock().await;
        state
            .orders
            .get(order_id)
            .cloned()
            .ok_or_else(|| PortError::not_found("PaymentOrder", order_id))
    }

    async fn find_open_for_booking(
        &self,
        booking_id: BookingId,
    ) -> Result<Option<PaymentOrder>, PortError> {
        let state = self.state.lock().await;
        let mut open: Vec<&PaymentOrder> = state
            .orders
            .values()
            .filter(|o| o.booking_id == booking_id && o.status.is_open())
            .collect();
        open.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(open.first().map(|o| (*o).clone()))
    }

    async fn mark_paid(&self, order_id: &str) -> Result<(), PortError> {
        let mut state = self.state.lock().await;
        let order = state
            .orders
            .get_mut(order_id)
            .ok_or_else(|| PortError::not_found("PaymentOrder", order_id))?;
        order.status = domain_payment::OrderStatus::Paid;
        Ok(())
    }
}
