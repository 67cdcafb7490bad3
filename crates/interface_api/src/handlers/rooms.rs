//! Room handlers
//!
//! Browsing is public; create/update/delete sit behind the admin routes.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use uuid::Uuid;

use core_kernel::{RoomId, StayPeriod};

use crate::dto::rooms::{
    AvailabilityQuery, AvailabilityResponse, CreateRoomRequest, RoomResponse, UpdateRoomRequest,
};
use crate::error::ApiError;
use crate::AppState;

/// Lists rooms currently offered for booking
pub async fn list_rooms(
    State(state): State<AppState>,
) -> Result<Json<Vec<RoomResponse>>, ApiError> {
    let rooms = state.catalog.list_available().await?;
    Ok(Json(rooms.into_iter().map(RoomResponse::from).collect()))
}

/// Gets a room by ID
pub async fn get_room(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<RoomResponse>, ApiError> {
    let room = state.catalog.get(RoomId::from(id)).await?;
    Ok(Json(room.into()))
}

/// Advisory availability check for a date range
///
/// The answer can go stale between this call and booking creation; the
/// create endpoint re-checks atomically and is the only authority.
pub async fn check_availability(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<AvailabilityResponse>, ApiError> {
    let stay = StayPeriod::new(query.check_in, query.check_out)
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;
    let available = state
        .ledger
        .is_available(RoomId::from(id), &stay)
        .await?;

    Ok(Json(AvailabilityResponse {
        room_id: id,
        check_in: query.check_in,
        check_out: query.check_out,
        available,
    }))
}

/// Lists every room, including withdrawn ones (admin)
pub async fn list_all_rooms(
    State(state): State<AppState>,
) -> Result<Json<Vec<RoomResponse>>, ApiError> {
    let rooms = state.catalog.list_all().await?;
    Ok(Json(rooms.into_iter().map(RoomResponse::from).collect()))
}

/// Creates a room (admin)
pub async fn create_room(
    State(state): State<AppState>,
    Json(request): Json<CreateRoomRequest>,
) -> Result<Json<RoomResponse>, ApiError> {
    let room = state.catalog.create(request.into_new_room()?).await?;
    Ok(Json(room.into()))
}

/// Updates a room (admin)
pub async fn update_room(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateRoomRequest>,
) -> Result<Json<RoomResponse>, ApiError> {
    let room = state
        .catalog
        .update(RoomId::from(id), request.into_patch()?)
        .await?;
    Ok(Json(room.into()))
}

/// Deletes a room (admin)
///
/// Refused with a conflict while the room has bookings holding dates.
pub async fn delete_room(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state.catalog.delete(RoomId::from(id)).await?;
    Ok(Json(serde_json::json!({ "deleted": id })))
}
