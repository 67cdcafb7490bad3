//! HTTP API Layer
//!
//! REST API for the booking system using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: Request handlers for each domain
//! - **Middleware**: Authentication, authorization, audit logging
//! - **DTOs**: Request/Response data transfer objects
//! - **Error Handling**: Consistent error responses
//!
//! Guest-facing routes (browsing, booking, paying, invoices) are public;
//! staff routes (room management, booking oversight) require a JWT with
//! the admin role.
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::{build_state, create_router, config::ApiConfig};
//!
//! let state = build_state(pool, config)?;
//! let app = create_router(state);
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod error;
pub mod middleware;
pub mod handlers;
pub mod dto;
pub mod auth;

use std::sync::Arc;

use axum::{
    middleware as axum_middleware,
    routing::{get, post, put},
    Router,
};
use sqlx::PgPool;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use domain_booking::{BookingLedger, LogNotifier};
use domain_catalog::RoomCatalog;
use domain_invoice::InvoiceGenerator;
use domain_payment::{GatewayConfig, HttpGateway, PaymentService};
use infra_db::{BookingRepository, PaymentOrderRepository, RoomRepository};

use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::handlers::{bookings, health, invoices, payments, rooms};
use crate::middleware::{admin_middleware, audit_middleware, auth_middleware};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: ApiConfig,
    pub catalog: RoomCatalog,
    pub ledger: BookingLedger,
    pub payments: PaymentService,
    pub invoices: InvoiceGenerator,
}

/// Wires the domain services over PostgreSQL repositories
pub fn build_state(pool: PgPool, config: ApiConfig) -> Result<AppState, ApiError> {
    let room_store = Arc::new(RoomRepository::new(pool.clone()));
    let booking_store = Arc::new(BookingRepository::new(pool.clone()));
    let order_store = Arc::new(PaymentOrderRepository::new(pool.clone()));

    let catalog = RoomCatalog::new(room_store.clone());
    let ledger = BookingLedger::new(booking_store, room_store, Arc::new(LogNotifier));

    let mut gateway_config =
        GatewayConfig::new(&config.gateway_key_id, &config.gateway_key_secret);
    if !config.gateway_base_url.is_empty() {
        gateway_config = gateway_config.base_url(&config.gateway_base_url);
    }
    let gateway =
        HttpGateway::new(gateway_config).map_err(|e| ApiError::Internal(e.to_string()))?;

    let payments = PaymentService::new(
        Arc::new(gateway),
        order_store,
        ledger.clone(),
        &config.gateway_key_secret,
    );

    Ok(AppState {
        pool,
        config,
        catalog,
        ledger,
        payments,
        invoices: InvoiceGenerator::default(),
    })
}

/// Creates the main API router
pub fn create_router(state: AppState) -> Router {
    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    // Guest-facing routes
    let guest_routes = Router::new()
        .route("/rooms", get(rooms::list_rooms))
        .route("/rooms/:id", get(rooms::get_room))
        .route("/rooms/:id/availability", get(rooms::check_availability))
        .route("/bookings", post(bookings::create_booking))
        .route("/bookings/:id", get(bookings::get_booking))
        .route("/bookings/:id/payment/order", post(payments::create_order))
        .route("/bookings/:id/payment/verify", post(payments::settle))
        .route("/bookings/:id/invoice", get(invoices::get_invoice));

    // Staff routes (JWT + admin role)
    let admin_routes = Router::new()
        .route("/rooms", get(rooms::list_all_rooms).post(rooms::create_room))
        .route("/rooms/:id", put(rooms::update_room).delete(rooms::delete_room))
        .route("/bookings", get(bookings::list_bookings))
        .route("/bookings/:id/status", put(bookings::update_booking_status))
        .layer(axum_middleware::from_fn(admin_middleware))
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let api_routes = Router::new()
        .merge(guest_routes)
        .nest("/admin", admin_routes)
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            audit_middleware,
        ));

    Router::new()
        .merge(public_routes)
        .nest("/api/v1", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
