//! API error handling
//!
//! Every domain error maps onto one HTTP surface here; handlers use `?`
//! and never build status codes themselves.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use core_kernel::PortError;
use domain_booking::BookingError;
use domain_catalog::CatalogError;
use domain_invoice::InvoiceError;
use domain_payment::PaymentError;

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Upstream gateway error: {0}")]
    BadGateway(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match &self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg.clone()),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg.clone()),
            ApiError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "unauthorized",
                "Unauthorized".to_string(),
            ),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, "forbidden", msg.clone()),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, "conflict", msg.clone()),
            ApiError::BadGateway(msg) => (StatusCode::BAD_GATEWAY, "bad_gateway", msg.clone()),
            ApiError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                msg.clone(),
            ),
            ApiError::Validation(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "validation_error",
                msg.clone(),
            ),
        };

        let body = ErrorResponse {
            error: error_type.to_string(),
            message,
        };

        (status, Json(body)).into_response()
    }
}

impl From<PortError> for ApiError {
    fn from(err: PortError) -> Self {
        if err.is_not_found() {
            ApiError::NotFound(err.to_string())
        } else if err.is_conflict() {
            ApiError::Conflict(err.to_string())
        } else {
            ApiError::Internal(err.to_string())
        }
    }
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::RoomNotFound(_) => ApiError::NotFound(err.to_string()),
            CatalogError::RoomInUse(_) => ApiError::Conflict(err.to_string()),
            CatalogError::Validation(msg) => ApiError::Validation(msg),
            CatalogError::Store(e) => e.into(),
        }
    }
}

impl From<BookingError> for ApiError {
    fn from(err: BookingError) -> Self {
        match err {
            BookingError::RoomNotFound(_) | BookingError::BookingNotFound(_) => {
                ApiError::NotFound(err.to_string())
            }
            BookingError::InvalidDateRange(_) => ApiError::BadRequest(err.to_string()),
            BookingError::RoomUnavailable { .. }
            | BookingError::RoomNotOffered(_)
            | BookingError::InvalidStatusTransition { .. }
            | BookingError::InvalidPaymentTransition { .. } => {
                ApiError::Conflict(err.to_string())
            }
            BookingError::Validation(msg) => ApiError::Validation(msg),
            BookingError::Store(e) => e.into(),
        }
    }
}

impl From<PaymentError> for ApiError {
    fn from(err: PaymentError) -> Self {
        match err {
            PaymentError::GatewayUnavailable(_) | PaymentError::GatewayRejected(_) => {
                ApiError::BadGateway(err.to_string())
            }
            PaymentError::VerificationFailed(_) => ApiError::BadRequest(err.to_string()),
            PaymentError::AlreadyPaid => ApiError::Conflict(err.to_string()),
            PaymentError::UnknownOrder(_) => ApiError::NotFound(err.to_string()),
            PaymentError::Booking(e) => e.into(),
            PaymentError::Store(e) => e.into(),
        }
    }
}

impl From<InvoiceError> for ApiError {
    fn from(err: InvoiceError) -> Self {
        match err {
            InvoiceError::BookingNotPaid(_) => ApiError::Conflict(err.to_string()),
            InvoiceError::PaymentMismatch { .. } | InvoiceError::RoomMismatch(_) => {
                ApiError::BadRequest(err.to_string())
            }
        }
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        ApiError::Internal(err.to_string())
    }
}
