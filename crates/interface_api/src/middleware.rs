//! API middleware

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    middleware::Next,
    response::Response,
};
use chrono::Utc;
use tracing::{info, warn};

use crate::auth::{self, Claims};
use crate::AppState;

/// Authentication middleware for staff routes
///
/// Validates JWT tokens and attaches the claims to the request. The claims
/// are echoed onto the response extensions so layers outside this one (the
/// audit log) can attribute the request.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, StatusCode> {
    let auth_header = request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok());

    let token = match auth_header {
        Some(header) if header.starts_with("Bearer ") => &header[7..],
        _ => {
            warn!("Missing or invalid Authorization header");
            return Err(StatusCode::UNAUTHORIZED);
        }
    };

    match auth::validate_token(token, &state.config.jwt_secret) {
        Ok(claims) => {
            request.extensions_mut().insert(claims.clone());
            let mut response = next.run(request).await;
            response.extensions_mut().insert(claims);
            Ok(response)
        }
        Err(e) => {
            warn!("Token validation failed: {:?}", e);
            Err(StatusCode::UNAUTHORIZED)
        }
    }
}

/// Requires the admin role on an authenticated request
///
/// Must run after `auth_middleware` so the claims are present.
pub async fn admin_middleware(
    request: Request<Body>,
    next: Next,
) -> Result<Response, StatusCode> {
    let is_admin = request
        .extensions()
        .get::<Claims>()
        .map(|c| auth::has_role(c, auth::roles::ADMIN))
        .unwrap_or(false);

    if !is_admin {
        warn!("Admin role required");
        return Err(StatusCode::FORBIDDEN);
    }
    Ok(next.run(request).await)
}

/// Audit logging middleware
///
/// Logs all API requests for compliance and debugging. Runs outside the
/// auth layer, so authenticated identity is read back off the response
/// extensions where `auth_middleware` places it.
pub async fn audit_middleware(
    State(_state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let user_id = request.extensions().get::<Claims>().map(|c| c.sub.clone());

    let start = Utc::now();

    let response = next.run(request).await;

    let duration = Utc::now() - start;
    let status = response.status();
    let user_id = user_id
        .or_else(|| response.extensions().get::<Claims>().map(|c| c.sub.clone()))
        .unwrap_or_else(|| "anonymous".to_string());

    info!(
        method = %method,
        uri = %uri,
        user = %user_id,
        status = %status.as_u16(),
        duration_ms = duration.num_milliseconds(),
        "API request"
    );

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{middleware::from_fn_with_state, routing::get, Router};
    use tower::ServiceExt;

    use crate::auth;
    use crate::build_state;
    use crate::config::ApiConfig;

    fn test_state() -> AppState {
        let config = ApiConfig::default();
        let pool = sqlx::PgPool::connect_lazy(&config.database_url).unwrap();
        build_state(pool, config).unwrap()
    }

    fn authed_router(state: AppState) -> Router {
        Router::new()
            .route("/ping", get(|| async { "pong" }))
            .layer(from_fn_with_state(state.clone(), auth_middleware))
            .with_state(state)
    }

    #[tokio::test]
    async fn test_auth_exposes_claims_to_outer_layers() {
        let state = test_state();
        let token = auth::create_token(
            "staff-7",
            vec!["staff".to_string()],
            &state.config.jwt_secret,
            600,
        )
        .unwrap();
        let app = authed_router(state);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/ping")
                    .header("Authorization", format!("Bearer {token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        // The audit layer runs outside auth and attributes the request
        // from the response extensions
        let claims = response.extensions().get::<Claims>().unwrap();
        assert_eq!(claims.sub, "staff-7");
    }

    #[tokio::test]
    async fn test_missing_token_rejected() {
        let app = authed_router(test_state());

        let response = app
            .oneshot(Request::builder().uri("/ping").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(response.extensions().get::<Claims>().is_none());
    }
}
