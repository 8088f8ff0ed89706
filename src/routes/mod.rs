//! HTTP route handlers.
//!
//! Evaluations are pure functions of their input, so successful responses
//! carry a long Cache-Control lifetime. Errors set their own `no-store`
//! header, which the per-route layers leave untouched.
//!
//! Request tracing is enabled via middleware that assigns a request ID to
//! each incoming request, allowing correlation of all logs within a request.

pub mod bmi;
pub mod health;

use axum::{
    http::{
        header::{HeaderValue, CACHE_CONTROL},
        Uri,
    },
    handler::Handler,
    middleware,
    routing::get,
    Extension, Router,
};
use tower_http::set_header::SetResponseHeaderLayer;

use crate::config::{CACHE_CONTROL_BMI, CACHE_CONTROL_CATEGORIES};
use crate::error::{AppError, AppErrorResponse};
use crate::middleware::{request_id_layer, RequestId};

/// Creates the Axum router with all routes and cache headers.
pub fn create_router() -> Router {
    // Only GET is cacheable; shared caches do not store POST responses
    let bmi_routes = Router::new().route(
        "/api/bmi",
        get(bmi::from_query.layer(SetResponseHeaderLayer::if_not_present(
            CACHE_CONTROL,
            HeaderValue::from_static(CACHE_CONTROL_BMI),
        )))
        .post(bmi::from_body),
    );

    let category_routes = Router::new()
        .route("/api/bmi/categories", get(bmi::categories))
        .layer(SetResponseHeaderLayer::if_not_present(
            CACHE_CONTROL,
            HeaderValue::from_static(CACHE_CONTROL_CATEGORIES),
        ));

    // Health check - no caching, always fresh for liveness probes
    let health_routes = Router::new().route("/health", get(health::health));

    Router::new()
        .merge(bmi_routes)
        .merge(category_routes)
        .merge(health_routes)
        .fallback(not_found)
        // Request ID middleware - creates root span with request_id for correlation
        .layer(middleware::from_fn(request_id_layer))
}

async fn not_found(Extension(request_id): Extension<RequestId>, uri: Uri) -> AppErrorResponse {
    tracing::debug!(path = %uri.path(), "No route matched");
    AppErrorResponse {
        error: AppError::NotFound(uri.path().to_string()),
        request_id: Some(request_id.0),
    }
}
