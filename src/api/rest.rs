//! REST API router and configuration.

use std::sync::Arc;

use axum::{
    http::{header, Method},
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};

use crate::api::handlers::{
    candidates_handler, health_handler, lunar_to_solar_handler, recurrence_handler,
    resolve_handler, solar_to_lunar_handler, ApiState,
};
use crate::lunar::CalendarConverter;

/// REST API configuration.
#[derive(Debug, Clone)]
pub struct RestApiConfig {
    /// Enable CORS.
    pub enable_cors: bool,
    /// Allowed origins for CORS.
    pub cors_origins: Vec<String>,
    /// API prefix (e.g., "/api/v1").
    pub prefix: String,
}

impl Default for RestApiConfig {
    fn default() -> Self {
        Self {
            enable_cors: true,
            cors_origins: vec!["*".to_string()],
            prefix: "/api/v1".to_string(),
        }
    }
}

/// Create the REST API router.
///
/// Endpoints:
/// - GET  /api/v1/convert/solar-to-lunar  - Solar date to lunar
/// - GET  /api/v1/convert/lunar-to-solar  - Lunar date to solar
/// - GET  /api/v1/convert/candidates      - Lunar date to solar candidate set
/// - POST /api/v1/convert/resolve         - Dual-calendar event date resolution
/// - GET  /api/v1/recurrence              - Recurring lunar date over a year range
/// - GET  /api/v1/health                  - Liveness probe
pub fn create_rest_router(converter: CalendarConverter, config: &RestApiConfig) -> Router {
    let state = Arc::new(ApiState::new(converter));

    let api_routes = Router::new()
        .route("/convert/solar-to-lunar", get(solar_to_lunar_handler))
        .route("/convert/lunar-to-solar", get(lunar_to_solar_handler))
        .route("/convert/candidates", get(candidates_handler))
        .route("/convert/resolve", post(resolve_handler))
        .route("/recurrence", get(recurrence_handler))
        .route("/health", get(health_handler))
        .with_state(state);

    // Build the full router with prefix
    let router = Router::new().nest(&config.prefix, api_routes);

    // Add CORS if enabled
    if config.enable_cors {
        let cors = CorsLayer::new()
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE])
            .allow_origin(Any);

        router.layer(cors)
    } else {
        router
    }
}
