//! REST API request handlers.

use axum::{
    extract::{Query, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::DearDaysError;
use crate::lunar::{
    check_range, CalendarConverter, CalendarDatesInput, LunarDate, SolarDate, MAX_YEAR, MIN_YEAR,
};

/// Calendar facts never change; successful conversions can be cached for a
/// long time by any intermediary. Errors carry no cache header.
const CACHE_CONTROL_VALUE: &str = "public, max-age=2592000, immutable";

/// Application state shared across handlers.
pub struct ApiState {
    /// Conversion engine.
    pub converter: CalendarConverter,
}

impl ApiState {
    /// Create new API state.
    pub fn new(converter: CalendarConverter) -> Self {
        Self { converter }
    }
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Query parameters for the single-date conversion endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct DateQuery {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    /// Leap-month interpretation for lunar-to-solar conversion.
    #[serde(default)]
    pub leap_month: bool,
}

/// Query parameters for the recurrence endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct RecurrenceQuery {
    pub lunar_month: u32,
    pub lunar_day: u32,
    /// Defaults to the current year.
    #[serde(default)]
    pub from_year: Option<i32>,
    /// Defaults to `from_year + 9`.
    #[serde(default)]
    pub to_year: Option<i32>,
}

/// Success envelope.
#[derive(Debug, Serialize)]
pub struct SuccessResponse<T: Serialize> {
    pub success: bool,
    pub data: T,
}

/// Error response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

/// Candidate list payload.
#[derive(Debug, Serialize)]
pub struct CandidatesResponse {
    pub candidates: Vec<crate::lunar::ConversionCandidate>,
}

// ============================================================================
// Handler Functions
// ============================================================================

/// GET /api/v1/convert/solar-to-lunar - Convert a solar date to lunar.
pub async fn solar_to_lunar_handler(
    State(state): State<Arc<ApiState>>,
    Query(params): Query<DateQuery>,
) -> Response {
    let date = match validated_solar(&params) {
        Ok(date) => date,
        Err(response) => return response,
    };
    match state.converter.solar_to_lunar(date).await {
        Ok(conversion) => cacheable_ok(conversion),
        Err(e) => error_response(e),
    }
}

/// GET /api/v1/convert/lunar-to-solar - Convert a lunar date to solar under
/// one leap interpretation.
pub async fn lunar_to_solar_handler(
    State(state): State<Arc<ApiState>>,
    Query(params): Query<DateQuery>,
) -> Response {
    let date = match validated_lunar(&params) {
        Ok(date) => date,
        Err(response) => return response,
    };
    match state.converter.lunar_to_solar(date, params.leap_month).await {
        Ok(solar) => cacheable_ok(solar),
        Err(e) => error_response(e),
    }
}

/// GET /api/v1/convert/candidates - Resolve a lunar date into its solar
/// candidate set (0, 1, or 2 entries; empty is a valid outcome).
pub async fn candidates_handler(
    State(state): State<Arc<ApiState>>,
    Query(params): Query<DateQuery>,
) -> Response {
    let date = match validated_lunar(&params) {
        Ok(date) => date,
        Err(response) => return response,
    };
    let candidates = state.converter.lunar_to_solar_candidates(date).await;
    cacheable_ok(CandidatesResponse { candidates })
}

/// POST /api/v1/convert/resolve - Resolve an event date into its
/// dual-calendar representation.
pub async fn resolve_handler(
    State(state): State<Arc<ApiState>>,
    Json(input): Json<CalendarDatesInput>,
) -> Response {
    match state.converter.convert_calendar_dates(input).await {
        Ok(resolved) => ok(resolved),
        Err(e) => error_response(e),
    }
}

/// GET /api/v1/recurrence - Every solar occurrence of a fixed lunar
/// (month, day) pair across a year range.
pub async fn recurrence_handler(
    State(state): State<Arc<ApiState>>,
    Query(params): Query<RecurrenceQuery>,
) -> Response {
    if let Err(response) = validate_recurrence(&params) {
        return response;
    }
    let from_year = params.from_year.unwrap_or_else(current_year);
    let to_year = params.to_year.unwrap_or(from_year + 9);

    match state
        .converter
        .find_lunar_date_range(params.lunar_month, params.lunar_day, from_year, to_year)
        .await
    {
        Ok(matches) => cacheable_ok(matches),
        Err(e) => error_response(e),
    }
}

/// GET /api/v1/health - Liveness probe.
pub async fn health_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

// ============================================================================
// Validation & response helpers
// ============================================================================

fn validated_solar(params: &DateQuery) -> Result<SolarDate, Response> {
    SolarDate::new(params.year, params.month, params.day)
        .map_err(|e| error_response(DearDaysError::Validation(e)))
}

fn validated_lunar(params: &DateQuery) -> Result<LunarDate, Response> {
    LunarDate::new(params.year, params.month, params.day)
        .map_err(|e| error_response(DearDaysError::Validation(e)))
}

fn validate_recurrence(params: &RecurrenceQuery) -> Result<(), Response> {
    let checks = [
        check_range("lunar_month", i64::from(params.lunar_month), 1, 12),
        check_range("lunar_day", i64::from(params.lunar_day), 1, 31),
        check_range(
            "from_year",
            i64::from(params.from_year.unwrap_or_else(current_year)),
            i64::from(MIN_YEAR),
            i64::from(MAX_YEAR),
        ),
        check_range(
            "to_year",
            i64::from(params.to_year.unwrap_or_else(|| current_year() + 9)),
            i64::from(MIN_YEAR),
            i64::from(MAX_YEAR),
        ),
    ];
    for check in checks {
        check.map_err(|e| error_response(DearDaysError::Validation(e)))?;
    }
    Ok(())
}

fn current_year() -> i32 {
    use chrono::Datelike;
    chrono::Utc::now().year()
}

fn ok<T: Serialize>(data: T) -> Response {
    (
        StatusCode::OK,
        Json(SuccessResponse {
            success: true,
            data,
        }),
    )
        .into_response()
}

fn cacheable_ok<T: Serialize>(data: T) -> Response {
    let mut response = ok(data);
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        HeaderValue::from_static(CACHE_CONTROL_VALUE),
    );
    response
}

/// Map a failure to an HTTP response: caller mistakes are 400, upstream
/// service failures are 502, everything else 500. Error responses are never
/// cacheable.
fn error_response(error: DearDaysError) -> Response {
    let (status, code) = match &error {
        DearDaysError::Validation(_) => (StatusCode::BAD_REQUEST, "validation_failed"),
        DearDaysError::Service(_) => (StatusCode::BAD_GATEWAY, "date_service_failed"),
        _ => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
    };
    (
        status,
        Json(ErrorResponse {
            error: error.to_string(),
            code: code.to_string(),
        }),
    )
        .into_response()
}
