use axum::{
    extract::{Path, State},
    Extension, Json,
};
use checkopen_core::VenueStatus;
use checkopen_scraper::ScraperError;

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, AppState, ResponseMeta};

pub(super) async fn get_status(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(venue_id): Path<String>,
) -> Result<Json<ApiResponse<VenueStatus>>, ApiError> {
    let status = state
        .client
        .lookup(&venue_id)
        .await
        .map_err(|e| map_lookup_error(req_id.0.clone(), &venue_id, &e))?;

    Ok(Json(ApiResponse {
        data: status,
        meta: ResponseMeta::new(req_id.0),
    }))
}

fn map_lookup_error(request_id: String, venue_id: &str, error: &ScraperError) -> ApiError {
    if matches!(error, ScraperError::InvalidVenueId) {
        return ApiError::new(request_id, "bad_request", "venue id must not be empty");
    }

    tracing::warn!(venue_id, error = %error, "venue lookup failed");

    match error.last_attempt_error() {
        ScraperError::UnexpectedStatus { status: 404, .. } => ApiError::new(
            request_id,
            "upstream_not_found",
            format!("venue {venue_id} was not found upstream"),
        ),
        ScraperError::RateLimited { .. } => ApiError::new(
            request_id,
            "upstream_rate_limited",
            "upstream site is rate limiting requests; try again later",
        ),
        _ => ApiError::new(request_id, "upstream_error", "venue lookup failed"),
    }
}
