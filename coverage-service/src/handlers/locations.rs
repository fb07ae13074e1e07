//! The one data route: `/api/v1.0/locations`.

use crate::services::metrics::COVERAGE_REQUESTS_TOTAL;
use crate::startup::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

/// Serve the filtered coverage rows as a JSON array.
///
/// Query failures are recovered here and reported as an `{"error": ...}`
/// envelope in a 200 body, matching the contract the map script was built
/// against.
pub async fn get_locations(State(state): State<AppState>) -> impl IntoResponse {
    match state.db.get_locations().await {
        Ok(locations) => {
            COVERAGE_REQUESTS_TOTAL.with_label_values(&["ok"]).inc();
            (StatusCode::OK, Json(json!(locations)))
        }
        Err(e) => {
            COVERAGE_REQUESTS_TOTAL.with_label_values(&["error"]).inc();
            tracing::error!("Coverage query failed: {}", e);
            (StatusCode::OK, Json(json!({ "error": e.to_string() })))
        }
    }
}
