//! The one data route: `/api/v1.0/locations`.

use crate::services::metrics::LOCATIONS_REQUESTS_TOTAL;
use crate::startup::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

/// Serve the joined/filtered locations as a JSON array.
///
/// Query failures are recovered at this boundary and reported as an
/// `{"error": ...}` envelope in a 200 body. The transport status does not
/// reflect the failure; that is the contract the map pages were built
/// against.
pub async fn get_locations(State(state): State<AppState>) -> impl IntoResponse {
    match state.db.get_locations().await {
        Ok(locations) => {
            LOCATIONS_REQUESTS_TOTAL.with_label_values(&["ok"]).inc();
            (StatusCode::OK, Json(json!(locations)))
        }
        Err(e) => {
            LOCATIONS_REQUESTS_TOTAL.with_label_values(&["error"]).inc();
            tracing::error!("Locations query failed: {}", e);
            (StatusCode::OK, Json(json!({ "error": e.to_string() })))
        }
    }
}
