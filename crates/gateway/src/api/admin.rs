//! Administrative endpoints.
//!
//! `POST /api/admin/prompts/refresh` reloads the prompt catalog from its
//! backing file. This is the one operation whose failure is reported to
//! the caller instead of being absorbed: the admin needs to know whether
//! the refresh took effect.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};

use crate::state::AppState;

pub async fn refresh_prompts(State(state): State<AppState>) -> Response {
    match state.catalog.refresh() {
        Ok(()) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "status": "success",
                "message": "Prompts refreshed successfully"
            })),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "prompt refresh failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({ "error": e.to_string() })),
            )
                .into_response()
        }
    }
}
