pub mod admin;
pub mod auth;
pub mod chat;
pub mod points;

use axum::middleware;
use axum::routing::{get, post};
use axum::Router;

use crate::state::AppState;

/// Build the full API router.
///
/// `/health` is public; everything under `/api` sits behind the
/// bearer-token middleware. `state` is needed to wire up the auth
/// middleware at build time.
pub fn router(state: AppState) -> Router<AppState> {
    let public = Router::new().route("/health", get(health));

    let protected = Router::new()
        // Chat
        .route("/api/chat/generate", post(chat::generate))
        // Points
        .route("/api/session/metrics", post(points::session_metrics))
        .route("/api/points/calculations", get(points::calculations))
        // Admin
        .route("/api/admin/prompts/refresh", post(admin::refresh_prompts))
        .layer(middleware::from_fn_with_state(
            state,
            auth::require_api_token,
        ));

    public.merge(protected)
}

async fn health() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({ "status": "healthy" }))
}
