//! Chat endpoint.
//!
//! `POST /api/chat/generate` runs the full pipeline: cache probe, persona
//! prompt assembly, provider call, quality-tag extraction. The handler
//! always answers 200 with a well-formed [`ChatResponse`] — provider
//! failures surface as persona fallback text, never as an error body.

use axum::extract::State;
use axum::response::Json;

use nandi_domain::chat::{ChatRequest, ChatResponse};

use crate::state::AppState;

pub async fn generate(
    State(state): State<AppState>,
    Json(body): Json<ChatRequest>,
) -> Json<ChatResponse> {
    Json(state.chat.generate(&body).await)
}
