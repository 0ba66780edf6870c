//! Session points endpoints.
//!
//! - `POST /api/session/metrics`      — points earned for one session
//! - `GET  /api/points/calculations`  — the formula's constants, verbatim

use axum::response::Json;

use nandi_domain::points::{PointsBreakdown, PointsConstants, SessionMetrics};

use crate::runtime::points;

pub async fn session_metrics(Json(body): Json<SessionMetrics>) -> Json<PointsBreakdown> {
    Json(points::calculate(&body))
}

pub async fn calculations() -> Json<PointsConstants> {
    Json(points::calculation_constants())
}
