//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{Json, extract::State};

use crate::{infrastructure::dto::http::VisitorCountDto, ui::state::AppState};

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Current visitor count (polling fallback for the realtime channel)
pub async fn visitor_count(State(state): State<Arc<AppState>>) -> Json<VisitorCountDto> {
    Json(state.get_visitor_count_usecase.execute().into())
}
