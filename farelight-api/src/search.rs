use axum::{extract::State, Json};
use farelight_core::FlightQuery;
use farelight_engine::render;
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub count: usize,
    pub summary: String,
}

/// Deterministic search surface: same engine the chat tool uses, minus the
/// model in the middle.
pub async fn search_flights(
    State(state): State<AppState>,
    Json(query): Json<FlightQuery>,
) -> Json<SearchResponse> {
    let matches = state.engine.evaluate(&state.records, &query);
    let count = matches.len();
    let summary = render::render_results(&matches);
    Json(SearchResponse { count, summary })
}
