use std::sync::Arc;

use farelight_chat::ChatOrchestrator;
use farelight_core::FlightRecord;
use farelight_engine::FlightQueryEngine;

/// Shared handles for request handlers. The record collection is frozen at
/// startup; concurrent reads need no locking because no writer exists.
#[derive(Clone)]
pub struct AppState {
    pub records: Arc<Vec<FlightRecord>>,
    pub engine: Arc<FlightQueryEngine>,
    pub chat: Arc<ChatOrchestrator>,
}
