use std::sync::Arc;

use farelight_core::{FlightQuery, FlightRecord};
use farelight_engine::FlightQueryEngine;
use serde_json::{json, Value};
use tracing::info;

use crate::ChatError;

pub const SEARCH_FLIGHTS_TOOL: &str = "search_flights";

/// The one capability exposed to the model: query the static flight dataset.
pub struct FlightSearchTool {
    engine: FlightQueryEngine,
    records: Arc<Vec<FlightRecord>>,
}

impl FlightSearchTool {
    pub fn new(engine: FlightQueryEngine, records: Arc<Vec<FlightRecord>>) -> Self {
        Self { engine, records }
    }

    /// OpenAI function definition advertised on every model turn.
    pub fn definition() -> Value {
        json!({
            "type": "function",
            "function": {
                "name": SEARCH_FLIGHTS_TOOL,
                "description": "Search for flights based on various criteria like price, airline, stops, duration, departure/arrival cities, and more.",
                "parameters": {
                    "type": "object",
                    "properties": {
                        "maxPrice": { "type": "number", "description": "Maximum price in USD" },
                        "minPrice": { "type": "number", "description": "Minimum price in USD" },
                        "airline": { "type": "string", "description": "Specific airline name (e.g., \"United Airlines\", \"Delta Air Lines\")" },
                        "maxStops": { "type": "integer", "description": "Maximum number of stops (0 for direct flights)" },
                        "maxDuration": { "type": "integer", "description": "Maximum flight duration in minutes" },
                        "departureCity": { "type": "string", "description": "Departure city or airport code" },
                        "arrivalCity": { "type": "string", "description": "Arrival city or airport code" },
                        "sortBy": { "type": "string", "enum": ["price", "duration", "departure_time", "arrival_time"], "description": "Sort results by this criteria" },
                        "sortOrder": { "type": "string", "enum": ["asc", "desc"], "description": "Sort order - ascending or descending" },
                        "limit": { "type": "integer", "description": "Maximum number of results to return (default: 10)" }
                    }
                }
            }
        })
    }

    /// Execute a tool call against the frozen dataset.
    ///
    /// A shape error in the arguments is the caller's validation boundary:
    /// it is reported back as an error, not a panic, so the orchestrator can
    /// relay it to the model as the tool result.
    pub fn execute(&self, arguments: &Value) -> Result<String, ChatError> {
        let query: FlightQuery = serde_json::from_value(arguments.clone())
            .map_err(|e| ChatError::InvalidToolArguments(e.to_string()))?;
        info!(target = "flight_tool", ?query, "search_flights invoked");
        Ok(self.engine.search(&self.records, &query))
    }
}
