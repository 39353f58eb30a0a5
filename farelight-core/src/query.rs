use serde::{Deserialize, Serialize};

/// Structured filter/sort/limit request passed to the query engine.
///
/// Every criterion is optional; absent fields impose no constraint. The wire
/// shape is the camelCase argument object of the `search_flights` tool.
/// `max_stops: Some(0)` means "direct flights only" and is distinct from the
/// field being absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FlightQuery {
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    /// Case-insensitive substring match against the airline name.
    pub airline: Option<String>,
    pub max_stops: Option<u32>,
    /// Upper bound on flight time in minutes.
    pub max_duration: Option<u32>,
    /// Matches departure city name or airport code.
    pub departure_city: Option<String>,
    /// Matches arrival city name or airport code.
    pub arrival_city: Option<String>,
    pub sort_by: SortKey,
    pub sort_order: SortOrder,
    /// Result cap. Falls back to the engine's configured default when absent.
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    Price,
    Duration,
    DepartureTime,
    ArrivalTime,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}
