use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::{CoreError, CoreResult};

/// One immutable entry in the static flight dataset.
///
/// Wire names are camelCase to match the dataset file. Timestamps stay as the
/// ISO 8601 strings they arrive as; `departure_instant`/`arrival_instant`
/// parse on demand so one malformed stamp degrades instead of failing the
/// whole collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightRecord {
    pub id: String,
    pub airline: String,
    pub airline_code: String,
    pub flight_number: String,
    pub departure: FlightEndpoint,
    pub arrival: FlightEndpoint,
    pub departure_time: String,
    pub arrival_time: String,
    /// Flight time in minutes.
    pub duration: u32,
    pub price: PriceBreakdown,
    pub stops: u32,
    pub aircraft: Aircraft,
    #[serde(rename = "class")]
    pub service_class: ServiceClass,
    pub baggage: BaggageAllowance,
    pub amenities: Vec<String>,
    pub booking_class: String,
    pub available_seats: u32,
    pub refundable: bool,
    pub changeable: bool,
    pub last_updated: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightEndpoint {
    pub airport: String,
    pub airport_code: String,
    pub city: String,
    pub country: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terminal: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gate: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceBreakdown {
    pub base: f64,
    pub currency: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub taxes: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fees: Option<f64>,
    /// Canonical comparison value for price filters and sorting.
    pub total: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Aircraft {
    #[serde(rename = "type")]
    pub type_name: String,
    pub manufacturer: String,
    pub model: String,
}

/// Cabin classes accepted in the dataset.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ServiceClass {
    Economy,
    PremiumEconomy,
    Business,
    First,
}

impl ServiceClass {
    pub fn label(&self) -> &'static str {
        match self {
            ServiceClass::Economy => "Economy",
            ServiceClass::PremiumEconomy => "Premium Economy",
            ServiceClass::Business => "Business",
            ServiceClass::First => "First",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaggageAllowance {
    pub carry_on: bool,
    /// Number of checked bags included in the fare.
    pub checked: u32,
    /// Per-bag weight limit in kg.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_limit: Option<f64>,
}

impl FlightRecord {
    pub fn departure_instant(&self) -> Option<DateTime<FixedOffset>> {
        DateTime::parse_from_rfc3339(&self.departure_time).ok()
    }

    pub fn arrival_instant(&self) -> Option<DateTime<FixedOffset>> {
        DateTime::parse_from_rfc3339(&self.arrival_time).ok()
    }

    /// Invariant checks applied once at load time. Queries never re-validate.
    pub fn validate(&self) -> CoreResult<()> {
        if self.price.total < 0.0 {
            return Err(CoreError::ValidationError(format!(
                "flight {}: negative total price {}",
                self.id, self.price.total
            )));
        }
        if self.duration == 0 {
            return Err(CoreError::ValidationError(format!(
                "flight {}: non-positive duration",
                self.id
            )));
        }
        if let (Some(departure), Some(arrival)) = (self.departure_instant(), self.arrival_instant()) {
            if departure >= arrival {
                return Err(CoreError::ValidationError(format!(
                    "flight {}: departure {} is not before arrival {}",
                    self.id, self.departure_time, self.arrival_time
                )));
            }
        }
        Ok(())
    }
}
