use std::path::Path;

use farelight_core::{CoreError, FlightRecord};
use tracing::info;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Failed to read dataset {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse dataset {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Validation(#[from] CoreError),
}

/// Process-lifetime snapshot of the flight collection.
///
/// Loaded wholesale at startup and never mutated; any failure here aborts
/// startup so the query engine is never invoked over a broken collection.
#[derive(Debug, Clone)]
pub struct FlightDataset {
    records: Vec<FlightRecord>,
}

impl FlightDataset {
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await.map_err(|source| StoreError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let records: Vec<FlightRecord> =
            serde_json::from_slice(&bytes).map_err(|source| StoreError::Parse {
                path: path.display().to_string(),
                source,
            })?;
        let dataset = Self::from_records(records)?;
        info!(path = %path.display(), count = dataset.len(), "flight dataset loaded");
        Ok(dataset)
    }

    /// Validate and freeze an already-deserialized collection.
    pub fn from_records(records: Vec<FlightRecord>) -> Result<Self, StoreError> {
        for record in &records {
            record.validate()?;
        }
        Ok(Self { records })
    }

    pub fn records(&self) -> &[FlightRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<FlightRecord> {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn record_json(id: &str, total: f64) -> serde_json::Value {
        serde_json::json!({
            "id": id,
            "airline": "United Airlines",
            "airlineCode": "UA",
            "flightNumber": "UA523",
            "departure": {
                "airport": "San Francisco International",
                "airportCode": "SFO",
                "city": "San Francisco",
                "country": "United States"
            },
            "arrival": {
                "airport": "John F. Kennedy International",
                "airportCode": "JFK",
                "city": "New York",
                "country": "United States"
            },
            "departureTime": "2024-03-15T08:00:00-07:00",
            "arrivalTime": "2024-03-15T16:30:00-04:00",
            "duration": 330,
            "price": { "base": total, "currency": "USD", "total": total },
            "stops": 0,
            "aircraft": { "type": "Boeing 737-800", "manufacturer": "Boeing", "model": "737-800" },
            "class": "economy",
            "baggage": { "carryOn": true, "checked": 1 },
            "amenities": [],
            "bookingClass": "Y",
            "availableSeats": 20,
            "refundable": false,
            "changeable": true,
            "lastUpdated": "2024-03-01T00:00:00Z"
        })
    }

    #[tokio::test]
    async fn test_load_reads_and_validates_file() {
        let mut file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
        let body = serde_json::json!([record_json("FL001", 292.5), record_json("FL002", 310.0)]);
        write!(file, "{}", body).expect("Failed to write temp file");

        let dataset = FlightDataset::load(file.path()).await.expect("Failed to load dataset");
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.records()[0].id, "FL001");
    }

    #[tokio::test]
    async fn test_missing_file_is_an_io_error() {
        let err = FlightDataset::load("does/not/exist.json").await.unwrap_err();
        assert!(matches!(err, StoreError::Io { .. }));
    }

    #[tokio::test]
    async fn test_malformed_json_is_a_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        let err = FlightDataset::load(file.path()).await.unwrap_err();
        assert!(matches!(err, StoreError::Parse { .. }));
    }

    #[test]
    fn test_invalid_record_is_rejected() {
        let mut value = record_json("FL001", 100.0);
        value["price"]["total"] = serde_json::json!(-1.0);
        let records: Vec<FlightRecord> = serde_json::from_value(serde_json::json!([value])).unwrap();
        let err = FlightDataset::from_records(records).unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));
    }
}
