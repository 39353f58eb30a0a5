pub mod flight;
pub mod query;

pub use flight::{Aircraft, BaggageAllowance, FlightEndpoint, FlightRecord, PriceBreakdown, ServiceClass};
pub use query::{FlightQuery, SortKey, SortOrder};

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

pub type CoreResult<T> = Result<T, CoreError>;
