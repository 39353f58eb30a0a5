pub mod app_config;
pub mod dataset;

pub use dataset::{FlightDataset, StoreError};
