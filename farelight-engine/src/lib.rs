pub mod engine;
pub mod render;

pub use engine::{EngineConfig, FlightQueryEngine};
pub use render::NO_RESULTS_MESSAGE;
