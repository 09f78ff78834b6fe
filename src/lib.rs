//! Rain or Rainier - Seattle weather and Mount Rainier visibility
//!
//! This library combines the NWS station observation and the METAR report
//! for Sea-Tac into one normalized parameter set, decides whether Mount
//! Rainier can be seen from the city, and classifies the current weather
//! into one of four states.

pub mod api;
pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod telemetry;
pub mod weather;
pub mod web;

// Re-export core types for public API
pub use config::RainierConfig;
pub use engine::{
    Evaluation, Interpretation, VisibilityVerdict, evaluate_bundle, interpret, weather_result,
};
pub use error::RainierError;
pub use models::{
    DataStatus, NormalizedParameters, RawAviationReading, RawObservationBundle,
    RawStationReading, WeatherResult, WeatherState,
};
pub use weather::{HttpObservationProvider, ObservationProvider};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, RainierError>;
