//! Data models for the Rain or Rainier service
//!
//! This module contains the domain models organized by pipeline stage:
//! - Observation: raw readings as the NWS and METAR feeds deliver them
//! - Parameters: the unit-normalized intermediate representation
//! - Result: the record served to the presentation layer

pub mod observation;
pub mod parameters;
pub mod result;

// Re-export all public types for convenient access
pub use observation::{
    AviationCloudLayer, MetarVisibility, Quantity, RawAviationReading, RawObservationBundle,
    RawStationReading, StationCloudLayer, StationObservation,
};
pub use parameters::NormalizedParameters;
pub use result::{DataStatus, WeatherResult, WeatherState};
