//! Normalized parameter set shared by the evaluator and the classifier

use serde::{Deserialize, Serialize};

/// Unit-normalized readings merged from both feeds.
///
/// `None` means "no data" and is never interchangeable with a measured zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedParameters {
    /// Horizontal visibility in statute miles
    pub visibility_miles: Option<f64>,
    /// Height AGL of the lowest broken or overcast layer, in feet
    pub cloud_ceiling_ft: Option<f64>,
    /// Maximum layer coverage, 0-100
    pub cloud_cover_pct: Option<f64>,
    pub has_precipitation: bool,
    /// Relative humidity, 0-100
    pub humidity_pct: Option<f64>,
    /// Free-text description, diagnostic only
    pub weather_description: Option<String>,
    /// Temperature in Fahrenheit
    pub temperature: Option<f64>,
    /// Apparent temperature in Fahrenheit
    pub feels_like: Option<f64>,
}

impl NormalizedParameters {
    /// All fields unknown, no precipitation
    #[must_use]
    pub fn unknown() -> Self {
        Self::default()
    }
}
