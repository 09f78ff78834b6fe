//! Output contract handed to the presentation layer

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The four mutually exclusive conditions the service reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WeatherState {
    Snowing,
    Raining,
    RainierOut,
    Dry,
}

impl WeatherState {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            WeatherState::Snowing => "SNOWING",
            WeatherState::Raining => "RAINING",
            WeatherState::RainierOut => "RAINIER_OUT",
            WeatherState::Dry => "DRY",
        }
    }
}

impl fmt::Display for WeatherState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How complete the upstream data behind a result was
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataStatus {
    /// Both feeds answered
    Fresh,
    /// Only one feed answered
    Stale,
    /// Neither feed answered; the result is the safe default
    Error,
}

impl DataStatus {
    /// Status for a fetch cycle in which `sources` of the two feeds answered
    #[must_use]
    pub fn from_source_count(sources: usize) -> Self {
        match sources {
            0 => DataStatus::Error,
            1 => DataStatus::Stale,
            _ => DataStatus::Fresh,
        }
    }
}

/// Flat record served to the UI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherResult {
    pub state: WeatherState,
    /// Fahrenheit, 0 when unknown
    pub temperature: f64,
    /// Fahrenheit, 0 when unknown
    pub feels_like: f64,
    /// 0 or 100; a flag, not a forecast probability
    pub precipitation_chance: u8,
    /// Statute miles, 0 when unknown
    pub visibility: f64,
    pub timestamp: DateTime<Utc>,
    pub status: DataStatus,
}

impl WeatherResult {
    /// Result to serve when no upstream data could be obtained at all.
    ///
    /// Distinguishable from a measured `DRY` by its `Error` status.
    #[must_use]
    pub fn safe_default(timestamp: DateTime<Utc>) -> Self {
        Self {
            state: WeatherState::Dry,
            temperature: 0.0,
            feels_like: 0.0,
            precipitation_chance: 0,
            visibility: 0.0,
            timestamp,
            status: DataStatus::Error,
        }
    }

    #[must_use]
    pub fn is_safe_default(&self) -> bool {
        self.status == DataStatus::Error
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_serialization() {
        assert_eq!(
            serde_json::to_string(&WeatherState::RainierOut).unwrap(),
            "\"RAINIER_OUT\""
        );
        assert_eq!(WeatherState::Snowing.to_string(), "SNOWING");
    }

    #[test]
    fn test_status_from_source_count() {
        assert_eq!(DataStatus::from_source_count(0), DataStatus::Error);
        assert_eq!(DataStatus::from_source_count(1), DataStatus::Stale);
        assert_eq!(DataStatus::from_source_count(2), DataStatus::Fresh);
    }

    #[test]
    fn test_safe_default_shape() {
        let result = WeatherResult::safe_default(Utc::now());
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["state"], "DRY");
        assert_eq!(json["feelsLike"], 0.0);
        assert_eq!(json["precipitationChance"], 0);
        assert_eq!(json["status"], "error");
        assert!(result.is_safe_default());
    }
}
