//! Result assembler: the only place unknown readings become zero

use chrono::{DateTime, Utc};

use crate::models::{DataStatus, NormalizedParameters, WeatherResult, WeatherState};

#[must_use]
pub fn assemble(
    state: WeatherState,
    params: &NormalizedParameters,
    status: DataStatus,
    timestamp: DateTime<Utc>,
) -> WeatherResult {
    WeatherResult {
        state,
        temperature: params.temperature.unwrap_or(0.0),
        feels_like: params.feels_like.unwrap_or(0.0),
        precipitation_chance: if params.has_precipitation { 100 } else { 0 },
        visibility: params.visibility_miles.unwrap_or(0.0),
        timestamp,
        status,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknowns_become_zero() {
        let now = Utc::now();
        let result = assemble(
            WeatherState::Dry,
            &NormalizedParameters::unknown(),
            DataStatus::Stale,
            now,
        );

        assert_eq!(result.temperature, 0.0);
        assert_eq!(result.feels_like, 0.0);
        assert_eq!(result.visibility, 0.0);
        assert_eq!(result.precipitation_chance, 0);
        assert_eq!(result.timestamp, now);
        assert!(!result.is_safe_default());
    }

    #[test]
    fn test_precipitation_is_all_or_nothing() {
        let params = NormalizedParameters {
            has_precipitation: true,
            temperature: Some(41.0),
            feels_like: Some(36.5),
            visibility_miles: Some(3.0),
            ..Default::default()
        };
        let result = assemble(WeatherState::Raining, &params, DataStatus::Fresh, Utc::now());

        assert_eq!(result.precipitation_chance, 100);
        assert_eq!(result.temperature, 41.0);
        assert_eq!(result.feels_like, 36.5);
        assert_eq!(result.visibility, 3.0);
    }
}
