//! Weather state classifier

use crate::engine::visibility::{self, VisibilityVerdict};
use crate::models::{NormalizedParameters, WeatherState};

/// At or below this temperature (Fahrenheit) precipitation counts as snow
pub const FREEZING_F: f64 = 32.0;

/// Pick the state for a parameter set, evaluating visibility only when it
/// can matter.
#[must_use]
pub fn classify(params: &NormalizedParameters) -> WeatherState {
    select_state(params, || visibility::evaluate(params).is_visible)
}

/// Same as [`classify`], reusing a verdict already computed for `params`.
#[must_use]
pub fn classify_with_verdict(
    params: &NormalizedParameters,
    verdict: &VisibilityVerdict,
) -> WeatherState {
    select_state(params, || verdict.is_visible)
}

fn select_state(params: &NormalizedParameters, rainier_visible: impl Fn() -> bool) -> WeatherState {
    match (params.has_precipitation, params.temperature) {
        (true, Some(t)) if t <= FREEZING_F => WeatherState::Snowing,
        (true, Some(_)) => WeatherState::Raining,
        // Precipitation with no temperature falls through to DRY
        (true, None) => WeatherState::Dry,
        (false, _) if rainier_visible() => WeatherState::RainierOut,
        (false, _) => WeatherState::Dry,
    }
}
