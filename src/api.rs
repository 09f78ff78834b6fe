use std::sync::Arc;

use axum::{Router, extract::State, response::Json, routing::get};
use serde::Serialize;

use crate::{
    VERSION,
    engine::VisibilityVerdict,
    models::{WeatherResult, WeatherState},
    weather::{self, ObservationProvider},
};

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    provider: Arc<dyn ObservationProvider>,
}

impl AppState {
    pub fn new(provider: Arc<dyn ObservationProvider>) -> Self {
        Self { provider }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogicCheck {
    pub has_precipitation: bool,
    pub state: WeatherState,
}

#[derive(Serialize)]
pub struct WeatherDiagnostics {
    pub message: &'static str,
    pub data: WeatherResult,
    pub logic_check: LogicCheck,
    /// Absent when no upstream data was available
    pub visibility: Option<VisibilityVerdict>,
}

#[derive(Serialize)]
pub struct Health {
    pub status: &'static str,
    pub version: &'static str,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/weather", get(get_weather))
        .route("/test-weather", get(get_test_weather))
        .route("/health", get(get_health))
        .with_state(state)
}

async fn get_weather(State(state): State<AppState>) -> Json<WeatherResult> {
    let evaluation = weather::evaluate_current(state.provider.as_ref()).await;
    Json(evaluation.result)
}

async fn get_test_weather(State(state): State<AppState>) -> Json<WeatherDiagnostics> {
    let evaluation = weather::evaluate_current(state.provider.as_ref()).await;
    let data = evaluation.result;

    Json(WeatherDiagnostics {
        message: "Weather Data Verification",
        logic_check: LogicCheck {
            has_precipitation: data.precipitation_chance > 0,
            state: data.state,
        },
        data,
        visibility: evaluation.interpretation.map(|i| i.verdict),
    })
}

async fn get_health() -> Json<Health> {
    Json(Health {
        status: "ok",
        version: VERSION,
    })
}
