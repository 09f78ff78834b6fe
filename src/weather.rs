//! Upstream observation fetching
//!
//! Pulls the latest NWS station observation and METAR report concurrently
//! and hands whatever arrived to the interpretation engine. A failing feed
//! is logged and treated as absent; it never aborts an evaluation.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use chrono::Utc;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};
use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument, warn};

use crate::config::RainierConfig;
use crate::engine::{self, Evaluation};
use crate::models::{
    RawAviationReading, RawObservationBundle, RawStationReading, StationObservation,
};
use crate::{RainierError, Result, VERSION};

/// Source of the two raw readings
#[async_trait]
pub trait ObservationProvider: Send + Sync {
    /// Latest primary station reading; `Ok(None)` when the feed answered
    /// without one
    async fn station_reading(&self) -> Result<Option<RawStationReading>>;

    /// Latest METAR report; `Ok(None)` when the feed returned no reports
    async fn aviation_reading(&self) -> Result<Option<RawAviationReading>>;
}

/// Provider backed by the public NWS and aviationweather.gov APIs
#[derive(Clone)]
pub struct HttpObservationProvider {
    client: ClientWithMiddleware,
    nws_url: String,
    metar_url: String,
}

impl HttpObservationProvider {
    pub fn new(config: &RainierConfig) -> Result<Self> {
        let timeout = Duration::from_secs(config.http.timeout_seconds.into());

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(format!(
                "RainOrRainier/{VERSION} ({})",
                config.stations.contact_email
            ))
            .build()?;

        let retry_policy =
            ExponentialBackoff::builder().build_with_max_retries(config.http.max_retries);
        let client = ClientBuilder::new(client)
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build();

        Ok(Self {
            client,
            nws_url: config.stations.nws_url.clone(),
            metar_url: config.stations.metar_url.clone(),
        })
    }

    #[instrument(skip(self))]
    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let start_time = Instant::now();

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(RainierError::api(format!("{url} responded with {status}")));
        }

        let body = response
            .json::<T>()
            .await
            .map_err(|e| RainierError::parse(format!("Invalid payload from {url}: {e}")))?;

        debug!(
            "Fetched {} in {:.3}s",
            url,
            start_time.elapsed().as_secs_f64()
        );
        Ok(body)
    }
}

#[async_trait]
impl ObservationProvider for HttpObservationProvider {
    async fn station_reading(&self) -> Result<Option<RawStationReading>> {
        let observation: StationObservation = self.get_json(&self.nws_url).await?;
        Ok(observation.properties)
    }

    async fn aviation_reading(&self) -> Result<Option<RawAviationReading>> {
        let reports: Vec<RawAviationReading> = self.get_json(&self.metar_url).await?;
        Ok(reports.into_iter().next())
    }
}

/// Fetch both feeds concurrently; failures become absent readings
pub async fn fetch_bundle(provider: &dyn ObservationProvider) -> RawObservationBundle {
    let (station, aviation) =
        futures::join!(provider.station_reading(), provider.aviation_reading());

    let primary = station.unwrap_or_else(|e| {
        warn!(error = %e, "NWS observation unavailable");
        None
    });
    let secondary = aviation.unwrap_or_else(|e| {
        warn!(error = %e, "METAR report unavailable");
        None
    });

    RawObservationBundle::new(primary, secondary)
}

/// Fetch the current observations and interpret them
#[instrument(skip(provider))]
pub async fn evaluate_current(provider: &dyn ObservationProvider) -> Evaluation {
    let bundle = fetch_bundle(provider).await;
    let evaluation = engine::evaluate_bundle(&bundle, Utc::now());

    match &evaluation.interpretation {
        Some(interpretation) => info!(
            state = %evaluation.result.state,
            confidence = interpretation.verdict.confidence_score,
            status = ?evaluation.result.status,
            "Evaluated current weather"
        ),
        None => warn!("No observation data available, serving safe default"),
    }

    evaluation
}
