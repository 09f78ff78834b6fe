//! Weather interpretation engine
//!
//! Pure, synchronous pipeline from raw observations to a weather state:
//! - Normalizer: merges both feeds into unit-normalized parameters
//! - Visibility: tree gate plus weighted score for Mount Rainier
//! - Classifier: picks SNOWING, RAINING, RAINIER_OUT or DRY
//! - Assembler: packages the record served to the UI
//!
//! Nothing in here performs I/O or can fail.

pub mod assembler;
pub mod classifier;
pub mod normalizer;
pub mod visibility;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use crate::models::{
    DataStatus, NormalizedParameters, RawObservationBundle, WeatherResult, WeatherState,
};

pub use assembler::assemble;
pub use classifier::{classify, classify_with_verdict};
pub use normalizer::normalize;
pub use visibility::{
    ScoreBreakdown, TreeOutcome, VisibilityStatus, VisibilityVerdict, evaluate, evaluate_at,
};

/// Everything the engine derived from one observation bundle
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Interpretation {
    pub parameters: NormalizedParameters,
    pub verdict: VisibilityVerdict,
    pub state: WeatherState,
}

impl Interpretation {
    /// Package the interpretation for the UI, stamped with the verdict's time
    #[must_use]
    pub fn to_result(&self, status: DataStatus) -> WeatherResult {
        assemble(self.state, &self.parameters, status, self.verdict.timestamp)
    }
}

/// Run the whole pipeline on a bundle, stamped with the current time
#[must_use]
pub fn interpret(bundle: &RawObservationBundle) -> Interpretation {
    interpret_at(bundle, Utc::now())
}

/// Run the whole pipeline on a bundle with an explicit timestamp
#[must_use]
pub fn interpret_at(bundle: &RawObservationBundle, timestamp: DateTime<Utc>) -> Interpretation {
    let parameters = normalize(bundle.primary.as_ref(), bundle.secondary.as_ref());
    debug!(?parameters, "Normalized observation parameters");

    let verdict = evaluate_at(&parameters, timestamp);
    debug!(
        score = verdict.confidence_score,
        visible = verdict.is_visible,
        reason = %verdict.tree.reason,
        "Evaluated Rainier visibility"
    );

    let state = classify_with_verdict(&parameters, &verdict);
    debug!(%state, "Classified weather state");

    Interpretation {
        parameters,
        verdict,
        state,
    }
}

/// Outcome of interpreting one observation bundle
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub result: WeatherResult,
    /// `None` when neither feed delivered data and the safe default was used
    pub interpretation: Option<Interpretation>,
}

/// Interpret a bundle and package it, falling back to the safe default when
/// neither feed delivered anything.
#[must_use]
pub fn evaluate_bundle(bundle: &RawObservationBundle, timestamp: DateTime<Utc>) -> Evaluation {
    let status = DataStatus::from_source_count(bundle.source_count());
    if status == DataStatus::Error {
        return Evaluation {
            result: WeatherResult::safe_default(timestamp),
            interpretation: None,
        };
    }

    let interpretation = interpret_at(bundle, timestamp);
    Evaluation {
        result: interpretation.to_result(status),
        interpretation: Some(interpretation),
    }
}

/// Served record for a bundle; see [`evaluate_bundle`]
#[must_use]
pub fn weather_result(bundle: &RawObservationBundle, timestamp: DateTime<Utc>) -> WeatherResult {
    evaluate_bundle(bundle, timestamp).result
}
