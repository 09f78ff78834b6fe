//! Mount Rainier visibility evaluator
//!
//! Two independent strategies look at the same [`NormalizedParameters`]:
//! an ordered set of hard disqualifiers (the tree gate) and a weighted
//! scoring model. The mountain counts as visible only when the gate passes
//! and the score reaches [`VISIBLE_SCORE_THRESHOLD`].

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::NormalizedParameters;

pub const MIN_VISIBILITY_MILES: f64 = 60.0;
pub const MIN_CEILING_FT: f64 = 12_000.0;
pub const MAX_CLOUD_COVER_PCT: f64 = 75.0;
pub const VISIBLE_SCORE_THRESHOLD: u8 = 70;

/// Factor weights in hundredths; they add up to 100.
const VISIBILITY_WEIGHT: u32 = 35;
const CEILING_WEIGHT: u32 = 30;
const CLOUD_COVER_WEIGHT: u32 = 20;
const PRECIPITATION_WEIGHT: u32 = 10;
const HUMIDITY_WEIGHT: u32 = 5;

/// Outcome of the hard-disqualifier checks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeOutcome {
    pub passes: bool,
    pub reason: String,
}

impl TreeOutcome {
    fn fail(reason: String) -> Self {
        Self {
            passes: false,
            reason,
        }
    }
}

/// Per-factor sub-scores, each 0-100
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub visibility: u8,
    pub ceiling: u8,
    pub cloud_cover: u8,
    pub precipitation: u8,
    pub humidity: u8,
}

impl ScoreBreakdown {
    #[must_use]
    pub fn from_parameters(params: &NormalizedParameters) -> Self {
        Self {
            visibility: score_visibility(params.visibility_miles),
            ceiling: score_ceiling(params.cloud_ceiling_ft),
            cloud_cover: score_cloud_cover(params.cloud_cover_pct),
            precipitation: score_precipitation(params.has_precipitation),
            humidity: score_humidity(params.humidity_pct),
        }
    }

    /// Weighted total rounded to the nearest integer, halves rounding up
    #[must_use]
    pub fn total(&self) -> u8 {
        let weighted = u32::from(self.visibility) * VISIBILITY_WEIGHT
            + u32::from(self.ceiling) * CEILING_WEIGHT
            + u32::from(self.cloud_cover) * CLOUD_COVER_WEIGHT
            + u32::from(self.precipitation) * PRECIPITATION_WEIGHT
            + u32::from(self.humidity) * HUMIDITY_WEIGHT;
        // at most 100 * 100, so the quotient fits
        u8::try_from((weighted + 50) / 100).unwrap_or(100)
    }
}

/// Score band shown to users
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VisibilityStatus {
    #[serde(rename = "Likely Visible")]
    LikelyVisible,
    #[serde(rename = "Possibly Visible")]
    PossiblyVisible,
    #[serde(rename = "Unlikely Visible")]
    UnlikelyVisible,
    #[serde(rename = "Not Visible")]
    NotVisible,
}

impl VisibilityStatus {
    #[must_use]
    pub fn from_score(score: u8) -> Self {
        match score {
            80.. => VisibilityStatus::LikelyVisible,
            60..=79 => VisibilityStatus::PossiblyVisible,
            40..=59 => VisibilityStatus::UnlikelyVisible,
            _ => VisibilityStatus::NotVisible,
        }
    }

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            VisibilityStatus::LikelyVisible => "Likely Visible",
            VisibilityStatus::PossiblyVisible => "Possibly Visible",
            VisibilityStatus::UnlikelyVisible => "Unlikely Visible",
            VisibilityStatus::NotVisible => "Not Visible",
        }
    }
}

impl fmt::Display for VisibilityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Combined verdict of the gate and the scoring model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisibilityVerdict {
    pub is_visible: bool,
    pub confidence_score: u8,
    pub status_label: VisibilityStatus,
    pub tree: TreeOutcome,
    pub breakdown: ScoreBreakdown,
    pub parameters: NormalizedParameters,
    pub timestamp: DateTime<Utc>,
}

/// Evaluate visibility, stamping the verdict with the current time
#[must_use]
pub fn evaluate(params: &NormalizedParameters) -> VisibilityVerdict {
    evaluate_at(params, Utc::now())
}

/// Evaluate visibility with an explicit timestamp
#[must_use]
pub fn evaluate_at(params: &NormalizedParameters, timestamp: DateTime<Utc>) -> VisibilityVerdict {
    let tree = decision_tree(params);
    let breakdown = ScoreBreakdown::from_parameters(params);
    let score = breakdown.total();

    VisibilityVerdict {
        is_visible: tree.passes && score >= VISIBLE_SCORE_THRESHOLD,
        confidence_score: score,
        status_label: VisibilityStatus::from_score(score),
        tree,
        breakdown,
        parameters: params.clone(),
        timestamp,
    }
}

/// Hard disqualifiers, checked in order; the first hit decides
#[must_use]
pub fn decision_tree(params: &NormalizedParameters) -> TreeOutcome {
    match params.visibility_miles {
        Some(miles) if miles >= MIN_VISIBILITY_MILES => {}
        Some(miles) => {
            return TreeOutcome::fail(format!(
                "Insufficient horizontal visibility ({miles:.1} mi < 60 mi required)"
            ));
        }
        None => {
            return TreeOutcome::fail(
                "Insufficient horizontal visibility (unknown, 60 mi required)".to_string(),
            );
        }
    }

    if params.has_precipitation {
        return TreeOutcome::fail("Active precipitation obscuring view".to_string());
    }

    if let Some(ceiling) = params.cloud_ceiling_ft.filter(|c| *c < MIN_CEILING_FT) {
        return TreeOutcome::fail(format!(
            "Cloud ceiling too low ({ceiling:.0} ft < 12,000 ft required)"
        ));
    }

    if let Some(cover) = params.cloud_cover_pct.filter(|c| *c > MAX_CLOUD_COVER_PCT) {
        return TreeOutcome::fail(format!("Heavy cloud cover ({cover:.0}% > 75%)"));
    }

    TreeOutcome {
        passes: true,
        reason: "All visibility conditions met".to_string(),
    }
}

#[must_use]
pub fn score_visibility(miles: Option<f64>) -> u8 {
    match miles {
        None => 50,
        Some(m) if m >= 65.0 => 100,
        Some(m) if m >= 50.0 => 70,
        Some(m) if m >= 30.0 => 50,
        Some(m) if m >= 10.0 => 20,
        Some(_) => 0,
    }
}

/// No ceiling reported means no broken or overcast deck, which is favorable
#[must_use]
pub fn score_ceiling(feet: Option<f64>) -> u8 {
    match feet {
        None => 100,
        Some(f) if f >= 14_000.0 => 100,
        Some(f) if f >= 11_500.0 => 70,
        Some(f) if f >= 8_000.0 => 40,
        Some(f) if f >= 5_000.0 => 20,
        Some(_) => 0,
    }
}

#[must_use]
pub fn score_cloud_cover(pct: Option<f64>) -> u8 {
    match pct {
        None => 50,
        Some(p) if p <= 25.0 => 100,
        Some(p) if p <= 50.0 => 60,
        Some(p) if p <= 75.0 => 30,
        Some(_) => 0,
    }
}

#[must_use]
pub fn score_precipitation(has_precipitation: bool) -> u8 {
    if has_precipitation { 0 } else { 100 }
}

#[must_use]
pub fn score_humidity(pct: Option<f64>) -> u8 {
    match pct {
        None => 50,
        Some(p) if p < 70.0 => 100,
        Some(p) if p < 85.0 => 50,
        Some(_) => 0,
    }
}
