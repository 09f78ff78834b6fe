//! Raw observation shapes as the two upstream feeds deliver them
//!
//! The primary feed is the NWS latest-observation GeoJSON for a station, the
//! secondary feed is the aviationweather.gov METAR JSON decoding. Both are
//! deserialized leniently: every field is optional and nulls become `None`.

use serde::{Deserialize, Serialize};

/// A `{ "value": ..., "unitCode": ... }` quantity as reported by the NWS API
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quantity {
    pub value: Option<f64>,
    pub unit_code: Option<String>,
}

impl Quantity {
    #[must_use]
    pub fn new(value: f64) -> Self {
        Self {
            value: Some(value),
            unit_code: None,
        }
    }
}

/// One cloud layer of a station observation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StationCloudLayer {
    /// Coverage code (FEW, SCT, BKN, OVC, ...)
    pub amount: Option<String>,
    /// Base height; feet or meters depending on the station
    pub base: Option<Quantity>,
}

/// The `properties` object of an NWS station observation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawStationReading {
    /// Air temperature in Celsius
    pub temperature: Option<Quantity>,
    /// Wind chill in Celsius
    pub wind_chill: Option<Quantity>,
    /// Heat index in Celsius
    pub heat_index: Option<Quantity>,
    /// Horizontal visibility in meters
    pub visibility: Option<Quantity>,
    /// Relative humidity in percent
    pub relative_humidity: Option<Quantity>,
    /// Free-text summary such as "Light Rain and Fog"
    pub text_description: Option<String>,
    pub cloud_layers: Option<Vec<StationCloudLayer>>,
}

fn quantity_value(quantity: Option<&Quantity>) -> Option<f64> {
    quantity.and_then(|q| q.value)
}

impl RawStationReading {
    #[must_use]
    pub fn temperature_c(&self) -> Option<f64> {
        quantity_value(self.temperature.as_ref())
    }

    #[must_use]
    pub fn wind_chill_c(&self) -> Option<f64> {
        quantity_value(self.wind_chill.as_ref())
    }

    #[must_use]
    pub fn heat_index_c(&self) -> Option<f64> {
        quantity_value(self.heat_index.as_ref())
    }

    #[must_use]
    pub fn visibility_m(&self) -> Option<f64> {
        quantity_value(self.visibility.as_ref())
    }

    #[must_use]
    pub fn humidity_pct(&self) -> Option<f64> {
        quantity_value(self.relative_humidity.as_ref())
    }
}

/// NWS GeoJSON envelope around a station reading
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StationObservation {
    pub properties: Option<RawStationReading>,
}

/// METAR visibility, which the JSON feed reports either as a number or as a
/// string like `"10+"`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetarVisibility {
    Number(f64),
    Text(String),
}

impl MetarVisibility {
    /// Statute miles, or `None` when the report carries no usable value.
    ///
    /// Zero and empty values count as "not reported". Text is read up to the
    /// first character that can't continue a decimal number, so `"10+"` is
    /// ten miles and `"1/2"` is one.
    #[must_use]
    pub fn miles(&self) -> Option<f64> {
        match self {
            MetarVisibility::Number(n) if *n != 0.0 && n.is_finite() => Some(*n),
            MetarVisibility::Number(_) => None,
            MetarVisibility::Text(text) if text.is_empty() => None,
            MetarVisibility::Text(text) => parse_leading_decimal(text),
        }
    }
}

fn parse_leading_decimal(text: &str) -> Option<f64> {
    let text = text.trim_start();
    let mut end = 0;
    let mut seen_dot = false;
    for (i, c) in text.char_indices() {
        match c {
            '+' | '-' if i == 0 => {}
            '.' if !seen_dot => seen_dot = true,
            c if c.is_ascii_digit() => {}
            _ => break,
        }
        end = i + c.len_utf8();
    }
    text[..end].parse::<f64>().ok()
}

/// One cloud layer of a METAR report
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AviationCloudLayer {
    /// Coverage code (FEW, SCT, BKN, OVC, ...)
    pub cover: Option<String>,
    /// Base height in hundreds of feet AGL
    pub base: Option<f64>,
}

/// First element of the aviationweather.gov METAR JSON array
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAviationReading {
    /// Air temperature in Celsius
    pub temp: Option<f64>,
    pub visib: Option<MetarVisibility>,
    /// Present-weather groups, e.g. "-RA BR"
    pub wx_string: Option<String>,
    /// Relative humidity in percent
    pub relh: Option<f64>,
    pub clouds: Option<Vec<AviationCloudLayer>>,
}

/// Both upstream readings for a single evaluation; either may be missing
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawObservationBundle {
    pub primary: Option<RawStationReading>,
    pub secondary: Option<RawAviationReading>,
}

impl RawObservationBundle {
    #[must_use]
    pub fn new(primary: Option<RawStationReading>, secondary: Option<RawAviationReading>) -> Self {
        Self { primary, secondary }
    }

    /// Bundle for when neither feed could be reached
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of feeds that delivered a reading
    #[must_use]
    pub fn source_count(&self) -> usize {
        usize::from(self.primary.is_some()) + usize::from(self.secondary.is_some())
    }
}
