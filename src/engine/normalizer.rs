//! Observation normalizer
//!
//! Converts the station reading and the METAR reading into one
//! [`NormalizedParameters`]. The station reading is applied first, then every
//! field the METAR reading supplies overwrites it.

use crate::models::{
    AviationCloudLayer, NormalizedParameters, RawAviationReading, RawStationReading,
    StationCloudLayer,
};

const METERS_PER_MILE: f64 = 1609.34;
const FEET_PER_METER: f64 = 3.28084;
/// Station layer bases below this are taken to be feet already
const STATION_BASE_FEET_THRESHOLD: f64 = 1000.0;

const PRECIPITATION_KEYWORDS: [&str; 6] = ["rain", "snow", "drizzle", "showers", "sleet", "hail"];
const PRECIPITATION_WX_CODES: [&str; 3] = ["RA", "SN", "DZ"];

#[must_use]
pub fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    celsius * 9.0 / 5.0 + 32.0
}

/// Percentage of sky covered for a layer code; unknown codes cover nothing
#[must_use]
pub fn coverage_pct(code: &str) -> f64 {
    match code {
        "FEW" => 12.5,
        "SCT" => 37.5,
        "BKN" => 75.0,
        "OVC" => 100.0,
        _ => 0.0,
    }
}

fn is_ceiling_layer(code: &str) -> bool {
    matches!(code, "BKN" | "OVC")
}

/// Merge both readings into one parameter set. Never fails.
#[must_use]
pub fn normalize(
    primary: Option<&RawStationReading>,
    secondary: Option<&RawAviationReading>,
) -> NormalizedParameters {
    let mut params = NormalizedParameters::unknown();

    if let Some(station) = primary {
        apply_station(&mut params, station);
    }
    if let Some(metar) = secondary {
        apply_aviation(&mut params, metar);
    }

    params
}

fn apply_station(params: &mut NormalizedParameters, station: &RawStationReading) {
    if let Some(meters) = station.visibility_m().filter(|m| *m != 0.0) {
        params.visibility_miles = Some(meters / METERS_PER_MILE);
    }

    params.temperature = station.temperature_c().map(celsius_to_fahrenheit);
    params.feels_like = station
        .wind_chill_c()
        .or_else(|| station.heat_index_c())
        .map(celsius_to_fahrenheit)
        .or(params.temperature);

    if let Some(layers) = &station.cloud_layers {
        params.cloud_ceiling_ft = station_ceiling_ft(layers);
        params.cloud_cover_pct = Some(max_coverage(
            layers.iter().map(|l| l.amount.as_deref().unwrap_or_default()),
        ));
    }

    if let Some(description) = station.text_description.as_deref().filter(|d| !d.is_empty()) {
        params.has_precipitation = describes_precipitation(description);
        params.weather_description = Some(description.to_string());
    }

    if let Some(humidity) = station.humidity_pct() {
        params.humidity_pct = Some(humidity);
    }
}

fn apply_aviation(params: &mut NormalizedParameters, metar: &RawAviationReading) {
    if let Some(miles) = metar.visib.as_ref().and_then(|v| v.miles()) {
        params.visibility_miles = Some(miles);
    }

    if let Some(celsius) = metar.temp {
        params.temperature = Some(celsius_to_fahrenheit(celsius));
    }

    if let Some(layers) = &metar.clouds {
        params.cloud_ceiling_ft = aviation_ceiling_ft(layers);
        params.cloud_cover_pct = Some(max_coverage(
            layers.iter().map(|l| l.cover.as_deref().unwrap_or_default()),
        ));
    }

    // Replaces, not ORs, whatever the station text said
    if let Some(wx) = metar.wx_string.as_deref().filter(|wx| !wx.is_empty()) {
        params.has_precipitation = reports_precipitation(wx);
    }

    if let Some(humidity) = metar.relh {
        params.humidity_pct = Some(humidity);
    }
}

/// Station layer base in feet.
///
/// Stations report either feet or meters without saying which; values under
/// 1000 are read as feet, anything else as meters.
fn station_base_ft(raw: f64) -> f64 {
    if raw < STATION_BASE_FEET_THRESHOLD {
        raw
    } else {
        raw * FEET_PER_METER
    }
}

fn station_ceiling_ft(layers: &[StationCloudLayer]) -> Option<f64> {
    layers
        .iter()
        .filter(|layer| is_ceiling_layer(layer.amount.as_deref().unwrap_or_default()))
        .filter_map(|layer| layer.base.as_ref().and_then(|b| b.value))
        .filter(|base| *base != 0.0)
        .map(station_base_ft)
        .reduce(f64::min)
}

fn aviation_ceiling_ft(layers: &[AviationCloudLayer]) -> Option<f64> {
    layers
        .iter()
        .filter(|layer| is_ceiling_layer(layer.cover.as_deref().unwrap_or_default()))
        .map(|layer| layer.base.unwrap_or(0.0) * 100.0)
        .reduce(f64::min)
}

/// Maximum coverage across layers; 0 when there are no layers
fn max_coverage<'a>(codes: impl Iterator<Item = &'a str>) -> f64 {
    codes.map(coverage_pct).fold(0.0, f64::max)
}

#[must_use]
pub fn describes_precipitation(description: &str) -> bool {
    let lower = description.to_lowercase();
    PRECIPITATION_KEYWORDS.iter().any(|k| lower.contains(k))
}

#[must_use]
pub fn reports_precipitation(wx_string: &str) -> bool {
    PRECIPITATION_WX_CODES.iter().any(|code| wx_string.contains(code))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MetarVisibility, Quantity};
    use rstest::rstest;

    fn station_layer(amount: &str, base: Option<f64>) -> StationCloudLayer {
        StationCloudLayer {
            amount: Some(amount.to_string()),
            base: base.map(Quantity::new),
        }
    }

    fn metar_layer(cover: &str, base: Option<f64>) -> AviationCloudLayer {
        AviationCloudLayer {
            cover: Some(cover.to_string()),
            base,
        }
    }

    fn assert_close(actual: Option<f64>, expected: f64) {
        let actual = actual.expect("value should be known");
        assert!(
            (actual - expected).abs() < 1e-6,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_nothing_in_everything_unknown() {
        assert_eq!(normalize(None, None), NormalizedParameters::unknown());
    }

    #[test]
    fn test_station_conversions() {
        let station = RawStationReading {
            temperature: Some(Quantity::new(10.0)),
            visibility: Some(Quantity::new(16093.4)),
            relative_humidity: Some(Quantity::new(64.5)),
            text_description: Some("Partly Cloudy".to_string()),
            ..Default::default()
        };

        let params = normalize(Some(&station), None);

        assert_close(params.temperature, 50.0);
        assert_close(params.feels_like, 50.0);
        assert_close(params.visibility_miles, 10.0);
        assert_eq!(params.humidity_pct, Some(64.5));
        assert_eq!(params.weather_description.as_deref(), Some("Partly Cloudy"));
        assert!(!params.has_precipitation);
        assert_eq!(params.cloud_cover_pct, None);
    }

    #[test]
    fn test_feels_like_prefers_wind_chill() {
        let station = RawStationReading {
            temperature: Some(Quantity::new(2.0)),
            wind_chill: Some(Quantity::new(-5.0)),
            heat_index: Some(Quantity::new(4.0)),
            ..Default::default()
        };
        assert_close(normalize(Some(&station), None).feels_like, 23.0);

        let station = RawStationReading {
            wind_chill: None,
            ..station
        };
        assert_close(normalize(Some(&station), None).feels_like, 39.2);
    }

    #[test]
    fn test_zero_station_visibility_is_unknown() {
        let station = RawStationReading {
            visibility: Some(Quantity::new(0.0)),
            ..Default::default()
        };
        assert_eq!(normalize(Some(&station), None).visibility_miles, None);
    }

    #[rstest]
    #[case(800.0, 800.0)]
    #[case(999.0, 999.0)]
    #[case(1000.0, 3280.84)]
    #[case(3660.0, 12007.8744)]
    fn test_station_base_unit_heuristic(#[case] raw: f64, #[case] feet: f64) {
        assert!((station_base_ft(raw) - feet).abs() < 1e-6);
    }

    #[test]
    fn test_station_ceiling_uses_lowest_broken_or_overcast() {
        let station = RawStationReading {
            cloud_layers: Some(vec![
                station_layer("FEW", Some(300.0)),
                station_layer("BKN", Some(2000.0)),
                station_layer("OVC", Some(1500.0)),
                station_layer("BKN", None),
            ]),
            ..Default::default()
        };

        let params = normalize(Some(&station), None);

        assert_close(params.cloud_ceiling_ft, 1500.0 * FEET_PER_METER);
        assert_eq!(params.cloud_cover_pct, Some(100.0));
    }

    #[test]
    fn test_few_and_scattered_never_form_a_ceiling() {
        let station = RawStationReading {
            cloud_layers: Some(vec![
                station_layer("FEW", Some(600.0)),
                station_layer("SCT", Some(900.0)),
            ]),
            ..Default::default()
        };

        let params = normalize(Some(&station), None);

        assert_eq!(params.cloud_ceiling_ft, None);
        assert_eq!(params.cloud_cover_pct, Some(37.5));
    }

    #[test]
    fn test_empty_layers_mean_clear_cover_but_unknown_ceiling() {
        let metar = RawAviationReading {
            clouds: Some(vec![]),
            ..Default::default()
        };

        let params = normalize(None, Some(&metar));

        assert_eq!(params.cloud_ceiling_ft, None);
        assert_eq!(params.cloud_cover_pct, Some(0.0));
    }

    #[test]
    fn test_metar_conversions() {
        let metar = RawAviationReading {
            temp: Some(-1.0),
            visib: Some(MetarVisibility::Text("10+".to_string())),
            wx_string: Some("-SN BR".to_string()),
            relh: Some(92.0),
            clouds: Some(vec![metar_layer("SCT", Some(20.0)), metar_layer("OVC", Some(45.0))]),
        };

        let params = normalize(None, Some(&metar));

        assert_close(params.temperature, 30.2);
        assert_eq!(params.feels_like, None);
        assert_eq!(params.visibility_miles, Some(10.0));
        assert_eq!(params.cloud_ceiling_ft, Some(4500.0));
        assert_eq!(params.cloud_cover_pct, Some(100.0));
        assert_eq!(params.humidity_pct, Some(92.0));
        assert!(params.has_precipitation);
    }

    #[test]
    fn test_metar_layer_without_base_sits_on_the_ground() {
        let metar = RawAviationReading {
            clouds: Some(vec![metar_layer("OVC", None), metar_layer("BKN", Some(30.0))]),
            ..Default::default()
        };
        assert_eq!(normalize(None, Some(&metar)).cloud_ceiling_ft, Some(0.0));
    }

    #[test]
    fn test_metar_overrides_station() {
        let station = RawStationReading {
            temperature: Some(Quantity::new(20.0)),
            visibility: Some(Quantity::new(1609.34)),
            relative_humidity: Some(Quantity::new(50.0)),
            text_description: Some("Light Rain".to_string()),
            cloud_layers: Some(vec![station_layer("OVC", Some(500.0))]),
            ..Default::default()
        };
        let metar = RawAviationReading {
            temp: Some(10.0),
            visib: Some(MetarVisibility::Number(70.0)),
            wx_string: Some("HZ".to_string()),
            relh: Some(40.0),
            clouds: Some(vec![metar_layer("FEW", Some(150.0))]),
        };

        let params = normalize(Some(&station), Some(&metar));

        assert_close(params.temperature, 50.0);
        // feels-like only ever comes from the station
        assert_close(params.feels_like, 68.0);
        assert_eq!(params.visibility_miles, Some(70.0));
        assert_eq!(params.humidity_pct, Some(40.0));
        assert_eq!(params.cloud_ceiling_ft, None);
        assert_eq!(params.cloud_cover_pct, Some(12.5));
        assert!(!params.has_precipitation);
        assert_eq!(params.weather_description.as_deref(), Some("Light Rain"));
    }

    #[test]
    fn test_station_only_fields_pass_through() {
        let station = RawStationReading {
            relative_humidity: Some(Quantity::new(77.0)),
            text_description: Some("Showers in Vicinity".to_string()),
            ..Default::default()
        };
        let metar = RawAviationReading {
            temp: Some(12.0),
            ..Default::default()
        };

        let params = normalize(Some(&station), Some(&metar));

        assert_eq!(params.humidity_pct, Some(77.0));
        assert!(params.has_precipitation);
    }

    #[test]
    fn test_station_layer_with_zero_base_counts_for_cover_only() {
        let station = RawStationReading {
            cloud_layers: Some(vec![
                station_layer("OVC", Some(0.0)),
                station_layer("SCT", Some(1200.0)),
            ]),
            ..Default::default()
        };

        let params = normalize(Some(&station), None);

        assert_eq!(params.cloud_ceiling_ft, None);
        assert_eq!(params.cloud_cover_pct, Some(100.0));
    }

    #[rstest]
    #[case(Some(""), true)]
    #[case(None, true)]
    #[case(Some("BR"), false)]
    fn test_blank_wx_string_keeps_station_precipitation(
        #[case] wx_string: Option<&str>,
        #[case] expected: bool,
    ) {
        let station = RawStationReading {
            text_description: Some("Light Rain".to_string()),
            cloud_layers: Some(vec![station_layer("OVC", Some(0.0))]),
            ..Default::default()
        };
        let metar = RawAviationReading {
            wx_string: wx_string.map(str::to_string),
            ..Default::default()
        };

        let params = normalize(Some(&station), Some(&metar));

        assert_eq!(params.has_precipitation, expected);
        assert_eq!(params.cloud_ceiling_ft, None);
        assert_eq!(params.cloud_cover_pct, Some(100.0));
    }

    #[test]
    fn test_empty_description_stays_unknown() {
        let station = RawStationReading {
            temperature: Some(Quantity::new(5.0)),
            text_description: Some(String::new()),
            ..Default::default()
        };

        let params = normalize(Some(&station), None);

        assert_eq!(params.weather_description, None);
        assert!(!params.has_precipitation);
    }

    #[rstest]
    #[case("Light Rain", true)]
    #[case("Snow Showers", true)]
    #[case("DRIZZLE AND FOG", true)]
    #[case("Hail", true)]
    #[case("Sleet", true)]
    #[case("Mostly Cloudy", false)]
    #[case("Fog/Mist", false)]
    fn test_description_keywords(#[case] description: &str, #[case] expected: bool) {
        assert_eq!(describes_precipitation(description), expected);
    }

    #[rstest]
    #[case("-RA", true)]
    #[case("+SN", true)]
    #[case("DZ BR", true)]
    #[case("-SHRA", true)]
    #[case("BR", false)]
    #[case("HZ FU", false)]
    fn test_wx_codes(#[case] wx: &str, #[case] expected: bool) {
        assert_eq!(reports_precipitation(wx), expected);
    }
}
