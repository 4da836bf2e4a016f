use std::collections::BTreeMap;
use serde::Deserialize;
use serde_json::Value;

/// Forecast document as returned by the Open-Meteo forecast endpoint.
///
/// `hourly` and `hourly_units` are kept as name-keyed maps since the set of hourly
/// variables depends on the request. Every other top-level key (latitude, longitude,
/// generationtime_ms, utc_offset_seconds, timezone, timezone_abbreviation, elevation
/// and whatever else the API adds) lands in `metadata`.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct ForecastResponse {
    pub hourly: Option<BTreeMap<String, Vec<Value>>>,
    pub hourly_units: Option<BTreeMap<String, String>>,
    #[serde(flatten)]
    pub metadata: BTreeMap<String, Value>,
}
