//! OpenWeatherMap response shapes. Only the fields we project are declared;
//! everything else in the payload is ignored.

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(crate) struct OwMain {
    pub temp: f64,
    pub humidity: u8,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OwWeather {
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OwWind {
    pub speed: f64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OwSys {
    pub country: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OwCurrentResponse {
    pub name: String,
    pub sys: OwSys,
    pub weather: Vec<OwWeather>,
    pub main: OwMain,
    pub wind: OwWind,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OwForecastEntry {
    pub dt_txt: String,
    pub main: OwMain,
    pub wind: OwWind,
}

/// Forecast entries are kept as raw JSON so the normalizer can report
/// which sample broke.
#[derive(Debug, Deserialize)]
pub(crate) struct OwForecastResponse {
    pub list: Vec<serde_json::Value>,
}

/// Error body, e.g. `{"cod":"404","message":"city not found"}`.
#[derive(Debug, Deserialize)]
pub(crate) struct OwErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

/// Message from an error body, or empty when the body carries none.
pub(crate) fn error_message(body: &str) -> String {
    serde_json::from_str::<OwErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .unwrap_or_default()
}
