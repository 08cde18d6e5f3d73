use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::FetchError;

/// Format of the provider's `dt_txt` forecast timestamps.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    #[default]
    Metric,
    Imperial,
}

impl Units {
    pub fn as_str(&self) -> &'static str {
        match self {
            Units::Metric => "metric",
            Units::Imperial => "imperial",
        }
    }
}

/// A single weather lookup. Built once per request and never changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherQuery {
    city: String,
    api_key: String,
    units: Units,
}

impl WeatherQuery {
    /// Build a metric query. Both the city and the API key must be non-empty;
    /// the city is trimmed, the provider decides whether it exists.
    pub fn new(city: impl Into<String>, api_key: impl Into<String>) -> Result<Self, FetchError> {
        let city = city.into().trim().to_string();
        let api_key = api_key.into();

        if city.is_empty() {
            return Err(FetchError::InvalidQuery(
                "city name must not be empty".into(),
            ));
        }
        if api_key.trim().is_empty() {
            return Err(FetchError::InvalidQuery("API key must not be empty".into()));
        }

        Ok(Self {
            city,
            api_key,
            units: Units::Metric,
        })
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn units(&self) -> Units {
        self.units
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeather {
    pub city_name: String,
    pub country_code: String,
    pub description: String,
    pub temperature_c: f64,
    pub humidity_pct: u8,
    pub wind_speed_ms: f64,
}

/// One 3-hour forecast interval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastSample {
    pub timestamp: String,
    pub temperature_c: f64,
    pub humidity_pct: u8,
    pub wind_speed_ms: f64,
}

impl ForecastSample {
    /// Parsed timestamp, if it is in the provider's `YYYY-MM-DD HH:MM:SS` form.
    pub fn time(&self) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(&self.timestamp, TIMESTAMP_FORMAT).ok()
    }
}

/// Forecast samples in provider order (ascending time).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ForecastTable(Vec<ForecastSample>);

impl ForecastTable {
    pub fn samples(&self) -> &[ForecastSample] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ForecastSample> {
        self.0.iter()
    }

    pub fn timestamps(&self) -> Vec<&str> {
        self.0.iter().map(|s| s.timestamp.as_str()).collect()
    }

    pub fn temperatures(&self) -> Vec<f64> {
        self.0.iter().map(|s| s.temperature_c).collect()
    }

    pub fn humidities(&self) -> Vec<f64> {
        self.0.iter().map(|s| f64::from(s.humidity_pct)).collect()
    }

    pub fn wind_speeds(&self) -> Vec<f64> {
        self.0.iter().map(|s| s.wind_speed_ms).collect()
    }
}

impl FromIterator<ForecastSample> for ForecastTable {
    fn from_iter<I: IntoIterator<Item = ForecastSample>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a ForecastTable {
    type Item = &'a ForecastSample;
    type IntoIter = std::slice::Iter<'a, ForecastSample>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
