use serde::{Serialize, Serializer, ser::SerializeStruct};
use tracing::info;

use crate::{
    error::FetchError,
    model::{CurrentWeather, ForecastTable, WeatherQuery},
    source::WeatherSource,
};

/// Outcome of one lookup. The two sections succeed or fail on their own.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherReport {
    pub city: String,
    pub current: Result<CurrentWeather, FetchError>,
    pub forecast: Result<ForecastTable, FetchError>,
}

impl WeatherReport {
    pub fn all_failed(&self) -> bool {
        self.current.is_err() && self.forecast.is_err()
    }
}

/// Fetch current weather, then the forecast. The forecast is requested even
/// when the current lookup failed.
pub async fn build_report(source: &dyn WeatherSource, query: &WeatherQuery) -> WeatherReport {
    let current = source.current(query).await;
    let forecast = source.forecast(query).await;

    info!(
        city = query.city(),
        current_ok = current.is_ok(),
        forecast_ok = forecast.is_ok(),
        "weather report built"
    );

    WeatherReport {
        city: query.city().to_string(),
        current,
        forecast,
    }
}

#[derive(Serialize)]
struct SectionError {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<u16>,
}

impl From<&FetchError> for SectionError {
    fn from(err: &FetchError) -> Self {
        Self {
            error: err.to_string(),
            code: err.status_code(),
        }
    }
}

/// Sections serialize as their value or as `{"error": ..., "code": ...}`.
impl Serialize for WeatherReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("WeatherReport", 3)?;
        state.serialize_field("city", &self.city)?;
        match &self.current {
            Ok(current) => state.serialize_field("current", current)?,
            Err(err) => state.serialize_field("current", &SectionError::from(err))?,
        }
        match &self.forecast {
            Ok(forecast) => state.serialize_field("forecast", forecast)?,
            Err(err) => state.serialize_field("forecast", &SectionError::from(err))?,
        }
        state.end()
    }
}
