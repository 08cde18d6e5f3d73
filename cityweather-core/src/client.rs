use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::{
    error::FetchError,
    model::{CurrentWeather, ForecastTable, WeatherQuery},
    normalize::normalize,
    source::WeatherSource,
    wire::{self, OwCurrentResponse, OwForecastResponse},
};

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

/// OpenWeatherMap client for the current-weather and 5-day forecast resources.
#[derive(Debug, Clone)]
pub struct WeatherClient {
    base_url: String,
    http: Client,
}

impl Default for WeatherClient {
    fn default() -> Self {
        Self::new()
    }
}

impl WeatherClient {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Point the client at another API root, e.g. a mock server in tests.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            http: Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn fetch_current(&self, query: &WeatherQuery) -> Result<CurrentWeather, FetchError> {
        let parsed: OwCurrentResponse = self.get_json("weather", query).await?;

        let description = parsed
            .weather
            .into_iter()
            .next()
            .map(|w| w.description)
            .ok_or_else(|| {
                FetchError::parse("current weather response has an empty `weather` list")
            })?;

        Ok(CurrentWeather {
            city_name: parsed.name,
            country_code: parsed.sys.country,
            description,
            temperature_c: parsed.main.temp,
            humidity_pct: parsed.main.humidity,
            wind_speed_ms: parsed.wind.speed,
        })
    }

    pub async fn fetch_forecast(&self, query: &WeatherQuery) -> Result<ForecastTable, FetchError> {
        let parsed: OwForecastResponse = self.get_json("forecast", query).await?;
        let table = normalize(&parsed.list)?;

        debug!(
            city = query.city(),
            samples = table.len(),
            "forecast normalized"
        );
        Ok(table)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        resource: &str,
        query: &WeatherQuery,
    ) -> Result<T, FetchError> {
        let url = format!("{}/{}", self.base_url, resource);
        debug!(%url, city = query.city(), "requesting OpenWeather {resource}");

        let res = self
            .http
            .get(&url)
            .query(&[
                ("q", query.city()),
                ("appid", query.api_key()),
                ("units", query.units().as_str()),
            ])
            .send()
            .await
            .map_err(|e| {
                warn!(resource, error = %e, "OpenWeather request failed");
                FetchError::transport(e.without_url())
            })?;

        let status = res.status();
        let body = res.text().await.map_err(|e| {
            warn!(resource, error = %e, "failed to read OpenWeather response body");
            FetchError::transport(e.without_url())
        })?;

        if status != StatusCode::OK {
            let message = wire::error_message(&body);
            warn!(resource, status = status.as_u16(), %message, "OpenWeather rejected request");
            return Err(FetchError::Provider {
                code: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&body).map_err(|e| {
            warn!(resource, error = %e, "unexpected OpenWeather {resource} payload");
            FetchError::parse(format!("{resource} response: {e}"))
        })
    }
}

#[async_trait]
impl WeatherSource for WeatherClient {
    async fn current(&self, query: &WeatherQuery) -> Result<CurrentWeather, FetchError> {
        self.fetch_current(query).await
    }

    async fn forecast(&self, query: &WeatherQuery) -> Result<ForecastTable, FetchError> {
        self.fetch_forecast(query).await
    }
}
