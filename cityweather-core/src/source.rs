use async_trait::async_trait;
use std::fmt::Debug;

use crate::{
    error::FetchError,
    model::{CurrentWeather, ForecastTable, WeatherQuery},
};

/// Something that can answer a [`WeatherQuery`]. [`crate::WeatherClient`] is
/// the real implementation; tests script their own.
#[async_trait]
pub trait WeatherSource: Send + Sync + Debug {
    async fn current(&self, query: &WeatherQuery) -> Result<CurrentWeather, FetchError>;

    async fn forecast(&self, query: &WeatherQuery) -> Result<ForecastTable, FetchError>;
}
