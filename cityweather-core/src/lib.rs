//! Core library for the `cityweather` CLI.
//!
//! This crate defines:
//! - An OpenWeatherMap client for current weather and the 5-day forecast
//! - Normalization of forecast samples into a flat table
//! - Configuration & API key handling
//! - A report that fetches both sections independently
//!
//! Rendering is left to the caller.

pub mod client;
pub mod config;
pub mod error;
pub mod model;
pub mod normalize;
pub mod report;
pub mod source;
mod wire;

pub use client::WeatherClient;
pub use config::Config;
pub use error::FetchError;
pub use model::{CurrentWeather, ForecastSample, ForecastTable, Units, WeatherQuery};
pub use normalize::{RawSample, normalize};
pub use report::{WeatherReport, build_report};
pub use source::WeatherSource;
