use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use inquire::{Password, PasswordDisplayMode, Text};
use std::path::{Path, PathBuf};
use tracing::debug;

use cityweather_core::{Config, WeatherClient, WeatherQuery, build_report, config::FALLBACK_CITY};

use crate::{render, svg};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(
    name = "cityweather",
    version,
    about = "Current weather and 5-day forecast for a city"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key and a default city.
    Configure,

    /// Show current weather and the 5-day forecast.
    Show {
        /// City name; defaults to the configured city, then London.
        city: Option<String>,

        /// Print the report as JSON instead of text.
        #[arg(long)]
        json: bool,

        /// Skip the forecast charts.
        #[arg(long)]
        no_charts: bool,

        /// Also write the forecast charts as SVG files into this directory.
        #[arg(long, value_name = "DIR")]
        svg_dir: Option<PathBuf>,
    },

    /// Print where the config file lives.
    ConfigPath,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { city, json, no_charts, svg_dir } => {
                show(city.as_deref(), json, !no_charts, svg_dir.as_deref()).await
            }
            Command::ConfigPath => {
                println!("{}", Config::config_file_path()?.display());
                Ok(())
            }
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("OpenWeather API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .with_help_message("Leave empty to keep the current key")
        .prompt()
        .context("Failed to read API key")?;
    if !api_key.trim().is_empty() {
        config.api_key = Some(api_key.trim().to_string());
    }

    let current_city = config
        .default_city
        .clone()
        .unwrap_or_else(|| FALLBACK_CITY.to_string());
    let city = Text::new("Default city:")
        .with_default(&current_city)
        .prompt()
        .context("Failed to read default city")?;
    config.default_city = Some(city.trim().to_string()).filter(|c| !c.is_empty());

    let path = config.save()?;
    println!("Saved configuration to {}", path.display());
    Ok(())
}

async fn show(
    city: Option<&str>,
    json: bool,
    charts: bool,
    svg_dir: Option<&Path>,
) -> anyhow::Result<()> {
    let config = Config::load()?;
    let api_key = config.api_key_from_env_or_file()?;
    let query = WeatherQuery::new(config.city_or_default(city), api_key)?;

    let client = WeatherClient::with_base_url(config.base_url());
    debug!(
        city = query.city(),
        base_url = client.base_url(),
        "fetching weather report"
    );
    let report = build_report(&client, &query).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render::render_report(&report, charts));
    }

    if let (Some(dir), Ok(table)) = (svg_dir, &report.forecast) {
        for path in svg::write_charts(table, dir)? {
            eprintln!("Saved chart to {}", path.display());
        }
    }

    if report.all_failed() {
        bail!("No weather data could be fetched for '{}'", query.city());
    }
    Ok(())
}
