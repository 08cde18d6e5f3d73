//! Plain-text rendering of a [`WeatherReport`]: current conditions, the
//! forecast table and three charts over the forecast timestamps.

use cityweather_core::{CurrentWeather, FetchError, ForecastSample, ForecastTable, WeatherReport};

const CHART_HEIGHT: usize = 8;
const AXIS_WIDTH: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Line,
    Bar,
    Area,
}

impl ChartKind {
    fn cell(self, level: usize, row: usize) -> char {
        match self {
            ChartKind::Line if row == level => '●',
            ChartKind::Bar if row <= level => '█',
            ChartKind::Area if row == level => '▓',
            ChartKind::Area if row < level => '░',
            _ => ' ',
        }
    }

    /// Bars and areas are drawn from zero unless the data goes below it.
    pub(crate) fn floor(self, min: f64) -> f64 {
        match self {
            ChartKind::Line => min,
            ChartKind::Bar | ChartKind::Area => min.min(0.0),
        }
    }
}

pub fn render_report(report: &WeatherReport, charts: bool) -> String {
    let mut out = String::from("Current Weather\n");
    match &report.current {
        Ok(current) => out.push_str(&render_current(current)),
        Err(err) => {
            out.push_str(&render_error(err));
            out.push_str("\nFailed to fetch current weather data.\n");
        }
    }

    out.push_str("\n5-Day Weather Forecast\n");
    match &report.forecast {
        Ok(table) => out.push_str(&render_forecast(table, charts)),
        Err(err) => {
            out.push_str(&render_error(err));
            out.push('\n');
        }
    }

    out
}

pub fn render_current(current: &CurrentWeather) -> String {
    format!(
        "Weather in {}, {}:\n\
         Description: {}\n\
         Temperature: {:.1}°C\n\
         Humidity: {}%\n\
         Wind Speed: {:.1} m/s\n",
        current.city_name,
        current.country_code,
        current.description,
        current.temperature_c,
        current.humidity_pct,
        current.wind_speed_ms,
    )
}

pub fn render_error(err: &FetchError) -> String {
    match err {
        FetchError::Provider { code, message } => format!("Error {code}: {message}"),
        FetchError::Transport { detail } => format!("Request error: {detail}"),
        FetchError::Parse { detail } => format!("Unexpected response: {detail}"),
        FetchError::InvalidQuery(reason) => format!("Invalid query: {reason}"),
    }
}

pub fn render_forecast(table: &ForecastTable, charts: bool) -> String {
    if table.is_empty() {
        return "No forecast samples returned.\n".to_string();
    }

    let mut out = render_table(table);
    if charts {
        let labels: Vec<String> = table.iter().map(axis_label).collect();
        for (kind, title, values) in [
            (
                ChartKind::Line,
                "Temperature Forecast (°C)",
                table.temperatures(),
            ),
            (ChartKind::Bar, "Humidity Forecast (%)", table.humidities()),
            (
                ChartKind::Area,
                "Wind Speed Forecast (m/s)",
                table.wind_speeds(),
            ),
        ] {
            let chart = render_chart(kind, title, &labels, &values, CHART_HEIGHT);
            out.push('\n');
            out.push_str(&chart);
        }
    }
    out
}

pub fn render_table(table: &ForecastTable) -> String {
    let mut out = format!(
        "{:<19}  {:>16}  {:>12}  {:>16}\n",
        "Time", "Temperature (°C)", "Humidity (%)", "Wind Speed (m/s)"
    );
    for sample in table {
        out.push_str(&format!(
            "{:<19}  {:>16.1}  {:>12}  {:>16.1}\n",
            sample.timestamp,
            sample.temperature_c,
            sample.humidity_pct,
            sample.wind_speed_ms,
        ));
    }
    out
}

/// One column per value, `height` rows, min/max marked on the y axis and the
/// first and last timestamps under the x axis.
pub fn render_chart(
    kind: ChartKind,
    title: &str,
    labels: &[String],
    values: &[f64],
    height: usize,
) -> String {
    let mut out = format!("{title}\n");
    if values.is_empty() {
        out.push_str("  (no data)\n");
        return out;
    }

    let height = height.max(2);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let floor = kind.floor(min);
    let span = max - floor;

    let levels: Vec<usize> = values
        .iter()
        .map(|v| {
            if span > 0.0 {
                (((v - floor) / span) * (height - 1) as f64).round() as usize
            } else {
                0
            }
        })
        .collect();

    for row in (0..height).rev() {
        let axis = if row == height - 1 {
            format!("{:>width$.1}", max, width = AXIS_WIDTH)
        } else if row == 0 {
            format!("{:>width$.1}", floor, width = AXIS_WIDTH)
        } else {
            " ".repeat(AXIS_WIDTH)
        };
        let cells: String = levels.iter().map(|&level| kind.cell(level, row)).collect();
        out.push_str(&format!("{axis} │{}\n", cells.trim_end()));
    }

    let indent = " ".repeat(AXIS_WIDTH);
    out.push_str(&format!("{indent} └{}\n", "─".repeat(values.len())));
    out.push_str(&format!("{indent}  {}\n", x_axis(labels, values.len())));
    out
}

pub(crate) fn axis_label(sample: &ForecastSample) -> String {
    sample
        .time()
        .map(|t| t.format("%a %d %H:%M").to_string())
        .unwrap_or_else(|| sample.timestamp.clone())
}

fn x_axis(labels: &[String], width: usize) -> String {
    let (Some(first), Some(last)) = (labels.first(), labels.last()) else {
        return String::new();
    };

    let used = first.chars().count() + last.chars().count();
    if labels.len() > 1 && used < width {
        format!("{first}{}{last}", " ".repeat(width - used))
    } else {
        first.clone()
    }
}
