//! SVG versions of the three forecast charts.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use plotters::prelude::*;

use cityweather_core::ForecastTable;

use crate::render::{ChartKind, axis_label};

const SIZE: (u32, u32) = (1024, 480);

/// Write `temperature.svg`, `humidity.svg` and `wind_speed.svg` into `dir`.
/// Nothing is written for an empty forecast.
pub fn write_charts(table: &ForecastTable, dir: &Path) -> Result<Vec<PathBuf>> {
    if table.is_empty() {
        return Ok(Vec::new());
    }

    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create chart directory: {}", dir.display()))?;

    let labels: Vec<String> = table.iter().map(axis_label).collect();
    let mut written = Vec::with_capacity(3);

    for (kind, file, title, y_desc, values) in [
        (
            ChartKind::Line,
            "temperature.svg",
            "Temperature Forecast",
            "Temperature (°C)",
            table.temperatures(),
        ),
        (
            ChartKind::Bar,
            "humidity.svg",
            "Humidity Forecast",
            "Humidity (%)",
            table.humidities(),
        ),
        (
            ChartKind::Area,
            "wind_speed.svg",
            "Wind Speed Forecast",
            "Wind Speed (m/s)",
            table.wind_speeds(),
        ),
    ] {
        let path = dir.join(file);
        draw_chart(&path, kind, title, y_desc, &labels, &values)
            .with_context(|| format!("Failed to draw chart: {}", path.display()))?;
        written.push(path);
    }

    Ok(written)
}

fn draw_chart(
    path: &Path,
    kind: ChartKind,
    title: &str,
    y_desc: &str,
    labels: &[String],
    values: &[f64],
) -> Result<()> {
    let root = SVGBackend::new(path, SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let floor = kind.floor(min);
    let pad = if (max - floor).abs() > 1e-6 {
        (max - floor) * 0.1
    } else {
        1.0
    };
    let y_range = match kind {
        ChartKind::Line => (floor - pad)..(max + pad),
        ChartKind::Bar | ChartKind::Area => floor..(max + pad),
    };

    let n = values.len() as f64;
    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 24))
        .margin(12)
        .x_label_area_size(48)
        .y_label_area_size(56)
        .build_cartesian_2d(-0.5..(n - 0.5), y_range)?;

    chart
        .configure_mesh()
        .x_desc("Time")
        .y_desc(y_desc)
        .x_labels(8)
        .x_label_formatter(&|x: &f64| label_at(labels, *x))
        .light_line_style(BLACK.mix(0.15))
        .draw()?;

    let points = values.iter().enumerate().map(|(i, v)| (i as f64, *v));
    match kind {
        ChartKind::Line => {
            chart.draw_series(LineSeries::new(points, BLUE))?;
        }
        ChartKind::Bar => {
            chart.draw_series(points.map(|(x, v)| {
                Rectangle::new([(x - 0.4, floor), (x + 0.4, v)], BLUE.mix(0.7).filled())
            }))?;
        }
        ChartKind::Area => {
            let area = AreaSeries::new(points, floor, BLUE.mix(0.3)).border_style(BLUE);
            chart.draw_series(area)?;
        }
    }

    root.present()?;
    Ok(())
}

/// Label for the sample nearest to `x`, empty between or outside samples.
fn label_at(labels: &[String], x: f64) -> String {
    let idx = x.round();
    if idx < 0.0 || (x - idx).abs() > 1e-6 {
        return String::new();
    }
    labels.get(idx as usize).cloned().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use cityweather_core::ForecastSample;

    fn table(n: usize) -> ForecastTable {
        (0..n)
            .map(|i| ForecastSample {
                timestamp: format!("2024-05-0{} {:02}:00:00", 1 + i / 8, (i % 8) * 3),
                temperature_c: 8.0 + i as f64,
                humidity_pct: 40 + i as u8,
                wind_speed_ms: 0.5 * i as f64,
            })
            .collect()
    }

    #[test]
    fn writes_three_svg_files() {
        let dir = tempfile::tempdir().unwrap();
        let written = write_charts(&table(16), dir.path()).unwrap();

        let names: Vec<_> = written
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            names,
            vec!["temperature.svg", "humidity.svg", "wind_speed.svg"]
        );

        for path in &written {
            let svg = fs::read_to_string(path).unwrap();
            assert!(svg.contains("<svg"), "{}", path.display());
        }
    }

    #[test]
    fn empty_forecast_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("charts");

        let written = write_charts(&ForecastTable::default(), &out).unwrap();
        assert!(written.is_empty());
        assert!(!out.exists());
    }

    #[test]
    fn label_only_on_sample_positions() {
        let labels = vec!["a".to_string(), "b".to_string()];
        assert_eq!(label_at(&labels, 1.0), "b");
        assert_eq!(label_at(&labels, 0.5), "");
        assert_eq!(label_at(&labels, -0.5), "");
        assert_eq!(label_at(&labels, 2.0), "");
    }
}
