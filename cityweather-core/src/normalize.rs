//! Flattening of forecast samples into a [`ForecastTable`].
//!
//! Each sample is projected onto timestamp, temperature, humidity and wind
//! speed. Order is kept, nothing is aggregated or converted, and a single
//! malformed sample rejects the whole forecast.

use serde::Deserialize;

use crate::{
    error::FetchError,
    model::{ForecastSample, ForecastTable},
    wire::OwForecastEntry,
};

/// Anything that can be projected onto a [`ForecastSample`].
pub trait RawSample {
    fn project(&self) -> Result<ForecastSample, String>;
}

/// Provider forecast entry: `{dt_txt, main: {temp, humidity}, wind: {speed}}`.
impl RawSample for serde_json::Value {
    fn project(&self) -> Result<ForecastSample, String> {
        let entry = OwForecastEntry::deserialize(self).map_err(|e| e.to_string())?;

        Ok(ForecastSample {
            timestamp: entry.dt_txt,
            temperature_c: entry.main.temp,
            humidity_pct: entry.main.humidity,
            wind_speed_ms: entry.wind.speed,
        })
    }
}

impl RawSample for ForecastSample {
    fn project(&self) -> Result<ForecastSample, String> {
        Ok(self.clone())
    }
}

pub fn normalize<S: RawSample>(raw: &[S]) -> Result<ForecastTable, FetchError> {
    raw.iter()
        .enumerate()
        .map(|(idx, sample)| {
            sample
                .project()
                .map_err(|e| FetchError::parse(format!("forecast sample {idx}: {e}")))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn entry(ts: &str, temp: f64, humidity: u8, wind: f64) -> Value {
        json!({
            "dt": 0,
            "dt_txt": ts,
            "main": { "temp": temp, "feels_like": temp, "humidity": humidity },
            "weather": [{ "description": "light rain" }],
            "wind": { "speed": wind, "deg": 180 }
        })
    }

    #[test]
    fn projects_the_four_fields() {
        let raw = vec![entry("2024-05-01 12:00:00", 14.2, 81, 4.6)];
        let table = normalize(&raw).unwrap();

        assert_eq!(
            table.samples(),
            &[ForecastSample {
                timestamp: "2024-05-01 12:00:00".into(),
                temperature_c: 14.2,
                humidity_pct: 81,
                wind_speed_ms: 4.6,
            }]
        );
    }

    #[test]
    fn keeps_input_order() {
        // Deliberately out of chronological order: the normalizer must not sort.
        let raw = vec![
            entry("2024-05-01 06:00:00", 1.0, 50, 1.0),
            entry("2024-05-01 00:00:00", 2.0, 60, 2.0),
            entry("2024-05-01 03:00:00", 3.0, 70, 3.0),
        ];
        let table = normalize(&raw).unwrap();

        for (i, sample) in table.iter().enumerate() {
            assert_eq!(sample.timestamp, raw[i]["dt_txt"].as_str().unwrap());
        }
    }

    #[test]
    fn forty_samples_stay_forty_and_non_decreasing() {
        let raw: Vec<Value> = (0..40)
            .map(|i| {
                let day = 1 + i / 8;
                let hour = (i % 8) * 3;
                entry(&format!("2024-05-{day:02} {hour:02}:00:00"), 10.0, 60, 3.0)
            })
            .collect();

        let table = normalize(&raw).unwrap();
        assert_eq!(table.len(), 40);
        assert!(table.timestamps().windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn renormalizing_a_table_changes_nothing() {
        let raw = vec![
            entry("2024-05-01 00:00:00", -1.5, 90, 0.4),
            entry("2024-05-01 03:00:00", 0.5, 88, 1.1),
        ];
        let once = normalize(&raw).unwrap();
        let twice = normalize(once.samples()).unwrap();

        assert_eq!(once, twice);
    }

    #[test]
    fn missing_field_aborts_with_sample_index() {
        let mut broken = entry("2024-05-01 03:00:00", 1.0, 50, 1.0);
        broken["wind"] = json!({});
        let raw = vec![entry("2024-05-01 00:00:00", 1.0, 50, 1.0), broken];

        let err = normalize(&raw).unwrap_err();
        match err {
            FetchError::Parse { detail } => {
                assert!(detail.contains("sample 1"), "{detail}");
                assert!(detail.contains("speed"), "{detail}");
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn non_object_sample_is_a_parse_error() {
        let raw = vec![json!("not a sample")];
        assert!(matches!(normalize(&raw), Err(FetchError::Parse { .. })));
    }

    #[test]
    fn empty_list_is_an_empty_table() {
        let raw: Vec<Value> = Vec::new();
        let table = normalize(&raw).unwrap();
        assert!(table.is_empty());
    }
}
