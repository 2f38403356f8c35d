use async_trait::async_trait;
use chrono::NaiveDateTime;
use reqwest::Client;
use serde::Deserialize;

use crate::model::ForecastEntry;

use super::{FetchError, ForecastApi, truncate_body};

pub const DEFAULT_FORECAST_URL: &str = "https://api.openweathermap.org/data/2.5/forecast";

const DT_TXT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// HTTP client for the 5-day/3-hour forecast endpoint.
///
/// The endpoint reports temperatures in Kelvin; entries are mapped into
/// [`ForecastEntry`] as received, without unit conversion.
#[derive(Debug, Clone)]
pub struct ForecastClient {
    base_url: String,
    api_key: String,
    http: Client,
}

impl ForecastClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self { base_url: base_url.into(), api_key: api_key.into(), http: Client::new() }
    }
}

#[derive(Debug, Deserialize)]
struct WireMain {
    temp: f64,
    feels_like: f64,
    temp_min: f64,
    temp_max: f64,
    pressure: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct WireWeather {
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct WireWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct WireEntry {
    dt_txt: String,
    main: WireMain,
    weather: Vec<WireWeather>,
    wind: WireWind,
}

#[derive(Debug, Deserialize)]
struct WireForecast {
    list: Vec<WireEntry>,
}

fn entry_to_domain(entry: WireEntry) -> Result<ForecastEntry, FetchError> {
    let timestamp = NaiveDateTime::parse_from_str(&entry.dt_txt, DT_TXT_FORMAT).map_err(|err| {
        FetchError::Decode {
            endpoint: "forecast",
            reason: format!("bad dt_txt {:?}: {err}", entry.dt_txt),
        }
    })?;

    let (description, icon) = entry
        .weather
        .into_iter()
        .next()
        .map(|w| (w.description, w.icon))
        .unwrap_or_else(|| ("Unknown".to_string(), String::new()));

    Ok(ForecastEntry {
        dt_txt: entry.dt_txt,
        timestamp,
        temp_k: entry.main.temp,
        feels_like_k: entry.main.feels_like,
        temp_min_k: entry.main.temp_min,
        temp_max_k: entry.main.temp_max,
        pressure_hpa: entry.main.pressure,
        humidity_pct: entry.main.humidity,
        wind_speed_mps: entry.wind.speed,
        description,
        icon,
    })
}

fn parse_series(body: &str) -> Result<Vec<ForecastEntry>, FetchError> {
    let parsed: WireForecast = serde_json::from_str(body)
        .map_err(|err| FetchError::Decode { endpoint: "forecast", reason: err.to_string() })?;

    parsed.list.into_iter().map(entry_to_domain).collect()
}

#[async_trait]
impl ForecastApi for ForecastClient {
    async fn fetch_series(&self, location: &str) -> Result<Vec<ForecastEntry>, FetchError> {
        let res = self
            .http
            .get(&self.base_url)
            .query(&[("q", location), ("appid", self.api_key.as_str())])
            .send()
            .await
            .map_err(|source| FetchError::Transport { endpoint: "forecast", source })?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|source| FetchError::Transport { endpoint: "forecast", source })?;

        if !status.is_success() {
            return Err(FetchError::Status {
                endpoint: "forecast",
                status,
                body: truncate_body(&body),
            });
        }

        parse_series(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry_json(dt_txt: &str) -> String {
        format!(
            r#"{{
                "dt": 1709290800,
                "dt_txt": "{dt_txt}",
                "main": {{
                    "temp": 300.15,
                    "feels_like": 299.4,
                    "temp_min": 298.0,
                    "temp_max": 301.2,
                    "pressure": 1013,
                    "humidity": 48
                }},
                "weather": [{{ "id": 802, "description": "scattered clouds", "icon": "03d" }}],
                "wind": {{ "speed": 3.6, "deg": 210 }}
            }}"#
        )
    }

    #[test]
    fn parse_series_maps_wire_entries() {
        let body = format!(
            r#"{{ "cod": "200", "list": [{}, {}] }}"#,
            entry_json("2024-03-01 12:00:00"),
            entry_json("2024-03-01 15:00:00"),
        );

        let series = parse_series(&body).expect("series should decode");
        assert_eq!(series.len(), 2);

        let first = &series[0];
        assert_eq!(first.dt_txt, "2024-03-01 12:00:00");
        assert_eq!(first.timestamp.format("%H:%M").to_string(), "12:00");
        assert_eq!(first.temp_k, 300.15);
        assert_eq!(first.feels_like_k, 299.4);
        assert_eq!(first.pressure_hpa, 1013.0);
        assert_eq!(first.humidity_pct, 48);
        assert_eq!(first.wind_speed_mps, 3.6);
        assert_eq!(first.description, "scattered clouds");
        assert_eq!(first.icon, "03d");
    }

    #[test]
    fn parse_series_fails_closed_on_bad_timestamp() {
        let body = format!(r#"{{ "list": [{}] }}"#, entry_json("yesterday-ish"));

        let err = parse_series(&body).unwrap_err();
        assert!(matches!(err, FetchError::Decode { endpoint: "forecast", .. }));
    }

    #[test]
    fn parse_series_defaults_missing_weather_block() {
        let body = r#"{
            "list": [{
                "dt_txt": "2024-03-01 12:00:00",
                "main": {
                    "temp": 280.0, "feels_like": 278.0, "temp_min": 279.0,
                    "temp_max": 281.0, "pressure": 990, "humidity": 80
                },
                "weather": [],
                "wind": { "speed": 1.1 }
            }]
        }"#;

        let series = parse_series(body).expect("series should decode");
        assert_eq!(series[0].description, "Unknown");
        assert!(series[0].icon.is_empty());
    }

    #[test]
    fn parse_series_rejects_malformed_body() {
        let err = parse_series(r#"{ "list": "nope" }"#).unwrap_err();
        assert!(matches!(err, FetchError::Decode { endpoint: "forecast", .. }));
    }
}
