use async_trait::async_trait;
use chrono::NaiveDateTime;
use reqwest::Client;
use serde::Deserialize;

use crate::model::{
    Forecast, ForecastRequest, HOURLY_ENTRIES, HourlyForecastEntry, WeatherObservation,
};

use super::{FetchError, WeatherProvider};

pub const DEFAULT_BASE_URL: &str = "https://api.open-meteo.com/v1/forecast";

const TIMEZONE: &str = "Europe/Istanbul";

/// Keyless client for the Open-Meteo forecast endpoint.
#[derive(Debug, Clone)]
pub struct OpenMeteoProvider {
    base_url: String,
    http: Client,
}

impl Default for OpenMeteoProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl OpenMeteoProvider {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            http: Client::new(),
        }
    }

    pub fn request_url(&self, request: &ForecastRequest) -> String {
        let location = &request.location;
        let mut url = format!(
            "{}?latitude={}&longitude={}&current=temperature_2m,weather_code",
            self.base_url, location.latitude, location.longitude
        );
        if request.hourly {
            url.push_str("&hourly=temperature_2m,weather_code");
        }
        url.push_str("&timezone=");
        url.push_str(TIMEZONE);
        if request.hourly {
            url.push_str(&format!("&forecast_hours={HOURLY_ENTRIES}"));
        }
        url
    }
}

#[derive(Debug, Deserialize)]
struct OmCurrent {
    temperature_2m: f64,
    weather_code: i32,
}

#[derive(Debug, Deserialize)]
struct OmHourly {
    time: Vec<String>,
    temperature_2m: Vec<f64>,
    weather_code: Vec<i32>,
}

#[derive(Debug, Deserialize)]
struct OmResponse {
    current: OmCurrent,
    hourly: Option<OmHourly>,
}

#[async_trait]
impl WeatherProvider for OpenMeteoProvider {
    async fn fetch(&self, request: &ForecastRequest) -> Result<Forecast, FetchError> {
        let url = self.request_url(request);
        tracing::debug!(%url, "Requesting Open-Meteo forecast");

        let res = self.http.get(&url).send().await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(FetchError::Status {
                status,
                body: truncate_body(&body),
            });
        }

        let parsed: OmResponse = serde_json::from_str(&body)?;
        parse_forecast(parsed, request.hourly)
    }
}

fn parse_forecast(parsed: OmResponse, want_hourly: bool) -> Result<Forecast, FetchError> {
    let current = WeatherObservation::new(
        round_half_up(parsed.current.temperature_2m),
        parsed.current.weather_code,
    );

    let hourly = if want_hourly {
        let series = parsed
            .hourly
            .ok_or_else(|| FetchError::Schema("response has no hourly series".to_string()))?;
        parse_hourly(&series)?
    } else {
        Vec::new()
    };

    Ok(Forecast { current, hourly })
}

fn parse_hourly(series: &OmHourly) -> Result<Vec<HourlyForecastEntry>, FetchError> {
    let available = series
        .time
        .len()
        .min(series.temperature_2m.len())
        .min(series.weather_code.len());
    if available < HOURLY_ENTRIES {
        return Err(FetchError::Schema(format!(
            "expected {HOURLY_ENTRIES} hourly readings, got {available}"
        )));
    }

    series
        .time
        .iter()
        .zip(&series.temperature_2m)
        .zip(&series.weather_code)
        .take(HOURLY_ENTRIES)
        .map(|((time, temp), code)| {
            let at = NaiveDateTime::parse_from_str(time, "%Y-%m-%dT%H:%M")
                .map_err(|_| FetchError::Schema(format!("invalid hourly time '{time}'")))?;
            let reading = WeatherObservation::new(round_half_up(*temp), *code);
            Ok(HourlyForecastEntry {
                hour: at.format("%H:00").to_string(),
                temperature_c: reading.temperature_c,
                condition_code: reading.condition_code,
                condition: reading.condition,
            })
        })
        .collect()
}

/// Halves round toward positive infinity: 14.5 → 15, -14.5 → -14.
pub fn round_half_up(value: f64) -> i32 {
    let floor = value.floor();
    let rounded = if value - floor >= 0.5 { floor + 1.0 } else { floor };
    rounded as i32
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::IZMIR_KONAK;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn hourly_body() -> serde_json::Value {
        serde_json::json!({
            "latitude": 38.42,
            "longitude": 27.13,
            "timezone": "Europe/Istanbul",
            "current": { "time": "2024-03-05T14:00", "temperature_2m": 14.5, "weather_code": 61 },
            "hourly": {
                "time": ["2024-03-05T14:00", "2024-03-05T15:00", "2024-03-05T16:00", "2024-03-05T17:00"],
                "temperature_2m": [14.4, 13.6, 12.0, -0.5],
                "weather_code": [61, 3, 0, 42]
            }
        })
    }

    #[test]
    fn rounds_half_up() {
        assert_eq!(round_half_up(14.5), 15);
        assert_eq!(round_half_up(14.4), 14);
        assert_eq!(round_half_up(14.6), 15);
        assert_eq!(round_half_up(-14.5), -14);
        assert_eq!(round_half_up(-14.6), -15);
        assert_eq!(round_half_up(0.0), 0);
    }

    #[test]
    fn current_only_url() {
        let provider = OpenMeteoProvider::new();
        assert_eq!(
            provider.request_url(&ForecastRequest::current(IZMIR_KONAK)),
            "https://api.open-meteo.com/v1/forecast?latitude=38.4192&longitude=27.1287\
             &current=temperature_2m,weather_code&timezone=Europe/Istanbul"
        );
    }

    #[test]
    fn hourly_url() {
        let provider = OpenMeteoProvider::new();
        assert_eq!(
            provider.request_url(&ForecastRequest::with_hourly(IZMIR_KONAK)),
            "https://api.open-meteo.com/v1/forecast?latitude=38.4192&longitude=27.1287\
             &current=temperature_2m,weather_code&hourly=temperature_2m,weather_code\
             &timezone=Europe/Istanbul&forecast_hours=4"
        );
    }

    #[tokio::test]
    async fn fetches_current_and_hourly() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/forecast"))
            .and(query_param("current", "temperature_2m,weather_code"))
            .and(query_param("forecast_hours", "4"))
            .respond_with(ResponseTemplate::new(200).set_body_json(hourly_body()))
            .mount(&mock_server)
            .await;

        let provider = OpenMeteoProvider::with_base_url(format!("{}/v1/forecast", mock_server.uri()));
        let forecast = provider
            .fetch(&ForecastRequest::with_hourly(IZMIR_KONAK))
            .await
            .unwrap();

        assert_eq!(forecast.current.temperature_c, 15);
        assert_eq!(forecast.current.condition_code, 61);
        assert_eq!(forecast.current.condition, "Hafif Yağmur");

        let hours: Vec<&str> = forecast.hourly.iter().map(|h| h.hour.as_str()).collect();
        assert_eq!(hours, ["14:00", "15:00", "16:00", "17:00"]);
        let temps: Vec<i32> = forecast.hourly.iter().map(|h| h.temperature_c).collect();
        assert_eq!(temps, [14, 14, 12, 0]);
        assert_eq!(forecast.hourly[1].condition, "Kapalı");
        assert_eq!(forecast.hourly[3].condition, "Bilinmiyor");
    }

    #[tokio::test]
    async fn current_only_ignores_hourly() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/forecast"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "current": { "temperature_2m": 9.2, "weather_code": 2 }
            })))
            .mount(&mock_server)
            .await;

        let provider = OpenMeteoProvider::with_base_url(format!("{}/v1/forecast", mock_server.uri()));
        let forecast = provider
            .fetch(&ForecastRequest::current(IZMIR_KONAK))
            .await
            .unwrap();

        assert_eq!(forecast.current, WeatherObservation::new(9, 2));
        assert!(forecast.hourly.is_empty());
    }

    #[tokio::test]
    async fn non_success_status_is_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(400).set_body_string(r#"{"error":true,"reason":"bad"}"#),
            )
            .mount(&mock_server)
            .await;

        let provider = OpenMeteoProvider::with_base_url(mock_server.uri());
        let err = provider
            .fetch(&ForecastRequest::current(IZMIR_KONAK))
            .await
            .unwrap_err();

        assert!(matches!(err, FetchError::Status { .. }));
        assert!(err.to_string().contains("400"));
    }

    #[tokio::test]
    async fn malformed_json_is_parse_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&mock_server)
            .await;

        let provider = OpenMeteoProvider::with_base_url(mock_server.uri());
        let err = provider
            .fetch(&ForecastRequest::current(IZMIR_KONAK))
            .await
            .unwrap_err();

        assert!(matches!(err, FetchError::Parse(_)));
    }

    #[test]
    fn short_hourly_series_is_schema_error() {
        let parsed: OmResponse = serde_json::from_value(serde_json::json!({
            "current": { "temperature_2m": 10.0, "weather_code": 0 },
            "hourly": {
                "time": ["2024-03-05T14:00", "2024-03-05T15:00"],
                "temperature_2m": [10.0, 11.0],
                "weather_code": [0, 0]
            }
        }))
        .unwrap();

        let err = parse_forecast(parsed, true).unwrap_err();
        assert!(err.to_string().contains("expected 4 hourly readings, got 2"));
    }

    #[test]
    fn missing_hourly_series_is_schema_error() {
        let parsed: OmResponse = serde_json::from_value(serde_json::json!({
            "current": { "temperature_2m": 10.0, "weather_code": 0 }
        }))
        .unwrap();

        assert!(matches!(parse_forecast(parsed, true), Err(FetchError::Schema(_))));
    }

    #[test]
    fn bad_hourly_time_is_schema_error() {
        let parsed: OmResponse = serde_json::from_value(serde_json::json!({
            "current": { "temperature_2m": 10.0, "weather_code": 0 },
            "hourly": {
                "time": ["yesterday", "2024-03-05T15:00", "2024-03-05T16:00", "2024-03-05T17:00"],
                "temperature_2m": [10.0, 11.0, 12.0, 13.0],
                "weather_code": [0, 0, 0, 0]
            }
        }))
        .unwrap();

        let err = parse_forecast(parsed, true).unwrap_err();
        assert!(err.to_string().contains("yesterday"));
    }

    #[test]
    fn long_hourly_series_is_cut_to_four() {
        let parsed: OmResponse = serde_json::from_value(serde_json::json!({
            "current": { "temperature_2m": 10.0, "weather_code": 0 },
            "hourly": {
                "time": ["2024-03-05T22:00", "2024-03-05T23:00", "2024-03-06T00:00", "2024-03-06T01:00", "2024-03-06T02:00"],
                "temperature_2m": [1.0, 2.0, 3.0, 4.0, 5.0],
                "weather_code": [0, 1, 2, 3, 45]
            }
        }))
        .unwrap();

        let forecast = parse_forecast(parsed, true).unwrap();
        assert_eq!(forecast.hourly.len(), HOURLY_ENTRIES);
        assert_eq!(forecast.hourly[2].hour, "00:00");
        assert_eq!(forecast.hourly[3].temperature_c, 4);
    }

    #[test]
    fn truncates_long_bodies_on_char_boundary() {
        let body = "ş".repeat(300);
        let truncated = truncate_body(&body);
        assert!(truncated.ends_with("..."));
        assert_eq!(truncated.chars().count(), 203);
        assert_eq!(truncate_body("short"), "short");
    }
}
