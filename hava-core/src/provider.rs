use crate::{Config, Forecast, ForecastRequest, provider::open_meteo::OpenMeteoProvider};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

pub mod open_meteo;

/// Any way the single fetch can fail. The error policy treats all of them alike.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Failed to reach weather API: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Weather API request failed with status {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Failed to parse weather API JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Unexpected weather API response: {0}")]
    Schema(String),
}

/// What to do when the fetch fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorPolicy {
    /// Hand the error to the caller.
    Propagate,
    /// Log it and render [`Forecast::fallback`] instead.
    Fallback,
}

impl ErrorPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorPolicy::Propagate => "propagate",
            ErrorPolicy::Fallback => "fallback",
        }
    }

    pub const fn all() -> &'static [ErrorPolicy] {
        &[ErrorPolicy::Propagate, ErrorPolicy::Fallback]
    }
}

impl std::fmt::Display for ErrorPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn fetch(&self, request: &ForecastRequest) -> Result<Forecast, FetchError>;
}

/// Fetch once and apply `policy` to the outcome.
pub async fn fetch_forecast(
    provider: &dyn WeatherProvider,
    request: &ForecastRequest,
    policy: ErrorPolicy,
) -> Result<Forecast, FetchError> {
    match provider.fetch(request).await {
        Ok(forecast) => Ok(forecast),
        Err(err) => match policy {
            ErrorPolicy::Propagate => Err(err),
            ErrorPolicy::Fallback => {
                tracing::error!(error = %err, "Weather fetch error, using fallback reading");
                Ok(Forecast::fallback())
            }
        },
    }
}

/// Construct the Open-Meteo provider, honoring a configured base URL.
pub fn provider_from_config(config: &Config) -> Box<dyn WeatherProvider> {
    let provider = match config.api_base_url.as_deref() {
        Some(url) => OpenMeteoProvider::with_base_url(url),
        None => OpenMeteoProvider::new(),
    };
    Box::new(provider)
}
