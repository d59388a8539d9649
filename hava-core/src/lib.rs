//! Core library for the `hava` weather page generator.
//!
//! This crate defines:
//! - Fetching current and hourly readings from Open-Meteo, with an explicit error policy
//! - WMO code lookups (Turkish labels, icons) and Turkish date formatting
//! - The dashboard view-model and the two HTML page templates
//! - Configuration handling
//!
//! It is used by `hava-cli`, but can also be reused by other binaries or services.

pub mod calendar;
pub mod conditions;
pub mod config;
pub mod model;
pub mod provider;
pub mod render;

pub use calendar::{DateParts, format_date};
pub use conditions::{IconKey, condition_label, icon_key};
pub use config::Config;
pub use model::{Forecast, ForecastRequest, HourlyForecastEntry, IZMIR_KONAK, Location, WeatherObservation};
pub use provider::{ErrorPolicy, FetchError, WeatherProvider, fetch_forecast};
pub use render::{DashboardView, Template, write_document};
