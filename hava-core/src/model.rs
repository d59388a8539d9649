use crate::conditions::condition_label;

/// A fixed point on the map plus the name printed under the reading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Location {
    pub name: &'static str,
    pub latitude: f64,
    pub longitude: f64,
}

/// Göztepe, Konak district of İzmir.
pub const IZMIR_KONAK: Location = Location {
    name: "İzmir · Konak",
    latitude: 38.4192,
    longitude: 27.1287,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForecastRequest {
    pub location: Location,
    /// Also ask for the next [`HOURLY_ENTRIES`] hourly readings.
    pub hourly: bool,
}

impl ForecastRequest {
    pub fn current(location: Location) -> Self {
        Self { location, hourly: false }
    }

    pub fn with_hourly(location: Location) -> Self {
        Self { location, hourly: true }
    }
}

/// Number of hourly readings kept from the API series.
pub const HOURLY_ENTRIES: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherObservation {
    pub temperature_c: i32,
    pub condition_code: i32,
    pub condition: String,
}

impl WeatherObservation {
    pub fn new(temperature_c: i32, condition_code: i32) -> Self {
        Self {
            temperature_c,
            condition_code,
            condition: condition_label(condition_code).to_string(),
        }
    }

    /// Reading shown when the live fetch fails and the caller asked to degrade.
    pub fn fallback() -> Self {
        Self::new(15, 2)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HourlyForecastEntry {
    /// `HH:00` in the location's local time.
    pub hour: String,
    pub temperature_c: i32,
    pub condition_code: i32,
    pub condition: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Forecast {
    pub current: WeatherObservation,
    /// Empty unless hourly data was requested and the fetch succeeded.
    pub hourly: Vec<HourlyForecastEntry>,
}

impl Forecast {
    pub fn fallback() -> Self {
        Self {
            current: WeatherObservation::fallback(),
            hourly: Vec::new(),
        }
    }
}
