//! Turning a forecast and a date into something to look at.
//!
//! Values are interpolated as-is. Labels and the location name are
//! compiled-in constants, so the output stays byte-identical to the
//! templates without any HTML escaping.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::Serialize;
use std::{fs, path::Path};

use crate::{
    calendar::{format_compact_date, format_date},
    conditions::{IconKey, icon_key},
    model::{Location, WeatherObservation},
};

/// In-memory model behind the interactive dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardView {
    pub date: String,
    pub icon: IconKey,
    pub temperature_c: i32,
    pub condition: String,
    pub location: &'static str,
}

impl DashboardView {
    pub fn new(date: NaiveDate, observation: &WeatherObservation, location: &Location) -> Self {
        Self {
            date: format_compact_date(date),
            icon: icon_key(observation.condition_code),
            temperature_c: observation.temperature_c,
            condition: observation.condition.clone(),
            location: location.name,
        }
    }

    /// Export the view as the standalone serif page.
    pub fn to_html(&self) -> String {
        let temperature = self.temperature_c.to_string();
        interpolate(
            EXPORT_TEMPLATE,
            &[
                ("date", self.date.as_str()),
                ("temperature", temperature.as_str()),
                ("condition", self.condition.as_str()),
                ("location", self.location),
            ],
        )
    }
}

impl std::fmt::Display for DashboardView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.date)?;
        writeln!(f, "[{}] {}°", self.icon, self.temperature_c)?;
        writeln!(f, "{}", self.condition)?;
        write!(f, "{}", self.location)
    }
}

const EINK_TEMPLATE: &str = include_str!("../templates/eink.html");
const EXPORT_TEMPLATE: &str = include_str!("../templates/export.html");

/// The two page layouts. They differ on purpose and are kept separate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Template {
    /// Build-time Kindle page: sans-serif, date over weekday, icon, hourly reload.
    Eink,
    /// Snapshot of the interactive dashboard: serif, one-line date, no icon.
    Export,
}

impl Template {
    pub fn render(
        &self,
        date: NaiveDate,
        observation: &WeatherObservation,
        location: &Location,
    ) -> String {
        match self {
            Template::Eink => {
                let parts = format_date(date);
                let temperature = observation.temperature_c.to_string();
                interpolate(
                    EINK_TEMPLATE,
                    &[
                        ("date_part", parts.date_part.as_str()),
                        ("day_name", parts.day_name),
                        ("icon", icon_key(observation.condition_code).svg()),
                        ("temperature", temperature.as_str()),
                        ("condition", observation.condition.as_str()),
                        ("location", location.name),
                    ],
                )
            }
            Template::Export => DashboardView::new(date, observation, location).to_html(),
        }
    }
}

/// Single pass over `template`, replacing `{{name}}` with its value.
/// Unknown placeholders are copied through untouched.
fn interpolate(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len() + 1024);
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find("}}") {
            Some(end) => {
                let name = &after[..end];
                match vars.iter().find(|(key, _)| *key == name) {
                    Some((_, value)) => out.push_str(value),
                    None => out.push_str(&rest[start..start + 2 + end + 2]),
                }
                rest = &after[end + 2..];
            }
            None => {
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}

/// Write `html` to `path`, creating the parent directory if needed.
pub fn write_document(path: &Path, html: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory: {}", parent.display()))?;
    }

    fs::write(path, html)
        .with_context(|| format!("Failed to write page: {}", path.display()))?;

    Ok(())
}
