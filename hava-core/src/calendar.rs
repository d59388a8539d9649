//! Localized date decomposition.

use chrono::{Datelike, NaiveDate};

/// Month and weekday names; months indexed from January, weekdays from Sunday.
#[derive(Debug, Clone, Copy)]
pub struct CalendarNames {
    pub months: [&'static str; 12],
    pub days: [&'static str; 7],
}

pub const TURKISH: CalendarNames = CalendarNames {
    months: [
        "Ocak", "Şubat", "Mart", "Nisan", "Mayıs", "Haziran", "Temmuz", "Ağustos", "Eylül",
        "Ekim", "Kasım", "Aralık",
    ],
    days: [
        "Pazar",
        "Pazartesi",
        "Salı",
        "Çarşamba",
        "Perşembe",
        "Cuma",
        "Cumartesi",
    ],
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateParts {
    /// `D Month YYYY`, e.g. `5 Mart 2024`.
    pub date_part: String,
    pub day_name: &'static str,
}

impl CalendarNames {
    /// Month name with only its first character upper-cased.
    pub fn month(&self, date: NaiveDate) -> String {
        capitalize(self.months[date.month0() as usize])
    }

    pub fn day(&self, date: NaiveDate) -> &'static str {
        self.days[date.weekday().num_days_from_sunday() as usize]
    }
}

pub fn format_date(date: NaiveDate) -> DateParts {
    format_date_with(&TURKISH, date)
}

pub fn format_date_with(names: &CalendarNames, date: NaiveDate) -> DateParts {
    DateParts {
        date_part: format!("{} {} {}", date.day(), names.month(date), date.year()),
        day_name: names.day(date),
    }
}

/// One-line `D Month DayName` form used by the dashboard.
pub fn format_compact_date(date: NaiveDate) -> String {
    let names = &TURKISH;
    format!("{} {} {}", date.day(), names.month(date), names.day(date))
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
