//! WMO weather code lookups: Turkish condition labels and icon selection.
//!
//! See <https://open-meteo.com/en/docs> for the code list.

use serde::{Serialize, Serializer};

/// Label used for any code missing from [`CONDITION_LABELS`].
pub const UNKNOWN_LABEL: &str = "Bilinmiyor";

pub const CONDITION_LABELS: &[(i32, &str)] = &[
    (0, "Açık"),
    (1, "Çoğunlukla Açık"),
    (2, "Parçalı Bulutlu"),
    (3, "Kapalı"),
    (45, "Sisli"),
    (48, "Kırağılı Sis"),
    (51, "Hafif Çisenti"),
    (53, "Orta Çisenti"),
    (55, "Yoğun Çisenti"),
    (56, "Dondurucu Çisenti"),
    (57, "Yoğun Dondurucu Çisenti"),
    (61, "Hafif Yağmur"),
    (63, "Orta Yağmur"),
    (65, "Şiddetli Yağmur"),
    (66, "Dondurucu Yağmur"),
    (67, "Şiddetli Dondurucu Yağmur"),
    (71, "Hafif Kar"),
    (73, "Orta Kar"),
    (75, "Yoğun Kar"),
    (77, "Kar Taneleri"),
    (80, "Hafif Sağanak"),
    (81, "Orta Sağanak"),
    (82, "Şiddetli Sağanak"),
    (85, "Hafif Kar Sağanağı"),
    (86, "Yoğun Kar Sağanağı"),
    (95, "Gök Gürültülü Fırtına"),
    (96, "Dolu ile Fırtına"),
    (99, "Şiddetli Dolu Fırtınası"),
];

pub fn condition_label(code: i32) -> &'static str {
    CONDITION_LABELS
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, label)| *label)
        .unwrap_or(UNKNOWN_LABEL)
}

/// One of the eight pictograms drawn next to the temperature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IconKey {
    Clear,
    PartlyCloudy,
    Overcast,
    Fog,
    Drizzle,
    Rain,
    Snow,
    Thunderstorm,
}

impl IconKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            IconKey::Clear => "sun",
            IconKey::PartlyCloudy => "cloud-sun",
            IconKey::Overcast => "cloud",
            IconKey::Fog => "cloud-fog",
            IconKey::Drizzle => "cloud-drizzle",
            IconKey::Rain => "cloud-rain",
            IconKey::Snow => "snowflake",
            IconKey::Thunderstorm => "cloud-lightning",
        }
    }

    pub const fn all() -> &'static [IconKey] {
        &[
            IconKey::Clear,
            IconKey::PartlyCloudy,
            IconKey::Overcast,
            IconKey::Fog,
            IconKey::Drizzle,
            IconKey::Rain,
            IconKey::Snow,
            IconKey::Thunderstorm,
        ]
    }

    /// Inline SVG markup, 192x192, stroked with `currentColor`.
    pub fn svg(&self) -> &'static str {
        match self {
            IconKey::Clear => include_str!("../templates/icons/sun.svg"),
            IconKey::PartlyCloudy => include_str!("../templates/icons/cloud-sun.svg"),
            IconKey::Overcast => include_str!("../templates/icons/cloud.svg"),
            IconKey::Fog => include_str!("../templates/icons/cloud-fog.svg"),
            IconKey::Drizzle => include_str!("../templates/icons/cloud-drizzle.svg"),
            IconKey::Rain => include_str!("../templates/icons/cloud-rain.svg"),
            IconKey::Snow => include_str!("../templates/icons/snowflake.svg"),
            IconKey::Thunderstorm => include_str!("../templates/icons/cloud-lightning.svg"),
        }
    }
}

impl std::fmt::Display for IconKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for IconKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Coarser than [`condition_label`]: several codes share one icon.
pub fn icon_key(code: i32) -> IconKey {
    match code {
        0 | 1 => IconKey::Clear,
        2 => IconKey::PartlyCloudy,
        3 => IconKey::Overcast,
        45 | 48 => IconKey::Fog,
        51 | 53 | 55 | 56 | 57 => IconKey::Drizzle,
        61 | 63 | 65 | 66 | 67 | 80 | 81 | 82 => IconKey::Rain,
        71 | 73 | 75 | 77 | 85 | 86 => IconKey::Snow,
        95 | 96 | 99 => IconKey::Thunderstorm,
        _ => IconKey::Overcast,
    }
}
