//! Normalized forecast records produced by one decode of the feed.

use serde::{Deserialize, Serialize};

/// One day's short-term forecast. `temp_min`/`temp_max` are only populated
/// for today; the feed carries no tomorrow temperatures at this granularity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DayForecast {
    pub date: String,
    pub weather_code: String,
    pub weather_text: String,
    pub temp_min: String,
    pub temp_max: String,
    pub pop: u32,
    pub wind: String,
}

/// One weekly-forecast entry. All fields are upstream passthrough strings,
/// including `pop` (not aggregated at this granularity).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeeklyEntry {
    pub date: String,
    pub weather_code: String,
    pub pop: String,
    pub temp_min: String,
    pub temp_max: String,
    pub reliability: String,
}

/// The full result of decoding one forecast feed payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ForecastBundle {
    pub today: Option<DayForecast>,
    pub tomorrow: Option<DayForecast>,
    pub weekly: Vec<WeeklyEntry>,
    pub report_datetime: String,
    pub area_name: String,
}
