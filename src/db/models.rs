use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct Area {
    pub area_code: String,
    pub area_name: String,
    pub created_at: String,
    pub updated_at: String,
}

/// A persisted short-term ("today") forecast row. Rows are append-only:
/// never updated or deleted, only superseded by a later `fetched_at`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct ShortTermForecast {
    pub id: i64,
    pub area_code: String,
    pub forecast_date: String,
    pub weather_code: String,
    pub weather_text: String,
    pub temp_min: String,
    pub temp_max: String,
    pub pop: String,
    pub wind: String,
    pub report_datetime: String,
    pub fetched_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct WeeklyForecast {
    pub id: i64,
    pub area_code: String,
    pub forecast_date: String,
    pub weather_code: String,
    pub pop: String,
    pub temp_min: String,
    pub temp_max: String,
    pub reliability: String,
    pub fetched_at: String,
}
