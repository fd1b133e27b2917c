//! SQL DDL for initializing the forecast storage.
//! SQLite-first design; can be adapted for other RDBMS.

/// SQLite schema with:
/// - `areas` keyed by the immutable registry `area_code`
/// - `short_term_forecasts` / `weekly_forecasts` append-only, one row per
///   forecast day, grouped into snapshots by `fetched_at`
/// - `UNIQUE(area_code, forecast_date, fetched_at)` on both forecast tables
///   so a replayed snapshot cannot double-insert
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS areas (
    area_code TEXT PRIMARY KEY,
    area_name TEXT NOT NULL,
    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
    updated_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
);

CREATE TABLE IF NOT EXISTS short_term_forecasts (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    area_code TEXT NOT NULL,
    forecast_date DATE NOT NULL,
    weather_code TEXT,
    weather_text TEXT,
    temp_min TEXT,
    temp_max TEXT,
    pop TEXT,
    wind TEXT,
    report_datetime TIMESTAMP,
    fetched_at TIMESTAMP NOT NULL,
    FOREIGN KEY (area_code) REFERENCES areas(area_code),
    UNIQUE(area_code, forecast_date, fetched_at)
);

CREATE TABLE IF NOT EXISTS weekly_forecasts (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    area_code TEXT NOT NULL,
    forecast_date DATE NOT NULL,
    weather_code TEXT,
    pop TEXT,
    temp_min TEXT,
    temp_max TEXT,
    reliability TEXT,
    fetched_at TIMESTAMP NOT NULL,
    FOREIGN KEY (area_code) REFERENCES areas(area_code),
    UNIQUE(area_code, forecast_date, fetched_at)
);

CREATE INDEX IF NOT EXISTS idx_short_term_area_date ON short_term_forecasts(area_code, forecast_date);
CREATE INDEX IF NOT EXISTS idx_weekly_area_date ON weekly_forecasts(area_code, forecast_date);
CREATE INDEX IF NOT EXISTS idx_short_term_fetched ON short_term_forecasts(fetched_at);
"#;
