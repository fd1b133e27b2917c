use crate::db::models::{Area, ShortTermForecast, WeeklyForecast};
use crate::db::schema::SQLITE_INIT;
use crate::error::NexusError;
use crate::types::forecast::{DayForecast, WeeklyEntry};
use sqlx::{Pool, Sqlite};

pub type SqlitePool = Pool<Sqlite>;

/// Area upsert statement. Timestamps carry millisecond precision so
/// consecutive upserts within one second still observably bump `updated_at`.
const UPSERT_AREA: &str = r#"
INSERT INTO areas (area_code, area_name, created_at, updated_at)
VALUES (?, ?, strftime('%Y-%m-%d %H:%M:%f','now'), strftime('%Y-%m-%d %H:%M:%f','now'))
ON CONFLICT(area_code) DO UPDATE SET
    area_name=excluded.area_name,
    updated_at=excluded.updated_at
"#;

#[derive(Clone)]
pub struct ForecastStorage {
    pool: SqlitePool,
}

impl ForecastStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Initialize the schema by executing the bundled DDL.
    pub async fn init_schema(&self) -> Result<(), NexusError> {
        // execute multiple statements safely (SQLite supports multi-commands but sqlx::query doesn't)
        for stmt in SQLITE_INIT.split(';') {
            let s = stmt.trim();
            if s.is_empty() {
                continue;
            }
            sqlx::query(s).execute(&self.pool).await?;
        }
        Ok(())
    }

    /// Upsert by `area_code`: insert-or-update, last write wins on the name.
    pub async fn upsert_area(&self, area_code: &str, area_name: &str) -> Result<(), NexusError> {
        sqlx::query(UPSERT_AREA)
            .bind(area_code)
            .bind(area_name)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Batch upsert using a single transaction.
    pub async fn upsert_areas(&self, entries: &[(String, String)]) -> Result<(), NexusError> {
        let mut tx = self.pool.begin().await?;

        for (area_code, area_name) in entries {
            sqlx::query(UPSERT_AREA)
                .bind(area_code)
                .bind(area_name)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    pub async fn list_areas(&self) -> Result<Vec<Area>, NexusError> {
        let rows = sqlx::query_as::<_, Area>(
            "SELECT area_code, area_name, created_at, updated_at FROM areas ORDER BY area_code",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn get_area(&self, area_code: &str) -> Result<Option<Area>, NexusError> {
        let row = sqlx::query_as::<_, Area>(
            "SELECT area_code, area_name, created_at, updated_at FROM areas WHERE area_code = ?",
        )
        .bind(area_code)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    /// Append one short-term row under the caller's snapshot timestamp.
    ///
    /// A collision on `(area_code, forecast_date, fetched_at)` is an
    /// idempotent no-op: a fresh ingestion never reuses a timestamp, so a
    /// duplicate can only be a feed replay or a same-second racing call
    /// writing identical data.
    pub async fn insert_short_term(
        &self,
        area_code: &str,
        day: &DayForecast,
        report_datetime: &str,
        fetched_at: &str,
    ) -> Result<(), NexusError> {
        sqlx::query(
            r#"
            INSERT INTO short_term_forecasts
            (area_code, forecast_date, weather_code, weather_text, temp_min, temp_max, pop, wind, report_datetime, fetched_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(area_code, forecast_date, fetched_at) DO NOTHING
            "#,
        )
        .bind(area_code)
        .bind(&day.date)
        .bind(&day.weather_code)
        .bind(&day.weather_text)
        .bind(&day.temp_min)
        .bind(&day.temp_max)
        .bind(day.pop.to_string())
        .bind(&day.wind)
        .bind(report_datetime)
        .bind(fetched_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Append every weekly row of one snapshot inside a single transaction,
    /// all under the caller's `fetched_at`. Same collision policy as
    /// [`Self::insert_short_term`].
    pub async fn insert_weekly(
        &self,
        area_code: &str,
        entries: &[WeeklyEntry],
        fetched_at: &str,
    ) -> Result<(), NexusError> {
        let mut tx = self.pool.begin().await?;

        for entry in entries {
            sqlx::query(
                r#"
                INSERT INTO weekly_forecasts
                (area_code, forecast_date, weather_code, pop, temp_min, temp_max, reliability, fetched_at)
                VALUES (?, ?, ?, ?, ?, ?, ?, ?)
                ON CONFLICT(area_code, forecast_date, fetched_at) DO NOTHING
                "#,
            )
            .bind(area_code)
            .bind(&entry.date)
            .bind(&entry.weather_code)
            .bind(&entry.pop)
            .bind(&entry.temp_min)
            .bind(&entry.temp_max)
            .bind(&entry.reliability)
            .bind(fetched_at)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    /// Latest short-term rows for an area.
    ///
    /// With a date: the single most recent row for `(area, date)`. Without:
    /// every row of the newest snapshot (all rows sharing `MAX(fetched_at)`),
    /// ordered by forecast date.
    pub async fn latest_forecast(
        &self,
        area_code: &str,
        forecast_date: Option<&str>,
    ) -> Result<Vec<ShortTermForecast>, NexusError> {
        let rows = match forecast_date {
            Some(date) => {
                sqlx::query_as::<_, ShortTermForecast>(
                    r#"
                    SELECT id, area_code, forecast_date, weather_code, weather_text,
                           temp_min, temp_max, pop, wind, report_datetime, fetched_at
                    FROM short_term_forecasts
                    WHERE area_code = ? AND forecast_date = ?
                    ORDER BY fetched_at DESC
                    LIMIT 1
                    "#,
                )
                .bind(area_code)
                .bind(date)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, ShortTermForecast>(
                    r#"
                    SELECT id, area_code, forecast_date, weather_code, weather_text,
                           temp_min, temp_max, pop, wind, report_datetime, fetched_at
                    FROM short_term_forecasts
                    WHERE area_code = ?
                      AND fetched_at = (SELECT MAX(fetched_at) FROM short_term_forecasts WHERE area_code = ?)
                    ORDER BY forecast_date
                    "#,
                )
                .bind(area_code)
                .bind(area_code)
                .fetch_all(&self.pool)
                .await?
            }
        };
        Ok(rows)
    }

    /// Every weekly row of the newest weekly snapshot for an area, ordered
    /// ascending by forecast date. All returned rows share one `fetched_at`.
    pub async fn latest_weekly(&self, area_code: &str) -> Result<Vec<WeeklyForecast>, NexusError> {
        let latest: Option<(Option<String>,)> =
            sqlx::query_as("SELECT MAX(fetched_at) FROM weekly_forecasts WHERE area_code = ?")
                .bind(area_code)
                .fetch_optional(&self.pool)
                .await?;

        let Some((Some(fetched_at),)) = latest else {
            return Ok(Vec::new());
        };

        let rows = sqlx::query_as::<_, WeeklyForecast>(
            r#"
            SELECT id, area_code, forecast_date, weather_code, pop,
                   temp_min, temp_max, reliability, fetched_at
            FROM weekly_forecasts
            WHERE area_code = ? AND fetched_at = ?
            ORDER BY forecast_date
            "#,
        )
        .bind(area_code)
        .bind(&fetched_at)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Distinct snapshot timestamps for an area, newest first.
    pub async fn history_list(
        &self,
        area_code: &str,
        limit: u32,
    ) -> Result<Vec<String>, NexusError> {
        let rows: Vec<(String,)> = sqlx::query_as(
            r#"
            SELECT DISTINCT fetched_at FROM short_term_forecasts
            WHERE area_code = ?
            ORDER BY fetched_at DESC
            LIMIT ?
            "#,
        )
        .bind(area_code)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(|(ts,)| ts).collect())
    }

    /// Every short-term row of one historical snapshot.
    pub async fn historical_snapshot(
        &self,
        area_code: &str,
        fetched_at: &str,
    ) -> Result<Vec<ShortTermForecast>, NexusError> {
        let rows = sqlx::query_as::<_, ShortTermForecast>(
            r#"
            SELECT id, area_code, forecast_date, weather_code, weather_text,
                   temp_min, temp_max, pop, wind, report_datetime, fetched_at
            FROM short_term_forecasts
            WHERE area_code = ? AND fetched_at = ?
            ORDER BY forecast_date
            "#,
        )
        .bind(area_code)
        .bind(fetched_at)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
