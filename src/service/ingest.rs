//! Ingestion: fetch one area's feed, decode it, persist the snapshot.

use crate::api::JmaApi;
use crate::db::ForecastStorage;
use crate::error::NexusError;
use crate::service::forecast::parse_forecast;
use crate::types::forecast::ForecastBundle;
use chrono::Utc;
use tracing::{debug, info};

/// Snapshot identifier: one second-granularity UTC timestamp, generated once
/// per ingestion call and shared by every row it writes.
pub fn snapshot_timestamp() -> String {
    Utc::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Fetch, decode, and persist one forecast snapshot for `area_code`.
///
/// Transport failures propagate before anything is written. The decoded
/// bundle is returned directly to the caller, not re-read from the store.
pub async fn ingest_forecast(
    api: &JmaApi,
    storage: &ForecastStorage,
    area_code: &str,
) -> Result<ForecastBundle, NexusError> {
    let feed = api.fetch_forecast(area_code).await?;
    let fetched_at = snapshot_timestamp();
    let bundle = parse_forecast(&feed);

    persist_snapshot(storage, area_code, &bundle, &fetched_at).await?;

    info!(
        area_code,
        fetched_at,
        today = bundle.today.is_some(),
        weekly = bundle.weekly.len(),
        "forecast snapshot stored"
    );
    Ok(bundle)
}

/// Write one decoded bundle under a single snapshot timestamp.
///
/// "today" and all weekly entries are persisted; "tomorrow" is returned to
/// the caller only and never written, since no retrieval operation reads it.
pub async fn persist_snapshot(
    storage: &ForecastStorage,
    area_code: &str,
    bundle: &ForecastBundle,
    fetched_at: &str,
) -> Result<(), NexusError> {
    if bundle.today.is_none() && bundle.weekly.is_empty() {
        return Ok(());
    }

    // Referential integrity: the area row must exist before any forecast
    // row referencing it is committed.
    ensure_area(storage, area_code, &bundle.area_name).await?;

    if let Some(today) = &bundle.today {
        storage
            .insert_short_term(area_code, today, &bundle.report_datetime, fetched_at)
            .await?;
    }
    if !bundle.weekly.is_empty() {
        storage
            .insert_weekly(area_code, &bundle.weekly, fetched_at)
            .await?;
    }
    Ok(())
}

/// Make sure the area row exists before forecast rows reference it.
///
/// The registry feed is the authority on names; an area already present is
/// left untouched. An unknown code is seeded from the feed's own area name,
/// or the code itself when the feed carries none.
async fn ensure_area(
    storage: &ForecastStorage,
    area_code: &str,
    feed_area_name: &str,
) -> Result<(), NexusError> {
    if storage.get_area(area_code).await?.is_some() {
        return Ok(());
    }
    let name = if feed_area_name.is_empty() {
        area_code
    } else {
        feed_area_name
    };
    debug!(area_code, name, "seeding unknown area from forecast feed");
    storage.upsert_area(area_code, name).await
}
