//! Area registry refresh from the upstream registry feed.

use crate::api::JmaApi;
use crate::db::ForecastStorage;
use crate::error::NexusError;
use tracing::info;

/// Fetch the registry feed and bulk-upsert every office entry.
/// Returns the number of entries applied.
pub async fn refresh_areas(
    api: &JmaApi,
    storage: &ForecastStorage,
) -> Result<usize, NexusError> {
    let feed = api.fetch_area_registry().await?;
    let entries: Vec<(String, String)> = feed
        .offices
        .into_iter()
        .map(|(code, office)| (code, office.name))
        .collect();

    storage.upsert_areas(&entries).await?;
    info!(count = entries.len(), "area registry refreshed");
    Ok(entries.len())
}
