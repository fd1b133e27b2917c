use axum::{Json, extract::State};
use serde::Serialize;

use crate::db::models::Area;
use crate::service::areas::refresh_areas;
use crate::{NexusError, router::NexusState};

#[derive(Serialize)]
pub struct RefreshResponse {
    pub message: String,
    pub count: usize,
}

/// List all known areas. An empty registry is populated from the upstream
/// feed first, so the first call after a fresh install self-seeds.
pub async fn list_areas_handler(
    State(state): State<NexusState>,
) -> Result<Json<Vec<Area>>, NexusError> {
    let mut areas = state.storage.list_areas().await?;
    if areas.is_empty() {
        refresh_areas(&state.api, &state.storage).await?;
        areas = state.storage.list_areas().await?;
    }
    Ok(Json(areas))
}

/// Force re-fetch of the registry feed and bulk upsert.
pub async fn refresh_areas_handler(
    State(state): State<NexusState>,
) -> Result<Json<RefreshResponse>, NexusError> {
    let count = refresh_areas(&state.api, &state.storage).await?;
    Ok(Json(RefreshResponse {
        message: "Areas refreshed".to_string(),
        count,
    }))
}
