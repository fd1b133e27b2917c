use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};

use crate::db::models::{ShortTermForecast, WeeklyForecast};
use crate::service::ingest::ingest_forecast;
use crate::types::forecast::ForecastBundle;
use crate::{NexusError, router::NexusState};

#[derive(Serialize)]
pub struct LatestResponse {
    pub forecasts: Vec<ShortTermForecast>,
    pub weekly: Vec<WeeklyForecast>,
}

#[derive(Deserialize)]
pub struct HistoryParams {
    pub limit: Option<u32>,
}

#[derive(Deserialize)]
pub struct LatestParams {
    pub date: Option<String>,
}

/// Ingest: fetch the upstream feed, persist one snapshot, return the
/// normalized bundle directly.
pub async fn ingest_handler(
    State(state): State<NexusState>,
    Path(area_code): Path<String>,
) -> Result<Json<ForecastBundle>, NexusError> {
    let bundle = ingest_forecast(&state.api, &state.storage, &area_code).await?;
    Ok(Json(bundle))
}

/// Latest stored snapshot for an area: short-term rows (optionally narrowed
/// to one forecast date) plus the newest weekly snapshot.
pub async fn latest_handler(
    State(state): State<NexusState>,
    Path(area_code): Path<String>,
    Query(params): Query<LatestParams>,
) -> Result<Json<LatestResponse>, NexusError> {
    let forecasts = state
        .storage
        .latest_forecast(&area_code, params.date.as_deref())
        .await?;
    let weekly = state.storage.latest_weekly(&area_code).await?;
    Ok(Json(LatestResponse { forecasts, weekly }))
}

pub async fn history_handler(
    State(state): State<NexusState>,
    Path(area_code): Path<String>,
    Query(params): Query<HistoryParams>,
) -> Result<Json<Vec<String>>, NexusError> {
    let limit = params.limit.unwrap_or(10);
    let history = state.storage.history_list(&area_code, limit).await?;
    Ok(Json(history))
}

pub async fn historical_handler(
    State(state): State<NexusState>,
    Path((area_code, fetched_at)): Path<(String, String)>,
) -> Result<Json<Vec<ShortTermForecast>>, NexusError> {
    let rows = state
        .storage
        .historical_snapshot(&area_code, &fetched_at)
        .await?;
    Ok(Json(rows))
}
