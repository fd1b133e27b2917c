use axum::{
    Router,
    routing::{get, post},
};

use crate::api::JmaApi;
use crate::db::ForecastStorage;
use crate::handlers::areas::{list_areas_handler, refresh_areas_handler};
use crate::handlers::forecast::{
    historical_handler, history_handler, ingest_handler, latest_handler,
};

#[derive(Clone)]
pub struct NexusState {
    pub storage: ForecastStorage,
    pub api: JmaApi,
}

impl NexusState {
    pub fn new(storage: ForecastStorage, api: JmaApi) -> Self {
        Self { storage, api }
    }
}

pub fn nexus_router(state: NexusState) -> Router {
    Router::new()
        .route("/api/areas", get(list_areas_handler))
        .route("/api/areas/refresh", post(refresh_areas_handler))
        .route("/api/forecast/{area_code}", get(ingest_handler))
        .route("/api/forecast/{area_code}/latest", get(latest_handler))
        .route("/api/forecast/{area_code}/history", get(history_handler))
        .route(
            "/api/forecast/{area_code}/history/{fetched_at}",
            get(historical_handler),
        )
        .with_state(state)
}
