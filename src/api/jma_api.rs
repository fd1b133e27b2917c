use crate::config::{CONFIG, JMA_AREA_URL, JMA_FORECAST_PATH};
use crate::error::NexusError;
use crate::types::feed::{AreaRegistryFeed, ForecastFeed};
use backon::{ExponentialBuilder, Retryable};
use reqwest::Url;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::error;

fn default_retry_policy() -> ExponentialBuilder {
    ExponentialBuilder::default()
        .with_min_delay(Duration::from_secs(1))
        .with_max_delay(Duration::from_secs(3))
        .with_max_times(3)
        .with_jitter()
}

/// Outbound client for the JMA bosai feeds.
///
/// The underlying reqwest client carries connect and overall timeouts, so a
/// stalled upstream cannot hang an ingestion call; dropping the calling
/// future aborts the request in flight.
#[derive(Clone)]
pub struct JmaApi {
    client: reqwest::Client,
}

impl JmaApi {
    pub fn new() -> Self {
        let mut builder = reqwest::Client::builder()
            .user_agent("jma-nexus/0.3")
            .connect_timeout(Duration::from_secs(CONFIG.connect_timeout_secs))
            .timeout(Duration::from_secs(CONFIG.fetch_timeout_secs));
        if let Some(proxy_url) = CONFIG.proxy.clone() {
            let proxy = reqwest::Proxy::all(proxy_url.as_str())
                .expect("invalid NEXUS_PROXY url for reqwest client");
            builder = builder.proxy(proxy);
        }
        let client = builder
            .build()
            .expect("FATAL: initialize JMA HTTP client failed");
        Self { client }
    }

    /// Fetch the forecast feed for one area: a sequence of up to two report
    /// blocks (short-term, weekly).
    pub async fn fetch_forecast(&self, area_code: &str) -> Result<ForecastFeed, NexusError> {
        let url = CONFIG
            .jma_base_url
            .join(JMA_FORECAST_PATH)?
            .join(&format!("{area_code}.json"))?;
        self.get_json(url).await
    }

    /// Fetch the area registry feed (office code -> metadata).
    pub async fn fetch_area_registry(&self) -> Result<AreaRegistryFeed, NexusError> {
        self.get_json(JMA_AREA_URL.clone()).await
    }

    async fn get_json<T>(&self, url: Url) -> Result<T, NexusError>
    where
        T: DeserializeOwned,
    {
        let resp = (|| async {
            let resp = self.client.get(url.clone()).send().await?;
            if resp.status().is_server_error() {
                let status = resp.status();
                let err = resp.error_for_status().unwrap_err();
                error!("JMA server error (will retry): {}", status);
                return Err(err);
            }
            Ok(resp)
        })
        .retry(default_retry_policy())
        .await?;

        if !resp.status().is_success() {
            return Err(NexusError::UpstreamStatus(resp.status()));
        }

        Ok(resp.json::<T>().await?)
    }
}

impl Default for JmaApi {
    fn default() -> Self {
        Self::new()
    }
}
