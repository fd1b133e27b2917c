//! Process configuration, loaded once from the environment.
//!
//! All knobs are plain `NEXUS_*` environment variables (a `.env` file is
//! honored via dotenvy in `main`). Missing values fall back to defaults
//! suitable for local development.

use figment::{Figment, providers::Env, providers::Serialized};
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use url::Url;

/// JMA area registry feed (code -> office metadata).
pub static JMA_AREA_URL: LazyLock<Url> = LazyLock::new(|| {
    CONFIG
        .jma_base_url
        .join("bosai/common/const/area.json")
        .expect("invalid JMA area URL")
});

/// Forecast feed path under the JMA base; the area code is appended per call.
pub const JMA_FORECAST_PATH: &str = "bosai/forecast/data/forecast/";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// SQLite connection string, e.g. `sqlite:weather.db?mode=rwc`.
    pub database_url: String,
    /// Address the HTTP server binds to.
    pub listen_addr: String,
    /// Default log filter when RUST_LOG is unset.
    pub loglevel: String,
    /// Base URL of the upstream JMA service.
    pub jma_base_url: Url,
    /// Overall timeout for one upstream fetch, in seconds.
    pub fetch_timeout_secs: u64,
    /// Connect timeout for the upstream client, in seconds.
    pub connect_timeout_secs: u64,
    /// Optional outbound proxy URL.
    pub proxy: Option<Url>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: "sqlite:weather.db?mode=rwc".to_string(),
            listen_addr: "0.0.0.0:8000".to_string(),
            loglevel: "info".to_string(),
            jma_base_url: Url::parse("https://www.jma.go.jp/")
                .expect("invalid default JMA base URL"),
            fetch_timeout_secs: 15,
            connect_timeout_secs: 5,
            proxy: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Env::prefixed("NEXUS_"))
            .extract()
            .expect("FATAL: invalid NEXUS_* configuration")
    }
}

pub static CONFIG: LazyLock<Config> = LazyLock::new(Config::from_env);
