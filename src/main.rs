use mimalloc::MiMalloc;
use sqlx::sqlite::SqlitePoolOptions;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cfg = &jma_nexus::config::CONFIG;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cfg.loglevel.clone()));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_level(true)
                .with_target(false),
        )
        .init();

    info!(
        database_url = %cfg.database_url,
        jma_base_url = %cfg.jma_base_url,
        proxy = %cfg.proxy.as_ref().map(|u| u.as_str()).unwrap_or("<none>"),
        loglevel = %cfg.loglevel
    );

    let pool = SqlitePoolOptions::new()
        .connect(&cfg.database_url)
        .await?;
    let storage = jma_nexus::db::ForecastStorage::new(pool);
    storage.init_schema().await?;
    info!("database schema initialized");

    let api = jma_nexus::api::JmaApi::new();

    // Build axum router and serve
    let state = jma_nexus::router::NexusState::new(storage, api);
    let app = jma_nexus::router::nexus_router(state);

    let listener = TcpListener::bind(&cfg.listen_addr).await?;
    info!("HTTP server listening on {}", cfg.listen_addr);
    axum::serve(listener, app).await?;
    Ok(())
}
