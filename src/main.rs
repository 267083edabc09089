use anyhow::Context;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use linguaschool_web::api::SchoolApiClient;
use linguaschool_web::cache::{start_cache_warmer, CatalogCache};
use linguaschool_web::config::Config;
use linguaschool_web::{app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "linguaschool_web=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().context("Failed to read configuration")?;
    let api = SchoolApiClient::new(&config.api_base_url, &config.api_key, config.http_timeout)
        .context("Failed to build HTTP client")?;
    let cache = CatalogCache::new(config.catalog_cache_ttl);

    tokio::spawn(start_cache_warmer(
        cache.clone(),
        api.clone(),
        config.catalog_cache_ttl,
    ));

    let bind_addr = config.bind_addr.clone();
    let state = AppState::new(config, api, cache);

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", bind_addr))?;
    info!("Listening on {}", bind_addr);

    axum::serve(listener, app(state)).await?;
    Ok(())
}
