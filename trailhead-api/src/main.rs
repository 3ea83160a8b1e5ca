use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use trailhead_api::{app, AppState};
use trailhead_core::clock::SystemClock;
use trailhead_store::{app_config::Config, DbClient, PostgresTourRepository, RedisClient};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "trailhead_api=debug,trailhead_store=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load().context("Failed to load config")?;
    tracing::info!("Starting Trailhead API on port {}", config.server.port);

    let db = DbClient::new(&config.database.url, config.database.max_connections)
        .await
        .context("Failed to connect to Postgres")?;
    db.migrate().await.context("Failed to run migrations")?;

    let rules = match db.fetch_business_rules(config.business_rules.clone()).await {
        Ok(rules) => rules,
        Err(e) => {
            tracing::warn!("Using configured business rules, database overrides unavailable: {}", e);
            config.business_rules.clone()
        }
    };

    let cache = match &config.redis {
        Some(redis) => Some(
            RedisClient::new(&redis.url, redis.snapshot_ttl_seconds)
                .await
                .context("Failed to connect to Redis")?,
        ),
        None => None,
    };

    let tours = Arc::new(PostgresTourRepository::new(db.pool.clone(), cache));
    let state = AppState::new(tours, Arc::new(SystemClock), &rules);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app(state)).await?;

    Ok(())
}
