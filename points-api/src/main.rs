use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use anyhow::Context;
use points_api::{app, state::spawn_view_sweeper, AppState};
use points_results::{Diagnostics, ViewRegistry};
use points_store::PointsApiClient;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "points_api=debug,points_results=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = points_store::app_config::Config::load().context("Failed to load config")?;
    tracing::info!("Starting Points API on port {}", config.server.port);
    tracing::info!("Flight search backend at {}", config.api.base_url);

    let client = Arc::new(
        PointsApiClient::from_config(&config.api).context("Failed to build search client")?,
    );
    let diagnostics = Diagnostics::new(config.diagnostics.channel_capacity);

    let registry = ViewRegistry::with_idle_ttl(Duration::from_secs(config.views.idle_ttl_seconds));

    let app_state = AppState::with_registry(registry, client.clone(), client, diagnostics);
    spawn_view_sweeper(
        app_state.views.clone(),
        Duration::from_secs(config.views.sweep_interval_seconds.max(1)),
    );
    let app = app(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
