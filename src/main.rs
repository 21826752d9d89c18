use std::{net::SocketAddr, sync::Arc};

use sketchday::{
    AppState, build_router,
    config::Config,
    db::Database,
    error::Result,
    services::notifications::{NoopDelivery, PushDelivery, WebPushDelivery},
    utils::server::{init_tracing, shutdown_signal},
};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing()?;

    let config = Config::from_env()?;
    config.validate()?;
    tracing::info!("Configuration loaded");

    let db = Database::connect(&config.database).await?;
    tracing::info!("Database initialized");

    db.run_migrations().await?;
    tracing::info!("Migrations completed");

    let push: Arc<dyn PushDelivery> = if config.push.enabled {
        Arc::new(WebPushDelivery::new(&config.push)?)
    } else {
        Arc::new(NoopDelivery)
    };
    tracing::info!(enabled = config.push.enabled, "Push delivery initialized");

    let state = AppState {
        config: Arc::new(config.clone()),
        db: Arc::new(db),
        push,
    };

    let app = build_router(state);

    let server_addr = format!("{}:{}", config.server.host, config.server.port);

    let listener = TcpListener::bind(server_addr).await?;
    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;
    tracing::info!("Server shutdown complete");

    Ok(())
}
