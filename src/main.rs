//! Planning poker server binary.
//!
//! # Usage
//!
//! ```bash
//! # Development defaults (0.0.0.0:3000, human-readable logs)
//! planning-poker
//!
//! # Production
//! PORT=8080 PLANNING_POKER__SERVER__ENVIRONMENT=production planning-poker
//! ```

use std::sync::Arc;

use planning_poker::adapters::http::app_router;
use planning_poker::adapters::websocket::{BroadcastGateway, RoomManager, WebSocketState};
use planning_poker::application::{SessionEngine, SessionRegistry};
use planning_poker::config::{AppConfig, ServerConfig};
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;
    init_tracing(&config.server);

    tracing::info!(
        environment = ?config.server.environment,
        default_deck = %config.rooms.default_deck,
        "Planning poker server starting"
    );

    let room_manager = Arc::new(RoomManager::new(config.rooms.channel_capacity));
    let (engine_tx, engine_rx) = mpsc::channel(config.rooms.command_queue_capacity);

    let engine = SessionEngine::new(
        SessionRegistry::new(),
        config.rooms.session_defaults(),
        BroadcastGateway::new(room_manager.clone()),
    );
    let engine_task = tokio::spawn(engine.run(engine_rx));

    let app = app_router(
        WebSocketState::new(room_manager, engine_tx),
        &config.server.cors_origins_list(),
    );

    let listener = TcpListener::bind(config.server.socket_addr()?).await?;
    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    engine_task.abort();
    tracing::info!("Server stopped");
    Ok(())
}

fn init_tracing(server: &ServerConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&server.log_level));

    if server.is_production() {
        tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(filter)
            .init();
    } else {
        tracing_subscriber::registry().with(fmt::layer()).with(filter).init();
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
