use std::net::SocketAddr;
use std::sync::Arc;

use boxoffice_api::{app, worker, AppState};
use boxoffice_core::SystemClock;
use boxoffice_hold::TicketService;
use boxoffice_store::app_config::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load()?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log.filter.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let venue = config.venue.venue();
    tracing::info!(
        max_seats = venue.max_seats(),
        hold_ttl_seconds = config.holds.hold_ttl_seconds,
        "Starting box office on port {}",
        config.server.port
    );

    let tickets = Arc::new(TicketService::with_clock(
        venue,
        config.holds.hold_ttl(),
        Arc::new(SystemClock),
    ));

    let sweeper = config
        .holds
        .sweep_interval()
        .map(|every| worker::start_expiration_worker(tickets.clone(), every));

    let app = app(AppState::new(tickets));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            match tokio::signal::ctrl_c().await {
                Ok(()) => tracing::info!("Shutdown requested"),
                Err(e) => tracing::error!("Failed to listen for ctrl-c, shutting down: {}", e),
            }
        })
        .await?;

    if let Some(handle) = sweeper {
        handle.abort();
    }
    Ok(())
}
