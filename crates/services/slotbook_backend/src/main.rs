// File: services/slotbook_backend/src/main.rs
use slotbook_backend::{build_app, SlotbookServices};
use slotbook_booking::BookingState;
use slotbook_common::error::{config_error, SchedulingError};
use slotbook_common::logging;
use slotbook_config::load_config;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    logging::init();

    if let Err(e) = run().await {
        error!("slotbook backend stopped: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), SchedulingError> {
    let config = Arc::new(load_config().map_err(config_error)?);

    let services = SlotbookServices::from_config(&config).await?;
    let state = BookingState::new(
        config.clone(),
        services.calendar,
        services.store,
        services.notifier,
    )?;
    info!(
        calendar_id = config.calendar_id(),
        time_zone = %state.time_zone,
        "Booking state ready"
    );

    let app = build_app(Arc::new(state));

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| config_error(format!("cannot bind {}: {}", addr, e)))?;
    info!("Starting server at http://{}", addr);
    info!("API endpoints available at http://{}/api", addr);

    axum::serve(listener, app.into_make_service())
        .await
        .map_err(|e| config_error(format!("server error: {}", e)))
}
