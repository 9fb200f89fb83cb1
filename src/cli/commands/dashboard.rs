use std::path::Path;

use anyhow::Result;
use tokio::net::TcpListener;
use tracing::{debug, error, info, trace};

use crate::config::initialize_dashboard_state;
use crate::router::create_dashboard_router;

pub async fn dashboard(bind_address: &str, data_path: &Path) -> Result<()> {
    trace!("Entering dashboard function");
    info!("Goldcast dashboard app starting up");
    debug!("Bind address: {}", bind_address);
    debug!("Data path: {}", data_path.display());

    // The dashboard loads the dataset once at startup and keeps it read-only
    let state = match initialize_dashboard_state(data_path) {
        Ok(state) => {
            debug!("Dashboard state initialized successfully");
            state
        }
        Err(e) => {
            error!("Failed to initialize dashboard state: {}", e);
            return Err(e);
        }
    };

    let app = create_dashboard_router(state);

    info!("Starting server on {}", bind_address);
    let listener = match TcpListener::bind(&bind_address).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind to address {}: {}", bind_address, e);
            return Err(e.into());
        }
    };

    info!("Goldcast dashboard running on http://{}", bind_address);

    if let Err(e) = axum::serve(listener, app).await {
        error!("Server error: {}", e);
        return Err(e.into());
    }

    info!("Server shutdown gracefully");
    Ok(())
}
