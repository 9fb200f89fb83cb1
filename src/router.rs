use std::time::Duration;

use axum::{routing::get, Router};
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, services::ServeDir, timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::handlers::{
    dashboard::{dashboard_health, dashboard_page},
    health::health_check,
    pages::{index_page, submit_forecast},
    results::results_page,
};
use crate::schemas::{AppState, DashboardState};

/// Create the forecast app router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    let static_dir = state.config.static_dir.clone();
    Router::new()
        // Health check
        .route("/health", get(health_check))
        // Form page and submission
        .route("/", get(index_page).post(submit_forecast))
        // Results page: runs the forecast and renders the plot
        .route("/results", get(results_page))
        // Generated static assets (the prediction plot)
        .nest_service("/static", ServeDir::new(static_dir))
        // Add middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(TimeoutLayer::new(Duration::from_secs(30)))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

/// Create the dashboard app router with all routes and middleware
pub fn create_dashboard_router(state: DashboardState) -> Router {
    Router::new()
        .route("/health", get(dashboard_health))
        // One page, one reactive chart region driven by query params
        .route("/", get(dashboard_page))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(TimeoutLayer::new(Duration::from_secs(30)))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
