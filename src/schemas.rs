use std::sync::{Arc, Mutex};

use forecast::catalog::ModelCatalog;
use forecast::dataset::Dataset;
use forecast::history::ForecastHistory;
use serde::{Deserialize, Serialize};

use crate::config::AppConfig;

/// Application state shared across forecast-app handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    /// Catalog built once at startup; immutable configuration thereafter.
    pub catalog: Arc<ModelCatalog>,
    /// Process-wide append-only forecast log. Lock held only to append or
    /// snapshot, never across an await point.
    pub history: Arc<Mutex<ForecastHistory>>,
}

/// Application state shared across dashboard handlers. The dataset is loaded
/// once at startup and treated as read-only.
#[derive(Clone)]
pub struct DashboardState {
    pub dataset: Arc<Dataset>,
}

/// Form fields posted from the index page.
#[derive(Debug, Deserialize)]
pub struct ForecastForm {
    /// Model display name; must match a catalog entry.
    pub model: String,
    /// Forecast horizon in days (positive integer).
    pub num_days: u32,
}

/// Query parameters of the results page.
#[derive(Debug, Deserialize)]
pub struct ResultsQuery {
    /// Model display name
    pub model_name: String,
    /// Forecast horizon in days
    pub days: u32,
}

/// Query parameters of the dashboard page.
#[derive(Debug, Deserialize, Default)]
pub struct DashboardQuery {
    /// Selected dataset column; defaults to the first non-date column
    pub variable: Option<String>,
    /// Chart-type tag; unknown tags fall back to the line chart
    pub chart_type: Option<String>,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
}
