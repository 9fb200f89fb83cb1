use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use forecast::catalog::ModelCatalog;
use forecast::dataset::Dataset;
use forecast::history::ForecastHistory;
use tracing::info;

use crate::schemas::{AppState, DashboardState};

/// Runtime configuration for the forecast app, resolved from CLI flags
/// backed by environment variables (see `cli.rs`).
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Directory holding `*_model.json` artifacts.
    pub models_dir: PathBuf,
    /// Historical price CSV, re-read on every forecast request.
    pub data_path: PathBuf,
    /// Directory served under `/static`; the prediction plot lands here.
    pub static_dir: PathBuf,
}

impl AppConfig {
    /// The shared plot output path. Every render overwrites it.
    pub fn plot_path(&self) -> PathBuf {
        self.static_dir.join(chart::history_plot::PLOT_FILE_NAME)
    }
}

/// Build the forecast app state: scan the catalog once, create the shared
/// history log, and make sure the static dir exists for plot output.
pub fn initialize_app_state(config: AppConfig) -> Result<AppState> {
    let catalog = ModelCatalog::scan(&config.models_dir)
        .with_context(|| format!("scanning models dir {}", config.models_dir.display()))?;
    info!(models = catalog.len(), dir = %config.models_dir.display(), "model catalog loaded");

    std::fs::create_dir_all(&config.static_dir)
        .with_context(|| format!("creating static dir {}", config.static_dir.display()))?;

    Ok(AppState {
        config,
        catalog: Arc::new(catalog),
        history: Arc::new(Mutex::new(ForecastHistory::new())),
    })
}

/// Build the dashboard state: load the dataset once and keep it in memory.
pub fn initialize_dashboard_state(data_path: &Path) -> Result<DashboardState> {
    let dataset = Dataset::load(data_path)
        .with_context(|| format!("loading historical dataset {}", data_path.display()))?;
    info!(rows = dataset.height(), path = %data_path.display(), "dataset loaded");

    Ok(DashboardState { dataset: Arc::new(dataset) })
}
