use std::path::Path;

use tracing::{debug, instrument};

use crate::catalog::ModelCatalog;
use crate::dataset::Dataset;
use crate::error::{ForecastError, Result};
use crate::features::{feature_batch, future_dates};
use crate::history::PredictionRecord;
use crate::predictor::load_artifact;

/// Run one forecast request end to end.
///
/// Reconstructs the artifact path from the display name, loads the model and
/// the historical dataset, synthesizes one feature row per future date, and
/// scores the batch. Records come back in date order; the caller appends
/// them to the shared history log.
#[instrument(skip(catalog))]
pub fn run_forecast(
    catalog: &ModelCatalog,
    data_path: &Path,
    display_name: &str,
    horizon_days: i64,
) -> Result<Vec<PredictionRecord>> {
    if horizon_days < 1 {
        return Err(ForecastError::InvalidHorizon(horizon_days));
    }

    let artifact = catalog.artifact_path(display_name);
    let model = load_artifact(&artifact)?;

    let dataset = Dataset::load(data_path)?;
    let last_date = dataset.max_date()?;

    let dates = future_dates(last_date, horizon_days as u32);
    let batch = feature_batch(&dates);
    let values = model.predict(&batch)?;

    debug!(model = display_name, horizon = horizon_days, %last_date, "forecast computed");

    Ok(dates
        .into_iter()
        .zip(values)
        .map(|(date, value)| PredictionRecord {
            date,
            value,
            model_name: display_name.to_string(),
        })
        .collect())
}
