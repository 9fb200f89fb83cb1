use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::error::{ForecastError, Result};
use crate::features::{FeatureRow, FEATURE_SCHEMA};

/// A loaded model capable of scoring feature batches.
///
/// The expected input schema is fixed ([`FEATURE_SCHEMA`]); implementations
/// validate compatibility when the artifact is loaded so inference cannot
/// fail on a schema mismatch discovered late.
pub trait Predictor: Send + Sync {
    fn predict(&self, batch: &[FeatureRow]) -> Result<Vec<f64>>;
}

/// Linear regression artifact: an intercept plus one coefficient per schema
/// feature, serialized as JSON by the training pipeline.
#[derive(Debug, Clone, Deserialize)]
pub struct LinearModel {
    pub intercept: f64,
    pub coefficients: Vec<f64>,
    pub features: Vec<String>,
}

impl LinearModel {
    /// Load and validate the artifact at `path`.
    pub fn from_artifact(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| ForecastError::ArtifactNotFound(format!("{}: {}", path.display(), e)))?;
        let model: LinearModel = serde_json::from_str(&raw)
            .map_err(|e| ForecastError::ModelLoadError(format!("{}: {}", path.display(), e)))?;
        model.validate()?;
        debug!(path = %path.display(), coefficients = model.coefficients.len(), "model artifact loaded");
        Ok(model)
    }

    fn validate(&self) -> Result<()> {
        let schema_matches = self.features.len() == FEATURE_SCHEMA.len()
            && self
                .features
                .iter()
                .zip(FEATURE_SCHEMA.iter())
                .all(|(actual, expected)| actual == expected);
        if !schema_matches {
            return Err(ForecastError::ModelLoadError(format!(
                "artifact feature schema {:?} does not match expected {:?}",
                self.features, FEATURE_SCHEMA
            )));
        }
        if self.coefficients.len() != self.features.len() {
            return Err(ForecastError::ModelLoadError(format!(
                "artifact has {} coefficients for {} features",
                self.coefficients.len(),
                self.features.len()
            )));
        }
        Ok(())
    }
}

impl Predictor for LinearModel {
    fn predict(&self, batch: &[FeatureRow]) -> Result<Vec<f64>> {
        batch
            .iter()
            .map(|row| {
                let values = row.as_vector();
                if values.len() != self.coefficients.len() {
                    return Err(ForecastError::PredictionError(format!(
                        "input row has {} values, model expects {}",
                        values.len(),
                        self.coefficients.len()
                    )));
                }
                let dot: f64 = values.iter().zip(&self.coefficients).map(|(v, c)| v * c).sum();
                Ok(self.intercept + dot)
            })
            .collect()
    }
}

/// Load the artifact at `path` as a boxed predictor.
pub fn load_artifact(path: &Path) -> Result<Box<dyn Predictor>> {
    Ok(Box::new(LinearModel::from_artifact(path)?))
}
