use thiserror::Error;
use tracing::error;

/// Error types for the forecast domain.
///
/// Every variant is scoped to a single request; none is fatal to the
/// process.
#[derive(Error, Debug)]
pub enum ForecastError {
    /// The selected model has no readable artifact on disk.
    #[error("model artifact not found: {0}")]
    ArtifactNotFound(String),

    /// The artifact exists but could not be deserialized, or its feature
    /// schema does not match the one the engine produces.
    #[error("failed to load model: {0}")]
    ModelLoadError(String),

    /// The historical dataset is missing, unreadable, or its date column
    /// is unusable.
    #[error("dataset unavailable: {0}")]
    DataUnavailable(String),

    /// The model rejected the input batch.
    #[error("prediction failed: {0}")]
    PredictionError(String),

    /// The requested horizon is not a positive day count.
    #[error("invalid forecast horizon: {0}")]
    InvalidHorizon(i64),

    /// The models directory could not be listed at startup.
    #[error("model catalog unavailable: {0}")]
    CatalogUnavailable(String),
}

// Implement From<polars::error::PolarsError> for ForecastError
impl From<polars::error::PolarsError> for ForecastError {
    fn from(err: polars::error::PolarsError) -> Self {
        let forecast_error = match &err {
            polars::error::PolarsError::NoData(_) => {
                ForecastError::DataUnavailable(format!("No data: {}", err))
            }
            polars::error::PolarsError::SchemaMismatch(_) => {
                ForecastError::DataUnavailable(format!("Schema mismatch: {}", err))
            }
            polars::error::PolarsError::ColumnNotFound(_) => {
                ForecastError::DataUnavailable(format!("Column not found: {}", err))
            }
            _ => ForecastError::DataUnavailable(err.to_string()),
        };
        error!(?forecast_error, "DataFrame error");
        forecast_error
    }
}

/// Type alias for Result with ForecastError
pub type Result<T> = std::result::Result<T, ForecastError>;
