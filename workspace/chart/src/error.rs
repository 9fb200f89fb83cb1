use thiserror::Error;

/// Error types for chart building and rendering.
#[derive(Error, Debug)]
pub enum ChartError {
    /// The requested column does not exist in the dataset.
    #[error("column not found: {0}")]
    ColumnNotFound(String),

    /// The backend failed to draw or encode the chart.
    #[error("render error: {0}")]
    Render(String),

    /// The dataset could not supply the requested series.
    #[error(transparent)]
    Data(#[from] forecast::error::ForecastError),
}

/// Type alias for Result with ChartError
pub type Result<T> = std::result::Result<T, ChartError>;
