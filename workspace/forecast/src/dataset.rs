use std::path::Path;

use chrono::NaiveDate;
use polars::prelude::*;
use tracing::debug;

use crate::error::{ForecastError, Result};

/// Name of the calendar column in the historical CSV.
pub const DATE_COLUMN: &str = "Date";

/// Read-only wrapper over the historical price table.
///
/// The forecast app loads it per request; the dashboard app loads it once at
/// startup and keeps it in memory.
#[derive(Debug, Clone)]
pub struct Dataset {
    df: DataFrame,
}

impl Dataset {
    /// Load the CSV at `path`, parsing the date column.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let df = CsvReadOptions::default()
            .with_has_header(true)
            .map_parse_options(|opts| opts.with_try_parse_dates(true))
            .try_into_reader_with_file_path(Some(path.to_path_buf()))
            .map_err(|e| ForecastError::DataUnavailable(format!("{}: {}", path.display(), e)))?
            .finish()
            .map_err(|e| ForecastError::DataUnavailable(format!("{}: {}", path.display(), e)))?;
        debug!(rows = df.height(), path = %path.display(), "historical dataset loaded");
        Ok(Self { df })
    }

    pub fn height(&self) -> usize {
        self.df.height()
    }

    /// Latest observed date. `DataUnavailable` when the date column is
    /// missing, not parsed as dates, or empty.
    pub fn max_date(&self) -> Result<NaiveDate> {
        self.dates()?
            .into_iter()
            .flatten()
            .max()
            .ok_or_else(|| ForecastError::DataUnavailable(format!("{DATE_COLUMN} column is empty")))
    }

    /// The date column as chrono dates; `None` marks unparsable cells.
    pub fn dates(&self) -> Result<Vec<Option<NaiveDate>>> {
        let column = self.df.column(DATE_COLUMN).map_err(|_| {
            ForecastError::DataUnavailable(format!("missing {DATE_COLUMN} column"))
        })?;
        let dates = column.as_materialized_series().date().map_err(|_| {
            ForecastError::DataUnavailable(format!("{DATE_COLUMN} column did not parse as dates"))
        })?;
        Ok(dates.as_date_iter().collect())
    }

    /// The date column rendered as strings, for categorical chart axes.
    pub fn date_labels(&self) -> Result<Vec<String>> {
        Ok(self
            .dates()?
            .into_iter()
            .map(|date| date.map(|d| d.to_string()).unwrap_or_default())
            .collect())
    }

    /// All column names in CSV order.
    pub fn column_names(&self) -> Vec<String> {
        self.df
            .get_column_names()
            .into_iter()
            .map(|name| name.to_string())
            .collect()
    }

    /// Columns eligible for dashboard selection: everything but the date.
    pub fn selectable_columns(&self) -> Vec<String> {
        self.column_names()
            .into_iter()
            .filter(|name| name != DATE_COLUMN)
            .collect()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.df.column(name).is_ok()
    }

    /// A column's values as f64; unparsable or null cells become NaN.
    pub fn numeric_column(&self, name: &str) -> Result<Vec<f64>> {
        let column = self
            .df
            .column(name)
            .map_err(|_| ForecastError::DataUnavailable(format!("missing column {name}")))?;
        let casted = column.as_materialized_series().cast(&DataType::Float64)?;
        Ok(casted.f64()?.iter().map(|v| v.unwrap_or(f64::NAN)).collect())
    }

    /// Names of numeric columns, in frame order.
    pub fn numeric_column_names(&self) -> Vec<String> {
        self.df
            .get_columns()
            .iter()
            .filter(|column| is_numeric_dtype(column.dtype()))
            .map(|column| column.name().to_string())
            .collect()
    }
}

fn is_numeric_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::Float32
            | DataType::Float64
    )
}
