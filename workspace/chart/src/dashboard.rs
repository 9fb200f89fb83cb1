use forecast::dataset::Dataset;
use plotly::common::{Mode, Title};
use plotly::layout::Layout;
use plotly::{Bar, BoxPlot, HeatMap, Pie, Plot, Scatter};
use tracing::instrument;

use crate::error::{ChartError, Result};

/// Number of leading rows fed to the pie chart.
pub const PIE_ROW_LIMIT: usize = 10;

/// The six chart kinds the dashboard offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Bar,
    Line,
    Scatter,
    Pie,
    Box,
    CorrMatrix,
}

impl ChartKind {
    /// Parse a selector tag. Anything unrecognized falls back to the line
    /// chart.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "bar" => Self::Bar,
            "line" => Self::Line,
            "scatter" => Self::Scatter,
            "pie" => Self::Pie,
            "box" => Self::Box,
            "corr_matrix" => Self::CorrMatrix,
            _ => Self::Line,
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            Self::Bar => "bar",
            Self::Line => "line",
            Self::Scatter => "scatter",
            Self::Pie => "pie",
            Self::Box => "box",
            Self::CorrMatrix => "corr_matrix",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Bar => "Bar Chart",
            Self::Line => "Line Chart",
            Self::Scatter => "Scatter Plot",
            Self::Pie => "Pie Chart",
            Self::Box => "Box Plot",
            Self::CorrMatrix => "Correlation Matrix",
        }
    }

    pub fn all() -> [ChartKind; 6] {
        [Self::Bar, Self::Line, Self::Scatter, Self::Pie, Self::Box, Self::CorrMatrix]
    }
}

/// Build the selected chart over the full dataset.
///
/// The correlation matrix ignores `column`; every other kind requires the
/// column to exist.
#[instrument(skip(dataset))]
pub fn render_chart(dataset: &Dataset, column: &str, kind: ChartKind) -> Result<Plot> {
    if kind != ChartKind::CorrMatrix && !dataset.has_column(column) {
        return Err(ChartError::ColumnNotFound(column.to_string()));
    }

    let mut plot = Plot::new();
    match kind {
        ChartKind::Bar => {
            let (dates, values) = column_series(dataset, column)?;
            plot.add_trace(Bar::new(dates, values));
        }
        ChartKind::Line => {
            let (dates, values) = column_series(dataset, column)?;
            plot.add_trace(Scatter::new(dates, values).mode(Mode::Lines));
        }
        ChartKind::Scatter => {
            let (dates, values) = column_series(dataset, column)?;
            plot.add_trace(Scatter::new(dates, values).mode(Mode::Markers));
        }
        ChartKind::Pie => {
            // Only the first rows go into the pie; the full series is
            // unreadable as slices.
            let (dates, values) = column_series(dataset, column)?;
            let (labels, values) = head_for_pie(dates, values);
            plot.add_trace(Pie::new(values).labels(labels));
        }
        ChartKind::Box => {
            let values = dataset.numeric_column(column)?;
            plot.add_trace(BoxPlot::new(values));
        }
        ChartKind::CorrMatrix => {
            let names = dataset.numeric_column_names();
            let matrix = correlation_matrix(dataset, &names)?;
            plot.add_trace(HeatMap::new(names.clone(), names, matrix));
        }
    }

    let title = match kind {
        ChartKind::CorrMatrix => "Correlation Matrix".to_string(),
        other => format!("{} of {}", other.label(), column),
    };
    plot.set_layout(Layout::new().title(Title::with_text(title)));
    Ok(plot)
}

fn column_series(dataset: &Dataset, column: &str) -> Result<(Vec<String>, Vec<f64>)> {
    Ok((dataset.date_labels()?, dataset.numeric_column(column)?))
}

/// Truncate a series to the first [`PIE_ROW_LIMIT`] rows.
pub fn head_for_pie(labels: Vec<String>, values: Vec<f64>) -> (Vec<String>, Vec<f64>) {
    let take = labels.len().min(values.len()).min(PIE_ROW_LIMIT);
    (labels.into_iter().take(take).collect(), values.into_iter().take(take).collect())
}

/// Pairwise Pearson correlation over the named columns; cells with fewer
/// than two finite pairs come out as NaN.
fn correlation_matrix(dataset: &Dataset, names: &[String]) -> Result<Vec<Vec<f64>>> {
    let columns: Vec<Vec<f64>> = names
        .iter()
        .map(|name| dataset.numeric_column(name))
        .collect::<std::result::Result<_, forecast::error::ForecastError>>()?;

    Ok(columns
        .iter()
        .map(|row_col| columns.iter().map(|other| pearson(row_col, other)).collect())
        .collect())
}

fn pearson(a: &[f64], b: &[f64]) -> f64 {
    let pairs: Vec<(f64, f64)> = a
        .iter()
        .zip(b)
        .filter(|(x, y)| x.is_finite() && y.is_finite())
        .map(|(x, y)| (*x, *y))
        .collect();
    if pairs.len() < 2 {
        return f64::NAN;
    }

    let n = pairs.len() as f64;
    let mean_a = pairs.iter().map(|(x, _)| x).sum::<f64>() / n;
    let mean_b = pairs.iter().map(|(_, y)| y).sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_a = 0.0;
    let mut var_b = 0.0;
    for (x, y) in &pairs {
        let dx = x - mean_a;
        let dy = y - mean_b;
        cov += dx * dy;
        var_a += dx * dx;
        var_b += dy * dy;
    }
    if var_a <= 0.0 || var_b <= 0.0 {
        return f64::NAN;
    }
    cov / (var_a.sqrt() * var_b.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    fn sample_dataset(rows: usize) -> (tempfile::TempDir, Dataset) {
        let dir = tempdir().unwrap();
        let path = dir.path().join("gld.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "Date,SPX,GLD,USO,SLV,EUR/USD").unwrap();
        for i in 0..rows {
            writeln!(
                file,
                "2018-04-{:02},{:.2},{:.2},{:.2},{:.2},{:.4}",
                i + 1,
                2700.0 + i as f64,
                120.0 + (i as f64) * 0.5,
                14.0 - (i as f64) * 0.1,
                15.0 + (i as f64) * 0.05,
                1.18 + (i as f64) * 0.001,
            )
            .unwrap();
        }
        let dataset = Dataset::load(&path).unwrap();
        (dir, dataset)
    }

    #[test]
    fn unknown_tag_falls_back_to_line() {
        assert_eq!(ChartKind::from_tag("unknown_value"), ChartKind::Line);
        assert_eq!(ChartKind::from_tag(""), ChartKind::Line);
        assert_eq!(ChartKind::from_tag("corr_matrix"), ChartKind::CorrMatrix);
    }

    #[test]
    fn unknown_tag_renders_same_chart_as_line() {
        let (_dir, dataset) = sample_dataset(5);
        let fallback = render_chart(&dataset, "SPX", ChartKind::from_tag("unknown_value")).unwrap();
        let line = render_chart(&dataset, "SPX", ChartKind::from_tag("line")).unwrap();
        assert_eq!(fallback.to_json(), line.to_json());
    }

    #[test]
    fn unknown_column_is_column_not_found() {
        let (_dir, dataset) = sample_dataset(5);
        // Plot does not implement Debug, so drop it before unwrap_err.
        let err = render_chart(&dataset, "NOPE", ChartKind::Bar).map(|_| ()).unwrap_err();
        assert!(matches!(err, ChartError::ColumnNotFound(_)));
    }

    #[test]
    fn corr_matrix_ignores_the_column_parameter() {
        let (_dir, dataset) = sample_dataset(5);
        // A bogus column name must not matter for the correlation matrix.
        let plot = render_chart(&dataset, "NOPE", ChartKind::CorrMatrix).unwrap();
        assert!(plot.to_json().contains("heatmap"));
    }

    #[test]
    fn pie_uses_at_most_ten_rows() {
        let labels: Vec<String> = (0..25).map(|i| format!("2018-04-{:02}", i + 1)).collect();
        let values: Vec<f64> = (0..25).map(|i| i as f64).collect();
        let (labels, values) = head_for_pie(labels, values);
        assert_eq!(labels.len(), PIE_ROW_LIMIT);
        assert_eq!(values.len(), PIE_ROW_LIMIT);
        assert_eq!(labels[0], "2018-04-01");

        let (short_labels, short_values) =
            head_for_pie(vec!["a".to_string(), "b".to_string()], vec![1.0, 2.0]);
        assert_eq!(short_labels.len(), 2);
        assert_eq!(short_values, vec![1.0, 2.0]);
    }

    #[test]
    fn every_kind_renders_for_a_valid_column() {
        let (_dir, dataset) = sample_dataset(12);
        for kind in ChartKind::all() {
            let plot = render_chart(&dataset, "GLD", kind)
                .unwrap_or_else(|e| panic!("{:?} failed: {e}", kind));
            assert!(!plot.to_json().is_empty());
        }
    }

    #[test]
    fn pearson_of_linear_series_is_one() {
        let a = [1.0, 2.0, 3.0, 4.0];
        let b = [2.0, 4.0, 6.0, 8.0];
        assert!((pearson(&a, &b) - 1.0).abs() < 1e-12);
        let inverted = [8.0, 6.0, 4.0, 2.0];
        assert!((pearson(&a, &inverted) + 1.0).abs() < 1e-12);
    }

    #[test]
    fn pearson_of_constant_series_is_nan() {
        let a = [1.0, 2.0, 3.0];
        let b = [5.0, 5.0, 5.0];
        assert!(pearson(&a, &b).is_nan());
    }
}
