use std::path::Path;
use std::sync::OnceLock;

use chrono::{Duration, NaiveDate};
use forecast::history::PredictionRecord;
use plotters::prelude::*;
use plotters::style::{register_font, FontStyle};
use tracing::{debug, instrument};

use crate::error::{ChartError, Result};

/// Well-known file name of the forecast plot inside the static dir.
///
/// Every render overwrites it; concurrent requests for different models race
/// on this single shared path, last writer wins.
pub const PLOT_FILE_NAME: &str = "prediction_plot.png";

const PLOT_WIDTH: u32 = 1000;
const PLOT_HEIGHT: u32 = 600;

/// The ab_glyph text backend has no system font discovery, so register the
/// bundled face once per process.
fn ensure_font() -> Result<()> {
    static FONT: OnceLock<bool> = OnceLock::new();
    let registered = *FONT.get_or_init(|| {
        register_font(
            "sans-serif",
            FontStyle::Normal,
            include_bytes!("../assets/DejaVuSans.ttf"),
        )
        .is_ok()
    });
    if registered {
        Ok(())
    } else {
        Err(ChartError::Render("failed to register bundled font".to_string()))
    }
}

/// Filter `records` to `model_name` (insertion order preserved) and draw the
/// date/value series as a line with point markers, overwriting `out_path`.
#[instrument(skip(records))]
pub fn render(records: &[PredictionRecord], model_name: &str, out_path: &Path) -> Result<()> {
    ensure_font()?;

    let series: Vec<(NaiveDate, f64)> = records
        .iter()
        .filter(|record| record.model_name == model_name)
        .map(|record| (record.date, record.value))
        .collect();
    if series.is_empty() {
        return Err(ChartError::Render(format!("no predictions recorded for {model_name}")));
    }

    let (x_range, y_range) = chart_bounds(&series);

    let root = BitMapBackend::new(out_path, (PLOT_WIDTH, PLOT_HEIGHT)).into_drawing_area();
    root.fill(&WHITE).map_err(draw_error)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(format!("Predictions by {model_name}"), ("sans-serif", 28))
        .margin(16)
        .x_label_area_size(56)
        .y_label_area_size(72)
        .build_cartesian_2d(x_range, y_range)
        .map_err(draw_error)?;

    chart
        .configure_mesh()
        .x_desc("Date")
        .y_desc("GLD Price")
        .x_labels(8)
        .x_label_formatter(&|date: &NaiveDate| date.format("%Y-%m-%d").to_string())
        .label_style(("sans-serif", 14))
        .axis_desc_style(("sans-serif", 18))
        .draw()
        .map_err(draw_error)?;

    chart
        .draw_series(LineSeries::new(series.iter().copied(), BLUE.stroke_width(2)))
        .map_err(draw_error)?;
    chart
        .draw_series(series.iter().map(|&(x, y)| Circle::new((x, y), 4, BLUE.filled())))
        .map_err(draw_error)?;

    root.present().map_err(draw_error)?;
    debug!(points = series.len(), path = %out_path.display(), "prediction plot written");
    Ok(())
}

/// Axis ranges with a little padding; degenerate ranges (a single point or a
/// flat series) are widened so the chart still builds.
fn chart_bounds(series: &[(NaiveDate, f64)]) -> (std::ops::Range<NaiveDate>, std::ops::Range<f64>) {
    let mut x0 = series[0].0;
    let mut x1 = series[0].0;
    let mut y0 = series[0].1;
    let mut y1 = series[0].1;
    for &(x, y) in series {
        x0 = x0.min(x);
        x1 = x1.max(x);
        y0 = y0.min(y);
        y1 = y1.max(y);
    }
    if x0 == x1 {
        x0 = x0 - Duration::days(1);
        x1 = x1 + Duration::days(1);
    }
    let pad = ((y1 - y0) * 0.05).max(1.0);
    (x0..x1, (y0 - pad)..(y1 + pad))
}

fn draw_error<E: std::fmt::Display>(err: E) -> ChartError {
    ChartError::Render(err.to_string())
}
