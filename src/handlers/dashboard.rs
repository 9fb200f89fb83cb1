use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{Html, Json};
use chart::dashboard::{render_chart, ChartKind};
use chart::error::ChartError;
use tracing::{error, instrument};

use crate::schemas::{DashboardQuery, DashboardState, HealthResponse};

/// GET /: the interactive dashboard, two selectors driving one chart
/// region. A selection change resubmits the query params; the recomputed
/// chart replaces the prior one.
#[instrument(skip(state))]
pub async fn dashboard_page(
    State(state): State<DashboardState>,
    Query(query): Query<DashboardQuery>,
) -> Result<Html<String>, (StatusCode, String)> {
    let columns = state.dataset.selectable_columns();
    let variable = match query.variable {
        Some(v) => v,
        None => columns.first().cloned().ok_or_else(|| {
            (
                StatusCode::SERVICE_UNAVAILABLE,
                "dataset has no selectable columns".to_string(),
            )
        })?,
    };
    let kind = ChartKind::from_tag(query.chart_type.as_deref().unwrap_or("line"));

    let plot = render_chart(&state.dataset, &variable, kind).map_err(chart_error_response)?;
    let figure = plot.to_inline_html(Some("chart-output"));

    Ok(Html(dashboard_html(&columns, &variable, kind, &figure)))
}

/// Health check endpoint
#[instrument(skip(state))]
pub async fn dashboard_health(State(state): State<DashboardState>) -> Json<HealthResponse> {
    let status = if state.dataset.height() == 0 {
        "degraded: dataset is empty".to_string()
    } else {
        "healthy".to_string()
    };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

fn dashboard_html(columns: &[String], variable: &str, kind: ChartKind, figure: &str) -> String {
    let variable_options: String = columns
        .iter()
        .map(|col| {
            let selected = if col == variable { " selected" } else { "" };
            format!("<option value=\"{0}\"{selected}>{0}</option>", col)
        })
        .collect();

    let chart_options: String = ChartKind::all()
        .iter()
        .map(|k| {
            let selected = if *k == kind { " selected" } else { "" };
            format!("<option value=\"{}\"{selected}>{}</option>", k.tag(), k.label())
        })
        .collect();

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>Interactive Dashboard - Gold Price Data</title>
    <script src="https://cdn.plot.ly/plotly-2.27.0.min.js"></script>
</head>
<body>
    <h1 style="text-align: center">Interactive Dashboard - Gold Price Data</h1>
    <form method="get" action="/">
        <label for="variable">Select a Variable:</label>
        <select id="variable" name="variable" onchange="this.form.submit()">
            {variable_options}
        </select>
        <label for="chart_type">Select a Chart Type:</label>
        <select id="chart_type" name="chart_type" onchange="this.form.submit()">
            {chart_options}
        </select>
    </form>
    <div>
        {figure}
    </div>
</body>
</html>"#
    )
}

fn chart_error_response(err: ChartError) -> (StatusCode, String) {
    let status = match &err {
        ChartError::ColumnNotFound(_) => StatusCode::NOT_FOUND,
        ChartError::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
        ChartError::Data(_) => StatusCode::SERVICE_UNAVAILABLE,
    };
    error!(error = %err, "dashboard chart failed");
    (status, err.to_string())
}
