use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::Html;
use forecast::engine::run_forecast;
use forecast::error::ForecastError;
use forecast::history::PredictionRecord;
use tracing::{error, instrument};

use crate::schemas::{AppState, ResultsQuery};

/// GET /results: run the forecast, append it to the shared history, render
/// the plot, and return the predictions table with the image reference.
#[instrument(skip(state))]
pub async fn results_page(
    State(state): State<AppState>,
    Query(query): Query<ResultsQuery>,
) -> Result<Html<String>, (StatusCode, String)> {
    let records = run_forecast(
        &state.catalog,
        &state.config.data_path,
        &query.model_name,
        i64::from(query.days),
    )
    .map_err(forecast_error_response)?;

    // Append under the lock, snapshot the per-model view, release before
    // rendering.
    let snapshot = {
        let mut history = state
            .history
            .lock()
            .map_err(|_| internal("forecast history lock poisoned"))?;
        history.append_batch(records);
        history.for_model(&query.model_name)
    };

    let plot_path = state.config.plot_path();
    chart::history_plot::render(&snapshot, &query.model_name, &plot_path).map_err(|e| {
        error!(error = %e, "plot rendering failed");
        internal("failed to render prediction plot")
    })?;

    Ok(Html(results_html(&query.model_name, &snapshot)))
}

fn results_html(model_name: &str, records: &[PredictionRecord]) -> String {
    let rows: String = records
        .iter()
        .map(|r| format!("<tr><td>{}</td><td>{:.2}</td></tr>", r.date, r.value))
        .collect();

    // Cache-busting query so the browser refetches the overwritten image.
    let ts = chrono::Utc::now().timestamp_millis();
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>Predictions by {model_name}</title>
</head>
<body>
    <h1>Predictions by {model_name}</h1>
    <table border="1">
        <thead><tr><th>Date</th><th>Prediction</th></tr></thead>
        <tbody>
            {rows}
        </tbody>
    </table>
    <img src="/static/prediction_plot.png?ts={ts}" alt="Prediction plot" width="1000">
    <p><a href="/">Back to form</a></p>
</body>
</html>"#
    )
}

fn internal(message: &str) -> (StatusCode, String) {
    (StatusCode::INTERNAL_SERVER_ERROR, message.to_string())
}

fn forecast_error_response(err: ForecastError) -> (StatusCode, String) {
    let status = match &err {
        ForecastError::ArtifactNotFound(_) => StatusCode::NOT_FOUND,
        ForecastError::InvalidHorizon(_) => StatusCode::UNPROCESSABLE_ENTITY,
        ForecastError::DataUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        ForecastError::ModelLoadError(_)
        | ForecastError::PredictionError(_)
        | ForecastError::CatalogUnavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, err.to_string())
}
