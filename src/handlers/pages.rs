use axum::extract::State;
use axum::http::StatusCode;
use axum::Form;
use axum::response::{Html, Redirect};
use tracing::instrument;

use crate::schemas::{AppState, ForecastForm};

/// GET /: the model/horizon selection form.
#[instrument(skip(state))]
pub async fn index_page(State(state): State<AppState>) -> Html<String> {
    let options: String = state
        .catalog
        .descriptors()
        .iter()
        .map(|d| format!("<option value=\"{0}\">{0}</option>", d.display_name))
        .collect();

    Html(format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>Gold Price Forecast</title>
</head>
<body>
    <h1>Gold Price Forecast</h1>
    <form method="post" action="/">
        <label for="model">Model:</label>
        <select id="model" name="model" required>
            {options}
        </select>
        <label for="num_days">Days to forecast:</label>
        <input id="num_days" name="num_days" type="number" min="1" value="7" required>
        <button type="submit">Forecast</button>
    </form>
</body>
</html>"#
    ))
}

/// POST /: validate the selection and redirect to the results page.
#[instrument(skip(state))]
pub async fn submit_forecast(
    State(state): State<AppState>,
    Form(form): Form<ForecastForm>,
) -> Result<Redirect, (StatusCode, String)> {
    if form.num_days < 1 {
        return Err((
            StatusCode::UNPROCESSABLE_ENTITY,
            "num_days must be a positive integer".to_string(),
        ));
    }
    if !state.catalog.contains(&form.model) {
        return Err((StatusCode::NOT_FOUND, format!("unknown model: {}", form.model)));
    }

    // Display names only contain letters, digits and spaces by construction
    // of the catalog transform, so escaping spaces is enough here.
    let model = form.model.replace(' ', "%20");
    Ok(Redirect::to(&format!("/results?model_name={}&days={}", model, form.num_days)))
}
