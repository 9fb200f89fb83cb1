#[cfg(test)]
pub mod test_utils {
    use std::io::Write;
    use std::path::Path;

    use axum::Router;
    use tempfile::TempDir;
    use tracing::Level;
    use tracing_subscriber::FmtSubscriber;

    use crate::config::{initialize_app_state, initialize_dashboard_state, AppConfig};
    use crate::router::{create_dashboard_router, create_router};
    use crate::schemas::{AppState, DashboardState};

    pub const SAMPLE_CSV: &str = "\
Date,SPX,GLD,USO,SLV,EUR/USD
2018-05-10,2723.07,126.22,14.37,15.96,1.1920
2018-05-11,2727.72,126.34,14.42,16.06,1.1942
2018-05-14,2730.13,124.67,13.91,15.55,1.1929
2018-05-15,2711.45,123.47,13.99,15.30,1.1841
2018-05-16,2722.46,123.59,14.06,15.37,1.1811
";

    /// On-disk fixtures plus the app state built over them. The temp dir
    /// must outlive the test so the state keeps resolving paths.
    pub struct TestApp {
        pub dir: TempDir,
        pub state: AppState,
    }

    fn write_artifact(models_dir: &Path, file_name: &str, intercept: f64, day_coefficient: f64) {
        let body = format!(
            r#"{{
                "intercept": {intercept},
                "coefficients": [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, {day_coefficient}, 0.0, 0.0],
                "features": ["SPX", "USO", "SLV", "EUR/USD", "Year", "Month", "Day", "DayOfWeek", "IsWeekend"]
            }}"#
        );
        let mut file = std::fs::File::create(models_dir.join(file_name)).unwrap();
        file.write_all(body.as_bytes()).unwrap();
    }

    /// Create fixture artifacts, a sample CSV and a static dir, and build
    /// the forecast AppState over them.
    pub fn setup_test_app_state() -> TestApp {
        let dir = TempDir::new().expect("Failed to create temp dir");

        let models_dir = dir.path().join("models_and_results");
        std::fs::create_dir(&models_dir).unwrap();
        write_artifact(&models_dir, "linear_regression_model.json", 100.0, 1.0);
        write_artifact(&models_dir, "ridge_model.json", 50.0, 2.0);

        let data_path = dir.path().join("gld_price_data_cleaned.csv");
        std::fs::write(&data_path, SAMPLE_CSV).unwrap();

        let config = AppConfig {
            models_dir,
            data_path,
            static_dir: dir.path().join("static"),
        };
        let state = initialize_app_state(config).expect("Failed to initialize app state");

        TestApp { dir, state }
    }

    /// Build the dashboard state over a fixture CSV.
    pub fn setup_dashboard_state() -> (TempDir, DashboardState) {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let data_path = dir.path().join("gld_price_data_cleaned.csv");
        std::fs::write(&data_path, SAMPLE_CSV).unwrap();
        let state = initialize_dashboard_state(&data_path).expect("Failed to initialize dashboard state");
        (dir, state)
    }

    /// Initialize tracing for tests with output to STDERR.
    ///
    /// The log level is determined by the RUST_LOG environment variable,
    /// defaulting to WARN if not set.
    fn init_test_tracing() -> tracing::subscriber::DefaultGuard {
        let log_level = std::env::var("RUST_LOG")
            .ok()
            .and_then(|level| match level.to_uppercase().as_str() {
                "ERROR" => Some(Level::ERROR),
                "WARN" => Some(Level::WARN),
                "INFO" => Some(Level::INFO),
                "DEBUG" => Some(Level::DEBUG),
                "TRACE" => Some(Level::TRACE),
                _ => None,
            })
            .unwrap_or(Level::WARN);

        let subscriber = FmtSubscriber::builder()
            .with_max_level(log_level)
            .with_writer(std::io::stderr) // Output to stderr, which is captured by tests
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    /// Create the forecast axum app for testing, along with its fixtures.
    pub fn setup_test_app() -> (TestApp, Router) {
        let _ = init_test_tracing();
        let app = setup_test_app_state();
        let router = create_router(app.state.clone());
        (app, router)
    }

    /// Create the dashboard axum app for testing.
    pub fn setup_dashboard_app() -> (TempDir, Router) {
        let _ = init_test_tracing();
        let (dir, state) = setup_dashboard_state();
        let router = create_dashboard_router(state);
        (dir, router)
    }
}
