pub mod dashboard;
pub mod error;
pub mod history_plot;

pub use dashboard::{render_chart, ChartKind};
pub use error::ChartError;
