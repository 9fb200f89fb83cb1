pub mod catalog;
pub mod dataset;
pub mod engine;
pub mod error;
pub mod features;
pub mod history;
pub mod predictor;

pub use catalog::{ModelCatalog, ModelDescriptor};
pub use error::ForecastError;
pub use history::{ForecastHistory, PredictionRecord};
