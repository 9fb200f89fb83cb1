use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

pub mod commands;

use crate::config::AppConfig;
use self::commands::{dashboard, serve};

#[derive(Parser)]
#[command(name = "goldcast")]
#[command(about = "Gold price forecasting web apps: prediction form and data dashboard")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the forecast web app
    Serve {
        /// Bind address for the web server
        ///
        /// Format: IP:PORT (e.g., 0.0.0.0:3000, 127.0.0.1:8080)
        #[arg(short, long, env = "BIND_ADDRESS", default_value = "0.0.0.0:3000")]
        bind_address: String,

        /// Directory holding serialized model artifacts (*_model.json)
        #[arg(short, long, env = "MODELS_DIR", default_value = "models_and_results")]
        models_dir: PathBuf,

        /// Historical price CSV
        #[arg(short, long, env = "DATA_PATH", default_value = "data/gld_price_data_cleaned.csv")]
        data_path: PathBuf,

        /// Directory for generated static assets (the prediction plot)
        #[arg(short, long, env = "STATIC_DIR", default_value = "static")]
        static_dir: PathBuf,
    },
    /// Start the interactive dashboard web app
    Dashboard {
        /// Bind address for the web server
        #[arg(short, long, env = "BIND_ADDRESS", default_value = "0.0.0.0:3001")]
        bind_address: String,

        /// Historical price CSV
        #[arg(short, long, env = "DATA_PATH", default_value = "data/gld_price_data_cleaned.csv")]
        data_path: PathBuf,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Commands::Serve { bind_address, models_dir, data_path, static_dir } => {
                let config = AppConfig { models_dir, data_path, static_dir };
                serve(&bind_address, config).await?;
            }
            Commands::Dashboard { bind_address, data_path } => {
                dashboard(&bind_address, &data_path).await?;
            }
        }
        Ok(())
    }
}
