//! Shared domain types and configuration for the Stockroom matching engine.

pub mod app_config;
pub mod config;
pub mod products;
pub mod settings;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use products::{ProductItem, ScoredProductItem, VisionAnalysisResult};
pub use settings::{load_match_settings, MatchSettings};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read match settings file {path}: {source}")]
    SettingsFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse match settings: {0}")]
    SettingsFileParse(#[from] serde_yaml::Error),

    #[error("invalid match settings: {0}")]
    Validation(String),
}
