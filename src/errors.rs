use cashpilot_config::ConfigError;
use cashpilot_core::CoreError;
use thiserror::Error;

/// Error type surfaced by the application state layer.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}
