//! cashpilot-config
//!
//! Application configuration model and alert thresholds.
//! Owns the AppConfig data structure plus disk persistence helpers.

pub mod error;
pub mod manager;
pub mod model;

pub use error::ConfigError;
pub use manager::ConfigManager;
pub use model::{AppConfig, Purpose};
