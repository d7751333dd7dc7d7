mod app_config;
mod config;
pub mod status;

use thiserror::Error;

pub use app_config::{AppConfig, Environment, DEFAULT_BASE_URL, DEFAULT_USER_AGENT};
pub use config::{load_app_config, load_app_config_from_env};
pub use status::{StatusLabel, VenueStatus, NO_STATUS_MESSAGE};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
