//! Shared configuration and the fetched-comment record for the comment
//! analysis workspace.

mod app_config;
mod comment;
mod config;

pub use app_config::{AppConfig, ClassifierMode, Environment};
pub use comment::RawComment;
pub use config::{load_app_config, load_app_config_from_env};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
