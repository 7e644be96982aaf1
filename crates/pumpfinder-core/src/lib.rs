pub mod app_config;
mod config;
pub mod pumps;
pub mod view;

pub use app_config::{AppConfig, DEFAULT_API_URL};
pub use config::load_app_config;
pub use pumps::{Coordinate, NearestResult, PumpInfo, PumpListResult, PumpResult, Variant};
pub use view::{SessionError, ViewState};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
