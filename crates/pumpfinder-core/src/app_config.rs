use crate::pumps::{Coordinate, Variant};

/// Where the pump service listens when nothing else is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Base URL of the pump service, e.g. `http://localhost:8000`.
    pub api_url: String,
    pub variant: Variant,
    pub log_level: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    /// Fixed device position. `None` means the position has to be resolved
    /// some other way (or is unavailable).
    pub location: Option<Coordinate>,
    /// IP geolocation endpoint used when no fixed position is configured and
    /// IP lookup is enabled.
    pub locator_url: String,
}
