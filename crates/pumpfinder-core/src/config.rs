use crate::app_config::{AppConfig, DEFAULT_API_URL};
use crate::pumps::{Coordinate, Variant};
use crate::ConfigError;

/// Load client configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if values are invalid or a coordinate is only half set.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load client configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build configuration using the provided env-var lookup function, so the
/// parsing can be tested against a plain `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_f64 = |var: &str| -> Result<Option<f64>, ConfigError> {
        match lookup(var) {
            Ok(raw) => raw
                .trim()
                .parse::<f64>()
                .map(Some)
                .map_err(|e| ConfigError::InvalidEnvVar {
                    var: var.to_string(),
                    reason: e.to_string(),
                }),
            Err(_) => Ok(None),
        }
    };

    let api_url = or_default("PUMPFINDER_API_URL", DEFAULT_API_URL);
    let variant = parse_variant(&or_default("PUMPFINDER_VARIANT", "nearest"))?;
    let log_level = or_default("PUMPFINDER_LOG_LEVEL", "warn");
    let request_timeout_secs = parse_u64("PUMPFINDER_REQUEST_TIMEOUT_SECS", "30")?;
    if request_timeout_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "PUMPFINDER_REQUEST_TIMEOUT_SECS".to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }
    let user_agent = or_default("PUMPFINDER_USER_AGENT", "pumpfinder/0.1");
    let locator_url = or_default("PUMPFINDER_LOCATOR_URL", "http://ip-api.com/json");

    let location = match (parse_f64("PUMPFINDER_LAT")?, parse_f64("PUMPFINDER_LON")?) {
        (Some(lat), Some(lon)) => Some(Coordinate::new(lat, lon)),
        (None, None) => None,
        (Some(_), None) => return Err(ConfigError::MissingEnvVar("PUMPFINDER_LON".to_string())),
        (None, Some(_)) => return Err(ConfigError::MissingEnvVar("PUMPFINDER_LAT".to_string())),
    };

    Ok(AppConfig {
        api_url,
        variant,
        log_level,
        request_timeout_secs,
        user_agent,
        location,
        locator_url,
    })
}

fn parse_variant(s: &str) -> Result<Variant, ConfigError> {
    s.parse::<Variant>()
        .map_err(|e| ConfigError::InvalidEnvVar {
            var: "PUMPFINDER_VARIANT".to_string(),
            reason: e.to_string(),
        })
}
