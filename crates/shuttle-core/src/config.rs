use crate::app_config::{AppConfig, Environment, DEFAULT_SCHEDULE_URL};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every setting has a default, so an empty environment yields a usable config.
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

    let env = parse_environment(&or_default("SHUTTLE_ENV", "development"))?;
    let log_level = or_default("SHUTTLE_LOG_LEVEL", "info");

    let schedule_url = or_default("SHUTTLE_SCHEDULE_URL", DEFAULT_SCHEDULE_URL);
    if !schedule_url.starts_with("http://") && !schedule_url.starts_with("https://") {
        return Err(ConfigError::InvalidEnvVar {
            var: "SHUTTLE_SCHEDULE_URL".to_string(),
            reason: format!("\"{schedule_url}\" is not an http(s) URL"),
        });
    }

    let request_timeout_secs = parse_u64("SHUTTLE_REQUEST_TIMEOUT_SECS", "10")?;
    if request_timeout_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "SHUTTLE_REQUEST_TIMEOUT_SECS".to_string(),
            reason: "timeout must be at least 1 second".to_string(),
        });
    }

    let user_agent = or_default("SHUTTLE_USER_AGENT", "cmu-shuttle/0.1 (schedule-scraper)");

    Ok(AppConfig {
        env,
        log_level,
        schedule_url,
        request_timeout_secs,
        user_agent,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "SHUTTLE_ENV".to_string(),
            reason: format!("unknown environment \"{other}\""),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
