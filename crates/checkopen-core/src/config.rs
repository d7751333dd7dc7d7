use crate::app_config::{AppConfig, Environment, DEFAULT_BASE_URL, DEFAULT_USER_AGENT};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but cannot be parsed.
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
/// Returns `ConfigError` if a value is present but cannot be parsed.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so tests can drive it with a plain
/// `HashMap` instead of `set_var`/`remove_var`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        or_default(var, default)
            .parse::<SocketAddr>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let env = parse_environment(&or_default("CHECKOPEN_ENV", "development"));

    let mut bind_addr = parse_addr("CHECKOPEN_BIND_ADDR", "0.0.0.0:8080")?;
    // Container platforms hand out the port through a bare PORT variable.
    if let Ok(raw) = lookup("PORT") {
        let port = raw
            .parse::<u16>()
            .map_err(|e| invalid("PORT", e.to_string()))?;
        bind_addr.set_port(port);
    }

    let log_level = or_default("CHECKOPEN_LOG_LEVEL", "info");

    let base_url = or_default("CHECKOPEN_BASE_URL", DEFAULT_BASE_URL);
    if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
        return Err(invalid(
            "CHECKOPEN_BASE_URL",
            format!("expected an http(s) URL, got \"{base_url}\""),
        ));
    }

    let user_agent = or_default("CHECKOPEN_USER_AGENT", DEFAULT_USER_AGENT);
    let request_timeout_secs = parse_u64("CHECKOPEN_REQUEST_TIMEOUT_SECS", "15")?;
    if request_timeout_secs == 0 {
        return Err(invalid(
            "CHECKOPEN_REQUEST_TIMEOUT_SECS",
            "timeout must be at least 1 second".to_string(),
        ));
    }
    let min_request_interval_ms = parse_u64("CHECKOPEN_MIN_REQUEST_INTERVAL_MS", "1000")?;
    let max_jitter_ms = parse_u64("CHECKOPEN_MAX_JITTER_MS", "500")?;
    let max_retries = parse_u32("CHECKOPEN_MAX_RETRIES", "3")?;
    let backoff_unit_ms = parse_u64("CHECKOPEN_BACKOFF_UNIT_MS", "1000")?;

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        base_url,
        user_agent,
        request_timeout_secs,
        min_request_interval_ms,
        max_jitter_ms,
        max_retries,
        backoff_unit_ms,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
