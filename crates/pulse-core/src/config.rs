use crate::app_config::AppConfig;
use crate::phases::DEFAULT_PHASE_INTERVAL;
use crate::ConfigError;

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Load application configuration from environment variables already in the process.
///
/// Does NOT load `.env` files; binaries call `dotenvy::dotenv().ok()` first.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can use a plain `HashMap`.
/// The Gemini API key is required: starting without it would only produce
/// failing calls later, so this fails fast instead.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let gemini_api_key = require("GEMINI_API_KEY")?;
    let gemini_model = or_default("PULSE_GEMINI_MODEL", DEFAULT_GEMINI_MODEL);
    let gemini_base_url = or_default("PULSE_GEMINI_BASE_URL", DEFAULT_GEMINI_BASE_URL);
    let request_timeout_secs = parse_u64("PULSE_REQUEST_TIMEOUT_SECS", "60")?;
    let bind_addr = parse_addr("PULSE_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("PULSE_LOG_LEVEL", "info");
    let phase_interval_ms = parse_u64(
        "PULSE_PHASE_INTERVAL_MS",
        &DEFAULT_PHASE_INTERVAL.as_millis().to_string(),
    )?;

    if request_timeout_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "PULSE_REQUEST_TIMEOUT_SECS".to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }

    Ok(AppConfig {
        gemini_api_key,
        gemini_model,
        gemini_base_url,
        request_timeout_secs,
        bind_addr,
        log_level,
        phase_interval_ms,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
