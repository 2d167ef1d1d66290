use std::path::PathBuf;

use crate::app_config::AppConfig;
use crate::search::DEFAULT_RESULT_CAP;
use crate::status::StatusMatch;
use crate::ConfigError;

const DEFAULT_SIRENE_BASE_URL: &str = "https://api.insee.fr/api-sirene/3.11";

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
/// Decoupled from the real environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
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

    let parse_bool = |var: &str, default: bool| -> Result<bool, ConfigError> {
        match lookup(var) {
            Err(_) => Ok(default),
            Ok(raw) => parse_flag(&raw).ok_or_else(|| {
                invalid(var, format!("expected true/false, got {raw:?}"))
            }),
        }
    };

    // An empty key in `.env` (`SIRENE_API_KEY=`) means "not configured".
    let sirene_api_key = lookup("SIRENE_API_KEY")
        .ok()
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty());

    let sirene_base_url = or_default("ANNUAIRE_SIRENE_BASE_URL", DEFAULT_SIRENE_BASE_URL);
    let request_timeout_secs = parse_u64("ANNUAIRE_REQUEST_TIMEOUT_SECS", "15")?;
    let user_agent = or_default("ANNUAIRE_USER_AGENT", "annuaire/0.1 (registry-search)");
    let max_retries = parse_u32("ANNUAIRE_MAX_RETRIES", "2")?;
    let retry_backoff_base_ms = parse_u64("ANNUAIRE_RETRY_BACKOFF_BASE_MS", "1000")?;

    let result_cap = or_default("ANNUAIRE_RESULT_CAP", &DEFAULT_RESULT_CAP.to_string())
        .parse::<usize>()
        .map_err(|e| invalid("ANNUAIRE_RESULT_CAP", e.to_string()))?;
    if result_cap == 0 {
        return Err(invalid("ANNUAIRE_RESULT_CAP", "must be at least 1".to_string()));
    }

    let small_companies_only = parse_bool("ANNUAIRE_SMALL_COMPANIES_ONLY", true)?;

    let status_match = or_default("ANNUAIRE_STATUS_MATCH", "exact")
        .parse::<StatusMatch>()
        .map_err(|reason| invalid("ANNUAIRE_STATUS_MATCH", reason))?;

    let export_dir = PathBuf::from(or_default("ANNUAIRE_EXPORT_DIR", "."));
    let log_level = or_default("ANNUAIRE_LOG_LEVEL", "info");

    Ok(AppConfig {
        sirene_api_key,
        sirene_base_url,
        request_timeout_secs,
        user_agent,
        max_retries,
        retry_backoff_base_ms,
        result_cap,
        small_companies_only,
        status_match,
        export_dir,
        log_level,
    })
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
