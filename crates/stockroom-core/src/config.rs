use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidEnvVar`] if `STOCKROOM_FEED_DELIMITER` is not
/// a single character usable as a field separator.
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
/// Returns [`ConfigError::InvalidEnvVar`] if `STOCKROOM_FEED_DELIMITER` is not
/// a single character usable as a field separator.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can drive it from a `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_delimiter = |var: &str, default: &str| -> Result<char, ConfigError> {
        let raw = or_default(var, default);
        let mut chars = raw.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if c != '"' && c != '\n' && c != '\r' => Ok(c),
            _ => Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: format!("expected a single delimiter character, got {raw:?}"),
            }),
        }
    };

    let env = parse_environment(&or_default("STOCKROOM_ENV", "development"));
    let log_level = or_default("STOCKROOM_LOG_LEVEL", env.default_log_level());
    let synonym_feed_path = PathBuf::from(or_default(
        "STOCKROOM_SYNONYM_FEED_PATH",
        "./config/synonyms.csv",
    ));
    let code_feed_path = PathBuf::from(or_default(
        "STOCKROOM_CODE_FEED_PATH",
        "./config/catalog_codes.csv",
    ));
    let match_settings_path = lookup("STOCKROOM_MATCH_SETTINGS_PATH")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .map(PathBuf::from);
    let feed_delimiter = parse_delimiter("STOCKROOM_FEED_DELIMITER", ",")?;

    Ok(AppConfig {
        env,
        log_level,
        synonym_feed_path,
        code_feed_path,
        match_settings_path,
        feed_delimiter,
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
