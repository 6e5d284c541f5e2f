use crate::app_config::{AppConfig, Environment};
use crate::geo::GeoPoint;
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
/// Every variable has a default, so an empty environment yields a usable
/// development configuration.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

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

    let parse_f64 = |var: &str, default: &str| -> Result<f64, ConfigError> {
        or_default(var, default)
            .parse::<f64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        or_default(var, default)
            .parse::<usize>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let env = parse_environment(&or_default("WELLNESS_ENV", "development"))?;

    let bind_addr = parse_addr("WELLNESS_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("WELLNESS_LOG_LEVEL", "info");
    let facilities_path = PathBuf::from(or_default(
        "WELLNESS_FACILITIES_PATH",
        "./config/facilities.yaml",
    ));

    let default_lat = parse_f64("WELLNESS_DEFAULT_LAT", "-1.1711")?;
    let default_lng = parse_f64("WELLNESS_DEFAULT_LNG", "36.8304")?;
    let default_reference_point = GeoPoint::try_new(default_lat, default_lng)
        .map_err(|e| invalid("WELLNESS_DEFAULT_LAT/WELLNESS_DEFAULT_LNG", e.to_string()))?;

    let nearest_limit = parse_usize("WELLNESS_NEAREST_LIMIT", "3")?;
    if nearest_limit == 0 {
        return Err(invalid(
            "WELLNESS_NEAREST_LIMIT",
            "must be at least 1".to_string(),
        ));
    }

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        facilities_path,
        default_reference_point,
        nearest_limit,
    })
}

fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "WELLNESS_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
