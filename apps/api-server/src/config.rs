//! Application configuration loaded from environment variables.

use std::ops::RangeInclusive;
use std::str::FromStr;

use anyhow::{Context, Result, ensure};
use postboard_infra::JwtConfig;
use postboard_infra::database::DatabaseConfig;

use crate::telemetry::TelemetryConfig;

/// Accepted token lifetimes, one hour up to a year.
const JWT_EXPIRATION_HOURS: RangeInclusive<i64> = 1..=8760;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: Option<DatabaseConfig>,
    pub jwt: JwtConfig,
    pub telemetry: TelemetryConfig,
    /// `RUST_ENV` is `production` or `prod`.
    pub production: bool,
}

impl AppConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through `lookup`.
    ///
    /// Unset variables fall back to defaults; set but unparsable ones are errors.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let database = match lookup("DATABASE_URL") {
            Some(url) => Some(DatabaseConfig {
                url,
                max_connections: parse_var(&lookup, "DB_MAX_CONNECTIONS", 20)?,
                min_connections: parse_var(&lookup, "DB_MIN_CONNECTIONS", 2)?,
            }),
            None => None,
        };

        let defaults = JwtConfig::default();
        let expiration_hours =
            parse_var(&lookup, "JWT_EXPIRATION_HOURS", defaults.expiration_hours)?;
        ensure!(
            JWT_EXPIRATION_HOURS.contains(&expiration_hours),
            "JWT_EXPIRATION_HOURS must be between {} and {}, got {expiration_hours}",
            JWT_EXPIRATION_HOURS.start(),
            JWT_EXPIRATION_HOURS.end()
        );
        let jwt = JwtConfig {
            secret: lookup("JWT_SECRET").unwrap_or(defaults.secret),
            expiration_hours,
            issuer: lookup("JWT_ISSUER").unwrap_or(defaults.issuer),
        };

        Ok(Self {
            host: lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: parse_var(&lookup, "PORT", 8080)?,
            database,
            jwt,
            telemetry: TelemetryConfig::from_lookup(&lookup),
            production: lookup("RUST_ENV").is_some_and(|v| v == "production" || v == "prod"),
        })
    }

    /// Log a warning, or an error in production, when the JWT secret was left at its default.
    pub fn check_secrets(&self) {
        if !self.jwt.uses_default_secret() {
            return;
        }

        if self.production {
            tracing::error!(
                "SECURITY: Using default JWT secret in production! Set JWT_SECRET environment variable."
            );
        } else {
            tracing::warn!("Using default JWT secret. Set JWT_SECRET for production use.");
        }
    }
}

fn parse_var<T>(lookup: impl Fn(&str) -> Option<String>, name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(name) {
        Some(raw) => raw
            .parse()
            .with_context(|| format!("{name} has an invalid value: {raw:?}")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<AppConfig> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults_when_nothing_is_set() {
        let config = load(&[]).unwrap();

        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert!(config.database.is_none());
        assert_eq!(config.jwt.expiration_hours, 24);
        assert!(config.jwt.uses_default_secret());
        assert!(!config.telemetry.json_logs);
        assert!(!config.production);
    }

    #[test]
    fn test_database_url_enables_database() {
        let config = load(&[
            ("DATABASE_URL", "postgres://localhost/postboard"),
            ("DB_MAX_CONNECTIONS", "5"),
        ])
        .unwrap();

        let database = config.database.unwrap();
        assert_eq!(database.url, "postgres://localhost/postboard");
        assert_eq!(database.max_connections, 5);
        assert_eq!(database.min_connections, 2);
    }

    #[test]
    fn test_unparsable_values_are_errors() {
        let err = load(&[("PORT", "eighty")]).unwrap_err();
        assert!(err.to_string().contains("PORT"));

        assert!(
            load(&[
                ("DATABASE_URL", "postgres://localhost/postboard"),
                ("DB_MIN_CONNECTIONS", "-1"),
            ])
            .is_err()
        );
    }

    #[test]
    fn test_token_lifetime_must_be_in_range() {
        for hours in ["0", "-3", "8761", "9223372036854775"] {
            let err = load(&[("JWT_EXPIRATION_HOURS", hours)]).unwrap_err();
            assert!(err.to_string().contains("JWT_EXPIRATION_HOURS"), "{hours}");
        }

        let config = load(&[("JWT_EXPIRATION_HOURS", "8760")]).unwrap();
        assert_eq!(config.jwt.expiration_hours, 8760);
    }

    #[test]
    fn test_production_flag() {
        assert!(load(&[("RUST_ENV", "production")]).unwrap().production);
        assert!(load(&[("RUST_ENV", "prod")]).unwrap().production);
        assert!(!load(&[("RUST_ENV", "development")]).unwrap().production);
    }
}
