//! Process configuration, read once at startup

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Validity window of an issued session token
pub const TOKEN_TTL: Duration = Duration::from_secs(3 * 60 * 60);

/// bcrypt work factor applied to every new password hash
pub const BCRYPT_COST: u32 = 14;

const DEFAULT_PORT: u16 = 8081;
const DEFAULT_UPLOAD_DIR: &str = "./uploads";
const DEFAULT_CORS_ORIGINS: &str = "http://localhost:3000";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("JWT_SECRET must be set to a non-empty value")]
    MissingSecret,

    #[error("{0} must be set when DATABASE_URL is not provided")]
    MissingDatabaseVar(&'static str),

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
}

/// Settings consumed by the password hasher and the token issuer/verifier
#[derive(Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub token_ttl: Duration,
    pub bcrypt_cost: u32,
}

impl AuthConfig {
    pub fn new(jwt_secret: impl Into<String>) -> Result<Self, ConfigError> {
        let jwt_secret = jwt_secret.into();
        if jwt_secret.trim().is_empty() {
            return Err(ConfigError::MissingSecret);
        }

        Ok(Self {
            jwt_secret,
            token_ttl: TOKEN_TTL,
            bcrypt_cost: BCRYPT_COST,
        })
    }
}

// Keep the secret out of debug output.
impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"<redacted>")
            .field("token_ttl", &self.token_ttl)
            .field("bcrypt_cost", &self.bcrypt_cost)
            .finish()
    }
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub database_url: String,
    pub port: u16,
    pub upload_dir: PathBuf,
    pub cors_allowed_origins: Vec<String>,
    pub run_migrations: bool,
    pub auth: AuthConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let auth = AuthConfig::new(lookup("JWT_SECRET").unwrap_or_default())?;

        let database_url = match lookup("DATABASE_URL").filter(|url| !url.trim().is_empty()) {
            Some(url) => url,
            None => database_url_from_parts(&lookup)?,
        };

        let port = match lookup("SERVER_PORT").filter(|p| !p.trim().is_empty()) {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: "SERVER_PORT",
                value: raw,
            })?,
            None => {
                tracing::warn!("SERVER_PORT not set, using default :{}", DEFAULT_PORT);
                DEFAULT_PORT
            }
        };

        let upload_dir = lookup("UPLOAD_DIR")
            .filter(|dir| !dir.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_UPLOAD_DIR));

        let cors_allowed_origins = lookup("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|| DEFAULT_CORS_ORIGINS.to_string())
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        let run_migrations = match lookup("RUN_MIGRATIONS") {
            None => true,
            Some(raw) => parse_bool(&raw).ok_or(ConfigError::InvalidValue {
                key: "RUN_MIGRATIONS",
                value: raw,
            })?,
        };

        Ok(Self {
            database_url,
            port,
            upload_dir,
            cors_allowed_origins,
            run_migrations,
            auth,
        })
    }
}

fn database_url_from_parts<F>(lookup: &F) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let require = |key: &'static str| lookup(key).ok_or(ConfigError::MissingDatabaseVar(key));

    let user = require("DB_USER")?;
    let password = lookup("DB_PASSWORD").unwrap_or_default();
    let host = require("DB_HOST")?;
    let port = require("DB_PORT")?;
    let name = require("DB_NAME")?;

    Ok(format!(
        "postgresql://{}:{}@{}:{}/{}?sslmode=disable",
        user, password, host, port, name
    ))
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn missing_secret_is_fatal() {
        let result = AppConfig::from_lookup(lookup_from(&[("DATABASE_URL", "postgres://x/y")]));
        assert_eq!(result.unwrap_err(), ConfigError::MissingSecret);
    }

    #[test]
    fn blank_secret_is_fatal() {
        let result = AppConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://x/y"),
            ("JWT_SECRET", "   "),
        ]));
        assert_eq!(result.unwrap_err(), ConfigError::MissingSecret);
    }

    #[test]
    fn database_url_is_assembled_from_parts() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("JWT_SECRET", "s3cret"),
            ("DB_USER", "vet"),
            ("DB_PASSWORD", "pw"),
            ("DB_HOST", "localhost"),
            ("DB_PORT", "5432"),
            ("DB_NAME", "clinic"),
        ]))
        .unwrap();

        assert_eq!(
            config.database_url,
            "postgresql://vet:pw@localhost:5432/clinic?sslmode=disable"
        );
        assert_eq!(config.port, 8081);
        assert_eq!(config.upload_dir, PathBuf::from("./uploads"));
        assert!(config.run_migrations);
        assert_eq!(config.auth.token_ttl, Duration::from_secs(10_800));
        assert_eq!(config.auth.bcrypt_cost, 14);
    }

    #[test]
    fn missing_database_part_is_reported() {
        let result = AppConfig::from_lookup(lookup_from(&[
            ("JWT_SECRET", "s3cret"),
            ("DB_USER", "vet"),
            ("DB_PORT", "5432"),
            ("DB_NAME", "clinic"),
        ]));
        assert_eq!(result.unwrap_err(), ConfigError::MissingDatabaseVar("DB_HOST"));
    }

    #[test]
    fn explicit_values_override_defaults() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("JWT_SECRET", "s3cret"),
            ("DATABASE_URL", "postgres://db/clinic"),
            ("SERVER_PORT", "9000"),
            ("UPLOAD_DIR", "/var/lib/clinic"),
            ("CORS_ALLOWED_ORIGINS", "http://a.test, http://b.test,"),
            ("RUN_MIGRATIONS", "off"),
        ]))
        .unwrap();

        assert_eq!(config.database_url, "postgres://db/clinic");
        assert_eq!(config.port, 9000);
        assert_eq!(config.upload_dir, PathBuf::from("/var/lib/clinic"));
        assert_eq!(config.cors_allowed_origins, vec!["http://a.test", "http://b.test"]);
        assert!(!config.run_migrations);
    }

    #[test]
    fn bad_port_is_rejected() {
        let result = AppConfig::from_lookup(lookup_from(&[
            ("JWT_SECRET", "s3cret"),
            ("DATABASE_URL", "postgres://db/clinic"),
            ("SERVER_PORT", "eighty"),
        ]));
        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue { key: "SERVER_PORT", .. })
        ));
    }

    #[test]
    fn debug_output_hides_secret() {
        let auth = AuthConfig::new("top-secret-value").unwrap();
        assert!(!format!("{:?}", auth).contains("top-secret-value"));
    }
}
