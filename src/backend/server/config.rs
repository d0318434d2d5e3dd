/**
 * Server Configuration
 *
 * Everything the server needs is read from the environment once, at startup.
 * Required values that are missing or empty stop the process with a
 * `ConfigError`; there are no built-in fallback secrets.
 *
 * # Variables
 *
 * | Variable | Required | Default |
 * |---|---|---|
 * | `DATABASE_URL` | yes | |
 * | `JWT_SECRET` | yes | |
 * | `SUPABASE_URL` | yes | |
 * | `SUPABASE_SERVICE_ROLE_KEY` | yes | |
 * | `SUPABASE_ANON_KEY` | no | |
 * | `BPM_URL`, `BPM_USERNAME`, `BPM_PASSWORD` | no | |
 * | `APP_ENV` | no | `development` |
 * | `SERVER_PORT` | no | `3000` |
 * | `MIRROR_TIMEOUT_SECS` | no | `30` |
 * | `DATABASE_MAX_CONNECTIONS` | no | `10` |
 */

use secrecy::SecretString;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    MissingValue(&'static str),

    #[error("invalid value for {name}: {message}")]
    InvalidValue { name: &'static str, message: String },
}

/// Deployment environment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    pub fn is_production(&self) -> bool {
        matches!(self, AppEnv::Production)
    }
}

/// Credentials for the external BPM system. Parsed and carried, not used by
/// any handler yet.
#[derive(Debug)]
pub struct BpmConfig {
    pub url: String,
    pub username: Option<String>,
    pub password: Option<SecretString>,
}

#[derive(Debug)]
pub struct SupabaseConfig {
    pub url: String,
    pub service_role_key: SecretString,
    /// Browser-safe key; never used for writes
    pub anon_key: Option<SecretString>,
    pub timeout: Duration,
}

#[derive(Debug)]
pub struct ServerConfig {
    pub database_url: SecretString,
    pub database_max_connections: u32,
    pub jwt_secret: SecretString,
    pub supabase: SupabaseConfig,
    pub bpm: Option<BpmConfig>,
    pub app_env: AppEnv,
    pub port: u16,
}

impl ServerConfig {
    /// Load from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load using `lookup` to resolve variable names
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let optional = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        let required = |name: &'static str| optional(name).ok_or(ConfigError::MissingValue(name));

        let app_env = match optional("APP_ENV").as_deref().map(str::to_lowercase).as_deref() {
            None | Some("development") | Some("dev") | Some("test") => AppEnv::Development,
            Some("production") | Some("prod") => AppEnv::Production,
            Some(other) => {
                return Err(ConfigError::InvalidValue {
                    name: "APP_ENV",
                    message: format!("unknown environment '{}'", other),
                })
            }
        };

        let bpm = optional("BPM_URL").map(|url| BpmConfig {
            url,
            username: optional("BPM_USERNAME"),
            password: optional("BPM_PASSWORD").map(SecretString::from),
        });

        Ok(Self {
            database_url: SecretString::from(required("DATABASE_URL")?),
            database_max_connections: parse_or("DATABASE_MAX_CONNECTIONS", optional("DATABASE_MAX_CONNECTIONS"), 10)?,
            jwt_secret: SecretString::from(required("JWT_SECRET")?),
            supabase: SupabaseConfig {
                url: required("SUPABASE_URL")?,
                service_role_key: SecretString::from(required("SUPABASE_SERVICE_ROLE_KEY")?),
                anon_key: optional("SUPABASE_ANON_KEY").map(SecretString::from),
                timeout: Duration::from_secs(parse_or(
                    "MIRROR_TIMEOUT_SECS",
                    optional("MIRROR_TIMEOUT_SECS"),
                    30,
                )?),
            },
            bpm,
            app_env,
            port: parse_or("SERVER_PORT", optional("SERVER_PORT"), 3000)?,
        })
    }
}

fn parse_or<T>(name: &'static str, value: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match value {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::InvalidValue {
            name,
            message: e.to_string(),
        }),
    }
}
