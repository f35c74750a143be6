//! API server configuration.

use thiserror::Error;
use warden_core::auth::jwt::{DEFAULT_TOKEN_TTL_SECS, MAX_TOKEN_TTL_SECS};

/// Default listener address.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

/// Default PostgreSQL pool size.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Configuration errors. All of them abort startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("JWT_SECRET is not set")]
    MissingSecret,

    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
}

/// Configuration for the API server.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    /// Address to bind the HTTP listener (e.g. "127.0.0.1:3000").
    pub bind_addr: String,
    /// PostgreSQL connection URL. `None` selects the in-memory account store.
    pub database_url: Option<String>,
    /// Maximum PostgreSQL pool size.
    pub max_connections: u32,
    /// JWT signing secret.
    pub jwt_secret: String,
    /// Access token lifetime in seconds.
    pub jwt_ttl_secs: i64,
}

impl ApiConfig {
    /// Reads configuration from environment variables.
    ///
    /// | Variable             | Default            |
    /// |----------------------|--------------------|
    /// | `BIND_ADDR`          | `127.0.0.1:3000`   |
    /// | `DATABASE_URL`       | unset (in-memory)  |
    /// | `DB_MAX_CONNECTIONS` | `5`                |
    /// | `JWT_SECRET`         | required           |
    /// | `JWT_EXPIRES_IN`     | `3600` (seconds, at most 30 days) |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ApiConfig::from_env`] with an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let jwt_secret = get("JWT_SECRET").ok_or(ConfigError::MissingSecret)?;

        let jwt_ttl_secs = match get("JWT_EXPIRES_IN") {
            Some(raw) => parse_duration_secs(&raw)
                .filter(|secs| *secs <= MAX_TOKEN_TTL_SECS)
                .ok_or(ConfigError::InvalidValue {
                    key: "JWT_EXPIRES_IN",
                    value: raw,
                })?,
            None => DEFAULT_TOKEN_TTL_SECS,
        };

        let max_connections = match get("DB_MAX_CONNECTIONS") {
            Some(raw) => raw
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or(ConfigError::InvalidValue {
                    key: "DB_MAX_CONNECTIONS",
                    value: raw,
                })?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        Ok(Self {
            bind_addr: get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.into()),
            database_url: get("DATABASE_URL"),
            max_connections,
            jwt_secret,
            jwt_ttl_secs,
        })
    }
}

/// Parse `3600`, `3600s`, `15m`, `1h` or `1d` into seconds. Must be positive.
pub fn parse_duration_secs(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    let (digits, unit) = match raw.char_indices().last()? {
        (i, c) if c.is_ascii_alphabetic() => (&raw[..i], c),
        _ => (raw, 's'),
    };
    let value = digits.parse::<i64>().ok()?;
    let multiplier = match unit {
        's' => 1,
        'm' => 60,
        'h' => 3600,
        'd' => 86_400,
        _ => return None,
    };
    value.checked_mul(multiplier).filter(|secs| *secs > 0)
}
