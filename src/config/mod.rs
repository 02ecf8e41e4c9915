use std::env;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use sqlx::postgres::{PgConnectOptions, PgSslMode};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },

    #[error("invalid DATABASE_URL: {0}")]
    InvalidDatabaseUrl(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub user: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub name: String,
    pub host: String,
    pub port: u16,
    /// Full connection URL; when set it wins over the individual fields.
    #[serde(skip_serializing)]
    pub url: Option<String>,
    pub max_connections: u32,
    /// Pool acquire timeout in seconds
    pub connection_timeout: u64,
    pub run_migrations: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            user: String::new(),
            password: String::new(),
            name: String::new(),
            host: "localhost".to_string(),
            port: 5432,
            url: None,
            max_connections: 10,
            connection_timeout: 30,
            run_migrations: true,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the config from an arbitrary variable source. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let mut config = Self {
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
        };

        // Server
        if let Some(v) = get("APP_HOST") {
            config.server.host = v;
        }
        if let Some(v) = get("APP_PORT").or_else(|| get("PORT")) {
            config.server.port = parse_required("APP_PORT", &v)?;
        }

        // Database connection
        if let Some(v) = get("DB_USER") {
            config.database.user = v;
        }
        if let Some(v) = get("DB_PASSWORD") {
            config.database.password = v;
        }
        if let Some(v) = get("DB_NAME") {
            config.database.name = v;
        }
        if let Some(v) = get("DB_HOST") {
            config.database.host = v;
        }
        if let Some(v) = get("DB_PORT") {
            config.database.port = parse_required("DB_PORT", &v)?;
        }
        config.database.url = get("DATABASE_URL");

        // Pool tuning falls back to defaults on garbage
        if let Some(v) = get("DB_MAX_CONNECTIONS") {
            config.database.max_connections =
                parse_or("DB_MAX_CONNECTIONS", &v, config.database.max_connections);
        }
        if let Some(v) = get("DB_CONNECTION_TIMEOUT") {
            config.database.connection_timeout =
                parse_or("DB_CONNECTION_TIMEOUT", &v, config.database.connection_timeout);
        }
        if let Some(v) = get("DB_RUN_MIGRATIONS") {
            config.database.run_migrations =
                parse_or("DB_RUN_MIGRATIONS", &v, config.database.run_migrations);
        }

        Ok(config)
    }
}

impl DatabaseConfig {
    /// Connection options for the pool. TLS is off unless the URL asks for it.
    pub fn connect_options(&self) -> Result<PgConnectOptions, ConfigError> {
        if let Some(url) = &self.url {
            return PgConnectOptions::from_str(url)
                .map_err(|e| ConfigError::InvalidDatabaseUrl(e.to_string()));
        }

        let mut options = PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .ssl_mode(PgSslMode::Disable);

        // Unset credentials keep the driver defaults
        if !self.user.is_empty() {
            options = options.username(&self.user);
        }
        if !self.password.is_empty() {
            options = options.password(&self.password);
        }
        if !self.name.is_empty() {
            options = options.database(&self.name);
        }

        Ok(options)
    }

    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.connection_timeout)
    }
}

fn parse_required<T: FromStr>(key: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key,
        value: value.to_string(),
    })
}

fn parse_or<T: FromStr + Copy>(key: &str, value: &str, fallback: T) -> T {
    match value.trim().parse() {
        Ok(parsed) => parsed,
        Err(_) => {
            tracing::warn!("ignoring invalid {}={:?}", key, value);
            fallback
        }
    }
}
