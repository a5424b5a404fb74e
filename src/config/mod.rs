use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::time::Duration;
use thiserror::Error;

/// Errors raised while building the startup configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing configuration: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub crm: CrmConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Supabase Postgres connection string. Holds the service credentials.
    #[serde(skip_serializing)]
    pub url: String,
    pub max_connections: u32,
    pub connection_timeout: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrmConfig {
    pub base_url: String,
    pub api_version: String,
    /// Request timeout in seconds; `None` keeps the HTTP client's default
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    pub cors_origins: Vec<String>,
}

pub const DEFAULT_CRM_BASE_URL: &str = "https://services.leadconnectorhq.com";
pub const DEFAULT_CRM_API_VERSION: &str = "2021-07-28";

impl AppConfig {
    /// Builds the configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(&env::vars().collect())
    }

    /// Builds the configuration from an explicit variable map and validates it
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let environment = match vars.get("APP_ENV").map(String::as_str) {
            Some("production") | Some("prod") => Environment::Production,
            Some("staging") | Some("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        let database_url = vars
            .get("DATABASE_URL")
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::Missing("DATABASE_URL"))?
            .clone();

        let config = match environment {
            Environment::Production => Self::production(database_url),
            Environment::Staging => Self::staging(database_url),
            Environment::Development => Self::development(database_url),
        }
        .with_overrides(vars)?;

        config.validate()?;
        Ok(config)
    }

    fn with_overrides(mut self, vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        // Server overrides
        if let Some(v) = vars.get("HOST") {
            self.server.host = v.clone();
        }
        if let Some(v) = vars.get("GHL_API_PORT").or_else(|| vars.get("PORT")) {
            self.server.port = parse_var("PORT", v)?;
        }

        // Database overrides
        if let Some(v) = vars.get("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = parse_var("DATABASE_MAX_CONNECTIONS", v)?;
        }
        if let Some(v) = vars.get("DATABASE_CONNECTION_TIMEOUT") {
            self.database.connection_timeout = parse_var("DATABASE_CONNECTION_TIMEOUT", v)?;
        }

        // CRM overrides
        if let Some(v) = vars.get("GHL_API_BASE_URL") {
            self.crm.base_url = v.trim_end_matches('/').to_string();
        }
        if let Some(v) = vars.get("GHL_API_VERSION") {
            self.crm.api_version = v.clone();
        }
        if let Some(v) = vars.get("CRM_TIMEOUT_SECS") {
            self.crm.timeout_secs = Some(parse_var("CRM_TIMEOUT_SECS", v)?);
        }

        // Security overrides
        if let Some(v) = vars.get("SECURITY_CORS_ORIGINS") {
            self.security.cors_origins = v
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }

        Ok(self)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let db_url = url::Url::parse(&self.database.url).map_err(|e| ConfigError::Invalid {
            key: "DATABASE_URL",
            reason: e.to_string(),
        })?;
        if !matches!(db_url.scheme(), "postgres" | "postgresql") {
            return Err(ConfigError::Invalid {
                key: "DATABASE_URL",
                reason: format!("unsupported scheme '{}'", db_url.scheme()),
            });
        }

        let crm_url = url::Url::parse(&self.crm.base_url).map_err(|e| ConfigError::Invalid {
            key: "GHL_API_BASE_URL",
            reason: e.to_string(),
        })?;
        if !matches!(crm_url.scheme(), "http" | "https") {
            return Err(ConfigError::Invalid {
                key: "GHL_API_BASE_URL",
                reason: format!("unsupported scheme '{}'", crm_url.scheme()),
            });
        }

        if self.crm.api_version.trim().is_empty() {
            return Err(ConfigError::Invalid {
                key: "GHL_API_VERSION",
                reason: "must not be empty".to_string(),
            });
        }
        if self.database.max_connections == 0 {
            return Err(ConfigError::Invalid {
                key: "DATABASE_MAX_CONNECTIONS",
                reason: "must be at least 1".to_string(),
            });
        }

        Ok(())
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    pub fn is_development(&self) -> bool {
        self.environment == Environment::Development
    }

    fn development(database_url: String) -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig::default(),
            database: DatabaseConfig {
                url: database_url,
                max_connections: 5,
                connection_timeout: 30,
            },
            crm: CrmConfig::default(),
            security: SecurityConfig {
                cors_origins: vec![
                    "http://localhost:3000".to_string(),
                    "http://localhost:5173".to_string(),
                ],
            },
        }
    }

    fn staging(database_url: String) -> Self {
        Self {
            environment: Environment::Staging,
            server: ServerConfig::default(),
            database: DatabaseConfig {
                url: database_url,
                max_connections: 10,
                connection_timeout: 10,
            },
            crm: CrmConfig::default(),
            security: SecurityConfig {
                cors_origins: vec!["https://staging.example.com".to_string()],
            },
        }
    }

    fn production(database_url: String) -> Self {
        Self {
            environment: Environment::Production,
            server: ServerConfig::default(),
            database: DatabaseConfig {
                url: database_url,
                max_connections: 20,
                connection_timeout: 5,
            },
            crm: CrmConfig::default(),
            security: SecurityConfig {
                cors_origins: vec!["https://app.example.com".to_string()],
            },
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl Default for CrmConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_CRM_BASE_URL.to_string(),
            api_version: DEFAULT_CRM_API_VERSION.to_string(),
            timeout_secs: None,
        }
    }
}

impl CrmConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

fn parse_var<T>(key: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
        key,
        reason: e.to_string(),
    })
}
