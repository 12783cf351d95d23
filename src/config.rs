use std::collections::HashMap;
use std::net::IpAddr;
use thiserror::Error;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub database_path: String,
    pub last_service_mode: LastServiceMode,
}

/// How a new maintenance record updates its vehicle's `last_service_date`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LastServiceMode {
    /// Always take the date of the record just entered.
    #[default]
    Entered,
    /// Only move the date forward in calendar order.
    Latest,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnv(String),
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_map(std::env::vars().collect())
    }

    pub fn from_env_map(env_map: HashMap<String, String>) -> Result<Self, ConfigError> {
        let host = env_map
            .get("HOST")
            .map(|s| s.as_str())
            .unwrap_or("127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|_| {
                ConfigError::InvalidValue("HOST".to_string(), "must be an IP address".to_string())
            })?;

        let port = env_map
            .get("PORT")
            .map(|s| s.as_str())
            .unwrap_or("5000")
            .parse::<u16>()
            .map_err(|_| {
                ConfigError::InvalidValue("PORT".to_string(), "must be a valid u16".to_string())
            })?;

        let database_path = env_map
            .get("DATABASE_PATH")
            .cloned()
            .unwrap_or_else(|| "database.db".to_string());
        if database_path.trim().is_empty() {
            return Err(ConfigError::MissingEnv("DATABASE_PATH".to_string()));
        }

        let last_service_mode = match env_map
            .get("LAST_SERVICE_DATE_MODE")
            .map(|s| s.as_str())
            .unwrap_or("entered")
        {
            "entered" => LastServiceMode::Entered,
            "latest" => LastServiceMode::Latest,
            other => {
                return Err(ConfigError::InvalidValue(
                    "LAST_SERVICE_DATE_MODE".to_string(),
                    format!("must be entered or latest, got {}", other),
                ))
            }
        };

        Ok(Config {
            host,
            port,
            database_path,
            last_service_mode,
        })
    }
}
