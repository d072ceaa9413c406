use std::str::FromStr;

use serde::Deserialize;
use thiserror::Error;

use crate::nutrition::predictor::DEFAULT_CACHE_CAPACITY;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("environment variable {var} has invalid value `{value}`")]
    Invalid { var: &'static str, value: String },
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub ai_enabled: bool,
    pub cache_capacity: usize,
    pub similar_limit: usize,
    pub search_limit: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 8080,
            ai_enabled: true,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            similar_limit: 3,
            search_limit: 10,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            host: std::env::var("APP_HOST").unwrap_or(defaults.host),
            port: env_or("APP_PORT", defaults.port)?,
            ai_enabled: env_flag("AI_ENABLED", defaults.ai_enabled)?,
            cache_capacity: env_or("PREDICTION_CACHE_CAPACITY", defaults.cache_capacity)?,
            similar_limit: env_or("SIMILAR_FOODS_LIMIT", defaults.similar_limit)?,
            search_limit: env_or("SEARCH_LIMIT", defaults.search_limit)?,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn env_or<T: FromStr>(var: &'static str, default: T) -> Result<T, ConfigError> {
    match std::env::var(var) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { var, value }),
        Err(_) => Ok(default),
    }
}

fn env_flag(var: &'static str, default: bool) -> Result<bool, ConfigError> {
    match std::env::var(var) {
        Ok(value) => match value.trim().to_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(ConfigError::Invalid { var, value }),
        },
        Err(_) => Ok(default),
    }
}
