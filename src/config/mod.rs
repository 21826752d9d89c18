use std::{env, str::FromStr, time::Duration};

use crate::error::{AppError, Result};

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub feed: FeedConfig,
    pub push: PushConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
    pub max_concurrent_requests: usize,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout: Duration,
    pub idle_timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct FeedConfig {
    pub activity_window_days: i64,
}

#[derive(Debug, Clone)]
pub struct PushConfig {
    pub enabled: bool,
    pub vapid_private_key: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            server: ServerConfig {
                host: env_or_default("HOST", "127.0.0.1"),
                port: env_or_parse("PORT", 8080)?,
                cors_allowed_origins: env_list("CORS_ALLOWED_ORIGINS", vec!["".into()]),
                max_concurrent_requests: env_or_parse("SERVER_MAX_CONCURRENT_REQUESTS", 100)?,
            },
            database: DatabaseConfig {
                url: env_required("DATABASE_URL")?,
                max_connections: env_or_parse("DB_MAX_CONNECTIONS", 10)?,
                min_connections: env_or_parse("DB_MIN_CONNECTIONS", 5)?,
                connect_timeout: Duration::from_secs(env_or_parse("DB_CONNECT_TIMEOUT_SECS", 10)?),
                idle_timeout: Duration::from_secs(env_or_parse("DB_IDLE_TIMEOUT_SECS", 300)?),
            },
            feed: FeedConfig {
                activity_window_days: env_or_parse("FEED_ACTIVITY_WINDOW_DAYS", 7)?,
            },
            push: PushConfig {
                enabled: env_or_parse("PUSH_ENABLED", true)?,
                vapid_private_key: env_optional("VAPID_PRIVATE_KEY"),
            },
        })
    }

    pub fn validate(&self) -> Result<()> {
        if self.feed.activity_window_days <= 0 {
            return Err(AppError::InvalidParams(
                "FEED_ACTIVITY_WINDOW_DAYS must be positive".into(),
            ));
        }

        if self.push.enabled && self.push.vapid_private_key.is_none() {
            return Err(AppError::InvalidParams(
                "VAPID_PRIVATE_KEY is required when PUSH_ENABLED is true".into(),
            ));
        }

        Ok(())
    }
}

fn env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_or_parse<T: FromStr>(key: &str, default: T) -> Result<T> {
    match env::var(key) {
        Ok(val) => val
            .parse()
            .map_err(|_| AppError::InvalidParams(format!("Invalid value for {key}"))),
        Err(_) => Ok(default),
    }
}

fn env_required(key: &str) -> Result<String> {
    env::var(key).map_err(|_| AppError::InvalidParams(format!("{key} is required")))
}

fn env_optional(key: &str) -> Option<String> {
    env::var(key).ok().filter(|val| !val.is_empty())
}

fn env_list(key: &str, default: Vec<String>) -> Vec<String> {
    env::var(key)
        .map(|val| {
            val.split(',')
                .map(|str_val| str_val.trim().to_string())
                .collect()
        })
        .unwrap_or(default)
}
