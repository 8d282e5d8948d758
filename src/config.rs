use crate::tasks::refresher::DEFAULT_REFRESH_INTERVAL;
use std::env;
use std::time::Duration;
use thiserror::Error;
use uuid::Uuid;

const DEFAULT_SERVER_URL: &str = "http://localhost:8000";
const DEFAULT_CHART_WIDTH: f64 = 600.0;
const DEFAULT_CHART_HEIGHT: f64 = 400.0;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("POLL_ID must be set")]
    MissingPollId,
    #[error("{name} must be a positive number, got {value:?}")]
    InvalidNumber { name: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub server_url: String,
    pub poll_id: String,
    pub user_id: String,
    pub refresh_interval: Duration,
    pub chart_width: f64,
    pub chart_height: f64,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let poll_id = lookup("POLL_ID")
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty())
            .ok_or(ConfigError::MissingPollId)?;

        let server_url = lookup("POLL_SERVER_URL").unwrap_or_else(|| DEFAULT_SERVER_URL.to_string());
        // Identity is opaque; a fresh one per session is fine when none is supplied
        let user_id = lookup("POLL_USER_ID").unwrap_or_else(|| Uuid::new_v4().to_string());

        let refresh_interval = match lookup("POLL_REFRESH_MS") {
            Some(value) => Duration::from_millis(parse_positive("POLL_REFRESH_MS", &value)?),
            None => DEFAULT_REFRESH_INTERVAL,
        };
        let chart_width = match lookup("POLL_CHART_WIDTH") {
            Some(value) => parse_positive("POLL_CHART_WIDTH", &value)? as f64,
            None => DEFAULT_CHART_WIDTH,
        };
        let chart_height = match lookup("POLL_CHART_HEIGHT") {
            Some(value) => parse_positive("POLL_CHART_HEIGHT", &value)? as f64,
            None => DEFAULT_CHART_HEIGHT,
        };

        Ok(Self {
            server_url,
            poll_id,
            user_id,
            refresh_interval,
            chart_width,
            chart_height,
        })
    }
}

fn parse_positive(name: &'static str, value: &str) -> Result<u64, ConfigError> {
    match value.trim().parse::<u64>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ConfigError::InvalidNumber {
            name,
            value: value.to_string(),
        }),
    }
}
