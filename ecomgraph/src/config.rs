// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Environment-driven settings
//!
//! Only the variables the tooling itself needs are read here. Everything
//! else in `.env` (Scylla connection, keyspaces, dataset sizing) reaches the
//! containers and the demo process through the inherited environment.
//!
//! The project's `.env` is consulted for the same variables; anything set in
//! the process environment takes precedence over it.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

use crate::orchestrator::HealthCheckPolicy;
use crate::provision::ReadinessPoller;

pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_PORT: u16 = 8182;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_HEALTH_RETRIES: u32 = 30;
pub const DEFAULT_HEALTH_INTERVAL_SECS: u64 = 10;
pub const DEFAULT_INDEX_WAIT_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_INDEX_POLL_INTERVAL_SECS: u64 = 5;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value '{value}' for {key}: {reason}")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },

    #[error("Cannot read {}: {reason}", .path.display())]
    EnvFile { path: PathBuf, reason: String },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub janusgraph_host: String,
    pub janusgraph_port: u16,
    /// Path of the Gremlin Server HTTP endpoint, empty for the server root
    pub gremlin_path: String,
    pub request_timeout: Duration,
    pub health_check_url: String,
    pub health_check_retries: u32,
    pub health_check_interval: Duration,
    pub index_wait_timeout: Duration,
    pub index_poll_interval: Duration,
    pub log_level: Option<String>,
}

impl Settings {
    /// Load from the process environment
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from the process environment, falling back to a dotenv file
    ///
    /// A missing file is not an error. Variables already present in the
    /// process environment win over the file.
    pub fn from_env_and_file(path: &Path) -> ConfigResult<Self> {
        let file = read_env_file(path)?;
        Self::from_lookup(|key| std::env::var(key).ok().or_else(|| file.get(key).cloned()))
    }

    /// Load through an arbitrary variable lookup; blank values count as unset
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let janusgraph_host = get("JANUSGRAPH_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let janusgraph_port = parse_or(&get, "JANUSGRAPH_PORT", DEFAULT_PORT)?;
        let gremlin_path = get("GREMLIN_PATH")
            .map(|raw| normalize_path(&raw))
            .unwrap_or_default();
        let health_check_url = get("HEALTH_CHECK_URL")
            .unwrap_or_else(|| format!("http://{}:{}", janusgraph_host, janusgraph_port));

        Ok(Self {
            request_timeout: secs_or(&get, "GREMLIN_REQUEST_TIMEOUT", DEFAULT_REQUEST_TIMEOUT_SECS)?,
            health_check_retries: parse_or(&get, "HEALTH_CHECK_RETRIES", DEFAULT_HEALTH_RETRIES)?,
            health_check_interval: secs_or(&get, "HEALTH_CHECK_INTERVAL", DEFAULT_HEALTH_INTERVAL_SECS)?,
            index_wait_timeout: secs_or(&get, "INDEX_WAIT_TIMEOUT", DEFAULT_INDEX_WAIT_TIMEOUT_SECS)?,
            index_poll_interval: secs_or(&get, "INDEX_POLL_INTERVAL", DEFAULT_INDEX_POLL_INTERVAL_SECS)?,
            log_level: get("LOG_LEVEL"),
            janusgraph_host,
            janusgraph_port,
            gremlin_path,
            health_check_url,
        })
    }

    /// Gremlin Server HTTP endpoint
    ///
    /// Requires a channelizer that accepts HTTP (`HttpChannelizer` or
    /// `WsAndHttpChannelizer`); a WebSocket-only server rejects these posts.
    pub fn gremlin_endpoint(&self) -> String {
        format!(
            "http://{}:{}{}",
            self.janusgraph_host, self.janusgraph_port, self.gremlin_path
        )
    }

    pub fn health_policy(&self) -> HealthCheckPolicy {
        HealthCheckPolicy {
            url: self.health_check_url.clone(),
            retries: self.health_check_retries,
            interval: self.health_check_interval,
        }
    }

    pub fn readiness_poller(&self) -> ReadinessPoller {
        ReadinessPoller::with_timeout(self.index_wait_timeout, self.index_poll_interval)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            janusgraph_host: DEFAULT_HOST.to_string(),
            janusgraph_port: DEFAULT_PORT,
            gremlin_path: String::new(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            health_check_url: format!("http://{}:{}", DEFAULT_HOST, DEFAULT_PORT),
            health_check_retries: DEFAULT_HEALTH_RETRIES,
            health_check_interval: Duration::from_secs(DEFAULT_HEALTH_INTERVAL_SECS),
            index_wait_timeout: Duration::from_secs(DEFAULT_INDEX_WAIT_TIMEOUT_SECS),
            index_poll_interval: Duration::from_secs(DEFAULT_INDEX_POLL_INTERVAL_SECS),
            log_level: None,
        }
    }
}

fn read_env_file(path: &Path) -> ConfigResult<HashMap<String, String>> {
    if !path.is_file() {
        return Ok(HashMap::new());
    }

    let env_file_error = |err: dotenvy::Error| ConfigError::EnvFile {
        path: path.to_path_buf(),
        reason: err.to_string(),
    };
    dotenvy::from_path_iter(path)
        .map_err(env_file_error)?
        .map(|item| item.map_err(env_file_error))
        .collect()
}

/// `gremlin` and `/gremlin/` both become `/gremlin`; `/` becomes empty
fn normalize_path(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{}", trimmed)
    }
}

fn parse_or<T, G>(get: &G, key: &str, default: T) -> ConfigResult<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    G: Fn(&str) -> Option<String>,
{
    match get(key) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|err: T::Err| ConfigError::InvalidValue {
            key: key.to_string(),
            value: raw.clone(),
            reason: err.to_string(),
        }),
    }
}

fn secs_or<G>(get: &G, key: &str, default: u64) -> ConfigResult<Duration>
where
    G: Fn(&str) -> Option<String>,
{
    parse_or(get, key, default).map(Duration::from_secs)
}
