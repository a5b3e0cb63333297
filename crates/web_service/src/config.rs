//! Configuration management for web service
//!
//! Supports loading configuration from environment variables with fallback to defaults.

use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_WORKER_COUNT: usize = 4;
pub const DEFAULT_COOKIE_NAME: &str = "todo_session";
pub const DEFAULT_SESSION_IDLE_TIMEOUT_SECS: u64 = 1800;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: usize,
    /// Name of the cookie carrying the session id
    pub cookie_name: String,
    /// Sessions untouched for longer than this are discarded
    pub session_idle_timeout: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            workers: DEFAULT_WORKER_COUNT,
            cookie_name: DEFAULT_COOKIE_NAME.to_string(),
            session_idle_timeout: Duration::from_secs(DEFAULT_SESSION_IDLE_TIMEOUT_SECS),
        }
    }
}

impl ServerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn idle_timeout(&self) -> chrono::Duration {
        chrono::Duration::from_std(self.session_idle_timeout).unwrap_or(chrono::Duration::MAX)
    }
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    parse_or(std::env::var(key).ok(), default)
}

fn parse_or<T: FromStr>(raw: Option<String>, default: T) -> T {
    raw.and_then(|v| v.parse().ok()).unwrap_or(default)
}

/// Worker count from a raw value; actix refuses to start with zero workers
fn workers_or(raw: Option<String>, default: usize) -> usize {
    raw.and_then(|v| v.parse().ok())
        .filter(|workers: &usize| *workers > 0)
        .unwrap_or(default)
}

/// Load ServerConfig from environment variables
///
/// Environment variables:
/// - `APP_HOST`: Address to bind (default: 127.0.0.1)
/// - `APP_PORT`: Port to listen on (default: 8080)
/// - `APP_WORKERS`: HTTP worker threads (default: 4)
/// - `SESSION_COOKIE_NAME`: Session cookie name (default: todo_session)
/// - `SESSION_IDLE_TIMEOUT_SECS`: Idle session lifetime in seconds (default: 1800)
pub fn load_server_config() -> ServerConfig {
    let defaults = ServerConfig::default();
    ServerConfig {
        host: env_or("APP_HOST", defaults.host),
        port: env_or("APP_PORT", defaults.port),
        workers: workers_or(std::env::var("APP_WORKERS").ok(), defaults.workers),
        cookie_name: env_or("SESSION_COOKIE_NAME", defaults.cookie_name),
        session_idle_timeout: Duration::from_secs(env_or(
            "SESSION_IDLE_TIMEOUT_SECS",
            DEFAULT_SESSION_IDLE_TIMEOUT_SECS,
        )),
    }
}
