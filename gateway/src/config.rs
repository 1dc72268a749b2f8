//! Gateway Configuration
//!
//! Environment-driven, like the driver service. Values are validated at startup.

use crate::rate_limit::RateLimitSettings;

use anyhow::{Context, bail};
use std::net::SocketAddr;
use std::time::Duration;
use taxihub::config::parse_log_level;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_DRIVER_SERVICE_URL: &str = "http://driver-service:8081";

#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub bind_addr: SocketAddr,
    /// Base URL of the driver service, without a trailing `/`.
    pub driver_service_url: String,
    pub log_level: tracing::Level,
    pub upstream_timeout: Duration,
    pub rate_limit: RateLimitSettings,
}

impl GatewayConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let mut bind_addr: SocketAddr = get("BIND_ADDR")
            .as_deref()
            .unwrap_or(DEFAULT_BIND_ADDR)
            .parse()
            .context("invalid BIND_ADDR")?;
        if let Some(port) = get("PORT") {
            bind_addr.set_port(port.parse().context("invalid PORT")?);
        }

        let driver_service_url = normalize_base_url(
            get("DRIVER_SERVICE_URL")
                .as_deref()
                .unwrap_or(DEFAULT_DRIVER_SERVICE_URL),
        );

        let log_level = match get("LOG_LEVEL") {
            Some(level) => parse_log_level(&level)?,
            None => tracing::Level::INFO,
        };

        let timeout_secs: u64 = match get("UPSTREAM_TIMEOUT_SEC") {
            Some(raw) => raw.parse().context("invalid UPSTREAM_TIMEOUT_SEC")?,
            None => 30,
        };
        if timeout_secs == 0 {
            bail!("UPSTREAM_TIMEOUT_SEC must be greater than 0");
        }

        let enabled = match get("RATE_LIMIT_ENABLED") {
            Some(raw) => parse_bool(&raw).context("invalid RATE_LIMIT_ENABLED")?,
            None => true,
        };
        let requests: u32 = match get("RATE_LIMIT_REQUESTS") {
            Some(raw) => raw.parse().context("invalid RATE_LIMIT_REQUESTS")?,
            None => 100,
        };
        let window_secs: u64 = match get("RATE_LIMIT_WINDOW_SEC") {
            Some(raw) => raw.parse().context("invalid RATE_LIMIT_WINDOW_SEC")?,
            None => 60,
        };
        if enabled && (requests == 0 || window_secs == 0) {
            bail!("RATE_LIMIT_REQUESTS and RATE_LIMIT_WINDOW_SEC must be greater than 0");
        }

        Ok(Self {
            bind_addr,
            driver_service_url,
            log_level,
            upstream_timeout: Duration::from_secs(timeout_secs),
            rate_limit: RateLimitSettings {
                enabled,
                requests,
                window: Duration::from_secs(window_secs),
            },
        })
    }
}

fn normalize_base_url(raw: &str) -> String {
    let trimmed = raw.trim_end_matches('/');
    if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("http://{}", trimmed)
    }
}

fn parse_bool(raw: &str) -> anyhow::Result<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        other => bail!("expected a boolean, got {}", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> anyhow::Result<GatewayConfig> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        GatewayConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();

        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(config.driver_service_url, "http://driver-service:8081");
        assert_eq!(config.log_level, tracing::Level::INFO);
        assert_eq!(config.upstream_timeout, Duration::from_secs(30));
        assert!(config.rate_limit.enabled);
        assert_eq!(config.rate_limit.requests, 100);
        assert_eq!(config.rate_limit.window, Duration::from_secs(60));
    }

    #[test]
    fn test_driver_service_url_is_normalized() {
        let config = config_from(&[("DRIVER_SERVICE_URL", "localhost:8081/")]).unwrap();
        assert_eq!(config.driver_service_url, "http://localhost:8081");

        let config =
            config_from(&[("DRIVER_SERVICE_URL", "https://drivers.internal//")]).unwrap();
        assert_eq!(config.driver_service_url, "https://drivers.internal");
    }

    #[test]
    fn test_rate_limit_overrides() {
        let config = config_from(&[
            ("RATE_LIMIT_ENABLED", "false"),
            ("RATE_LIMIT_REQUESTS", "5"),
            ("RATE_LIMIT_WINDOW_SEC", "10"),
            ("PORT", "9090"),
        ])
        .unwrap();

        assert!(!config.rate_limit.enabled);
        assert_eq!(config.rate_limit.requests, 5);
        assert_eq!(config.rate_limit.window, Duration::from_secs(10));
        assert_eq!(config.bind_addr.port(), 9090);
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(config_from(&[("RATE_LIMIT_ENABLED", "maybe")]).is_err());
        assert!(config_from(&[("RATE_LIMIT_REQUESTS", "0")]).is_err());
        assert!(config_from(&[("RATE_LIMIT_WINDOW_SEC", "-1")]).is_err());
        assert!(config_from(&[("UPSTREAM_TIMEOUT_SEC", "0")]).is_err());
        assert!(config_from(&[("BIND_ADDR", "nowhere")]).is_err());
    }
}
