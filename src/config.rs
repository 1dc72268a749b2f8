//! Driver Service Configuration
//!
//! Read from environment variables at startup. Every value has a default;
//! malformed values abort startup with a descriptive error.

use crate::drivers::ServiceSettings;
use crate::search::DEFAULT_RADIUS_KM;

use anyhow::{Context, bail};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8081";
const DEFAULT_STORE_TIMEOUT_MS: u64 = 5000;

#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub bind_addr: SocketAddr,
    pub log_level: tracing::Level,
    pub radius_km: f64,
    /// `None` when `STORE_TIMEOUT_MS=0`.
    pub store_timeout: Option<Duration>,
    pub seed_file: Option<PathBuf>,
}

impl ServiceConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let mut bind_addr: SocketAddr = get("BIND_ADDR")
            .as_deref()
            .unwrap_or(DEFAULT_BIND_ADDR)
            .parse()
            .context("invalid BIND_ADDR")?;
        if let Some(port) = get("PORT") {
            bind_addr.set_port(port.trim().parse().context("invalid PORT")?);
        }

        let log_level = match get("LOG_LEVEL") {
            Some(level) => parse_log_level(&level)?,
            None => tracing::Level::INFO,
        };

        let radius_km = match get("SEARCH_RADIUS_KM") {
            Some(raw) => raw
                .trim()
                .parse::<f64>()
                .context("invalid SEARCH_RADIUS_KM")?,
            None => DEFAULT_RADIUS_KM,
        };
        if !radius_km.is_finite() || radius_km < 0.0 {
            bail!("SEARCH_RADIUS_KM must be a non-negative number, got {}", radius_km);
        }

        let timeout_ms = match get("STORE_TIMEOUT_MS") {
            Some(raw) => raw.trim().parse::<u64>().context("invalid STORE_TIMEOUT_MS")?,
            None => DEFAULT_STORE_TIMEOUT_MS,
        };
        let store_timeout = (timeout_ms > 0).then(|| Duration::from_millis(timeout_ms));

        Ok(Self {
            bind_addr,
            log_level,
            radius_km,
            store_timeout,
            seed_file: get("DRIVER_SEED_FILE").map(PathBuf::from),
        })
    }

    pub fn service_settings(&self) -> ServiceSettings {
        ServiceSettings {
            radius_km: self.radius_km,
            store_timeout: self.store_timeout,
        }
    }
}

/// Accepts the usual level names in any case; `warning` is an alias for `warn`.
pub fn parse_log_level(raw: &str) -> anyhow::Result<tracing::Level> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok(tracing::Level::TRACE),
        "debug" => Ok(tracing::Level::DEBUG),
        "info" => Ok(tracing::Level::INFO),
        "warn" | "warning" => Ok(tracing::Level::WARN),
        "error" => Ok(tracing::Level::ERROR),
        other => bail!("invalid LOG_LEVEL: {}", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> anyhow::Result<ServiceConfig> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServiceConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();

        assert_eq!(config.bind_addr, "0.0.0.0:8081".parse().unwrap());
        assert_eq!(config.log_level, tracing::Level::INFO);
        assert_eq!(config.radius_km, 6.0);
        assert_eq!(config.store_timeout, Some(Duration::from_millis(5000)));
        assert!(config.seed_file.is_none());
    }

    #[test]
    fn test_port_overrides_bind_port() {
        let config = config_from(&[("BIND_ADDR", "127.0.0.1:9000"), ("PORT", "9100")]).unwrap();
        assert_eq!(config.bind_addr, "127.0.0.1:9100".parse().unwrap());
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("LOG_LEVEL", "DEBUG"),
            ("SEARCH_RADIUS_KM", "2.5"),
            ("STORE_TIMEOUT_MS", "0"),
            ("DRIVER_SEED_FILE", "/data/drivers.json"),
        ])
        .unwrap();

        assert_eq!(config.log_level, tracing::Level::DEBUG);
        assert_eq!(config.radius_km, 2.5);
        assert!(config.store_timeout.is_none());
        assert_eq!(config.seed_file, Some(PathBuf::from("/data/drivers.json")));

        let settings = config.service_settings();
        assert_eq!(settings.radius_km, 2.5);
        assert!(settings.store_timeout.is_none());
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(config_from(&[("PORT", "eighty")]).is_err());
        assert!(config_from(&[("LOG_LEVEL", "loud")]).is_err());
        assert!(config_from(&[("SEARCH_RADIUS_KM", "-1")]).is_err());
        assert!(config_from(&[("SEARCH_RADIUS_KM", "NaN")]).is_err());
        assert!(config_from(&[("STORE_TIMEOUT_MS", "-5")]).is_err());
    }

    #[test]
    fn test_blank_values_use_defaults() {
        let config = config_from(&[("PORT", ""), ("LOG_LEVEL", "  ")]).unwrap();
        assert_eq!(config.bind_addr.port(), 8081);
        assert_eq!(config.log_level, tracing::Level::INFO);
    }
}
