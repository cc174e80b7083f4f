/// Configuration management for Locus Links
use crate::{
    error::{LinkError, LinkResult},
    links::{is_absolute_url, try_extract_host},
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::path::Path;
use tracing_subscriber::EnvFilter;

/// Default backend when neither `LOCUS_BACKEND_URL` nor `SITE_URL` is set
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";

/// Main server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub service: ServiceConfig,
    pub backend: BackendConfig,
    pub logging: LoggingConfig,
    pub metrics: MetricsConfig,
}

/// Service-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub hostname: String,
    pub port: u16,
    pub version: String,
}

/// The backend node whose references count as local
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Base address, e.g. `http://node-a.example:8000`
    pub base_url: String,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directives, e.g. `info` or `locus_links=debug,tower_http=info`
    pub level: String,
}

impl LoggingConfig {
    /// Filter for the subscriber: `RUST_LOG` when set, the configured
    /// level otherwise
    pub fn env_filter(&self) -> LinkResult<EnvFilter> {
        match EnvFilter::try_from_default_env() {
            Ok(filter) => Ok(filter),
            Err(_) => self.configured_filter(),
        }
    }

    fn configured_filter(&self) -> LinkResult<EnvFilter> {
        EnvFilter::try_new(&self.level).map_err(|e| {
            LinkError::Validation(format!("Invalid log level '{}': {}", self.level, e))
        })
    }
}

/// Metrics configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsConfig {
    /// Serve `/metrics`
    pub enabled: bool,
}

impl ServerConfig {
    /// Load configuration from environment variables (and `.env` if present)
    pub fn from_env() -> LinkResult<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from a dotenv file without touching the process
    /// environment
    pub fn from_dotenv_file(path: impl AsRef<Path>) -> LinkResult<Self> {
        let path = path.as_ref();
        let iter = dotenv::from_path_iter(path).map_err(|e| {
            LinkError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let mut vars = HashMap::new();
        for item in iter {
            let (key, value) = item.map_err(|e| {
                LinkError::Config(format!("Invalid line in {}: {}", path.display(), e))
            })?;
            vars.insert(key, value);
        }

        Self::from_lookup(|key| vars.get(key).cloned())
    }

    /// Build configuration from any key lookup
    pub fn from_lookup<F>(lookup: F) -> LinkResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let hostname = lookup("LOCUS_HOSTNAME").unwrap_or_else(|| "127.0.0.1".to_string());
        let port = lookup("LOCUS_PORT")
            .unwrap_or_else(|| "3001".to_string())
            .parse()
            .map_err(|_| LinkError::Validation("Invalid port number".to_string()))?;
        let version =
            lookup("LOCUS_VERSION").unwrap_or_else(|| env!("CARGO_PKG_VERSION").to_string());

        let base_url = lookup("LOCUS_BACKEND_URL")
            .or_else(|| lookup("SITE_URL"))
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string());

        let log_level = lookup("LOCUS_LOG_LEVEL").unwrap_or_else(|| "info".to_string());

        let metrics_enabled = match lookup("LOCUS_METRICS_ENABLED") {
            Some(value) => parse_flag("LOCUS_METRICS_ENABLED", &value)?,
            None => true,
        };

        Ok(ServerConfig {
            service: ServiceConfig {
                hostname,
                port,
                version,
            },
            backend: BackendConfig { base_url },
            logging: LoggingConfig { level: log_level },
            metrics: MetricsConfig {
                enabled: metrics_enabled,
            },
        })
    }

    /// Validate configuration
    pub fn validate(&self) -> LinkResult<()> {
        if self.service.hostname.is_empty() {
            return Err(LinkError::Validation("Hostname cannot be empty".to_string()));
        }

        let base_url = &self.backend.base_url;
        if !is_absolute_url(base_url) {
            return Err(LinkError::Validation(format!(
                "Backend URL must start with http:// or https://: {}",
                base_url
            )));
        }

        try_extract_host(base_url)
            .map_err(|e| LinkError::Validation(format!("Invalid backend URL: {}", e)))?;

        self.logging.configured_filter()?;

        Ok(())
    }

    /// Address to bind the HTTP listener to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.service.hostname, self.service.port)
    }
}

/// Accepts true/false, 1/0, yes/no and on/off, case-insensitive
fn parse_flag(key: &str, value: &str) -> LinkResult<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(LinkError::Validation(format!(
            "Invalid value for {}: {}",
            key, value
        ))),
    }
}
