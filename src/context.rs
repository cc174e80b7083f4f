/// Application context and dependency injection
use crate::{config::ServerConfig, error::LinkResult, locality::LocalityResolver};
use std::sync::Arc;
use std::time::Instant;

/// Application context holding all shared services
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<ServerConfig>,
    pub resolver: Arc<LocalityResolver>,
    pub started_at: Instant,
}

impl AppContext {
    /// Create a new application context from configuration
    pub fn new(config: ServerConfig) -> LinkResult<Self> {
        // Validate configuration
        config.validate()?;

        let resolver = LocalityResolver::new(config.backend.base_url.clone());
        tracing::info!(
            "Resolving references against backend {} (host {})",
            resolver.backend_base(),
            resolver.backend_host()
        );

        Ok(Self {
            config: Arc::new(config),
            resolver: Arc::new(resolver),
            started_at: Instant::now(),
        })
    }

    /// Seconds since the context was created
    pub fn uptime_seconds(&self) -> f64 {
        self.started_at.elapsed().as_secs_f64()
    }
}
