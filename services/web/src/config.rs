//! Service configuration

use std::time::Duration;

use anyhow::Result;
use config::{Config, Environment};
use serde::Deserialize;

/// Prefix of every environment variable read by [`AppConfig::load`]
pub const ENV_PREFIX: &str = "TASKDESK";

/// Runtime configuration of the web service
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AppConfig {
    /// Interface to bind
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Lifetime of a login session in seconds
    pub session_ttl_seconds: u64,
    /// Deployment label reported by the status endpoint
    pub environment: String,
    /// Create the demo account at start-up
    pub seed_demo_user: bool,
}

impl AppConfig {
    /// Load configuration from defaults overlaid with environment variables
    ///
    /// # Environment Variables
    /// - `TASKDESK_HOST`: Interface to bind (default: 0.0.0.0)
    /// - `TASKDESK_PORT`: Port to listen on (default: 3000)
    /// - `TASKDESK_SESSION_TTL_SECONDS`: Session lifetime (default: 86400)
    /// - `TASKDESK_ENVIRONMENT`: Deployment label (default: development)
    /// - `TASKDESK_SEED_DEMO_USER`: Seed `admin@teste.com` (default: true)
    pub fn load() -> Result<Self> {
        let defaults = Self::default();

        let settings = Config::builder()
            .set_default("host", defaults.host)?
            .set_default("port", i64::from(defaults.port))?
            .set_default("session_ttl_seconds", defaults.session_ttl_seconds)?
            .set_default("environment", defaults.environment)?
            .set_default("seed_demo_user", defaults.seed_demo_user)?
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// `host:port` for the listener
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn session_ttl(&self) -> Duration {
        Duration::from_secs(self.session_ttl_seconds)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            session_ttl_seconds: 24 * 60 * 60,
            environment: "development".to_string(),
            seed_demo_user: true,
        }
    }
}
