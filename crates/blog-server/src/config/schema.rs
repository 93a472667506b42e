use std::net::SocketAddr;
use std::time::Duration;

use serde::Deserialize;

use blog_core::error::{BlogError, Result};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    pub version: u32,

    #[serde(default)]
    pub app: AppSection,

    #[serde(default)]
    pub monitoring: MonitoringSection,

    #[serde(default)]
    pub storage: StorageSection,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            version: 1,
            app: AppSection::default(),
            monitoring: MonitoringSection::default(),
            storage: StorageSection::default(),
        }
    }
}

impl ServerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(BlogError::UnsupportedVersion);
        }

        let app = self.app.listen_addr()?;
        let mon = self.monitoring.listen_addr()?;
        if app == mon {
            return Err(BlogError::BadRequest(
                "app.listen and monitoring.listen must differ".into(),
            ));
        }

        self.app.validate()?;
        self.storage.validate()?;

        Ok(())
    }

    /// Apply environment overrides through `lookup` (usually `std::env::var`).
    ///
    /// `APP_LISTEN`, `MONITORING_LISTEN`, `STORAGE_SNAPSHOT_PATH`. An empty
    /// `STORAGE_SNAPSHOT_PATH` disables persistence.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(v) = lookup("APP_LISTEN") {
            self.app.listen = v;
        }
        if let Some(v) = lookup("MONITORING_LISTEN") {
            self.monitoring.listen = v;
        }
        if let Some(v) = lookup("STORAGE_SNAPSHOT_PATH") {
            self.storage.snapshot_path = Some(v).filter(|p| !p.is_empty());
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppSection {
    #[serde(default = "default_app_listen")]
    pub listen: String,

    #[serde(default = "default_read_timeout_ms")]
    pub read_timeout_ms: u64,
}

impl Default for AppSection {
    fn default() -> Self {
        Self {
            listen: default_app_listen(),
            read_timeout_ms: default_read_timeout_ms(),
        }
    }
}

impl AppSection {
    pub fn validate(&self) -> Result<()> {
        if !(100..=60000).contains(&self.read_timeout_ms) {
            return Err(BlogError::BadRequest(
                "app.read_timeout_ms must be between 100 and 60000".into(),
            ));
        }
        Ok(())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        parse_addr("app.listen", &self.listen)
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MonitoringSection {
    #[serde(default = "default_monitoring_listen")]
    pub listen: String,
}

impl Default for MonitoringSection {
    fn default() -> Self {
        Self {
            listen: default_monitoring_listen(),
        }
    }
}

impl MonitoringSection {
    pub fn listen_addr(&self) -> Result<SocketAddr> {
        parse_addr("monitoring.listen", &self.listen)
    }
}

/// Optional snapshot persistence. Disabled when `snapshot_path` is unset.
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct StorageSection {
    #[serde(default)]
    pub snapshot_path: Option<String>,
}

impl StorageSection {
    pub fn validate(&self) -> Result<()> {
        if matches!(self.snapshot_path.as_deref(), Some(p) if p.trim().is_empty()) {
            return Err(BlogError::BadRequest(
                "storage.snapshot_path must not be blank".into(),
            ));
        }
        Ok(())
    }
}

fn parse_addr(field: &str, v: &str) -> Result<SocketAddr> {
    v.parse()
        .map_err(|_| BlogError::BadRequest(format!("{field} must be a valid SocketAddr: {v}")))
}

fn default_app_listen() -> String {
    "0.0.0.0:8080".into()
}
fn default_read_timeout_ms() -> u64 {
    5000
}
fn default_monitoring_listen() -> String {
    "0.0.0.0:9090".into()
}
