//! Server config loader (strict parsing).
//!
//! Sources, later wins: built-in defaults, the YAML file (if present), then
//! environment overrides. The merged result is validated once.

pub mod schema;

use std::fs;
use std::path::Path;

use blog_core::error::{BlogError, Result};

pub use schema::{AppSection, MonitoringSection, ServerConfig, StorageSection};

/// Env var naming the config file.
pub const CONFIG_PATH_ENV: &str = "BLOG_CONFIG";
/// Config file used when `BLOG_CONFIG` is unset.
pub const DEFAULT_CONFIG_PATH: &str = "blog.yaml";

/// Load the process config: file from `BLOG_CONFIG` (or `blog.yaml`),
/// defaults when that file does not exist, then env overrides.
pub fn load() -> Result<ServerConfig> {
    let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.into());
    let mut cfg = if Path::new(&path).exists() {
        parse_file(&path)?
    } else {
        tracing::info!(%path, "config file not found, using defaults");
        ServerConfig::default()
    };
    cfg.apply_overrides(|k| std::env::var(k).ok());
    cfg.validate()?;
    Ok(cfg)
}

pub fn load_from_str(s: &str) -> Result<ServerConfig> {
    let cfg = parse_str(s)?;
    cfg.validate()?;
    Ok(cfg)
}

fn parse_file(path: &str) -> Result<ServerConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| BlogError::Internal(format!("read config failed: {e}")))?;
    parse_str(&s)
}

fn parse_str(s: &str) -> Result<ServerConfig> {
    serde_yaml::from_str(s).map_err(|e| BlogError::BadRequest(format!("invalid yaml: {e}")))
}
