//! Configuration management for wayfinderd.
//!
//! Loads settings from /etc/wayfinder/config.toml or uses defaults.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use wayfinder_shared::{NavigationOptions, ReservedTokens};

/// Config file path
pub const CONFIG_PATH: &str = "/etc/wayfinder/config.toml";

/// HTTP listener settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address the webhook listens on
    #[serde(default = "default_bind")]
    pub bind: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Maximum accepted request body in bytes
    #[serde(default = "default_body_limit")]
    pub body_limit_bytes: usize,
}

fn default_bind() -> String {
    "0.0.0.0:5000".to_string()
}

fn default_request_timeout() -> u64 {
    5 // builder skills give up after 5 seconds
}

fn default_body_limit() -> usize {
    64 * 1024
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            request_timeout_secs: default_request_timeout(),
            body_limit_bytes: default_body_limit(),
        }
    }
}

/// Sheet source settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// Directory holding one CSV file per sheet
    #[serde(default = "default_data_dir")]
    pub dir: PathBuf,

    /// Seconds a loaded workbook snapshot is reused (0 = reload every request)
    #[serde(default = "default_cache_ttl")]
    pub cache_ttl_secs: u64,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("/var/lib/wayfinder/data")
}

fn default_cache_ttl() -> u64 {
    0
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            dir: default_data_dir(),
            cache_ttl_secs: default_cache_ttl(),
        }
    }
}

/// Audit log settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditConfig {
    #[serde(default = "default_audit_enabled")]
    pub enabled: bool,

    /// Directory for audit.jsonl and per-caller logs
    #[serde(default = "default_audit_dir")]
    pub dir: PathBuf,
}

fn default_audit_enabled() -> bool {
    true
}

fn default_audit_dir() -> PathBuf {
    PathBuf::from("/var/log/wayfinder")
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            enabled: default_audit_enabled(),
            dir: default_audit_dir(),
        }
    }
}

/// Tree navigation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavigationConfig {
    #[serde(default = "default_back_label")]
    pub back_label: String,

    #[serde(default = "default_restart_label")]
    pub restart_label: String,

    /// Selecting a fifth-level value resolves immediately with it as target
    #[serde(default = "default_resolve_on_fifth_level")]
    pub resolve_on_fifth_level: bool,
}

fn default_back_label() -> String {
    wayfinder_shared::navigation::DEFAULT_BACK_TOKEN.to_string()
}

fn default_restart_label() -> String {
    wayfinder_shared::navigation::DEFAULT_RESTART_TOKEN.to_string()
}

fn default_resolve_on_fifth_level() -> bool {
    true
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            back_label: default_back_label(),
            restart_label: default_restart_label(),
            resolve_on_fifth_level: default_resolve_on_fifth_level(),
        }
    }
}

impl NavigationConfig {
    pub fn to_options(&self) -> NavigationOptions {
        NavigationOptions {
            reserved: ReservedTokens {
                back: self.back_label.clone(),
                restart: self.restart_label.clone(),
            },
            resolve_on_fifth_level: self.resolve_on_fifth_level,
        }
    }
}

/// Session context settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Turns the encoded path survives in the front-end context
    #[serde(default = "default_context_lifespan")]
    pub context_lifespan: u32,
}

fn default_context_lifespan() -> u32 {
    10
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            context_lifespan: default_context_lifespan(),
        }
    }
}

/// Builder block ids offered after a successful auth
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlocksConfig {
    #[serde(default = "default_investigate_label")]
    pub investigate_label: String,

    #[serde(default = "default_investigate_block")]
    pub investigate_block_id: String,

    #[serde(default = "default_settle_label")]
    pub settle_label: String,

    #[serde(default = "default_settle_block")]
    pub settle_block_id: String,
}

fn default_investigate_label() -> String {
    "Investigate".to_string()
}

fn default_investigate_block() -> String {
    "tree-investigation-block".to_string()
}

fn default_settle_label() -> String {
    "Settle".to_string()
}

fn default_settle_block() -> String {
    "settlement-block".to_string()
}

impl Default for BlocksConfig {
    fn default() -> Self {
        Self {
            investigate_label: default_investigate_label(),
            investigate_block_id: default_investigate_block(),
            settle_label: default_settle_label(),
            settle_block_id: default_settle_block(),
        }
    }
}

/// Full daemon configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub audit: AuditConfig,

    #[serde(default)]
    pub navigation: NavigationConfig,

    #[serde(default)]
    pub session: SessionConfig,

    #[serde(default)]
    pub blocks: BlocksConfig,
}

impl Config {
    /// Load config from `path` (or the system path), or return defaults
    pub fn load(path: Option<&Path>) -> Self {
        let path = path.unwrap_or_else(|| Path::new(CONFIG_PATH));
        Self::load_from_path(path).unwrap_or_else(|e| {
            warn!("Config not loaded, using defaults: {:#}", e);
            Config::default()
        })
    }

    /// Load config from specific path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Save default config to path (for init)
    pub fn save_default(path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(&Config::default())?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, content)?;
        info!("Saved default config to {}", path.display());
        Ok(())
    }
}
