//! Audit Logger - Append-only JSONL logging for every answered request
//!
//! Entries go to `audit.jsonl` and to `users/<safe_name>.jsonl`. Writes are
//! serialized through a mutex and run in a spawned task; a failed write is
//! logged and dropped.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs::{create_dir_all, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::{info, warn};
use wayfinder_shared::AuditEntry;

const AUDIT_FILE: &str = "audit.jsonl";
const USERS_DIR: &str = "users";

/// Audit logger for recording all answered requests
pub struct AuditLogger {
    dir: PathBuf,
    write_lock: Mutex<()>,
}

impl AuditLogger {
    /// Create a new audit logger rooted at `dir`
    pub async fn new(dir: &Path) -> Result<Self> {
        create_dir_all(dir.join(USERS_DIR))
            .await
            .context("Failed to create audit log directory")?;

        info!("Audit logger initialized: {}", dir.join(AUDIT_FILE).display());

        Ok(Self {
            dir: dir.to_path_buf(),
            write_lock: Mutex::new(()),
        })
    }

    /// Log an audit entry to the global and the per-caller file
    pub async fn log(&self, entry: &AuditEntry) -> Result<()> {
        let json = serde_json::to_string(entry)? + "\n";
        let _guard = self.write_lock.lock().await;

        append(&self.path(), &json).await?;
        append(&self.user_path(&entry.safe_name()), &json).await?;

        Ok(())
    }

    /// Read all audit entries (for debugging/reports)
    pub async fn read_all(&self) -> Result<Vec<AuditEntry>> {
        read_entries(&self.path()).await
    }

    /// Read the entries of one caller
    pub async fn read_user(&self, safe_name: &str) -> Result<Vec<AuditEntry>> {
        read_entries(&self.user_path(safe_name)).await
    }

    /// Get the path to the audit log
    pub fn path(&self) -> PathBuf {
        self.dir.join(AUDIT_FILE)
    }

    fn user_path(&self, safe_name: &str) -> PathBuf {
        self.dir.join(USERS_DIR).join(format!("{}.jsonl", safe_name))
    }
}

/// Fire-and-forget handle used by request handlers.
#[derive(Clone, Default)]
pub struct AuditSink {
    logger: Option<Arc<AuditLogger>>,
}

impl AuditSink {
    pub fn new(logger: AuditLogger) -> Self {
        Self {
            logger: Some(Arc::new(logger)),
        }
    }

    /// Sink that records nothing
    pub fn disabled() -> Self {
        Self::default()
    }

    /// Queue an entry. Never blocks the caller and never fails.
    pub fn record(&self, entry: AuditEntry) {
        let Some(logger) = self.logger.clone() else {
            return;
        };
        tokio::spawn(async move {
            if let Err(e) = logger.log(&entry).await {
                warn!("Audit write failed for {}: {:#}", entry.id_code, e);
            }
        });
    }

    pub fn logger(&self) -> Option<&AuditLogger> {
        self.logger.as_deref()
    }
}

async fn append(path: &Path, line: &str) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .await
        .with_context(|| format!("Failed to open {}", path.display()))?;

    file.write_all(line.as_bytes())
        .await
        .context("Failed to write audit entry")?;

    file.sync_all().await.context("Failed to sync audit log")?;

    Ok(())
}

async fn read_entries(path: &Path) -> Result<Vec<AuditEntry>> {
    if !path.exists() {
        return Ok(vec![]);
    }

    let content = tokio::fs::read_to_string(path)
        .await
        .context("Failed to read audit log")?;

    let entries: Vec<AuditEntry> = content
        .lines()
        .filter(|line| !line.is_empty())
        .filter_map(|line| serde_json::from_str(line).ok())
        .collect();

    Ok(entries)
}
