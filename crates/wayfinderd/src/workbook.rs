//! Workbook loading - one CSV file per sheet, served as immutable snapshots.
//!
//! Every handler works on an `Arc<Workbook>` taken at the start of the
//! request. With a zero TTL each request reloads from disk; otherwise the
//! snapshot is reused until it is older than the TTL.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use wayfinder_shared::table::HIERARCHY_SHEET;
use wayfinder_shared::{
    CredentialTable, HierarchyTable, RandomAnswerTable, SettlementTable, SheetRecords, TableError,
};

pub const CREDENTIALS_SHEET: &str = "credentials";
pub const SETTLEMENT_SHEET: &str = "settlement";
pub const RANDOM_SHEET: &str = "random";

/// All sheets of one load. Each sheet succeeds or fails on its own.
#[derive(Debug)]
pub struct Workbook {
    pub hierarchy: Result<HierarchyTable, TableError>,
    pub credentials: Result<CredentialTable, TableError>,
    pub settlement: Result<SettlementTable, TableError>,
    pub random: Result<RandomAnswerTable, TableError>,
}

impl Workbook {
    /// Load every sheet from `dir`. The hierarchy is required; the other
    /// sheets read as empty when their file is absent.
    pub fn load(dir: &Path) -> Self {
        let hierarchy = read_sheet(dir, HIERARCHY_SHEET)
            .and_then(|s| s.ok_or_else(|| TableError::SheetMissing(HIERARCHY_SHEET.to_string())))
            .and_then(|s| HierarchyTable::from_sheet(&s));

        let workbook = Self {
            hierarchy,
            credentials: load_optional(dir, CREDENTIALS_SHEET, CredentialTable::from_sheet),
            settlement: load_optional(dir, SETTLEMENT_SHEET, SettlementTable::from_sheet),
            random: load_optional(dir, RANDOM_SHEET, RandomAnswerTable::from_sheet),
        };

        match &workbook.hierarchy {
            Ok(table) => debug!("Loaded hierarchy: {} rows", table.len()),
            Err(e) => warn!("Hierarchy sheet unavailable: {}", e),
        }

        workbook
    }

    /// Credential name for `id_code`, when the sheet loaded and the code exists.
    pub fn caller_name(&self, id_code: &str) -> Option<&str> {
        self.credentials
            .as_ref()
            .ok()
            .and_then(|c| c.find(id_code))
            .map(|c| c.name.as_str())
    }
}

fn sheet_path(dir: &Path, sheet: &str) -> PathBuf {
    dir.join(format!("{}.csv", sheet))
}

fn read_sheet(dir: &Path, sheet: &str) -> Result<Option<SheetRecords>, TableError> {
    let path = sheet_path(dir, sheet);
    if !path.exists() {
        return Ok(None);
    }
    let file = File::open(&path)?;
    SheetRecords::from_reader(sheet, file).map(Some)
}

fn load_optional<T: Default>(
    dir: &Path,
    sheet: &str,
    build: fn(&SheetRecords) -> Result<T, TableError>,
) -> Result<T, TableError> {
    match read_sheet(dir, sheet)? {
        Some(records) => build(&records),
        None => Ok(T::default()),
    }
}

/// TTL-cached workbook snapshots.
pub struct WorkbookCache {
    dir: PathBuf,
    ttl: Duration,
    slot: RwLock<Option<(Instant, Arc<Workbook>)>>,
}

impl WorkbookCache {
    pub fn new(dir: PathBuf, ttl: Duration) -> Self {
        info!("Workbook source: {} (ttl {}s)", dir.display(), ttl.as_secs());
        Self {
            dir,
            ttl,
            slot: RwLock::new(None),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Current snapshot, reloading when stale.
    pub async fn snapshot(&self) -> Result<Arc<Workbook>> {
        if !self.ttl.is_zero() {
            let slot = self.slot.read().await;
            if let Some((loaded_at, workbook)) = slot.as_ref() {
                if loaded_at.elapsed() < self.ttl {
                    return Ok(Arc::clone(workbook));
                }
            }
        }

        let dir = self.dir.clone();
        let workbook = Arc::new(tokio::task::spawn_blocking(move || Workbook::load(&dir)).await?);

        if !self.ttl.is_zero() {
            let mut slot = self.slot.write().await;
            *slot = Some((Instant::now(), Arc::clone(&workbook)));
        }

        Ok(workbook)
    }

    /// Drop the cached snapshot so the next request reloads.
    pub async fn invalidate(&self) {
        self.slot.write().await.take();
    }
}
