//! Hierarchy table: five ordered levels, a target and an output per row.
//!
//! Columns are addressed through [`LEVELS`], a fixed array of accessors
//! indexed by depth, so no field is ever looked up by a computed name once
//! the sheet has been loaded.

use std::collections::BTreeSet;

use crate::error::TableError;
use crate::path::{Path, MAX_DEPTH};
use crate::sheets::SheetRecords;

/// Number of hierarchy levels before the target.
pub const LEVEL_COUNT: usize = 5;

/// Sheet name of the hierarchy.
pub const HIERARCHY_SHEET: &str = "hierarchy";

const LEVEL_COLUMNS: [&str; LEVEL_COUNT] = ["level1", "level2", "level3", "level4", "level5"];
const TARGET_COLUMN: &str = "target";
const OUTPUT_COLUMN: &str = "output";

/// One fully specified hierarchy path and its output text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub levels: [String; LEVEL_COUNT],
    pub target: String,
    pub output: String,
}

impl Row {
    pub fn new(levels: [&str; LEVEL_COUNT], target: &str, output: &str) -> Self {
        Self {
            levels: levels.map(|l| l.to_string()),
            target: target.to_string(),
            output: output.to_string(),
        }
    }

    fn level1(&self) -> &str {
        &self.levels[0]
    }

    fn level2(&self) -> &str {
        &self.levels[1]
    }

    fn level3(&self) -> &str {
        &self.levels[2]
    }

    fn level4(&self) -> &str {
        &self.levels[3]
    }

    fn level5(&self) -> &str {
        &self.levels[4]
    }

    fn target(&self) -> &str {
        &self.target
    }
}

/// Column accessor.
pub type Column = fn(&Row) -> &str;

/// Level accessors indexed by depth (0 = level1).
pub const LEVELS: [Column; LEVEL_COUNT] =
    [Row::level1, Row::level2, Row::level3, Row::level4, Row::level5];

/// Accessor for the selection made at `depth` (0-based): levels, then target.
fn column_at(depth: usize) -> Option<Column> {
    match depth {
        d if d < LEVEL_COUNT => Some(LEVELS[d]),
        LEVEL_COUNT => Some(Row::target as Column),
        _ => None,
    }
}

/// Immutable snapshot of the hierarchy sheet.
#[derive(Debug, Clone, Default)]
pub struct HierarchyTable {
    rows: Vec<Row>,
}

impl HierarchyTable {
    pub fn new(rows: Vec<Row>) -> Self {
        Self { rows }
    }

    /// Build from sheet records; every level, target and output column must exist.
    pub fn from_sheet(sheet: &SheetRecords) -> Result<Self, TableError> {
        let mut level_idx = [0usize; LEVEL_COUNT];
        for (slot, name) in level_idx.iter_mut().zip(LEVEL_COLUMNS) {
            *slot = sheet.column(name)?;
        }
        let target_idx = sheet.column(TARGET_COLUMN)?;
        let output_idx = sheet.column(OUTPUT_COLUMN)?;

        let rows = sheet
            .rows
            .iter()
            .map(|record| Row {
                levels: level_idx.map(|i| SheetRecords::cell(record, i).to_string()),
                target: SheetRecords::cell(record, target_idx).to_string(),
                output: SheetRecords::cell(record, output_idx).to_string(),
            })
            .collect();

        Ok(Self { rows })
    }

    pub fn from_csv_str(text: &str) -> Result<Self, TableError> {
        Self::from_sheet(&SheetRecords::from_csv_str(HIERARCHY_SHEET, text)?)
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Output of the first row, shown when the menu is first opened.
    pub fn intro(&self) -> Option<&str> {
        self.rows.first().map(|r| r.output.as_str())
    }

    /// Rows consistent with every token of `path`, positionally.
    pub fn candidates<'a>(&'a self, path: &'a Path) -> impl Iterator<Item = &'a Row> + 'a {
        self.rows.iter().filter(move |&row| {
            path.tokens().iter().enumerate().all(|(depth, token)| {
                column_at(depth).map_or(false, |col| col(row) == token.as_str())
            })
        })
    }

    /// Sorted, distinct, non-blank values of the next column under `path`.
    pub fn next_options(&self, path: &Path) -> Vec<String> {
        let Some(col) = column_at(path.len()) else {
            return Vec::new();
        };

        self.candidates(path)
            .map(col)
            .filter(|value| !value.trim().is_empty())
            .map(str::to_string)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Exact match on all five levels and the target; first hit wins.
    pub fn resolve(&self, key: &[String; MAX_DEPTH]) -> Option<&Row> {
        self.rows.iter().find(|&row| {
            key.iter().enumerate().all(|(depth, token)| {
                column_at(depth).map_or(false, |col| col(row) == token.as_str())
            })
        })
    }
}
