//! Error types for Wayfinder.

use thiserror::Error;

/// Failure to build a table snapshot from a sheet source.
#[derive(Error, Debug)]
pub enum TableError {
    #[error("Sheet '{0}' not found")]
    SheetMissing(String),

    #[error("Sheet '{sheet}' is missing column '{column}'")]
    MissingColumn { sheet: String, column: String },

    #[error("CSV error in sheet '{sheet}': {source}")]
    Csv {
        sheet: String,
        #[source]
        source: csv::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl TableError {
    pub fn csv(sheet: &str, source: csv::Error) -> Self {
        TableError::Csv {
            sheet: sheet.to_string(),
            source,
        }
    }

    pub fn missing_column(sheet: &str, column: &str) -> Self {
        TableError::MissingColumn {
            sheet: sheet.to_string(),
            column: column.to_string(),
        }
    }
}
