//! Audit entry written for every answered webhook request.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::messages::UNKNOWN_CALLER;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub timestamp: DateTime<Utc>,
    pub id_code: String,
    pub name: String,
    pub input: String,
    pub response: String,
}

impl AuditEntry {
    pub fn new(id_code: &str, name: Option<&str>, input: String, response: String) -> Self {
        Self {
            timestamp: Utc::now(),
            id_code: id_code.to_string(),
            name: name.unwrap_or(UNKNOWN_CALLER).to_string(),
            input,
            response,
        }
    }

    /// Caller name reduced to a file-safe stem: alphanumerics, `_` and `-`.
    pub fn safe_name(&self) -> String {
        let cleaned: String = self
            .name
            .chars()
            .filter(|c| c.is_alphanumeric() || *c == '_' || *c == '-')
            .collect();
        if cleaned.is_empty() {
            UNKNOWN_CALLER.to_string()
        } else {
            cleaned
        }
    }
}
