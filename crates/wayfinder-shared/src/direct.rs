//! One-shot lookup from a fully spelled-out utterance.
//!
//! `"l1 l2 l3 l4 l5 target"` resolves straight against the hierarchy without
//! touching any navigation state. Tokens past the sixth are ignored.

use crate::messages;
use crate::path::MAX_DEPTH;
use crate::table::HierarchyTable;

/// Outcome of a direct lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectLookup {
    Found(String),
    NoMatch,
    Usage,
}

impl DirectLookup {
    pub fn message(&self) -> &str {
        match self {
            DirectLookup::Found(output) => output,
            DirectLookup::NoMatch => messages::NO_MATCHING_LOCATION,
            DirectLookup::Usage => messages::DIRECT_LOOKUP_USAGE,
        }
    }

    pub fn into_message(self) -> String {
        match self {
            DirectLookup::Found(output) => output,
            other => other.message().to_string(),
        }
    }
}

pub struct DirectLookupEngine<'a> {
    table: &'a HierarchyTable,
}

impl<'a> DirectLookupEngine<'a> {
    pub fn new(table: &'a HierarchyTable) -> Self {
        Self { table }
    }

    /// Parse the utterance into a six-token key, or `None` when it is too short.
    pub fn parse_key(utterance: &str) -> Option<[String; MAX_DEPTH]> {
        let mut key: [String; MAX_DEPTH] = Default::default();
        let mut parts = utterance.split_whitespace();
        for slot in key.iter_mut() {
            *slot = parts.next()?.to_string();
        }
        Some(key)
    }

    pub fn classify(&self, utterance: &str) -> DirectLookup {
        match Self::parse_key(utterance) {
            None => DirectLookup::Usage,
            Some(key) => match self.table.resolve(&key) {
                Some(row) => DirectLookup::Found(row.output.clone()),
                None => DirectLookup::NoMatch,
            },
        }
    }

    pub fn lookup(&self, utterance: &str) -> String {
        self.classify(utterance).into_message()
    }
}
