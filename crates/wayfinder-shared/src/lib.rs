//! Shared types and the navigation core for Wayfinder components.

pub mod audit;
pub mod direct;
pub mod error;
pub mod messages;
pub mod navigation;
pub mod path;
pub mod sheets;
pub mod skill;
pub mod table;

pub use audit::AuditEntry;
pub use direct::{DirectLookup, DirectLookupEngine};
pub use error::TableError;
pub use navigation::{
    NavState, NavigationEngine, NavigationOptions, NavigationResult, ReservedTokens, Transition,
};
pub use path::{Path, MAX_DEPTH};
pub use sheets::{Credential, CredentialTable, RandomAnswerTable, SettlementTable, SheetRecords};
pub use skill::{ResponseBuilder, SkillParams, SkillRequest, SkillResponse};
pub use table::{HierarchyTable, Row, LEVEL_COUNT};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Short git hash captured at build time.
pub const GIT_SHA: &str = env!("WAYFINDER_GIT_SHA");

/// Build date (UTC).
pub const BUILD_DATE: &str = env!("WAYFINDER_BUILD_DATE");
