//! Tree navigation state machine.
//!
//! The state is the length of the carried [`Path`]: `Root` (nothing chosen)
//! through `Depth5` (every level chosen, the target is next) and `Resolved`
//! (a target has been chosen). One input token moves the path by at most one
//! step; the new path is then either resolved against the table or expanded
//! into the next set of choices.
//!
//! Two behaviours are kept on purpose:
//! - "back" on an empty path is not a command and is appended like any
//!   other selection.
//! - selecting the fifth level immediately attempts a terminal lookup that
//!   uses the same token as the target. [`NavigationOptions::resolve_on_fifth_level`]
//!   turns this off, in which case depth 5 offers the target column instead.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::TableError;
use crate::messages;
use crate::path::{Path, MAX_DEPTH};
use crate::table::{HierarchyTable, LEVEL_COUNT};

pub const DEFAULT_BACK_TOKEN: &str = "back";
pub const DEFAULT_RESTART_TOKEN: &str = "restart";

/// Position in the hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavState {
    Root,
    Depth1,
    Depth2,
    Depth3,
    Depth4,
    Depth5,
    Resolved,
}

impl NavState {
    pub fn of(path: &Path) -> Self {
        match path.len() {
            0 => NavState::Root,
            1 => NavState::Depth1,
            2 => NavState::Depth2,
            3 => NavState::Depth3,
            4 => NavState::Depth4,
            5 => NavState::Depth5,
            _ => NavState::Resolved,
        }
    }

    pub fn depth(self) -> usize {
        match self {
            NavState::Root => 0,
            NavState::Depth1 => 1,
            NavState::Depth2 => 2,
            NavState::Depth3 => 3,
            NavState::Depth4 => 4,
            NavState::Depth5 => LEVEL_COUNT,
            NavState::Resolved => MAX_DEPTH,
        }
    }
}

/// Labels that act as commands instead of selections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservedTokens {
    pub back: String,
    pub restart: String,
}

impl Default for ReservedTokens {
    fn default() -> Self {
        Self {
            back: DEFAULT_BACK_TOKEN.to_string(),
            restart: DEFAULT_RESTART_TOKEN.to_string(),
        }
    }
}

impl ReservedTokens {
    pub fn is_reserved(&self, token: &str) -> bool {
        token == self.back || token == self.restart
    }
}

/// What one input token does to the path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    Reset,
    Back,
    Select(String),
    NoOp,
}

impl Transition {
    /// Classify `input` against the current path. Order matters: restart wins,
    /// back only counts on a non-empty path, anything else non-empty selects.
    pub fn classify(path: &Path, input: Option<&str>, reserved: &ReservedTokens) -> Self {
        match input {
            None | Some("") => Transition::NoOp,
            Some(t) if t == reserved.restart => Transition::Reset,
            Some(t) if t == reserved.back && !path.is_empty() => Transition::Back,
            Some(t) => Transition::Select(t.to_string()),
        }
    }

    pub fn apply(&self, path: &Path) -> Path {
        match self {
            Transition::Reset => Path::new(),
            Transition::Back => path.pop(),
            Transition::Select(token) => path.push(token),
            Transition::NoOp => path.clone(),
        }
    }

    fn is_select(&self) -> bool {
        matches!(self, Transition::Select(_))
    }
}

/// Engine switches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationOptions {
    pub reserved: ReservedTokens,
    /// Selecting a fifth-level value resolves at once, reusing it as the target.
    pub resolve_on_fifth_level: bool,
}

impl Default for NavigationOptions {
    fn default() -> Self {
        Self {
            reserved: ReservedTokens::default(),
            resolve_on_fifth_level: true,
        }
    }
}

/// Outcome of one step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationResult {
    pub message: String,
    /// Labels in display order; each label is also the token to send back.
    pub choices: Vec<String>,
    pub path: Path,
    pub state: NavState,
    /// True when the message came from an exact six-field lookup attempt.
    pub terminal: bool,
}

#[derive(Debug, Clone, Default)]
pub struct NavigationEngine {
    options: NavigationOptions,
}

impl NavigationEngine {
    pub fn new(options: NavigationOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &NavigationOptions {
        &self.options
    }

    /// Advance `path` by `input` against a loaded table, or report the data as
    /// unavailable and reset when loading failed.
    pub fn step_loaded(
        &self,
        table: Result<&HierarchyTable, &TableError>,
        path: &Path,
        input: Option<&str>,
    ) -> NavigationResult {
        match table {
            Ok(table) => self.step(table, path, input),
            Err(e) => {
                warn!("Hierarchy unavailable, resetting path: {}", e);
                self.data_unavailable()
            }
        }
    }

    /// Advance `path` by `input`.
    pub fn step(&self, table: &HierarchyTable, path: &Path, input: Option<&str>) -> NavigationResult {
        let reserved = &self.options.reserved;
        let transition = Transition::classify(path, input, reserved);
        let next = transition.apply(path);
        let depth = next.len();

        debug!(
            "Navigation {:?}: '{}' -> '{}'",
            transition,
            path.encode(),
            next.encode()
        );

        let terminal = depth == MAX_DEPTH
            || (depth == LEVEL_COUNT && transition.is_select() && self.options.resolve_on_fifth_level);

        if terminal {
            return self.resolve(table, next);
        }

        let options = table.next_options(&next);
        let message = messages::available(&options);
        let mut choices = options;
        if !next.is_empty() {
            choices.push(reserved.back.clone());
        }
        choices.push(reserved.restart.clone());

        NavigationResult {
            message,
            choices,
            state: NavState::of(&next),
            path: next,
            terminal: false,
        }
    }

    fn resolve(&self, table: &HierarchyTable, path: Path) -> NavigationResult {
        let message = path
            .resolution_key()
            .and_then(|key| table.resolve(&key))
            .map(|row| row.output.clone())
            .unwrap_or_else(|| messages::NO_MATCHING_LOCATION.to_string());

        NavigationResult {
            message,
            choices: vec![
                self.options.reserved.back.clone(),
                self.options.reserved.restart.clone(),
            ],
            state: NavState::Resolved,
            path,
            terminal: true,
        }
    }

    fn data_unavailable(&self) -> NavigationResult {
        NavigationResult {
            message: messages::DATA_UNAVAILABLE.to_string(),
            choices: vec![self.options.reserved.restart.clone()],
            path: Path::new(),
            state: NavState::Root,
            terminal: false,
        }
    }
}
