//! Golden tests for the navigation state machine.
//!
//! Covers the canonical scenarios:
//! A. Root menu with no input
//! B. Mid-tree select
//! C. Back from depth 2
//! D. Restart mid-tree
//! plus terminal resolution, the fifth-level switch and data-unavailable.

use wayfinder_shared::{
    messages, HierarchyTable, NavState, NavigationEngine, NavigationOptions, Path, Row,
    TableError,
};

fn table() -> HierarchyTable {
    HierarchyTable::new(vec![
        Row::new(
            ["Seoul", "Gangnam-gu", "Samseong-dong", "Polytech", "Raon-hall"],
            "1F-water-purifier",
            "A dusty note is taped to the purifier.",
        ),
        Row::new(
            ["Seoul", "Gangnam-gu", "Samseong-dong", "Polytech", "Raon-hall"],
            "2F-lounge",
            "Nobody is here.",
        ),
        Row::new(
            ["Seoul", "Gangnam-gu", "Yeoksam-dong", "Tower", "Lobby"],
            "front-desk",
            "The clerk shrugs.",
        ),
        Row::new(
            ["Seoul", "Gangnam-gu", "Samseong-dong", "Polytech", "Raon-hall"],
            "Raon-hall",
            "You look around the hall.",
        ),
        Row::new(
            ["Seoul", "Mapo-gu", "Hapjeong-dong", "Cafe", "Terrace"],
            "table",
            "A cold cup of coffee.",
        ),
        Row::new(
            ["Busan", "Haeundae-gu", "U-dong", "Beach", "Pier"],
            "bench",
            "Sand everywhere.",
        ),
    ])
}

fn engine() -> NavigationEngine {
    NavigationEngine::default()
}

// =============================================================================
// Scenario A: root menu
// =============================================================================

#[test]
fn test_root_menu() {
    let result = engine().step(&table(), &Path::new(), None);

    assert_eq!(result.path, Path::new());
    assert_eq!(result.state, NavState::Root);
    assert_eq!(result.choices, vec!["Busan", "Seoul", "restart"]);
    assert!(!result.choices.contains(&"back".to_string()));
    assert_eq!(result.message, "Available: Busan, Seoul");
    assert!(!result.terminal);
}

#[test]
fn test_empty_input_is_noop() {
    let path = Path::decode("Seoul");
    let result = engine().step(&table(), &path, Some(""));
    assert_eq!(result.path, path);
    assert_eq!(result.choices, vec!["Gangnam-gu", "Mapo-gu", "back", "restart"]);
}

// =============================================================================
// Scenario B: mid-tree select
// =============================================================================

#[test]
fn test_mid_tree_select() {
    let result = engine().step(&table(), &Path::decode("Seoul"), Some("Gangnam-gu"));

    assert_eq!(result.path.tokens(), ["Seoul", "Gangnam-gu"]);
    assert_eq!(result.state, NavState::Depth2);
    assert_eq!(
        result.choices,
        vec!["Samseong-dong", "Yeoksam-dong", "back", "restart"]
    );
    assert_eq!(result.path.encode(), "Seoul,Gangnam-gu");
}

#[test]
fn test_unknown_selection_offers_nothing_but_commands() {
    let result = engine().step(&table(), &Path::decode("Seoul"), Some("Nowhere"));
    assert_eq!(result.path.len(), 2);
    assert_eq!(result.choices, vec!["back", "restart"]);
    assert_eq!(result.message, "Available: ");
}

// =============================================================================
// Scenario C: back from depth 2
// =============================================================================

#[test]
fn test_back_from_depth_two() {
    let result = engine().step(&table(), &Path::decode("Seoul,Gangnam-gu"), Some("back"));

    assert_eq!(result.path.tokens(), ["Seoul"]);
    assert_eq!(result.state, NavState::Depth1);
    assert_eq!(result.choices, vec!["Gangnam-gu", "Mapo-gu", "back", "restart"]);
}

#[test]
fn test_back_on_empty_path_is_appended() {
    let result = engine().step(&table(), &Path::new(), Some("back"));

    assert_eq!(result.path.tokens(), ["back"]);
    assert_eq!(result.choices, vec!["back", "restart"]);
}

// =============================================================================
// Scenario D: restart mid-tree
// =============================================================================

#[test]
fn test_restart_mid_tree() {
    let root = engine().step(&table(), &Path::new(), None);
    let result = engine().step(
        &table(),
        &Path::decode("Seoul,Gangnam-gu,Samseong-dong"),
        Some("restart"),
    );

    assert!(result.path.is_empty());
    assert_eq!(result.choices, root.choices);
    assert_eq!(result.message, root.message);
}

// =============================================================================
// Terminal resolution
// =============================================================================

#[test]
fn test_fifth_level_select_resolves_with_same_token() {
    let path = Path::decode("Seoul,Gangnam-gu,Samseong-dong,Polytech");
    let result = engine().step(&table(), &path, Some("Raon-hall"));

    assert!(result.terminal);
    assert_eq!(result.state, NavState::Resolved);
    assert_eq!(result.message, "You look around the hall.");
    assert_eq!(result.choices, vec!["back", "restart"]);
    assert_eq!(result.path.len(), 5);
}

#[test]
fn test_fifth_level_select_without_self_target_misses() {
    let path = Path::decode("Seoul,Gangnam-gu,Yeoksam-dong,Tower");
    let result = engine().step(&table(), &path, Some("Lobby"));

    assert!(result.terminal);
    assert_eq!(result.message, messages::NO_MATCHING_LOCATION);
    assert_eq!(result.choices, vec!["back", "restart"]);
}

#[test]
fn test_fifth_level_switch_off_offers_targets() {
    let engine = NavigationEngine::new(NavigationOptions {
        resolve_on_fifth_level: false,
        ..NavigationOptions::default()
    });
    let path = Path::decode("Seoul,Gangnam-gu,Yeoksam-dong,Tower");
    let result = engine.step(&table(), &path, Some("Lobby"));

    assert!(!result.terminal);
    assert_eq!(result.state, NavState::Depth5);
    assert_eq!(result.choices, vec!["front-desk", "back", "restart"]);

    let result = engine.step(&table(), &result.path, Some("front-desk"));
    assert!(result.terminal);
    assert_eq!(result.message, "The clerk shrugs.");
    assert_eq!(result.path.len(), 6);
}

#[test]
fn test_back_to_depth_five_lists_targets() {
    let path = Path::decode("Seoul,Gangnam-gu,Samseong-dong,Polytech,Raon-hall,2F-lounge");
    let result = engine().step(&table(), &path, Some("back"));

    assert!(!result.terminal);
    assert_eq!(
        result.choices,
        vec!["1F-water-purifier", "2F-lounge", "Raon-hall", "back", "restart"]
    );

    let result = engine().step(&table(), &result.path, Some("2F-lounge"));
    assert!(result.terminal);
    assert_eq!(result.message, "Nobody is here.");
}

#[test]
fn test_select_on_resolved_path_re_resolves() {
    let path = Path::decode("Busan,Haeundae-gu,U-dong,Beach,Pier,bench");
    let result = engine().step(&table(), &path, Some("anything"));

    assert_eq!(result.path, path);
    assert_eq!(result.message, "Sand everywhere.");
}

#[test]
fn test_resolve_is_deterministic() {
    let key = ["Seoul", "Gangnam-gu", "Samseong-dong", "Polytech", "Raon-hall", "2F-lounge"]
        .map(String::from);
    let t = table();
    let first = t.resolve(&key).cloned();
    let second = t.resolve(&key).cloned();
    assert_eq!(first, second);
    assert_eq!(first.unwrap().output, "Nobody is here.");
}

// =============================================================================
// Depth properties
// =============================================================================

#[test]
fn test_transitions_move_depth_by_one() {
    let t = table();
    let e = engine();
    let mut path = Path::new();
    for token in ["Seoul", "Gangnam-gu", "Samseong-dong", "Polytech"] {
        let before = path.len();
        path = e.step(&t, &path, Some(token)).path;
        assert_eq!(path.len(), before + 1);
    }
    while !path.is_empty() {
        let before = path.len();
        path = e.step(&t, &path, Some("back")).path;
        assert_eq!(path.len(), before - 1);
    }
}

#[test]
fn test_options_come_from_candidates() {
    let t = table();
    let path = Path::decode("Seoul,Gangnam-gu");
    let options = t.next_options(&path);

    let mut sorted = options.clone();
    sorted.sort();
    sorted.dedup();
    assert_eq!(options, sorted);

    for option in &options {
        assert!(t.candidates(&path).any(|row| &row.levels[2] == option));
    }
}

// =============================================================================
// Data unavailable
// =============================================================================

#[test]
fn test_data_unavailable_resets_path() {
    let err = TableError::SheetMissing("hierarchy".to_string());
    let result = engine().step_loaded(Err(&err), &Path::decode("Seoul,Gangnam-gu"), Some("x"));

    assert!(result.path.is_empty());
    assert_eq!(result.message, messages::DATA_UNAVAILABLE);
    assert_eq!(result.choices, vec!["restart"]);
}
