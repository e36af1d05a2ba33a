//! Tests for the direct lookup shortcut and the path codec.

use proptest::prelude::*;
use wayfinder_shared::{messages, DirectLookupEngine, HierarchyTable, Path};

const HIERARCHY_CSV: &str = "\
level1,level2,level3,level4,level5,target,output
Seoul,Gangnam-gu,Samseong-dong,Polytech,Raon-hall,1F-water-purifier,A dusty note is taped to the purifier.
Seoul,Gangnam-gu,Samseong-dong,Polytech,Raon-hall,1F-water-purifier,Duplicate row is never reached.
Busan,Haeundae-gu,U-dong,Beach,Pier,bench,Sand everywhere.
";

fn table() -> HierarchyTable {
    HierarchyTable::from_csv_str(HIERARCHY_CSV).unwrap()
}

#[test]
fn test_direct_lookup_found() {
    let t = table();
    let engine = DirectLookupEngine::new(&t);
    assert_eq!(
        engine.lookup("Seoul Gangnam-gu Samseong-dong Polytech Raon-hall 1F-water-purifier"),
        "A dusty note is taped to the purifier."
    );
}

#[test]
fn test_direct_lookup_extra_tokens_ignored() {
    let t = table();
    let engine = DirectLookupEngine::new(&t);
    assert_eq!(
        engine.lookup("Busan Haeundae-gu U-dong Beach Pier bench please hurry"),
        "Sand everywhere."
    );
}

#[test]
fn test_direct_lookup_miss() {
    let t = table();
    let engine = DirectLookupEngine::new(&t);
    assert_eq!(
        engine.lookup("Busan Haeundae-gu U-dong Beach Pier chair"),
        messages::NO_MATCHING_LOCATION
    );
}

#[test]
fn test_direct_lookup_usage_hint() {
    let empty = HierarchyTable::default();
    let full = table();
    for t in [&empty, &full] {
        let message = DirectLookupEngine::new(t).lookup("Seoul Gangnam-gu Samseong-dong");
        assert_eq!(message, messages::DIRECT_LOOKUP_USAGE);
        assert!(message.contains("Example: Seoul Gangnam-gu"));
    }
}

#[test]
fn test_intro_is_first_output() {
    assert_eq!(table().intro(), Some("A dusty note is taped to the purifier."));
    assert_eq!(HierarchyTable::default().intro(), None);
}

proptest! {
    #[test]
    fn prop_path_round_trip(tokens in prop::collection::vec("[^,]{1,12}", 0..=6)) {
        let path = Path::from_tokens(tokens.clone());
        prop_assert_eq!(Path::decode(&path.encode()), path.clone());
        prop_assert_eq!(path.tokens(), tokens.as_slice());
    }
}
