extern crate leaf_detect;

use leaf_detect::common::{canonical_label, ClassCatalog};
use leaf_detect::knowledge::{Disease, KnowledgeBase};

#[test]
fn canonicalizes_label_variants() {
    assert_eq!(canonical_label("leaf miner"), "leaf_miner");
    assert_eq!(canonical_label("Leaf-Miner"), "leaf_miner");
    assert_eq!(canonical_label("  RED  RUST "), "red_rust");
    assert_eq!(canonical_label("healthy"), "healthy");
}

#[test]
fn catalog_canonicalizes_at_ingestion() {
    let catalog = ClassCatalog::new(&["healthy", "Leaf Miner", "red rust"]);

    assert_eq!(catalog.label(0), Some("healthy"));
    assert_eq!(catalog.label(1), Some("leaf_miner"));
    assert_eq!(catalog.label(2), Some("red_rust"));
    assert_eq!(catalog.label(99), None);
}

#[test]
fn disease_resolves_from_loose_spellings() {
    assert_eq!(Disease::from_label("leaf miner"), Some(Disease::LeafMiner));
    assert_eq!(Disease::from_label("LEAF_MINER"), Some(Disease::LeafMiner));
    assert_eq!(Disease::from_label("red-rust"), Some(Disease::RedRust));
    assert_eq!(Disease::from_label("anthracnose"), None);
}

#[test]
fn every_disease_has_description_and_treatment() {
    let kb = KnowledgeBase::new();
    for disease in [Disease::Healthy, Disease::LeafMiner, Disease::RedRust] {
        let info = kb.info(disease);
        assert!(!info.description.is_empty());
        assert!(!info.treatment.is_empty());
    }
}

#[test]
fn lookup_misses_on_undocumented_labels() {
    let kb = KnowledgeBase::new();
    assert!(kb.lookup("leaf miner").is_some());
    assert!(kb.lookup("black mould").is_none());
}

#[test]
fn healthy_test_matches_only_the_healthy_label() {
    let kb = KnowledgeBase::new();
    assert!(kb.is_healthy("healthy"));
    assert!(kb.is_healthy("Healthy"));
    assert!(!kb.is_healthy("leaf_miner"));
    assert!(!kb.is_healthy("black mould"));
}
