//! Integration tests for the spell catalog and opponent roster files
//!
//! These tests verify that:
//! - The shipped RON files match the built-in tables
//! - Invalid catalogs are rejected with a readable reason

use std::path::Path;

use duelsim::duel::{OpponentRoster, SpellCatalog, SpellEffect};

// =============================================================================
// Shipped Config Files
// =============================================================================

#[test]
fn test_spells_file_matches_builtin_table() {
    let loaded = SpellCatalog::load(Path::new("assets/config/spells.ron")).expect("spells.ron should load");
    let builtin = SpellCatalog::builtin();

    assert_eq!(loaded.len(), builtin.len());
    for (file_spell, builtin_spell) in loaded.iter().zip(builtin.iter()) {
        assert_eq!(file_spell, builtin_spell);
    }
}

#[test]
fn test_opponents_file_matches_builtin_roster() {
    let loaded =
        OpponentRoster::load(Path::new("assets/config/opponents.ron")).expect("opponents.ron should load");
    let builtin = OpponentRoster::builtin();

    assert_eq!(loaded.names().collect::<Vec<_>>(), builtin.names().collect::<Vec<_>>());
    for name in builtin.names() {
        assert_eq!(loaded.archetype(name), builtin.archetype(name));
    }
}

#[test]
fn test_missing_file_is_an_error() {
    let err = SpellCatalog::load(Path::new("assets/config/nope.ron")).unwrap_err();
    assert!(err.contains("Failed to read"));
}

// =============================================================================
// Spell Validation
// =============================================================================

#[test]
fn test_spell_defaults_for_omitted_numbers() {
    let catalog = SpellCatalog::from_ron_str(
        r#"(spells: [(name: "Lumos", color: (255, 255, 200), effect: None)])"#,
    )
    .expect("minimal spell should parse");

    let spell = catalog.lookup(0);
    assert_eq!(spell.effect, SpellEffect::None);
    assert_eq!(spell.mana_cost, 0.0);
    assert_eq!(spell.projectile_speed, 0.0);
}

#[test]
fn test_negative_numbers_are_rejected() {
    let err = SpellCatalog::from_ron_str(
        r#"(spells: [(name: "Stupefy", mana_cost: -5.0, color: (70, 200, 220), effect: Stun)])"#,
    )
    .unwrap_err();

    assert!(err.contains("Stupefy"));
    assert!(err.contains("mana_cost"));
}

#[test]
fn test_empty_catalog_is_rejected() {
    assert!(SpellCatalog::from_ron_str("(spells: [])").is_err());
}

#[test]
fn test_catalog_larger_than_hotkeys_is_rejected() {
    let spells: Vec<String> = (0..11)
        .map(|i| format!(r#"(name: "Spell {}", color: (0, 0, 0), effect: None)"#, i))
        .collect();
    let ron = format!("(spells: [{}])", spells.join(", "));

    let err = SpellCatalog::from_ron_str(&ron).unwrap_err();
    assert!(err.contains("hotkeys"));
}

#[test]
fn test_unknown_effect_fails_to_parse() {
    let err = SpellCatalog::from_ron_str(
        r#"(spells: [(name: "Obliviate", color: (0, 0, 0), effect: Forget)])"#,
    )
    .unwrap_err();
    assert!(err.contains("Failed to parse spells"));
}

// =============================================================================
// Roster Validation
// =============================================================================

#[test]
fn test_duplicate_opponents_are_rejected() {
    let err = OpponentRoster::from_ron_str(
        r#"(opponents: [
            (name: "Snape", color: (20, 20, 20), max_health: 130.0, dodge_chance: 0.1, counter_chance: 0.2),
            (name: "Snape", color: (20, 20, 20), max_health: 130.0, dodge_chance: 0.1, counter_chance: 0.2),
        ])"#,
    )
    .unwrap_err();

    assert!(err.contains("Duplicate"));
}

#[test]
fn test_probabilities_must_be_in_range() {
    let err = OpponentRoster::from_ron_str(
        r#"(opponents: [
            (name: "Lockhart", color: (200, 180, 60), max_health: 60.0, dodge_chance: 1.5, counter_chance: 0.0),
        ])"#,
    )
    .unwrap_err();

    assert!(err.contains("dodge_chance"));
}

#[test]
fn test_non_positive_health_is_rejected() {
    let err = OpponentRoster::from_ron_str(
        r#"(opponents: [
            (name: "Ghost", color: (200, 200, 200), max_health: 0.0, dodge_chance: 0.5, counter_chance: 0.0),
        ])"#,
    )
    .unwrap_err();

    assert!(err.contains("max_health"));
}

#[test]
fn test_cycling_wraps_around() {
    let roster = OpponentRoster::builtin();
    assert_eq!(roster.next_after("Albus Dumbledore").name, "Voldemort");
    assert_eq!(roster.next_after("Nobody").name, "Voldemort");
}
