//! Integration tests for headless duel execution
//!
//! These tests verify that:
//! - Scripted duels run to completion or time out
//! - Duel results are accessible programmatically
//! - Seeded RNG produces deterministic results
//! - Bad configs are rejected before a duel starts

use duelsim::duel::{
    DuelEngine, GameRng, MatchOutcome, OpponentArchetype, OpponentRoster, SequenceRng,
    SpellCatalog,
};
use duelsim::headless::config::MAX_TICK_RATE;
use duelsim::headless::{run_headless_duel, run_script, HeadlessDuelConfig, ScriptedCast};

const AVADA_KEDAVRA: usize = 6;
const INCENDIO: usize = 2;
const STUPEFY: usize = 1;

/// Aim point on the opponent's start position
const AT_OPPONENT: [f32; 2] = [1049.6, 360.0];

/// Helper to create a basic duel config
fn create_config(opponent: &str, casts: Vec<ScriptedCast>, seed: Option<u64>) -> HeadlessDuelConfig {
    HeadlessDuelConfig {
        opponent: opponent.to_string(),
        max_duration_secs: 20.0, // Short duration for tests
        random_seed: seed,
        casts,
        ..Default::default()
    }
}

fn cast(at: f32, slot: usize) -> ScriptedCast {
    ScriptedCast {
        at,
        slot,
        aim: AT_OPPONENT,
    }
}

/// Engine against an opponent that never dodges or wanders
fn scripted_engine() -> DuelEngine<SequenceRng> {
    let roster = OpponentRoster::new(vec![OpponentArchetype::new(
        "Training Dummy",
        [128, 128, 128],
        100.0,
        0.0,
        0.0,
    )])
    .expect("roster should be valid");
    let mut engine = DuelEngine::new(SpellCatalog::builtin(), roster, SequenceRng::constant(0.99));
    engine.start_match("Training Dummy");
    engine
}

fn seeded_engine(seed: u64, opponent: &str) -> DuelEngine {
    let mut engine = DuelEngine::with_builtin_catalogs(GameRng::from_seed(seed));
    engine.start_match(opponent);
    engine
}

// =============================================================================
// Script Execution
// =============================================================================

#[test]
fn test_lethal_script_wins() {
    let config = create_config("Training Dummy", vec![cast(0.0, AVADA_KEDAVRA)], None);
    let mut engine = scripted_engine();

    let result = run_script(&mut engine, &config);

    assert_eq!(result.outcome, Some(MatchOutcome::Victory));
    assert_eq!(result.opponent, "Training Dummy");
    assert_eq!(result.opponent_health, 0.0);
    assert_eq!(result.casts_accepted, 1);
    assert_eq!(result.casts_rejected, 0);
    assert!(result.match_time < 1.0);
    assert_eq!(engine.wins(), 1);
}

#[test]
fn test_rejected_casts_are_counted() {
    // The second Stupefy is still on cooldown; Avada is unaffordable after two casts
    let config = create_config(
        "Training Dummy",
        vec![cast(0.0, STUPEFY), cast(0.2, STUPEFY), cast(0.3, INCENDIO), cast(0.4, AVADA_KEDAVRA)],
        None,
    );
    let mut engine = scripted_engine();

    let result = run_script(&mut engine, &config);

    assert_eq!(result.casts_accepted, 2);
    assert_eq!(result.casts_rejected, 2);
}

#[test]
fn test_script_order_does_not_matter() {
    let ordered = create_config("Training Dummy", vec![cast(0.0, STUPEFY), cast(2.0, INCENDIO)], None);
    let shuffled = create_config("Training Dummy", vec![cast(2.0, INCENDIO), cast(0.0, STUPEFY)], None);

    let a = run_script(&mut scripted_engine(), &ordered);
    let b = run_script(&mut scripted_engine(), &shuffled);

    assert_eq!(a, b);
    assert_eq!(a.casts_accepted, 2);
}

#[test]
fn test_duel_times_out_without_casts() {
    let mut config = create_config("Voldemort", vec![], Some(3));
    config.max_duration_secs = 2.0;
    let mut engine = seeded_engine(3, "Voldemort");

    let result = run_script(&mut engine, &config);

    assert_eq!(result.outcome, None);
    assert!((result.match_time - 2.0).abs() < 1e-3);
    assert_eq!(result.opponent_health, 150.0);
    assert_eq!(result.player_health, 100.0);
}

#[test]
fn test_timeout_is_counted_in_ticks() {
    let mut config = create_config("Voldemort", vec![], Some(5));
    config.tick_rate = MAX_TICK_RATE;
    config.max_duration_secs = 0.5;
    let mut engine = seeded_engine(5, "Voldemort");

    let result = run_script(&mut engine, &config);

    assert_eq!(result.outcome, None);
    assert!((result.match_time - 0.5).abs() < 1e-3);
}

#[test]
fn test_same_seed_gives_same_result() {
    let casts = vec![
        cast(0.0, STUPEFY),
        cast(1.5, INCENDIO),
        cast(3.0, 9),
        cast(5.0, 8),
        cast(8.0, 5),
    ];
    let config = create_config("Bellatrix", casts, Some(42));

    let first = run_script(&mut seeded_engine(42, "Bellatrix"), &config);
    let second = run_script(&mut seeded_engine(42, "Bellatrix"), &config);

    assert_eq!(first, second);
}

// =============================================================================
// Full Runs
// =============================================================================

#[test]
fn test_run_headless_duel_writes_log() {
    let path = std::env::temp_dir().join(format!("duelsim_headless_{}.txt", std::process::id()));
    let mut config = create_config("Severus Snape", vec![cast(0.0, STUPEFY)], Some(12345));
    config.max_duration_secs = 3.0;
    config.output_path = Some(path.to_string_lossy().to_string());

    let result = run_headless_duel(config).expect("duel should run");

    assert_eq!(result.opponent, "Severus Snape");
    assert_eq!(result.random_seed, Some(12345));
    assert_eq!(result.casts_accepted, 1);

    let contents = std::fs::read_to_string(&path).expect("log should be saved");
    assert!(contents.contains("Severus Snape"));
    assert!(contents.contains("Cast Stupefy."));

    let _ = std::fs::remove_file(&path);
}

#[test]
fn test_run_headless_duel_rejects_unknown_opponent() {
    let config = create_config("Gilderoy Lockhart", vec![], Some(1));
    let err = run_headless_duel(config).unwrap_err();
    assert!(err.contains("Unknown opponent"));
}

// =============================================================================
// Config Parsing
// =============================================================================

#[test]
fn test_config_defaults() {
    let config = HeadlessDuelConfig::from_json_str("{}").expect("empty config is valid");

    assert_eq!(config.opponent, "Voldemort");
    assert_eq!(config.max_duration_secs, 120.0);
    assert_eq!(config.tick_rate, 60.0);
    assert!(config.casts.is_empty());
    assert!(config.random_seed.is_none());
}

#[test]
fn test_config_parses_script() {
    let json = r#"{
        "opponent": "Albus Dumbledore",
        "random_seed": 99,
        "casts": [
            { "at": 0.5, "slot": 1, "aim": [1000.0, 360.0] },
            { "at": 2.0, "slot": 5, "aim": [1000.0, 300.0] }
        ]
    }"#;

    let config = HeadlessDuelConfig::from_json_str(json).expect("config should parse");

    assert_eq!(config.opponent, "Albus Dumbledore");
    assert_eq!(config.random_seed, Some(99));
    assert_eq!(config.casts.len(), 2);
    assert_eq!(config.casts[1].slot, 5);
    assert_eq!(config.casts[1].aim, [1000.0, 300.0]);
}

#[test]
fn test_config_rejects_bad_values() {
    assert!(HeadlessDuelConfig::from_json_str(r#"{ "max_duration_secs": 0 }"#).is_err());
    assert!(HeadlessDuelConfig::from_json_str(r#"{ "tick_rate": -60 }"#).is_err());
    assert!(HeadlessDuelConfig::from_json_str(
        r#"{ "casts": [ { "at": -1.0, "slot": 0, "aim": [0.0, 0.0] } ] }"#
    )
    .is_err());
    assert!(HeadlessDuelConfig::from_json_str("not json").is_err());
}

#[test]
fn test_tick_rate_is_bounded() {
    assert!(HeadlessDuelConfig::from_json_str(r#"{ "tick_rate": 1e9, "max_duration_secs": 1.0 }"#).is_err());
    assert!(HeadlessDuelConfig::from_json_str(r#"{ "tick_rate": 0.5 }"#).is_err());
    assert!(HeadlessDuelConfig::from_json_str(r#"{ "tick_rate": 1000 }"#).is_ok());
    assert!(HeadlessDuelConfig::from_json_str(r#"{ "tick_rate": 1 }"#).is_ok());
}

#[test]
fn test_max_duration_is_bounded() {
    let err = HeadlessDuelConfig::from_json_str(r#"{ "max_duration_secs": 1e7 }"#).unwrap_err();
    assert!(err.contains("max_duration_secs"));
    assert!(HeadlessDuelConfig::from_json_str(r#"{ "max_duration_secs": 3600 }"#).is_ok());
}

#[test]
fn test_config_validated_against_catalogs() {
    let spells = SpellCatalog::builtin();
    let roster = OpponentRoster::builtin();

    let out_of_range = create_config("Voldemort", vec![cast(0.0, 10)], None);
    let err = out_of_range.validate_against(&spells, &roster).unwrap_err();
    assert!(err.contains("out of range"));

    let fine = create_config("Voldemort", vec![cast(0.0, 9)], None);
    assert!(fine.validate_against(&spells, &roster).is_ok());
}

#[test]
fn test_missing_config_file() {
    let result = HeadlessDuelConfig::load_from_file(std::path::Path::new("does/not/exist.json"));
    assert!(result.is_err());
}
