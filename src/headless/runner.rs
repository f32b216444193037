//! Headless duel execution
//!
//! Replays a scripted duel without any graphical output, suitable for
//! automated testing. The simulation runs as fast as it can: time only
//! advances by the fixed `1 / tick_rate` step.

use bevy::log::info;
use bevy::math::Vec2;

use crate::duel::{DuelEngine, GameRng, MatchOutcome, MatchPhase, RandomSource};

use super::config::{HeadlessDuelConfig, ScriptedCast};

/// Result of a completed headless duel
///
/// This struct provides programmatic access to duel results for testing and analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct DuelResult {
    /// Who won, or None if the duel timed out
    pub outcome: Option<MatchOutcome>,
    /// Opponent archetype name
    pub opponent: String,
    /// Match-clock time when the duel stopped
    pub match_time: f32,
    /// Player health at the end (clamped to 0)
    pub player_health: f32,
    /// Opponent health at the end (clamped to 0)
    pub opponent_health: f32,
    /// Scripted casts the engine accepted
    pub casts_accepted: usize,
    /// Scripted casts turned down (cooldown or mana)
    pub casts_rejected: usize,
    /// Random seed used (if deterministic mode)
    pub random_seed: Option<u64>,
}

/// Drive `engine` through the config's cast script until the match ends or
/// times out. The engine must already be in a running match.
pub fn run_script<R: RandomSource>(
    engine: &mut DuelEngine<R>,
    config: &HeadlessDuelConfig,
) -> DuelResult {
    let dt = 1.0 / config.tick_rate;

    let mut script: Vec<&ScriptedCast> = config.casts.iter().collect();
    script.sort_by(|a, b| a.at.total_cmp(&b.at));
    let mut pending = script.into_iter().peekable();

    let mut casts_accepted = 0;
    let mut casts_rejected = 0;

    // Counted in ticks so a clock that stops advancing cannot stall the loop
    let max_ticks = (config.max_duration_secs * config.tick_rate).ceil() as u64;

    for _ in 0..max_ticks {
        if engine.phase() != MatchPhase::InProgress {
            break;
        }

        let now = engine.clock();
        while let Some(cast) = pending.next_if(|cast| cast.at <= now) {
            let aim = Vec2::new(cast.aim[0], cast.aim[1]);
            match engine.request_cast(cast.slot, aim, now) {
                Ok(_) => casts_accepted += 1,
                Err(_) => casts_rejected += 1,
            }
        }

        engine.tick(dt);
    }

    if engine.phase() == MatchPhase::InProgress {
        info!(
            "Duel timed out after {:.1}s - no winner",
            engine.clock()
        );
    }

    let snapshot = engine.snapshot();
    DuelResult {
        outcome: snapshot.outcome,
        opponent: snapshot.opponent_name.to_string(),
        match_time: snapshot.clock,
        player_health: snapshot.player.health,
        opponent_health: snapshot.opponent.health,
        casts_accepted,
        casts_rejected,
        random_seed: config.random_seed,
    }
}

/// Run a headless duel with the given configuration
pub fn run_headless_duel(config: HeadlessDuelConfig) -> Result<DuelResult, String> {
    config.validate()?;
    let spells = config.load_spells()?;
    let roster = config.load_roster()?;
    config.validate_against(&spells, &roster)?;

    println!("Starting headless duel simulation...");
    println!("  Opponent: {}", config.opponent);
    println!("  Scripted casts: {}", config.casts.len());
    println!("  Max duration: {:.0}s", config.max_duration_secs);

    let rng = match config.random_seed {
        Some(seed) => {
            info!("Using deterministic RNG with seed: {}", seed);
            GameRng::from_seed(seed)
        }
        None => {
            info!("Using non-deterministic RNG (no seed provided)");
            GameRng::from_entropy()
        }
    };

    let mut engine = DuelEngine::new(spells, roster, rng);
    engine.set_player_name(config.player_name.clone());
    engine.start_match(&config.opponent);

    let result = run_script(&mut engine, &config);
    print_summary(&result);
    save_duel_log(&engine, &result, config.output_path.as_deref());

    Ok(result)
}

fn print_summary(result: &DuelResult) {
    let verdict = match result.outcome {
        Some(MatchOutcome::Victory) => "VICTORY",
        Some(MatchOutcome::Defeat) => "DEFEAT",
        None => "TIMEOUT",
    };
    println!("Duel against {} finished: {}", result.opponent, verdict);
    println!("  Duration: {:.2}s", result.match_time);
    println!(
        "  Health: player {:.0}, opponent {:.0}",
        result.player_health, result.opponent_health
    );
    println!(
        "  Casts: {} accepted, {} rejected",
        result.casts_accepted, result.casts_rejected
    );
}

/// Save the combat log to a file
fn save_duel_log<R: RandomSource>(engine: &DuelEngine<R>, result: &DuelResult, output_path: Option<&str>) {
    let header = vec![
        format!("Duel: {} vs {}", engine.player_label(), result.opponent),
        format!("Outcome: {:?}", result.outcome),
        format!("Duration: {:.2}s", result.match_time),
        format!(
            "Final health: player {:.0}, opponent {:.0}",
            result.player_health, result.opponent_health
        ),
        format!("Seed: {:?}", result.random_seed),
    ];

    match engine.log().save_to_file(&header, output_path) {
        Ok(filename) => {
            println!("Duel complete. Log saved to: {}", filename);
        }
        Err(e) => {
            eprintln!("Failed to save combat log: {}", e);
        }
    }
}
