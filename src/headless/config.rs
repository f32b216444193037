//! JSON configuration parsing for headless mode
//!
//! A headless duel is a scripted sequence of casts against one opponent. The
//! script is replayed frame by frame at a fixed tick rate.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::duel::{OpponentRoster, SpellCatalog};

/// Longest duel a script may ask for.
///
/// Keeps the f32 match clock precise enough to advance by one tick at
/// `MAX_TICK_RATE`.
pub const MAX_DURATION_SECS: f32 = 3600.0;

pub const MIN_TICK_RATE: f32 = 1.0;
pub const MAX_TICK_RATE: f32 = 1000.0;

/// One scripted cast request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptedCast {
    /// Match time (seconds) at which the cast is requested
    pub at: f32,
    /// Catalog slot (0-based)
    pub slot: usize,
    /// Aim point in arena coordinates
    pub aim: [f32; 2],
}

/// Headless duel configuration loaded from JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeadlessDuelConfig {
    /// Opponent archetype name (default: "Voldemort")
    #[serde(default = "default_opponent")]
    pub opponent: String,
    /// Name shown for the player in the log
    #[serde(default)]
    pub player_name: Option<String>,
    /// Random seed for deterministic duel reproduction
    /// If provided, the duel will use a seeded RNG for reproducible results
    #[serde(default)]
    pub random_seed: Option<u64>,
    /// Maximum match duration in seconds (default: 120)
    #[serde(default = "default_max_duration")]
    pub max_duration_secs: f32,
    /// Simulation ticks per second (default: 60)
    #[serde(default = "default_tick_rate")]
    pub tick_rate: f32,
    /// Casts to request, in any order
    #[serde(default)]
    pub casts: Vec<ScriptedCast>,
    /// Custom output path for the combat log (optional)
    #[serde(default)]
    pub output_path: Option<String>,
    /// RON spell catalog to use instead of the built-in one
    #[serde(default)]
    pub spells_path: Option<String>,
    /// RON opponent roster to use instead of the built-in one
    #[serde(default)]
    pub opponents_path: Option<String>,
}

fn default_opponent() -> String {
    "Voldemort".to_string()
}

fn default_max_duration() -> f32 {
    120.0
}

fn default_tick_rate() -> f32 {
    60.0
}

impl Default for HeadlessDuelConfig {
    fn default() -> Self {
        Self {
            opponent: default_opponent(),
            player_name: None,
            random_seed: None,
            max_duration_secs: default_max_duration(),
            tick_rate: default_tick_rate(),
            casts: Vec::new(),
            output_path: None,
            spells_path: None,
            opponents_path: None,
        }
    }
}

impl HeadlessDuelConfig {
    /// Load configuration from a JSON file
    pub fn load_from_file(path: &Path) -> Result<Self, String> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {}", e))?;

        Self::from_json_str(&contents)
    }

    /// Parse configuration from JSON text
    pub fn from_json_str(contents: &str) -> Result<Self, String> {
        let config: HeadlessDuelConfig =
            serde_json::from_str(contents).map_err(|e| format!("Failed to parse JSON: {}", e))?;

        config.validate()?;
        Ok(config)
    }

    /// Checks that don't need the catalogs
    pub fn validate(&self) -> Result<(), String> {
        if !(self.max_duration_secs > 0.0 && self.max_duration_secs <= MAX_DURATION_SECS) {
            return Err(format!(
                "max_duration_secs must be within (0, {}], got {}",
                MAX_DURATION_SECS, self.max_duration_secs
            ));
        }
        if !(MIN_TICK_RATE..=MAX_TICK_RATE).contains(&self.tick_rate) {
            return Err(format!(
                "tick_rate must be within {}-{}, got {}",
                MIN_TICK_RATE, MAX_TICK_RATE, self.tick_rate
            ));
        }

        for (index, cast) in self.casts.iter().enumerate() {
            if !cast.at.is_finite() || cast.at < 0.0 {
                return Err(format!("casts[{}].at must be a non-negative time", index));
            }
            if !cast.aim.iter().all(|c| c.is_finite()) {
                return Err(format!("casts[{}].aim must be finite", index));
            }
        }

        Ok(())
    }

    /// Checks against the catalogs the duel will actually use
    pub fn validate_against(&self, spells: &SpellCatalog, roster: &OpponentRoster) -> Result<(), String> {
        if roster.archetype(&self.opponent).is_none() {
            return Err(format!(
                "Unknown opponent: '{}'. Valid opponents: {}",
                self.opponent,
                roster.names().collect::<Vec<_>>().join(", ")
            ));
        }

        for (index, cast) in self.casts.iter().enumerate() {
            if spells.get(cast.slot).is_none() {
                return Err(format!(
                    "casts[{}].slot {} is out of range (catalog has {} spells)",
                    index,
                    cast.slot,
                    spells.len()
                ));
            }
        }

        Ok(())
    }

    /// Load the spell catalog this duel should use
    pub fn load_spells(&self) -> Result<SpellCatalog, String> {
        match &self.spells_path {
            Some(path) => SpellCatalog::load(Path::new(path)),
            None => Ok(SpellCatalog::builtin()),
        }
    }

    /// Load the opponent roster this duel should use
    pub fn load_roster(&self) -> Result<OpponentRoster, String> {
        match &self.opponents_path {
            Some(path) => OpponentRoster::load(Path::new(path)),
            None => Ok(OpponentRoster::builtin()),
        }
    }
}
