//! Opponent Roster
//!
//! Archetypes the player can duel. Exactly one is bound to the opponent per
//! match; the roster order is the order the menu cycles through.

use bevy::log::info;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Static stats of a computer-controlled duellist.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OpponentArchetype {
    pub name: String,
    /// Display color (RGB)
    pub color: [u8; 3],
    pub max_health: f32,
    /// Probability that a dodgeable hit is dodged
    pub dodge_chance: f32,
    /// Probability of countering after a dodge
    pub counter_chance: f32,
}

impl OpponentArchetype {
    pub fn new(name: &str, color: [u8; 3], max_health: f32, dodge_chance: f32, counter_chance: f32) -> Self {
        Self {
            name: name.to_string(),
            color,
            max_health,
            dodge_chance,
            counter_chance,
        }
    }
}

/// Root structure for the opponents.ron file
#[derive(Debug, Serialize, Deserialize)]
pub struct OpponentsConfig {
    pub opponents: Vec<OpponentArchetype>,
}

/// Immutable, ordered set of archetypes.
#[derive(Clone, Debug)]
pub struct OpponentRoster {
    archetypes: Vec<OpponentArchetype>,
}

impl OpponentRoster {
    /// Build a roster, validating every archetype.
    pub fn new(archetypes: Vec<OpponentArchetype>) -> Result<Self, String> {
        let roster = Self { archetypes };
        roster.validate()?;
        Ok(roster)
    }

    pub fn builtin() -> Self {
        Self {
            archetypes: vec![
                OpponentArchetype::new("Voldemort", [80, 10, 10], 150.0, 0.10, 0.20),
                OpponentArchetype::new("Bellatrix", [150, 0, 120], 120.0, 0.20, 0.14),
                OpponentArchetype::new("Dolores Umbridge", [255, 105, 180], 90.0, 0.12, 0.08),
                OpponentArchetype::new("Severus Snape", [20, 20, 20], 130.0, 0.08, 0.25),
                OpponentArchetype::new("Albus Dumbledore", [200, 200, 255], 160.0, 0.06, 0.30),
            ],
        }
    }

    /// Parse and validate a roster from RON text.
    pub fn from_ron_str(contents: &str) -> Result<Self, String> {
        let config: OpponentsConfig =
            ron::from_str(contents).map_err(|e| format!("Failed to parse opponents: {}", e))?;
        Self::new(config.opponents)
    }

    /// Load a roster from a RON file.
    pub fn load(path: &Path) -> Result<Self, String> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
        let roster = Self::from_ron_str(&contents)
            .map_err(|e| format!("{} ({})", e, path.display()))?;

        info!("Loaded {} opponents from {}", roster.len(), path.display());

        Ok(roster)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.archetypes.is_empty() {
            return Err("Opponent roster is empty".to_string());
        }

        for (index, archetype) in self.archetypes.iter().enumerate() {
            if archetype.name.is_empty() {
                return Err(format!("Opponent #{} has an empty name", index));
            }
            if self.archetypes[..index].iter().any(|other| other.name == archetype.name) {
                return Err(format!("Duplicate opponent name: '{}'", archetype.name));
            }
            if !archetype.max_health.is_finite() || archetype.max_health <= 0.0 {
                return Err(format!(
                    "{}: max_health must be positive, got {}",
                    archetype.name, archetype.max_health
                ));
            }
            for (field, value) in [
                ("dodge_chance", archetype.dodge_chance),
                ("counter_chance", archetype.counter_chance),
            ] {
                if !(0.0..=1.0).contains(&value) {
                    return Err(format!(
                        "{}: {} must be within 0.0-1.0, got {}",
                        archetype.name, field, value
                    ));
                }
            }
        }

        Ok(())
    }

    pub fn archetype(&self, name: &str) -> Option<&OpponentArchetype> {
        self.archetypes.iter().find(|archetype| archetype.name == name)
    }

    /// Get an archetype by name, panicking if it is not in the roster.
    /// Use this when the name has already been validated.
    pub fn archetype_unchecked(&self, name: &str) -> &OpponentArchetype {
        self.archetype(name)
            .unwrap_or_else(|| panic!("Opponent '{}' not found in roster", name))
    }

    /// The default pick.
    pub fn first(&self) -> &OpponentArchetype {
        &self.archetypes[0]
    }

    /// The archetype after `name`, wrapping around. Unknown names restart at the first.
    pub fn next_after(&self, name: &str) -> &OpponentArchetype {
        match self.archetypes.iter().position(|archetype| archetype.name == name) {
            Some(index) => &self.archetypes[(index + 1) % self.archetypes.len()],
            None => self.first(),
        }
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.archetypes.iter().map(|archetype| archetype.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.archetypes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.archetypes.is_empty()
    }
}

impl Default for OpponentRoster {
    fn default() -> Self {
        Self::builtin()
    }
}
