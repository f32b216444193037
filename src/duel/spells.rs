//! Spell Catalog
//!
//! The castable spells, indexed by a stable slot (0..N-1) that matches the
//! hotkey order (1-9, then 0). The catalog is immutable once built and is
//! handed to the engine at construction.
//!
//! The built-in table can be replaced by a RON file with the same shape as
//! `assets/config/spells.ron`:
//!
//! ```ron
//! (
//!     spells: [
//!         (name: "Stupefy", damage: 12.0, mana_cost: 18.0, cooldown: 1.4,
//!          color: (70, 200, 220), effect: Stun, projectile_speed: 900.0, duration: 1.0),
//!     ],
//! )
//! ```

use bevy::log::info;
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::constants::{AVADA_GREEN, BLOOD, CYAN, ORANGE};

/// Hotkeys 1-9 and 0 address at most ten slots.
pub const MAX_SPELL_SLOTS: usize = 10;

/// What a spell does when it lands (or, for `Shield`, when it is cast).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpellEffect {
    /// Plain damage
    None,
    /// Knocks the wand out of the opponent's hand
    Disarm,
    /// Damage, stun and a small knockback
    Stun,
    /// Damage, then burning damage over time
    Burn,
    /// Shields the caster; never travels
    Shield,
    /// Stun without damage
    Petrify,
    /// Damage with a large burst
    Explode,
    /// Cannot be dodged; drops health to zero
    Lethal,
    /// Damage and stun
    Incapacitate,
    /// Damage, then torment damage over time
    Torment,
    /// Damage, then bleeding damage over time
    Bleed,
}

impl SpellEffect {
    /// Lethal spells always connect.
    pub fn is_dodgeable(&self) -> bool {
        *self != SpellEffect::Lethal
    }
}

/// A single catalog entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpellDefinition {
    /// Display name of the spell
    pub name: String,
    /// Damage applied on a landed hit
    #[serde(default)]
    pub damage: f32,
    /// Mana spent per cast
    #[serde(default)]
    pub mana_cost: f32,
    /// Seconds before the slot can be cast again
    #[serde(default)]
    pub cooldown: f32,
    /// Projectile and particle color (RGB)
    pub color: [u8; 3],
    pub effect: SpellEffect,
    /// Travel speed in units/second (0 = instantaneous)
    #[serde(default)]
    pub projectile_speed: f32,
    /// Seconds a timed effect lasts
    #[serde(default)]
    pub duration: f32,
}

impl SpellDefinition {
    fn new(
        name: &str,
        damage: f32,
        mana_cost: f32,
        cooldown: f32,
        color: [u8; 3],
        effect: SpellEffect,
        projectile_speed: f32,
        duration: f32,
    ) -> Self {
        Self {
            name: name.to_string(),
            damage,
            mana_cost,
            cooldown,
            color,
            effect,
            projectile_speed,
            duration,
        }
    }

    /// Shields resolve on the caster instead of travelling.
    pub fn is_self_cast(&self) -> bool {
        self.effect == SpellEffect::Shield
    }

    /// A travel speed of 0 lands on the opponent the moment it is cast.
    pub fn is_instant(&self) -> bool {
        self.projectile_speed == 0.0
    }
}

/// Root structure for the spells.ron file
#[derive(Debug, Serialize, Deserialize)]
pub struct SpellsConfig {
    pub spells: Vec<SpellDefinition>,
}

/// Immutable, slot-indexed spell table.
#[derive(Clone, Debug)]
pub struct SpellCatalog {
    spells: Vec<SpellDefinition>,
}

impl SpellCatalog {
    /// Build a catalog, validating every entry.
    pub fn new(spells: Vec<SpellDefinition>) -> Result<Self, String> {
        let catalog = Self { spells };
        catalog.validate()?;
        Ok(catalog)
    }

    /// The ten classic duelling spells.
    pub fn builtin() -> Self {
        use SpellEffect::*;

        Self {
            spells: vec![
                SpellDefinition::new("Expelliarmus", 0.0, 12.0, 1.0, [255, 200, 40], Disarm, 900.0, 0.0),
                SpellDefinition::new("Stupefy", 12.0, 18.0, 1.4, CYAN, Stun, 900.0, 1.0),
                SpellDefinition::new("Incendio", 6.0, 22.0, 2.0, ORANGE, Burn, 700.0, 3.0),
                SpellDefinition::new("Protego", 0.0, 20.0, 3.0, [40, 200, 60], Shield, 0.0, 1.8),
                SpellDefinition::new("Petrificus Totalus", 0.0, 24.0, 2.6, [150, 60, 200], Petrify, 750.0, 2.0),
                SpellDefinition::new("Confringo", 28.0, 36.0, 3.0, [255, 180, 80], Explode, 1000.0, 0.0),
                SpellDefinition::new("Avada Kedavra", 9999.0, 90.0, 6.0, AVADA_GREEN, Lethal, 1200.0, 0.0),
                SpellDefinition::new("Rictusempra", 6.0, 16.0, 1.8, [200, 200, 255], Incapacitate, 800.0, 1.2),
                SpellDefinition::new("Crucio", 1.5, 28.0, 3.5, [200, 20, 20], Torment, 700.0, 4.0),
                SpellDefinition::new("Sectumsempra", 8.0, 30.0, 3.8, BLOOD, Bleed, 850.0, 4.0),
            ],
        }
    }

    /// Parse and validate a catalog from RON text.
    pub fn from_ron_str(contents: &str) -> Result<Self, String> {
        let config: SpellsConfig =
            ron::from_str(contents).map_err(|e| format!("Failed to parse spells: {}", e))?;
        Self::new(config.spells)
    }

    /// Load a catalog from a RON file.
    pub fn load(path: &Path) -> Result<Self, String> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
        let catalog = Self::from_ron_str(&contents)
            .map_err(|e| format!("{} ({})", e, path.display()))?;

        info!("Loaded {} spell definitions from {}", catalog.len(), path.display());

        Ok(catalog)
    }

    /// Check catalog-wide invariants.
    pub fn validate(&self) -> Result<(), String> {
        if self.spells.is_empty() {
            return Err("Spell catalog is empty".to_string());
        }
        if self.spells.len() > MAX_SPELL_SLOTS {
            return Err(format!(
                "Spell catalog has {} entries but only {} slots have hotkeys",
                self.spells.len(),
                MAX_SPELL_SLOTS
            ));
        }

        for spell in &self.spells {
            if spell.name.is_empty() {
                return Err("Spell with an empty name".to_string());
            }
            let numbers = [
                ("damage", spell.damage),
                ("mana_cost", spell.mana_cost),
                ("cooldown", spell.cooldown),
                ("projectile_speed", spell.projectile_speed),
                ("duration", spell.duration),
            ];
            for (field, value) in numbers {
                if !value.is_finite() || value < 0.0 {
                    return Err(format!(
                        "{}: {} must be a non-negative number, got {}",
                        spell.name, field, value
                    ));
                }
            }
        }

        Ok(())
    }

    /// The spell in `slot`. Panics on an out-of-range slot.
    pub fn lookup(&self, slot: usize) -> &SpellDefinition {
        self.spells.get(slot).unwrap_or_else(|| {
            panic!(
                "Spell slot {} out of range (catalog has {} spells)",
                slot,
                self.spells.len()
            )
        })
    }

    pub fn get(&self, slot: usize) -> Option<&SpellDefinition> {
        self.spells.get(slot)
    }

    pub fn len(&self) -> usize {
        self.spells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spells.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SpellDefinition> {
        self.spells.iter()
    }
}

impl Default for SpellCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_is_valid() {
        let catalog = SpellCatalog::builtin();
        assert!(catalog.validate().is_ok());
        assert_eq!(catalog.len(), MAX_SPELL_SLOTS);
    }

    #[test]
    fn test_slot_order_matches_hotkeys() {
        let catalog = SpellCatalog::builtin();
        assert_eq!(catalog.lookup(0).name, "Expelliarmus");
        assert_eq!(catalog.lookup(3).effect, SpellEffect::Shield);
        assert_eq!(catalog.lookup(6).effect, SpellEffect::Lethal);
        assert_eq!(catalog.lookup(9).name, "Sectumsempra");
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_lookup_out_of_range_panics() {
        SpellCatalog::builtin().lookup(10);
    }

    #[test]
    fn test_only_lethal_is_undodgeable() {
        assert!(!SpellEffect::Lethal.is_dodgeable());
        assert!(SpellEffect::Disarm.is_dodgeable());
        assert!(SpellEffect::Bleed.is_dodgeable());
    }

    #[test]
    fn test_negative_cooldown_is_rejected() {
        let mut spell = SpellCatalog::builtin().lookup(1).clone();
        spell.cooldown = -1.0;

        let err = SpellCatalog::new(vec![spell]).unwrap_err();
        assert!(err.contains("cooldown"), "unexpected error: {}", err);
    }

    #[test]
    fn test_too_many_slots_is_rejected() {
        let spell = SpellCatalog::builtin().lookup(1).clone();
        let spells = vec![spell; MAX_SPELL_SLOTS + 1];

        assert!(SpellCatalog::new(spells).is_err());
    }

    #[test]
    fn test_parse_ron_with_defaults() {
        let catalog = SpellCatalog::from_ron_str(
            r#"(spells: [(name: "Flipendo", color: (10, 20, 30), effect: None, projectile_speed: 600.0)])"#,
        )
        .expect("valid RON");

        let spell = catalog.lookup(0);
        assert_eq!(spell.name, "Flipendo");
        assert_eq!(spell.damage, 0.0);
        assert_eq!(spell.mana_cost, 0.0);
        assert_eq!(spell.projectile_speed, 600.0);
    }
}
