//! Read-only view of the duel for presentation.
//!
//! Built after each tick. Health is clamped to `[0, max]` here; the
//! underlying state keeps the raw (possibly negative) value.

use bevy::math::Vec2;
use smallvec::SmallVec;

use super::particles::Particle;
use super::rng::RandomSource;
use super::state::{Combatant, DotKind, MatchOutcome, MatchPhase, WandDrop};
use super::DuelEngine;

#[derive(Clone, Debug, PartialEq)]
pub struct CombatantView {
    pub position: Vec2,
    pub health: f32,
    pub max_health: f32,
    pub mana: f32,
    pub max_mana: f32,
    pub shielded: bool,
    pub stunned: bool,
    pub has_wand: bool,
}

impl CombatantView {
    fn new(combatant: &Combatant, now: f32) -> Self {
        Self {
            position: combatant.position,
            health: combatant.displayed_health(),
            max_health: combatant.max_health,
            mana: combatant.mana,
            max_mana: combatant.max_mana,
            shielded: combatant.is_shielded(now),
            stunned: combatant.is_stunned(now),
            has_wand: combatant.has_wand,
        }
    }

    pub fn health_fraction(&self) -> f32 {
        if self.max_health > 0.0 {
            self.health / self.max_health
        } else {
            0.0
        }
    }
}

/// One hotbar entry.
#[derive(Clone, Debug, PartialEq)]
pub struct SpellSlotView<'a> {
    pub name: &'a str,
    pub color: [u8; 3],
    pub mana_cost: f32,
    pub cooldown: f32,
    pub cooldown_remaining: f32,
    pub selected: bool,
    pub affordable: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectileView {
    pub position: Vec2,
    pub color: [u8; 3],
}

#[derive(Clone, Debug)]
pub struct DuelSnapshot<'a> {
    pub phase: MatchPhase,
    pub outcome: Option<MatchOutcome>,
    pub clock: f32,
    pub player_name: &'a str,
    pub opponent_name: &'a str,
    pub opponent_color: [u8; 3],
    pub player: CombatantView,
    pub opponent: CombatantView,
    /// Damage-over-time effects running on the opponent
    pub opponent_effects: SmallVec<[DotKind; 3]>,
    pub spells: Vec<SpellSlotView<'a>>,
    pub projectiles: Vec<ProjectileView>,
    pub particles: &'a [Particle],
    pub wand_drops: &'a [WandDrop],
    pub message: &'a str,
    pub wins: u32,
}

impl<R: RandomSource> DuelEngine<R> {
    pub fn snapshot(&self) -> DuelSnapshot<'_> {
        let combat = &self.combat;
        let now = combat.clock;

        // In the menu the selection may differ from the last match's archetype.
        let opponent_color = self
            .roster
            .archetype(&self.session.opponent)
            .map_or(combat.archetype.color, |archetype| archetype.color);

        let spells = self
            .spells
            .iter()
            .enumerate()
            .map(|(slot, spell)| SpellSlotView {
                name: &spell.name,
                color: spell.color,
                mana_cost: spell.mana_cost,
                cooldown: spell.cooldown,
                cooldown_remaining: combat.cooldown_remaining(slot, spell.cooldown),
                selected: slot == combat.selected_slot,
                affordable: combat.player.mana >= spell.mana_cost,
            })
            .collect();

        let projectiles = combat
            .projectiles
            .iter()
            .map(|projectile| ProjectileView {
                position: projectile.position,
                color: self.spells.lookup(projectile.slot).color,
            })
            .collect();

        DuelSnapshot {
            phase: self.session.phase,
            outcome: self.session.outcome,
            clock: now,
            player_name: self.player_label(),
            opponent_name: &self.session.opponent,
            opponent_color,
            player: CombatantView::new(&combat.player, now),
            opponent: CombatantView::new(&combat.opponent, now),
            opponent_effects: combat.timers.active(now),
            spells,
            projectiles,
            particles: combat.particles.as_slice(),
            wand_drops: &combat.wand_drops,
            message: &self.session.message,
            wins: self.session.wins,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::duel::{OpponentRoster, SequenceRng, SpellCatalog};

    #[test]
    fn test_snapshot_clamps_health_and_tracks_cooldowns() {
        let mut engine = DuelEngine::new(
            SpellCatalog::builtin(),
            OpponentRoster::builtin(),
            SequenceRng::constant(0.5),
        );
        engine.start_match("Bellatrix");
        engine.combat_mut().opponent.health = -40.0;
        engine.combat_mut().clock = 1.0;
        engine.combat_mut().last_cast[2] = 0.5;

        let snapshot = engine.snapshot();

        assert_eq!(snapshot.opponent.health, 0.0);
        assert_eq!(snapshot.opponent.max_health, 120.0);
        assert_eq!(snapshot.spells.len(), 10);
        assert_eq!(snapshot.spells[2].cooldown_remaining, 1.5);
        assert_eq!(snapshot.spells[0].cooldown_remaining, 0.0);
        assert!(snapshot.spells[0].selected);
        assert_eq!(snapshot.opponent_name, "Bellatrix");
        assert_eq!(snapshot.player_name, "You");
    }
}
