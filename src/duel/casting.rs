//! Cast requests
//!
//! Gating order: cooldown first, then mana. A rejected request changes
//! nothing except the status line. An accepted request always spends mana and
//! stamps the slot's cooldown, even if the aim point turns out to be
//! degenerate and nothing is launched.
//!
//! Spells with a travel speed of 0 skip the projectile and resolve against
//! the opponent immediately, wherever the player aimed.

use bevy::log::debug;
use bevy::math::Vec2;

use super::constants::*;
use super::particles::Burst;
use super::rng::RandomSource;
use super::state::{CastError, CastOutcome, Projectile};
use super::DuelEngine;
use crate::combat::log::CombatLogEventType;

impl<R: RandomSource> DuelEngine<R> {
    /// Ask to cast the spell in `slot` toward `aim` at match time `now`.
    ///
    /// Panics if `slot` is outside the catalog.
    pub fn request_cast(
        &mut self,
        slot: usize,
        aim: Vec2,
        now: f32,
    ) -> Result<CastOutcome, CastError> {
        let spell = self.spells.lookup(slot).clone();

        let since_last = now - self.combat.last_cast[slot];
        if since_last < spell.cooldown {
            return Err(self.reject(CastError::OnCooldown {
                spell: spell.name,
                remaining: spell.cooldown - since_last,
            }));
        }

        let available = self.combat.player.mana;
        if available < spell.mana_cost {
            return Err(self.reject(CastError::InsufficientResource {
                spell: spell.name,
                required: spell.mana_cost,
                available,
            }));
        }

        self.combat.player.mana -= spell.mana_cost;
        self.combat.last_cast[slot] = now;

        if spell.is_self_cast() {
            self.combat.player.shield_until = now + spell.duration;
            let origin = self.combat.player.position;
            self.combat
                .particles
                .spawn_burst(origin, CYAN, Burst::new(SHIELD_BURST), &mut self.rng);
            self.announce(CombatLogEventType::Cast, format!("{}!", spell.name));
            return Ok(CastOutcome::Shielded);
        }

        let origin = self.combat.cast_origin();
        if spell.is_instant() {
            self.combat
                .particles
                .spawn_burst(origin, spell.color, Burst::new(CAST_BURST), &mut self.rng);
            self.announce(CombatLogEventType::Cast, format!("Cast {}.", spell.name));

            let target = self.combat.opponent.position;
            self.resolve_hit(slot);
            self.combat
                .particles
                .spawn_burst(target, spell.color, Burst::new(IMPACT_BURST), &mut self.rng);
            return Ok(CastOutcome::Instant);
        }

        let offset = aim - origin;
        let distance = offset.length();
        if distance == 0.0 {
            debug!("{} aimed at the wand tip, nothing launched", spell.name);
            self.announce(CombatLogEventType::Cast, format!("{} fizzles.", spell.name));
            return Ok(CastOutcome::Fizzled);
        }

        let velocity = offset / distance * (spell.projectile_speed / ASSUMED_TICK_RATE);
        self.combat.projectiles.push(Projectile {
            position: origin,
            velocity,
            slot,
            lifetime: PROJECTILE_LIFETIME,
        });
        self.combat
            .particles
            .spawn_burst(origin, spell.color, Burst::new(CAST_BURST), &mut self.rng);
        self.announce(CombatLogEventType::Cast, format!("Cast {}.", spell.name));

        Ok(CastOutcome::Launched)
    }

    /// Cast the currently selected slot at the current match time.
    pub fn cast_selected(&mut self, aim: Vec2) -> Result<CastOutcome, CastError> {
        let slot = self.combat.selected_slot;
        let now = self.combat.clock;
        self.request_cast(slot, aim, now)
    }

    fn reject(&mut self, error: CastError) -> CastError {
        debug!("Cast rejected: {:?}", error);
        self.session.message = error.to_string();
        error
    }
}
