//! Per-tick simulation
//!
//! Velocities are per tick (spawned as `speed / ASSUMED_TICK_RATE`) and are
//! added undamped each tick; only lifetimes and timers use `dt`. Running the
//! tick at a rate other than 60 Hz therefore changes travel speed but not how
//! long things live.

use bevy::log::info;
use bevy::math::Vec2;

use super::constants::*;
use super::opponent_ai;
use super::particles::Burst;
use super::rng::RandomSource;
use super::state::{clamp_to_opponent_zone, DotKind, MatchOutcome, MatchPhase};
use super::DuelEngine;
use crate::combat::log::CombatLogEventType;

impl<R: RandomSource> DuelEngine<R> {
    /// Advance the match by `dt` seconds. Does nothing unless a match is running.
    pub fn tick(&mut self, dt: f32) {
        if self.session.phase != MatchPhase::InProgress {
            return;
        }

        self.combat.clock += dt;
        let now = self.combat.clock;

        self.regenerate_mana(dt);
        self.advance_projectiles(dt);
        self.combat.particles.update(dt);
        self.advance_wand_drops(dt);
        self.tick_damage_over_time(dt, now);
        self.wander(now);
        self.check_match_end();
    }

    fn regenerate_mana(&mut self, dt: f32) {
        let player = &mut self.combat.player;
        player.mana = (player.mana + MANA_REGEN_PER_SEC * dt).min(player.max_mana);
    }

    /// Move every projectile; expire or resolve the ones that are done.
    fn advance_projectiles(&mut self, dt: f32) {
        let projectiles = std::mem::take(&mut self.combat.projectiles);
        let mut in_flight = Vec::with_capacity(projectiles.len());

        for mut projectile in projectiles {
            projectile.position += projectile.velocity;
            projectile.lifetime -= dt;
            if projectile.lifetime <= 0.0 {
                continue;
            }

            if projectile.position.distance(self.combat.opponent.position) < HIT_RADIUS {
                self.resolve_hit(projectile.slot);
                let color = self.spells.lookup(projectile.slot).color;
                self.combat.particles.spawn_burst(
                    projectile.position,
                    color,
                    Burst::new(IMPACT_BURST),
                    &mut self.rng,
                );
                continue;
            }

            in_flight.push(projectile);
        }

        self.combat.projectiles = in_flight;
    }

    /// Fall, expire, or get picked up by the owner.
    fn advance_wand_drops(&mut self, dt: f32) {
        let drops = std::mem::take(&mut self.combat.wand_drops);
        let mut remaining = Vec::with_capacity(drops.len());

        for mut drop in drops {
            drop.position += drop.velocity;
            drop.velocity.y += WAND_GRAVITY;
            drop.lifetime -= dt;
            if drop.lifetime <= 0.0 {
                continue;
            }

            let owner = self.combat.combatant(drop.owner).position;
            if drop.position.distance(owner) < PICKUP_RADIUS {
                self.combat.combatant_mut(drop.owner).has_wand = true;
                let who = self.side_label(drop.owner);
                self.announce(
                    CombatLogEventType::Wand,
                    format!("{} picked up their wand.", who),
                );
                continue;
            }

            remaining.push(drop);
        }

        self.combat.wand_drops = remaining;
    }

    fn tick_damage_over_time(&mut self, dt: f32, now: f32) {
        for kind in self.combat.timers.active(now) {
            self.combat.opponent.take_damage(kind.damage_per_second() * dt);

            let (chance, spread, color, burst) = match kind {
                DotKind::Burn => (BURN_EMBER_CHANCE, 12.0, ORANGE, Burst::ember()),
                DotKind::Bleed => (BLEED_DRIP_CHANCE, 8.0, BLOOD, Burst::drip()),
                DotKind::Torment => continue,
            };
            if self.rng.chance(chance) {
                let jitter = Vec2::new(
                    self.rng.range(-spread, spread),
                    self.rng.range(-spread, spread),
                );
                let origin = self.combat.opponent.position + jitter;
                self.combat.particles.spawn_burst(origin, color, burst, &mut self.rng);
            }
        }
    }

    fn wander(&mut self, now: f32) {
        let stunned = self.combat.opponent.stunned_until >= now;
        if let Some(offset) = opponent_ai::idle_wander(stunned, &mut self.rng) {
            let opponent = &mut self.combat.opponent;
            opponent.position = clamp_to_opponent_zone(opponent.position + offset);
        }
    }

    /// Opponent defeat is checked first, so a double knockout is a win.
    fn check_match_end(&mut self) {
        let outcome = if self.combat.opponent.is_defeated() {
            MatchOutcome::Victory
        } else if self.combat.player.is_defeated() {
            MatchOutcome::Defeat
        } else {
            return;
        };

        self.session.phase = MatchPhase::Concluded;
        self.session.outcome = Some(outcome);

        let opponent = self.combat.archetype.name.clone();
        let message = match outcome {
            MatchOutcome::Victory => {
                self.session.wins += 1;
                format!("You defeated {}!", opponent)
            }
            MatchOutcome::Defeat => format!("You were defeated by {}.", opponent),
        };

        info!(
            "Duel over after {:.2}s: {:?} against {} (wins: {})",
            self.combat.clock, outcome, opponent, self.session.wins
        );
        self.announce(CombatLogEventType::MatchEvent, message);
    }
}
