//! Hit resolution
//!
//! Runs when a projectile comes within `HIT_RADIUS` of the opponent. The
//! opponent first gets a chance to dodge (and possibly counter); otherwise the
//! spell's effect is applied.

use bevy::log::debug;
use bevy::math::Vec2;

use super::constants::*;
use super::opponent_ai::{self, CounterAction, HitReaction};
use super::particles::Burst;
use super::rng::RandomSource;
use super::spells::SpellEffect;
use super::state::{clamp_to_opponent_zone, DotKind, Side, WandDrop};
use super::DuelEngine;
use crate::combat::log::CombatLogEventType;

impl<R: RandomSource> DuelEngine<R> {
    /// Resolve the spell in `slot` reaching the opponent.
    pub(crate) fn resolve_hit(&mut self, slot: usize) {
        let spell = self.spells.lookup(slot).clone();
        let now = self.combat.clock;
        let name = self.combat.archetype.name.clone();

        let reaction = opponent_ai::react_to_hit(&self.combat.archetype, spell.effect, &mut self.rng);
        if let HitReaction::Dodged { step, counter } = reaction {
            let opponent = &mut self.combat.opponent;
            opponent.position = clamp_to_opponent_zone(opponent.position + Vec2::new(step, 0.0));
            debug!("{} dodged {} (step {:+.0})", name, spell.name, step);
            self.announce(CombatLogEventType::Dodge, format!("{} dodged!", name));

            if let Some(action) = counter {
                self.apply_counter(action);
            }
            return;
        }

        let position = self.combat.opponent.position;
        match spell.effect {
            SpellEffect::Disarm => {
                if self.combat.opponent.has_wand {
                    self.combat.opponent.has_wand = false;
                    let drop_position = position + Vec2::new(self.rng.range(-6.0, 6.0), 10.0);
                    let velocity = Vec2::new(self.rng.range(-2.0, 2.0), self.rng.range(-4.0, -1.0));
                    self.combat.wand_drops.push(WandDrop {
                        position: drop_position,
                        velocity,
                        owner: Side::Opponent,
                        lifetime: WAND_DROP_LIFETIME,
                    });
                    self.announce(CombatLogEventType::Wand, format!("{} disarmed!", name));
                } else {
                    self.announce(
                        CombatLogEventType::Hit,
                        format!("{} has no wand to lose.", name),
                    );
                }
                self.combat.opponent.take_damage(DISARM_CHIP_DAMAGE);
            }
            SpellEffect::Stun => {
                let opponent = &mut self.combat.opponent;
                opponent.take_damage(spell.damage);
                opponent.stunned_until = now + spell.duration;
                opponent.position.x -= STUN_KNOCKBACK;
                self.announce(CombatLogEventType::StatusApplied, format!("{} stunned!", name));
            }
            SpellEffect::Petrify => {
                self.combat.opponent.stunned_until = now + spell.duration;
                self.announce(CombatLogEventType::StatusApplied, format!("{} petrified!", name));
            }
            SpellEffect::Incapacitate => {
                let opponent = &mut self.combat.opponent;
                opponent.stunned_until = now + spell.duration;
                opponent.take_damage(spell.damage);
                self.announce(
                    CombatLogEventType::StatusApplied,
                    format!("{} is incapacitated!", name),
                );
            }
            SpellEffect::Burn => {
                self.apply_damage_over_time(DotKind::Burn, now + spell.duration, spell.damage);
                self.announce(CombatLogEventType::StatusApplied, format!("{} is burning!", name));
            }
            SpellEffect::Torment => {
                self.apply_damage_over_time(DotKind::Torment, now + spell.duration, spell.damage);
                self.announce(CombatLogEventType::StatusApplied, format!("{} writhes in pain!", name));
            }
            SpellEffect::Bleed => {
                self.apply_damage_over_time(DotKind::Bleed, now + spell.duration, spell.damage);
                self.combat
                    .particles
                    .spawn_burst(position, BLOOD, Burst::new(BLEED_BURST), &mut self.rng);
                self.announce(CombatLogEventType::StatusApplied, format!("{} is bleeding!", name));
            }
            SpellEffect::Explode => {
                self.combat.opponent.take_damage(spell.damage);
                self.combat
                    .particles
                    .spawn_burst(position, ORANGE, Burst::new(EXPLODE_BURST), &mut self.rng);
                self.announce(CombatLogEventType::Hit, format!("{}!", spell.name));
            }
            SpellEffect::Lethal => {
                self.combat
                    .particles
                    .spawn_burst(position, AVADA_GREEN, Burst::new(LETHAL_BURST), &mut self.rng);
                self.combat.opponent.health = 0.0;
                self.announce(CombatLogEventType::Hit, format!("{}!", spell.name));
            }
            SpellEffect::Shield | SpellEffect::None => {
                self.combat.opponent.take_damage(spell.damage);
                self.announce(
                    CombatLogEventType::Hit,
                    format!("{} hits {}.", spell.name, name),
                );
            }
        }
    }

    /// Arm a damage-over-time effect and deal the spell's initial damage.
    fn apply_damage_over_time(&mut self, kind: DotKind, until: f32, damage: f32) {
        self.combat.timers.arm(kind, until);
        self.combat.opponent.take_damage(damage);
        debug!("{} armed until {:.2}", kind.name(), until);
    }

    fn apply_counter(&mut self, action: CounterAction) {
        let now = self.combat.clock;
        let name = self.side_label(Side::Opponent);

        match action {
            CounterAction::Shield => {
                self.combat.opponent.shield_until = now + COUNTER_SHIELD_DURATION;
                let position = self.combat.opponent.position;
                self.combat
                    .particles
                    .spawn_burst(position, CYAN, Burst::new(COUNTER_SHIELD_BURST), &mut self.rng);
            }
            CounterAction::Stun => {
                let player = &mut self.combat.player;
                player.stunned_until = now + COUNTER_STUN_DURATION;
                player.take_damage(COUNTER_STUN_DAMAGE);
                let position = player.position;
                self.combat
                    .particles
                    .spawn_burst(position, CYAN, Burst::new(COUNTER_STUN_BURST), &mut self.rng);
            }
        }

        self.announce(
            CombatLogEventType::Counter,
            format!("{} cast {}!", name, action.spell_name()),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::duel::{OpponentRoster, SequenceRng, SpellCatalog};

    const EXPELLIARMUS: usize = 0;

    fn engine(rng: SequenceRng) -> DuelEngine<SequenceRng> {
        let mut engine = DuelEngine::new(SpellCatalog::builtin(), OpponentRoster::builtin(), rng);
        engine.start_match("Voldemort");
        engine
    }

    #[test]
    fn test_disarm_drops_wand_once() {
        // 0.5 fails Voldemort's dodge roll and centres every range roll
        let mut engine = engine(SequenceRng::constant(0.5));
        let start = engine.combat().opponent.position;

        engine.resolve_hit(EXPELLIARMUS);

        let combat = engine.combat();
        assert!(!combat.opponent.has_wand);
        assert_eq!(combat.opponent.health, 150.0 - DISARM_CHIP_DAMAGE);
        assert_eq!(combat.wand_drops.len(), 1);
        assert_eq!(combat.wand_drops[0].position, start + Vec2::new(0.0, 10.0));
        assert_eq!(combat.wand_drops[0].velocity, Vec2::new(0.0, -2.5));
        assert_eq!(combat.wand_drops[0].owner, Side::Opponent);
        assert_eq!(engine.message(), "Voldemort disarmed!");

        // Already unarmed: chip damage only
        engine.resolve_hit(EXPELLIARMUS);
        assert_eq!(engine.combat().wand_drops.len(), 1);
        assert_eq!(engine.combat().opponent.health, 150.0 - 2.0 * DISARM_CHIP_DAMAGE);
    }

    #[test]
    fn test_stun_knocks_back_without_clamping() {
        let mut engine = engine(SequenceRng::constant(0.5));
        engine.combat_mut().opponent.position.x = OPPONENT_MIN_X;
        engine.combat_mut().clock = 2.0;

        engine.resolve_hit(1);

        let opponent = &engine.combat().opponent;
        assert_eq!(opponent.position.x, OPPONENT_MIN_X - STUN_KNOCKBACK);
        assert_eq!(opponent.stunned_until, 3.0);
        assert_eq!(opponent.health, 150.0 - 12.0);
    }

    #[test]
    fn test_petrify_deals_no_damage() {
        let mut engine = engine(SequenceRng::constant(0.5));
        engine.resolve_hit(4);

        assert_eq!(engine.combat().opponent.health, 150.0);
        assert!(engine.combat().opponent.is_stunned(1.9));
    }

    #[test]
    fn test_dodge_is_clamped_to_zone() {
        // dodge roll passes, step right, counter roll fails
        let mut engine = engine(SequenceRng::new(vec![0.01, 0.9, 0.9]));
        engine.combat_mut().opponent.position.x = OPPONENT_MAX_X - 10.0;

        engine.resolve_hit(1);

        let opponent = &engine.combat().opponent;
        assert_eq!(opponent.position.x, OPPONENT_MAX_X);
        assert_eq!(opponent.health, 150.0);
        assert_eq!(engine.message(), "Voldemort dodged!");
    }
}
