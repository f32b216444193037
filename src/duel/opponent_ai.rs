//! Opponent AI
//!
//! Every decision the opponent makes lives here, as plain functions of the
//! archetype and a [`RandomSource`]:
//!
//! - **Hit reaction**: dodge roll (skipped for lethal spells), dodge direction,
//!   and whether to counter after a dodge
//! - **Counter choice**: a fixed 60/40 split between a shield and a stun
//! - **Idle wander**: an occasional shuffle while not stunned
//!
//! The engine applies the decisions; nothing here mutates match state.

use bevy::math::Vec2;

use super::constants::*;
use super::opponents::OpponentArchetype;
use super::rng::RandomSource;
use super::spells::SpellEffect;

/// The opponent's answer to a dodge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CounterAction {
    /// Raise a short shield
    Shield,
    /// Stun the player and chip their health
    Stun,
}

impl CounterAction {
    /// Spell name used in status messages.
    pub fn spell_name(&self) -> &'static str {
        match self {
            CounterAction::Shield => "Protego",
            CounterAction::Stun => "Stupefy",
        }
    }
}

/// How the opponent takes an incoming projectile.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HitReaction {
    /// Sidestep by `step` on x; optionally counter.
    Dodged {
        step: f32,
        counter: Option<CounterAction>,
    },
    /// The spell lands.
    Struck,
}

/// Decide how the opponent reacts to a projectile reaching it.
pub fn react_to_hit(
    archetype: &OpponentArchetype,
    effect: SpellEffect,
    rng: &mut impl RandomSource,
) -> HitReaction {
    if !effect.is_dodgeable() || !rng.chance(archetype.dodge_chance) {
        return HitReaction::Struck;
    }

    let step = rng.sign() * DODGE_STEP;
    let counter = if rng.chance(archetype.counter_chance) {
        Some(choose_counter(rng))
    } else {
        None
    };

    HitReaction::Dodged { step, counter }
}

/// Pick exactly one counter action.
pub fn choose_counter(rng: &mut impl RandomSource) -> CounterAction {
    if rng.chance(COUNTER_SHIELD_CHANCE) {
        CounterAction::Shield
    } else {
        CounterAction::Stun
    }
}

/// Offset for this tick's idle shuffle, if the opponent moves at all.
///
/// Stunned opponents stand still.
pub fn idle_wander(stunned: bool, rng: &mut impl RandomSource) -> Option<Vec2> {
    if stunned || !rng.chance(WANDER_CHANCE) {
        return None;
    }

    let dx = rng.range(-WANDER_JITTER_X, WANDER_JITTER_X);
    let dy = rng.range(-WANDER_JITTER_Y, WANDER_JITTER_Y);
    Some(Vec2::new(dx, dy))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::duel::rng::SequenceRng;

    fn archetype(dodge: f32, counter: f32) -> OpponentArchetype {
        OpponentArchetype::new("Training Dummy", [128, 128, 128], 100.0, dodge, counter)
    }

    #[test]
    fn test_lethal_is_never_dodged() {
        let mut rng = SequenceRng::constant(0.0);
        let reaction = react_to_hit(&archetype(1.0, 1.0), SpellEffect::Lethal, &mut rng);
        assert_eq!(reaction, HitReaction::Struck);
    }

    #[test]
    fn test_zero_dodge_always_struck() {
        let mut rng = SequenceRng::new(vec![0.0, 0.5, 0.99]);
        for _ in 0..10 {
            let reaction = react_to_hit(&archetype(0.0, 1.0), SpellEffect::Stun, &mut rng);
            assert_eq!(reaction, HitReaction::Struck);
        }
    }

    #[test]
    fn test_dodge_without_counter() {
        // dodge roll, direction roll (right), counter roll fails
        let mut rng = SequenceRng::new(vec![0.05, 0.7, 0.9]);
        let reaction = react_to_hit(&archetype(0.1, 0.2), SpellEffect::Burn, &mut rng);

        assert_eq!(
            reaction,
            HitReaction::Dodged {
                step: DODGE_STEP,
                counter: None
            }
        );
    }

    #[test]
    fn test_dodge_with_counter() {
        // dodge roll, direction roll (left), counter roll, counter choice (stun)
        let mut rng = SequenceRng::new(vec![0.05, 0.2, 0.1, 0.8]);
        let reaction = react_to_hit(&archetype(0.1, 0.2), SpellEffect::Disarm, &mut rng);

        assert_eq!(
            reaction,
            HitReaction::Dodged {
                step: -DODGE_STEP,
                counter: Some(CounterAction::Stun)
            }
        );
    }

    #[test]
    fn test_counter_split() {
        assert_eq!(choose_counter(&mut SequenceRng::constant(0.59)), CounterAction::Shield);
        assert_eq!(choose_counter(&mut SequenceRng::constant(0.6)), CounterAction::Stun);
    }

    #[test]
    fn test_wander_respects_stun_and_chance() {
        assert_eq!(idle_wander(true, &mut SequenceRng::constant(0.0)), None);
        assert_eq!(idle_wander(false, &mut SequenceRng::constant(0.5)), None);

        // chance roll passes, then the x and y rolls
        let offset = idle_wander(false, &mut SequenceRng::new(vec![0.0, 0.75, 0.25]))
            .expect("should wander");
        assert_eq!(offset, Vec2::new(14.0, -10.0));
    }
}
