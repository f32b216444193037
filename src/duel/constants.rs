//! Duel Constants
//!
//! Centralized location for the tuning numbers of the duel simulation.
//! Distances are in arena units (screen pixels of the 1280x720 arena, y down),
//! times in seconds.

use bevy::math::Vec2;

// ============================================================================
// Arena
// ============================================================================

/// Arena width in units.
pub const ARENA_WIDTH: f32 = 1280.0;

/// Arena height in units.
pub const ARENA_HEIGHT: f32 = 720.0;

/// The opponent is kept inside the right-hand region of the arena.
pub const OPPONENT_MIN_X: f32 = ARENA_WIDTH * 0.55;
pub const OPPONENT_MAX_X: f32 = ARENA_WIDTH - 80.0;
pub const OPPONENT_MIN_Y: f32 = 80.0;
pub const OPPONENT_MAX_Y: f32 = ARENA_HEIGHT - 80.0;

/// Player start position.
pub const PLAYER_START: Vec2 = Vec2::new(ARENA_WIDTH * 0.18, ARENA_HEIGHT / 2.0);

/// Opponent start position.
pub const OPPONENT_START: Vec2 = Vec2::new(ARENA_WIDTH * 0.82, ARENA_HEIGHT / 2.0);

// ============================================================================
// Timing
// ============================================================================

/// Tick rate that projectile speeds are divided by at spawn.
///
/// Projectile velocities are stored in units per tick and added once per tick
/// without `dt` scaling. Moving to per-second integration only needs this
/// constant and the projectile advance to change.
pub const ASSUMED_TICK_RATE: f32 = 60.0;

/// Sentinel for "never cast" so every slot starts off cooldown.
pub const NEVER_CAST: f32 = -9999.0;

// ============================================================================
// Player
// ============================================================================

pub const PLAYER_MAX_HEALTH: f32 = 100.0;
pub const PLAYER_MAX_MANA: f32 = 100.0;

/// Mana regenerated per second.
pub const MANA_REGEN_PER_SEC: f32 = 8.0;

/// Projectiles leave from the wand tip, this far right of the player.
pub const CAST_ORIGIN_OFFSET: f32 = 20.0;

// ============================================================================
// Projectiles & Drops
// ============================================================================

/// A projectile closer than this to the opponent hits.
pub const HIT_RADIUS: f32 = 46.0;

/// Seconds a projectile lives before fizzling out.
pub const PROJECTILE_LIFETIME: f32 = 3.0;

/// A dropped wand closer than this to its owner is picked up.
pub const PICKUP_RADIUS: f32 = 36.0;

/// Added to a dropped wand's vertical velocity every tick.
pub const WAND_GRAVITY: f32 = 0.12;

/// Seconds a dropped wand stays on the floor.
pub const WAND_DROP_LIFETIME: f32 = 12.0;

// ============================================================================
// Effects
// ============================================================================

/// Flat damage of a disarm hit, wand or no wand.
pub const DISARM_CHIP_DAMAGE: f32 = 4.0;

/// Stun hits push the opponent back toward the player by this much.
pub const STUN_KNOCKBACK: f32 = 30.0;

pub const BURN_DAMAGE_PER_SEC: f32 = 6.0;
pub const BLEED_DAMAGE_PER_SEC: f32 = 3.0;
pub const TORMENT_DAMAGE_PER_SEC: f32 = 4.0;

/// Per-tick chance that a burning opponent sheds an ember.
pub const BURN_EMBER_CHANCE: f32 = 0.4;

/// Per-tick chance that a bleeding opponent drips.
pub const BLEED_DRIP_CHANCE: f32 = 0.2;

// ============================================================================
// Opponent Behaviour
// ============================================================================

/// Sideways step taken on a successful dodge.
pub const DODGE_STEP: f32 = 60.0;

/// Per-tick chance that an unstunned opponent shuffles around.
pub const WANDER_CHANCE: f32 = 0.018;
pub const WANDER_JITTER_X: f32 = 28.0;
pub const WANDER_JITTER_Y: f32 = 20.0;

/// Share of counters that are a shield rather than a stun.
pub const COUNTER_SHIELD_CHANCE: f32 = 0.6;
pub const COUNTER_SHIELD_DURATION: f32 = 1.2;
pub const COUNTER_STUN_DURATION: f32 = 0.9;
pub const COUNTER_STUN_DAMAGE: f32 = 6.0;

// ============================================================================
// Cosmetic Particles
// ============================================================================

/// Hard cap on live particles.
pub const PARTICLE_LIMIT: usize = 1400;

/// Per-tick velocity multiplier for particles.
pub const PARTICLE_DAMPING: f32 = 0.98;

pub const CAST_BURST: usize = 6;
pub const IMPACT_BURST: usize = 20;
pub const SHIELD_BURST: usize = 24;
pub const EXPLODE_BURST: usize = 36;
pub const LETHAL_BURST: usize = 120;
pub const BLEED_BURST: usize = 12;
pub const COUNTER_SHIELD_BURST: usize = 18;
pub const COUNTER_STUN_BURST: usize = 12;

// ============================================================================
// Palette (RGB)
// ============================================================================

pub const CYAN: [u8; 3] = [70, 200, 220];
pub const ORANGE: [u8; 3] = [255, 140, 0];
pub const AVADA_GREEN: [u8; 3] = [10, 255, 80];
pub const BLOOD: [u8; 3] = [150, 10, 10];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opponent_zone_is_inside_arena() {
        assert!(OPPONENT_MIN_X < OPPONENT_MAX_X);
        assert!(OPPONENT_MIN_Y < OPPONENT_MAX_Y);
        assert!(OPPONENT_MAX_X < ARENA_WIDTH);
        assert!(OPPONENT_MAX_Y < ARENA_HEIGHT);
    }

    #[test]
    fn test_opponent_starts_inside_its_zone() {
        assert!((OPPONENT_MIN_X..=OPPONENT_MAX_X).contains(&OPPONENT_START.x));
        assert!((OPPONENT_MIN_Y..=OPPONENT_MAX_Y).contains(&OPPONENT_START.y));
    }

    #[test]
    fn test_counter_split_is_a_probability() {
        assert!(COUNTER_SHIELD_CHANCE > 0.0 && COUNTER_SHIELD_CHANCE < 1.0);
    }
}
