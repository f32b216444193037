//! Combat State
//!
//! Mutable state of one match: both combatants, the opponent's status timers,
//! per-slot cooldown stamps, and everything in flight (projectiles, dropped
//! wands, particles). A fresh `CombatState` is built for every match start,
//! which is how a restart clears projectiles, particles, drops and timers.
//!
//! All timestamps are match-clock seconds (`CombatState::clock`).

use bevy::math::Vec2;
use smallvec::SmallVec;
use std::fmt;

use super::constants::*;
use super::opponents::OpponentArchetype;
use super::particles::ParticlePool;

// ============================================================================
// Combatants
// ============================================================================

/// Which side of the duel something belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    Player,
    Opponent,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Combatant {
    pub position: Vec2,
    pub health: f32,
    pub max_health: f32,
    /// Only the player spends mana; the opponent's pool stays empty.
    pub mana: f32,
    pub max_mana: f32,
    pub shield_until: f32,
    pub stunned_until: f32,
    pub has_wand: bool,
}

impl Combatant {
    pub fn player() -> Self {
        Self {
            position: PLAYER_START,
            health: PLAYER_MAX_HEALTH,
            max_health: PLAYER_MAX_HEALTH,
            mana: PLAYER_MAX_MANA,
            max_mana: PLAYER_MAX_MANA,
            shield_until: 0.0,
            stunned_until: 0.0,
            has_wand: true,
        }
    }

    pub fn opponent(archetype: &OpponentArchetype) -> Self {
        Self {
            position: OPPONENT_START,
            health: archetype.max_health,
            max_health: archetype.max_health,
            mana: 0.0,
            max_mana: 0.0,
            shield_until: 0.0,
            stunned_until: 0.0,
            has_wand: true,
        }
    }

    /// Health at or below zero ends the match for this combatant.
    pub fn is_defeated(&self) -> bool {
        self.health <= 0.0
    }

    pub fn is_shielded(&self, now: f32) -> bool {
        self.shield_until > now
    }

    pub fn is_stunned(&self, now: f32) -> bool {
        self.stunned_until > now
    }

    /// Raw subtraction. Clamping happens in the snapshot, not here.
    pub fn take_damage(&mut self, amount: f32) {
        self.health -= amount;
    }

    /// Health as shown to the player: never negative, never above max.
    pub fn displayed_health(&self) -> f32 {
        self.health.clamp(0.0, self.max_health)
    }
}

/// Clamp a position into the opponent's half of the arena.
pub fn clamp_to_opponent_zone(position: Vec2) -> Vec2 {
    Vec2::new(
        position.x.clamp(OPPONENT_MIN_X, OPPONENT_MAX_X),
        position.y.clamp(OPPONENT_MIN_Y, OPPONENT_MAX_Y),
    )
}

// ============================================================================
// Damage Over Time
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DotKind {
    Burn,
    Bleed,
    Torment,
}

impl DotKind {
    pub const ALL: [DotKind; 3] = [DotKind::Burn, DotKind::Bleed, DotKind::Torment];

    pub fn damage_per_second(&self) -> f32 {
        match self {
            DotKind::Burn => BURN_DAMAGE_PER_SEC,
            DotKind::Bleed => BLEED_DAMAGE_PER_SEC,
            DotKind::Torment => TORMENT_DAMAGE_PER_SEC,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            DotKind::Burn => "Burn",
            DotKind::Bleed => "Bleed",
            DotKind::Torment => "Torment",
        }
    }
}

/// Independent expiry stamps for the opponent's damage-over-time effects.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StatusTimers {
    pub burn_until: f32,
    pub bleed_until: f32,
    pub torment_until: f32,
}

impl StatusTimers {
    /// Re-arming replaces the previous expiry.
    pub fn arm(&mut self, kind: DotKind, until: f32) {
        *self.slot_mut(kind) = until;
    }

    pub fn expires_at(&self, kind: DotKind) -> f32 {
        match kind {
            DotKind::Burn => self.burn_until,
            DotKind::Bleed => self.bleed_until,
            DotKind::Torment => self.torment_until,
        }
    }

    pub fn is_active(&self, kind: DotKind, now: f32) -> bool {
        now < self.expires_at(kind)
    }

    /// Effects still running at `now`, in a fixed order.
    pub fn active(&self, now: f32) -> SmallVec<[DotKind; 3]> {
        DotKind::ALL
            .into_iter()
            .filter(|kind| self.is_active(*kind, now))
            .collect()
    }

    fn slot_mut(&mut self, kind: DotKind) -> &mut f32 {
        match kind {
            DotKind::Burn => &mut self.burn_until,
            DotKind::Bleed => &mut self.bleed_until,
            DotKind::Torment => &mut self.torment_until,
        }
    }
}

// ============================================================================
// In-flight Objects
// ============================================================================

#[derive(Clone, Debug, PartialEq)]
pub struct Projectile {
    pub position: Vec2,
    /// Units per tick
    pub velocity: Vec2,
    /// Catalog slot of the spell that launched it
    pub slot: usize,
    /// Seconds left
    pub lifetime: f32,
}

/// A wand knocked out of a combatant's hand.
#[derive(Clone, Debug, PartialEq)]
pub struct WandDrop {
    pub position: Vec2,
    /// Units per tick
    pub velocity: Vec2,
    pub owner: Side,
    /// Seconds left
    pub lifetime: f32,
}

// ============================================================================
// Casting
// ============================================================================

/// Why a cast request was turned down.
#[derive(Clone, Debug, PartialEq)]
pub enum CastError {
    /// The slot was cast less than its cooldown ago.
    OnCooldown { spell: String, remaining: f32 },
    /// Not enough mana for the spell.
    InsufficientResource { spell: String, required: f32, available: f32 },
}

impl fmt::Display for CastError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CastError::OnCooldown { spell, .. } => write!(f, "{} is cooling down!", spell),
            CastError::InsufficientResource { .. } => write!(f, "Not enough mana!"),
        }
    }
}

impl std::error::Error for CastError {}

/// What an accepted cast did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CastOutcome {
    /// A shield went up on the caster.
    Shielded,
    /// A projectile is on its way.
    Launched,
    /// No travel time: the spell reached the opponent at once.
    Instant,
    /// Aimed at the wand tip itself: mana spent, cooldown stamped, nothing happens.
    Fizzled,
}

// ============================================================================
// Match State
// ============================================================================

#[derive(Clone, Debug)]
pub struct CombatState {
    /// Seconds since the match started
    pub clock: f32,
    pub player: Combatant,
    pub opponent: Combatant,
    /// Stats of the opponent bound to this match
    pub archetype: OpponentArchetype,
    pub timers: StatusTimers,
    /// Match-clock time each slot was last cast
    pub last_cast: Vec<f32>,
    pub selected_slot: usize,
    pub projectiles: Vec<Projectile>,
    pub wand_drops: Vec<WandDrop>,
    pub particles: ParticlePool,
}

impl CombatState {
    pub fn new(archetype: &OpponentArchetype, slot_count: usize) -> Self {
        Self {
            clock: 0.0,
            player: Combatant::player(),
            opponent: Combatant::opponent(archetype),
            archetype: archetype.clone(),
            timers: StatusTimers::default(),
            last_cast: vec![NEVER_CAST; slot_count],
            selected_slot: 0,
            projectiles: Vec::new(),
            wand_drops: Vec::new(),
            particles: ParticlePool::default(),
        }
    }

    pub fn combatant(&self, side: Side) -> &Combatant {
        match side {
            Side::Player => &self.player,
            Side::Opponent => &self.opponent,
        }
    }

    pub fn combatant_mut(&mut self, side: Side) -> &mut Combatant {
        match side {
            Side::Player => &mut self.player,
            Side::Opponent => &mut self.opponent,
        }
    }

    /// Seconds until `slot` is off cooldown (0 when ready).
    pub fn cooldown_remaining(&self, slot: usize, cooldown: f32) -> f32 {
        (cooldown - (self.clock - self.last_cast[slot])).max(0.0)
    }

    /// Where player projectiles leave from.
    pub fn cast_origin(&self) -> Vec2 {
        self.player.position + Vec2::new(CAST_ORIGIN_OFFSET, 0.0)
    }
}

// ============================================================================
// Session
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum MatchPhase {
    /// Menu: pick an opponent
    #[default]
    SelectingOpponent,
    InProgress,
    Concluded,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatchOutcome {
    Victory,
    Defeat,
}

/// State that outlives a single match.
#[derive(Clone, Debug, Default)]
pub struct Session {
    pub phase: MatchPhase,
    /// Name of the chosen archetype
    pub opponent: String,
    pub player_name: Option<String>,
    /// Wins across replays within this process
    pub wins: u32,
    /// Outcome of the last concluded match
    pub outcome: Option<MatchOutcome>,
    /// Latest human-readable status line
    pub message: String,
}
