//! Duel Engine
//!
//! Real-time simulation of a spell duel between the player and one
//! computer-controlled opponent.
//!
//! ## Data flow
//! Input from the presentation layer (cast requests, slot selection, match
//! start) mutates the engine, [`DuelEngine::tick`] advances the simulation by
//! one frame, and the presentation layer reads a [`DuelSnapshot`] afterwards.
//! The engine never calls back into the presentation layer.
//!
//! ## Tick order
//! 1. Mana regeneration
//! 2. Projectile advance and hit resolution
//! 3. Cosmetic particle advance
//! 4. Dropped wand physics and pickup
//! 5. Damage over time
//! 6. Opponent idle wander
//! 7. Match end check
//!
//! ## Modules
//! - `spells` / `opponents`: immutable catalogs injected at construction
//! - `state`: combatants, timers, projectiles, session
//! - `casting`: cast requests and their gating
//! - `step`: the per-tick update
//! - `hit`: what happens when a projectile reaches the opponent
//! - `opponent_ai`: every random decision the opponent makes
//! - `particles`: bounded cosmetic particle pool
//! - `snapshot`: read-only view for rendering

pub mod casting;
pub mod constants;
pub mod hit;
pub mod opponent_ai;
pub mod opponents;
pub mod particles;
pub mod rng;
pub mod snapshot;
pub mod spells;
pub mod state;
pub mod step;

pub use opponents::{OpponentArchetype, OpponentRoster};
pub use rng::{GameRng, RandomSource, SequenceRng};
pub use snapshot::{CombatantView, DuelSnapshot, ProjectileView, SpellSlotView};
pub use spells::{SpellCatalog, SpellDefinition, SpellEffect};
pub use state::{
    CastError, CastOutcome, Combatant, CombatState, DotKind, MatchOutcome, MatchPhase, Session,
    Side,
};

use bevy::log::info;

use crate::combat::log::{CombatLog, CombatLogEventType};

/// Status line shown before the first match.
pub const MENU_MESSAGE: &str = "Choose your opponent.";

/// The whole duel: catalogs, session, current match and its log.
pub struct DuelEngine<R: RandomSource = GameRng> {
    spells: SpellCatalog,
    roster: OpponentRoster,
    rng: R,
    session: Session,
    combat: CombatState,
    log: CombatLog,
}

impl DuelEngine<GameRng> {
    /// Engine over the built-in spells and roster.
    pub fn with_builtin_catalogs(rng: GameRng) -> Self {
        Self::new(SpellCatalog::builtin(), OpponentRoster::builtin(), rng)
    }
}

impl<R: RandomSource> DuelEngine<R> {
    /// Start in the opponent-selection phase with the roster's first archetype chosen.
    pub fn new(spells: SpellCatalog, roster: OpponentRoster, rng: R) -> Self {
        let first = roster.first().clone();
        let combat = CombatState::new(&first, spells.len());

        Self {
            session: Session {
                opponent: first.name,
                message: MENU_MESSAGE.to_string(),
                ..Default::default()
            },
            spells,
            roster,
            rng,
            combat,
            log: CombatLog::default(),
        }
    }

    // ------------------------------------------------------------------------
    // Match phase
    // ------------------------------------------------------------------------

    /// Choose the next opponent. Only honoured outside a running match.
    ///
    /// Returns false for unknown names or while a match is in progress.
    pub fn select_opponent(&mut self, name: &str) -> bool {
        if self.session.phase == MatchPhase::InProgress || self.roster.archetype(name).is_none() {
            return false;
        }
        self.session.opponent = name.to_string();
        true
    }

    /// Move the selection to the next archetype in roster order.
    pub fn cycle_opponent(&mut self) -> &str {
        if self.session.phase != MatchPhase::InProgress {
            self.session.opponent = self.roster.next_after(&self.session.opponent).name.clone();
        }
        &self.session.opponent
    }

    /// Begin a fresh match against `archetype_name`.
    ///
    /// Everything match-scoped is reset; the win counter and player name
    /// survive. Panics if the archetype is not in the roster.
    pub fn start_match(&mut self, archetype_name: &str) {
        let archetype = self.roster.archetype_unchecked(archetype_name).clone();

        self.combat = CombatState::new(&archetype, self.spells.len());
        self.log.clear();
        self.session.opponent = archetype.name.clone();
        self.session.phase = MatchPhase::InProgress;
        self.session.outcome = None;

        info!(
            "Duel started: {} vs {} ({:.0} HP, {:.0}% dodge, {:.0}% counter)",
            self.player_label(),
            archetype.name,
            archetype.max_health,
            archetype.dodge_chance * 100.0,
            archetype.counter_chance * 100.0
        );
        self.announce(
            CombatLogEventType::MatchEvent,
            format!("The duel against {} begins!", archetype.name),
        );
    }

    /// Replay against the currently chosen opponent.
    pub fn restart(&mut self) {
        let opponent = self.session.opponent.clone();
        self.start_match(&opponent);
    }

    /// Pick the spell that `cast_selected` will use. Out-of-range slots are ignored.
    pub fn select_action_slot(&mut self, slot: usize) {
        if slot < self.spells.len() {
            self.combat.selected_slot = slot;
        }
    }

    pub fn set_player_name(&mut self, name: Option<String>) {
        self.session.player_name = name.filter(|name| !name.trim().is_empty());
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    pub fn phase(&self) -> MatchPhase {
        self.session.phase
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn wins(&self) -> u32 {
        self.session.wins
    }

    pub fn message(&self) -> &str {
        &self.session.message
    }

    pub fn clock(&self) -> f32 {
        self.combat.clock
    }

    pub fn spells(&self) -> &SpellCatalog {
        &self.spells
    }

    pub fn roster(&self) -> &OpponentRoster {
        &self.roster
    }

    pub fn combat(&self) -> &CombatState {
        &self.combat
    }

    /// Direct access to match state, for scripted setups.
    pub fn combat_mut(&mut self) -> &mut CombatState {
        &mut self.combat
    }

    pub fn log(&self) -> &CombatLog {
        &self.log
    }

    /// Name shown for the player.
    pub fn player_label(&self) -> &str {
        self.session.player_name.as_deref().unwrap_or("You")
    }

    fn side_label(&self, side: Side) -> String {
        match side {
            Side::Player => self.player_label().to_string(),
            Side::Opponent => self.combat.archetype.name.clone(),
        }
    }

    /// Record an event and make it the status line.
    fn announce(&mut self, event_type: CombatLogEventType, message: String) {
        self.log.log(self.combat.clock, event_type, message.clone());
        self.session.message = message;
    }
}
