//! DuelSim - Real-time Spell Duel Prototype
//!
//! A player duels a single computer-controlled opponent with a catalog of
//! projectile spells, shields and damage-over-time effects.
//!
//! This library exposes the engine and front-end modules for testing and reuse.

pub mod cli;
pub mod combat;
pub mod duel;
pub mod headless;
pub mod keybindings;
pub mod settings;
pub mod ui;

// Re-export commonly used types
pub use combat::log::{CombatLog, CombatLogEventType};
pub use duel::{CastError, CastOutcome, DuelEngine, DuelSnapshot, MatchOutcome, MatchPhase};
pub use headless::{DuelResult, HeadlessDuelConfig};
