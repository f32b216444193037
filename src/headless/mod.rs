//! Headless mode for scripted duels
//!
//! Runs a duel without any graphical output from a JSON script of timed
//! casts, suitable for automated testing and balance checks.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --release -- --headless duel.json --seed 42
//! ```
//!
//! ## JSON Configuration
//!
//! ```json
//! {
//!   "opponent": "Bellatrix",
//!   "random_seed": 42,
//!   "max_duration_secs": 60,
//!   "casts": [
//!     { "at": 0.0, "slot": 1, "aim": [1050.0, 360.0] },
//!     { "at": 1.5, "slot": 6, "aim": [1050.0, 360.0] }
//!   ]
//! }
//! ```

pub mod config;
pub mod runner;

pub use config::{HeadlessDuelConfig, ScriptedCast};
pub use runner::{run_headless_duel, run_script, DuelResult};
