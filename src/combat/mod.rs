//! Combat bookkeeping shared by the engine, the HUD and headless runs.

pub mod log;
