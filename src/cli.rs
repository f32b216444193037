//! Command-line interface for DuelSim
//!
//! Supports both graphical (default) and headless modes.

use clap::Parser;
use std::path::PathBuf;

/// Real-time spell duel against a computer opponent
#[derive(Parser, Debug)]
#[command(name = "duelsim")]
#[command(about = "Real-time spell duel against a computer opponent")]
#[command(version)]
pub struct Args {
    /// Run in headless mode with the specified JSON duel script
    #[arg(long, value_name = "CONFIG_FILE")]
    pub headless: Option<PathBuf>,

    /// Output path for the combat log (headless mode only)
    #[arg(long, value_name = "OUTPUT_PATH")]
    pub output: Option<PathBuf>,

    /// Override the script's maximum duel duration in seconds (headless mode only)
    #[arg(long, value_name = "SECS")]
    pub max_duration: Option<f32>,

    /// Random seed for a reproducible duel
    #[arg(long)]
    pub seed: Option<u64>,

    /// Name shown for the player
    #[arg(long)]
    pub name: Option<String>,

    /// Opponent to face (preselected in the menu, or overriding the script)
    #[arg(long)]
    pub opponent: Option<String>,
}

impl Args {
    /// Apply command-line overrides on top of a headless script.
    pub fn apply_to(&self, config: &mut crate::headless::HeadlessDuelConfig) {
        if let Some(output) = &self.output {
            config.output_path = Some(output.to_string_lossy().into_owned());
        }
        if let Some(max_duration) = self.max_duration {
            config.max_duration_secs = max_duration;
        }
        if self.seed.is_some() {
            config.random_seed = self.seed;
        }
        if self.name.is_some() {
            config.player_name = self.name.clone();
        }
        if let Some(opponent) = &self.opponent {
            config.opponent = opponent.clone();
        }
    }
}

pub fn parse_args() -> Args {
    Args::parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless::HeadlessDuelConfig;

    #[test]
    fn test_flags_override_script() {
        let args = Args::try_parse_from([
            "duelsim",
            "--headless",
            "duel.json",
            "--seed",
            "7",
            "--max-duration",
            "30",
            "--opponent",
            "Bellatrix",
        ])
        .expect("flags should parse");

        let mut config = HeadlessDuelConfig {
            random_seed: Some(1),
            ..Default::default()
        };
        args.apply_to(&mut config);

        assert_eq!(args.headless, Some(PathBuf::from("duel.json")));
        assert_eq!(config.random_seed, Some(7));
        assert_eq!(config.max_duration_secs, 30.0);
        assert_eq!(config.opponent, "Bellatrix");
        assert_eq!(config.output_path, None);
    }
}
