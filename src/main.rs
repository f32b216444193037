//! DuelSim - Real-time Spell Duel Prototype
//!
//! The player duels one computer-controlled opponent: aim by dragging the
//! mouse, cast from a ten-slot spell bar, and outlast the opponent's dodges
//! and counters.

use bevy::prelude::*;
use bevy_egui::EguiPlugin;

use duelsim::cli;
use duelsim::headless::{run_headless_duel, HeadlessDuelConfig};
use duelsim::settings::{GameSettings, SettingsPlugin};
use duelsim::ui::{DuelOptions, DuelUiPlugin};

fn main() {
    let args = cli::parse_args();

    if let Some(config_path) = &args.headless {
        let mut config = match HeadlessDuelConfig::load_from_file(config_path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Invalid headless config: {}", e);
                std::process::exit(2);
            }
        };
        args.apply_to(&mut config);

        if let Err(e) = run_headless_duel(config) {
            eprintln!("Headless duel failed: {}", e);
            std::process::exit(1);
        }
        return;
    }

    let settings = GameSettings::load();
    let options = DuelOptions {
        seed: args.seed,
        player_name: args.name.clone(),
        opponent: args.opponent.clone(),
    };

    App::new()
        // Bevy default plugins with the window from settings.ron
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(settings.window("DuelSim")),
            ..default()
        }))
        .add_plugins((
            EguiPlugin,
            SettingsPlugin { settings },
            DuelUiPlugin { options },
        ))
        .run();
}
