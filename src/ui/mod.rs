//! UI System
//!
//! Bevy front end for the duel engine:
//! - Input translation (hotkeys, aim-by-drag) in `input`
//! - Arena drawing with gizmos in `arena`
//! - Menu, HUD and results overlays with egui in `hud`
//!
//! The engine is ticked from `FixedUpdate` at the rate its per-tick
//! velocities assume, and everything visual reads a fresh snapshot each frame.
//!
//! Arena coordinates have their origin at the top-left corner with y growing
//! downwards; world coordinates are centred with y up.

pub mod arena;
pub mod hud;
pub mod input;

use bevy::prelude::*;
use bevy::render::camera::ScalingMode;
use std::path::Path;

use crate::duel::constants::{ARENA_HEIGHT, ARENA_WIDTH, ASSUMED_TICK_RATE};
use crate::duel::{DuelEngine, GameRng, OpponentRoster, SpellCatalog};

/// Where the GUI looks for catalog overrides
pub const SPELLS_PATH: &str = "assets/config/spells.ron";
pub const OPPONENTS_PATH: &str = "assets/config/opponents.ron";

/// The running duel
#[derive(Resource)]
pub struct ActiveDuel(pub DuelEngine);

/// Current drag-to-aim gesture
#[derive(Resource, Default, Debug)]
pub struct AimState {
    /// Left mouse is held
    pub aiming: bool,
    /// Last cursor position inside the arena, in arena coordinates
    pub point: Option<Vec2>,
}

impl AimState {
    pub fn clear(&mut self) {
        self.aiming = false;
        self.point = None;
    }
}

/// Text typed into the menu's name field
#[derive(Resource, Default, Debug)]
pub struct PlayerNameInput(pub String);

/// Marker component for the arena camera
#[derive(Component)]
pub struct ArenaCamera;

/// Command-line choices for the GUI session
#[derive(Resource, Clone, Debug, Default)]
pub struct DuelOptions {
    pub seed: Option<u64>,
    pub player_name: Option<String>,
    /// Opponent preselected in the menu
    pub opponent: Option<String>,
}

/// Plugin for the duel front end
pub struct DuelUiPlugin {
    pub options: DuelOptions,
}

impl Plugin for DuelUiPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(Time::<Fixed>::from_hz(ASSUMED_TICK_RATE as f64))
            .insert_resource(ClearColor(colors::BACKGROUND))
            .insert_resource(self.options.clone())
            .init_resource::<AimState>()
            .insert_resource(PlayerNameInput(self.options.player_name.clone().unwrap_or_default()))
            .add_systems(Startup, (setup_camera, start_session))
            .add_systems(
                Update,
                (
                    input::handle_duel_keys,
                    input::track_aim,
                    arena::draw_arena,
                    hud::render_hud,
                )
                    .chain(),
            )
            .add_systems(FixedUpdate, tick_duel);
    }
}

fn setup_camera(mut commands: Commands) {
    commands.spawn((
        Camera2d,
        OrthographicProjection {
            scaling_mode: ScalingMode::AutoMin {
                min_width: ARENA_WIDTH,
                min_height: ARENA_HEIGHT,
            },
            ..OrthographicProjection::default_2d()
        },
        ArenaCamera,
    ));
}

fn start_session(mut commands: Commands, options: Res<DuelOptions>) {
    let engine = build_engine(&options);
    info!(
        "Duel session ready: {} spells, {} opponents",
        engine.spells().len(),
        engine.roster().len()
    );
    commands.insert_resource(ActiveDuel(engine));
}

fn tick_duel(mut duel: ResMut<ActiveDuel>, time: Res<Time>) {
    duel.0.tick(time.delta_secs());
}

/// Build the engine for a GUI session.
///
/// Catalogs come from `assets/config/` when present, otherwise the built-in
/// tables are used.
pub fn build_engine(options: &DuelOptions) -> DuelEngine {
    let spells = load_or_builtin(SPELLS_PATH, SpellCatalog::load, SpellCatalog::builtin);
    let roster = load_or_builtin(OPPONENTS_PATH, OpponentRoster::load, OpponentRoster::builtin);

    let mut engine = DuelEngine::new(spells, roster, GameRng::from_optional_seed(options.seed));
    engine.set_player_name(options.player_name.clone());

    if let Some(name) = &options.opponent {
        if !engine.select_opponent(name) {
            warn!("Unknown opponent '{}', keeping {}", name, engine.session().opponent);
        }
    }

    engine
}

fn load_or_builtin<T>(
    path: &str,
    load: impl Fn(&Path) -> Result<T, String>,
    builtin: impl Fn() -> T,
) -> T {
    let path = Path::new(path);
    if !path.exists() {
        info!("{} not found, using built-in table", path.display());
        return builtin();
    }

    load(path).unwrap_or_else(|e| {
        warn!("{}; using built-in table", e);
        builtin()
    })
}

/// Arena position to world position.
pub fn arena_to_world(point: Vec2) -> Vec2 {
    Vec2::new(point.x - ARENA_WIDTH / 2.0, ARENA_HEIGHT / 2.0 - point.y)
}

/// World position to arena position.
pub fn world_to_arena(point: Vec2) -> Vec2 {
    Vec2::new(point.x + ARENA_WIDTH / 2.0, ARENA_HEIGHT / 2.0 - point.y)
}

pub fn rgb(color: [u8; 3]) -> Color {
    Color::srgb_u8(color[0], color[1], color[2])
}

/// Common colors used throughout the UI
pub mod colors {
    use bevy::prelude::*;

    pub const BACKGROUND: Color = Color::srgb(0.05, 0.05, 0.09);
    /// Arena outline and centre line
    pub const ARENA_LINE: Color = Color::srgb(0.25, 0.25, 0.35);
    /// Player body
    pub const PLAYER: Color = Color::srgb(0.3, 0.5, 0.95);
    /// Shield bubble
    pub const SHIELD: Color = Color::srgb(0.27, 0.78, 0.86);
    /// Stun halo
    pub const STUN: Color = Color::srgb(0.95, 0.9, 0.3);
    pub const WAND: Color = Color::srgb(0.55, 0.35, 0.2);
    pub const AIM: Color = Color::srgba(1.0, 1.0, 1.0, 0.35);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_conversion_round_trips() {
        let corner = arena_to_world(Vec2::ZERO);
        assert_eq!(corner, Vec2::new(-ARENA_WIDTH / 2.0, ARENA_HEIGHT / 2.0));
        assert_eq!(world_to_arena(corner), Vec2::ZERO);

        let centre = Vec2::new(ARENA_WIDTH / 2.0, ARENA_HEIGHT / 2.0);
        assert_eq!(arena_to_world(centre), Vec2::ZERO);
    }
}
