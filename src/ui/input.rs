//! Input translation
//!
//! Keyboard and mouse input become engine calls. Hold the left mouse button
//! to aim; releasing it casts the selected spell at the last aim point.

use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use bevy_egui::EguiContexts;

use super::{world_to_arena, ActiveDuel, AimState, ArenaCamera};
use crate::duel::constants::{ARENA_HEIGHT, ARENA_WIDTH};
use crate::duel::MatchPhase;
use crate::keybindings::{DuelAction, Keybindings};

/// Menu navigation, match start/restart, spell selection and quitting.
pub fn handle_duel_keys(
    keyboard: Res<ButtonInput<KeyCode>>,
    keybindings: Res<Keybindings>,
    mut contexts: EguiContexts,
    mut duel: ResMut<ActiveDuel>,
    mut exit: EventWriter<AppExit>,
) {
    // Keys typed into the name field are not hotkeys
    let typing = contexts
        .try_ctx_mut()
        .is_some_and(|ctx| ctx.wants_keyboard_input());
    if typing {
        return;
    }

    if keybindings.action_just_pressed(DuelAction::Quit, &keyboard) {
        info!("Quit requested");
        exit.send(AppExit::Success);
        return;
    }

    let engine = &mut duel.0;
    match engine.phase() {
        MatchPhase::SelectingOpponent => {
            if keybindings.action_just_pressed(DuelAction::CycleOpponent, &keyboard) {
                engine.cycle_opponent();
            }
            if keybindings.action_just_pressed(DuelAction::Confirm, &keyboard) {
                let opponent = engine.session().opponent.clone();
                engine.start_match(&opponent);
            }
        }
        MatchPhase::InProgress => {
            if let Some(slot) = keybindings.spell_slot_just_pressed(&keyboard) {
                engine.select_action_slot(slot);
            }
            if keybindings.action_just_pressed(DuelAction::Restart, &keyboard) {
                engine.restart();
            }
        }
        MatchPhase::Concluded => {
            if keybindings.action_just_pressed(DuelAction::CycleOpponent, &keyboard) {
                engine.cycle_opponent();
            }
            if keybindings.action_just_pressed(DuelAction::Restart, &keyboard)
                || keybindings.action_just_pressed(DuelAction::Confirm, &keyboard)
            {
                engine.restart();
            }
        }
    }
}

/// Track the drag-to-aim gesture and cast on release.
pub fn track_aim(
    buttons: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&Camera, &GlobalTransform), With<ArenaCamera>>,
    mut contexts: EguiContexts,
    mut aim: ResMut<AimState>,
    mut duel: ResMut<ActiveDuel>,
) {
    if duel.0.phase() != MatchPhase::InProgress {
        aim.clear();
        return;
    }

    // Clicks on egui panels never start an aim
    let over_ui = contexts
        .try_ctx_mut()
        .is_some_and(|ctx| ctx.is_pointer_over_area());
    if buttons.just_pressed(MouseButton::Left) && !over_ui {
        aim.aiming = true;
    }

    if aim.aiming && buttons.pressed(MouseButton::Left) {
        if let Some(point) = cursor_arena_position(&windows, &cameras) {
            aim.point = Some(point);
        }
    }

    if buttons.just_released(MouseButton::Left) && aim.aiming {
        if let Some(point) = aim.point {
            // Rejections surface through the status line
            let _ = duel.0.cast_selected(point);
        }
        aim.clear();
    }
}

/// Cursor position in arena coordinates, if it is over the arena.
fn cursor_arena_position(
    windows: &Query<&Window, With<PrimaryWindow>>,
    cameras: &Query<(&Camera, &GlobalTransform), With<ArenaCamera>>,
) -> Option<Vec2> {
    let window = windows.get_single().ok()?;
    let (camera, camera_transform) = cameras.get_single().ok()?;
    let cursor = window.cursor_position()?;
    let world = camera.viewport_to_world_2d(camera_transform, cursor).ok()?;

    let point = world_to_arena(world);
    let inside = (0.0..=ARENA_WIDTH).contains(&point.x) && (0.0..=ARENA_HEIGHT).contains(&point.y);
    inside.then_some(point)
}
