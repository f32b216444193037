//! HUD, menu and results overlays
//!
//! Everything here reads the engine snapshot. The name field and spell bar
//! clicks are applied to the duel after the frame is drawn.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use super::{ActiveDuel, PlayerNameInput};
use crate::duel::{CombatantView, DuelEngine, DuelSnapshot, MatchOutcome, MatchPhase, RandomSource};
use crate::keybindings::{DuelAction, Keybindings};

const NAME_CHAR_LIMIT: usize = 24;

/// Health fraction below which the bar turns red
const LOW_HP_THRESHOLD: f32 = 0.35;

const PANEL_FILL: egui::Color32 = egui::Color32::from_rgb(20, 20, 30);
const TITLE_GOLD: egui::Color32 = egui::Color32::from_rgb(230, 204, 153);
const TEXT: egui::Color32 = egui::Color32::from_rgb(220, 220, 220);
const DIM_TEXT: egui::Color32 = egui::Color32::from_rgb(140, 140, 150);

pub fn render_hud(
    mut contexts: EguiContexts,
    mut duel: ResMut<ActiveDuel>,
    mut name_input: ResMut<PlayerNameInput>,
    keybindings: Res<Keybindings>,
) {
    // Use try_ctx_mut to gracefully handle window close
    let Some(ctx) = contexts.try_ctx_mut() else {
        return;
    };

    let requests = {
        let snapshot = duel.0.snapshot();
        match snapshot.phase {
            MatchPhase::SelectingOpponent => HudRequests {
                rename: render_menu(ctx, &duel, &snapshot, &keybindings, &mut name_input.0)
                    .then(|| name_input.0.clone()),
                clicked_slot: None,
            },
            MatchPhase::InProgress => HudRequests {
                rename: None,
                clicked_slot: render_match(ctx, &snapshot, &keybindings),
            },
            MatchPhase::Concluded => {
                render_match(ctx, &snapshot, &keybindings);
                render_results(ctx, &snapshot, &keybindings);
                HudRequests::default()
            }
        }
    };

    requests.apply(&mut duel.0);
}

/// Edits made through the overlays during one frame
#[derive(Debug, Default, PartialEq)]
struct HudRequests {
    rename: Option<String>,
    clicked_slot: Option<usize>,
}

impl HudRequests {
    fn apply<R: RandomSource>(self, engine: &mut DuelEngine<R>) {
        if let Some(name) = self.rename {
            engine.set_player_name(Some(name));
        }
        if let Some(slot) = self.clicked_slot {
            engine.select_action_slot(slot);
        }
    }
}

fn color32(color: [u8; 3]) -> egui::Color32 {
    egui::Color32::from_rgb(color[0], color[1], color[2])
}

fn overlay_frame(ctx: &egui::Context) -> egui::Frame {
    egui::Frame::window(&ctx.style())
        .fill(egui::Color32::from_black_alpha(200))
        .stroke(egui::Stroke::NONE)
}

// ==============================================================================
// Menu
// ==============================================================================

/// Returns true when the typed name changed this frame.
fn render_menu(
    ctx: &egui::Context,
    duel: &ActiveDuel,
    snapshot: &DuelSnapshot,
    keybindings: &Keybindings,
    name: &mut String,
) -> bool {
    let archetype = duel.0.roster().archetype(snapshot.opponent_name);
    let mut renamed = false;

    egui::Window::new("Choose Opponent")
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .resizable(false)
        .collapsible(false)
        .title_bar(false)
        .frame(egui::Frame::window(&ctx.style()).fill(PANEL_FILL))
        .show(ctx, |ui| {
            ui.set_width(420.0);
            ui.vertical_centered(|ui| {
                ui.heading(egui::RichText::new("SPELL DUEL").size(40.0).color(TITLE_GOLD));
                ui.add_space(16.0);

                ui.label(egui::RichText::new("Your opponent").size(14.0).color(DIM_TEXT));
                ui.label(
                    egui::RichText::new(snapshot.opponent_name)
                        .size(30.0)
                        .strong()
                        .color(color32(snapshot.opponent_color)),
                );

                if let Some(archetype) = archetype {
                    ui.add_space(6.0);
                    ui.label(
                        egui::RichText::new(format!(
                            "{:.0} HP   ·   {:.0}% dodge   ·   {:.0}% counter",
                            archetype.max_health,
                            archetype.dodge_chance * 100.0,
                            archetype.counter_chance * 100.0
                        ))
                        .size(15.0)
                        .color(TEXT),
                    );
                }

                ui.add_space(16.0);
                let name_edit = ui.add(
                    egui::TextEdit::singleline(name)
                        .hint_text("Type your name (optional)")
                        .char_limit(NAME_CHAR_LIMIT)
                        .desired_width(220.0),
                );
                renamed = name_edit.changed();

                ui.add_space(20.0);
                ui.label(
                    egui::RichText::new(format!(
                        "{} next opponent   ·   {} begin",
                        keybindings.binding_display(DuelAction::CycleOpponent),
                        keybindings.binding_display(DuelAction::Confirm)
                    ))
                    .size(14.0)
                    .color(DIM_TEXT),
                );
                ui.label(
                    egui::RichText::new("Hold the left mouse button to aim, release to cast.")
                        .size(14.0)
                        .color(DIM_TEXT),
                );

                if snapshot.wins > 0 {
                    ui.add_space(10.0);
                    ui.label(egui::RichText::new(format!("Wins: {}", snapshot.wins)).color(TITLE_GOLD));
                }
            });
        });

    renamed
}

// ==============================================================================
// In-match HUD
// ==============================================================================

/// Returns the spell slot clicked in the spell bar, if any.
fn render_match(ctx: &egui::Context, snapshot: &DuelSnapshot, keybindings: &Keybindings) -> Option<usize> {
    let mut clicked_slot = None;

    egui::Window::new("Player")
        .fixed_pos(egui::pos2(10.0, 10.0))
        .resizable(false)
        .collapsible(false)
        .title_bar(false)
        .frame(overlay_frame(ctx))
        .show(ctx, |ui| {
            ui.set_width(240.0);
            render_combatant(ui, snapshot.player_name, egui::Color32::from_rgb(77, 128, 242), &snapshot.player);
            ui.add(
                egui::ProgressBar::new(snapshot.player.mana / snapshot.player.max_mana)
                    .text(format!("{:.0} / {:.0} mana", snapshot.player.mana, snapshot.player.max_mana))
                    .fill(egui::Color32::from_rgb(51, 102, 230)),
            );
        });

    let screen_width = ctx.screen_rect().width();
    egui::Window::new("Opponent")
        .fixed_pos(egui::pos2(screen_width - 260.0, 10.0))
        .resizable(false)
        .collapsible(false)
        .title_bar(false)
        .frame(overlay_frame(ctx))
        .show(ctx, |ui| {
            ui.set_width(240.0);
            render_combatant(ui, snapshot.opponent_name, color32(snapshot.opponent_color), &snapshot.opponent);
            if !snapshot.opponent_effects.is_empty() {
                let effects: Vec<&str> = snapshot.opponent_effects.iter().map(|kind| kind.name()).collect();
                ui.label(
                    egui::RichText::new(effects.join(" · "))
                        .size(13.0)
                        .color(egui::Color32::from_rgb(255, 150, 80)),
                );
            }
        });

    egui::TopBottomPanel::bottom("spell_bar")
        .frame(overlay_frame(ctx))
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(
                    egui::RichText::new(format!("{:>5.1}s", snapshot.clock))
                        .monospace()
                        .color(DIM_TEXT),
                );
                ui.label(egui::RichText::new(snapshot.message).size(16.0).color(TEXT));
            });
            ui.add_space(4.0);
            ui.horizontal_wrapped(|ui| {
                for (slot, spell) in snapshot.spells.iter().enumerate() {
                    let key = keybindings.binding_display(DuelAction::SpellSlot(slot as u8));
                    let ready = spell.cooldown_remaining <= 0.0 && spell.affordable;
                    let label = if spell.cooldown_remaining > 0.0 {
                        format!("[{}] {} {:.1}s", key, spell.name, spell.cooldown_remaining)
                    } else {
                        format!("[{}] {}", key, spell.name)
                    };

                    let text_color = if ready { color32(spell.color) } else { DIM_TEXT };
                    let button = egui::Button::new(egui::RichText::new(label).size(13.0).color(text_color))
                        .fill(if spell.selected {
                            egui::Color32::from_rgb(60, 80, 120)
                        } else {
                            egui::Color32::from_rgb(40, 40, 50)
                        })
                        .min_size(egui::vec2(110.0, 28.0));

                    let response = ui.add(button).on_hover_text(format!(
                        "{:.0} mana · {:.1}s cooldown",
                        spell.mana_cost, spell.cooldown
                    ));
                    if response.clicked() {
                        clicked_slot = Some(slot);
                    }
                }
            });
        });

    clicked_slot
}

fn render_combatant(ui: &mut egui::Ui, name: &str, color: egui::Color32, view: &CombatantView) {
    ui.horizontal(|ui| {
        ui.label(egui::RichText::new(name).size(16.0).strong().color(color));
        if view.shielded {
            ui.label(egui::RichText::new("Protego").size(12.0).color(egui::Color32::from_rgb(70, 200, 220)));
        }
        if view.stunned {
            ui.label(egui::RichText::new("Stunned").size(12.0).color(egui::Color32::from_rgb(240, 230, 80)));
        }
        if !view.has_wand {
            ui.label(egui::RichText::new("Disarmed").size(12.0).color(egui::Color32::from_rgb(200, 120, 60)));
        }
    });

    let fraction = view.health_fraction();
    let fill = if fraction < LOW_HP_THRESHOLD {
        egui::Color32::from_rgb(204, 51, 51)
    } else {
        egui::Color32::from_rgb(51, 204, 51)
    };
    ui.add(
        egui::ProgressBar::new(fraction)
            .text(format!("{:.0} / {:.0}", view.health, view.max_health))
            .fill(fill),
    );
}

// ==============================================================================
// Results
// ==============================================================================

fn render_results(ctx: &egui::Context, snapshot: &DuelSnapshot, keybindings: &Keybindings) {
    let (title, color) = match snapshot.outcome {
        Some(MatchOutcome::Victory) => ("VICTORY!", egui::Color32::from_rgb(100, 255, 140)),
        Some(MatchOutcome::Defeat) => ("DEFEAT", egui::Color32::from_rgb(255, 100, 100)),
        None => ("DUEL OVER", TEXT),
    };

    egui::Window::new("Results")
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .resizable(false)
        .collapsible(false)
        .title_bar(false)
        .frame(egui::Frame::window(&ctx.style()).fill(PANEL_FILL))
        .show(ctx, |ui| {
            ui.set_width(360.0);
            ui.vertical_centered(|ui| {
                ui.heading(egui::RichText::new(title).size(44.0).color(color));
                ui.add_space(8.0);
                ui.label(egui::RichText::new(snapshot.message).size(18.0).color(TEXT));
                ui.label(egui::RichText::new(format!("Wins: {}", snapshot.wins)).color(TITLE_GOLD));
                ui.add_space(16.0);
                ui.label(
                    egui::RichText::new(format!(
                        "{} rematch   ·   {} change opponent   ·   {} quit",
                        keybindings.binding_display(DuelAction::Restart),
                        keybindings.binding_display(DuelAction::CycleOpponent),
                        keybindings.binding_display(DuelAction::Quit)
                    ))
                    .size(14.0)
                    .color(DIM_TEXT),
                );
            });
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::duel::GameRng;

    fn engine() -> DuelEngine {
        let mut engine = DuelEngine::with_builtin_catalogs(GameRng::from_seed(1));
        engine.start_match("Voldemort");
        engine
    }

    #[test]
    fn test_clicked_spell_becomes_selected() {
        let mut engine = engine();
        HudRequests {
            rename: None,
            clicked_slot: Some(6),
        }
        .apply(&mut engine);
        assert_eq!(engine.combat().selected_slot, 6);
    }

    #[test]
    fn test_typed_name_labels_the_player() {
        let mut engine = engine();
        HudRequests {
            rename: Some("Hermione".to_string()),
            clicked_slot: None,
        }
        .apply(&mut engine);
        assert_eq!(engine.player_label(), "Hermione");

        // Clearing the field goes back to the default label
        HudRequests {
            rename: Some(String::new()),
            clicked_slot: None,
        }
        .apply(&mut engine);
        assert_eq!(engine.player_label(), "You");
    }

    #[test]
    fn test_quiet_frame_changes_nothing() {
        let mut engine = engine();
        engine.select_action_slot(3);
        engine.set_player_name(Some("Ron".to_string()));

        HudRequests::default().apply(&mut engine);

        assert_eq!(engine.combat().selected_slot, 3);
        assert_eq!(engine.player_label(), "Ron");
    }
}
