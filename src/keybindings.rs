//! Keybinding system for remappable controls
//!
//! Bindings live in `settings.ron` under `keybindings`. Keys are written by
//! their Bevy `KeyCode` name (`"KeyR"`, `"Digit1"`, `"Tab"`).

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::duel::spells::MAX_SPELL_SLOTS;

/// All possible actions that can be bound to keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DuelAction {
    /// Start the duel from the menu
    Confirm,
    /// Next opponent in the menu
    CycleOpponent,
    /// Rematch after a duel ends
    Restart,
    /// Leave the game
    Quit,
    /// Select a spell slot (0-based)
    SpellSlot(u8),
}

/// Key name used in settings files, and the label shown in the HUD.
const KEY_NAMES: &[(KeyCode, &str, &str)] = &[
    (KeyCode::Escape, "Escape", "ESC"),
    (KeyCode::Enter, "Enter", "ENTER"),
    (KeyCode::Space, "Space", "SPACE"),
    (KeyCode::Tab, "Tab", "TAB"),
    (KeyCode::Backspace, "Backspace", "BACKSPACE"),
    (KeyCode::KeyA, "KeyA", "A"),
    (KeyCode::KeyB, "KeyB", "B"),
    (KeyCode::KeyC, "KeyC", "C"),
    (KeyCode::KeyD, "KeyD", "D"),
    (KeyCode::KeyE, "KeyE", "E"),
    (KeyCode::KeyF, "KeyF", "F"),
    (KeyCode::KeyG, "KeyG", "G"),
    (KeyCode::KeyH, "KeyH", "H"),
    (KeyCode::KeyI, "KeyI", "I"),
    (KeyCode::KeyJ, "KeyJ", "J"),
    (KeyCode::KeyK, "KeyK", "K"),
    (KeyCode::KeyL, "KeyL", "L"),
    (KeyCode::KeyM, "KeyM", "M"),
    (KeyCode::KeyN, "KeyN", "N"),
    (KeyCode::KeyO, "KeyO", "O"),
    (KeyCode::KeyP, "KeyP", "P"),
    (KeyCode::KeyQ, "KeyQ", "Q"),
    (KeyCode::KeyR, "KeyR", "R"),
    (KeyCode::KeyS, "KeyS", "S"),
    (KeyCode::KeyT, "KeyT", "T"),
    (KeyCode::KeyU, "KeyU", "U"),
    (KeyCode::KeyV, "KeyV", "V"),
    (KeyCode::KeyW, "KeyW", "W"),
    (KeyCode::KeyX, "KeyX", "X"),
    (KeyCode::KeyY, "KeyY", "Y"),
    (KeyCode::KeyZ, "KeyZ", "Z"),
    (KeyCode::Digit1, "Digit1", "1"),
    (KeyCode::Digit2, "Digit2", "2"),
    (KeyCode::Digit3, "Digit3", "3"),
    (KeyCode::Digit4, "Digit4", "4"),
    (KeyCode::Digit5, "Digit5", "5"),
    (KeyCode::Digit6, "Digit6", "6"),
    (KeyCode::Digit7, "Digit7", "7"),
    (KeyCode::Digit8, "Digit8", "8"),
    (KeyCode::Digit9, "Digit9", "9"),
    (KeyCode::Digit0, "Digit0", "0"),
    (KeyCode::F1, "F1", "F1"),
    (KeyCode::F2, "F2", "F2"),
    (KeyCode::F3, "F3", "F3"),
    (KeyCode::F4, "F4", "F4"),
    (KeyCode::F5, "F5", "F5"),
    (KeyCode::F6, "F6", "F6"),
    (KeyCode::F7, "F7", "F7"),
    (KeyCode::F8, "F8", "F8"),
    (KeyCode::F9, "F9", "F9"),
    (KeyCode::F10, "F10", "F10"),
    (KeyCode::Numpad1, "Numpad1", "NUM1"),
    (KeyCode::Numpad2, "Numpad2", "NUM2"),
    (KeyCode::Numpad3, "Numpad3", "NUM3"),
    (KeyCode::Numpad4, "Numpad4", "NUM4"),
    (KeyCode::Numpad5, "Numpad5", "NUM5"),
    (KeyCode::Numpad6, "Numpad6", "NUM6"),
    (KeyCode::Numpad7, "Numpad7", "NUM7"),
    (KeyCode::Numpad8, "Numpad8", "NUM8"),
    (KeyCode::Numpad9, "Numpad9", "NUM9"),
    (KeyCode::Numpad0, "Numpad0", "NUM0"),
];

/// A `KeyCode` that (de)serializes as its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BoundKey(pub KeyCode);

impl TryFrom<String> for BoundKey {
    type Error = String;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        KEY_NAMES
            .iter()
            .find(|(_, stored, _)| *stored == name)
            .map(|(key, _, _)| BoundKey(*key))
            .ok_or_else(|| format!("Unknown key name: '{}'", name))
    }
}

impl From<BoundKey> for String {
    fn from(key: BoundKey) -> Self {
        KEY_NAMES
            .iter()
            .find(|(code, _, _)| *code == key.0)
            .map(|(_, stored, _)| stored.to_string())
            .unwrap_or_else(|| format!("{:?}", key.0))
    }
}

/// Key binding with primary and optional secondary key
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct KeyBinding {
    pub primary: BoundKey,
    #[serde(default)]
    pub secondary: Option<BoundKey>,
}

impl KeyBinding {
    pub fn new(primary: KeyCode) -> Self {
        Self {
            primary: BoundKey(primary),
            secondary: None,
        }
    }

    pub fn with_secondary(primary: KeyCode, secondary: KeyCode) -> Self {
        Self {
            primary: BoundKey(primary),
            secondary: Some(BoundKey(secondary)),
        }
    }

    fn keys(&self) -> impl Iterator<Item = KeyCode> {
        std::iter::once(self.primary.0).chain(self.secondary.map(|k| k.0))
    }
}

/// Complete keybindings configuration
#[derive(Debug, Clone, Resource, Serialize, Deserialize)]
pub struct Keybindings {
    bindings: HashMap<DuelAction, KeyBinding>,
}

impl Default for Keybindings {
    fn default() -> Self {
        Self::create_defaults()
    }
}

impl Keybindings {
    /// Create default keybindings
    pub fn create_defaults() -> Self {
        let mut bindings = HashMap::new();

        bindings.insert(DuelAction::Confirm, KeyBinding::new(KeyCode::Enter));
        bindings.insert(DuelAction::CycleOpponent, KeyBinding::new(KeyCode::Tab));
        bindings.insert(DuelAction::Restart, KeyBinding::new(KeyCode::KeyR));
        bindings.insert(DuelAction::Quit, KeyBinding::new(KeyCode::Escape));

        // 1-9 then 0, numpad as secondary
        let slot_keys = [
            (KeyCode::Digit1, KeyCode::Numpad1),
            (KeyCode::Digit2, KeyCode::Numpad2),
            (KeyCode::Digit3, KeyCode::Numpad3),
            (KeyCode::Digit4, KeyCode::Numpad4),
            (KeyCode::Digit5, KeyCode::Numpad5),
            (KeyCode::Digit6, KeyCode::Numpad6),
            (KeyCode::Digit7, KeyCode::Numpad7),
            (KeyCode::Digit8, KeyCode::Numpad8),
            (KeyCode::Digit9, KeyCode::Numpad9),
            (KeyCode::Digit0, KeyCode::Numpad0),
        ];
        for (slot, (primary, secondary)) in slot_keys.into_iter().enumerate() {
            bindings.insert(
                DuelAction::SpellSlot(slot as u8),
                KeyBinding::with_secondary(primary, secondary),
            );
        }

        Self { bindings }
    }

    /// Get the binding for an action
    pub fn get(&self, action: DuelAction) -> Option<&KeyBinding> {
        self.bindings.get(&action)
    }

    /// Check if an action was just pressed this frame
    pub fn action_just_pressed(&self, action: DuelAction, keyboard: &ButtonInput<KeyCode>) -> bool {
        self.get(action)
            .is_some_and(|binding| binding.keys().any(|key| keyboard.just_pressed(key)))
    }

    /// Lowest spell slot whose key was just pressed, if any.
    pub fn spell_slot_just_pressed(&self, keyboard: &ButtonInput<KeyCode>) -> Option<usize> {
        (0..MAX_SPELL_SLOTS as u8)
            .find(|slot| self.action_just_pressed(DuelAction::SpellSlot(*slot), keyboard))
            .map(usize::from)
    }

    /// Get a human-readable string for a key
    pub fn key_name(key: KeyCode) -> &'static str {
        KEY_NAMES
            .iter()
            .find(|(code, _, _)| *code == key)
            .map_or("???", |(_, _, label)| label)
    }

    /// Get display string for a binding (primary key only)
    pub fn binding_display(&self, action: DuelAction) -> String {
        match self.get(action) {
            Some(binding) => Self::key_name(binding.primary.0).to_string(),
            None => "Unbound".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_cover_every_action() {
        let bindings = Keybindings::default();
        let actions = [
            DuelAction::Confirm,
            DuelAction::CycleOpponent,
            DuelAction::Restart,
            DuelAction::Quit,
        ]
        .into_iter()
        .chain((0..MAX_SPELL_SLOTS as u8).map(DuelAction::SpellSlot));
        for action in actions {
            assert!(bindings.get(action).is_some(), "{:?} is unbound", action);
        }
        assert_eq!(bindings.binding_display(DuelAction::SpellSlot(9)), "0");
        assert_eq!(bindings.binding_display(DuelAction::Restart), "R");
    }

    #[test]
    fn test_secondary_key_selects_slot() {
        let bindings = Keybindings::default();
        let mut keyboard = ButtonInput::<KeyCode>::default();
        keyboard.press(KeyCode::Numpad3);

        assert_eq!(bindings.spell_slot_just_pressed(&keyboard), Some(2));
        assert!(!bindings.action_just_pressed(DuelAction::Quit, &keyboard));
    }

    #[test]
    fn test_unknown_key_name_is_rejected() {
        assert!(BoundKey::try_from("KeyQ".to_string()).is_ok());
        assert!(BoundKey::try_from("Hyper".to_string()).is_err());
    }
}
