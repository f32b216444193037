//! Game settings and configuration
//!
//! Window and input preferences, read from `settings.ron` next to the
//! executable. A missing or unreadable file falls back to defaults.

use bevy::prelude::*;
use bevy::window::{MonitorSelection, PresentMode, WindowMode, WindowResolution};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::keybindings::Keybindings;

/// User-configurable game settings
#[derive(Resource, Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    pub window_mode: WindowModeOption,
    pub resolution: ResolutionOption,
    pub vsync: bool,
    pub keybindings: Keybindings,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            window_mode: WindowModeOption::Windowed,
            resolution: ResolutionOption::HD720,
            vsync: true,
            keybindings: Keybindings::default(),
        }
    }
}

impl GameSettings {
    /// Get the path to the settings file
    fn settings_path() -> PathBuf {
        PathBuf::from("settings.ron")
    }

    /// Load settings from `settings.ron`, or return defaults if it doesn't exist
    pub fn load() -> Self {
        let path = Self::settings_path();
        if !path.exists() {
            info!("No settings file found, using defaults");
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(settings) => {
                info!("Loaded settings from {:?}", path);
                settings
            }
            Err(e) => {
                warn!("{}", e);
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, String> {
        let contents = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read settings file: {}", e))?;
        Self::from_ron_str(&contents)
    }

    pub fn from_ron_str(contents: &str) -> Result<Self, String> {
        ron::from_str(contents).map_err(|e| format!("Failed to parse settings file: {}", e))
    }

    /// Save settings to `settings.ron`
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        let path = Self::settings_path();
        let contents = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())?;
        fs::write(&path, contents)?;
        info!("Saved settings to {:?}", path);
        Ok(())
    }

    /// Primary window built from these settings.
    pub fn window(&self, title: &str) -> Window {
        let (width, height) = self.resolution.dimensions();
        Window {
            title: title.to_string(),
            resolution: WindowResolution::new(width, height),
            mode: self.window_mode.to_bevy(),
            present_mode: if self.vsync {
                PresentMode::AutoVsync
            } else {
                PresentMode::AutoNoVsync
            },
            resizable: true,
            ..default()
        }
    }
}

/// Window mode options
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum WindowModeOption {
    Windowed,
    BorderlessFullscreen,
}

impl WindowModeOption {
    pub fn to_bevy(&self) -> WindowMode {
        match self {
            WindowModeOption::Windowed => WindowMode::Windowed,
            WindowModeOption::BorderlessFullscreen => {
                WindowMode::BorderlessFullscreen(MonitorSelection::Current)
            }
        }
    }
}

/// Resolution presets
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResolutionOption {
    HD720,
    HD1080,
    QHD1440,
}

impl ResolutionOption {
    pub fn dimensions(&self) -> (f32, f32) {
        match self {
            ResolutionOption::HD720 => (1280.0, 720.0),
            ResolutionOption::HD1080 => (1920.0, 1080.0),
            ResolutionOption::QHD1440 => (2560.0, 1440.0),
        }
    }
}

/// Plugin for managing game settings
///
/// Writes a default `settings.ron` on first launch so players have a file to
/// edit, and exposes the keybindings as their own resource.
pub struct SettingsPlugin {
    pub settings: GameSettings,
}

impl Plugin for SettingsPlugin {
    fn build(&self, app: &mut App) {
        if !Self::has_settings_file() {
            if let Err(e) = self.settings.save() {
                error!("Failed to write default settings: {}", e);
            }
        }

        app.insert_resource(self.settings.clone())
            .insert_resource(self.settings.keybindings.clone());
    }
}

impl SettingsPlugin {
    fn has_settings_file() -> bool {
        GameSettings::settings_path().exists()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keybindings::DuelAction;

    #[test]
    fn test_partial_settings_fill_in_defaults() {
        let settings = GameSettings::from_ron_str("(resolution: HD1080, vsync: false)")
            .expect("partial settings should parse");

        assert_eq!(settings.resolution, ResolutionOption::HD1080);
        assert_eq!(settings.window_mode, WindowModeOption::Windowed);
        assert!(!settings.vsync);
        assert!(settings.keybindings.get(DuelAction::Quit).is_some());
    }

    #[test]
    fn test_window_uses_resolution_preset() {
        let settings = GameSettings {
            resolution: ResolutionOption::QHD1440,
            ..Default::default()
        };
        let window = settings.window("Duel");
        assert_eq!(window.resolution.width(), 2560.0);
        assert_eq!(window.present_mode, PresentMode::AutoVsync);
    }

    #[test]
    fn test_garbage_settings_report_an_error() {
        assert!(GameSettings::from_ron_str("(vsync: maybe)").is_err());
    }
}
