// Demo settings: engine tunables and the simulated display, stored in the
// platform config dir, e.g. ~/.config/dockspace/settings.json on Linux.

use std::path::{Path, PathBuf};

use dockspace_core::Size;
use dockspace_layout::DockConfig;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DemoSettings {
    #[serde(default)]
    pub dock: DockConfig,
    #[serde(default)]
    pub display: DisplaySettings,
    /// Render the debug window on the last frame of the session.
    #[serde(default)]
    pub show_debug_view: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplaySettings {
    pub width: f32,
    pub height: f32,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
        }
    }
}

impl DisplaySettings {
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

fn settings_path() -> Option<PathBuf> {
    let config_dir = dirs::config_dir()?;
    Some(config_dir.join("dockspace").join("settings.json"))
}

pub fn load_settings() -> DemoSettings {
    match settings_path() {
        Some(path) => load_settings_from(&path),
        None => DemoSettings::default(),
    }
}

/// Read settings from `path`, falling back to defaults when the file is
/// missing or malformed.
pub fn load_settings_from(path: &Path) -> DemoSettings {
    match std::fs::read_to_string(path) {
        Ok(data) => match serde_json::from_str(&data) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Failed to parse {}: {}", path.display(), e);
                DemoSettings::default()
            }
        },
        Err(_) => DemoSettings::default(),
    }
}

pub fn save_settings(settings: &DemoSettings) {
    match settings_path() {
        Some(path) => save_settings_to(&path, settings),
        None => log::warn!("Cannot determine settings path"),
    }
}

pub fn save_settings_to(path: &Path, settings: &DemoSettings) {
    if let Some(parent) = path.parent() {
        if let Err(e) = std::fs::create_dir_all(parent) {
            log::error!("Failed to create config dir {}: {}", parent.display(), e);
            return;
        }
    }

    match serde_json::to_string_pretty(settings) {
        Ok(json) => {
            if let Err(e) = std::fs::write(path, json) {
                log::error!("Failed to write {}: {}", path.display(), e);
            }
        }
        Err(e) => {
            log::error!("Failed to serialize settings: {}", e);
        }
    }
}
