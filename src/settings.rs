/// Persisted user preferences
///
/// A small JSON file in the user's config directory remembers choices that
/// should survive restarts: the padding color and the theme. Everything
/// else is per-session and resets with each import.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::state::params::{FillColor, PALETTE};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Label of the selected palette entry (falls back to black if unknown)
    pub fill_color: String,
    pub dark_theme: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            fill_color: PALETTE[0].label.to_string(),
            dark_theme: true,
        }
    }
}

impl Settings {
    /// Where the settings file lives:
    /// - Linux: ~/.config/panosplit/settings.json
    /// - macOS: ~/Library/Application Support/panosplit/settings.json
    /// - Windows: %APPDATA%\panosplit\settings.json
    fn config_path() -> PathBuf {
        let mut path = dirs::config_dir()
            .or_else(dirs::home_dir)
            .expect("Could not determine config directory");

        path.push("panosplit");
        path.push("settings.json");
        path
    }

    /// Load saved preferences, falling back to defaults on any problem
    pub fn load() -> Self {
        let path = Self::config_path();
        match std::fs::read_to_string(&path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(settings) => settings,
                Err(e) => {
                    log::warn!("ignoring unreadable settings file {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    /// Write the preferences back to disk
    pub async fn save(self) -> Result<(), String> {
        let path = Self::config_path();
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| e.to_string())?;
        }

        let json = serde_json::to_string_pretty(&self).map_err(|e| e.to_string())?;
        tokio::fs::write(&path, json).await.map_err(|e| e.to_string())
    }

    /// Resolve the stored label back into a palette entry
    pub fn fill_color(&self) -> FillColor {
        PALETTE
            .iter()
            .find(|color| color.label == self.fill_color)
            .copied()
            .unwrap_or(PALETTE[0])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_roundtrip() {
        let settings = Settings {
            fill_color: "White".to_string(),
            dark_theme: false,
        };

        let json = serde_json::to_string(&settings).unwrap();
        let restored: Settings = serde_json::from_str(&json).unwrap();

        assert_eq!(settings, restored);
        assert_eq!(restored.fill_color().label, "White");
    }

    #[test]
    fn test_unknown_label_falls_back_to_black() {
        let settings = Settings {
            fill_color: "Chartreuse".to_string(),
            dark_theme: true,
        };
        assert_eq!(settings.fill_color(), PALETTE[0]);
    }

    #[test]
    fn test_default_matches_palette_head() {
        assert_eq!(Settings::default().fill_color(), PALETTE[0]);
    }
}
