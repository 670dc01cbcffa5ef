//! Game settings and preferences
//!
//! Persisted as JSON next to the executable, separately from game saves.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    pub muted: bool,

    // === HUD ===
    /// Show FPS counter
    pub show_fps: bool,
    /// Show floating pickup text
    pub pickup_text: bool,

    // === Accessibility ===
    /// Reduced motion (minimize shake, flashes)
    pub reduced_motion: bool,
    /// High contrast mode
    pub high_contrast: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            muted: false,

            show_fps: false,
            pickup_text: true,

            reduced_motion: false,
            high_contrast: false,
        }
    }
}

impl Settings {
    /// Settings file name
    const FILE_NAME: &'static str = "skyward_settings.json";

    pub fn default_path() -> PathBuf {
        PathBuf::from(Self::FILE_NAME)
    }

    /// Load settings from disk; any read or parse failure falls back to
    /// defaults with a warning, never an error
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Malformed settings file {}: {e}", path.display());
                    Self::default()
                }
            },
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::info!("No settings file, using defaults");
                Self::default()
            }
            Err(e) => {
                log::warn!("Failed to read settings {}: {e}", path.display());
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> io::Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(io::Error::other)?;
        fs::write(path, json)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_yields_defaults() {
        let settings = Settings::load(Path::new("does_not_exist_settings.json"));
        assert_eq!(settings.master_volume, 0.8);
        assert!(!settings.muted);
    }

    #[test]
    fn test_save_load_round_trip() {
        let dir = std::env::temp_dir();
        let path = dir.join("skyward_settings_test.json");
        let mut settings = Settings::default();
        settings.muted = true;
        settings.sfx_volume = 0.25;
        settings.save(&path).unwrap();

        let loaded = Settings::load(&path);
        assert!(loaded.muted);
        assert_eq!(loaded.sfx_volume, 0.25);
        let _ = std::fs::remove_file(&path);
    }
}
