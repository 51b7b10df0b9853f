//! Game settings
//!
//! Loaded from an optional JSON file. Out-of-range values are clamped rather
//! than rejected, and each correction is logged.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_BANNER_MS, DEFAULT_TRANSITION_SECS, DEFAULT_TURN_SECS};
use crate::error::{GameError, GameResult};
use crate::sim::{Bounds, ThresholdMode, TurnConfig};

/// Longest allowed turn (seconds)
pub const MAX_TURN_SECS: u32 = 600;
/// Longest allowed between-turns countdown (seconds)
pub const MAX_TRANSITION_SECS: u32 = 60;
/// Longest allowed phase banner (ms)
pub const MAX_BANNER_MS: u32 = 30_000;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Turn ===
    /// Length of each player's turn
    pub turn_duration_secs: u32,
    /// Whether phase thresholds scale with the turn length
    pub phase_thresholds: ThresholdMode,
    /// How long the phase banner stays up
    pub banner_ms: u32,

    // === Match ===
    /// Between-turns countdown
    pub transition_secs: u32,
    /// Spawn RNG seed; `None` picks a fresh one per match
    pub seed: Option<u64>,

    // === Viewport ===
    pub viewport_width: f32,
    pub viewport_height: f32,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            turn_duration_secs: DEFAULT_TURN_SECS,
            phase_thresholds: ThresholdMode::Fixed,
            banner_ms: DEFAULT_BANNER_MS,

            transition_secs: DEFAULT_TRANSITION_SECS,
            seed: None,

            viewport_width: 800.0,
            viewport_height: 600.0,

            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }
}

impl Settings {
    /// Parameters for each turn
    pub fn turn_config(&self) -> TurnConfig {
        TurnConfig {
            duration_secs: self.turn_duration_secs,
            thresholds: self.phase_thresholds,
            banner_ms: self.banner_ms,
        }
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.viewport_width, self.viewport_height)
    }

    /// Effective sound-effect gain (0 when muted)
    pub fn effective_sfx_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Clamp every value into range. Returns a description of each correction.
    pub fn validate(&mut self) -> Vec<String> {
        let mut fixes = Vec::new();

        let turn = self.turn_duration_secs.clamp(1, MAX_TURN_SECS);
        if turn != self.turn_duration_secs {
            fixes.push(format!("turn_duration_secs {} -> {}", self.turn_duration_secs, turn));
            self.turn_duration_secs = turn;
        }

        let transition = self.transition_secs.clamp(1, MAX_TRANSITION_SECS);
        if transition != self.transition_secs {
            fixes.push(format!("transition_secs {} -> {}", self.transition_secs, transition));
            self.transition_secs = transition;
        }

        let banner = self.banner_ms.min(MAX_BANNER_MS);
        if banner != self.banner_ms {
            fixes.push(format!("banner_ms {} -> {}", self.banner_ms, banner));
            self.banner_ms = banner;
        }

        for (name, value) in [
            ("viewport_width", &mut self.viewport_width),
            ("viewport_height", &mut self.viewport_height),
        ] {
            if !value.is_finite() || *value < 0.0 {
                fixes.push(format!("{} {} -> 0", name, value));
                *value = 0.0;
            }
        }

        for (name, value) in [
            ("master_volume", &mut self.master_volume),
            ("sfx_volume", &mut self.sfx_volume),
        ] {
            let clamped = if value.is_finite() { value.clamp(0.0, 1.0) } else { 1.0 };
            if clamped != *value {
                fixes.push(format!("{} {} -> {}", name, value, clamped));
                *value = clamped;
            }
        }

        for fix in &fixes {
            log::warn!("Settings corrected: {}", fix);
        }
        fixes
    }

    /// Load and validate settings from a JSON file
    pub fn load(path: &Path) -> GameResult<Self> {
        let json = std::fs::read_to_string(path).map_err(|source| GameError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut settings: Settings =
            serde_json::from_str(&json).map_err(|source| GameError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        settings.validate();
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load from `path` if given, falling back to defaults on any error
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            log::info!("Using default settings");
            return Self::default();
        };
        match Self::load(path) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("{}; using default settings", e);
                Self::default()
            }
        }
    }

    /// Save settings as pretty JSON
    pub fn save(&self, path: &Path) -> GameResult<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).map_err(|source| GameError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("zerguem-{}-{}.json", name, std::process::id()))
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.turn_duration_secs, 45);
        assert_eq!(settings.transition_secs, 5);
        assert_eq!(settings.phase_thresholds, ThresholdMode::Fixed);
        assert_eq!(settings.turn_config().banner_ms, 3000);
    }

    #[test]
    fn test_validate_clamps() {
        let mut settings = Settings {
            turn_duration_secs: 0,
            transition_secs: 500,
            master_volume: 1.7,
            viewport_width: -10.0,
            ..Default::default()
        };
        let fixes = settings.validate();
        assert_eq!(fixes.len(), 4);
        assert_eq!(settings.turn_duration_secs, 1);
        assert_eq!(settings.transition_secs, MAX_TRANSITION_SECS);
        assert_eq!(settings.master_volume, 1.0);
        assert_eq!(settings.viewport_width, 0.0);

        assert!(settings.validate().is_empty());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings: Settings =
            serde_json::from_str(r#"{ "turn_duration_secs": 30, "phase_thresholds": "Scaled" }"#)
                .unwrap();
        assert_eq!(settings.turn_duration_secs, 30);
        assert_eq!(settings.phase_thresholds, ThresholdMode::Scaled);
        assert_eq!(settings.transition_secs, 5);
    }

    #[test]
    fn test_save_then_load() {
        let path = temp_path("roundtrip");
        let settings = Settings {
            seed: Some(77),
            turn_duration_secs: 20,
            ..Default::default()
        };
        settings.save(&path).unwrap();
        let loaded = Settings::load(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_bad_file_falls_back() {
        let path = temp_path("broken");
        std::fs::write(&path, "not json").unwrap();
        assert!(matches!(Settings::load(&path), Err(GameError::Parse { .. })));
        assert_eq!(Settings::load_or_default(Some(path.as_path())), Settings::default());
        let _ = std::fs::remove_file(&path);

        let missing = temp_path("missing");
        assert!(matches!(Settings::load(&missing), Err(GameError::Io { .. })));
    }

    #[test]
    fn test_muted_volume() {
        let mut settings = Settings::default();
        assert!((settings.effective_sfx_volume() - 0.8).abs() < 1e-6);
        settings.muted = true;
        assert_eq!(settings.effective_sfx_volume(), 0.0);
    }
}
