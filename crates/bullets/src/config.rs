//! Projectile system tuning. Loaded from `bullets.ron` at startup.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::BulletError;

/// Capacities and scheduling knobs for [`crate::BulletSystem`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulletSettings {
    /// Projectiles preallocated in the dense store.
    #[serde(default = "default_initial_capacity")]
    pub initial_capacity: usize,
    /// Removal queue slots preallocated; grows to the live count when needed.
    #[serde(default = "default_removal_capacity")]
    pub removal_capacity: usize,
    /// Initial visual slot count; doubles on demand.
    #[serde(default = "default_visual_capacity")]
    pub visual_capacity: usize,
    /// Initial size of each per-prefab pool stack.
    #[serde(default = "default_stack_capacity")]
    pub pool_stack_capacity: usize,
    /// Minimum projectiles per scheduled parallel task.
    #[serde(default = "default_grain_size")]
    pub grain_size: usize,
}

fn default_initial_capacity() -> usize {
    4096
}
fn default_removal_capacity() -> usize {
    2048
}
fn default_visual_capacity() -> usize {
    128
}
fn default_stack_capacity() -> usize {
    128
}
fn default_grain_size() -> usize {
    32
}

impl Default for BulletSettings {
    fn default() -> Self {
        Self {
            initial_capacity: default_initial_capacity(),
            removal_capacity: default_removal_capacity(),
            visual_capacity: default_visual_capacity(),
            pool_stack_capacity: default_stack_capacity(),
            grain_size: default_grain_size(),
        }
    }
}

impl BulletSettings {
    /// Parse settings from RON text.
    pub fn from_ron_str(data: &str) -> Result<Self, BulletError> {
        let settings: Self = ron::from_str(data)?;
        Ok(settings.sanitized())
    }

    /// Load settings from `path`. If the file is missing or invalid, returns defaults.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(data) => match Self::from_ron_str(&data) {
                Ok(settings) => settings,
                Err(e) => {
                    log::warn!("Invalid bullet settings at {:?}: {}, using defaults", path, e);
                    Self::default()
                }
            },
            Err(e) => {
                log::debug!("No bullet settings at {:?} ({}), using defaults", path, e);
                Self::default()
            }
        }
    }

    /// Write settings as pretty RON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), BulletError> {
        let text = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())?;
        std::fs::write(path, text)?;
        Ok(())
    }

    fn sanitized(mut self) -> Self {
        self.grain_size = self.grain_size.max(1);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let settings = BulletSettings::from_ron_str("(grain_size: 64)").unwrap();
        assert_eq!(settings.grain_size, 64);
        assert_eq!(settings.initial_capacity, 4096);
        assert_eq!(settings.visual_capacity, 128);
    }

    #[test]
    fn zero_grain_is_clamped() {
        let settings = BulletSettings::from_ron_str("(grain_size: 0)").unwrap();
        assert_eq!(settings.grain_size, 1);
    }

    #[test]
    fn malformed_text_is_an_error() {
        assert!(matches!(
            BulletSettings::from_ron_str("(grain_size: \"lots\")"),
            Err(BulletError::Settings(_))
        ));
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let settings = BulletSettings::load("definitely/not/here/bullets.ron");
        assert_eq!(settings, BulletSettings::default());
    }

    #[test]
    fn save_then_load_keeps_values() {
        let path = std::env::temp_dir().join(format!("bullets-settings-{}.ron", std::process::id()));
        let settings = BulletSettings {
            grain_size: 8,
            ..Default::default()
        };
        settings.save(&path).unwrap();
        assert_eq!(BulletSettings::load(&path), settings);
        let _ = std::fs::remove_file(&path);
    }
}
