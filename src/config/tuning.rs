use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::error::ConfigError;
use crate::game::types::Seconds;

/// All tunable player parameters, loaded from tuning.ron.
#[derive(Debug, Clone, Resource, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Fixed simulation step (seconds).
    pub dt: f32,
    pub pixels_per_unit: f32,
    /// Movement speed (world units per second at full stick deflection).
    pub move_speed: f32,
    /// Speed factor while sprint is held.
    pub sprint_multiplier: f32,
    /// Max turn rate while aiming with the directional stick.
    pub rotation_speed_deg_per_sec: f32,
    /// Squared stick magnitude at or below which directional aim is ignored.
    pub directional_deadzone: f32,
    /// Minimum time between two shots (seconds).
    pub fire_rate_period: f32,
    pub max_ammo: u32,
    /// Time from magazine empty to full (seconds).
    pub reload_duration: f32,
    /// Impulse magnitude handed to each projectile.
    pub fire_force: f32,
    pub projectile_mass: f32,
    /// Suggested projectile lifetime (seconds).
    pub projectile_ttl: f32,
    pub projectile_radius: f32,
    /// Muzzle position relative to the avatar, in the avatar's facing frame (+X forward).
    pub muzzle_offset: [f32; 2],
    /// Added to the facing angle when rotating the sprite (art whose "forward" is +Y uses -90).
    pub sprite_forward_offset_deg: f32,
    /// Directional stick also holds the trigger (twin-stick style).
    pub auto_fire_on_directional_aim: bool,
    pub avatar_radius: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            dt: 1.0 / 60.0,
            pixels_per_unit: 32.0,
            move_speed: 5.0,
            sprint_multiplier: 2.0,
            rotation_speed_deg_per_sec: 540.0,
            directional_deadzone: 0.1,
            fire_rate_period: 0.5,
            max_ammo: 10,
            reload_duration: 2.813,
            fire_force: 20.0,
            projectile_mass: 1.0,
            projectile_ttl: 0.5,
            projectile_radius: 0.12,
            muzzle_offset: [0.6, 0.0],
            sprite_forward_offset_deg: 0.0,
            auto_fire_on_directional_aim: true,
            avatar_radius: 0.5,
        }
    }
}

impl Tuning {
    /// Get the data directory for tuning files.
    pub fn data_dir() -> PathBuf {
        let base = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
        base.join("twin_aim")
    }

    /// Path to the tuning file.
    pub fn file_path() -> PathBuf {
        Self::data_dir().join("tuning.ron")
    }

    pub fn from_ron_str(contents: &str) -> Result<Self, ron::error::SpannedError> {
        ron::from_str(contents)
    }

    /// Load from file, or create default if not found.
    pub fn load_or_default() -> Self {
        let path = Self::file_path();
        if path.exists() {
            match std::fs::read_to_string(&path) {
                Ok(contents) => match Self::from_ron_str(&contents) {
                    Ok(tuning) => return tuning,
                    Err(e) => {
                        warn!("Failed to parse tuning.ron: {e}, using defaults");
                    }
                },
                Err(e) => {
                    warn!("Failed to read tuning.ron: {e}, using defaults");
                }
            }
        }
        let tuning = Self::default();
        tuning.save();
        tuning
    }

    /// Save current tuning to file.
    pub fn save(&self) {
        let path = Self::file_path();
        if let Some(parent) = path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        let pretty = ron::ser::PrettyConfig::default();
        match ron::ser::to_string_pretty(self, pretty) {
            Ok(s) => {
                if let Err(e) = std::fs::write(&path, s) {
                    warn!("Failed to write tuning.ron: {e}");
                }
            }
            Err(e) => {
                warn!("Failed to serialize tuning: {e}");
            }
        }
    }

    /// Reload from the tuning file (called by key press).
    ///
    /// A missing, unreadable, malformed or invalid file keeps the current
    /// values and leaves the file untouched. Returns whether anything was applied.
    pub fn reload(&mut self) -> bool {
        match self.reload_from(&Self::file_path()) {
            Ok(()) => {
                info!("Tuning reloaded");
                true
            }
            Err(e) => {
                warn!("Rejected tuning reload: {e}");
                false
            }
        }
    }

    pub fn reload_from(&mut self, path: &Path) -> Result<(), ConfigError> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| ConfigError::Unreadable(e.to_string()))?;
        let candidate =
            Self::from_ron_str(&contents).map_err(|e| ConfigError::Malformed(e.to_string()))?;
        candidate.validate()?;
        *self = candidate;
        Ok(())
    }

    /// Check every field the tick loop divides by, counts down, or scales with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("dt", self.dt),
            ("move_speed", self.move_speed),
            ("sprint_multiplier", self.sprint_multiplier),
            ("rotation_speed_deg_per_sec", self.rotation_speed_deg_per_sec),
            ("fire_rate_period", self.fire_rate_period),
            ("reload_duration", self.reload_duration),
            ("fire_force", self.fire_force),
            ("projectile_mass", self.projectile_mass),
            ("projectile_ttl", self.projectile_ttl),
        ];
        for (field, value) in positive {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { field });
            }
            if value <= 0.0 {
                return Err(ConfigError::NonPositive { field, value });
            }
        }

        if !self.directional_deadzone.is_finite() {
            return Err(ConfigError::NonFinite { field: "directional_deadzone" });
        }
        if self.directional_deadzone < 0.0 {
            return Err(ConfigError::NegativeDeadzone(self.directional_deadzone));
        }
        if self.max_ammo == 0 {
            return Err(ConfigError::ZeroMaxAmmo);
        }
        if !self.muzzle_offset.iter().all(|v| v.is_finite()) {
            return Err(ConfigError::NonFinite { field: "muzzle_offset" });
        }
        if !self.sprite_forward_offset_deg.is_finite() {
            return Err(ConfigError::NonFinite { field: "sprite_forward_offset_deg" });
        }
        Ok(())
    }

    pub fn fire_rate_period(&self) -> Seconds {
        Seconds::new(self.fire_rate_period)
    }

    pub fn reload_duration(&self) -> Seconds {
        Seconds::new(self.reload_duration)
    }

    pub fn muzzle_offset(&self) -> Vec2 {
        Vec2::from_array(self.muzzle_offset)
    }
}
