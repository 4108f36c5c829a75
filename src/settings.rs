//! Designer-facing configuration for a snap-follow camera rig.
//!
//! Everything here is plain data so any tool (an inspector, a tweak overlay,
//! a TOML preset) can read and write it between frames.

use std::path::Path;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::SettingsError;

pub const DEFAULT_EFFECT_AMOUNT: f32 = 0.5;
pub const DEFAULT_EFFECT_LIMIT: f32 = 5.0;
pub const DEFAULT_STIFFNESS: f32 = 5.0;
pub const DEFAULT_SNAP_DISTANCE: f32 = 10.0;
pub const DEFAULT_SNAP_STIFFNESS: f32 = 7.0;
/// Upper bound of the effect amount slider designers work with.
pub const MAX_EFFECT_AMOUNT: f32 = 1.0;

/// How the camera closes the gap to its target.
#[derive(Reflect, Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FollowMode {
    /// Interpolate toward the target at the configured stiffness.
    #[default]
    Smooth,
    /// Jump to the target every frame.
    Stuck,
}

impl FollowMode {
    pub fn toggled(self) -> Self {
        match self {
            FollowMode::Smooth => FollowMode::Stuck,
            FollowMode::Stuck => FollowMode::Smooth,
        }
    }
}

#[derive(Component, Reflect, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[reflect(Component)]
#[serde(default)]
pub struct CameraRigSettings {
    /// Planar offset added to the tracked player's position.
    pub camera_offset: Vec2,
    pub offset_applies_to_snap_points: bool,
    /// Pull the camera along its depth axis as the player speeds up.
    pub player_velocity_effects_z: bool,
    pub effect_amount: f32,
    /// Zero disables the limit.
    pub effect_limit: f32,

    /// Entity the camera follows. Scene references are never part of a preset.
    #[serde(skip)]
    pub player: Option<Entity>,
    pub follow_mode: FollowMode,
    pub stiffness: f32,
    pub use_unscaled_time: bool,

    pub snapping_enabled: bool,
    /// Searched in order; the first point in range wins. Duplicates are allowed.
    #[serde(skip)]
    pub snap_points: Vec<Entity>,
    pub snap_distance: f32,
    pub snap_stiffness: f32,
}

impl Default for CameraRigSettings {
    fn default() -> Self {
        Self {
            camera_offset: Vec2::ZERO,
            offset_applies_to_snap_points: false,
            player_velocity_effects_z: false,
            effect_amount: DEFAULT_EFFECT_AMOUNT,
            effect_limit: DEFAULT_EFFECT_LIMIT,
            player: None,
            follow_mode: FollowMode::Smooth,
            stiffness: DEFAULT_STIFFNESS,
            use_unscaled_time: false,
            snapping_enabled: true,
            snap_points: Vec::new(),
            snap_distance: DEFAULT_SNAP_DISTANCE,
            snap_stiffness: DEFAULT_SNAP_STIFFNESS,
        }
    }
}

impl CameraRigSettings {
    pub fn following(player: Entity) -> Self {
        Self {
            player: Some(player),
            ..default()
        }
    }

    /// Parses a tuning preset. Missing keys keep their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self, SettingsError> {
        let settings: Self = toml::from_str(source)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Loads a preset file, falling back to `fallback` when it is missing or invalid.
    pub fn from_toml_file_or(path: &Path, fallback: Self) -> Self {
        let Ok(source) = std::fs::read_to_string(path) else {
            return fallback;
        };
        match Self::from_toml_str(&source) {
            Ok(settings) => {
                info!("Loaded camera rig preset from {}", path.display());
                settings
            }
            Err(err) => {
                warn!("Ignoring {}: {err}", path.display());
                fallback
            }
        }
    }

    /// Checks the numeric ranges the resolver relies on.
    pub fn validate(&self) -> Result<(), SettingsError> {
        for (field, value) in [
            ("stiffness", self.stiffness),
            ("snap_stiffness", self.snap_stiffness),
        ] {
            if value.is_nan() || value <= 0.0 {
                return Err(SettingsError::NotPositive { field, value });
            }
        }
        for (field, value) in [
            ("snap_distance", self.snap_distance),
            ("effect_amount", self.effect_amount),
            ("effect_limit", self.effect_limit),
        ] {
            if value.is_nan() || value < 0.0 {
                return Err(SettingsError::Negative { field, value });
            }
        }
        Ok(())
    }

    pub fn set_effect_amount(&mut self, amount: f32) {
        self.effect_amount = amount.clamp(0.0, MAX_EFFECT_AMOUNT);
    }

    pub fn push_snap_point(&mut self, point: Entity) {
        self.snap_points.push(point);
    }

    pub fn pop_snap_point(&mut self) -> Option<Entity> {
        self.snap_points.pop()
    }

    /// Removes the point at `index`, keeping the order of the rest.
    pub fn remove_snap_point(&mut self, index: usize) -> Option<Entity> {
        if index < self.snap_points.len() {
            Some(self.snap_points.remove(index))
        } else {
            None
        }
    }
}
