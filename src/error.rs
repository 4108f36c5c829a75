use bevy::prelude::Entity;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RigError {
    #[error("player velocity zoom only works with cameras in perspective mode")]
    VelocityZoomNeedsPerspective,
    #[error("no follow target has been assigned to the camera rig")]
    NoTarget,
    #[error("follow target {0:?} has no position")]
    TargetUnavailable(Entity),
}

impl RigError {
    /// Fatal errors are setup mistakes; the rig that hit one stops ticking.
    pub fn is_fatal(&self) -> bool {
        matches!(self, RigError::VelocityZoomNeedsPerspective)
    }
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to parse camera preset: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("{field} must be greater than zero, got {value}")]
    NotPositive { field: &'static str, value: f32 },
    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: f32 },
}
