//! Per-frame camera position resolution.
//!
//! Pure functions over [`RigState`] and [`CameraRigSettings`]; the Bevy
//! systems in `camera_systems` are only a host that feeds them positions
//! and frame times.

use bevy::prelude::*;

use crate::error::RigError;
use crate::settings::{CameraRigSettings, FollowMode};

/// Looks up live data for the opaque handles a rig refers to.
pub trait PositionSource {
    /// Current planar position of `handle`, if it still exists.
    fn planar_position(&self, handle: Entity) -> Option<Vec2>;
    /// Velocity of `handle`, if it carries a velocity source.
    fn velocity(&self, handle: Entity) -> Option<Vec2>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectionKind {
    Perspective,
    Orthographic,
}

/// Elapsed time for the current frame, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameDelta {
    pub scaled: f32,
    pub unscaled: f32,
}

impl FrameDelta {
    pub fn new(scaled: f32, unscaled: f32) -> Self {
        Self { scaled, unscaled }
    }

    pub fn for_settings(&self, settings: &CameraRigSettings) -> f32 {
        if settings.use_unscaled_time {
            self.unscaled
        } else {
            self.scaled
        }
    }
}

/// Runtime state of a single camera rig.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct RigState {
    camera_depth: f32,
    pub position: Vec3,
    pub has_warned_no_snap_points: bool,
    pub has_warned_missing_target: bool,
    /// Set after a fatal configuration error; a halted rig no longer moves.
    pub halted: bool,
}

impl RigState {
    /// The resting depth captured at initialization.
    pub fn camera_depth(&self) -> f32 {
        self.camera_depth
    }
}

/// Where the camera wants to be this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedTarget {
    pub position: Vec3,
    /// List index and handle of the snap point that captured the target.
    pub snapped_to: Option<(usize, Entity)>,
}

impl ResolvedTarget {
    pub fn is_snapped(&self) -> bool {
        self.snapped_to.is_some()
    }
}

pub fn init(initial_position: Vec3) -> RigState {
    RigState {
        camera_depth: initial_position.z,
        position: initial_position,
        has_warned_no_snap_points: false,
        has_warned_missing_target: false,
        halted: false,
    }
}

pub fn compute_depth(
    state: &RigState,
    settings: &CameraRigSettings,
    projection: ProjectionKind,
    player_velocity: Option<Vec2>,
) -> Result<f32, RigError> {
    if !settings.player_velocity_effects_z {
        return Ok(state.camera_depth);
    }
    if projection == ProjectionKind::Orthographic {
        return Err(RigError::VelocityZoomNeedsPerspective);
    }
    let Some(velocity) = player_velocity else {
        error!("Failed to get velocity from player: it has no Velocity component");
        return Ok(state.camera_depth);
    };

    let velo = velocity.length() * settings.effect_amount;
    if settings.effect_limit == 0.0 || velo < settings.effect_limit {
        Ok(state.camera_depth - velo)
    } else {
        // At or past the limit the clamped velocity itself is the depth, not an offset from it.
        Ok(velo.min(settings.effect_limit).max(0.0))
    }
}

pub fn resolve_target(
    state: &mut RigState,
    settings: &CameraRigSettings,
    player_position: Vec2,
    depth: f32,
    positions: &impl PositionSource,
) -> ResolvedTarget {
    let base = player_position + settings.camera_offset;
    let unsnapped = ResolvedTarget {
        position: base.extend(depth),
        snapped_to: None,
    };
    if !settings.snapping_enabled {
        return unsnapped;
    }
    if settings.snap_points.is_empty() {
        if !state.has_warned_no_snap_points {
            warn!("Snapping is enabled but no snap points have been added");
            state.has_warned_no_snap_points = true;
        }
        return unsnapped;
    }

    for (index, &point) in settings.snap_points.iter().enumerate() {
        let Some(point_position) = positions.planar_position(point) else {
            debug!("Snap point {point:?} has no position, skipping");
            continue;
        };
        if point_position.distance(base) < settings.snap_distance {
            let snapped = if settings.offset_applies_to_snap_points {
                point_position + settings.camera_offset
            } else {
                point_position
            };
            return ResolvedTarget {
                position: snapped.extend(depth),
                snapped_to: Some((index, point)),
            };
        }
    }
    unsnapped
}

pub fn step_position(
    current: Vec3,
    target: &ResolvedTarget,
    settings: &CameraRigSettings,
    frame: FrameDelta,
) -> Vec3 {
    match settings.follow_mode {
        FollowMode::Stuck => target.position,
        FollowMode::Smooth => {
            let rate = if target.is_snapped() {
                settings.snap_stiffness
            } else {
                settings.stiffness
            };
            let t = (rate * frame.for_settings(settings)).clamp(0.0, 1.0);
            if t >= 1.0 {
                target.position
            } else {
                current.lerp(target.position, t)
            }
        }
    }
}

/// Advances the rig by one frame and returns the committed position.
///
/// A halted rig keeps its last position. Fatal errors halt the rig before
/// they are returned.
pub fn tick(
    state: &mut RigState,
    settings: &CameraRigSettings,
    projection: ProjectionKind,
    frame: FrameDelta,
    positions: &impl PositionSource,
) -> Result<Vec3, RigError> {
    if state.halted {
        return Ok(state.position);
    }
    // The projection mismatch is fatal whether or not there is anything to follow.
    if settings.player_velocity_effects_z && projection == ProjectionKind::Orthographic {
        state.halted = true;
        return Err(RigError::VelocityZoomNeedsPerspective);
    }
    let player = settings.player.ok_or(RigError::NoTarget)?;
    let player_position = positions
        .planar_position(player)
        .ok_or(RigError::TargetUnavailable(player))?;

    let depth = match compute_depth(state, settings, projection, positions.velocity(player)) {
        Ok(depth) => depth,
        Err(err) => {
            state.halted = err.is_fatal();
            return Err(err);
        }
    };
    let target = resolve_target(state, settings, player_position, depth, positions);
    state.position = step_position(state.position, &target, settings, frame);
    Ok(state.position)
}
