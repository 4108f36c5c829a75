use bevy::prelude::*;
use bevy::time::{Real, Virtual};

use crate::{
    components::Velocity,
    resolver::{self, FrameDelta, PositionSource, ProjectionKind, RigState},
    settings::{CameraRigSettings, FollowMode},
};

pub struct CameraRigPlugin;

impl Plugin for CameraRigPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<CameraRigSettings>()
            .register_type::<FollowMode>()
            .register_type::<Velocity>()
            .add_systems(Update, (init_camera_rigs, camera_follow_system).chain());
    }
}

/// Everything a rig can follow or snap to. Cameras themselves are excluded.
pub type TrackedQuery<'w, 's> =
    Query<'w, 's, (&'static Transform, Option<&'static Velocity>), Without<CameraRigSettings>>;

impl<'w, 's> PositionSource for TrackedQuery<'w, 's> {
    fn planar_position(&self, handle: Entity) -> Option<Vec2> {
        self.get(handle)
            .ok()
            .map(|(transform, _)| transform.translation.truncate())
    }

    fn velocity(&self, handle: Entity) -> Option<Vec2> {
        self.get(handle)
            .ok()
            .and_then(|(_, velocity)| velocity.map(|v| v.0))
    }
}

pub fn projection_kind(
    projection: Option<&Projection>,
    orthographic: Option<&OrthographicProjection>,
) -> ProjectionKind {
    match (projection, orthographic) {
        (Some(Projection::Orthographic(_)), _) | (_, Some(_)) => ProjectionKind::Orthographic,
        _ => ProjectionKind::Perspective,
    }
}

/// Captures the starting position of every new rig camera. Runs once per camera.
fn init_camera_rigs(
    mut commands: Commands,
    new_rigs: Query<(Entity, &CameraRigSettings, &Transform), Without<RigState>>,
) {
    for (entity, settings, transform) in new_rigs.iter() {
        if let Err(err) = settings.validate() {
            warn!("Camera rig {entity:?} has invalid settings: {err}");
        }
        debug!(
            "Camera rig {entity:?} starts at {} with depth {}",
            transform.translation, transform.translation.z
        );
        commands
            .entity(entity)
            .insert(resolver::init(transform.translation));
    }
}

fn camera_follow_system(
    virtual_time: Res<Time<Virtual>>,
    real_time: Res<Time<Real>>,
    tracked: TrackedQuery,
    mut rigs: Query<(
        Entity,
        &CameraRigSettings,
        &mut RigState,
        &mut Transform,
        Option<&Projection>,
        Option<&OrthographicProjection>,
    )>,
) {
    let frame = FrameDelta::new(virtual_time.delta_seconds(), real_time.delta_seconds());
    for (entity, settings, mut state, mut transform, projection, orthographic) in rigs.iter_mut() {
        let kind = projection_kind(projection, orthographic);
        match resolver::tick(&mut state, settings, kind, frame, &tracked) {
            Ok(position) => {
                state.has_warned_missing_target = false;
                transform.translation = position;
            }
            Err(err) if err.is_fatal() => {
                error!("Camera rig {entity:?} halted: {err}");
            }
            Err(err) => {
                if !state.has_warned_missing_target {
                    warn!("Camera rig {entity:?} is not following anything: {err}");
                    state.has_warned_missing_target = true;
                }
            }
        }
    }
}
