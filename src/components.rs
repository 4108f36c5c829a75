use bevy::prelude::*;

/// Planar velocity in world units per second.
#[derive(Component, Reflect, Debug, Clone, Copy, Default, Deref, DerefMut)]
#[reflect(Component)]
pub struct Velocity(pub Vec2);

#[derive(Component)]
pub struct SnapPoint;

/// Marker for the camera the demo drives.
#[derive(Component)]
pub struct MainCamera;
