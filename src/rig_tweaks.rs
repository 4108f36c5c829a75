// src/rig_tweaks.rs
//! Keyboard editing of live camera rig settings while the game is paused.
use bevy::prelude::*;

use crate::{
    components::{MainCamera, SnapPoint},
    game::AppState,
    player::Player,
    settings::CameraRigSettings,
};

pub const SNAP_POINT_SIZE: Vec2 = Vec2::new(16.0, 16.0);
const SNAP_POINT_COLOR: Color = Color::rgb(0.95, 0.75, 0.2);
const SNAP_DISTANCE_STEP: f32 = 10.0;
const EFFECT_AMOUNT_STEP: f32 = 0.1;

pub struct RigTweaksPlugin;

impl Plugin for RigTweaksPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (rig_toggle_system, rig_snap_point_system).run_if(in_state(AppState::Paused)),
        );
    }
}

pub fn spawn_snap_point(commands: &mut Commands, position: Vec2) -> Entity {
    commands
        .spawn((
            SpriteBundle {
                sprite: Sprite {
                    color: SNAP_POINT_COLOR,
                    custom_size: Some(SNAP_POINT_SIZE),
                    ..default()
                },
                transform: Transform::from_translation(position.extend(0.5)),
                ..default()
            },
            SnapPoint,
            Name::new("SnapPoint"),
        ))
        .id()
}

fn rig_toggle_system(
    keyboard_input: Res<ButtonInput<KeyCode>>,
    mut rigs: Query<&mut CameraRigSettings, With<MainCamera>>,
) {
    for mut settings in rigs.iter_mut() {
        if keyboard_input.just_pressed(KeyCode::KeyF) {
            settings.follow_mode = settings.follow_mode.toggled();
            info!("Follow mode: {:?}", settings.follow_mode);
        }
        if keyboard_input.just_pressed(KeyCode::KeyN) {
            settings.snapping_enabled = !settings.snapping_enabled;
            info!("Snapping enabled: {}", settings.snapping_enabled);
        }
        if keyboard_input.just_pressed(KeyCode::KeyO) {
            settings.offset_applies_to_snap_points = !settings.offset_applies_to_snap_points;
            info!("Offset applies to snap points: {}", settings.offset_applies_to_snap_points);
        }
        if keyboard_input.just_pressed(KeyCode::KeyU) {
            settings.use_unscaled_time = !settings.use_unscaled_time;
            info!("Use unscaled time: {}", settings.use_unscaled_time);
        }
        if keyboard_input.just_pressed(KeyCode::KeyV) {
            settings.player_velocity_effects_z = !settings.player_velocity_effects_z;
            info!("Player velocity effects z: {}", settings.player_velocity_effects_z);
        }
        if keyboard_input.just_pressed(KeyCode::Equal) {
            let amount = settings.effect_amount + EFFECT_AMOUNT_STEP;
            settings.set_effect_amount(amount);
            info!("Effect amount: {}", settings.effect_amount);
        }
        if keyboard_input.just_pressed(KeyCode::Minus) {
            let amount = settings.effect_amount - EFFECT_AMOUNT_STEP;
            settings.set_effect_amount(amount);
            info!("Effect amount: {}", settings.effect_amount);
        }
        if keyboard_input.just_pressed(KeyCode::BracketRight) {
            settings.snap_distance += SNAP_DISTANCE_STEP;
            info!("Snap distance: {}", settings.snap_distance);
        }
        if keyboard_input.just_pressed(KeyCode::BracketLeft) {
            settings.snap_distance = (settings.snap_distance - SNAP_DISTANCE_STEP).max(0.0);
            info!("Snap distance: {}", settings.snap_distance);
        }
    }
}

fn rig_snap_point_system(
    mut commands: Commands,
    keyboard_input: Res<ButtonInput<KeyCode>>,
    player_query: Query<&Transform, With<Player>>,
    snap_point_query: Query<&Transform, With<SnapPoint>>,
    mut rigs: Query<&mut CameraRigSettings, With<MainCamera>>,
) {
    let Ok(mut settings) = rigs.get_single_mut() else { return; };
    let player_position = player_query
        .get_single()
        .ok()
        .map(|transform| transform.translation.truncate());

    if keyboard_input.just_pressed(KeyCode::KeyP) {
        let Some(position) = player_position else { return; };
        let point = spawn_snap_point(&mut commands, position);
        settings.push_snap_point(point);
        info!("Added snap point {} at {}", settings.snap_points.len() - 1, position);
    }

    let removed = if keyboard_input.just_pressed(KeyCode::Backspace) {
        settings.pop_snap_point()
    } else if keyboard_input.just_pressed(KeyCode::Delete) {
        let nearest = player_position
            .and_then(|player| nearest_snap_point(&settings.snap_points, player, &snap_point_query));
        nearest.and_then(|index| settings.remove_snap_point(index))
    } else {
        None
    };
    if let Some(point) = removed {
        info!("Removed snap point {point:?}, {} left", settings.snap_points.len());
        // Duplicates keep the entity alive until the last reference goes.
        if snap_point_query.contains(point) && !settings.snap_points.contains(&point) {
            commands.entity(point).despawn_recursive();
        }
    }
}

/// Index of the listed snap point closest to `position`.
fn nearest_snap_point(
    snap_points: &[Entity],
    position: Vec2,
    snap_point_query: &Query<&Transform, With<SnapPoint>>,
) -> Option<usize> {
    snap_points
        .iter()
        .enumerate()
        .filter_map(|(index, &point)| {
            let transform = snap_point_query.get(point).ok()?;
            Some((index, transform.translation.truncate().distance(position)))
        })
        .min_by(|(_, a), (_, b)| a.total_cmp(b))
        .map(|(index, _)| index)
}
