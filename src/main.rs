use std::path::Path;

use bevy::prelude::*;
use rand::Rng;

use snap_follow_cam::{
    camera_systems::CameraRigPlugin,
    components::MainCamera,
    game::GamePlugin,
    player::{spawn_player, PlayerPlugin},
    rig_tweaks::{spawn_snap_point, RigTweaksPlugin},
    settings::CameraRigSettings,
};

const SCREEN_WIDTH: f32 = 1280.0;
const SCREEN_HEIGHT: f32 = 720.0;
const PRESET_PATH: &str = "assets/camera_rig.toml";
const SNAP_POINT_COUNT: usize = 8;
const SNAP_FIELD_HALF_EXTENT: f32 = 900.0;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Snap Follow Camera".into(),
                resolution: (SCREEN_WIDTH, SCREEN_HEIGHT).into(),
                resizable: false,
                ..default()
            }),
            ..default()
        }))
        .add_plugins((GamePlugin, PlayerPlugin, CameraRigPlugin, RigTweaksPlugin))
        .add_systems(Startup, setup_scene)
        .run();
}

fn demo_rig_settings() -> CameraRigSettings {
    CameraRigSettings {
        camera_offset: Vec2::new(0.0, 40.0),
        snap_distance: 120.0,
        ..default()
    }
}

fn load_rig_preset() -> CameraRigSettings {
    CameraRigSettings::from_toml_file_or(Path::new(PRESET_PATH), demo_rig_settings())
}

fn setup_scene(mut commands: Commands) {
    let player = spawn_player(&mut commands, Vec2::ZERO);

    let mut rng = rand::thread_rng();
    let snap_points = (0..SNAP_POINT_COUNT)
        .map(|_| {
            let position = Vec2::new(
                rng.gen_range(-SNAP_FIELD_HALF_EXTENT..SNAP_FIELD_HALF_EXTENT),
                rng.gen_range(-SNAP_FIELD_HALF_EXTENT..SNAP_FIELD_HALF_EXTENT),
            );
            spawn_snap_point(&mut commands, position)
        })
        .collect();

    let settings = CameraRigSettings {
        player: Some(player),
        snap_points,
        ..load_rig_preset()
    };

    let mut camera_bundle = Camera2dBundle::default();
    camera_bundle.transform.translation.z = 999.0;
    commands.spawn((camera_bundle, settings, MainCamera));
}
