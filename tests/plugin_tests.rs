use bevy::prelude::*;
use snap_follow_cam::camera_systems::{projection_kind, CameraRigPlugin};
use snap_follow_cam::components::{MainCamera, SnapPoint, Velocity};
use snap_follow_cam::game::AppState;
use snap_follow_cam::player::Player;
use snap_follow_cam::rig_tweaks::RigTweaksPlugin;
use snap_follow_cam::resolver::{ProjectionKind, RigState};
use snap_follow_cam::settings::{CameraRigSettings, FollowMode};

const CAMERA_START: Vec3 = Vec3::new(0.0, 0.0, 999.0);

fn setup_test_app() -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins).add_plugins(CameraRigPlugin);
    app
}

fn spawn_player(app: &mut App, position: Vec2) -> Entity {
    app.world
        .spawn((Transform::from_translation(position.extend(1.0)), Velocity(Vec2::ZERO)))
        .id()
}

fn spawn_rig(app: &mut App, settings: CameraRigSettings) -> Entity {
    app.world
        .spawn((Transform::from_translation(CAMERA_START), settings))
        .id()
}

fn camera_translation(app: &App, camera: Entity) -> Vec3 {
    app.world.get::<Transform>(camera).unwrap().translation
}

#[test]
fn test_rig_follows_player_in_stuck_mode() {
    let mut app = setup_test_app();
    let player = spawn_player(&mut app, Vec2::new(5.0, 0.0));
    let camera = spawn_rig(&mut app, CameraRigSettings {
        camera_offset: Vec2::new(0.0, 2.0),
        follow_mode: FollowMode::Stuck,
        snapping_enabled: false,
        ..CameraRigSettings::following(player)
    });

    app.update();
    app.update();
    assert_eq!(camera_translation(&app, camera), Vec3::new(5.0, 2.0, 999.0));
    assert_eq!(app.world.get::<RigState>(camera).unwrap().camera_depth(), 999.0);

    app.world.get_mut::<Transform>(player).unwrap().translation = Vec3::new(-8.0, 3.0, 1.0);
    app.update();
    assert_eq!(camera_translation(&app, camera), Vec3::new(-8.0, 5.0, 999.0));
}

#[test]
fn test_rig_snaps_to_snap_point_entity() {
    let mut app = setup_test_app();
    let player = spawn_player(&mut app, Vec2::new(9.0, 9.0));
    let point = app.world.spawn(Transform::from_xyz(10.0, 10.0, 0.0)).id();
    let camera = spawn_rig(&mut app, CameraRigSettings {
        follow_mode: FollowMode::Stuck,
        snap_points: vec![point],
        snap_distance: 3.0,
        ..CameraRigSettings::following(player)
    });

    app.update();
    app.update();
    assert_eq!(camera_translation(&app, camera), Vec3::new(10.0, 10.0, 999.0));
}

#[test]
fn test_orthographic_velocity_zoom_halts_rig() {
    let mut app = setup_test_app();
    let player = spawn_player(&mut app, Vec2::new(5.0, 5.0));
    let camera = app
        .world
        .spawn((
            Transform::from_translation(CAMERA_START),
            OrthographicProjection::default(),
            CameraRigSettings {
                follow_mode: FollowMode::Stuck,
                player_velocity_effects_z: true,
                ..CameraRigSettings::following(player)
            },
        ))
        .id();

    app.update();
    app.update();
    app.update();
    assert!(app.world.get::<RigState>(camera).unwrap().halted);
    assert_eq!(camera_translation(&app, camera), CAMERA_START);
}

#[test]
fn test_missing_player_leaves_camera_in_place() {
    let mut app = setup_test_app();
    let player = spawn_player(&mut app, Vec2::new(5.0, 5.0));
    let camera = spawn_rig(&mut app, CameraRigSettings {
        follow_mode: FollowMode::Stuck,
        snapping_enabled: false,
        ..CameraRigSettings::following(player)
    });

    app.update();
    app.update();
    assert_eq!(camera_translation(&app, camera), Vec3::new(5.0, 5.0, 999.0));

    app.world.despawn(player);
    app.update();
    app.update();
    let state = app.world.get::<RigState>(camera).unwrap();
    assert!(state.has_warned_missing_target);
    assert!(!state.halted);
    assert_eq!(camera_translation(&app, camera), Vec3::new(5.0, 5.0, 999.0));
}

#[test]
fn test_projection_kind_detection() {
    let perspective = Projection::Perspective(PerspectiveProjection::default());
    let orthographic = Projection::Orthographic(OrthographicProjection::default());
    assert_eq!(projection_kind(Some(&perspective), None), ProjectionKind::Perspective);
    assert_eq!(projection_kind(Some(&orthographic), None), ProjectionKind::Orthographic);
    assert_eq!(
        projection_kind(None, Some(&OrthographicProjection::default())),
        ProjectionKind::Orthographic
    );
    assert_eq!(projection_kind(None, None), ProjectionKind::Perspective);
}

fn setup_paused_tweak_app() -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .init_resource::<ButtonInput<KeyCode>>()
        .init_state::<AppState>()
        .add_plugins(RigTweaksPlugin);
    app.world.resource_mut::<NextState<AppState>>().set(AppState::Paused);
    app.update();
    app
}

fn press_key(app: &mut App, key: KeyCode) {
    let mut input = app.world.resource_mut::<ButtonInput<KeyCode>>();
    input.clear();
    input.press(key);
    app.update();
}

fn rig_snap_points(app: &App, camera: Entity) -> Vec<Entity> {
    app.world.get::<CameraRigSettings>(camera).unwrap().snap_points.clone()
}

#[test]
fn test_tweaks_add_and_pop_snap_point() {
    let mut app = setup_paused_tweak_app();
    app.world.spawn((Transform::from_xyz(12.0, -4.0, 1.0), Player::default()));
    let camera = app.world.spawn((CameraRigSettings::default(), MainCamera)).id();

    press_key(&mut app, KeyCode::KeyP);
    let points = rig_snap_points(&app, camera);
    assert_eq!(points.len(), 1);
    let point = points[0];
    assert!(app.world.get::<SnapPoint>(point).is_some());
    assert_eq!(
        app.world.get::<Transform>(point).unwrap().translation.truncate(),
        Vec2::new(12.0, -4.0)
    );

    press_key(&mut app, KeyCode::Backspace);
    assert!(rig_snap_points(&app, camera).is_empty());
    assert!(app.world.get_entity(point).is_none());
}

#[test]
fn test_tweaks_delete_removes_nearest_snap_point() {
    let mut app = setup_paused_tweak_app();
    app.world.spawn((Transform::from_xyz(0.0, 0.0, 1.0), Player::default()));
    let far = app.world.spawn((Transform::from_xyz(50.0, 0.0, 0.5), SnapPoint)).id();
    let near = app.world.spawn((Transform::from_xyz(5.0, 5.0, 0.5), SnapPoint)).id();
    let camera = app
        .world
        .spawn((
            CameraRigSettings { snap_points: vec![far, near, far], ..default() },
            MainCamera,
        ))
        .id();

    press_key(&mut app, KeyCode::Delete);
    assert_eq!(rig_snap_points(&app, camera), vec![far, far]);
    assert!(app.world.get_entity(near).is_none());

    // A duplicated entry keeps its entity until the last reference is removed.
    press_key(&mut app, KeyCode::Backspace);
    assert_eq!(rig_snap_points(&app, camera), vec![far]);
    assert!(app.world.get_entity(far).is_some());
}

#[test]
fn test_tweaks_ignore_cameras_without_main_camera_marker() {
    let mut app = setup_paused_tweak_app();
    app.world.spawn((Transform::default(), Player::default()));
    let camera = app.world.spawn(CameraRigSettings::default()).id();

    press_key(&mut app, KeyCode::KeyP);
    assert!(rig_snap_points(&app, camera).is_empty());
}
