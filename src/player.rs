use bevy::prelude::*;

use crate::{components::Velocity, game::AppState};

pub const PLAYER_SIZE: Vec2 = Vec2::new(50.0, 50.0);
const BASE_PLAYER_SPEED: f32 = 250.0;

pub struct PlayerPlugin;

#[derive(Component)]
pub struct Player {
    pub speed: f32,
}

impl Default for Player {
    fn default() -> Self {
        Self { speed: BASE_PLAYER_SPEED }
    }
}

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, player_movement.run_if(in_state(AppState::InGame)));
    }
}

pub fn spawn_player(commands: &mut Commands, position: Vec2) -> Entity {
    commands
        .spawn((
            SpriteBundle {
                sprite: Sprite {
                    color: Color::rgb(0.3, 0.7, 0.9),
                    custom_size: Some(PLAYER_SIZE),
                    ..default()
                },
                transform: Transform::from_translation(position.extend(1.0)),
                ..default()
            },
            Player::default(),
            Velocity(Vec2::ZERO),
            Name::new("Player"),
        ))
        .id()
}

fn player_movement(
    keyboard_input: Res<ButtonInput<KeyCode>>,
    mut query: Query<(&Player, &mut Transform, &mut Velocity)>,
    time: Res<Time>,
) {
    for (player, mut transform, mut velocity) in query.iter_mut() {
        let mut direction = Vec2::ZERO;
        if keyboard_input.pressed(KeyCode::KeyA) { direction.x -= 1.0; }
        if keyboard_input.pressed(KeyCode::KeyD) { direction.x += 1.0; }
        if keyboard_input.pressed(KeyCode::KeyW) { direction.y += 1.0; }
        if keyboard_input.pressed(KeyCode::KeyS) { direction.y -= 1.0; }
        velocity.0 = if direction != Vec2::ZERO { direction.normalize() * player.speed } else { Vec2::ZERO };
        transform.translation.x += velocity.0.x * time.delta_seconds();
        transform.translation.y += velocity.0.y * time.delta_seconds();
    }
}
