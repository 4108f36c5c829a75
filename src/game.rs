use bevy::prelude::*;
use bevy::time::Virtual;

/// Settings edits are made while `Paused`; virtual time is stopped then.
#[derive(States, Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum AppState {
    #[default]
    InGame,
    Paused,
}

pub struct GamePlugin;

impl Plugin for GamePlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<AppState>()
            .add_systems(Update, pause_key_listener)
            .add_systems(OnEnter(AppState::Paused), pause_virtual_time)
            .add_systems(OnExit(AppState::Paused), unpause_virtual_time);
    }
}

fn pause_key_listener(
    keyboard_input: Res<ButtonInput<KeyCode>>,
    current_app_state: Res<State<AppState>>,
    mut next_app_state: ResMut<NextState<AppState>>,
) {
    if keyboard_input.just_pressed(KeyCode::Escape) {
        match current_app_state.get() {
            AppState::InGame => next_app_state.set(AppState::Paused),
            AppState::Paused => next_app_state.set(AppState::InGame),
        }
    }
}

fn pause_virtual_time(mut time: ResMut<Time<Virtual>>) {
    info!("Paused: camera rig settings can be edited");
    time.pause();
}

fn unpause_virtual_time(mut time: ResMut<Time<Virtual>>) {
    info!("Resumed");
    time.unpause();
}
