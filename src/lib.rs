pub mod camera_systems;
pub mod components;
pub mod error;
pub mod game;
pub mod player;
pub mod resolver;
pub mod rig_tweaks;
pub mod settings;
