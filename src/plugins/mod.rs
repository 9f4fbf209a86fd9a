//! Feature plugins.

use bevy::prelude::*;

pub mod core;
pub mod cues;
pub mod input;
pub mod physics;

pub mod combat;
pub mod enemies;
pub mod player;
pub mod projectiles;

pub mod camera;
pub mod director;
pub mod particles;

// Read-only snapshot for renderers; registers nothing.
pub mod view;

/// Register every simulation plugin. All of them run headless.
///
/// `core` goes first: it installs `Tunables` and the `SimSet` ordering the
/// other plugins schedule into.
pub fn register_gameplay(app: &mut App) {
    core::plugin(app);
    cues::plugin(app);
    input::plugin(app);
    combat::plugin(app);
    camera::plugin(app);
    player::plugin(app);
    enemies::plugin(app);
    projectiles::plugin(app);
    particles::plugin(app);
    director::plugin(app);
}
