//! Test helpers.
//!
//! Unit tests drive one system at a time against a hand-built `World` instead
//! of a full schedule. Queued `Commands` are applied before returning so
//! spawns and despawns are visible to the assertions that follow.

use bevy::ecs::system::{IntoSystem, RunSystemOnce};
use bevy::prelude::*;

/// Run a system once on the given world, then flush deferred commands.
/// Returns the system output.
pub fn run_system_once<T, Out, Marker>(world: &mut World, system: T) -> Out
where
    T: IntoSystem<(), Out, Marker>,
{
    let out = world.run_system_once(system).expect("system run failed");
    world.flush();
    out
}
