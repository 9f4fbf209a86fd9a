//! Game composition root.
//!
//! The crate is a headless simulation core; a host app supplies its own
//! window, renderer and input capture and only needs one of these:
//! - `configure_headless`: default `Tunables` (or whatever is already inserted).
//! - `configure_headless_with`: validated overrides, e.g. from `Tunables::from_ron`.
//!
//! Either way the app starts in `GameState::Menu`; setting
//! `NextState(GameState::Playing)` starts a session.

use bevy::prelude::*;

use crate::common::state::GameState;
use crate::common::tunables::{Tunables, TunablesError};
use crate::plugins;

/// Install the simulation into `app`.
pub fn configure_headless(app: &mut App) {
    configure_game(app);
}

/// Validate `tunables`, install them, then the simulation.
pub fn configure_headless_with(app: &mut App, tunables: Tunables) -> Result<(), TunablesError> {
    tunables.validate()?;
    app.insert_resource(tunables);
    configure_game(app);
    Ok(())
}

/// Configuration shared by every entry point.
fn configure_game(app: &mut App) {
    app.init_state::<GameState>();
    plugins::register_gameplay(app);
}
