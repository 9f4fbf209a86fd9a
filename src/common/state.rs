//! Global state machine.
//!
//! Only `Playing` advances the simulation. `Menu -> Playing` and
//! `GameOver -> Playing` start a fresh session, `Complete -> Playing` advances
//! to the next level, `Paused <-> Playing` resumes where it left off.

use bevy::prelude::*;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, States, Default)]
pub enum GameState {
    #[default]
    Menu,
    Playing,
    Paused,
    Complete,
    GameOver,
}
