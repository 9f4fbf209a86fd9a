//! Cue sink: fire-and-forget presentation events.
//!
//! Sound and other presentation collaborators read `Cue` with a
//! `MessageReader<Cue>`; the simulation never waits on them.

use bevy::prelude::*;

#[derive(Message, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cue {
    Jump,
    Dash,
    /// Punch or kick swing.
    Hit,
    ZombieHit,
    Special,
    Block,
    Portal,
    LevelComplete,
    GameOver,
}

impl Cue {
    pub fn name(self) -> &'static str {
        match self {
            Cue::Jump => "jump",
            Cue::Dash => "dash",
            Cue::Hit => "hit",
            Cue::ZombieHit => "zombieHit",
            Cue::Special => "special",
            Cue::Block => "block",
            Cue::Portal => "portal",
            Cue::LevelComplete => "levelComplete",
            Cue::GameOver => "gameOver",
        }
    }
}

pub fn plugin(app: &mut App) {
    app.add_message::<Cue>();
}
