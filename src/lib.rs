//! Headless simulation core for a side-scrolling brawler.
//!
//! Hosts call `game::configure_headless` on an `App`, feed `ControlInput`,
//! read `Cue` messages and draw from `plugins::view::capture`.

pub mod common;
pub mod game;
pub mod plugins;
