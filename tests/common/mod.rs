//! Integration test harness.
//!
//! Keep integration tests headless and deterministic:
//! - `MinimalPlugins` + `StatesPlugin` provide the ECS runtime and state machine.
//! - Virtual time is frozen, so `app.update()` never runs a fixed tick by itself.
//!   It is only used to apply state transitions.
//! - `step` runs the `FixedUpdate` schedule directly, one call per tick.
#![allow(dead_code)]

use std::time::Duration;

use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use bevy::time::TimeUpdateStrategy;

use brawler_sim::common::state::GameState;
use brawler_sim::common::tunables::Tunables;
use brawler_sim::plugins::core::SimSet;
use brawler_sim::plugins::cues::Cue;
use brawler_sim::plugins::input::ControlInput;
use brawler_sim::plugins::physics::Actor;
use brawler_sim::plugins::player::Player;

/// Every cue emitted so far, in order.
#[derive(Resource, Default, Debug)]
pub struct CueLog(pub Vec<Cue>);

fn record_cues(mut log: ResMut<CueLog>, mut cues: MessageReader<Cue>) {
    log.0.extend(cues.read().copied());
}

pub fn app_headless() -> App {
    app_with(Tunables::default())
}

pub fn app_with(tunables: Tunables) -> App {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, StatesPlugin));
    app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::ZERO));

    brawler_sim::game::configure_headless_with(&mut app, tunables).expect("valid tunables");

    app.init_resource::<CueLog>()
        .add_systems(FixedUpdate, record_cues.after(SimSet::Tick));

    // Run startup once.
    app.update();
    app
}

pub fn set_state(app: &mut App, state: GameState) {
    app.world_mut().resource_mut::<NextState<GameState>>().set(state);
    app.update();
}

pub fn state(app: &App) -> GameState {
    *app.world().resource::<State<GameState>>().get()
}

/// Menu -> Playing.
pub fn start(app: &mut App) {
    set_state(app, GameState::Playing);
}

pub fn step(app: &mut App, ticks: usize) {
    for _ in 0..ticks {
        app.world_mut().run_schedule(FixedUpdate);
    }
}

pub fn hold(app: &mut App, input: ControlInput) {
    app.insert_resource(input);
}

pub fn player_entity(app: &mut App) -> Entity {
    app.world_mut()
        .query_filtered::<Entity, With<Player>>()
        .single(app.world())
        .expect("exactly one player")
}

pub fn player_body(app: &mut App) -> Actor {
    let e = player_entity(app);
    app.world().get::<Actor>(e).expect("player body").clone()
}

pub fn count<C: Component>(app: &mut App) -> usize {
    app.world_mut().query::<&C>().iter(app.world()).count()
}

pub fn cues(app: &App) -> &[Cue] {
    &app.world().resource::<CueLog>().0
}
