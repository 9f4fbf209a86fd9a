//! Core plugin: shared resources, tick ordering and end-of-tick compaction.
//!
//! One fixed tick runs these sets in order, only while `GameState::Playing`
//! and no outcome has been recorded yet:
//!
//! ```text
//! Player -> Camera -> Director -> Enemies -> Projectiles -> Particles
//!        -> Dispatch -> Terminal -> Compact
//! ```
//!
//! Nothing despawns mid-tick: passes set `dead` / run out `life`, and
//! `compact` removes those entities at the tick boundary.

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::common::state::GameState;
use crate::common::tunables::Tunables;
use crate::plugins::director::SessionOutcome;
use crate::plugins::enemies::Zombie;
use crate::plugins::particles::Particle;
use crate::plugins::physics::Actor;
use crate::plugins::projectiles::Projectile;

#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimSet {
    /// Parent of every per-tick set; carries the run conditions.
    Tick,
    Player,
    Camera,
    Director,
    Enemies,
    Projectiles,
    Particles,
    Dispatch,
    Terminal,
    Compact,
}

/// Ticks simulated so far. Paused time is never counted.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SimClock {
    pub tick: u64,
}

/// Random source for spawn placement and particle scatter.
#[derive(Resource, Debug, Clone)]
pub struct SimRng(pub StdRng);

impl SimRng {
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

/// Marker: entity belongs to the current level and is cleared when a new one begins.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct LevelScoped;

pub fn plugin(app: &mut App) {
    app.init_resource::<Tunables>();
    let tunables = app.world().resource::<Tunables>().clone();
    if let Err(e) = tunables.validate() {
        panic!("invalid Tunables: {e}");
    }

    app.insert_resource(Time::<Fixed>::from_hz(tunables.tick_rate_hz))
        .insert_resource(SimRng::seeded(tunables.rng_seed))
        .init_resource::<SimClock>();

    app.configure_sets(
        FixedUpdate,
        (
            SimSet::Player,
            SimSet::Camera,
            SimSet::Director,
            SimSet::Enemies,
            SimSet::Projectiles,
            SimSet::Particles,
            SimSet::Dispatch,
            SimSet::Terminal,
            SimSet::Compact,
        )
            .chain()
            .in_set(SimSet::Tick),
    );
    app.configure_sets(
        FixedUpdate,
        SimSet::Tick
            .run_if(in_state(GameState::Playing))
            .run_if(session_open),
    );

    app.add_systems(FixedUpdate, compact.in_set(SimSet::Compact));
}

/// Run condition: the current level has neither been completed nor lost.
pub fn session_open(outcome: Option<Res<SessionOutcome>>) -> bool {
    outcome.is_none_or(|o| o.0.is_none())
}

/// Despawn everything marked dead or expired this tick and advance the clock.
pub fn compact(
    mut commands: Commands,
    mut clock: ResMut<SimClock>,
    q_enemies: Query<(Entity, &Actor), With<Zombie>>,
    q_shots: Query<(Entity, &Projectile)>,
    q_particles: Query<(Entity, &Particle)>,
) {
    for (e, body) in &q_enemies {
        if body.is_dead() {
            commands.entity(e).despawn();
        }
    }
    for (e, shot) in &q_shots {
        if shot.dead {
            commands.entity(e).despawn();
        }
    }
    for (e, p) in &q_particles {
        if p.expired() {
            commands.entity(e).despawn();
        }
    }
    clock.tick += 1;
}
