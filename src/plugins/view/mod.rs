//! Read-only frame snapshot for whatever draws the game.
//!
//! `capture` copies everything a renderer needs out of the `World` into plain
//! data, so drawing never holds ECS borrows and never mutates the simulation.
//! Damage flicker is derived from the `SimClock` tick instead of a wall clock.

use bevy::prelude::*;

use crate::common::state::GameState;
use crate::plugins::camera::CameraRig;
use crate::plugins::core::SimClock;
use crate::plugins::director::{LevelProgress, LevelTheme, Portal, SessionStats};
use crate::plugins::enemies::{Boss, Zombie, ZombieKind, ZombieState};
use crate::plugins::particles::Particle;
use crate::plugins::physics::Actor;
use crate::plugins::player::{Player, PlayerController, PlayerState};
use crate::plugins::projectiles::{Owner, Projectile, PROJECTILE_SIZE};

/// Ticks per half-cycle of the damage flicker.
pub const FLASH_PERIOD: u64 = 4;

/// Whether an actor with `invincible` ticks left is drawn on `tick`.
#[inline]
pub fn flash_visible(tick: u64, invincible: u32) -> bool {
    invincible == 0 || (tick / FLASH_PERIOD) % 2 == 0
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Pose {
    Player(PlayerState),
    Zombie(ZombieKind, ZombieState),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActorView {
    pub pose: Pose,
    pub pos: Vec2,
    pub size: Vec2,
    pub facing: f32,
    pub health_ratio: f32,
    pub anim_tick: u32,
    pub visible: bool,
    /// Boss phase, for bosses only.
    pub boss_phase: Option<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectileView {
    pub pos: Vec2,
    pub size: Vec2,
    pub owner: Owner,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleView {
    pub pos: Vec2,
    pub size: f32,
    pub color: Color,
    pub alpha: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PortalView {
    pub pos: Vec2,
    pub size: Vec2,
    pub pulse: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hud {
    pub health_ratio: f32,
    pub energy_ratio: f32,
    pub combo: u32,
    pub score: u32,
    pub kills: u32,
    pub level: u32,
    pub theme: LevelTheme,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FrameView {
    pub tick: u64,
    pub state: Option<GameState>,
    pub camera_x: f32,
    pub shake: f32,
    /// Player first, then enemies.
    pub actors: Vec<ActorView>,
    pub projectiles: Vec<ProjectileView>,
    pub particles: Vec<ParticleView>,
    pub portal: Option<PortalView>,
    /// `None` before a session has spawned the player.
    pub hud: Option<Hud>,
}

fn actor_view(body: &Actor, pose: Pose, tick: u64) -> ActorView {
    ActorView {
        pose,
        pos: body.pos,
        size: body.size,
        facing: body.facing,
        health_ratio: body.health_ratio(),
        anim_tick: body.anim_tick,
        visible: flash_visible(tick, body.invincible()),
        boss_phase: None,
    }
}

/// Snapshot the live simulation. Dead or expired entities waiting for
/// compaction are left out.
pub fn capture(world: &mut World) -> FrameView {
    let tick = world.get_resource::<SimClock>().map_or(0, |c| c.tick);
    let camera = world.get_resource::<CameraRig>().copied().unwrap_or_default();
    let state = world.get_resource::<State<GameState>>().map(|s| *s.get());

    let mut actors = Vec::new();
    let mut hud = None;

    let mut q_player = world.query_filtered::<(&Actor, &PlayerController), With<Player>>();
    if let Some((body, controller)) = q_player.iter(world).next() {
        actors.push(actor_view(body, Pose::Player(controller.state()), tick));

        let stats = world.get_resource::<SessionStats>().copied().unwrap_or_default();
        let (level, theme) = world
            .get_resource::<LevelProgress>()
            .map_or((1, LevelTheme::default()), |p| (p.level, p.theme));
        hud = Some(Hud {
            health_ratio: body.health_ratio(),
            energy_ratio: controller.energy() / controller.max_energy(),
            combo: controller.combo(),
            score: stats.score,
            kills: stats.kills,
            level,
            theme,
        });
    }

    let mut q_enemies = world.query_filtered::<(&Actor, &Zombie, Option<&Boss>), Without<Player>>();
    for (body, zombie, boss) in q_enemies.iter(world) {
        if body.is_dead() {
            continue;
        }
        let mut view = actor_view(body, Pose::Zombie(zombie.kind(), zombie.state), tick);
        view.boss_phase = boss.map(Boss::phase);
        actors.push(view);
    }

    let projectiles = world
        .query::<&Projectile>()
        .iter(world)
        .filter(|p| !p.dead)
        .map(|p| ProjectileView { pos: p.pos, size: PROJECTILE_SIZE, owner: p.owner })
        .collect();

    let particles = world
        .query::<&Particle>()
        .iter(world)
        .filter(|p| !p.expired())
        .map(|p| ParticleView { pos: p.pos, size: p.size, color: p.color, alpha: p.alpha() })
        .collect();

    let portal = world
        .query::<&Portal>()
        .iter(world)
        .find(|p| p.active)
        .map(|p| PortalView { pos: p.pos, size: p.size, pulse: p.pulse });

    FrameView {
        tick,
        state,
        camera_x: camera.x,
        shake: camera.shake,
        actors,
        projectiles,
        particles,
        portal,
        hud,
    }
}
