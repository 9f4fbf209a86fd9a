//! Projectiles: enemy shots (and player-owned shots, should anything fire them).
//!
//! # Lifecycle
//! ```text
//!   Enemies pass            Projectiles pass                 Compact
//!  ┌──────────────┐      ┌──────────────────────────┐      ┌──────────┐
//!  │ ranged think │ ───▶ │ integrate (enemy: arc)   │ ───▶ │ despawn  │
//!  │ spawns shot  │      │ off-window?  -> dead     │      │ if dead  │
//!  └──────────────┘      │ hit target?  -> damage,  │      └──────────┘
//!                        │               dead       │
//!                        └──────────────────────────┘
//! ```
//! A projectile is consumed only when its damage actually lands, so a dashing
//! (invincible) player lets shots pass through.

use bevy::prelude::*;

use crate::common::math::{aabb, rects_overlap};
use crate::common::tunables::Tunables;
use crate::plugins::camera::CameraRig;
use crate::plugins::combat::CombatEvent;
use crate::plugins::core::SimSet;
use crate::plugins::enemies::Zombie;
use crate::plugins::physics::Actor;
use crate::plugins::player::Player;

pub const PROJECTILE_SIZE: Vec2 = Vec2::splat(10.0);
/// Knockback a projectile gives along its flight direction.
const PROJECTILE_KNOCKBACK: f32 = 4.0;
/// How far outside the viewport a projectile may travel before it is dropped.
const WINDOW_MARGIN_X: f32 = 100.0;
const WINDOW_MARGIN_TOP: f32 = 200.0;
const WINDOW_MARGIN_BOTTOM: f32 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Owner {
    Player,
    Enemy,
}

#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Projectile {
    pub pos: Vec2,
    pub vel: Vec2,
    pub damage: i32,
    pub owner: Owner,
    pub dead: bool,
}

impl Projectile {
    pub fn new(pos: Vec2, vel: Vec2, damage: i32, owner: Owner) -> Self {
        Self { pos, vel, damage, owner, dead: false }
    }

    /// Enemy shot lobbed from `shooter` so its arc comes back down at the
    /// player's horizontal position.
    pub fn aimed_at(shooter: &Actor, target: &Actor, damage: i32, tunables: &Tunables) -> Self {
        let from = shooter.center();
        let dx = target.center().x - from.x;
        let dir = if dx >= 0.0 { 1.0 } else { -1.0 };
        let flight_ticks = dx.abs() / tunables.projectile_speed;
        let vel = Vec2::new(dir * tunables.projectile_speed, -0.5 * tunables.projectile_gravity * flight_ticks);
        Self::new(from - PROJECTILE_SIZE * 0.5, vel, damage, Owner::Enemy)
    }

    #[inline]
    pub fn bounds(&self) -> Rect {
        aabb(self.pos, PROJECTILE_SIZE)
    }

    pub fn integrate(&mut self, tunables: &Tunables) {
        if self.owner == Owner::Enemy {
            self.vel.y += tunables.projectile_gravity;
        }
        self.pos += self.vel;
    }

    /// Whether the projectile is still inside the active window around the camera.
    pub fn in_window(&self, camera_x: f32, tunables: &Tunables) -> bool {
        let x_ok = self.pos.x + PROJECTILE_SIZE.x >= camera_x - WINDOW_MARGIN_X
            && self.pos.x <= camera_x + tunables.screen_width + WINDOW_MARGIN_X;
        let y_ok = self.pos.y + PROJECTILE_SIZE.y >= -WINDOW_MARGIN_TOP
            && self.pos.y <= tunables.screen_height + WINDOW_MARGIN_BOTTOM;
        x_ok && y_ok
    }

    #[inline]
    fn knockback(&self) -> f32 {
        if self.vel.x >= 0.0 { PROJECTILE_KNOCKBACK } else { -PROJECTILE_KNOCKBACK }
    }
}

pub fn plugin(app: &mut App) {
    app.add_systems(FixedUpdate, update_projectiles.in_set(SimSet::Projectiles));
}

/// Move every live projectile, drop the ones that left the window and resolve hits.
///
/// A shot is consumed only when `take_damage` accepts the hit. Touching an
/// invincible (dashing or recently hit) player leaves it flying.
pub fn update_projectiles(
    tunables: Res<Tunables>,
    camera: Res<CameraRig>,
    mut q_shots: Query<&mut Projectile>,
    mut q_player: Query<&mut Actor, (With<Player>, Without<Zombie>)>,
    mut q_enemies: Query<(Entity, &mut Actor, &Zombie), Without<Player>>,
    mut events: MessageWriter<CombatEvent>,
) {
    let t = &*tunables;
    let mut player = q_player.single_mut().ok();

    for mut shot in &mut q_shots {
        if shot.dead {
            continue;
        }
        shot.integrate(t);

        if !shot.in_window(camera.x, t) {
            shot.dead = true;
            continue;
        }

        let bounds = shot.bounds();
        match shot.owner {
            Owner::Enemy => {
                let Some(body) = player.as_deref_mut() else {
                    continue;
                };
                if body.is_dead() || !rects_overlap(&bounds, &body.bounds()) {
                    continue;
                }
                if body.take_damage(shot.damage, shot.knockback(), t) {
                    shot.dead = true;
                    events.write(CombatEvent::PlayerHit { at: body.center(), damage: shot.damage, blocked: false });
                }
            }
            Owner::Player => {
                for (entity, mut body, zombie) in &mut q_enemies {
                    if body.is_dead() || !rects_overlap(&bounds, &body.bounds()) {
                        continue;
                    }
                    if body.take_damage(shot.damage, shot.knockback(), t) {
                        shot.dead = true;
                        events.write(CombatEvent::HitLanded { target: entity, at: body.center(), damage: shot.damage });
                        if body.is_dead() {
                            events.write(CombatEvent::EnemyKilled { kind: zombie.kind(), at: body.center() });
                        }
                        break;
                    }
                }
            }
        }
    }
}
