//! Shared actor body: position, velocity, health and invincibility.
//!
//! Every fighter (player, zombies, boss) carries an `Actor`. Controllers decide
//! velocities; `Actor::integrate` is the only place positions move, and
//! `Actor::take_damage` is the only place health drops.

use bevy::prelude::*;

use crate::common::math::{aabb, clamp, tick_down};
use crate::common::tunables::Tunables;

#[derive(Component, Debug, Clone, PartialEq)]
pub struct Actor {
    /// Top-left corner in level space.
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    /// +1.0 faces right, -1.0 faces left.
    pub facing: f32,
    pub grounded: bool,
    health: i32,
    max_health: i32,
    invincible: u32,
    dead: bool,
    /// Ticks lived; drives walk-cycle poses on the renderer side.
    pub anim_tick: u32,
}

impl Actor {
    pub fn new(pos: Vec2, size: Vec2, max_health: i32) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            size,
            facing: 1.0,
            grounded: false,
            health: max_health,
            max_health,
            invincible: 0,
            dead: false,
            anim_tick: 0,
        }
    }

    /// Body standing on the ground line at horizontal position `x`.
    pub fn standing(x: f32, size: Vec2, max_health: i32, tunables: &Tunables) -> Self {
        let mut actor = Self::new(Vec2::new(x, tunables.standing_y(size.y)), size, max_health);
        actor.grounded = true;
        actor
    }

    #[inline]
    pub fn health(&self) -> i32 {
        self.health
    }

    #[inline]
    pub fn max_health(&self) -> i32 {
        self.max_health
    }

    #[inline]
    pub fn health_ratio(&self) -> f32 {
        (self.health.max(0) as f32) / (self.max_health as f32)
    }

    #[inline]
    pub fn invincible(&self) -> u32 {
        self.invincible
    }

    #[inline]
    pub fn is_dead(&self) -> bool {
        self.dead
    }

    #[inline]
    pub fn bounds(&self) -> Rect {
        aabb(self.pos, self.size)
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Grant invincibility for at least `ticks`.
    pub fn grant_invincibility(&mut self, ticks: u32) {
        self.invincible = self.invincible.max(ticks);
    }

    /// Restore up to `amount` health. Never exceeds max and never revives.
    pub fn heal(&mut self, amount: i32) {
        if self.dead {
            return;
        }
        self.health = (self.health + amount.max(0)).min(self.max_health);
    }

    /// Apply a hit. Returns `false` without touching anything when the actor
    /// is invincible or already dead.
    pub fn take_damage(&mut self, amount: i32, knockback_x: f32, tunables: &Tunables) -> bool {
        if self.invincible > 0 || self.dead {
            return false;
        }

        self.health -= amount;
        self.vel.x = knockback_x;
        self.vel.y = tunables.knockback_lift;
        self.invincible = tunables.invincibility_duration;
        if self.health <= 0 {
            self.dead = true;
        }
        true
    }

    /// One physics step: gravity, friction, integration, ground + level clamp.
    pub fn integrate(&mut self, tunables: &Tunables) {
        self.vel.y += tunables.gravity;
        self.vel.x *= tunables.friction;
        self.pos += self.vel;

        let floor = tunables.standing_y(self.size.y);
        if self.pos.y >= floor {
            self.pos.y = floor;
            self.vel.y = 0.0;
            self.grounded = true;
        } else {
            self.grounded = false;
        }

        self.pos.x = clamp(self.pos.x, 0.0, tunables.level_length - self.size.x);
    }

    /// Per-tick bookkeeping shared by every actor.
    pub fn tick_timers(&mut self) {
        tick_down(&mut self.invincible);
        self.anim_tick = self.anim_tick.wrapping_add(1);
    }

    /// Move the body back onto the ground at `x` with no momentum.
    pub fn place_standing(&mut self, x: f32, tunables: &Tunables) {
        self.pos = Vec2::new(x, tunables.standing_y(self.size.y));
        self.vel = Vec2::ZERO;
        self.grounded = true;
    }
}
