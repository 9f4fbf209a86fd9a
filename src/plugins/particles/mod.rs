//! Decorative particles.
//!
//! Particles never feed back into gameplay: they fall, fade and expire. Bursts
//! are scattered with the shared `SimRng` so a seeded session is repeatable.

use bevy::prelude::*;
use rand::Rng;

use crate::common::tunables::Tunables;
use crate::plugins::core::{LevelScoped, SimRng, SimSet};

#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub life: u32,
    pub max_life: u32,
    pub color: Color,
    pub size: f32,
}

impl Particle {
    #[inline]
    pub fn alpha(&self) -> f32 {
        self.life as f32 / self.max_life.max(1) as f32
    }

    #[inline]
    pub fn expired(&self) -> bool {
        self.life == 0
    }

    pub fn integrate(&mut self, tunables: &Tunables) {
        self.vel.y += tunables.particle_gravity;
        self.pos += self.vel;
        self.life = self.life.saturating_sub(1);
    }
}

/// Recipe for a cluster of particles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Burst {
    pub count: u32,
    pub color: Color,
    /// Maximum launch speed on each axis.
    pub speed: f32,
    pub life: u32,
    pub size: f32,
}

impl Burst {
    pub const BLOOD: Burst = Burst { count: 6, color: Color::srgb(0.55, 0.0, 0.0), speed: 4.0, life: 30, size: 4.0 };
    pub const GORE: Burst = Burst { count: 12, color: Color::srgb(0.3, 0.45, 0.15), speed: 6.0, life: 45, size: 5.0 };
    pub const SPARKS: Burst = Burst { count: 5, color: Color::srgb(0.5, 0.8, 1.0), speed: 3.0, life: 15, size: 3.0 };
    pub const SPECIAL: Burst = Burst { count: 30, color: Color::srgb(1.0, 0.85, 0.2), speed: 9.0, life: 40, size: 6.0 };
    pub const DUST: Burst = Burst { count: 25, color: Color::srgb(0.45, 0.35, 0.25), speed: 7.0, life: 50, size: 7.0 };
}

/// Scatter one burst of particles around `at`.
pub fn spawn_burst(commands: &mut Commands, rng: &mut SimRng, at: Vec2, burst: Burst) {
    for _ in 0..burst.count {
        let vel = Vec2::new(
            rng.0.gen_range(-burst.speed..=burst.speed),
            rng.0.gen_range(-burst.speed..=0.0),
        );
        commands.spawn((
            Particle {
                pos: at,
                vel,
                life: burst.life,
                max_life: burst.life,
                color: burst.color,
                size: burst.size,
            },
            LevelScoped,
        ));
    }
}

pub fn plugin(app: &mut App) {
    app.add_systems(FixedUpdate, update_particles.in_set(SimSet::Particles));
}

pub fn update_particles(tunables: Res<Tunables>, mut q: Query<&mut Particle>) {
    for mut p in &mut q {
        if !p.expired() {
            p.integrate(&tunables);
        }
    }
}
