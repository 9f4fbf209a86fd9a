//! Tunable gameplay constants.
//!
//! Every value is expressed per fixed tick (distances in pixels, durations in
//! ticks). Overrides can be read from RON; any field left out keeps its default.
//!
//! ```ron
//! (gravity: 0.8, level_length: 6000.0)
//! ```

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tunables {
    pub tick_rate_hz: f64,

    // World
    pub gravity: f32,
    pub friction: f32,
    pub ground_y: f32,
    pub level_length: f32,
    pub screen_width: f32,
    pub screen_height: f32,

    // Player body + movement
    pub player_width: f32,
    pub player_height: f32,
    pub player_max_health: i32,
    pub player_speed: f32,
    pub jump_impulse: f32,
    pub move_deadzone: f32,
    pub dash_speed: f32,
    pub dash_duration: u32,
    pub dash_cooldown: u32,

    // Damage model
    pub invincibility_duration: u32,
    pub knockback_lift: f32,
    pub block_mitigation: f32,

    // Combo + energy
    pub combo_timeout: u32,
    pub max_combo: u32,
    pub max_energy: f32,
    pub energy_regen: f32,
    pub energy_per_hit: f32,
    pub special_cost: f32,

    // Camera
    pub camera_lead: f32,
    pub camera_smoothing: f32,
    pub shake_decay: f32,

    // Director
    pub base_spawn_interval: u32,
    pub spawn_interval_step: u32,
    pub min_spawn_interval: u32,
    pub base_enemy_count: u32,
    pub enemies_per_level: u32,
    pub boss_interval: u32,
    pub spawn_min_buffer: f32,
    pub spawn_max_distance: f32,
    pub restore_health_fraction: f32,

    // Effects
    pub projectile_speed: f32,
    pub projectile_gravity: f32,
    pub particle_gravity: f32,

    pub rng_seed: u64,
}

impl Default for Tunables {
    fn default() -> Self {
        Self {
            tick_rate_hz: 60.0,

            gravity: 0.6,
            friction: 0.85,
            ground_y: 500.0,
            level_length: 4000.0,
            screen_width: 800.0,
            screen_height: 600.0,

            player_width: 40.0,
            player_height: 80.0,
            player_max_health: 100,
            player_speed: 5.0,
            jump_impulse: 14.0,
            move_deadzone: 0.1,
            dash_speed: 15.0,
            dash_duration: 12,
            dash_cooldown: 45,

            invincibility_duration: 30,
            knockback_lift: -3.0,
            block_mitigation: 0.3,

            combo_timeout: 120,
            max_combo: 99,
            max_energy: 100.0,
            energy_regen: 0.1,
            energy_per_hit: 2.0,
            special_cost: 50.0,

            camera_lead: 300.0,
            camera_smoothing: 0.1,
            shake_decay: 0.9,

            base_spawn_interval: 120,
            spawn_interval_step: 10,
            min_spawn_interval: 40,
            base_enemy_count: 8,
            enemies_per_level: 2,
            boss_interval: 3,
            spawn_min_buffer: 300.0,
            spawn_max_distance: 600.0,
            restore_health_fraction: 0.5,

            projectile_speed: 7.0,
            projectile_gravity: 0.15,
            particle_gravity: 0.3,

            rng_seed: 0x5EED,
        }
    }
}

#[derive(Debug, Error)]
pub enum TunablesError {
    #[error("`{field}` must be positive, got {value}")]
    NotPositive { field: &'static str, value: f64 },

    #[error("`{field}` must lie in {min}..={max}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("level ({level_length}) is shorter than the viewport ({screen_width})")]
    LevelShorterThanViewport { level_length: f32, screen_width: f32 },

    #[error("spawn distance window is inverted ({min} > {max})")]
    InvertedSpawnWindow { min: f32, max: f32 },

    #[error("failed to parse tunables: {0}")]
    Parse(#[from] ron::error::SpannedError),
}

fn positive(field: &'static str, value: f64) -> Result<(), TunablesError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(TunablesError::NotPositive { field, value })
    }
}

fn finite(field: &'static str, value: f64) -> Result<(), TunablesError> {
    within(field, value, f64::MIN, f64::MAX)
}

fn within(field: &'static str, value: f64, min: f64, max: f64) -> Result<(), TunablesError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(TunablesError::OutOfRange { field, value, min, max })
    }
}

impl Tunables {
    /// Parse RON overrides on top of the defaults, then validate.
    pub fn from_ron(src: &str) -> Result<Self, TunablesError> {
        let tunables: Self = ron::from_str(src)?;
        tunables.validate()?;
        Ok(tunables)
    }

    pub fn validate(&self) -> Result<(), TunablesError> {
        positive("tick_rate_hz", self.tick_rate_hz)?;
        positive("gravity", self.gravity.into())?;
        within("friction", self.friction.into(), f64::MIN_POSITIVE, 1.0)?;
        positive("ground_y", self.ground_y.into())?;
        positive("level_length", self.level_length.into())?;
        positive("screen_width", self.screen_width.into())?;
        positive("screen_height", self.screen_height.into())?;
        positive("player_width", self.player_width.into())?;
        positive("player_height", self.player_height.into())?;
        positive("player_max_health", self.player_max_health.into())?;
        positive("player_speed", self.player_speed.into())?;
        positive("jump_impulse", self.jump_impulse.into())?;
        within("move_deadzone", self.move_deadzone.into(), 0.0, 1.0)?;
        positive("dash_speed", self.dash_speed.into())?;
        positive("dash_duration", self.dash_duration.into())?;
        positive("invincibility_duration", self.invincibility_duration.into())?;
        finite("knockback_lift", self.knockback_lift.into())?;
        within("block_mitigation", self.block_mitigation.into(), 0.0, 1.0)?;
        positive("combo_timeout", self.combo_timeout.into())?;
        positive("max_combo", self.max_combo.into())?;
        positive("max_energy", self.max_energy.into())?;
        within("energy_regen", self.energy_regen.into(), 0.0, self.max_energy.into())?;
        within("energy_per_hit", self.energy_per_hit.into(), 0.0, self.max_energy.into())?;
        within("special_cost", self.special_cost.into(), 0.0, self.max_energy.into())?;
        finite("camera_lead", self.camera_lead.into())?;
        within("camera_smoothing", self.camera_smoothing.into(), f64::MIN_POSITIVE, 1.0)?;
        within("shake_decay", self.shake_decay.into(), 0.0, 1.0)?;
        positive("base_spawn_interval", self.base_spawn_interval.into())?;
        positive("min_spawn_interval", self.min_spawn_interval.into())?;
        positive("boss_interval", self.boss_interval.into())?;
        positive("spawn_max_distance", self.spawn_max_distance.into())?;
        within("spawn_min_buffer", self.spawn_min_buffer.into(), 0.0, f64::MAX)?;
        within("restore_health_fraction", self.restore_health_fraction.into(), 0.0, 1.0)?;
        positive("projectile_speed", self.projectile_speed.into())?;
        finite("projectile_gravity", self.projectile_gravity.into())?;
        finite("particle_gravity", self.particle_gravity.into())?;

        if self.level_length < self.screen_width {
            return Err(TunablesError::LevelShorterThanViewport {
                level_length: self.level_length,
                screen_width: self.screen_width,
            });
        }
        if self.spawn_min_buffer > self.spawn_max_distance {
            return Err(TunablesError::InvertedSpawnWindow {
                min: self.spawn_min_buffer,
                max: self.spawn_max_distance,
            });
        }
        Ok(())
    }

    /// Where the top of a body of `height` sits when it stands on the ground.
    #[inline]
    pub fn standing_y(&self, height: f32) -> f32 {
        self.ground_y - height
    }

    #[inline]
    pub fn ticks_to_secs(&self, ticks: u64) -> f32 {
        (ticks as f64 / self.tick_rate_hz) as f32
    }

    /// Enemies a level asks the director to spawn.
    #[inline]
    pub fn enemy_quota(&self, level: u32) -> u32 {
        self.base_enemy_count
            .saturating_add(level.saturating_mul(self.enemies_per_level))
    }

    /// Ticks between two spawns on `level`.
    #[inline]
    pub fn spawn_interval(&self, level: u32) -> u32 {
        self.base_spawn_interval
            .saturating_sub(level.saturating_mul(self.spawn_interval_step))
            .max(self.min_spawn_interval)
    }
}
