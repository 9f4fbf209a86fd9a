//! Boss controller.
//!
//! A boss is a `Zombie` of kind `Boss` plus this component. It runs the regular
//! zombie AI and layers two things on top:
//! - a one-way phase change below half health (faster, attack cooldown reset),
//! - a ground smash on its own long cooldown, which in phase 2 also calls in
//!   two basic zombies.

use bevy::prelude::*;

use crate::common::math::{clamp, tick_down};
use crate::common::tunables::Tunables;
use crate::plugins::physics::Actor;

use super::Zombie;

pub const PHASE_ONE_SPEED: f32 = 1.2;
pub const PHASE_TWO_SPEED: f32 = 2.2;
/// Health ratio below which phase 2 begins.
pub const PHASE_TWO_RATIO: f32 = 0.5;

pub const SMASH_COOLDOWN: u32 = 240;
pub const SMASH_TRIGGER_RANGE: f32 = 200.0;
pub const SMASH_RADIUS: f32 = 150.0;
pub const SMASH_DAMAGE: i32 = 30;
pub const SMASH_KNOCKBACK: f32 = 10.0;
pub const MINION_OFFSET: f32 = 120.0;

#[derive(Component, Debug, Clone, PartialEq)]
pub struct Boss {
    phase: u8,
    pub special_cooldown: u32,
}

/// Result of a ground smash.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Smash {
    /// Damage dealt to the player, if it landed.
    pub player_damage: Option<i32>,
    /// Spawn positions of summoned minions (phase 2 only).
    pub minion_xs: Vec<f32>,
}

impl Default for Boss {
    fn default() -> Self {
        Self::new()
    }
}

impl Boss {
    pub fn new() -> Self {
        Self { phase: 1, special_cooldown: SMASH_COOLDOWN }
    }

    #[inline]
    pub fn phase(&self) -> u8 {
        self.phase
    }

    /// Switch to phase 2 once health drops below the threshold. Never reverts.
    /// Returns `true` on the tick the switch happens.
    pub fn check_phase(&mut self, body: &Actor, zombie: &mut Zombie) -> bool {
        if self.phase != 1 || body.health_ratio() >= PHASE_TWO_RATIO {
            return false;
        }
        self.phase = 2;
        zombie.speed = PHASE_TWO_SPEED;
        zombie.attack_cooldown = 0;
        info!("boss enters phase 2 at {}/{} hp", body.health(), body.max_health());
        true
    }

    /// Tick the smash cooldown and slam the ground if the player is close.
    ///
    /// Blocking does not soften the smash.
    pub fn try_smash(&mut self, body: &Actor, player: &mut Actor, tunables: &Tunables) -> Option<Smash> {
        tick_down(&mut self.special_cooldown);
        if self.special_cooldown > 0 {
            return None;
        }

        let dx = player.center().x - body.center().x;
        if dx.abs() >= SMASH_TRIGGER_RANGE {
            return None;
        }

        self.special_cooldown = SMASH_COOLDOWN;

        let mut smash = Smash::default();
        if dx.abs() < SMASH_RADIUS {
            let dir = if dx >= 0.0 { 1.0 } else { -1.0 };
            if player.take_damage(SMASH_DAMAGE, dir * SMASH_KNOCKBACK, tunables) {
                smash.player_damage = Some(SMASH_DAMAGE);
            }
        }
        if self.phase == 2 {
            let width = super::ZombieKind::Basic.stats().size.x;
            let max_x = tunables.level_length - width;
            let cx = body.center().x;
            smash.minion_xs = [cx - MINION_OFFSET, cx + MINION_OFFSET]
                .into_iter()
                .map(|x| clamp(x - width * 0.5, 0.0, max_x))
                .collect();
        }
        Some(smash)
    }
}
