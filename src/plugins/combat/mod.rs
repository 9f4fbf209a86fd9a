//! Hitboxes and damage resolution.
//!
//! Resolution functions here only touch gameplay truth (health, velocity) and
//! report whether a hit landed. Callers turn landed hits into `CombatEvent`s;
//! `dispatch::apply_combat_events` is the single place that converts those
//! events into score, combo, shake, particles and cues.

use bevy::prelude::*;

use crate::common::math::rects_overlap;
use crate::common::tunables::Tunables;
use crate::plugins::physics::Actor;

pub mod dispatch;
pub mod events;

pub use events::CombatEvent;

/// Player attack catalogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackKind {
    Punch,
    Kick,
    JumpKick,
    Special,
}

/// Fixed parameters of one attack kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttackProfile {
    pub reach: f32,
    pub height: f32,
    /// Offset of the hitbox top from the body top.
    pub y_offset: f32,
    /// Ticks the hitbox stays live.
    pub active: u32,
    /// Ticks before any other attack may start.
    pub cooldown: u32,
    pub knockback: f32,
}

impl AttackKind {
    pub const PUNCH_BASE: i32 = 10;
    pub const PUNCH_PER_CHAIN: i32 = 5;

    pub fn profile(self) -> AttackProfile {
        match self {
            Self::Punch => AttackProfile { reach: 40.0, height: 25.0, y_offset: 20.0, active: 10, cooldown: 20, knockback: 5.0 },
            Self::Kick => AttackProfile { reach: 55.0, height: 30.0, y_offset: 40.0, active: 15, cooldown: 30, knockback: 8.0 },
            Self::JumpKick => AttackProfile { reach: 50.0, height: 35.0, y_offset: 45.0, active: 15, cooldown: 30, knockback: 7.0 },
            Self::Special => AttackProfile { reach: 250.0, height: 120.0, y_offset: 0.0, active: 12, cooldown: 40, knockback: 12.0 },
        }
    }

    /// Damage dealt; `chain` only matters for punches.
    pub fn damage(self, chain: u32) -> i32 {
        match self {
            Self::Punch => Self::PUNCH_BASE + chain as i32 * Self::PUNCH_PER_CHAIN,
            Self::Kick => 25,
            Self::JumpKick => 20,
            Self::Special => 40,
        }
    }

    /// Hitbox for an attacker body.
    ///
    /// Directional attacks sit flush against the body edge on the facing side;
    /// the special is centred on the body.
    pub fn hitbox(self, body: &Actor) -> Rect {
        let profile = self.profile();
        match self {
            Self::Special => Rect::from_center_size(body.center(), Vec2::new(profile.reach, profile.height)),
            _ => {
                let x = if body.facing >= 0.0 { body.pos.x + body.size.x } else { body.pos.x - profile.reach };
                let y = body.pos.y + profile.y_offset;
                Rect::new(x, y, x + profile.reach, y + profile.height)
            }
        }
    }
}

/// A live player attack.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttackBox {
    pub kind: AttackKind,
    pub rect: Rect,
    pub damage: i32,
}

impl AttackBox {
    pub fn new(kind: AttackKind, attacker: &Actor, damage: i32) -> Self {
        Self { kind, rect: kind.hitbox(attacker), damage }
    }

    /// Horizontal knockback applied to `target`.
    ///
    /// The special pushes targets away from the attacker's centre; every other
    /// attack pushes along the attacker's facing.
    pub fn knockback(&self, attacker: &Actor, target: &Actor) -> f32 {
        let kb = self.kind.profile().knockback;
        match self.kind {
            AttackKind::Special => {
                let dir = if target.center().x >= attacker.center().x { 1.0 } else { -1.0 };
                dir * kb
            }
            _ => attacker.facing * kb,
        }
    }
}

/// Resolve a player attack against one enemy body. Returns whether damage landed.
pub fn strike(attack: &AttackBox, attacker: &Actor, target: &mut Actor, tunables: &Tunables) -> bool {
    if target.is_dead() || !rects_overlap(&attack.rect, &target.bounds()) {
        return false;
    }
    let knockback = attack.knockback(attacker, target);
    target.take_damage(attack.damage, knockback, tunables)
}

/// What an enemy melee swing did to the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeleeHit {
    pub damage: i32,
    pub blocked: bool,
}

/// Damage after block mitigation, rounded down.
#[inline]
pub fn mitigated(damage: i32, tunables: &Tunables) -> i32 {
    (damage as f32 * tunables.block_mitigation).floor() as i32
}

/// Resolve an enemy melee hitbox against the player body.
///
/// A blocking player takes mitigated damage and half the knockback.
pub fn melee_vs_player(
    hitbox: &Rect,
    damage: i32,
    knockback: f32,
    player: &mut Actor,
    blocking: bool,
    tunables: &Tunables,
) -> Option<MeleeHit> {
    if !rects_overlap(hitbox, &player.bounds()) {
        return None;
    }
    let (damage, knockback) = if blocking {
        (mitigated(damage, tunables), knockback * 0.5)
    } else {
        (damage, knockback)
    };
    player
        .take_damage(damage, knockback, tunables)
        .then_some(MeleeHit { damage, blocked: blocking })
}

pub fn plugin(app: &mut App) {
    app.add_message::<CombatEvent>();
    dispatch::plugin(app);
}

#[cfg(test)]
mod tests;
