//! Discrete combat outcomes.
//!
//! Producers (player, enemy, projectile passes) write these; the dispatcher
//! consumes them at the end of the tick.

use bevy::prelude::*;

use crate::plugins::enemies::ZombieKind;

#[derive(Message, Debug, Clone, Copy, PartialEq)]
pub enum CombatEvent {
    /// A player attack or projectile damaged an enemy.
    HitLanded { target: Entity, at: Vec2, damage: i32 },
    /// An enemy's health reached zero this tick.
    EnemyKilled { kind: ZombieKind, at: Vec2 },
    /// The player took damage.
    PlayerHit { at: Vec2, damage: i32, blocked: bool },
    /// The player fired the special attack.
    SpecialUnleashed { at: Vec2 },
    /// A boss slammed the ground.
    GroundSmash { at: Vec2 },
}
