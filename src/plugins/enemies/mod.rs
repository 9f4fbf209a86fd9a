//! Enemies plugin: zombie variants, their chase/attack AI and the boss.
//!
//! ---------------------------
//! HOW THIS IS DESIGNED (ECS)
//! ---------------------------
//! 1) FACTS live in components:
//!    - `Actor` is the physical body (shared with the player).
//!    - `Zombie` holds the kind, its fixed stats and the AI state.
//!    - `Boss` is only present on the boss and holds phase + smash cooldown.
//!
//! 2) RULES run once per fixed tick in `update_enemies`:
//!    - think (chase / melee / shoot), integrate physics,
//!    - then test the player's live attack box against the body.
//!
//! 3) OUTCOMES leave as `CombatEvent` messages. Nothing here touches score,
//!    particles or cues directly.
//!
//! Dead zombies stay in the world with `dead` set until `SimSet::Compact`
//! despawns them at the tick boundary.

use bevy::prelude::*;

use crate::common::math::tick_down;
use crate::common::tunables::Tunables;
use crate::plugins::combat::{self, CombatEvent};
use crate::plugins::core::{LevelScoped, SimSet};
use crate::plugins::physics::Actor;
use crate::plugins::player::{Player, PlayerController};
use crate::plugins::projectiles::Projectile;

pub mod boss;

pub use boss::Boss;

/// Closed set of enemy variants. Behaviour differences are dispatched with
/// `match` on this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ZombieKind {
    Basic,
    Fast,
    Tank,
    Ranged,
    Boss,
}

/// Per-kind constants, fixed when the zombie spawns.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZombieStats {
    pub max_health: i32,
    pub speed: f32,
    pub damage: i32,
    pub size: Vec2,
    pub detection_range: f32,
    pub melee_range: f32,
    pub attack_cooldown: u32,
    /// Only ranged zombies shoot.
    pub projectile_range: Option<f32>,
    pub kill_score: u32,
}

impl ZombieKind {
    pub fn stats(self) -> ZombieStats {
        match self {
            Self::Basic => ZombieStats {
                max_health: 30,
                speed: 1.5,
                damage: 10,
                size: Vec2::new(40.0, 80.0),
                detection_range: 500.0,
                melee_range: 50.0,
                attack_cooldown: 60,
                projectile_range: None,
                kill_score: 100,
            },
            Self::Fast => ZombieStats {
                max_health: 20,
                speed: 3.0,
                damage: 8,
                size: Vec2::new(35.0, 70.0),
                detection_range: 600.0,
                melee_range: 45.0,
                attack_cooldown: 45,
                projectile_range: None,
                kill_score: 150,
            },
            Self::Tank => ZombieStats {
                max_health: 80,
                speed: 0.8,
                damage: 20,
                size: Vec2::new(60.0, 100.0),
                detection_range: 400.0,
                melee_range: 60.0,
                attack_cooldown: 90,
                projectile_range: None,
                kill_score: 250,
            },
            Self::Ranged => ZombieStats {
                max_health: 25,
                speed: 1.2,
                damage: 12,
                size: Vec2::new(40.0, 80.0),
                detection_range: 700.0,
                melee_range: 50.0,
                attack_cooldown: 100,
                projectile_range: Some(350.0),
                kill_score: 200,
            },
            Self::Boss => ZombieStats {
                max_health: 300,
                speed: boss::PHASE_ONE_SPEED,
                damage: 25,
                size: Vec2::new(100.0, 140.0),
                detection_range: 800.0,
                melee_range: 80.0,
                attack_cooldown: 70,
                projectile_range: None,
                kill_score: 1000,
            },
        }
    }

    /// Kinds the director may spawn on `level`. Bosses are never drawn here.
    pub fn pool_for_level(level: u32) -> &'static [ZombieKind] {
        match level {
            0 | 1 => &[Self::Basic, Self::Fast],
            2 => &[Self::Basic, Self::Fast, Self::Tank],
            _ => &[Self::Basic, Self::Fast, Self::Tank, Self::Ranged],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ZombieState {
    #[default]
    Idle,
    Walk,
    Attack,
    Hurt,
}

/// Horizontal speed multiplier while an enemy is not walking.
const IDLE_DECAY: f32 = 0.8;
/// Knockback an enemy melee swing gives the player.
const MELEE_KNOCKBACK: f32 = 6.0;

#[derive(Component, Debug, Clone)]
pub struct Zombie {
    kind: ZombieKind,
    stats: ZombieStats,
    /// Current walk speed. Only the boss phase change rewrites it.
    pub speed: f32,
    pub attack_cooldown: u32,
    pub state: ZombieState,
}

/// What a zombie decided to do this tick.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ZombieIntent {
    /// Melee hitbox to test against the player.
    pub melee: Option<Rect>,
    /// Projectile to launch (enemy-owned).
    pub shot: Option<Projectile>,
}

impl Zombie {
    pub fn new(kind: ZombieKind) -> Self {
        let stats = kind.stats();
        Self {
            kind,
            stats,
            speed: stats.speed,
            attack_cooldown: 0,
            state: ZombieState::Idle,
        }
    }

    #[inline]
    pub fn kind(&self) -> ZombieKind {
        self.kind
    }

    #[inline]
    pub fn stats(&self) -> &ZombieStats {
        &self.stats
    }

    /// Melee hitbox in front of the body.
    pub fn melee_hitbox(&self, body: &Actor) -> Rect {
        let reach = self.stats.melee_range;
        let x = if body.facing >= 0.0 { body.pos.x + body.size.x } else { body.pos.x - reach };
        let y = body.pos.y + 10.0;
        Rect::new(x, y, x + reach, y + (body.size.y - 20.0).max(1.0))
    }

    /// One AI step: chase, swing or idle, plus the ranged shot.
    ///
    /// Only sets velocity/facing/state; the caller integrates physics and
    /// resolves the returned hitbox.
    pub fn think(&mut self, body: &mut Actor, player: &Actor, tunables: &Tunables) -> ZombieIntent {
        tick_down(&mut self.attack_cooldown);

        let mut intent = ZombieIntent::default();
        let dx = player.center().x - body.center().x;
        let dist = dx.abs();

        if dist > self.stats.detection_range {
            body.vel.x *= IDLE_DECAY;
            self.state = ZombieState::Idle;
            return intent;
        }

        if dx != 0.0 {
            body.facing = dx.signum();
        }

        if dist > self.stats.melee_range {
            body.vel.x = body.facing * self.speed;
            self.state = ZombieState::Walk;
        } else if self.attack_cooldown == 0 {
            self.state = ZombieState::Attack;
            self.attack_cooldown = self.stats.attack_cooldown;
            intent.melee = Some(self.melee_hitbox(body));
        } else {
            body.vel.x *= IDLE_DECAY;
            self.state = ZombieState::Idle;
        }

        if let Some(range) = self.stats.projectile_range {
            if dist <= range && self.attack_cooldown == 0 {
                self.state = ZombieState::Attack;
                self.attack_cooldown = self.stats.attack_cooldown;
                intent.shot = Some(Projectile::aimed_at(body, player, self.stats.damage, tunables));
            }
        }

        intent
    }

    /// Knockback of this zombie's melee swing: away from the zombie.
    #[inline]
    pub fn melee_knockback(&self, body: &Actor) -> f32 {
        body.facing * MELEE_KNOCKBACK
    }
}

/// Spawn a zombie of `kind` standing on the ground at `x`.
pub fn spawn_zombie(commands: &mut Commands, kind: ZombieKind, x: f32, tunables: &Tunables) -> Entity {
    let stats = kind.stats();
    let mut e = commands.spawn((
        Name::new(format!("Zombie({kind:?})")),
        Actor::standing(x, stats.size, stats.max_health, tunables),
        Zombie::new(kind),
        LevelScoped,
    ));
    if kind == ZombieKind::Boss {
        e.insert(Boss::new());
    }
    e.id()
}

pub fn plugin(app: &mut App) {
    app.add_systems(FixedUpdate, update_enemies.in_set(SimSet::Enemies));
}

/// Advance every live enemy one tick.
///
/// Per enemy: AI, boss phase + smash, physics, then the player's live attack
/// box against the body. The two queries are disjoint via `With/Without<Player>`.
pub fn update_enemies(
    mut commands: Commands,
    tunables: Res<Tunables>,
    mut q_player: Query<(&mut Actor, &PlayerController), (With<Player>, Without<Zombie>)>,
    mut q_enemies: Query<(Entity, &mut Actor, &mut Zombie, Option<&mut Boss>), Without<Player>>,
    mut events: MessageWriter<CombatEvent>,
) {
    let Ok((mut player, controller)) = q_player.single_mut() else {
        return;
    };
    let attack = controller.attack();
    let blocking = controller.is_blocking();
    let t = &*tunables;

    for (entity, mut body, mut zombie, mut boss) in &mut q_enemies {
        if body.is_dead() {
            continue;
        }
        body.tick_timers();

        if let Some(boss) = boss.as_deref_mut() {
            boss.check_phase(&body, &mut zombie);
        }

        let intent = zombie.think(&mut body, &player, t);

        if let Some(hitbox) = intent.melee {
            let knockback = zombie.melee_knockback(&body);
            if let Some(hit) = combat::melee_vs_player(&hitbox, zombie.stats().damage, knockback, &mut player, blocking, t) {
                events.write(CombatEvent::PlayerHit {
                    at: player.center(),
                    damage: hit.damage,
                    blocked: hit.blocked,
                });
            }
        }

        if let Some(shot) = intent.shot {
            commands.spawn((Name::new("Projectile(Enemy)"), shot, LevelScoped));
        }

        if let Some(boss) = boss.as_deref_mut() {
            if let Some(smash) = boss.try_smash(&body, &mut player, t) {
                if let Some(damage) = smash.player_damage {
                    events.write(CombatEvent::PlayerHit { at: player.center(), damage, blocked: false });
                }
                events.write(CombatEvent::GroundSmash {
                    at: Vec2::new(body.center().x, t.ground_y),
                });
                for x in smash.minion_xs {
                    spawn_zombie(&mut commands, ZombieKind::Basic, x, t);
                }
            }
        }

        body.integrate(t);

        if let Some(attack) = attack.as_ref() {
            if combat::strike(attack, &player, &mut body, t) {
                zombie.state = ZombieState::Hurt;
                events.write(CombatEvent::HitLanded {
                    target: entity,
                    at: body.center(),
                    damage: attack.damage,
                });
                if body.is_dead() {
                    events.write(CombatEvent::EnemyKilled { kind: zombie.kind(), at: body.center() });
                } else if let Some(boss) = boss.as_deref_mut() {
                    boss.check_phase(&body, &mut zombie);
                }
            }
        }
    }
}
