use bevy::prelude::*;

use super::dispatch::{apply_combat_events, COMBO_KILL_BONUS, HIT_SCORE};
use super::{melee_vs_player, mitigated, strike, AttackBox, AttackKind, CombatEvent};
use crate::common::test_utils::run_system_once;
use crate::common::tunables::Tunables;
use crate::plugins::camera::CameraRig;
use crate::plugins::core::SimRng;
use crate::plugins::cues::Cue;
use crate::plugins::director::SessionStats;
use crate::plugins::enemies::ZombieKind;
use crate::plugins::particles::{Burst, Particle};
use crate::plugins::physics::Actor;
use crate::plugins::player::{Player, PlayerController};

fn body_at(x: f32, t: &Tunables) -> Actor {
    Actor::standing(x, Vec2::new(40.0, 80.0), 100, t)
}

#[test]
fn punch_damage_scales_with_chain() {
    assert_eq!(AttackKind::Punch.damage(1), 15);
    assert_eq!(AttackKind::Punch.damage(2), 20);
    assert_eq!(AttackKind::Punch.damage(3), 25);
    assert_eq!(AttackKind::Special.damage(3), 40);
}

#[test]
fn directional_hitbox_follows_facing() {
    let t = Tunables::default();
    let mut body = body_at(100.0, &t);

    let right = AttackKind::Punch.hitbox(&body);
    assert_eq!(right.min.x, 140.0);
    assert_eq!(right.max.x, 180.0);
    assert_eq!(right.min.y, body.pos.y + 20.0);

    body.facing = -1.0;
    let left = AttackKind::Punch.hitbox(&body);
    assert_eq!(left.min.x, 60.0);
    assert_eq!(left.max.x, 100.0);
}

#[test]
fn special_is_centred_and_pushes_away() {
    let t = Tunables::default();
    let attacker = body_at(500.0, &t);
    let special = AttackBox::new(AttackKind::Special, &attacker, 40);
    assert_eq!(special.rect.center(), attacker.center());

    let mut behind = body_at(420.0, &t);
    assert!(strike(&special, &attacker, &mut behind, &t));
    assert_eq!(behind.vel.x, -12.0);
    assert_eq!(behind.health(), 60);
}

#[test]
fn strike_misses_when_edges_only_touch() {
    let t = Tunables::default();
    let attacker = body_at(100.0, &t);
    let punch = AttackBox::new(AttackKind::Punch, &attacker, 15);
    // Punch box ends at x = 180.
    let mut target = body_at(180.0, &t);
    assert!(!strike(&punch, &attacker, &mut target, &t));
    assert_eq!(target.health(), 100);
}

#[test]
fn blocked_melee_is_mitigated_and_softened() {
    let t = Tunables::default();
    assert_eq!(mitigated(10, &t), 3);
    assert_eq!(mitigated(25, &t), 7);

    let mut player = body_at(100.0, &t);
    let hitbox = player.bounds();
    let hit = melee_vs_player(&hitbox, 10, -6.0, &mut player, true, &t).unwrap();
    assert_eq!((hit.damage, hit.blocked), (3, true));
    assert_eq!(player.health(), 97);
    assert_eq!(player.vel.x, -3.0);

    // Invincible now: nothing lands.
    assert!(melee_vs_player(&hitbox, 10, -6.0, &mut player, false, &t).is_none());
}

fn dispatch_world(t: &Tunables) -> World {
    let mut world = World::new();
    world.insert_resource(t.clone());
    world.insert_resource(SimRng::seeded(1));
    world.init_resource::<SessionStats>();
    world.init_resource::<CameraRig>();
    world.init_resource::<Messages<CombatEvent>>();
    world.init_resource::<Messages<Cue>>();
    world.spawn((Player, PlayerController::new(t)));
    world
}

fn particle_count(world: &mut World) -> usize {
    world.query::<&Particle>().iter(world).count()
}

#[test]
fn hits_and_kills_feed_score_combo_and_particles() {
    let t = Tunables::default();
    let mut world = dispatch_world(&t);
    let target = world.spawn_empty().id();

    world.write_message(CombatEvent::HitLanded { target, at: Vec2::ZERO, damage: 15 });
    world.write_message(CombatEvent::HitLanded { target, at: Vec2::ZERO, damage: 20 });
    world.write_message(CombatEvent::EnemyKilled { kind: ZombieKind::Fast, at: Vec2::ZERO });
    run_system_once(&mut world, apply_combat_events);

    let stats = *world.resource::<SessionStats>();
    assert_eq!(stats.kills, 1);
    assert_eq!(stats.max_combo, 2);
    assert_eq!(stats.score, 2 * HIT_SCORE + 150 + 2 * COMBO_KILL_BONUS);

    let expected = 2 * Burst::BLOOD.count + Burst::GORE.count;
    assert_eq!(particle_count(&mut world), expected as usize);

    let cues: Vec<Cue> = world.resource_mut::<Messages<Cue>>().drain().collect();
    assert_eq!(cues, vec![Cue::ZombieHit, Cue::ZombieHit]);
}

#[test]
fn player_hits_shake_or_spark() {
    let t = Tunables::default();
    let mut world = dispatch_world(&t);

    world.write_message(CombatEvent::PlayerHit { at: Vec2::ZERO, damage: 3, blocked: true });
    run_system_once(&mut world, apply_combat_events);
    assert_eq!(world.resource::<CameraRig>().shake, 0.0);
    assert_eq!(particle_count(&mut world), Burst::SPARKS.count as usize);
    let cues: Vec<Cue> = world.resource_mut::<Messages<Cue>>().drain().collect();
    assert_eq!(cues, vec![Cue::Block]);

    world.write_message(CombatEvent::PlayerHit { at: Vec2::ZERO, damage: 10, blocked: false });
    world.write_message(CombatEvent::GroundSmash { at: Vec2::ZERO });
    run_system_once(&mut world, apply_combat_events);
    assert_eq!(world.resource::<CameraRig>().shake, 20.0);
}

#[test]
fn special_shakes_and_cues() {
    let t = Tunables::default();
    let mut world = dispatch_world(&t);

    world.write_message(CombatEvent::SpecialUnleashed { at: Vec2::new(10.0, 10.0) });
    run_system_once(&mut world, apply_combat_events);

    assert_eq!(world.resource::<CameraRig>().shake, 15.0);
    assert_eq!(particle_count(&mut world), Burst::SPECIAL.count as usize);
    let cues: Vec<Cue> = world.resource_mut::<Messages<Cue>>().drain().collect();
    assert_eq!(cues, vec![Cue::Special]);
}
