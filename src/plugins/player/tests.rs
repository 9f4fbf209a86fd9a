use bevy::prelude::*;

use super::{spawn_player, Player, PlayerController, PlayerState, PLAYER_START_X};
use crate::common::test_utils::run_system_once;
use crate::common::tunables::Tunables;
use crate::plugins::combat::{self, AttackKind, CombatEvent};
use crate::plugins::cues::Cue;
use crate::plugins::input::ControlInput;
use crate::plugins::physics::Actor;

fn player_body(t: &Tunables) -> Actor {
    Actor::standing(PLAYER_START_X, Vec2::new(t.player_width, t.player_height), t.player_max_health, t)
}

fn idle() -> ControlInput {
    ControlInput::default()
}

fn press(names: &[&str]) -> ControlInput {
    ControlInput::from_named(0.0, names.iter().copied())
}

#[test]
fn spawn_creates_player_at_start() {
    let t = Tunables::default();
    let mut world = World::new();
    run_system_once(&mut world, move |mut commands: Commands| {
        spawn_player(&mut commands, &t);
    });

    let (body, controller) = world
        .query_filtered::<(&Actor, &PlayerController), With<Player>>()
        .single(&world)
        .unwrap();
    assert_eq!(body.pos, Vec2::new(100.0, 420.0));
    assert!(body.grounded);
    assert_eq!(body.health(), 100);
    assert_eq!(controller.energy(), controller.max_energy());
    assert_eq!(controller.state(), PlayerState::Idle);
}

#[test]
fn walking_sets_velocity_and_facing() {
    let t = Tunables::default();
    let mut body = player_body(&t);
    let mut c = PlayerController::new(&t);

    c.update(&mut body, &ControlInput::from_named(-1.0, []), &t);
    assert_eq!(c.state(), PlayerState::Walk);
    assert_eq!(body.facing, -1.0);
    assert!((body.vel.x - (-5.0 * t.friction)).abs() < 1e-4);

    let mut body = player_body(&t);
    let mut c = PlayerController::new(&t);
    c.update(&mut body, &ControlInput::from_named(0.05, []), &t);
    assert_eq!(c.state(), PlayerState::Idle);
    assert_eq!(body.vel.x, 0.0);
}

#[test]
fn jump_launches_and_stays_jump_while_airborne() {
    let t = Tunables::default();
    let mut body = player_body(&t);
    let mut c = PlayerController::new(&t);

    let report = c.update(&mut body, &press(&["jump"]), &t);
    assert_eq!(report.cues, vec![Cue::Jump]);
    assert_eq!(c.state(), PlayerState::Jump);
    assert!((body.vel.y - (-t.jump_impulse + t.gravity)).abs() < 1e-4);
    assert!(!body.grounded);

    c.update(&mut body, &ControlInput::from_named(1.0, []), &t);
    assert_eq!(c.state(), PlayerState::Jump);

    for _ in 0..60 {
        c.update(&mut body, &idle(), &t);
    }
    assert!(body.grounded);
    assert_eq!(c.state(), PlayerState::Idle);
}

#[test]
fn punch_chain_cycles_and_scales_damage() {
    let t = Tunables::default();
    let mut body = player_body(&t);
    let mut c = PlayerController::new(&t);

    let mut punches = Vec::new();
    for _ in 0..80 {
        let report = c.update(&mut body, &press(&["attack"]), &t);
        if report.cues.contains(&Cue::Hit) {
            let attack = c.attack().unwrap();
            assert_eq!(attack.kind, AttackKind::Punch);
            punches.push((c.punch_chain(), attack.damage));
        }
    }
    assert_eq!(punches, vec![(1, 15), (2, 20), (3, 25), (1, 15)]);
}

#[test]
fn attack_box_expires_and_state_returns_to_idle() {
    let t = Tunables::default();
    let mut body = player_body(&t);
    let mut c = PlayerController::new(&t);

    c.update(&mut body, &press(&["attack"]), &t);
    assert_eq!(c.state(), PlayerState::Punch);

    // Held attack during cooldown is ignored.
    for _ in 0..9 {
        c.update(&mut body, &press(&["attack"]), &t);
        assert!(c.attack().is_some());
    }
    c.update(&mut body, &idle(), &t);
    assert!(c.attack().is_none());
    assert_eq!(c.state(), PlayerState::Idle);
}

#[test]
fn kick_depends_on_ground_contact() {
    let t = Tunables::default();
    let mut body = player_body(&t);
    let mut c = PlayerController::new(&t);
    c.update(&mut body, &press(&["kick"]), &t);
    let kick = c.attack().unwrap();
    assert_eq!((kick.kind, kick.damage), (AttackKind::Kick, 25));
    assert_eq!(c.state(), PlayerState::Kick);

    let mut body = player_body(&t);
    let mut c = PlayerController::new(&t);
    c.update(&mut body, &press(&["jump"]), &t);
    c.update(&mut body, &press(&["kick"]), &t);
    let kick = c.attack().unwrap();
    assert_eq!((kick.kind, kick.damage), (AttackKind::JumpKick, 20));
}

#[test]
fn special_spends_energy_and_falls_back_to_punch_when_drained() {
    let t = Tunables::default();
    let mut body = player_body(&t);
    let mut c = PlayerController::new(&t);
    let both = press(&["special", "attack"]);

    let report = c.update(&mut body, &both, &t);
    assert!(report.special);
    assert_eq!(c.attack().map(|a| a.kind), Some(AttackKind::Special));
    assert_eq!(c.energy(), 50.0);

    for _ in 0..39 {
        assert!(!c.update(&mut body, &both, &t).special);
    }
    assert!(c.update(&mut body, &both, &t).special);
    assert!((c.energy() - 4.0).abs() < 1e-3);

    for _ in 0..39 {
        c.update(&mut body, &idle(), &t);
    }
    let report = c.update(&mut body, &both, &t);
    assert!(!report.special);
    assert_eq!(c.attack().map(|a| a.kind), Some(AttackKind::Punch));
}

#[test]
fn block_clears_attack_and_damps_movement() {
    let t = Tunables::default();
    let mut body = player_body(&t);
    let mut c = PlayerController::new(&t);

    c.update(&mut body, &press(&["attack"]), &t);
    body.vel.x = 4.0;
    c.update(&mut body, &press(&["block"]), &t);

    assert!(c.is_blocking());
    assert!(c.attack().is_none());
    assert!((body.vel.x - 4.0 * 0.5 * t.friction).abs() < 1e-4);
}

#[test]
fn dash_grants_invincibility_and_respects_cooldown() {
    let t = Tunables::default();
    let mut body = player_body(&t);
    let mut c = PlayerController::new(&t);
    let dash = press(&["dash"]);

    let report = c.update(&mut body, &dash, &t);
    assert_eq!(report.cues, vec![Cue::Dash]);
    assert!(c.is_dashing());
    assert_eq!(body.invincible(), t.dash_duration);
    assert!(!body.clone().take_damage(10, 0.0, &t));

    c.update(&mut body, &dash, &t);
    assert!((body.vel.x - t.dash_speed * t.friction).abs() < 1e-4);

    for _ in 0..11 {
        c.update(&mut body, &dash, &t);
    }
    assert!(!c.is_dashing());

    let report = c.update(&mut body, &dash, &t);
    assert!(!report.cues.contains(&Cue::Dash));
}

#[test]
fn combo_lapses_after_timeout_and_is_capped() {
    let t = Tunables::default();
    let mut body = player_body(&t);
    let mut c = PlayerController::new(&t);

    c.add_combo(&t);
    for _ in 0..t.combo_timeout - 1 {
        c.update(&mut body, &idle(), &t);
    }
    assert_eq!(c.combo(), 1);
    c.update(&mut body, &idle(), &t);
    assert_eq!(c.combo(), 0);

    for _ in 0..200 {
        c.add_combo(&t);
    }
    assert_eq!(c.combo(), t.max_combo);
}

#[test]
fn first_punch_on_adjacent_zombie_deals_fifteen_with_knockback() {
    let t = Tunables::default();
    let mut body = player_body(&t);
    let mut c = PlayerController::new(&t);
    let mut zombie = Actor::standing(130.0, Vec2::new(40.0, 80.0), 30, &t);

    c.update(&mut body, &press(&["attack"]), &t);
    let attack = c.attack().unwrap();

    assert!(combat::strike(&attack, &body, &mut zombie, &t));
    assert_eq!(zombie.health(), 15);
    assert_eq!(zombie.vel.x, 5.0);
}

#[test]
fn update_player_writes_cues_and_special_event() {
    let t = Tunables::default();
    let mut world = World::new();
    world.insert_resource(t.clone());
    world.insert_resource(press(&["jump", "special"]));
    world.init_resource::<Messages<Cue>>();
    world.init_resource::<Messages<CombatEvent>>();
    run_system_once(&mut world, move |mut commands: Commands| {
        spawn_player(&mut commands, &t);
    });

    run_system_once(&mut world, super::update_player);

    let cues: Vec<Cue> = world.resource_mut::<Messages<Cue>>().drain().collect();
    assert_eq!(cues, vec![Cue::Jump]);
    let events: Vec<CombatEvent> = world.resource_mut::<Messages<CombatEvent>>().drain().collect();
    assert!(matches!(events.as_slice(), [CombatEvent::SpecialUnleashed { .. }]));
}
