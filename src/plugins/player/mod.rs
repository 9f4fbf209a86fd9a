//! Player plugin.
//!
//! Pipeline (one fixed tick):
//! - external code writes `ControlInput`
//! - `update_player` samples it, runs the controller state machine and moves the body
//! - cues (jump, dash, swing) go straight to the cue sink; the special attack
//!   becomes a `CombatEvent` so the dispatcher owns its shake and particles
//!
//! The controller itself (`PlayerController::update`) is plain Rust over an
//! `&mut Actor`, so the state machine is testable without a `World`.

use bevy::prelude::*;

use crate::common::math::tick_down;
use crate::common::tunables::Tunables;
use crate::plugins::combat::{AttackBox, AttackKind, CombatEvent};
use crate::plugins::core::SimSet;
use crate::plugins::cues::Cue;
use crate::plugins::input::{Button, ControlInput};
use crate::plugins::physics::Actor;

#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Player;

/// Where a new player (or a player starting a level) stands.
pub const PLAYER_START_X: f32 = 100.0;

/// Horizontal speed kept while blocking.
const BLOCK_DAMPING: f32 = 0.5;
/// Horizontal speed kept on the tick a punch starts.
const PUNCH_LOCK: f32 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayerState {
    #[default]
    Idle,
    Walk,
    Jump,
    Punch,
    Kick,
    Block,
    Dash,
}

/// Side effects of one controller step.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerReport {
    pub cues: Vec<Cue>,
    /// The special attack fired this tick.
    pub special: bool,
}

#[derive(Component, Debug, Clone, PartialEq)]
pub struct PlayerController {
    state: PlayerState,
    energy: f32,
    max_energy: f32,
    combo: u32,
    combo_timer: u32,
    /// 0 before the first punch, then cycles 1..=3.
    punch_chain: u32,
    attack: Option<AttackBox>,
    attack_timer: u32,
    action_cooldown: u32,
    dashing: bool,
    dash_timer: u32,
    dash_cooldown: u32,
}

impl PlayerController {
    pub fn new(tunables: &Tunables) -> Self {
        Self {
            state: PlayerState::Idle,
            energy: tunables.max_energy,
            max_energy: tunables.max_energy,
            combo: 0,
            combo_timer: 0,
            punch_chain: 0,
            attack: None,
            attack_timer: 0,
            action_cooldown: 0,
            dashing: false,
            dash_timer: 0,
            dash_cooldown: 0,
        }
    }

    #[inline]
    pub fn state(&self) -> PlayerState {
        self.state
    }

    #[inline]
    pub fn energy(&self) -> f32 {
        self.energy
    }

    #[inline]
    pub fn max_energy(&self) -> f32 {
        self.max_energy
    }

    #[inline]
    pub fn combo(&self) -> u32 {
        self.combo
    }

    #[inline]
    pub fn combo_timer(&self) -> u32 {
        self.combo_timer
    }

    #[inline]
    pub fn punch_chain(&self) -> u32 {
        self.punch_chain
    }

    #[inline]
    pub fn attack(&self) -> Option<AttackBox> {
        self.attack
    }

    #[inline]
    pub fn is_blocking(&self) -> bool {
        self.state == PlayerState::Block
    }

    #[inline]
    pub fn is_dashing(&self) -> bool {
        self.dashing
    }

    #[inline]
    fn is_attacking(&self) -> bool {
        matches!(self.state, PlayerState::Punch | PlayerState::Kick)
    }

    /// A hit landed: extend the combo, refresh its timer, refund some energy.
    pub fn add_combo(&mut self, tunables: &Tunables) {
        self.combo = (self.combo + 1).min(tunables.max_combo);
        self.combo_timer = tunables.combo_timeout;
        self.energy = (self.energy + tunables.energy_per_hit).min(self.max_energy);
    }

    /// Back to a neutral stance for a new level. Energy and combo carry over.
    pub fn reset_stance(&mut self) {
        self.state = PlayerState::Idle;
        self.attack = None;
        self.attack_timer = 0;
        self.action_cooldown = 0;
        self.dashing = false;
        self.dash_timer = 0;
    }

    /// One controller step. See module docs for the ordering.
    pub fn update(&mut self, body: &mut Actor, input: &ControlInput, t: &Tunables) -> PlayerReport {
        let mut report = PlayerReport::default();

        if self.combo_timer > 0 {
            self.combo_timer -= 1;
            if self.combo_timer == 0 {
                self.combo = 0;
            }
        }

        tick_down(&mut self.action_cooldown);
        tick_down(&mut self.dash_cooldown);
        if self.attack_timer > 0 {
            self.attack_timer -= 1;
            if self.attack_timer == 0 {
                self.attack = None;
                if self.is_attacking() {
                    self.state = self.resting_state(body);
                }
            }
        }

        self.energy = (self.energy + t.energy_regen).min(self.max_energy);

        if self.dashing {
            body.vel.x = body.facing * t.dash_speed;
            tick_down(&mut self.dash_timer);
            if self.dash_timer == 0 {
                self.dashing = false;
                self.state = self.resting_state(body);
            }
            body.integrate(t);
            return report;
        }

        if input.held(Button::Block) && body.grounded {
            body.vel.x *= BLOCK_DAMPING;
            self.state = PlayerState::Block;
            self.clear_attack();
            body.integrate(t);
            return report;
        }

        let axis = input.axis();
        if axis.abs() > t.move_deadzone {
            body.vel.x = axis * t.player_speed;
            body.facing = axis.signum();
            if !self.is_attacking() {
                self.state = if body.grounded { PlayerState::Walk } else { PlayerState::Jump };
            }
        } else if !self.is_attacking() {
            self.state = self.resting_state(body);
        }

        if body.grounded && !self.is_attacking() && input.held(Button::Jump) {
            body.vel.y = -t.jump_impulse;
            body.grounded = false;
            self.state = PlayerState::Jump;
            report.cues.push(Cue::Jump);
        }

        if input.held(Button::Dash) && self.dash_cooldown == 0 {
            self.dashing = true;
            self.dash_timer = t.dash_duration;
            self.dash_cooldown = t.dash_cooldown;
            body.grant_invincibility(t.dash_duration);
            self.state = PlayerState::Dash;
            self.clear_attack();
            report.cues.push(Cue::Dash);
        }

        if !self.dashing && self.action_cooldown == 0 && self.attack.is_none() {
            if let Some(kind) = self.requested_attack(body, input, t) {
                self.start_attack(kind, body, t, &mut report);
            }
        }

        body.integrate(t);

        if let Some(attack) = self.attack.as_mut() {
            attack.rect = attack.kind.hitbox(body);
        }
        if body.grounded && self.state == PlayerState::Jump {
            self.state = PlayerState::Idle;
        }

        report
    }

    fn resting_state(&self, body: &Actor) -> PlayerState {
        if body.grounded { PlayerState::Idle } else { PlayerState::Jump }
    }

    fn clear_attack(&mut self) {
        self.attack = None;
        self.attack_timer = 0;
    }

    /// Special > kick > punch. A special without enough energy falls through.
    fn requested_attack(&self, body: &Actor, input: &ControlInput, t: &Tunables) -> Option<AttackKind> {
        if input.held(Button::Special) && self.energy >= t.special_cost {
            Some(AttackKind::Special)
        } else if input.held(Button::Kick) {
            Some(if body.grounded { AttackKind::Kick } else { AttackKind::JumpKick })
        } else if input.held(Button::Attack) {
            Some(AttackKind::Punch)
        } else {
            None
        }
    }

    fn start_attack(&mut self, kind: AttackKind, body: &mut Actor, t: &Tunables, report: &mut PlayerReport) {
        let profile = kind.profile();
        let damage = match kind {
            AttackKind::Punch => {
                self.punch_chain = self.punch_chain % 3 + 1;
                body.vel.x *= PUNCH_LOCK;
                report.cues.push(Cue::Hit);
                kind.damage(self.punch_chain)
            }
            AttackKind::Kick | AttackKind::JumpKick => {
                report.cues.push(Cue::Hit);
                kind.damage(0)
            }
            AttackKind::Special => {
                self.energy -= t.special_cost;
                report.special = true;
                kind.damage(0)
            }
        };

        self.state = match kind {
            AttackKind::Punch | AttackKind::Special => PlayerState::Punch,
            AttackKind::Kick | AttackKind::JumpKick => PlayerState::Kick,
        };
        self.attack = Some(AttackBox::new(kind, body, damage));
        self.attack_timer = profile.active;
        self.action_cooldown = profile.cooldown;
    }
}

/// Spawn the session's player standing at the level start.
pub fn spawn_player(commands: &mut Commands, tunables: &Tunables) -> Entity {
    let size = Vec2::new(tunables.player_width, tunables.player_height);
    commands
        .spawn((
            Name::new("Player"),
            Player,
            Actor::standing(PLAYER_START_X, size, tunables.player_max_health, tunables),
            PlayerController::new(tunables),
        ))
        .id()
}

pub fn plugin(app: &mut App) {
    app.add_systems(FixedUpdate, update_player.in_set(SimSet::Player));
}

fn update_player(
    tunables: Res<Tunables>,
    input: Res<ControlInput>,
    mut q_player: Query<(&mut Actor, &mut PlayerController), With<Player>>,
    mut cues: MessageWriter<Cue>,
    mut events: MessageWriter<CombatEvent>,
) {
    let Ok((mut body, mut controller)) = q_player.single_mut() else {
        return;
    };
    if body.is_dead() {
        return;
    }

    body.tick_timers();
    let report = controller.update(&mut body, &input, &tunables);

    for cue in report.cues {
        cues.write(cue);
    }
    if report.special {
        events.write(CombatEvent::SpecialUnleashed { at: body.center() });
    }
}

#[cfg(test)]
mod tests;
