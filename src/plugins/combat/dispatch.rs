//! Combat event fan-out.
//!
//! The only consumer of `CombatEvent`. Keeping score, combo, shake, particles
//! and cues in one system means collision code never reaches into
//! presentation state.

use bevy::prelude::*;

use crate::common::tunables::Tunables;
use crate::plugins::camera::CameraRig;
use crate::plugins::core::{SimRng, SimSet};
use crate::plugins::cues::Cue;
use crate::plugins::director::SessionStats;
use crate::plugins::particles::{spawn_burst, Burst};
use crate::plugins::player::{Player, PlayerController};

use super::CombatEvent;

/// Score for each landed hit.
pub const HIT_SCORE: u32 = 10;
/// Extra kill score per combo step held at the moment of the kill.
pub const COMBO_KILL_BONUS: u32 = 5;

pub const SPECIAL_SHAKE: f32 = 15.0;
pub const SMASH_SHAKE: f32 = 20.0;
pub const PLAYER_HIT_SHAKE: f32 = 5.0;

pub fn plugin(app: &mut App) {
    app.add_systems(FixedUpdate, apply_combat_events.in_set(SimSet::Dispatch));
}

pub fn apply_combat_events(
    mut commands: Commands,
    tunables: Res<Tunables>,
    mut rng: ResMut<SimRng>,
    mut stats: ResMut<SessionStats>,
    mut camera: ResMut<CameraRig>,
    mut q_player: Query<&mut PlayerController, With<Player>>,
    mut events: MessageReader<CombatEvent>,
    mut cues: MessageWriter<Cue>,
) {
    let mut controller = q_player.single_mut().ok();

    for ev in events.read() {
        match *ev {
            CombatEvent::HitLanded { at, .. } => {
                stats.score += HIT_SCORE;
                if let Some(c) = controller.as_deref_mut() {
                    c.add_combo(&tunables);
                    stats.max_combo = stats.max_combo.max(c.combo());
                }
                spawn_burst(&mut commands, &mut rng, at, Burst::BLOOD);
                cues.write(Cue::ZombieHit);
            }
            CombatEvent::EnemyKilled { kind, at } => {
                let combo = controller.as_deref().map_or(0, PlayerController::combo);
                stats.kills += 1;
                stats.score += kind.stats().kill_score + combo * COMBO_KILL_BONUS;
                spawn_burst(&mut commands, &mut rng, at, Burst::GORE);
            }
            CombatEvent::PlayerHit { at, blocked, .. } => {
                if blocked {
                    spawn_burst(&mut commands, &mut rng, at, Burst::SPARKS);
                    cues.write(Cue::Block);
                } else {
                    camera.add_shake(PLAYER_HIT_SHAKE);
                }
            }
            CombatEvent::SpecialUnleashed { at } => {
                camera.add_shake(SPECIAL_SHAKE);
                spawn_burst(&mut commands, &mut rng, at, Burst::SPECIAL);
                cues.write(Cue::Special);
            }
            CombatEvent::GroundSmash { at } => {
                camera.add_shake(SMASH_SHAKE);
                spawn_burst(&mut commands, &mut rng, at, Burst::DUST);
            }
        }
    }
}
