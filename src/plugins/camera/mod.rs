//! Camera plugin: side-scrolling follow + screen shake magnitude.
//!
//! The simulation only owns the numbers. A renderer reads `CameraRig::x` as the
//! scroll offset and `CameraRig::shake` as the amplitude of whatever shake
//! offset it wants to draw.
//!
//! ```text
//! x     <- lerp(x, player.x - lead, smoothing), clamped to [0, level - viewport]
//! shake <- shake * decay, snapped to 0 once negligible
//! ```

use bevy::prelude::*;

use crate::common::math::{clamp, lerp};
use crate::common::tunables::Tunables;
use crate::plugins::core::SimSet;
use crate::plugins::physics::Actor;
use crate::plugins::player::Player;

/// Shake below this is treated as settled.
const SHAKE_EPSILON: f32 = 0.1;

#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct CameraRig {
    pub x: f32,
    pub shake: f32,
}

impl CameraRig {
    /// Raise the shake to at least `magnitude`. Shakes do not stack.
    pub fn add_shake(&mut self, magnitude: f32) {
        self.shake = self.shake.max(magnitude);
    }

    /// Ease toward the player and settle the shake.
    pub fn follow(&mut self, player_x: f32, tunables: &Tunables) {
        let target = player_x - tunables.camera_lead;
        self.x = lerp(self.x, target, tunables.camera_smoothing);
        self.x = clamp(self.x, 0.0, tunables.level_length - tunables.screen_width);

        self.shake *= tunables.shake_decay;
        if self.shake < SHAKE_EPSILON {
            self.shake = 0.0;
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

pub fn plugin(app: &mut App) {
    app.init_resource::<CameraRig>()
        .add_systems(FixedUpdate, follow_player.in_set(SimSet::Camera));
}

fn follow_player(
    tunables: Res<Tunables>,
    mut rig: ResMut<CameraRig>,
    q_player: Query<&Actor, With<Player>>,
) {
    let Ok(player) = q_player.single() else {
        return;
    };
    rig.follow(player.pos.x, &tunables);
}
