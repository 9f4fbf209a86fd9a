//! Normalized input contract.
//!
//! The simulation never reads devices. Whatever captures keyboard, touch or
//! joystick input writes a `ControlInput` before the fixed tick runs; the
//! player controller samples it once per tick.

use bevy::prelude::*;

/// Button names recognized by the input contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    Jump,
    Attack,
    Kick,
    Special,
    Block,
    Dash,
}

impl Button {
    pub const ALL: [Button; 6] = [
        Button::Jump,
        Button::Attack,
        Button::Kick,
        Button::Special,
        Button::Block,
        Button::Dash,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "jump" => Some(Self::Jump),
            "attack" => Some(Self::Attack),
            "kick" => Some(Self::Kick),
            "special" => Some(Self::Special),
            "block" => Some(Self::Block),
            "dash" => Some(Self::Dash),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Buttons {
    pub jump: bool,
    pub attack: bool,
    pub kick: bool,
    pub special: bool,
    pub block: bool,
    pub dash: bool,
}

impl Buttons {
    #[inline]
    pub fn get(&self, button: Button) -> bool {
        match button {
            Button::Jump => self.jump,
            Button::Attack => self.attack,
            Button::Kick => self.kick,
            Button::Special => self.special,
            Button::Block => self.block,
            Button::Dash => self.dash,
        }
    }

    #[inline]
    pub fn set(&mut self, button: Button, held: bool) {
        let slot = match button {
            Button::Jump => &mut self.jump,
            Button::Attack => &mut self.attack,
            Button::Kick => &mut self.kick,
            Button::Special => &mut self.special,
            Button::Block => &mut self.block,
            Button::Dash => &mut self.dash,
        };
        *slot = held;
    }
}

/// Input sampled by the simulation each tick.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct ControlInput {
    axis: f32,
    pub buttons: Buttons,
}

impl ControlInput {
    pub fn new(axis: f32, buttons: Buttons) -> Self {
        let mut input = Self { axis: 0.0, buttons };
        input.set_axis(axis);
        input
    }

    /// Build input from button names. Unknown names are skipped.
    pub fn from_named<'a>(axis: f32, names: impl IntoIterator<Item = &'a str>) -> Self {
        let mut input = Self::new(axis, Buttons::default());
        for name in names {
            input.press_named(name);
        }
        input
    }

    /// Returns whether `name` was recognized.
    pub fn press_named(&mut self, name: &str) -> bool {
        match Button::from_name(name) {
            Some(button) => {
                self.buttons.set(button, true);
                true
            }
            None => {
                debug!("ignoring unknown button {name:?}");
                false
            }
        }
    }

    #[inline]
    pub fn axis(&self) -> f32 {
        self.axis
    }

    /// Store a directional axis, clamped to [-1, 1]. NaN reads as centred.
    pub fn set_axis(&mut self, axis: f32) {
        self.axis = if axis.is_nan() { 0.0 } else { axis.clamp(-1.0, 1.0) };
    }

    #[inline]
    pub fn held(&self, button: Button) -> bool {
        self.buttons.get(button)
    }
}

pub fn plugin(app: &mut App) {
    app.init_resource::<ControlInput>();
}
