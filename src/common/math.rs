//! Small pure helpers shared by the simulation.
//!
//! Boxes are top-left anchored in screen space (+y points down), so a body at
//! `pos` with `size` covers `pos..pos + size`.

use bevy::prelude::*;

/// Axis-aligned box from a top-left corner and a size.
#[inline]
pub fn aabb(pos: Vec2, size: Vec2) -> Rect {
    Rect::from_corners(pos, pos + size)
}

/// Strict AABB overlap test.
///
/// Two boxes overlap unless one lies entirely left, right, above or below the
/// other. Boxes that only share an edge do not overlap.
#[inline]
pub fn rects_overlap(a: &Rect, b: &Rect) -> bool {
    a.min.x < b.max.x && a.max.x > b.min.x && a.min.y < b.max.y && a.max.y > b.min.y
}

#[inline]
pub fn lerp(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t
}

/// Clamp that tolerates `hi < lo` by collapsing to `lo`.
///
/// `f32::clamp` panics on an inverted range, which a level shorter than the
/// viewport would otherwise produce.
#[inline]
pub fn clamp(v: f32, lo: f32, hi: f32) -> f32 {
    v.min(hi).max(lo)
}

#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}

/// Decrement a tick counter, saturating at zero.
#[inline]
pub fn tick_down(counter: &mut u32) {
    *counter = counter.saturating_sub(1);
}
