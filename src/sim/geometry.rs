//! Axis-aligned rectangle math
//!
//! Every collision in the game is a box-vs-box test in playfield space
//! (origin bottom-left, y grows upward).

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn from_min_max(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Box centred on `center` extending `half_extents` on each side
    pub fn from_center(center: Vec2, half_extents: Vec2) -> Self {
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.min.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.max.x
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.min.y
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.max.y
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    pub fn half_extents(&self) -> Vec2 {
        (self.max - self.min) * 0.5
    }

    /// True iff the boxes share non-zero area. Touching edges do not count.
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }

    /// Whether `other` lies fully inside this box (edges inclusive)
    pub fn contains(&self, other: &Aabb) -> bool {
        other.min.x >= self.min.x
            && other.max.x <= self.max.x
            && other.min.y >= self.min.y
            && other.max.y <= self.max.y
    }
}

/// Move a box centre the least distance that puts the box inside `bounds`.
///
/// Axes are clamped independently. When the box is larger than `bounds` on an
/// axis the low edge wins, mirroring the left/bottom-first checks of the
/// player clamp.
pub fn clamp_to_bounds(center: Vec2, half_extents: Vec2, bounds: &Aabb) -> Vec2 {
    let mut c = center;

    if c.x - half_extents.x < bounds.min.x {
        c.x = bounds.min.x + half_extents.x;
    } else if c.x + half_extents.x > bounds.max.x {
        c.x = bounds.max.x - half_extents.x;
    }

    if c.y + half_extents.y > bounds.max.y {
        c.y = bounds.max.y - half_extents.y;
    } else if c.y - half_extents.y < bounds.min.y {
        c.y = bounds.min.y + half_extents.y;
    }

    c
}
