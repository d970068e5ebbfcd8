//! Axis-aligned bounding boxes for agent hitboxes
//!
//! Boxes are derived from an agent's world position and a fixed half extent
//! every tick; nothing caches them across ticks.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned box. Invariant: `min_x <= max_x` and `min_y <= max_y`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min_x: f32,
    pub max_x: f32,
    pub min_y: f32,
    pub max_y: f32,
}

impl Aabb {
    /// Box centred on `center` extending `half_extent` along each axis.
    /// Negative extents are taken by magnitude so the invariant holds.
    pub fn from_center(center: Vec2, half_extent: Vec2) -> Self {
        let half = half_extent.abs();
        Self {
            min_x: center.x - half.x,
            max_x: center.x + half.x,
            min_y: center.y - half.y,
            max_y: center.y + half.y,
        }
    }

    /// True unless the boxes are separated on some axis. Shared edges count
    /// as overlapping.
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        !(self.max_x < other.min_x
            || self.min_x > other.max_x
            || self.max_y < other.min_y
            || self.min_y > other.max_y)
    }
}
