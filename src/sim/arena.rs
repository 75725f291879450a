//! Circular arena containment
//!
//! The arena is a disc on the ground plane centered on the origin. Height is
//! never constrained here.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::horizontal_distance;

/// A horizontal disc of radius `radius` around the vertical axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArenaBounds {
    pub radius: f32,
}

impl ArenaBounds {
    pub fn new(radius: f32) -> Self {
        Self { radius }
    }

    /// Check if a point lies inside the disc (boundary included)
    #[inline]
    pub fn contains(&self, pos: Vec3) -> bool {
        horizontal_distance(pos) <= self.radius
    }

    /// Project an outside point back onto the boundary circle along its own
    /// bearing. Inside points are returned untouched; height is kept.
    pub fn clamp(&self, pos: Vec3) -> Vec3 {
        let dist = horizontal_distance(pos);
        if dist <= self.radius {
            return pos;
        }
        let mut scale = self.radius / dist;
        let mut clamped = Vec3::new(pos.x * scale, pos.y, pos.z * scale);
        // Rounding can leave the projection a hair outside; the result must
        // pass `contains` so a second clamp is a no-op.
        while horizontal_distance(clamped) > self.radius {
            scale *= 1.0 - f32::EPSILON;
            clamped = Vec3::new(pos.x * scale, pos.y, pos.z * scale);
        }
        clamped
    }
}
