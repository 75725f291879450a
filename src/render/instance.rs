//! GPU-ready per-orb instance data

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

use crate::sim::state::Target;

/// One orb as the renderer draws it
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct TargetInstance {
    pub position: [f32; 3],
    /// Rotation around the vertical axis (radians)
    pub spin: f32,
    pub color: [f32; 4],
    pub radius: f32,
    pub _pad: [f32; 3],
}

impl TargetInstance {
    pub fn from_target(target: &Target, radius: f32) -> Self {
        Self {
            position: target.position.to_array(),
            spin: target.spin,
            color: rgb_hex(target.color),
            radius,
            _pad: [0.0; 3],
        }
    }
}

/// The visible aiming line attached to a controller
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Laser {
    pub origin: Vec3,
    pub direction: Vec3,
    pub length: f32,
    pub color: [f32; 4],
}

/// 0xRRGGBB to opaque RGBA floats
pub fn rgb_hex(hex: u32) -> [f32; 4] {
    let channel = |shift: u32| ((hex >> shift) & 0xFF) as f32 / 255.0;
    [channel(16), channel(8), channel(0), 1.0]
}

/// Colors for elements the core hands to the renderer
pub mod colors {
    pub const LASER: [f32; 4] = [1.0, 0.0, 0.0, 0.5];
}
