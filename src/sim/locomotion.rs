//! Thumbstick locomotion
//!
//! Smooth, head-relative walking on the ground plane. Every controller with a
//! stick contributes; contributions add up, then the player is pushed back
//! inside the arena wall.

use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

use super::arena::ArenaBounds;
use super::input::{AxisMapping, ControllerState};
use super::state::Player;
use crate::settings::Settings;

/// Locomotion mode for one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LocomotionMode {
    /// No controller reports a readable stick: nothing moves
    Idle,
    /// At least one stick is readable (it may still sit in the deadzone)
    Steering,
}

/// Stick locomotion parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Locomotion {
    /// Meters per second at full deflection
    pub speed: f32,
    pub deadzone: f32,
    pub mapping: AxisMapping,
    pub bounds: ArenaBounds,
}

impl Locomotion {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            speed: settings.walk_speed,
            deadzone: settings.deadzone,
            mapping: settings.axis_mapping,
            bounds: ArenaBounds::new(settings.max_player_distance()),
        }
    }

    /// Move `player` for one frame of stick input and re-contain it
    pub fn step(
        &self,
        player: &mut Player,
        head: &Mat4,
        controllers: &[ControllerState],
        dt: f32,
    ) -> LocomotionMode {
        let forward = horizontal_forward(head);
        let right = forward.cross(Vec3::Y);
        player.facing = forward;

        let mut mode = LocomotionMode::Idle;
        let mut displacement = Vec3::ZERO;
        for controller in controllers {
            let Some(stick) = self.mapping.steering(&controller.axes) else {
                continue;
            };
            mode = LocomotionMode::Steering;
            if stick.x.abs() < self.deadzone && stick.y.abs() < self.deadzone {
                continue;
            }

            // Stick forward reports negative y
            let step = self.speed * dt;
            displacement += forward * (-stick.y * step) + right * (stick.x * step);
            log::trace!("{:?} stick {:?} -> {:?}", controller.hand, stick, displacement);
        }

        player.position += displacement;
        player.position.y = 0.0;
        player.position = self.bounds.clamp(player.position);
        mode
    }
}

/// Head forward (-Z) flattened onto the ground plane.
///
/// Zero when looking straight up or down.
pub fn horizontal_forward(head: &Mat4) -> Vec3 {
    let mut forward = head.transform_vector3(Vec3::NEG_Z);
    forward.y = 0.0;
    if forward.length_squared() < 1e-8 {
        return Vec3::ZERO;
    }
    forward.normalize()
}
