//! Orb Hunt - an immersive target range
//!
//! Core modules:
//! - `sim`: Per-frame simulation (target pool, raycast hits, locomotion, frame driver)
//! - `audio`: Positional hit cues and their self-expiring emitters
//! - `render`: Instance snapshot handed to the renderer each frame
//! - `platform`: Headless host collaborators and a scripted pilot
//! - `settings`: Startup configuration

pub mod audio;
pub mod platform;
pub mod render;
pub mod settings;
pub mod sim;

pub use settings::{Settings, SettingsError};

use glam::Vec3;

/// Game configuration constants
pub mod consts {
    /// Diameter of the playable ground disc
    pub const WORLD_SIZE: f32 = 160.0;
    /// Radius of the arena wall (a little inside the ground edge)
    pub const WORLD_RADIUS: f32 = WORLD_SIZE * 0.5 - 2.0;
    /// Number of floating orbs alive at all times
    pub const SPHERE_COUNT: usize = 15;
    /// Orb hit radius
    pub const SPHERE_RADIUS: f32 = 0.5;

    /// Player body radius used for wall containment
    pub const PLAYER_RADIUS: f32 = 0.5;
    /// Stick locomotion speed (m/s)
    pub const VR_WALK_SPEED: f32 = 4.0;
    /// Stick values below this on both axes are ignored
    pub const STICK_DEADZONE: f32 = 0.1;

    /// Orbs never spawn closer to the center than this
    pub const MIN_SPAWN_RADIUS: f32 = 4.0;
    /// Gap kept between the outermost spawn ring and the wall
    pub const SPAWN_MARGIN: f32 = 2.0;
    /// Lowest spawn height
    pub const SPAWN_HEIGHT: f32 = 1.5;
    /// Height band above `SPAWN_HEIGHT`
    pub const SPAWN_HEIGHT_RANGE: f32 = 3.0;

    /// Idle bob amplitude around the spawn anchor (m)
    pub const BOB_AMPLITUDE: f32 = 0.15;
    /// Idle bob angular frequency (rad/s)
    pub const BOB_FREQUENCY: f32 = 2.0;
    /// Idle spin per frame (radians)
    pub const SPIN_PER_FRAME: f32 = 0.01;

    /// Hit cue emitter lifetime (seconds)
    pub const EMITTER_LIFETIME: f64 = 2.0;
    /// Haptic pulse on hit
    pub const HAPTIC_AMPLITUDE: f32 = 1.0;
    pub const HAPTIC_DURATION_MS: f32 = 100.0;

    /// Visible length of the aiming laser
    pub const LASER_LENGTH: f32 = 100.0;
}

/// Convert polar (r, theta) on the ground plane to a point at height `y`.
///
/// Angle 0 points along +X, angle π/2 along +Z.
#[inline]
pub fn polar_to_xz(r: f32, theta: f32, y: f32) -> Vec3 {
    Vec3::new(r * theta.cos(), y, r * theta.sin())
}

/// Distance from the arena's vertical axis, ignoring height
#[inline]
pub fn horizontal_distance(pos: Vec3) -> f32 {
    pos.x.hypot(pos.z)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_polar_to_xz() {
        let p = polar_to_xz(10.0, 0.0, 2.0);
        assert!((p - Vec3::new(10.0, 2.0, 0.0)).length() < 1e-5);

        let p = polar_to_xz(10.0, FRAC_PI_2, 0.0);
        assert!(p.x.abs() < 1e-5);
        assert!((p.z - 10.0).abs() < 1e-5);
    }

    #[test]
    fn test_horizontal_distance_ignores_height() {
        assert!((horizontal_distance(Vec3::new(3.0, 100.0, 4.0)) - 5.0).abs() < 1e-5);
    }
}
