//! Render hand-off
//!
//! The core never draws. Each frame it fills a [`RenderFrame`] and passes it
//! to the host's [`RenderSink`]; scene geometry, lighting and presentation
//! stay on the host side.

pub mod instance;

pub use instance::{Laser, TargetInstance, colors, rgb_hex};

use glam::Vec3;

use crate::consts::LASER_LENGTH;
use crate::sim::aim::Ray;
use crate::sim::input::ControllerState;
use crate::sim::state::GameState;

/// Render collaborator implemented by the host
pub trait RenderSink {
    fn render(&mut self, frame: &RenderFrame);
}

/// Everything the renderer needs for one frame
#[derive(Debug, Clone, Default)]
pub struct RenderFrame {
    pub player: Vec3,
    pub facing: Vec3,
    pub score: u64,
    pub targets: Vec<TargetInstance>,
    /// One aiming line per tracked controller
    pub lasers: Vec<Laser>,
}

impl RenderFrame {
    pub fn with_capacity(targets: usize) -> Self {
        Self {
            targets: Vec::with_capacity(targets),
            lasers: Vec::with_capacity(2),
            ..Default::default()
        }
    }

    /// Refill from the current state, reusing the buffers
    pub fn fill(&mut self, state: &GameState, controllers: &[ControllerState]) {
        self.player = state.player.position;
        self.facing = state.player.facing;
        self.score = state.score;

        let radius = state.pool.radius();
        self.targets.clear();
        self.targets.extend(
            state
                .pool
                .query_all()
                .iter()
                .map(|t| TargetInstance::from_target(t, radius)),
        );

        self.lasers.clear();
        self.lasers.extend(controllers.iter().map(|c| {
            let ray = Ray::from_transform(&c.world_transform);
            Laser {
                origin: ray.origin,
                direction: ray.direction,
                length: LASER_LENGTH,
                color: colors::LASER,
            }
        }));
    }
}
