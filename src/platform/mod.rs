//! Headless platform layer
//!
//! Stand-ins for the XR runtime when there is no headset:
//! - `LogHost`: every collaborator, implemented by logging and counting
//! - `ScriptedPilot`: synthesizes controller input that aims, shoots and walks

use glam::{Mat4, Quat, Vec3};
use serde::Serialize;

use crate::audio::{AudioError, AudioSink, EmitterId, SoundCue};
use crate::render::{RenderFrame, RenderSink};
use crate::sim::input::{ControllerState, FrameInput, Hand};
use crate::sim::state::GameState;
use crate::sim::{Haptics, ScoreDisplay};

/// Collaborator that logs instead of playing, buzzing or drawing
#[derive(Debug, Clone, Default, Serialize)]
pub struct LogHost {
    /// Flipped by the host once the hit clip has "loaded"
    pub clip_loaded: bool,
    pub cues_played: u32,
    pub cues_skipped: u32,
    pub cues_released: u32,
    pub pulses: u32,
    pub frames_rendered: u64,
    pub displayed_score: u64,
}

impl AudioSink for LogHost {
    fn play_at(
        &mut self,
        emitter: EmitterId,
        position: Vec3,
        cue: &SoundCue,
    ) -> Result<(), AudioError> {
        if !self.clip_loaded {
            self.cues_skipped += 1;
            return Err(AudioError::ClipNotLoaded);
        }
        self.cues_played += 1;
        log::debug!(
            "cue {:?} '{}' at {:.2?} (vol {:.2})",
            emitter,
            cue.clip,
            position,
            cue.volume
        );
        Ok(())
    }

    fn release(&mut self, emitter: EmitterId) {
        self.cues_released += 1;
        log::trace!("cue {:?} released", emitter);
    }
}

impl Haptics for LogHost {
    fn pulse(&mut self, hand: Hand, amplitude: f32, duration_ms: f32) {
        self.pulses += 1;
        log::trace!("{:?} pulse {} for {} ms", hand, amplitude, duration_ms);
    }
}

impl ScoreDisplay for LogHost {
    fn show_score(&mut self, score: u64) {
        self.displayed_score = score;
        log::info!("Score: {}", score);
    }
}

impl RenderSink for LogHost {
    fn render(&mut self, _frame: &RenderFrame) {
        self.frames_rendered += 1;
    }
}

/// Eye height of the synthesized head above the rig
const EYE_HEIGHT: f32 = 1.6;
/// Controller offset from the head, right hand (mirrored for left)
const HAND_OFFSET: Vec3 = Vec3::new(0.25, -0.4, -0.3);

/// Synthesizes a plausible play session, frame by frame
#[derive(Debug, Clone)]
pub struct ScriptedPilot {
    /// Frames per trigger press/release half-cycle
    pub trigger_period: u64,
    /// Every `miss_every`-th shot is deliberately aimed over the orb
    pub miss_every: u64,
}

impl Default for ScriptedPilot {
    fn default() -> Self {
        Self {
            trigger_period: 18,
            miss_every: 3,
        }
    }
}

impl ScriptedPilot {
    /// Build the input for frame `frame` at host time `now`
    pub fn next_input(&self, state: &GameState, frame: u64, now: f64) -> FrameInput {
        let t = now as f32;
        let eye = state.player.position + Vec3::Y * EYE_HEIGHT;
        let head_rotation = Quat::from_rotation_y(t * 0.2);
        let head = Mat4::from_rotation_translation(head_rotation, eye);

        // Right hand: aim at the nearest orb, pull on a square wave
        let right_origin = eye + head_rotation * HAND_OFFSET;
        let cycle = frame / self.trigger_period.max(1);
        let shot = cycle / 2;
        let mut aim = nearest_target(state, right_origin).unwrap_or(right_origin + Vec3::NEG_Z);
        if self.miss_every > 0 && shot % self.miss_every == self.miss_every - 1 {
            aim += Vec3::Y * 2.0;
        }
        let right = ControllerState {
            trigger_pressed: cycle % 2 == 0,
            haptics: true,
            ..ControllerState::new(Hand::Right, aim_transform(right_origin, aim))
        };

        // Left hand: wander forward with a slow weave, no haptics
        let left_origin = eye + head_rotation * (HAND_OFFSET * Vec3::new(-1.0, 1.0, 1.0));
        let left = ControllerState {
            axes: vec![0.0, 0.0, (t * 0.3).sin() * 0.6, -0.8],
            ..ControllerState::new(
                Hand::Left,
                Mat4::from_rotation_translation(head_rotation, left_origin),
            )
        };

        FrameInput {
            now_secs: now,
            presenting: true,
            head,
            controllers: vec![left, right],
        }
    }
}

fn nearest_target(state: &GameState, from: Vec3) -> Option<Vec3> {
    state
        .pool
        .query_all()
        .iter()
        .map(|t| t.position)
        .min_by(|a, b| a.distance_squared(from).total_cmp(&b.distance_squared(from)))
}

/// Controller pose at `origin` whose -Z axis points at `target`
fn aim_transform(origin: Vec3, target: Vec3) -> Mat4 {
    let dir = (target - origin).normalize_or_zero();
    let rotation = if dir == Vec3::ZERO {
        Quat::IDENTITY
    } else {
        Quat::from_rotation_arc(Vec3::NEG_Z, dir)
    };
    Mat4::from_rotation_translation(rotation, origin)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::tick::frame;

    #[test]
    fn test_aim_transform_points_at_target() {
        let m = aim_transform(Vec3::ZERO, Vec3::new(3.0, 4.0, 0.0));
        let forward = m.transform_vector3(Vec3::NEG_Z);
        assert!((forward - Vec3::new(0.6, 0.8, 0.0)).length() < 1e-5);
    }

    #[test]
    fn test_pilot_session_scores_and_stays_inside() {
        let mut state = GameState::new(Settings::default()).unwrap();
        let mut host = LogHost {
            clip_loaded: true,
            ..Default::default()
        };
        let pilot = ScriptedPilot::default();

        for i in 0..720u64 {
            let now = i as f64 / 72.0;
            state.run_timers(now, &mut host);
            let input = pilot.next_input(&state, i, now);
            frame(&mut state, &input, &mut host);
            assert!(state.bounds.contains(state.player.position));
        }

        assert!(state.score > 0);
        assert_eq!(host.displayed_score, state.score);
        assert_eq!(host.pulses as u64, state.score);
        assert_eq!(host.frames_rendered, 720);
        assert!(host.cues_released > 0);
    }

    #[test]
    fn test_unloaded_clip_still_scores() {
        let mut state = GameState::new(Settings::default()).unwrap();
        let mut host = LogHost::default();
        let pilot = ScriptedPilot::default();

        for i in 0..200u64 {
            let input = pilot.next_input(&state, i, i as f64 / 72.0);
            frame(&mut state, &input, &mut host);
        }
        assert!(state.score > 0);
        assert_eq!(host.cues_played, 0);
        assert_eq!(host.cues_skipped as u64, state.score);
        assert!(state.emitters.is_empty());
    }
}
