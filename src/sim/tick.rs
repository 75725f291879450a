//! Frame driver
//!
//! One call per display frame, from the presentation loop. Nothing in here
//! blocks or does I/O: shots, respawns, idle animation and locomotion are all
//! synchronous and at most linear in the orb count.

use super::feedback::{self, Haptics, HitReport, ScoreDisplay};
use super::input::FrameInput;
use super::locomotion::LocomotionMode;
use super::state::GameState;
use crate::audio::AudioSink;
use crate::render::RenderSink;

/// Every collaborator the frame driver talks to
pub trait Host: AudioSink + Haptics + ScoreDisplay + RenderSink {}

impl<T: AudioSink + Haptics + ScoreDisplay + RenderSink + ?Sized> Host for T {}

/// Frame timing from the host clock
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameClock {
    start: Option<f64>,
    last: Option<f64>,
}

impl FrameClock {
    /// Advance to `now` and return `(dt, elapsed)` in seconds.
    ///
    /// The first frame has `dt == 0`. After that `dt` is the full gap since the
    /// previous frame, never negative even if the host clock steps backwards.
    pub fn advance(&mut self, now: f64) -> (f32, f32) {
        let start = *self.start.get_or_insert(now);
        let dt = self.last.map_or(0.0, |last| (now - last).max(0.0) as f32);
        self.last = Some(now);
        (dt, (now - start).max(0.0) as f32)
    }

    /// Seconds since the first frame
    pub fn elapsed(&self) -> f32 {
        match (self.start, self.last) {
            (Some(start), Some(last)) => (last - start).max(0.0) as f32,
            _ => 0.0,
        }
    }
}

/// What happened during one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    pub dt: f32,
    pub elapsed: f32,
    /// Hits by hand index (at most one shot per hand per frame)
    pub hits: [Option<HitReport>; 2],
    /// `None` when not presenting (locomotion not run)
    pub locomotion: Option<LocomotionMode>,
}

/// Advance the game by one display frame
///
/// 1. clock: `dt` / elapsed
/// 2. trigger edges: one shot per fresh pull (presenting only)
/// 3. idle orb animation
/// 4. locomotion (presenting only)
/// 5. render hand-off
pub fn frame<H: Host + ?Sized>(
    state: &mut GameState,
    input: &FrameInput,
    host: &mut H,
) -> FrameReport {
    let (dt, elapsed) = state.clock.advance(input.now_secs);
    state.frames += 1;

    let mut hits = [None, None];
    if input.presenting {
        for controller in &input.controllers {
            if state.triggers.rising(controller.hand, controller.trigger_pressed) {
                hits[controller.hand.index()] =
                    feedback::fire(state, controller, input.now_secs, &mut *host);
            }
        }
    } else {
        state.triggers.reset();
    }

    let settings = &state.settings;
    state.pool.animate(
        elapsed,
        settings.bob_amplitude,
        settings.bob_frequency,
        settings.spin_per_frame,
    );

    let locomotion = input.presenting.then(|| {
        state
            .locomotion
            .step(&mut state.player, &input.head, &input.controllers, dt)
    });

    let mut render_frame = std::mem::take(&mut state.render_frame);
    render_frame.fill(state, &input.controllers);
    host.render(&render_frame);
    state.render_frame = render_frame;

    FrameReport {
        dt,
        elapsed,
        hits,
        locomotion,
    }
}
