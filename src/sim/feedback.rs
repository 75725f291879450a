//! Hit feedback
//!
//! A confirmed hit respawns the orb, bumps the score, plays a positional cue
//! and buzzes the controller. Only the respawn and score are authoritative;
//! sound and haptics are best effort.

use glam::Vec3;

use super::aim::{self, Hit, Ray};
use super::input::{ControllerState, Hand};
use super::state::GameState;
use crate::audio::{AudioSink, EmitterId};

/// Haptic collaborator. Only called for controllers that report an actuator.
pub trait Haptics {
    fn pulse(&mut self, hand: Hand, amplitude: f32, duration_ms: f32);
}

/// Score display collaborator (HUD text, overlay, ...)
pub trait ScoreDisplay {
    fn show_score(&mut self, score: u64);
}

/// What one confirmed hit did
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitReport {
    pub hand: Hand,
    /// Pool index of the orb that was hit
    pub target: usize,
    /// Orb position at the moment of the hit (where the cue plays)
    pub hit_position: Vec3,
    /// Where the orb respawned
    pub respawned_at: Vec3,
    /// Score after the hit
    pub score: u64,
    /// `None` when the cue could not play
    pub emitter: Option<EmitterId>,
    pub pulsed: bool,
}

/// Fire `controller`'s aim ray once and dispatch feedback on a hit.
///
/// Call on a trigger edge only. Returns `None` for a miss, which changes nothing.
pub fn fire<H>(
    state: &mut GameState,
    controller: &ControllerState,
    now_secs: f64,
    host: &mut H,
) -> Option<HitReport>
where
    H: AudioSink + Haptics + ScoreDisplay + ?Sized,
{
    let ray = Ray::from_transform(&controller.world_transform);
    let hit = aim::resolve_hit(&ray, state.pool.query_all(), state.pool.radius())?;
    Some(dispatch_hit(state, hit, controller, now_secs, host))
}

/// Apply a resolved hit: respawn, score, cue, haptics (in that order)
pub fn dispatch_hit<H>(
    state: &mut GameState,
    hit: Hit,
    controller: &ControllerState,
    now_secs: f64,
    host: &mut H,
) -> HitReport
where
    H: AudioSink + Haptics + ScoreDisplay + ?Sized,
{
    let hit_position = state.pool.respawn(hit.index).unwrap_or(hit.point);
    let respawned_at = state
        .pool
        .get(hit.index)
        .map_or(hit_position, |t| t.position);

    state.score += 1;
    host.show_score(state.score);

    let emitter = state
        .emitters
        .spawn(hit_position, now_secs, &state.hit_cue, &mut *host);

    let pulsed = controller.haptics;
    if pulsed {
        host.pulse(
            controller.hand,
            state.settings.haptic_amplitude,
            state.settings.haptic_duration_ms,
        );
    }

    log::debug!(
        "{:?} hit orb {} at {:.1} m (score {})",
        controller.hand,
        hit.index,
        hit.distance,
        state.score
    );

    HitReport {
        hand: controller.hand,
        target: hit.index,
        hit_position,
        respawned_at,
        score: state.score,
        emitter,
        pulsed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::{AudioError, SoundCue};
    use crate::settings::Settings;
    use glam::{Mat4, Quat};

    #[derive(Default)]
    struct Recorder {
        clip_loaded: bool,
        cues: Vec<Vec3>,
        pulses: Vec<(Hand, f32, f32)>,
        scores: Vec<u64>,
    }

    impl AudioSink for Recorder {
        fn play_at(
            &mut self,
            _: EmitterId,
            position: Vec3,
            _: &SoundCue,
        ) -> Result<(), AudioError> {
            if !self.clip_loaded {
                return Err(AudioError::ClipNotLoaded);
            }
            self.cues.push(position);
            Ok(())
        }

        fn release(&mut self, _: EmitterId) {}
    }

    impl Haptics for Recorder {
        fn pulse(&mut self, hand: Hand, amplitude: f32, duration_ms: f32) {
            self.pulses.push((hand, amplitude, duration_ms));
        }
    }

    impl ScoreDisplay for Recorder {
        fn show_score(&mut self, score: u64) {
            self.scores.push(score);
        }
    }

    /// Controller at the origin aimed at `point`
    fn aimed_at(point: Vec3, haptics: bool) -> ControllerState {
        let origin = Vec3::new(0.0, 1.5, 0.0);
        let rotation = Quat::from_rotation_arc(Vec3::NEG_Z, (point - origin).normalize());
        ControllerState {
            haptics,
            ..ControllerState::new(Hand::Right, Mat4::from_rotation_translation(rotation, origin))
        }
    }

    #[test]
    fn test_hit_scores_respawns_and_buzzes() {
        let mut state = GameState::new(Settings::default()).unwrap();
        let mut host = Recorder {
            clip_loaded: true,
            ..Default::default()
        };
        let before: Vec<_> = state.pool.query_all().to_vec();
        let aim_point = before[4].position;

        let report = fire(&mut state, &aimed_at(aim_point, true), 1.0, &mut host).unwrap();

        assert_eq!(state.score, 1);
        assert_eq!(host.scores, vec![1]);
        assert_eq!(report.hit_position, before[report.target].position);
        assert_eq!(host.cues, vec![report.hit_position]);
        assert!(report.emitter.is_some());
        assert_eq!(state.emitters.len(), 1);
        assert_eq!(host.pulses, vec![(Hand::Right, 1.0, 100.0)]);

        let after = state.pool.query_all();
        assert_eq!(after.len(), before.len());
        assert_ne!(after[report.target].position, before[report.target].position);
        assert_eq!(after[report.target].position, report.respawned_at);
        for (i, (a, b)) in after.iter().zip(&before).enumerate() {
            if i != report.target {
                assert_eq!(a, b);
            }
        }
    }

    #[test]
    fn test_miss_changes_nothing() {
        let mut state = GameState::new(Settings::default()).unwrap();
        let mut host = Recorder::default();
        let before: Vec<_> = state.pool.query_all().to_vec();

        // Straight up: every orb sits below 4.5 m
        let up = ControllerState::new(
            Hand::Left,
            Mat4::from_rotation_translation(
                Quat::from_rotation_arc(Vec3::NEG_Z, Vec3::Y),
                Vec3::new(0.0, 10.0, 0.0),
            ),
        );
        assert!(fire(&mut state, &up, 0.0, &mut host).is_none());
        assert_eq!(state.score, 0);
        assert_eq!(state.pool.query_all(), &before[..]);
        assert!(host.scores.is_empty());
        assert!(host.pulses.is_empty());
    }

    #[test]
    fn test_hit_without_audio_or_haptics_still_counts() {
        let mut state = GameState::new(Settings::default()).unwrap();
        let mut host = Recorder::default();
        let aim_point = state.pool.query_all()[0].position;

        let report = fire(&mut state, &aimed_at(aim_point, false), 0.0, &mut host).unwrap();
        assert_eq!(state.score, 1);
        assert!(report.emitter.is_none());
        assert!(!report.pulsed);
        assert!(state.emitters.is_empty());
        assert!(host.pulses.is_empty());
        assert_ne!(state.pool.query_all()[report.target].position, aim_point);
    }
}
