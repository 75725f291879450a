//! Positional hit cues
//!
//! The host owns the actual audio backend and implements [`AudioSink`]. The
//! simulation only decides *where* a cue plays and keeps one
//! [`TransientAudioEmitter`] per playing cue until its timer runs out.
//! Emitter expiry is driven by the host's timer callback, never by the frame tick.

use std::collections::VecDeque;

use glam::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a cue did not play. Never fatal: the hit still counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AudioError {
    /// The clip is still loading (or failed to load)
    #[error("hit clip not loaded yet")]
    ClipNotLoaded,
    /// No audio output (no listener, context suspended, ...)
    #[error("audio output unavailable")]
    Unavailable,
}

/// Audio preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// Hit clip asset path
    pub clip: String,
    /// Distance at which the positional cue starts attenuating
    pub ref_distance: f32,
    /// Gain of the hit clip itself
    pub clip_volume: f32,
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            clip: "assets/audio/chime.mp3".to_string(),
            ref_distance: 10.0,
            clip_volume: 1.5,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }
}

impl AudioSettings {
    /// Get effective volume
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.clip_volume * self.master_volume.clamp(0.0, 1.0) * self.sfx_volume.clamp(0.0, 1.0)
        }
    }

    /// The cue played on every hit
    pub fn hit_cue(&self) -> SoundCue {
        SoundCue {
            clip: self.clip.clone(),
            volume: self.effective_volume(),
            ref_distance: self.ref_distance,
        }
    }
}

/// A fixed clip with its playback parameters
#[derive(Debug, Clone, PartialEq)]
pub struct SoundCue {
    pub clip: String,
    pub volume: f32,
    pub ref_distance: f32,
}

/// Handle for one playing cue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EmitterId(pub u32);

/// Audio collaborator implemented by the host
pub trait AudioSink {
    /// Start playing `cue` at `position`. Loading is the sink's business;
    /// it reports [`AudioError::ClipNotLoaded`] until the clip is ready.
    fn play_at(&mut self, emitter: EmitterId, position: Vec3, cue: &SoundCue)
    -> Result<(), AudioError>;

    /// Drop the emitter's scene node; called once when its timer expires
    fn release(&mut self, emitter: EmitterId);
}

/// A short-lived sound source parked at a hit position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransientAudioEmitter {
    pub id: EmitterId,
    pub position: Vec3,
    /// Host clock time (seconds) at which the emitter removes itself
    pub expiry: f64,
}

/// Timer queue of live emitters, ordered by expiry
///
/// Every emitter gets the same lifetime and the host clock is monotonic, so
/// push-back order is expiry order.
#[derive(Debug, Clone)]
pub struct EmitterQueue {
    live: VecDeque<TransientAudioEmitter>,
    lifetime: f64,
    next_id: u32,
}

impl EmitterQueue {
    pub fn new(lifetime: f64) -> Self {
        Self {
            live: VecDeque::new(),
            lifetime,
            next_id: 1,
        }
    }

    /// Play `cue` at `position` and park an emitter there until `now + lifetime`.
    ///
    /// Returns `None` when nothing plays: muted, or the sink refused.
    pub fn spawn(
        &mut self,
        position: Vec3,
        now: f64,
        cue: &SoundCue,
        sink: &mut (impl AudioSink + ?Sized),
    ) -> Option<EmitterId> {
        if cue.volume <= 0.0 {
            return None;
        }

        let id = EmitterId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);

        if let Err(err) = sink.play_at(id, position, cue) {
            log::warn!("Hit cue skipped: {err}");
            return None;
        }

        self.live.push_back(TransientAudioEmitter {
            id,
            position,
            expiry: now + self.lifetime,
        });
        Some(id)
    }

    /// Release every emitter whose timer has run out. Returns how many went.
    pub fn expire_due(&mut self, now: f64, sink: &mut (impl AudioSink + ?Sized)) -> usize {
        let mut expired = 0;
        while let Some(front) = self.live.front() {
            if front.expiry > now {
                break;
            }
            let id = front.id;
            self.live.pop_front();
            sink.release(id);
            expired += 1;
        }
        expired
    }

    /// When the next emitter is due, for hosts that arm a real timer
    pub fn next_expiry(&self) -> Option<f64> {
        self.live.front().map(|e| e.expiry)
    }

    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }
}
