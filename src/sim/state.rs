//! Game state and core simulation types
//!
//! `GameState` is the single owned context the frame driver works on: no
//! globals, so a test can build one, poke it and inspect it.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::arena::ArenaBounds;
use super::input::TriggerEdges;
use super::locomotion::Locomotion;
use super::pool::{SpawnZone, TargetPool};
use super::tick::FrameClock;
use crate::audio::{AudioSink, EmitterQueue, SoundCue};
use crate::render::RenderFrame;
use crate::settings::{Settings, SettingsError};

/// A floating orb. Lives for the whole game; hits move it, never remove it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Target {
    /// Stable pool index
    pub id: u32,
    /// Current position (anchor plus idle bob)
    pub position: Vec3,
    /// Where the orb was last spawned
    pub anchor: Vec3,
    /// Idle spin around the vertical axis (radians)
    pub spin: f32,
    /// Cosmetic 24-bit RGB colour, re-rolled on every respawn
    pub color: u32,
    pub active: bool,
}

/// The player rig. Height stays on the ground; only x/z move.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub position: Vec3,
    /// Horizontal look direction from the last head pose
    pub facing: Vec3,
}

impl Player {
    pub fn new(position: Vec3) -> Self {
        Self {
            position: Vec3::new(position.x, 0.0, position.z),
            facing: Vec3::NEG_Z,
        }
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Configuration the game was built with
    pub settings: Settings,
    /// Player containment disc (`world_radius - player_radius`)
    pub bounds: ArenaBounds,
    pub pool: TargetPool,
    pub player: Player,
    pub locomotion: Locomotion,
    /// Confirmed hits
    pub score: u64,
    /// Playing hit cues, expired by the host timer
    pub emitters: EmitterQueue,
    pub hit_cue: SoundCue,
    pub triggers: TriggerEdges,
    pub clock: FrameClock,
    /// Frames driven so far
    pub frames: u64,
    /// Reused every frame for the renderer
    pub(crate) render_frame: RenderFrame,
}

impl GameState {
    /// Validate `settings`, then build a game and spawn the orb pool
    pub fn new(settings: Settings) -> Result<Self, SettingsError> {
        settings.validate()?;

        let bounds = ArenaBounds::new(settings.max_player_distance());
        let mut pool = TargetPool::new(
            SpawnZone::from_settings(&settings),
            settings.target_radius,
            settings.seed,
        );
        pool.spawn_initial(settings.target_count);

        log::info!(
            "Arena radius {}, {} orbs, player at {:?}",
            settings.world_radius,
            pool.len(),
            settings.player_start()
        );

        Ok(Self {
            bounds,
            pool,
            player: Player::new(bounds.clamp(settings.player_start())),
            locomotion: Locomotion::from_settings(&settings),
            score: 0,
            emitters: EmitterQueue::new(settings.emitter_lifetime_secs),
            hit_cue: settings.audio.hit_cue(),
            triggers: TriggerEdges::default(),
            clock: FrameClock::default(),
            frames: 0,
            render_frame: RenderFrame::with_capacity(settings.target_count),
            settings,
        })
    }

    /// Host timer callback: drop hit cues whose time is up.
    ///
    /// Independent of [`super::tick::frame`]; touches no gameplay state.
    pub fn run_timers(&mut self, now_secs: f64, audio: &mut (impl AudioSink + ?Sized)) -> usize {
        self.emitters.expire_due(now_secs, audio)
    }

    /// Serializable summary for logs and tooling
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            frames: self.frames,
            elapsed_secs: self.clock.elapsed(),
            score: self.score,
            player: self.player,
            targets: self.pool.query_all().to_vec(),
            live_emitters: self.emitters.len(),
        }
    }
}

/// Point-in-time view of a game
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub frames: u64,
    pub elapsed_secs: f32,
    pub score: u64,
    pub player: Player,
    pub targets: Vec<Target>,
    pub live_emitters: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SPHERE_COUNT;

    #[test]
    fn test_new_game() {
        let state = GameState::new(Settings::default()).unwrap();
        assert_eq!(state.pool.len(), SPHERE_COUNT);
        assert_eq!(state.score, 0);
        assert_eq!(state.player.position, Vec3::new(0.0, 0.0, 3.0));
        assert!(state.emitters.is_empty());
    }

    #[test]
    fn test_player_start_is_contained() {
        let settings = Settings {
            player_start: [500.0, 2.0, 0.0],
            ..Default::default()
        };
        let state = GameState::new(settings).unwrap();
        assert!(state.bounds.contains(state.player.position));
        assert_eq!(state.player.position.y, 0.0);
    }

    #[test]
    fn test_rejects_invalid_settings() {
        // Wall closer than the inner spawn radius: no room to place orbs
        let settings = Settings {
            world_radius: 5.0,
            ..Default::default()
        };
        assert!(matches!(GameState::new(settings), Err(SettingsError::Invalid(_))));

        let settings = Settings {
            spawn_height: f32::NAN,
            ..Default::default()
        };
        assert!(GameState::new(settings).is_err());
    }

    #[test]
    fn test_snapshot_serializes() {
        let state = GameState::new(Settings::default()).unwrap();
        let json = serde_json::to_string(&state.snapshot()).unwrap();
        let back: Snapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back.targets.len(), SPHERE_COUNT);
        assert_eq!(back.score, 0);
    }
}
