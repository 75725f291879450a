//! Frame-driven simulation module
//!
//! All gameplay logic lives here:
//! - One owned `GameState`, no globals
//! - Seeded RNG only
//! - Stable iteration order (pool index)
//! - No rendering, audio or platform dependencies beyond the collaborator traits

pub mod aim;
pub mod arena;
pub mod feedback;
pub mod input;
pub mod locomotion;
pub mod pool;
pub mod state;
pub mod tick;

pub use aim::{Hit, Ray, ray_sphere, resolve_hit};
pub use arena::ArenaBounds;
pub use feedback::{Haptics, HitReport, ScoreDisplay, dispatch_hit, fire};
pub use input::{AxisMapping, ControllerState, FrameInput, Hand, TriggerEdges};
pub use locomotion::{Locomotion, LocomotionMode, horizontal_forward};
pub use pool::{SpawnZone, TargetPool};
pub use state::{GameState, Player, Snapshot, Target};
pub use tick::{FrameClock, FrameReport, Host, frame};
