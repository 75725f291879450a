//! Per-frame controller input
//!
//! The host refreshes a [`FrameInput`] every frame from its XR runtime. Nothing
//! here is persisted between frames except the trigger levels in [`TriggerEdges`].

use glam::{Mat4, Vec2};
use serde::{Deserialize, Serialize};

/// Which tracked controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Hand {
    Left,
    Right,
}

impl Hand {
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Hand::Left => 0,
            Hand::Right => 1,
        }
    }
}

/// Snapshot of one tracked controller
#[derive(Debug, Clone, PartialEq)]
pub struct ControllerState {
    pub hand: Hand,
    /// Controller pose in world space (player rig already applied)
    pub world_transform: Mat4,
    /// Trigger level this frame (edges are derived by [`TriggerEdges`])
    pub trigger_pressed: bool,
    /// Gamepad-style axes; empty when the source has no gamepad
    pub axes: Vec<f32>,
    /// Whether the controller exposes a haptic actuator
    pub haptics: bool,
}

impl ControllerState {
    pub fn new(hand: Hand, world_transform: Mat4) -> Self {
        Self {
            hand,
            world_transform,
            trigger_pressed: false,
            axes: Vec::new(),
            haptics: false,
        }
    }
}

/// Everything the host reports for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct FrameInput {
    /// Host clock (seconds)
    pub now_secs: f64,
    /// An immersive session is presenting
    pub presenting: bool,
    /// Head (camera) pose in world space
    pub head: Mat4,
    pub controllers: Vec<ControllerState>,
}

impl Default for FrameInput {
    fn default() -> Self {
        Self {
            now_secs: 0.0,
            presenting: false,
            head: Mat4::IDENTITY,
            controllers: Vec::new(),
        }
    }
}

/// Where the thumbstick lives in the axes array
///
/// Controller profiles disagree: most XR runtimes put the stick on 2/3 and
/// leave 0/1 for a touchpad, some only report 0/1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisMapping {
    pub primary: (usize, usize),
    pub fallback: (usize, usize),
}

impl Default for AxisMapping {
    fn default() -> Self {
        Self {
            primary: (2, 3),
            fallback: (0, 1),
        }
    }
}

impl AxisMapping {
    /// Read the stick `(x, y)`. The primary pair wins when present and not at
    /// rest, otherwise the fallback pair. `None` when neither pair is present.
    pub fn steering(&self, axes: &[f32]) -> Option<Vec2> {
        let read = |(ix, iy): (usize, usize)| match (axes.get(ix), axes.get(iy)) {
            (Some(&x), Some(&y)) => Some(Vec2::new(x, y)),
            _ => None,
        };

        match read(self.primary) {
            Some(v) if v != Vec2::ZERO => Some(v),
            at_rest => read(self.fallback).or(at_rest),
        }
    }
}

/// Rising-edge detector for the fire trigger, one latch per hand
#[derive(Debug, Clone, Default)]
pub struct TriggerEdges {
    was_pressed: [bool; 2],
}

impl TriggerEdges {
    /// Record this frame's level; true only on the inactive -> active transition
    pub fn rising(&mut self, hand: Hand, pressed: bool) -> bool {
        let prev = std::mem::replace(&mut self.was_pressed[hand.index()], pressed);
        pressed && !prev
    }

    /// Forget all levels (session ended or controller lost)
    pub fn reset(&mut self) {
        self.was_pressed = [false; 2];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_steering_prefers_primary_pair() {
        let mapping = AxisMapping::default();
        let v = mapping.steering(&[0.9, 0.9, 0.3, -0.5]);
        assert_eq!(v, Some(Vec2::new(0.3, -0.5)));
    }

    #[test]
    fn test_steering_falls_back_when_primary_at_rest() {
        let mapping = AxisMapping::default();
        assert_eq!(mapping.steering(&[0.4, -1.0, 0.0, 0.0]), Some(Vec2::new(0.4, -1.0)));
    }

    #[test]
    fn test_steering_short_axes() {
        let mapping = AxisMapping::default();
        assert_eq!(mapping.steering(&[0.2, 0.7]), Some(Vec2::new(0.2, 0.7)));
        assert_eq!(mapping.steering(&[]), None);
        assert_eq!(mapping.steering(&[0.5]), None);
        assert_eq!(mapping.steering(&[0.5, 0.5, 0.3]), Some(Vec2::new(0.5, 0.5)));
    }

    #[test]
    fn test_custom_mapping() {
        let mapping = AxisMapping {
            primary: (0, 1),
            fallback: (2, 3),
        };
        assert_eq!(mapping.steering(&[0.5, 0.6, 0.1, 0.1]), Some(Vec2::new(0.5, 0.6)));
    }

    #[test]
    fn test_steering_primary_at_rest_without_fallback() {
        let mapping = AxisMapping {
            primary: (0, 1),
            fallback: (4, 5),
        };
        assert_eq!(mapping.steering(&[0.0, 0.0]), Some(Vec2::ZERO));
    }

    #[test]
    fn test_trigger_fires_once_per_pull() {
        let mut edges = TriggerEdges::default();
        assert!(edges.rising(Hand::Right, true));
        assert!(!edges.rising(Hand::Right, true));
        assert!(!edges.rising(Hand::Right, true));
        assert!(!edges.rising(Hand::Right, false));
        assert!(edges.rising(Hand::Right, true));
    }

    #[test]
    fn test_trigger_hands_are_independent() {
        let mut edges = TriggerEdges::default();
        assert!(edges.rising(Hand::Left, true));
        assert!(edges.rising(Hand::Right, true));
        assert!(!edges.rising(Hand::Left, true));
    }

    #[test]
    fn test_trigger_reset() {
        let mut edges = TriggerEdges::default();
        edges.rising(Hand::Left, true);
        edges.reset();
        assert!(edges.rising(Hand::Left, true));
    }
}
