//! Fixed-size orb pool
//!
//! Orbs are recycled in place: a hit moves the orb to a fresh spot, the pool
//! never grows or shrinks after `spawn_initial`.

use std::f32::consts::TAU;

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::state::Target;
use crate::settings::Settings;
use crate::{horizontal_distance, polar_to_xz};

/// Annulus-by-height-band volume orbs spawn in
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnZone {
    pub min_radius: f32,
    pub max_radius: f32,
    pub height: f32,
    pub height_range: f32,
}

impl SpawnZone {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            min_radius: settings.min_spawn_radius,
            max_radius: settings.max_spawn_radius(),
            height: settings.spawn_height,
            height_range: settings.spawn_height_range,
        }
    }

    /// Uniform angle, uniform radius, uniform height. No overlap avoidance.
    pub fn sample(&self, rng: &mut impl Rng) -> Vec3 {
        let theta = rng.random_range(0.0..TAU);
        let r = rng.random_range(self.min_radius..=self.max_radius);
        let y = self.height + rng.random::<f32>() * self.height_range;
        polar_to_xz(r, theta, y)
    }

    /// Check a point against the zone, with `slack` for float rounding
    pub fn contains(&self, pos: Vec3, slack: f32) -> bool {
        let r = horizontal_distance(pos);
        r >= self.min_radius - slack
            && r <= self.max_radius + slack
            && pos.y >= self.height - slack
            && pos.y <= self.height + self.height_range + slack
    }

    /// Keep a height inside the band
    #[inline]
    pub fn clamp_height(&self, y: f32) -> f32 {
        y.clamp(self.height, self.height + self.height_range)
    }
}

/// The live orbs plus the RNG that places them
#[derive(Debug, Clone)]
pub struct TargetPool {
    targets: Vec<Target>,
    zone: SpawnZone,
    /// Hit radius shared by every orb
    radius: f32,
    rng: Pcg32,
}

impl TargetPool {
    pub fn new(zone: SpawnZone, radius: f32, seed: u64) -> Self {
        Self {
            targets: Vec::new(),
            zone,
            radius,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Create `n` orbs with independent placements, replacing any existing ones
    pub fn spawn_initial(&mut self, n: usize) {
        self.targets.clear();
        self.targets.reserve_exact(n);
        for id in 0..n {
            let position = self.zone.sample(&mut self.rng);
            let color = self.random_color();
            self.targets.push(Target {
                id: id as u32,
                position,
                anchor: position,
                spin: 0.0,
                color,
                active: true,
            });
        }
    }

    /// Move orb `index` to a fresh placement and give it a new colour.
    ///
    /// Returns the position it had before, or `None` for an unknown index.
    pub fn respawn(&mut self, index: usize) -> Option<Vec3> {
        let position = self.zone.sample(&mut self.rng);
        let color = self.random_color();
        let target = self.targets.get_mut(index)?;
        let previous = target.position;
        target.position = position;
        target.anchor = position;
        target.color = color;
        Some(previous)
    }

    /// Current live set, in pool order
    pub fn query_all(&self) -> &[Target] {
        &self.targets
    }

    pub fn get(&self, index: usize) -> Option<&Target> {
        self.targets.get(index)
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn zone(&self) -> &SpawnZone {
        &self.zone
    }

    /// Cosmetic idle motion: bob around the anchor (phase offset by index)
    /// and spin a fixed step. Heights stay inside the spawn band.
    pub fn animate(&mut self, elapsed: f32, amplitude: f32, frequency: f32, spin_step: f32) {
        let zone = self.zone;
        for (i, target) in self.targets.iter_mut().enumerate() {
            let bob = (elapsed * frequency + i as f32).sin() * amplitude;
            target.position.y = zone.clamp_height(target.anchor.y + bob);
            target.spin = (target.spin + spin_step).rem_euclid(TAU);
        }
    }

    fn random_color(&mut self) -> u32 {
        self.rng.random_range(0..=0x00FF_FFFF)
    }
}
