//! Controller raycasts against the orb pool
//!
//! A shot is a ray from the controller's position along its -Z axis. Orbs are
//! spheres of the pool radius; the nearest one in front of the controller wins.

use glam::{Mat4, Vec3};

use super::state::Target;

/// A half-line with a unit (or zero, if degenerate) direction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    /// Aim ray of a controller pose: origin at its translation, pointing
    /// along its rotated forward (-Z) axis. Scale in the pose is ignored.
    pub fn from_transform(transform: &Mat4) -> Self {
        Self::new(
            transform.w_axis.truncate(),
            transform.transform_vector3(Vec3::NEG_Z),
        )
    }

    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// The orb a shot landed on
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    /// Pool index of the orb
    pub index: usize,
    /// Distance along the ray to the entry point
    pub distance: f32,
    pub point: Vec3,
}

/// Nearest positive distance at which `ray` meets the sphere, if any.
///
/// A ray starting inside the sphere reports its exit point.
pub fn ray_sphere(ray: &Ray, center: Vec3, radius: f32) -> Option<f32> {
    if ray.direction == Vec3::ZERO {
        return None;
    }

    let oc = ray.origin - center;
    let b = oc.dot(ray.direction);
    let c = oc.length_squared() - radius * radius;
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }

    let sqrt_disc = disc.sqrt();
    let near = -b - sqrt_disc;
    if near > 0.0 {
        return Some(near);
    }
    let far = -b + sqrt_disc;
    (far > 0.0).then_some(far)
}

/// Resolve a shot to at most one orb: the smallest positive hit distance.
///
/// `None` is the ordinary outcome of a miss.
pub fn resolve_hit(ray: &Ray, targets: &[Target], radius: f32) -> Option<Hit> {
    targets
        .iter()
        .enumerate()
        .filter(|(_, t)| t.active)
        .filter_map(|(index, t)| {
            ray_sphere(ray, t.position, radius).map(|distance| Hit {
                index,
                distance,
                point: ray.at(distance),
            })
        })
        .min_by(|a, b| a.distance.total_cmp(&b.distance))
}
