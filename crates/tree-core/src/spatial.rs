//! Spatial generators for the two particle configurations.
//!
//! `tree_point` places a point on the cone spiral that forms the assembled
//! tree; `random_point_in_sphere` samples the scattered cloud. Both consume
//! fresh randomness on every call, so callers generate positions once and
//! cache them.

use crate::constants::{SPIRAL_STEP, TREE_HEIGHT, TREE_JITTER, TREE_RADIUS_BASE};
use glam::Vec3;
use rand::Rng;
use std::f32::consts::TAU;

/// Height of the cone surface for a normalized height `t` (0 = base, 1 = apex).
#[inline]
pub fn tree_height_at(t: f32) -> f32 {
    -TREE_HEIGHT / 2.0 + t * TREE_HEIGHT
}

/// Cone radius at normalized height `t`; tapers linearly to zero at the apex.
#[inline]
pub fn tree_radius_at(t: f32) -> f32 {
    TREE_RADIUS_BASE * (1.0 - t)
}

/// Point on the spiral cone for normalized height `t`.
///
/// The angle is `t * total_count * SPIRAL_STEP`, so `total_count` controls
/// how many turns the spiral makes. x and z receive independent jitter in
/// `[-TREE_JITTER/2, TREE_JITTER/2)`; y is exact.
pub fn tree_point<R: Rng + ?Sized>(t: f32, total_count: usize, rng: &mut R) -> Vec3 {
    let y = tree_height_at(t);
    let radius = tree_radius_at(t);
    let angle = t * total_count as f32 * SPIRAL_STEP;

    let x = angle.cos() * radius;
    let z = angle.sin() * radius;

    Vec3::new(
        x + (rng.gen::<f32>() - 0.5) * TREE_JITTER,
        y,
        z + (rng.gen::<f32>() - 0.5) * TREE_JITTER,
    )
}

/// Uniform-volume sample inside a sphere of `radius` centered at the origin.
///
/// Spherical coordinates with a cube-root radius keep the density constant
/// through the volume instead of clumping at the center.
pub fn random_point_in_sphere<R: Rng + ?Sized>(radius: f32, rng: &mut R) -> Vec3 {
    let u: f32 = rng.gen();
    let v: f32 = rng.gen();
    let theta = TAU * u;
    let phi = (2.0 * v - 1.0).clamp(-1.0, 1.0).acos();
    let r = rng.gen::<f32>().cbrt() * radius;

    let sin_phi = phi.sin();
    Vec3::new(
        r * sin_phi * theta.cos(),
        r * sin_phi * theta.sin(),
        r * phi.cos(),
    )
}

/// Scale the horizontal (x/z) components of a tree point, leaving height intact.
#[inline]
pub fn scale_radial(p: Vec3, k: f32) -> Vec3 {
    Vec3::new(p.x * k, p.y, p.z * k)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn apex_collapses_to_the_axis() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..100 {
            let p = tree_point(1.0, 500, &mut rng);
            assert!(p.x.abs() <= TREE_JITTER / 2.0);
            assert!(p.z.abs() <= TREE_JITTER / 2.0);
            assert_eq!(p.y, TREE_HEIGHT / 2.0);
        }
    }

    #[test]
    fn repeated_calls_are_not_idempotent() {
        let mut rng = StdRng::seed_from_u64(11);
        let a = tree_point(0.3, 100, &mut rng);
        let b = tree_point(0.3, 100, &mut rng);
        assert_eq!(a.y, b.y);
        assert_ne!((a.x, a.z), (b.x, b.z));
    }

    #[test]
    fn radial_scale_keeps_height() {
        let p = scale_radial(Vec3::new(2.0, -3.0, 4.0), 1.25);
        assert_eq!(p, Vec3::new(2.5, -3.0, 5.0));
    }
}
