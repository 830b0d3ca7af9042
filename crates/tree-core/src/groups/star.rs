//! The star topping the tree: a single emissive particle that spins freely
//! while scattered and settles upright above the apex.

use super::ParticleGroup;
use crate::constants::*;
use crate::frame::FrameInput;
use crate::palette::{self, Rgb};
use crate::render::{GeometryKind, InstanceBatch, InstanceTransform, MaterialKind, SceneSink};
use crate::spatial::random_point_in_sphere;
use crate::transition::{lerp, Transition};
use glam::{Vec2, Vec3};
use rand::Rng;
use std::f32::consts::{FRAC_PI_2, TAU};

/// Continuous breathing scale.
#[inline]
pub fn star_breath(time: f32) -> f32 {
    1.0 + (time * STAR_BREATH_SPEED).sin() * STAR_BREATH_AMOUNT
}

/// Outline of a five-pointed star in the XY plane, alternating outer and inner
/// radii, starting on the negative y axis.
pub fn star_outline() -> Vec<Vec2> {
    const POINTS: usize = 5;
    (0..POINTS * 2)
        .map(|i| {
            let r = if i % 2 == 0 {
                STAR_OUTER_RADIUS
            } else {
                STAR_INNER_RADIUS
            };
            let a = (i as f32 / (POINTS * 2) as f32) * TAU - FRAC_PI_2;
            Vec2::new(a.cos() * r, a.sin() * r)
        })
        .collect()
}

pub struct StarTopper {
    scatter: Vec3,
    tree: Vec3,
    transition: Transition,
    rotation: Vec3,
    batch: InstanceBatch,
}

impl StarTopper {
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let scatter = random_point_in_sphere(SCATTER_RADIUS, rng);
        let batch = InstanceBatch::new(
            "star",
            GeometryKind::Star,
            MaterialKind::Emissive,
            vec![Rgb::from_hex(palette::GOLD_LIGHT)],
        );
        let mut star = Self {
            scatter,
            tree: star_tree_position(),
            transition: Transition::new(STAR_SMOOTHING),
            rotation: Vec3::ZERO,
            batch,
        };
        star.batch.transforms[0].position = scatter;
        star
    }

    pub fn transform(&self) -> &InstanceTransform {
        &self.batch.transforms[0]
    }

    pub fn tree_position(&self) -> Vec3 {
        self.tree
    }

    fn settle_rotation(&mut self, frame: &FrameInput) {
        if self.transition.progress() < 0.5 {
            self.rotation.x = frame.elapsed * STAR_FREE_SPIN;
            self.rotation.y = frame.elapsed * STAR_FREE_SPIN;
        } else {
            let k = (frame.delta * STAR_UPRIGHT_RATE).min(1.0);
            self.rotation.x = lerp(self.rotation.x, 0.0, k);
            self.rotation.z = lerp(self.rotation.z, 0.0, k);
            self.rotation.y = 0.0;
        }
    }
}

impl ParticleGroup for StarTopper {
    fn label(&self) -> &str {
        "star"
    }

    fn len(&self) -> usize {
        1
    }

    fn progress(&self) -> f32 {
        self.transition.progress()
    }

    fn update(&mut self, frame: &FrameInput) {
        let eased = self.transition.advance(frame.delta, frame.target());
        self.settle_rotation(frame);
        self.batch.transforms[0] = InstanceTransform {
            position: self.scatter.lerp(self.tree, eased),
            rotation: self.rotation,
            scale: Vec3::splat(star_breath(frame.elapsed)),
        };
    }

    fn emit(&self, sink: &mut dyn SceneSink) {
        sink.instances(&self.batch);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mode::Mode;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn outline_alternates_radii() {
        let outline = star_outline();
        assert_eq!(outline.len(), 10);
        assert!((outline[0].length() - STAR_OUTER_RADIUS).abs() < 1e-5);
        assert!((outline[1].length() - STAR_INNER_RADIUS).abs() < 1e-5);
        // starts at angle -pi/2
        assert!(outline[0].x.abs() < 1e-5);
    }

    #[test]
    fn breath_stays_within_ten_percent() {
        for i in 0..100 {
            let s = star_breath(i as f32 * 0.1);
            assert!((0.9 - 1e-6..=1.1 + 1e-6).contains(&s));
        }
    }

    #[test]
    fn spins_while_scattered() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut star = StarTopper::new(&mut rng);
        star.update(&FrameInput::new(0.016, 2.0, Mode::Scattered));
        assert_eq!(star.transform().rotation.x, 1.0);
        assert_eq!(star.transform().rotation.y, 1.0);
    }

    #[test]
    fn settles_upright_above_apex() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut star = StarTopper::new(&mut rng);
        let mut elapsed = 0.0;
        for _ in 0..1500 {
            elapsed += 1.0 / 60.0;
            star.update(&FrameInput::new(1.0 / 60.0, elapsed, Mode::Assembled));
        }
        let t = star.transform();
        assert!(t.rotation.length() < 1e-3);
        assert!((t.position - star.tree_position()).length() < 1e-3);
        assert!(t.position.y > TREE_HEIGHT / 2.0);
    }
}
