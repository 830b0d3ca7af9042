//! Fairy lights: small emissive spheres pushed just outside the foliage that
//! blink once the tree is nearly assembled.

use super::{Particle, ParticleGroup};
use crate::constants::*;
use crate::frame::FrameInput;
use crate::palette::Rgb;
use crate::render::{GeometryKind, InstanceBatch, InstanceTransform, MaterialKind, SceneSink};
use crate::spatial::{random_point_in_sphere, scale_radial, tree_point};
use crate::transition::Transition;
use glam::Vec3;
use rand::Rng;
use std::f32::consts::TAU;

/// Blink factor in \[0.5, 1.5\], active only when raw progress exceeds the gate.
#[inline]
pub fn blink_factor(progress: f32, time: f32, speed: f32, offset: f32) -> f32 {
    if progress > FAIRY_BLINK_GATE {
        1.0 + (time * speed + offset).sin() * 0.5
    } else {
        1.0
    }
}

/// Uniform light scale for the given raw and eased progress.
pub fn fairy_light_scale(progress: f32, eased: f32, time: f32, speed: f32, offset: f32) -> f32 {
    let blink = blink_factor(progress, time, speed, offset);
    FAIRY_LIGHT_SCALE * blink * (FAIRY_FADE_FLOOR + (1.0 - FAIRY_FADE_FLOOR) * eased)
}

pub struct FairyLights {
    particles: Vec<Particle>,
    transition: Transition,
    batch: InstanceBatch,
}

impl FairyLights {
    pub fn new<R: Rng + ?Sized>(count: usize, color: Rgb, rng: &mut R) -> Self {
        let particles: Vec<Particle> = (0..count)
            .map(|_| {
                let t: f32 = rng.gen();
                let tree = scale_radial(tree_point(t, count, rng), FAIRY_LIGHT_RADIUS_PUSH);
                let scatter = random_point_in_sphere(SCATTER_RADIUS, rng);
                Particle {
                    scatter,
                    tree,
                    height: t,
                    base_scale: FAIRY_LIGHT_SCALE,
                    axis_scale: Vec3::ONE,
                    color,
                    phase: rng.gen::<f32>() * TAU,
                    rotation_speed: 0.0,
                    blink_speed: FAIRY_BLINK_SPEED_MIN
                        + rng.gen::<f32>() * (FAIRY_BLINK_SPEED_MAX - FAIRY_BLINK_SPEED_MIN),
                    accent: false,
                }
            })
            .collect();

        let batch = InstanceBatch::new(
            "fairy-lights",
            GeometryKind::Sphere,
            MaterialKind::Emissive,
            vec![color; particles.len()],
        );
        let mut lights = Self {
            particles,
            transition: Transition::new(FAIRY_LIGHT_SMOOTHING),
            batch,
        };
        lights.refresh(0.0);
        lights
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn batch(&self) -> &InstanceBatch {
        &self.batch
    }

    fn refresh(&mut self, time: f32) {
        let progress = self.transition.progress();
        let eased = self.transition.eased();
        for (p, slot) in self.particles.iter().zip(self.batch.transforms.iter_mut()) {
            let scale = fairy_light_scale(progress, eased, time, p.blink_speed, p.phase);
            *slot = InstanceTransform {
                position: p.blend(eased),
                rotation: Vec3::ZERO,
                scale: Vec3::splat(scale),
            };
        }
    }
}

impl ParticleGroup for FairyLights {
    fn label(&self) -> &str {
        "fairy-lights"
    }

    fn len(&self) -> usize {
        self.particles.len()
    }

    fn progress(&self) -> f32 {
        self.transition.progress()
    }

    fn update(&mut self, frame: &FrameInput) {
        self.transition.advance(frame.delta, frame.target());
        self.refresh(frame.elapsed);
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
    fn no_blink_below_gate() {
        for i in 0..50 {
            assert_eq!(blink_factor(0.8, i as f32 * 0.37, 3.0, 1.0), 1.0);
        }
    }

    #[test]
    fn blink_stays_in_band_above_gate() {
        for i in 0..200 {
            let b = blink_factor(0.95, i as f32 * 0.05, 4.0, 0.3);
            assert!((0.5..=1.5).contains(&b));
        }
    }

    #[test]
    fn lights_are_dim_while_scattered() {
        let s = fairy_light_scale(0.0, 0.0, 1.0, 3.0, 0.0);
        assert!((s - FAIRY_LIGHT_SCALE * FAIRY_FADE_FLOOR).abs() < 1e-6);
    }

    #[test]
    fn tree_positions_are_pushed_out_by_a_bounded_factor() {
        let mut rng = StdRng::seed_from_u64(21);
        let lights = FairyLights::new(100, Rgb::new(1.0, 1.0, 0.9), &mut rng);
        for p in lights.particles() {
            assert!(p.blink_speed >= FAIRY_BLINK_SPEED_MIN && p.blink_speed < FAIRY_BLINK_SPEED_MAX);
            let radial = Vec3::new(p.tree.x, 0.0, p.tree.z).length();
            let cone = crate::spatial::tree_radius_at(p.height);
            let max_jitter = TREE_JITTER / 2.0 * std::f32::consts::SQRT_2;
            assert!(radial <= (cone + max_jitter) * FAIRY_LIGHT_RADIUS_PUSH + 1e-4);
        }
    }

    #[test]
    fn assembled_lights_converge_on_tree_positions() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut lights = FairyLights::new(30, Rgb::new(1.0, 1.0, 1.0), &mut rng);
        let mut elapsed = 0.0;
        for _ in 0..1200 {
            elapsed += 1.0 / 60.0;
            lights.update(&FrameInput::new(1.0 / 60.0, elapsed, Mode::Assembled));
        }
        for (p, t) in lights.particles().iter().zip(&lights.batch().transforms) {
            assert!((t.position - p.tree).length() < 1e-3);
        }
    }
}
