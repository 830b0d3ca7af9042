//! Foliage aura: a shader-driven point cloud.
//!
//! The core owns the static attributes and the progress/time pair; the vertex
//! math runs on the GPU (`points.wgsl`). `foliage_vertex` is the CPU
//! reference of that math and must stay in sync with the shader.

use super::ParticleGroup;
use crate::constants::*;
use crate::frame::FrameInput;
use crate::palette::Rgb;
use crate::render::{BatchId, PointCloud, PointRaw, PointStyle, PointUniforms, SceneSink, Space};
use crate::spatial::{random_point_in_sphere, scale_radial, tree_point};
use crate::transition::{ease_in_out_cubic, lerp, Transition};
use glam::Vec3;
use rand::Rng;

/// Evaluated state of one foliage point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FoliageVertex {
    pub position: Vec3,
    pub alpha: f32,
}

/// Drift amplitude: full while scattered, a tenth once assembled.
#[inline]
pub fn foliage_drift(eased: f32) -> f32 {
    lerp(1.0, FOLIAGE_DRIFT_ASSEMBLED, eased)
}

/// Twinkling alpha, kept very low so the aura never reads as haze.
#[inline]
pub fn foliage_alpha(time: f32, seed: f32) -> f32 {
    let twinkle = (time * 3.0 + seed * 20.0).sin() * 0.5 + 0.5;
    FOLIAGE_ALPHA_BASE + FOLIAGE_ALPHA_TWINKLE * twinkle
}

/// Point size in pixels before perspective attenuation by view depth.
#[inline]
pub fn foliage_point_size(pixel_ratio: f32, seed: f32, view_depth: f32) -> f32 {
    (2.0 * pixel_ratio + seed * 1.5) * (80.0 / view_depth.max(1e-3))
}

/// CPU reference of the foliage vertex shader.
pub fn foliage_vertex(point: &PointRaw, time: f32, progress: f32) -> FoliageVertex {
    let t = ease_in_out_cubic(progress);
    let mut position = Vec3::from(point.scatter).lerp(Vec3::from(point.tree), t);
    let drift = foliage_drift(t);
    position.x += (time * 0.5 + point.seed * 10.0).sin() * drift;
    position.y += (time * 0.3 + point.seed * 5.0).cos() * drift;
    FoliageVertex {
        position,
        alpha: foliage_alpha(time, point.seed),
    }
}

pub struct FoliageAura {
    cloud: PointCloud,
    transition: Transition,
    time: f32,
}

impl FoliageAura {
    pub fn new<R: Rng + ?Sized>(count: usize, color: Rgb, rng: &mut R) -> Self {
        let points = (0..count)
            .map(|i| {
                let tree = scale_radial(
                    tree_point(i as f32 / count as f32, count, rng),
                    FOLIAGE_RADIUS_PULL,
                );
                let scatter = random_point_in_sphere(SCATTER_RADIUS, rng);
                PointRaw {
                    scatter: scatter.to_array(),
                    seed: rng.gen(),
                    tree: tree.to_array(),
                    speed: 1.0,
                }
            })
            .collect();
        Self {
            cloud: PointCloud {
                id: BatchId::next(),
                label: "foliage".to_string(),
                style: PointStyle::Foliage,
                space: Space::Assembly,
                color,
                points,
            },
            transition: Transition::new(FOLIAGE_SMOOTHING),
            time: 0.0,
        }
    }

    pub fn cloud(&self) -> &PointCloud {
        &self.cloud
    }

    /// Shader clock; accumulated from frame deltas.
    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn uniforms(&self) -> PointUniforms {
        PointUniforms {
            time: self.time,
            progress: self.transition.progress(),
            size: 1.0,
            opacity: 1.0,
        }
    }

    /// Evaluate point `index` on the CPU with the current uniforms.
    pub fn vertex(&self, index: usize) -> Option<FoliageVertex> {
        let point = self.cloud.points.get(index)?;
        Some(foliage_vertex(point, self.time, self.transition.progress()))
    }
}

impl ParticleGroup for FoliageAura {
    fn label(&self) -> &str {
        &self.cloud.label
    }

    fn len(&self) -> usize {
        self.cloud.points.len()
    }

    fn progress(&self) -> f32 {
        self.transition.progress()
    }

    fn update(&mut self, frame: &FrameInput) {
        self.time += frame.delta;
        self.transition.advance(frame.delta, frame.target());
    }

    fn emit(&self, sink: &mut dyn SceneSink) {
        sink.points(&self.cloud, self.uniforms());
    }
}
