//! Background sparkle field: an ambient point cloud that drifts and twinkles
//! around the scene independently of the mode.

use crate::constants::*;
use crate::frame::FrameInput;
use crate::palette::Rgb;
use crate::render::{BatchId, PointCloud, PointRaw, PointStyle, PointUniforms, SceneSink, Space};
use glam::Vec3;
use rand::Rng;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SparkleConfig {
    pub count: usize,
    /// Edge length of the cube the sparkles fill.
    pub extent: f32,
    pub size: f32,
    pub speed: f32,
    pub opacity: f32,
    pub color: Rgb,
}

impl Default for SparkleConfig {
    fn default() -> Self {
        Self {
            count: SPARKLE_COUNT,
            extent: SPARKLE_EXTENT,
            size: SPARKLE_SIZE,
            speed: SPARKLE_SPEED,
            opacity: SPARKLE_OPACITY,
            color: Rgb::from_hex(crate::palette::GOLD_LIGHT),
        }
    }
}

/// CPU reference of the sparkle vertex shader: small circular drift around the
/// base position, phase-shifted per sparkle.
pub fn sparkle_position(point: &PointRaw, time: f32) -> Vec3 {
    let base = Vec3::from(point.scatter);
    let phase = time * point.speed + base.x * 100.0;
    base + Vec3::new(phase.cos(), phase.sin(), phase.cos()) * 0.2
}

/// Twinkle multiplier in \[0, 1\] applied to the field opacity.
pub fn sparkle_twinkle(point: &PointRaw, time: f32) -> f32 {
    ((time * point.speed * 4.0 + point.seed * std::f32::consts::TAU).sin() * 0.5 + 0.5).powi(2)
}

pub struct SparkleField {
    config: SparkleConfig,
    cloud: PointCloud,
    time: f32,
}

impl SparkleField {
    pub fn new<R: Rng + ?Sized>(config: SparkleConfig, rng: &mut R) -> Self {
        let half = config.extent / 2.0;
        let points = (0..config.count)
            .map(|_| {
                let p = Vec3::new(
                    rng.gen_range(-half..=half),
                    rng.gen_range(-half..=half),
                    rng.gen_range(-half..=half),
                );
                PointRaw {
                    scatter: p.to_array(),
                    seed: rng.gen(),
                    tree: p.to_array(),
                    // per-sparkle speed around the configured base
                    speed: config.speed * (0.5 + rng.gen::<f32>()),
                }
            })
            .collect();
        Self {
            config,
            cloud: PointCloud {
                id: BatchId::next(),
                label: "sparkles".to_string(),
                style: PointStyle::Sparkle,
                space: Space::World,
                color: config.color,
                points,
            },
            time: 0.0,
        }
    }

    pub fn cloud(&self) -> &PointCloud {
        &self.cloud
    }

    pub fn update(&mut self, frame: &FrameInput) {
        self.time += frame.delta;
    }

    pub fn uniforms(&self) -> PointUniforms {
        PointUniforms {
            time: self.time,
            progress: 0.0,
            size: self.config.size,
            opacity: self.config.opacity,
        }
    }

    pub fn emit(&self, sink: &mut dyn SceneSink) {
        sink.points(&self.cloud, self.uniforms());
    }
}
