//! Particle groups: fixed-size sets of particles that blend between a
//! scattered cloud and the assembled tree.

pub mod fairy_lights;
pub mod foliage;
pub mod ornaments;
pub mod sparkles;
pub mod star;

pub use fairy_lights::*;
pub use foliage::*;
pub use ornaments::*;
pub use sparkles::*;
pub use star::*;

use crate::frame::FrameInput;
use crate::palette::Rgb;
use crate::render::SceneSink;
use glam::Vec3;

/// Common surface of every mode-driven group in the scene.
pub trait ParticleGroup {
    fn label(&self) -> &str;

    /// Number of particles; fixed at construction.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Smoothed blend progress in \[0, 1\].
    fn progress(&self) -> f32;

    /// Advance progress toward the frame's mode target and refresh derived transforms.
    fn update(&mut self, frame: &FrameInput);

    /// Hand this frame's output to the renderer.
    fn emit(&self, sink: &mut dyn SceneSink);
}

/// Attributes fixed when a particle is created.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub scatter: Vec3,
    pub tree: Vec3,
    /// Normalized tree height the particle was placed at.
    pub height: f32,
    pub base_scale: f32,
    /// Per-axis multiplier on top of `base_scale` (ones unless boxes opt in).
    pub axis_scale: Vec3,
    pub color: Rgb,
    pub phase: f32,
    pub rotation_speed: f32,
    pub blink_speed: f32,
    /// Drawn with the translucent accent material.
    pub accent: bool,
}

impl Particle {
    /// Interpolated position before any group-specific embellishment.
    #[inline]
    pub fn blend(&self, eased: f32) -> Vec3 {
        self.scatter.lerp(self.tree, eased)
    }
}
