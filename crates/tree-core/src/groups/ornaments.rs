//! Ornament clusters: instanced spheres or boxes placed through the tree
//! volume, bobbing lazily while scattered and holding still once assembled.

use super::{Particle, ParticleGroup};
use crate::constants::*;
use crate::frame::FrameInput;
use crate::palette::Palette;
use crate::render::{GeometryKind, InstanceBatch, InstanceTransform, MaterialKind, SceneSink};
use crate::spatial::{random_point_in_sphere, scale_radial, tree_point};
use crate::transition::{lerp, transition_scale, Transition};
use glam::Vec3;
use rand::Rng;
use std::f32::consts::TAU;

/// Construction options for an ornament cluster.
#[derive(Clone, Debug)]
pub struct OrnamentConfig {
    pub label: &'static str,
    pub count: usize,
    pub geometry: GeometryKind,
    pub palette: Palette,
    /// `[min, max]` rest scale.
    pub scale_range: [f32; 2],
    /// Normalized height band to spread particles over.
    pub height_range: [f32; 2],
    /// Outer radial multiplier applied to tree positions.
    pub radius_scale: f32,
    /// Fill a shell under the surface instead of placing on it.
    pub thick_shell: bool,
    /// Independent x/y/z multipliers (boxes only).
    pub independent_axes: bool,
    /// Large at the base, shrinking toward the apex.
    pub size_gradient: bool,
    pub smoothing: f32,
}

impl Default for OrnamentConfig {
    fn default() -> Self {
        Self {
            label: "ornaments",
            count: 100,
            geometry: GeometryKind::Sphere,
            palette: Palette::from_hex(crate::palette::PALETTE_DECOR_SPHERES),
            scale_range: [0.3, 0.9],
            height_range: [0.0, 1.0],
            radius_scale: 1.0,
            thick_shell: false,
            independent_axes: false,
            size_gradient: false,
            smoothing: ORNAMENT_SMOOTHING,
        }
    }
}

/// Scale for a size-gradient particle at height `t`.
///
/// `noise` is a unit offset in \[-0.5, 0.5\]. The result never drops below
/// half the minimum.
pub fn gradient_scale(t: f32, range: [f32; 2], noise: f32) -> f32 {
    let spread = range[1] - range[0];
    let scale = range[1] - t * spread + noise * spread * GRADIENT_NOISE;
    scale.max(range[0] * 0.5)
}

/// Scale for a non-gradient particle; `u` is uniform in \[0, 1).
#[inline]
pub fn uniform_scale(range: [f32; 2], u: f32) -> f32 {
    range[0] + u * (range[1] - range[0])
}

/// Shrink particles near the apex so the tip stays pointed.
#[inline]
pub fn apex_taper(t: f32, scale: f32) -> f32 {
    if t > APEX_TIP_T {
        scale * APEX_TIP_TAPER
    } else {
        scale
    }
}

/// Radial multiplier for a particle; `u` is uniform in \[0, 1).
///
/// Thick shells bias toward the surface via `sqrt(u)` so the volume reads
/// as full rather than paper-thin.
#[inline]
pub fn shell_radius(radius_scale: f32, thick_shell: bool, u: f32) -> f32 {
    if thick_shell {
        let depth = u.sqrt();
        radius_scale * (SHELL_INNER + (1.0 - SHELL_INNER) * depth)
    } else {
        radius_scale
    }
}

/// Float bob amplitude for the eased progress.
#[inline]
pub fn float_amplitude(eased: f32) -> f32 {
    lerp(FLOAT_AMP_SCATTERED, FLOAT_AMP_ASSEMBLED, eased)
}

fn spawn_particle<R: Rng + ?Sized>(config: &OrnamentConfig, index: usize, rng: &mut R) -> Particle {
    let [y0, y1] = config.height_range;
    let t_norm = index as f32 / config.count as f32;
    let offset = (rng.gen::<f32>() - 0.5) * ORNAMENT_HEIGHT_NOISE;
    let t = (y0 + t_norm * (y1 - y0) + offset).clamp(0.0, 1.0);

    let radial = shell_radius(config.radius_scale, config.thick_shell, rng.gen());
    let tree = scale_radial(tree_point(t, config.count, rng), radial);
    let scatter = random_point_in_sphere(SCATTER_RADIUS, rng);

    let scale = if config.size_gradient {
        gradient_scale(t, config.scale_range, rng.gen::<f32>() - 0.5)
    } else {
        uniform_scale(config.scale_range, rng.gen())
    };
    let base_scale = apex_taper(t, scale);

    let axis_scale = if config.independent_axes && config.geometry == GeometryKind::Box {
        let mut axis = || AXIS_SCALE_MIN + rng.gen::<f32>() * (AXIS_SCALE_MAX - AXIS_SCALE_MIN);
        Vec3::new(axis(), axis(), axis())
    } else {
        Vec3::ONE
    };

    let color = config.palette.pick(rng);
    let accent = config.geometry == GeometryKind::Sphere && rng.gen::<f32>() < ACCENT_FRACTION;

    Particle {
        scatter,
        tree,
        height: t,
        base_scale,
        axis_scale,
        color,
        phase: rng.gen::<f32>() * TAU,
        rotation_speed: (rng.gen::<f32>() - 0.5) * 2.0,
        blink_speed: 0.0,
        accent,
    }
}

/// Transform of one ornament for the given eased progress and clock.
pub fn ornament_transform(p: &Particle, eased: f32, time: f32) -> InstanceTransform {
    let amp = float_amplitude(eased);
    let mut position = p.blend(eased);
    position.y += (time + p.phase).sin() * amp;
    position.x += (time * 0.5 + p.phase).cos() * amp * 0.5;

    let spin = time * p.rotation_speed;
    let scale = p.base_scale * transition_scale(eased);

    InstanceTransform {
        position,
        rotation: Vec3::new(spin + p.phase, spin + p.phase, spin),
        scale: p.axis_scale * scale,
    }
}

/// Where a particle's transform lives: which batch, and at which slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Slot {
    accent: bool,
    index: usize,
}

/// Instanced cluster of spheres or boxes split into opaque and accent batches.
pub struct OrnamentCluster {
    config: OrnamentConfig,
    particles: Vec<Particle>,
    slots: Vec<Slot>,
    transition: Transition,
    opaque: InstanceBatch,
    accent: InstanceBatch,
}

impl OrnamentCluster {
    pub fn new<R: Rng + ?Sized>(config: OrnamentConfig, rng: &mut R) -> Self {
        let particles: Vec<Particle> = (0..config.count)
            .map(|i| spawn_particle(&config, i, rng))
            .collect();

        let mut slots = Vec::with_capacity(particles.len());
        let mut opaque_colors = Vec::new();
        let mut accent_colors = Vec::new();
        for p in &particles {
            let side = if p.accent {
                &mut accent_colors
            } else {
                &mut opaque_colors
            };
            slots.push(Slot {
                accent: p.accent,
                index: side.len(),
            });
            side.push(p.color);
        }

        let opaque = InstanceBatch::new(
            format!("{}/opaque", config.label),
            config.geometry,
            MaterialKind::Metallic,
            opaque_colors,
        );
        let accent = InstanceBatch::new(
            format!("{}/accent", config.label),
            config.geometry,
            MaterialKind::Crystal,
            accent_colors,
        );

        log::debug!(
            "[ornaments] {} built: {} opaque, {} accent",
            config.label,
            opaque.len(),
            accent.len()
        );

        let transition = Transition::new(config.smoothing);
        let mut cluster = Self {
            config,
            particles,
            slots,
            transition,
            opaque,
            accent,
        };
        cluster.refresh(0.0);
        cluster
    }

    pub fn config(&self) -> &OrnamentConfig {
        &self.config
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn opaque(&self) -> &InstanceBatch {
        &self.opaque
    }

    pub fn accent(&self) -> &InstanceBatch {
        &self.accent
    }

    /// Current transform of the particle at `index` (construction order).
    pub fn transform_of(&self, index: usize) -> Option<&InstanceTransform> {
        let slot = self.slots.get(index)?;
        let batch = if slot.accent { &self.accent } else { &self.opaque };
        batch.transforms.get(slot.index)
    }

    fn refresh(&mut self, time: f32) {
        let eased = self.transition.eased();
        for (p, slot) in self.particles.iter().zip(&self.slots) {
            let batch = if slot.accent {
                &mut self.accent
            } else {
                &mut self.opaque
            };
            batch.transforms[slot.index] = ornament_transform(p, eased, time);
        }
    }
}

impl ParticleGroup for OrnamentCluster {
    fn label(&self) -> &str {
        self.config.label
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
        sink.instances(&self.opaque);
        if !self.accent.is_empty() {
            sink.instances(&self.accent);
        }
    }
}
