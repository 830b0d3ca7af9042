//! Scene composition: builds every group once, gates the assembly rotation on
//! the mode, and forwards frame ticks and output.

use crate::constants::*;
use crate::frame::FrameInput;
use crate::groups::{
    FairyLights, FoliageAura, OrnamentCluster, OrnamentConfig, ParticleGroup, SparkleConfig,
    SparkleField, StarTopper,
};
use crate::lighting::LightRig;
use crate::mode::Mode;
use crate::palette::{self, Palette, Rgb};
use crate::render::{FrameView, GeometryKind, SceneSink};
use glam::Mat4;
use rand::Rng;

/// Everything needed to build a scene.
#[derive(Clone, Debug)]
pub struct SceneConfig {
    pub ornaments: Vec<OrnamentConfig>,
    pub fairy_light_count: usize,
    pub fairy_light_color: Rgb,
    pub foliage_count: usize,
    pub foliage_color: Rgb,
    pub sparkles: SparkleConfig,
    pub lighting: LightRig,
}

impl Default for SceneConfig {
    fn default() -> Self {
        let ornaments = vec![
            // structural core
            OrnamentConfig {
                label: "green-core",
                count: 560,
                palette: Palette::from_hex(palette::PALETTE_GREEN),
                scale_range: [0.4, 1.3],
                thick_shell: true,
                radius_scale: 1.0,
                size_gradient: true,
                ..OrnamentConfig::default()
            },
            OrnamentConfig {
                label: "green-inner",
                count: 280,
                palette: Palette::from_hex(palette::PALETTE_GREEN),
                scale_range: [0.3, 1.0],
                thick_shell: true,
                radius_scale: 0.9,
                size_gradient: true,
                ..OrnamentConfig::default()
            },
            // tiny multi-colored sparkles, constant random size
            OrnamentConfig {
                label: "sparkle-beads",
                count: 700,
                palette: Palette::from_hex(palette::PALETTE_SPARKLE),
                scale_range: [0.08, 0.18],
                thick_shell: true,
                radius_scale: 1.05,
                ..OrnamentConfig::default()
            },
            OrnamentConfig {
                label: "gift-boxes",
                count: 450,
                geometry: GeometryKind::Box,
                palette: Palette::from_hex(palette::PALETTE_DECOR_BOXES),
                scale_range: [0.4, 0.9],
                thick_shell: true,
                radius_scale: 1.1,
                independent_axes: true,
                ..OrnamentConfig::default()
            },
            OrnamentConfig {
                label: "decor-balls",
                count: 350,
                palette: Palette::from_hex(palette::PALETTE_DECOR_SPHERES),
                scale_range: [0.3, 0.9],
                thick_shell: true,
                radius_scale: 1.12,
                size_gradient: true,
                ..OrnamentConfig::default()
            },
        ];
        Self {
            ornaments,
            fairy_light_count: FAIRY_LIGHT_COUNT,
            fairy_light_color: Rgb::from_hex(palette::LIGHT_WARM),
            foliage_count: FOLIAGE_COUNT,
            foliage_color: Rgb::from_hex(palette::GREEN_LIGHT),
            sparkles: SparkleConfig::default(),
            lighting: LightRig::default(),
        }
    }
}

pub struct Scene {
    ornaments: Vec<OrnamentCluster>,
    fairy_lights: FairyLights,
    foliage: FoliageAura,
    star: StarTopper,
    sparkles: SparkleField,
    lighting: LightRig,
    rotation_y: f32,
}

impl Scene {
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::with_config(SceneConfig::default(), rng)
    }

    pub fn with_config<R: Rng + ?Sized>(config: SceneConfig, rng: &mut R) -> Self {
        let ornaments: Vec<OrnamentCluster> = config
            .ornaments
            .into_iter()
            .map(|c| OrnamentCluster::new(c, rng))
            .collect();
        let fairy_lights = FairyLights::new(config.fairy_light_count, config.fairy_light_color, rng);
        let foliage = FoliageAura::new(config.foliage_count, config.foliage_color, rng);
        let star = StarTopper::new(rng);
        let sparkles = SparkleField::new(config.sparkles, rng);

        let scene = Self {
            ornaments,
            fairy_lights,
            foliage,
            star,
            sparkles,
            lighting: config.lighting,
            rotation_y: 0.0,
        };
        log::info!(
            "[scene] built {} groups, {} particles",
            scene.groups().count(),
            scene.particle_count()
        );
        scene
    }

    /// Mode-driven groups in draw order.
    pub fn groups(&self) -> impl Iterator<Item = &dyn ParticleGroup> + '_ {
        self.ornaments
            .iter()
            .map(|g| g as &dyn ParticleGroup)
            .chain(std::iter::once(&self.fairy_lights as &dyn ParticleGroup))
            .chain(std::iter::once(&self.foliage as &dyn ParticleGroup))
            .chain(std::iter::once(&self.star as &dyn ParticleGroup))
    }

    fn groups_mut(&mut self) -> impl Iterator<Item = &mut dyn ParticleGroup> + '_ {
        self.ornaments
            .iter_mut()
            .map(|g| g as &mut dyn ParticleGroup)
            .chain(std::iter::once(&mut self.fairy_lights as &mut dyn ParticleGroup))
            .chain(std::iter::once(&mut self.foliage as &mut dyn ParticleGroup))
            .chain(std::iter::once(&mut self.star as &mut dyn ParticleGroup))
    }

    pub fn ornaments(&self) -> &[OrnamentCluster] {
        &self.ornaments
    }

    pub fn fairy_lights(&self) -> &FairyLights {
        &self.fairy_lights
    }

    pub fn foliage(&self) -> &FoliageAura {
        &self.foliage
    }

    pub fn star(&self) -> &StarTopper {
        &self.star
    }

    pub fn sparkles(&self) -> &SparkleField {
        &self.sparkles
    }

    pub fn lighting(&self) -> &LightRig {
        &self.lighting
    }

    pub fn particle_count(&self) -> usize {
        self.groups().map(|g| g.len()).sum()
    }

    /// Accumulated rotation of the assembly around Y (radians).
    pub fn rotation_y(&self) -> f32 {
        self.rotation_y
    }

    pub fn assembly_transform(&self) -> Mat4 {
        Mat4::from_rotation_y(self.rotation_y)
    }

    /// Advance every group by one frame.
    pub fn tick(&mut self, frame: &FrameInput) {
        if frame.mode == Mode::Assembled {
            self.rotation_y += frame.delta * SCENE_ROTATION_SPEED;
        }
        for group in self.groups_mut() {
            group.update(frame);
        }
        self.sparkles.update(frame);
        self.lighting.star.position = self.star.transform().position;
    }

    /// Hand the current frame to the renderer.
    pub fn emit(&self, sink: &mut dyn SceneSink) {
        sink.begin_frame(FrameView {
            assembly: self.assembly_transform(),
            lighting: &self.lighting,
        });
        for group in self.groups() {
            group.emit(sink);
        }
        self.sparkles.emit(sink);
    }
}
