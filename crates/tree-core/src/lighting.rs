//! Static light rig for the scene.

use crate::palette::{self, Rgb};
use glam::Vec3;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DirectionalLight {
    /// Light position; the light shines from here toward the origin.
    pub position: Vec3,
    pub color: Rgb,
    pub intensity: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointLight {
    pub position: Vec3,
    pub color: Rgb,
    pub intensity: f32,
    /// Distance at which the contribution reaches zero.
    pub range: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LightRig {
    pub background: Rgb,
    pub ambient: Rgb,
    pub ambient_intensity: f32,
    pub directional: Vec<DirectionalLight>,
    pub points: Vec<PointLight>,
    /// Light carried by the star; its position follows the star every frame.
    pub star: PointLight,
}

impl Default for LightRig {
    fn default() -> Self {
        Self {
            background: Rgb::from_hex(palette::BACKGROUND),
            ambient: Rgb::from_hex(palette::GOLD_DEEP),
            ambient_intensity: 0.2,
            directional: vec![
                // warm key
                DirectionalLight {
                    position: Vec3::new(10.0, 20.0, 10.0),
                    color: Rgb::from_hex(palette::GOLD_LIGHT),
                    intensity: 3.5,
                },
                // cool fill
                DirectionalLight {
                    position: Vec3::new(-15.0, 10.0, 5.0),
                    color: Rgb::from_hex(palette::WHITE_PURE),
                    intensity: 2.0,
                },
            ],
            points: vec![
                PointLight {
                    position: Vec3::new(0.0, -15.0, 10.0),
                    color: Rgb::from_hex(palette::GREEN_LIGHT),
                    intensity: 2.0,
                    range: 50.0,
                },
                PointLight {
                    position: Vec3::new(0.0, 15.0, -10.0),
                    color: Rgb::from_hex(palette::GOLD_MEDIUM),
                    intensity: 4.0,
                    range: 50.0,
                },
            ],
            star: PointLight {
                position: crate::constants::star_tree_position(),
                color: Rgb::from_hex(palette::GOLD_LIGHT),
                intensity: 8.0,
                range: 10.0,
            },
        }
    }
}

impl LightRig {
    /// All point lights including the star's, in a fixed order.
    pub fn all_points(&self) -> impl Iterator<Item = &PointLight> {
        self.points.iter().chain(std::iter::once(&self.star))
    }
}
