//! Renderer boundary.
//!
//! The core never touches a GPU. Each frame the scene hands a `SceneSink`
//! its instance batches (ordered transforms indexed by particle, colors fixed
//! at construction) and point clouds (static attributes plus a small uniform
//! block). The native front-end implements the sink with wgpu.

use crate::lighting::LightRig;
use crate::palette::Rgb;
use glam::{EulerRot, Mat4, Quat, Vec3};
use std::sync::atomic::{AtomicU32, Ordering};

/// Stable identity of a batch across frames, used by renderers to cache GPU buffers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BatchId(pub u32);

impl BatchId {
    pub fn next() -> Self {
        static NEXT: AtomicU32 = AtomicU32::new(1);
        BatchId(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GeometryKind {
    Sphere,
    Box,
    Star,
}

/// Surface look requested from the renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MaterialKind {
    /// Opaque, metallic.
    Metallic,
    /// Translucent crystal used for accent particles.
    Crystal,
    /// Self-lit (fairy lights, star).
    Emissive,
}

/// Whether a batch rotates with the tree assembly or stays in world space.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Space {
    Assembly,
    World,
}

/// Position, Euler rotation (XYZ order, radians) and per-axis scale of one instance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InstanceTransform {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Default for InstanceTransform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl InstanceTransform {
    pub fn matrix(&self) -> Mat4 {
        let rotation = Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z);
        Mat4::from_scale_rotation_translation(self.scale, rotation, self.position)
    }
}

/// GPU-ready instance record: model matrix columns and RGBA color.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct InstanceRaw {
    pub model: [[f32; 4]; 4],
    pub color: [f32; 4],
}

/// An instanced draw: one geometry, one material, N transforms.
///
/// `transforms` is refreshed in place every frame; `colors` is written once.
/// Both are indexed by slot and never resized.
#[derive(Clone, Debug)]
pub struct InstanceBatch {
    pub id: BatchId,
    pub label: String,
    pub geometry: GeometryKind,
    pub material: MaterialKind,
    pub space: Space,
    pub colors: Vec<Rgb>,
    pub transforms: Vec<InstanceTransform>,
}

impl InstanceBatch {
    pub fn new(
        label: impl Into<String>,
        geometry: GeometryKind,
        material: MaterialKind,
        colors: Vec<Rgb>,
    ) -> Self {
        let transforms = vec![InstanceTransform::default(); colors.len()];
        Self {
            id: BatchId::next(),
            label: label.into(),
            geometry,
            material,
            space: Space::Assembly,
            colors,
            transforms,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.transforms.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }

    /// Pack transforms and colors for upload, preserving slot order.
    pub fn write_raw(&self, alpha: f32, out: &mut Vec<InstanceRaw>) {
        out.clear();
        out.extend(self.transforms.iter().zip(&self.colors).map(|(t, c)| InstanceRaw {
            model: t.matrix().to_cols_array_2d(),
            color: [c.r, c.g, c.b, alpha],
        }));
    }
}

/// Per-point static attributes for shader-driven clouds.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PointRaw {
    pub scatter: [f32; 3],
    pub seed: f32,
    pub tree: [f32; 3],
    pub speed: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointStyle {
    /// Morphing aura: scatter/tree blend with drift and twinkle.
    Foliage,
    /// Ambient background field: fixed positions with gentle drift.
    Sparkle,
}

/// Shader-driven point cloud; attributes never change after construction.
#[derive(Clone, Debug)]
pub struct PointCloud {
    pub id: BatchId,
    pub label: String,
    pub style: PointStyle,
    pub space: Space,
    pub color: Rgb,
    pub points: Vec<PointRaw>,
}

/// Per-frame scalars that drive a point cloud's vertex math.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointUniforms {
    pub time: f32,
    pub progress: f32,
    pub size: f32,
    pub opacity: f32,
}

/// Frame-level state shared by every draw.
#[derive(Clone, Copy, Debug)]
pub struct FrameView<'a> {
    /// World transform of the rotating tree assembly.
    pub assembly: Mat4,
    pub lighting: &'a LightRig,
}

/// Receiver for one frame of scene output.
pub trait SceneSink {
    fn begin_frame(&mut self, view: FrameView<'_>);
    fn instances(&mut self, batch: &InstanceBatch);
    fn points(&mut self, cloud: &PointCloud, uniforms: PointUniforms);
}

/// Sink that records draw calls; useful for headless runs and tests.
#[derive(Default, Debug)]
pub struct RecordingSink {
    pub frames: usize,
    pub assembly: Option<Mat4>,
    pub instance_batches: Vec<(String, usize)>,
    pub point_clouds: Vec<(String, usize, PointUniforms)>,
}

impl SceneSink for RecordingSink {
    fn begin_frame(&mut self, view: FrameView<'_>) {
        self.frames += 1;
        self.assembly = Some(view.assembly);
        self.instance_batches.clear();
        self.point_clouds.clear();
    }

    fn instances(&mut self, batch: &InstanceBatch) {
        self.instance_batches.push((batch.label.clone(), batch.len()));
    }

    fn points(&mut self, cloud: &PointCloud, uniforms: PointUniforms) {
        self.point_clouds
            .push((cloud.label.clone(), cloud.points.len(), uniforms));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_transform_packs_identity_matrix() {
        let batch = InstanceBatch::new(
            "probe",
            GeometryKind::Sphere,
            MaterialKind::Metallic,
            vec![Rgb::new(1.0, 0.5, 0.25)],
        );
        let mut out = Vec::new();
        batch.write_raw(1.0, &mut out);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].model, Mat4::IDENTITY.to_cols_array_2d());
        assert_eq!(out[0].color, [1.0, 0.5, 0.25, 1.0]);
    }

    #[test]
    fn batch_ids_are_unique() {
        assert_ne!(BatchId::next(), BatchId::next());
    }

    #[test]
    fn matrix_applies_scale_then_translation() {
        let t = InstanceTransform {
            position: Vec3::new(1.0, 2.0, 3.0),
            rotation: Vec3::ZERO,
            scale: Vec3::splat(2.0),
        };
        let p = t.matrix().transform_point3(Vec3::X);
        assert!((p - Vec3::new(3.0, 2.0, 3.0)).length() < 1e-6);
    }
}
