//! wgpu implementation of [`SceneSink`].
//!
//! Batches are uploaded as they are emitted and drawn after the scene is done
//! emitting, in one render pass: opaque meshes, then translucent crystal, then
//! additive point clouds. GPU buffers are cached per [`BatchId`].

use crate::geometry::{self, Mesh, Vertex};
use glam::Mat4;
use std::collections::HashMap;
use std::sync::Arc;
use tree_core::{
    BatchId, FrameView, GeometryKind, InstanceBatch, InstanceRaw, LightRig, MaterialKind,
    OrbitCamera, PointCloud, PointRaw, PointStyle, PointUniforms, Rgb, SceneSink, Space,
};
use wgpu::util::DeviceExt;
use winit::window::Window;

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct Globals {
    view_proj: [[f32; 4]; 4],
    camera_pos: [f32; 4],
    ambient: [f32; 4],
    dir_dir: [[f32; 4]; 2],
    dir_color: [[f32; 4]; 2],
    point_pos: [[f32; 4]; 3],
    point_color: [[f32; 4]; 3],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct BatchUniform {
    space: [[f32; 4]; 4],
    material: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct CloudUniform {
    space: [[f32; 4]; 4],
    color: [f32; 4],
    params: [f32; 4],
    view: [f32; 4],
}

/// Shading parameters per material: emissive, alpha, specular, roughness.
pub fn material_params(material: MaterialKind) -> [f32; 4] {
    match material {
        MaterialKind::Metallic => [0.0, 1.0, 0.9, 0.35],
        MaterialKind::Crystal => [0.05, 0.6, 1.0, 0.2],
        MaterialKind::Emissive => [2.0, 1.0, 0.0, 1.0],
    }
}

#[inline]
fn rgba(c: Rgb, k: f32) -> [f32; 4] {
    let c = c.scaled(k);
    [c.r, c.g, c.b, 1.0]
}

fn globals_for(camera: &OrbitCamera, aspect: f32, lighting: &LightRig, assembly: Mat4) -> Globals {
    let mut g = Globals {
        view_proj: camera.view_proj(aspect).to_cols_array_2d(),
        camera_pos: camera.eye().extend(1.0).to_array(),
        ambient: rgba(lighting.ambient, lighting.ambient_intensity),
        dir_dir: [[0.0; 4]; 2],
        dir_color: [[0.0; 4]; 2],
        point_pos: [[0.0, 0.0, 0.0, 1.0]; 3],
        point_color: [[0.0; 4]; 3],
    };
    for (i, light) in lighting.directional.iter().take(2).enumerate() {
        g.dir_dir[i] = light.position.normalize_or_zero().extend(0.0).to_array();
        g.dir_color[i] = rgba(light.color, light.intensity);
    }
    // the star light lives in assembly space and turns with the tree
    let star = &lighting.star;
    let points = lighting
        .points
        .iter()
        .map(|p| (p.position, p))
        .chain(std::iter::once((assembly.transform_point3(star.position), star)));
    for (i, (position, light)) in points.take(3).enumerate() {
        g.point_pos[i] = position.extend(light.range.max(1e-3)).to_array();
        g.point_color[i] = rgba(light.color, light.intensity);
    }
    g
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum MeshKey {
    Sphere,
    LowSphere,
    Box,
    Star,
}

impl MeshKey {
    fn for_batch(batch: &InstanceBatch) -> Self {
        match (batch.geometry, batch.material) {
            (GeometryKind::Sphere, MaterialKind::Emissive) => MeshKey::LowSphere,
            (GeometryKind::Sphere, _) => MeshKey::Sphere,
            (GeometryKind::Box, _) => MeshKey::Box,
            (GeometryKind::Star, _) => MeshKey::Star,
        }
    }

    fn build(self) -> Mesh {
        match self {
            MeshKey::Sphere => geometry::uv_sphere(1.0, 24, 24),
            MeshKey::LowSphere => geometry::uv_sphere(1.0, 8, 8),
            MeshKey::Box => geometry::cube(),
            MeshKey::Star => geometry::star_prism(),
        }
    }
}

struct GpuMesh {
    vertices: wgpu::Buffer,
    indices: wgpu::Buffer,
    index_count: u32,
}

/// Growable vertex buffer holding one batch's per-instance data.
struct InstanceBuffer {
    buffer: wgpu::Buffer,
    capacity: u64,
}

impl InstanceBuffer {
    fn new(device: &wgpu::Device, label: &str, bytes: u64) -> Self {
        let capacity = bytes.max(64);
        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: capacity,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        Self { buffer, capacity }
    }

    fn write(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, label: &str, data: &[u8]) {
        if data.len() as u64 > self.capacity {
            *self = Self::new(device, label, (data.len() as u64).next_power_of_two());
        }
        queue.write_buffer(&self.buffer, 0, data);
    }
}

struct GpuBatch {
    instances: InstanceBuffer,
    uniform: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    count: u32,
    mesh: MeshKey,
    material: MaterialKind,
}

struct GpuCloud {
    points: InstanceBuffer,
    uniform: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    count: u32,
    uploaded: bool,
}

pub struct GpuState {
    pub window: Arc<Window>,
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    depth: wgpu::TextureView,
    globals_buffer: wgpu::Buffer,
    globals_bind_group: wgpu::BindGroup,
    item_layout: wgpu::BindGroupLayout,
    opaque_pipeline: wgpu::RenderPipeline,
    crystal_pipeline: wgpu::RenderPipeline,
    points_pipeline: wgpu::RenderPipeline,
    quad_vb: wgpu::Buffer,
    meshes: HashMap<MeshKey, GpuMesh>,
    batches: HashMap<BatchId, GpuBatch>,
    clouds: HashMap<BatchId, GpuCloud>,
    frame_batches: Vec<BatchId>,
    frame_clouds: Vec<BatchId>,
    scratch: Vec<InstanceRaw>,
    assembly: Mat4,
    clear: wgpu::Color,
    pub camera: OrbitCamera,
}

fn create_depth(device: &wgpu::Device, width: u32, height: u32) -> wgpu::TextureView {
    device
        .create_texture(&wgpu::TextureDescriptor {
            label: Some("depth"),
            size: wgpu::Extent3d {
                width: width.max(1),
                height: height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        })
        .create_view(&wgpu::TextureViewDescriptor::default())
}

fn uniform_layout_entry(visibility: wgpu::ShaderStages) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding: 0,
        visibility,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: None,
        },
        count: None,
    }
}

struct PipelineSpec<'a> {
    label: &'a str,
    shader: &'a wgpu::ShaderModule,
    buffers: &'a [wgpu::VertexBufferLayout<'a>],
    blend: wgpu::BlendState,
    depth_write: bool,
}

fn create_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    format: wgpu::TextureFormat,
    spec: PipelineSpec<'_>,
) -> wgpu::RenderPipeline {
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(spec.label),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: spec.shader,
            entry_point: Some("vs_main"),
            buffers: spec.buffers,
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        primitive: wgpu::PrimitiveState {
            cull_mode: None,
            ..Default::default()
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled: spec.depth_write,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState::default(),
        fragment: Some(wgpu::FragmentState {
            module: spec.shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(spec.blend),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        cache: None,
        multiview: None,
    })
}

const ADDITIVE: wgpu::BlendState = wgpu::BlendState {
    color: wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::SrcAlpha,
        dst_factor: wgpu::BlendFactor::One,
        operation: wgpu::BlendOperation::Add,
    },
    alpha: wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::Zero,
        dst_factor: wgpu::BlendFactor::One,
        operation: wgpu::BlendOperation::Add,
    },
};

impl GpuState {
    pub async fn new(window: Arc<Window>, background: Rgb) -> anyhow::Result<Self> {
        let size = window.inner_size();
        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(Arc::clone(&window))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No GPU adapter"))?;
        log::info!("[gpu] adapter: {}", adapter.get_info().name);
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("Surface reports no formats"))?;
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: surface_caps.alpha_modes[0],
            desired_maximum_frame_latency: 2,
            view_formats: vec![],
        };
        surface.configure(&device, &config);
        let depth = create_depth(&device, config.width, config.height);

        let mesh_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("mesh"),
            source: wgpu::ShaderSource::Wgsl(tree_core::MESH_WGSL.into()),
        });
        let points_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("points"),
            source: wgpu::ShaderSource::Wgsl(tree_core::POINTS_WGSL.into()),
        });

        let globals_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("globals"),
            size: std::mem::size_of::<Globals>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let globals_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("globals_bgl"),
            entries: &[uniform_layout_entry(wgpu::ShaderStages::VERTEX_FRAGMENT)],
        });
        let item_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("item_bgl"),
            entries: &[uniform_layout_entry(wgpu::ShaderStages::VERTEX_FRAGMENT)],
        });
        let globals_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("globals_bg"),
            layout: &globals_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: globals_buffer.as_entire_binding(),
            }],
        });
        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pl"),
            bind_group_layouts: &[&globals_layout, &item_layout],
            push_constant_ranges: &[],
        });

        let mesh_buffers = [
            // slot 0: mesh vertices
            wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<Vertex>() as u64,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3],
            },
            // slot 1: model matrix columns + color
            wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<InstanceRaw>() as u64,
                step_mode: wgpu::VertexStepMode::Instance,
                attributes: &wgpu::vertex_attr_array![
                    2 => Float32x4, 3 => Float32x4, 4 => Float32x4, 5 => Float32x4, 6 => Float32x4
                ],
            },
        ];
        let point_buffers = [
            // slot 0: quad corners
            wgpu::VertexBufferLayout {
                array_stride: (std::mem::size_of::<f32>() * 2) as u64,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &wgpu::vertex_attr_array![0 => Float32x2],
            },
            // slot 1: static point attributes
            wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<PointRaw>() as u64,
                step_mode: wgpu::VertexStepMode::Instance,
                attributes: &wgpu::vertex_attr_array![
                    1 => Float32x3, 2 => Float32, 3 => Float32x3, 4 => Float32
                ],
            },
        ];

        let opaque_pipeline = create_pipeline(
            &device,
            &pipeline_layout,
            format,
            PipelineSpec {
                label: "mesh_opaque",
                shader: &mesh_shader,
                buffers: &mesh_buffers,
                blend: wgpu::BlendState::REPLACE,
                depth_write: true,
            },
        );
        let crystal_pipeline = create_pipeline(
            &device,
            &pipeline_layout,
            format,
            PipelineSpec {
                label: "mesh_crystal",
                shader: &mesh_shader,
                buffers: &mesh_buffers,
                blend: wgpu::BlendState::ALPHA_BLENDING,
                depth_write: false,
            },
        );
        let points_pipeline = create_pipeline(
            &device,
            &pipeline_layout,
            format,
            PipelineSpec {
                label: "points",
                shader: &points_shader,
                buffers: &point_buffers,
                blend: ADDITIVE,
                depth_write: false,
            },
        );

        // Quad corners for two triangles
        let quad_vertices: [f32; 12] = [
            -0.5, -0.5, 0.5, -0.5, 0.5, 0.5, -0.5, -0.5, 0.5, 0.5, -0.5, 0.5,
        ];
        let quad_vb = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("quad_vb"),
            contents: bytemuck::cast_slice(&quad_vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let meshes = [MeshKey::Sphere, MeshKey::LowSphere, MeshKey::Box, MeshKey::Star]
            .into_iter()
            .map(|key| {
                let mesh = key.build();
                let vertices = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("mesh_vb"),
                    contents: bytemuck::cast_slice(&mesh.vertices),
                    usage: wgpu::BufferUsages::VERTEX,
                });
                // index buffers must be 4-byte aligned
                let mut indices = mesh.indices.clone();
                if indices.len() % 2 == 1 {
                    indices.push(0);
                }
                let indices = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("mesh_ib"),
                    contents: bytemuck::cast_slice(&indices),
                    usage: wgpu::BufferUsages::INDEX,
                });
                let gpu = GpuMesh {
                    vertices,
                    indices,
                    index_count: mesh.index_count(),
                };
                (key, gpu)
            })
            .collect();

        Ok(Self {
            window,
            surface,
            device,
            queue,
            config,
            depth,
            globals_buffer,
            globals_bind_group,
            item_layout,
            opaque_pipeline,
            crystal_pipeline,
            points_pipeline,
            quad_vb,
            meshes,
            batches: HashMap::new(),
            clouds: HashMap::new(),
            frame_batches: Vec::new(),
            frame_clouds: Vec::new(),
            scratch: Vec::new(),
            assembly: Mat4::IDENTITY,
            clear: wgpu::Color {
                r: background.r as f64,
                g: background.g as f64,
                b: background.b as f64,
                a: 1.0,
            },
            camera: OrbitCamera::default(),
        })
    }

    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }
        self.config.width = new_size.width;
        self.config.height = new_size.height;
        self.surface.configure(&self.device, &self.config);
        self.depth = create_depth(&self.device, new_size.width, new_size.height);
    }

    fn aspect(&self) -> f32 {
        self.config.width as f32 / self.config.height.max(1) as f32
    }

    fn space_matrix(&self, space: Space) -> Mat4 {
        match space {
            Space::Assembly => self.assembly,
            Space::World => Mat4::IDENTITY,
        }
    }

    fn item_uniform(&self, label: &str, size: usize) -> (wgpu::Buffer, wgpu::BindGroup) {
        let uniform = self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: size as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout: &self.item_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform.as_entire_binding(),
            }],
        });
        (uniform, bind_group)
    }

    /// Draw everything emitted since the last `begin_frame` and present.
    pub fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("rpass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_bind_group(0, &self.globals_bind_group, &[]);

            for (pipeline, crystal) in [(&self.opaque_pipeline, false), (&self.crystal_pipeline, true)] {
                rpass.set_pipeline(pipeline);
                for id in &self.frame_batches {
                    let Some(batch) = self.batches.get(id) else {
                        continue;
                    };
                    if batch.count == 0 || (batch.material == MaterialKind::Crystal) != crystal {
                        continue;
                    }
                    let Some(mesh) = self.meshes.get(&batch.mesh) else {
                        continue;
                    };
                    rpass.set_bind_group(1, &batch.bind_group, &[]);
                    rpass.set_vertex_buffer(0, mesh.vertices.slice(..));
                    rpass.set_vertex_buffer(1, batch.instances.buffer.slice(..));
                    rpass.set_index_buffer(mesh.indices.slice(..), wgpu::IndexFormat::Uint16);
                    rpass.draw_indexed(0..mesh.index_count, 0, 0..batch.count);
                }
            }

            rpass.set_pipeline(&self.points_pipeline);
            rpass.set_vertex_buffer(0, self.quad_vb.slice(..));
            for id in &self.frame_clouds {
                let Some(cloud) = self.clouds.get(id) else {
                    continue;
                };
                if cloud.count == 0 {
                    continue;
                }
                rpass.set_bind_group(1, &cloud.bind_group, &[]);
                rpass.set_vertex_buffer(1, cloud.points.buffer.slice(..));
                rpass.draw(0..6, 0..cloud.count);
            }
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}

impl SceneSink for GpuState {
    fn begin_frame(&mut self, view: FrameView<'_>) {
        self.assembly = view.assembly;
        self.frame_batches.clear();
        self.frame_clouds.clear();
        let globals = globals_for(&self.camera, self.aspect(), view.lighting, view.assembly);
        self.queue
            .write_buffer(&self.globals_buffer, 0, bytemuck::bytes_of(&globals));
    }

    fn instances(&mut self, batch: &InstanceBatch) {
        let params = material_params(batch.material);
        let mut scratch = std::mem::take(&mut self.scratch);
        batch.write_raw(params[1], &mut scratch);
        let bytes: &[u8] = bytemuck::cast_slice(&scratch);

        if !self.batches.contains_key(&batch.id) {
            let (uniform, bind_group) =
                self.item_uniform(&batch.label, std::mem::size_of::<BatchUniform>());
            let instances = InstanceBuffer::new(&self.device, &batch.label, bytes.len() as u64);
            log::debug!("[gpu] new batch '{}' ({} instances)", batch.label, batch.len());
            self.batches.insert(
                batch.id,
                GpuBatch {
                    instances,
                    uniform,
                    bind_group,
                    count: 0,
                    mesh: MeshKey::for_batch(batch),
                    material: batch.material,
                },
            );
        }
        let space = self.space_matrix(batch.space);
        if let Some(gpu) = self.batches.get_mut(&batch.id) {
            gpu.instances
                .write(&self.device, &self.queue, &batch.label, bytes);
            gpu.count = scratch.len() as u32;
            let uniform = BatchUniform {
                space: space.to_cols_array_2d(),
                material: params,
            };
            self.queue
                .write_buffer(&gpu.uniform, 0, bytemuck::bytes_of(&uniform));
            self.frame_batches.push(batch.id);
        }
        self.scratch = scratch;
    }

    fn points(&mut self, cloud: &PointCloud, uniforms: PointUniforms) {
        if !self.clouds.contains_key(&cloud.id) {
            let (uniform, bind_group) =
                self.item_uniform(&cloud.label, std::mem::size_of::<CloudUniform>());
            let bytes: &[u8] = bytemuck::cast_slice(&cloud.points);
            let points = InstanceBuffer::new(&self.device, &cloud.label, bytes.len() as u64);
            log::debug!("[gpu] new cloud '{}' ({} points)", cloud.label, cloud.points.len());
            self.clouds.insert(
                cloud.id,
                GpuCloud {
                    points,
                    uniform,
                    bind_group,
                    count: 0,
                    uploaded: false,
                },
            );
        }
        let style = match cloud.style {
            PointStyle::Foliage => 0.0,
            PointStyle::Sparkle => 1.0,
        };
        let uniform = CloudUniform {
            space: self.space_matrix(cloud.space).to_cols_array_2d(),
            color: [cloud.color.r, cloud.color.g, cloud.color.b, 1.0],
            params: [uniforms.time, uniforms.progress, uniforms.size, uniforms.opacity],
            view: [
                style,
                self.window.scale_factor() as f32,
                self.config.width as f32,
                self.config.height as f32,
            ],
        };
        if let Some(gpu) = self.clouds.get_mut(&cloud.id) {
            // point attributes never change after construction
            if !gpu.uploaded {
                gpu.points.write(
                    &self.device,
                    &self.queue,
                    &cloud.label,
                    bytemuck::cast_slice(&cloud.points),
                );
                gpu.count = cloud.points.len() as u32;
                gpu.uploaded = true;
            }
            self.queue
                .write_buffer(&gpu.uniform, 0, bytemuck::bytes_of(&uniform));
            self.frame_clouds.push(cloud.id);
        }
    }
}
