//! # Pipeline — The wgpu Backend for the Sprite Batch
//!
//! [`SpriteRenderer`] owns every GPU object the batch needs that outlives a
//! frame: the render pipeline, the camera uniform, the shared sampler and the
//! persistent vertex buffer. It is the production [`SpriteBackend`].
//! [`SpritePass`] wraps a `wgpu::RenderPass` as the matching
//! [`DrawRecorder`].
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │ RenderPipeline                                              │
//! │                                                             │
//! │  Shader module ─── vs_main + fs_main from shader.wgsl      │
//! │                                                             │
//! │  Vertex layout ─── Vertex { position, color, uv }          │
//! │                                                             │
//! │  Bind group layouts                                         │
//! │    group 0: camera uniform (mat4x4, vertex-only)            │
//! │    group 1: texture + sampler (fragment-only)               │
//! │                                                             │
//! │  Blend state ─── ALPHA_BLENDING                             │
//! │  Primitive ─── TriangleList, CCW front face, no culling     │
//! │  Depth/stencil ─── None (draw order comes from the sort)    │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Uploading Without Stalls
//!
//! The vertex buffer is created once and reused. Each frame its contents are
//! replaced with `Queue::write_buffer`, which copies into staging memory and
//! schedules the transfer after all previously submitted work. The CPU never
//! maps memory the GPU may still be reading, which is the same guarantee
//! buffer orphaning gives in OpenGL.
//!
//! When a frame needs more bytes than the buffer holds, the old buffer is
//! dropped and a new one of the next power-of-two size takes its place. wgpu
//! keeps the old allocation alive until in-flight commands finish with it.

use std::ops::Range;

use wgpu::util::DeviceExt;

use super::batch::{DrawRecorder, SpriteBackend, VERTICES_PER_GLYPH};
use super::texture::{TextureHandle, TextureStore};
use super::vertex::{CameraUniform, Vertex};
use crate::config::BatchConfig;
use crate::error::BatchError;
use crate::math::Mat4;
use crate::render::GpuContext;

const VERTEX_SIZE: wgpu::BufferAddress = std::mem::size_of::<Vertex>() as wgpu::BufferAddress;

/// GPU resources for the sprite batch.
pub struct SpriteRenderer {
    pub(crate) device: wgpu::Device,
    pub(crate) queue: wgpu::Queue,
    pub(crate) pipeline: wgpu::RenderPipeline,
    pub(crate) texture_bind_group_layout: wgpu::BindGroupLayout,
    pub(crate) sampler: wgpu::Sampler,
    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
    vertex_buffer: Option<wgpu::Buffer>,
    /// Size of `vertex_buffer` in bytes (0 before `init`).
    vertex_capacity: wgpu::BufferAddress,
    initial_capacity: wgpu::BufferAddress,
    reallocations: u32,
}

impl SpriteRenderer {
    /// Build the sprite pipeline for the given device and target format.
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        target_format: wgpu::TextureFormat,
        config: &BatchConfig,
    ) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("sprite batch shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shader.wgsl").into()),
        });

        // Bind group layout 0: camera uniform
        let camera_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("camera bind group layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            });

        // Bind group layout 1: texture + sampler
        let texture_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("texture bind group layout"),
                entries: &[
                    wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Texture {
                            multisampled: false,
                            view_dimension: wgpu::TextureViewDimension::D2,
                            sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        },
                        count: None,
                    },
                    wgpu::BindGroupLayoutEntry {
                        binding: 1,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                        count: None,
                    },
                ],
            });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("sprite batch pipeline layout"),
            bind_group_layouts: &[&camera_bind_group_layout, &texture_bind_group_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("sprite batch pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[Vertex::LAYOUT],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: target_format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        let camera_uniform = CameraUniform {
            view_proj: Mat4::IDENTITY.to_cols_array_2d(),
        };
        let camera_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("camera uniform buffer"),
            contents: bytemuck::cast_slice(&[camera_uniform]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let camera_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("camera bind group"),
            layout: &camera_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            }],
        });

        let filter: wgpu::FilterMode = config.filter.into();
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("sprite sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            mag_filter: filter,
            min_filter: filter,
            ..Default::default()
        });

        let initial_glyphs = config.initial_glyph_capacity.max(1) as wgpu::BufferAddress;
        let initial_capacity = initial_glyphs * VERTICES_PER_GLYPH as u64 * VERTEX_SIZE;

        log::info!("Created sprite batch pipeline for {target_format:?}");

        Self {
            device: device.clone(),
            queue: queue.clone(),
            pipeline,
            texture_bind_group_layout,
            sampler,
            camera_buffer,
            camera_bind_group,
            vertex_buffer: None,
            vertex_capacity: 0,
            initial_capacity,
            reallocations: 0,
        }
    }

    /// Build the pipeline for a window's surface.
    pub fn for_surface(gpu: &GpuContext, config: &BatchConfig) -> Self {
        Self::new(&gpu.device, &gpu.queue, gpu.surface_format(), config)
    }

    /// Upload the camera's view-projection matrix. Takes effect for every
    /// draw submitted after this call.
    pub fn set_view_projection(&self, view_proj: Mat4) {
        let camera_uniform = CameraUniform {
            view_proj: view_proj.to_cols_array_2d(),
        };
        self.queue
            .write_buffer(&self.camera_buffer, 0, bytemuck::cast_slice(&[camera_uniform]));
    }

    /// Current vertex buffer size in bytes.
    pub fn vertex_capacity(&self) -> wgpu::BufferAddress {
        self.vertex_capacity
    }

    /// How many times the vertex buffer had to be replaced by a larger one.
    pub fn reallocations(&self) -> u32 {
        self.reallocations
    }

    fn create_vertex_buffer(&self, size: wgpu::BufferAddress) -> wgpu::Buffer {
        self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("sprite batch vertex buffer"),
            size,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }
}

impl SpriteBackend for SpriteRenderer {
    fn init(&mut self) -> Result<(), BatchError> {
        if self.vertex_buffer.is_none() {
            self.vertex_buffer = Some(self.create_vertex_buffer(self.initial_capacity));
            self.vertex_capacity = self.initial_capacity;
        }
        Ok(())
    }

    fn upload(&mut self, vertices: &[Vertex]) -> Result<(), BatchError> {
        if self.vertex_buffer.is_none() {
            return Err(BatchError::NotInitialized);
        }

        let bytes: &[u8] = bytemuck::cast_slice(vertices);
        let size = bytes.len() as wgpu::BufferAddress;

        if size > self.vertex_capacity {
            let capacity = size.next_power_of_two();
            log::debug!(
                "Growing sprite vertex buffer from {} to {capacity} bytes",
                self.vertex_capacity
            );
            self.vertex_buffer = Some(self.create_vertex_buffer(capacity));
            self.vertex_capacity = capacity;
            self.reallocations += 1;
        }

        if let Some(buffer) = &self.vertex_buffer {
            self.queue.write_buffer(buffer, 0, bytes);
        }
        Ok(())
    }
}

/// A render pass prepared for [`SpriteBatch::render_batch`](super::SpriteBatch::render_batch).
pub struct SpritePass<'p, 'e> {
    pass: &'p mut wgpu::RenderPass<'e>,
    renderer: &'p SpriteRenderer,
    textures: &'p TextureStore,
}

impl<'p, 'e> SpritePass<'p, 'e> {
    pub fn new(
        pass: &'p mut wgpu::RenderPass<'e>,
        renderer: &'p SpriteRenderer,
        textures: &'p TextureStore,
    ) -> Self {
        Self {
            pass,
            renderer,
            textures,
        }
    }
}

impl DrawRecorder for SpritePass<'_, '_> {
    fn bind_vertex_layout(&mut self) {
        self.pass.set_pipeline(&self.renderer.pipeline);
        self.pass.set_bind_group(0, &self.renderer.camera_bind_group, &[]);
        if let Some(buffer) = &self.renderer.vertex_buffer {
            self.pass.set_vertex_buffer(0, buffer.slice(..));
        }
    }

    fn bind_texture(&mut self, texture: TextureHandle) {
        let entry = match self.textures.get(texture) {
            Some(entry) => entry,
            None => {
                log::warn!("Unknown texture {texture:?}; drawing with the default texture");
                match self.textures.get(self.textures.default_handle()) {
                    Some(entry) => entry,
                    None => return,
                }
            }
        };
        self.pass.set_bind_group(1, &entry.bind_group, &[]);
    }

    fn draw(&mut self, vertices: Range<u32>) {
        self.pass.draw(vertices, 0..1);
    }
}
