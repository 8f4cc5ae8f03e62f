//! # Vertex — Per-Corner Data Sent to the GPU
//!
//! Every glyph is two triangles, six vertices. Each vertex carries what the
//! sprite shader needs: a position, a tint color and a texture coordinate.
//! They are packed into a flat struct and uploaded to the batch's vertex
//! buffer once per frame.
//!
//! ## Memory Layout
//!
//! `#[repr(C)]` fixes the field order and padding, and the `bytemuck` traits
//! let us cast `&[Vertex]` to `&[u8]` for upload without copying.
//!
//! ```text
//! Vertex (20 bytes per vertex)
//! ┌────────────────┬──────────────┬──────────────┐
//! │ position       │ color        │ uv           │
//! │ [f32; 2]       │ [u8; 4]      │ [f32; 2]     │
//! │ 8 bytes        │ 4 bytes      │ 8 bytes      │
//! │ offset 0       │ offset 8     │ offset 12    │
//! │ location(0)    │ location(1)  │ location(2)  │
//! └────────────────┴──────────────┴──────────────┘
//! ```
//!
//! The color is stored as four bytes and read by the GPU as `Unorm8x4`, so the
//! shader sees each channel as a float in [0, 1]. Any shader used with the
//! batch must declare its inputs in exactly this slot order.

use bytemuck::{Pod, Zeroable};

use super::Color;

/// One corner of a glyph as it appears in the vertex buffer.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [u8; 4],
    pub uv: [f32; 2],
}

impl Vertex {
    pub const LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &[
            // position
            wgpu::VertexAttribute {
                offset: 0,
                shader_location: 0,
                format: wgpu::VertexFormat::Float32x2,
            },
            // color
            wgpu::VertexAttribute {
                offset: 8,
                shader_location: 1,
                format: wgpu::VertexFormat::Unorm8x4,
            },
            // uv
            wgpu::VertexAttribute {
                offset: 12,
                shader_location: 2,
                format: wgpu::VertexFormat::Float32x2,
            },
        ],
    };

    pub fn new(x: f32, y: f32, u: f32, v: f32, color: Color) -> Self {
        Self {
            position: [x, y],
            color: color.to_array(),
            uv: [u, v],
        }
    }
}

/// Camera view-projection matrix uploaded as a uniform buffer.
#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable)]
pub(crate) struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
}
