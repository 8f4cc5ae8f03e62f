//! # Render2d — Immediate-Mode Sprite Batching
//!
//! A sprite batcher turns a frame's worth of textured rectangles into as few
//! GPU draw calls as the requested ordering allows. Nothing is retained
//! between frames: every frame starts empty, is filled with `draw` calls, and
//! is turned into draw calls once.
//!
//! ## Architecture
//!
//! ```text
//!   begin(sort)          draw* ──► Glyph (4 vertices + texture + depth)
//!        │                              │
//!        ▼                              ▼
//!   ┌─────────────────────────────────────────┐
//!   │ end()                                    │
//!   │  1. stable-sort glyph indices by policy  │
//!   │  2. merge same-texture runs → batches    │
//!   │  3. emit 6 vertices per glyph            │
//!   │  4. one upload to the vertex buffer      │
//!   └────────────────────┬────────────────────┘
//!                        ▼
//!   ┌─────────────────────────────────────────┐
//!   │ render_batch()                           │
//!   │  bind layout once, then per batch:       │
//!   │  bind texture, draw(offset..offset+n)    │
//!   └─────────────────────────────────────────┘
//! ```
//!
//! ## Design Decisions
//!
//! **CPU-side vertices.** Every glyph's corners are computed on the CPU at
//! `draw` time, rotation included. The shader only applies the camera's
//! view-projection. Sprites with different transforms but the same texture
//! can therefore share one draw call.
//!
//! **Ordering is a policy.** `Texture` sorting minimizes draw calls;
//! `BackToFront` gives correct alpha layering at the cost of breaking batches
//! wherever textures alternate in depth order. The caller picks per frame.
//!
//! **No depth buffer.** Draw order comes entirely from the sort, which is
//! what alpha blending needs anyway.

pub(crate) mod batch;
pub(crate) mod glyph;
pub(crate) mod pipeline;
pub(crate) mod sort;
pub(crate) mod texture;
pub(crate) mod vertex;

pub use batch::{DrawRecorder, RenderBatch, SpriteBackend, SpriteBatch, VERTICES_PER_GLYPH};
pub use glyph::Glyph;
pub use pipeline::{SpritePass, SpriteRenderer};
pub use sort::GlyphSortType;
pub use texture::{TextureHandle, TextureStore};
pub use vertex::Vertex;

/// An RGBA color with 8 bits per channel.
///
/// Stored in the vertex as four bytes; the GPU normalizes each to [0, 1] and
/// multiplies the texture sample by it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Self = Self::rgba(255, 255, 255, 255);
    pub const BLACK: Self = Self::rgba(0, 0, 0, 255);
    pub const RED: Self = Self::rgba(255, 0, 0, 255);
    pub const GREEN: Self = Self::rgba(0, 255, 0, 255);
    pub const BLUE: Self = Self::rgba(0, 0, 255, 255);
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);

    /// Create a color from RGB (alpha = 255).
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    /// Create a color from RGBA.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create a color from floating-point channels in [0, 1]. Out-of-range
    /// values are clamped.
    pub fn from_f32(r: f32, g: f32, b: f32, a: f32) -> Self {
        let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        Self::rgba(channel(r), channel(g), channel(b), channel(a))
    }

    pub(crate) fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}
