//! Common imports: `use spritebatch::prelude::*`.

pub use crate::config::{BatchConfig, FilterMode};
pub use crate::error::BatchError;
pub use crate::math::{Mat4, Rect, Vec2};
pub use crate::render::pass::render_frame;
pub use crate::render::{ClearColor, GpuContext};
pub use crate::render2d::{
    Color, DrawRecorder, Glyph, GlyphSortType, RenderBatch, SpriteBackend, SpriteBatch,
    SpritePass, SpriteRenderer, TextureHandle, TextureStore, Vertex,
};

#[cfg(feature = "diagnostics")]
pub use crate::diag::RenderStats;
