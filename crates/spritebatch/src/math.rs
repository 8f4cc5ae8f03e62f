//! Math types and glam re-exports.
//!
//! We re-export [glam](https://docs.rs/glam) types so users don't need to
//! depend on it directly. [`Rect`] is the one rectangle type used for both the
//! destination of a sprite and the texture region it samples.

pub use glam::{Mat4, Vec2};

/// An axis-aligned rectangle given by its origin and size.
///
/// As a destination rectangle the origin is the bottom-left corner in world
/// units (Y-up). As a UV rectangle it is `(u, v, du, dv)` in texture space,
/// where `(0, 0)..(1, 1)` covers the whole texture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    /// The full texture (0,0) to (1,1).
    pub const FULL: Self = Self::new(0.0, 0.0, 1.0, 1.0);

    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Build a rectangle of `size` whose origin is at `position`.
    pub fn from_position_size(position: Vec2, size: Vec2) -> Self {
        Self::new(position.x, position.y, size.x, size.y)
    }

    /// Build a UV rectangle from pixel coordinates and texture dimensions.
    ///
    /// Useful for picking a single frame out of a sprite sheet.
    pub fn from_pixels(x: f32, y: f32, w: f32, h: f32, tex_w: f32, tex_h: f32) -> Self {
        Self::new(x / tex_w, y / tex_h, w / tex_w, h / tex_h)
    }

    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Half of the size, i.e. the offset from the origin to the center.
    pub fn half_extents(&self) -> Vec2 {
        self.size() * 0.5
    }
}

impl Default for Rect {
    fn default() -> Self {
        Self::FULL
    }
}
