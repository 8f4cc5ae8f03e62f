//! # Glyph — One Textured Quad
//!
//! A glyph is everything the batch needs to know about a single sprite
//! submission: the four corner vertices (already positioned, textured and
//! tinted), the texture it samples and the depth it sorts by. It is built
//! once, inside `draw`, and never modified afterwards.
//!
//! ## Corners and UVs
//!
//! ```text
//!   top_left ─────────── top_right        uv (u, v + dv) ── (u + du, v + dv)
//!      │                     │
//!      │                     │
//!   bottom_left ──────── bottom_right     uv (u, v)      ── (u + du, v)
//!   (x, y)
//! ```
//!
//! The destination origin is the bottom-left corner (Y-up). Texture rows are
//! flipped relative to that: the top edge of the quad samples `v + dv`.
//!
//! ## Rotation
//!
//! A rotated glyph spins about its own center. The corners are laid out
//! around the origin (±half extents), rotated counter-clockwise by the angle,
//! shifted back by the half extents and finally moved to the destination
//! origin. With an angle of zero this reduces to the unrotated quad.

use glam::Vec2;

use super::texture::TextureHandle;
use super::vertex::Vertex;
use super::Color;
use crate::math::Rect;

/// A fully built quad waiting to be sorted and batched.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glyph {
    pub texture: TextureHandle,
    pub depth: f32,
    pub top_left: Vertex,
    pub bottom_left: Vertex,
    pub bottom_right: Vertex,
    pub top_right: Vertex,
}

impl Glyph {
    /// Build an axis-aligned glyph covering `dest`.
    pub fn new(dest: Rect, uv: Rect, texture: TextureHandle, depth: f32, color: Color) -> Self {
        let corners = [
            Vec2::new(0.0, dest.height),
            Vec2::new(0.0, 0.0),
            Vec2::new(dest.width, 0.0),
            Vec2::new(dest.width, dest.height),
        ];
        Self::from_corners(dest, uv, texture, depth, color, corners)
    }

    /// Build a glyph covering `dest`, rotated about its center by `angle`
    /// radians (counter-clockwise positive).
    pub fn with_angle(
        dest: Rect,
        uv: Rect,
        texture: TextureHandle,
        depth: f32,
        color: Color,
        angle: f32,
    ) -> Self {
        let half = dest.half_extents();
        let corners = [
            Vec2::new(-half.x, half.y),
            Vec2::new(-half.x, -half.y),
            Vec2::new(half.x, -half.y),
            Vec2::new(half.x, half.y),
        ]
        .map(|corner| rotate_point(corner, angle) + half);
        Self::from_corners(dest, uv, texture, depth, color, corners)
    }

    /// Build a glyph rotated to face `direction`, measured from +X.
    ///
    /// The direction does not need to be normalized. A zero direction leaves
    /// the glyph unrotated.
    pub fn with_direction(
        dest: Rect,
        uv: Rect,
        texture: TextureHandle,
        depth: f32,
        color: Color,
        direction: Vec2,
    ) -> Self {
        Self::with_angle(dest, uv, texture, depth, color, direction_angle(direction))
    }

    /// The six vertices this glyph contributes to the vertex stream, in
    /// emission order (two counter-clockwise triangles).
    pub fn vertices(&self) -> [Vertex; 6] {
        [
            self.top_left,
            self.bottom_left,
            self.bottom_right,
            self.bottom_right,
            self.top_right,
            self.top_left,
        ]
    }

    /// `corners` are offsets from `dest`'s origin in top-left, bottom-left,
    /// bottom-right, top-right order.
    fn from_corners(
        dest: Rect,
        uv: Rect,
        texture: TextureHandle,
        depth: f32,
        color: Color,
        corners: [Vec2; 4],
    ) -> Self {
        let origin = dest.position();
        let [tl, bl, br, tr] = corners.map(|c| origin + c);

        let (u0, u1) = (uv.x, uv.x + uv.width);
        let (v0, v1) = (uv.y, uv.y + uv.height);

        Self {
            texture,
            depth,
            top_left: Vertex::new(tl.x, tl.y, u0, v1, color),
            bottom_left: Vertex::new(bl.x, bl.y, u0, v0, color),
            bottom_right: Vertex::new(br.x, br.y, u1, v0, color),
            top_right: Vertex::new(tr.x, tr.y, u1, v1, color),
        }
    }
}

/// Rotate `point` about the origin by `angle` radians.
fn rotate_point(point: Vec2, angle: f32) -> Vec2 {
    let (sin, cos) = angle.sin_cos();
    Vec2::new(point.x * cos - point.y * sin, point.x * sin + point.y * cos)
}

/// Angle of `direction` from the +X axis, in (-π, π].
fn direction_angle(direction: Vec2) -> f32 {
    let Some(dir) = direction.try_normalize() else {
        return 0.0;
    };
    let angle = dir.dot(Vec2::X).clamp(-1.0, 1.0).acos();
    if dir.y < 0.0 { -angle } else { angle }
}
