//! # spritebatch — Immediate-Mode 2D Sprite Batching for wgpu
//!
//! Submit any number of textured quads per frame and get back the smallest
//! ordered set of draw calls that honors the chosen sort policy: grouped by
//! texture for throughput, or by depth for correct alpha layering.
//!
//! Start with `use spritebatch::prelude::*`, build a
//! [`SpriteRenderer`](render2d::SpriteRenderer), wrap it in a
//! [`SpriteBatch`](render2d::SpriteBatch), and each frame call `begin`,
//! `draw`…, `end`, `render_batch`.

pub mod config;
pub mod error;
pub mod math;
pub mod prelude;
pub mod render;
pub mod render2d;

#[cfg(feature = "diagnostics")]
pub mod diag;
