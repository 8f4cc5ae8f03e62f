//! # Batch — Collect, Sort, and Merge Glyphs into Draw Calls
//!
//! This module is the CPU-side heart of the 2D renderer. Each frame it:
//! 1. Collects one [`Glyph`] per `draw` call
//! 2. Stable-sorts indices into that glyph list by the frame's [`GlyphSortType`]
//! 3. Walks the sorted list, merging consecutive same-texture glyphs into one
//!    [`RenderBatch`]
//! 4. Emits six vertices per glyph in sorted order and hands the whole stream
//!    to the backend in a single upload
//!
//! ## Why Batching Matters
//!
//! Every draw call carries CPU overhead: the driver validates state, the GPU
//! may stall between draws. 500 sprites in 500 draw calls is much slower than
//! 500 sprites in 3 draw calls (one per texture). Batching converts the former
//! into the latter by making every texture run one contiguous vertex range.
//!
//! ## Frame Protocol
//!
//! ```text
//!   Idle ──begin──► Recording ──end──► Batched ──render_batch──► (Batched)
//!    ▲                 │  ▲                │
//!    │                 └──┘ draw*          │
//!    └──────────────── begin ◄─────────────┘
//! ```
//!
//! Out-of-order calls return a [`BatchError`] instead of drawing garbage.
//!
//! ## Indices, Not References
//!
//! Sorting moves `usize` indices into the glyph list, never the glyphs
//! themselves. The glyph list is not touched between `end` and the next
//! `begin`, so every index stays valid, and the glyphs themselves are never
//! copied during the sort.
//!
//! ## Backends
//!
//! The batcher itself never touches the GPU. Uploads go through a
//! [`SpriteBackend`], draw calls through a [`DrawRecorder`]. The wgpu
//! implementations live in [`pipeline`](super::pipeline); tests use recording
//! fakes.

use std::cell::Cell;
use std::ops::Range;

use glam::Vec2;

use super::glyph::Glyph;
use super::sort::GlyphSortType;
use super::texture::TextureHandle;
use super::vertex::Vertex;
use super::Color;
use crate::config::BatchConfig;
use crate::error::BatchError;
use crate::math::Rect;

/// Vertices per glyph: two triangles.
pub const VERTICES_PER_GLYPH: u32 = 6;

/// A contiguous run of the uploaded vertex buffer that shares one texture and
/// is drawn with a single draw call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderBatch {
    /// First vertex of the run.
    pub offset: u32,
    pub vertex_count: u32,
    pub texture: TextureHandle,
}

impl RenderBatch {
    /// The vertex range this batch draws.
    pub fn range(&self) -> Range<u32> {
        self.offset..self.offset + self.vertex_count
    }
}

/// Owner of the persistent GPU vertex buffer.
pub trait SpriteBackend {
    /// One-time buffer and layout setup.
    fn init(&mut self) -> Result<(), BatchError>;

    /// Replace the whole buffer contents with `vertices`. Must never block on
    /// the GPU still reading the previous frame's data.
    fn upload(&mut self, vertices: &[Vertex]) -> Result<(), BatchError>;
}

/// Receives the draw calls of one [`SpriteBatch::render_batch`].
pub trait DrawRecorder {
    /// Bind pipeline, vertex layout and vertex buffer. Called once per render.
    fn bind_vertex_layout(&mut self);

    fn bind_texture(&mut self, texture: TextureHandle);

    /// Draw the given vertex range as a triangle list.
    fn draw(&mut self, vertices: Range<u32>);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    Recording,
    Batched,
}

/// Immediate-mode sprite batcher.
///
/// ```ignore
/// batch.begin(GlyphSortType::Texture)?;
/// batch.draw(dest, Rect::FULL, texture, 0.0, Color::WHITE)?;
/// batch.end()?;
/// batch.render_batch(&mut pass)?;
/// ```
pub struct SpriteBatch<B: SpriteBackend> {
    backend: B,
    glyphs: Vec<Glyph>,
    /// Indices into `glyphs` in draw order. Rebuilt every `end`.
    order: Vec<usize>,
    vertices: Vec<Vertex>,
    render_batches: Vec<RenderBatch>,
    sort_type: GlyphSortType,
    default_sort: GlyphSortType,
    phase: Phase,
    /// Set by `render_batch`, cleared by `end`.
    rendered: Cell<bool>,
    #[cfg(feature = "diagnostics")]
    stats: crate::diag::RenderStats,
}

impl<B: SpriteBackend> SpriteBatch<B> {
    /// Create a batch that uploads and draws through `backend`.
    pub fn new(backend: B, config: &BatchConfig) -> Self {
        let capacity = config.initial_glyph_capacity;
        Self {
            backend,
            glyphs: Vec::with_capacity(capacity),
            order: Vec::with_capacity(capacity),
            vertices: Vec::with_capacity(capacity * VERTICES_PER_GLYPH as usize),
            render_batches: Vec::new(),
            sort_type: config.default_sort,
            default_sort: config.default_sort,
            phase: Phase::Idle,
            rendered: Cell::new(false),
            #[cfg(feature = "diagnostics")]
            stats: crate::diag::RenderStats::default(),
        }
    }

    /// Set up the backend's GPU buffer. Call once before the first frame.
    pub fn init(&mut self) -> Result<(), BatchError> {
        self.backend.init()
    }

    /// Start a new frame. Discards the previous frame's glyphs and batches.
    pub fn begin(&mut self, sort_type: GlyphSortType) -> Result<(), BatchError> {
        if self.phase == Phase::Recording {
            return Err(BatchError::AlreadyRecording);
        }
        if self.has_unrendered_frame() {
            log::debug!(
                "Discarding {} unrendered batches from the previous frame",
                self.render_batches.len()
            );
        }

        self.sort_type = sort_type;
        self.glyphs.clear();
        self.render_batches.clear();
        self.phase = Phase::Recording;
        Ok(())
    }

    /// [`begin`](Self::begin) with the configured default sort policy.
    pub fn begin_default(&mut self) -> Result<(), BatchError> {
        self.begin(self.default_sort)
    }

    /// Queue an axis-aligned sprite.
    pub fn draw(
        &mut self,
        dest: Rect,
        uv: Rect,
        texture: TextureHandle,
        depth: f32,
        color: Color,
    ) -> Result<(), BatchError> {
        self.push(Glyph::new(dest, uv, texture, depth, color))
    }

    /// Queue a sprite rotated about its center by `angle` radians.
    pub fn draw_rotated(
        &mut self,
        dest: Rect,
        uv: Rect,
        texture: TextureHandle,
        depth: f32,
        color: Color,
        angle: f32,
    ) -> Result<(), BatchError> {
        self.push(Glyph::with_angle(dest, uv, texture, depth, color, angle))
    }

    /// Queue a sprite rotated to face `direction` (need not be normalized).
    pub fn draw_facing(
        &mut self,
        dest: Rect,
        uv: Rect,
        texture: TextureHandle,
        depth: f32,
        color: Color,
        direction: Vec2,
    ) -> Result<(), BatchError> {
        self.push(Glyph::with_direction(dest, uv, texture, depth, color, direction))
    }

    /// Queue an already-built glyph.
    pub fn push(&mut self, glyph: Glyph) -> Result<(), BatchError> {
        if self.phase != Phase::Recording {
            return Err(BatchError::NotRecording);
        }
        self.glyphs.push(glyph);
        Ok(())
    }

    /// Sort the frame's glyphs, build the render batches and upload the
    /// vertex stream. An empty frame uploads nothing.
    ///
    /// If the upload fails the frame stays open with its glyphs intact and no
    /// batches, so `end` can be retried.
    pub fn end(&mut self) -> Result<(), BatchError> {
        if self.phase != Phase::Recording {
            return Err(BatchError::NotRecording);
        }

        self.order.clear();
        self.order.extend(0..self.glyphs.len());
        self.sort_type.sort_indices(&self.glyphs, &mut self.order);

        self.create_render_batches();

        if !self.vertices.is_empty() {
            if let Err(e) = self.backend.upload(&self.vertices) {
                self.vertices.clear();
                self.render_batches.clear();
                return Err(e);
            }
        }

        #[cfg(feature = "diagnostics")]
        self.stats.record_frame(
            self.glyphs.len(),
            self.render_batches.len(),
            self.vertices.len(),
        );

        log::trace!(
            "Batched {} glyphs into {} draw calls ({:?})",
            self.glyphs.len(),
            self.render_batches.len(),
            self.sort_type
        );

        self.phase = Phase::Batched;
        self.rendered.set(false);
        Ok(())
    }

    /// Issue one draw call per render batch. Requires a preceding `end`; an
    /// empty frame records nothing at all.
    pub fn render_batch(&self, recorder: &mut impl DrawRecorder) -> Result<(), BatchError> {
        if self.phase != Phase::Batched {
            return Err(BatchError::NotBatched);
        }
        self.rendered.set(true);
        if self.render_batches.is_empty() {
            return Ok(());
        }

        recorder.bind_vertex_layout();
        for batch in &self.render_batches {
            recorder.bind_texture(batch.texture);
            recorder.draw(batch.range());
        }
        Ok(())
    }

    /// An ended frame with draw calls that `render_batch` never issued.
    fn has_unrendered_frame(&self) -> bool {
        self.phase == Phase::Batched && !self.rendered.get() && !self.render_batches.is_empty()
    }

    /// Walk the sorted glyphs, emitting vertices and extending the current
    /// batch while the texture stays the same.
    fn create_render_batches(&mut self) {
        self.vertices.clear();
        self.render_batches.clear();
        self.vertices.reserve(self.order.len() * VERTICES_PER_GLYPH as usize);

        let mut offset = 0u32;
        for &index in &self.order {
            let glyph = &self.glyphs[index];

            match self.render_batches.last_mut() {
                Some(last) if last.texture == glyph.texture => {
                    last.vertex_count += VERTICES_PER_GLYPH;
                }
                _ => self.render_batches.push(RenderBatch {
                    offset,
                    vertex_count: VERTICES_PER_GLYPH,
                    texture: glyph.texture,
                }),
            }

            self.vertices.extend_from_slice(&glyph.vertices());
            offset += VERTICES_PER_GLYPH;
        }
    }

    /// This frame's draw-call descriptors, in draw order.
    pub fn render_batches(&self) -> &[RenderBatch] {
        &self.render_batches
    }

    /// This frame's vertex stream, as last uploaded.
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Glyphs queued this frame, in submission order.
    pub fn glyphs(&self) -> &[Glyph] {
        &self.glyphs
    }

    /// Indices into [`glyphs`](Self::glyphs) in draw order (valid after `end`).
    pub fn draw_order(&self) -> &[usize] {
        &self.order
    }

    pub fn sort_type(&self) -> GlyphSortType {
        self.sort_type
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    #[cfg(feature = "diagnostics")]
    pub fn stats(&self) -> &crate::diag::RenderStats {
        &self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records uploads instead of talking to a GPU.
    #[derive(Default)]
    struct FakeBackend {
        initialized: bool,
        uploads: Vec<Vec<Vertex>>,
    }

    impl SpriteBackend for FakeBackend {
        fn init(&mut self) -> Result<(), BatchError> {
            self.initialized = true;
            Ok(())
        }

        fn upload(&mut self, vertices: &[Vertex]) -> Result<(), BatchError> {
            if !self.initialized {
                return Err(BatchError::NotInitialized);
            }
            self.uploads.push(vertices.to_vec());
            Ok(())
        }
    }

    #[derive(Debug, PartialEq)]
    enum Call {
        BindLayout,
        BindTexture(TextureHandle),
        Draw(Range<u32>),
    }

    #[derive(Default)]
    struct FakePass {
        calls: Vec<Call>,
    }

    impl DrawRecorder for FakePass {
        fn bind_vertex_layout(&mut self) {
            self.calls.push(Call::BindLayout);
        }

        fn bind_texture(&mut self, texture: TextureHandle) {
            self.calls.push(Call::BindTexture(texture));
        }

        fn draw(&mut self, vertices: Range<u32>) {
            self.calls.push(Call::Draw(vertices));
        }
    }

    fn new_batch() -> SpriteBatch<FakeBackend> {
        let mut batch = SpriteBatch::new(FakeBackend::default(), &BatchConfig::default());
        batch.init().unwrap();
        batch
    }

    /// Draw a 1x1 sprite at `(x, 0)` so glyphs can be told apart by position.
    fn draw_at(batch: &mut SpriteBatch<FakeBackend>, x: f32, texture: usize, depth: f32) {
        batch
            .draw(Rect::new(x, 0.0, 1.0, 1.0), Rect::FULL, TextureHandle(texture), depth, Color::WHITE)
            .unwrap();
    }

    /// X position of each drawn glyph, in draw order.
    fn drawn_xs(batch: &SpriteBatch<FakeBackend>) -> Vec<f32> {
        batch
            .vertices()
            .chunks(VERTICES_PER_GLYPH as usize)
            .map(|quad| quad[1].position[0])
            .collect()
    }

    fn assert_tiles_buffer(batch: &SpriteBatch<FakeBackend>) {
        let mut expected_offset = 0;
        for rb in batch.render_batches() {
            assert_eq!(rb.offset, expected_offset, "gap or overlap at {rb:?}");
            expected_offset += rb.vertex_count;
        }
        assert_eq!(expected_offset as usize, batch.vertices().len());
    }

    #[test]
    fn vertex_count_is_six_per_glyph() {
        let mut batch = new_batch();
        batch.begin(GlyphSortType::Texture).unwrap();
        for i in 0..17 {
            draw_at(&mut batch, i as f32, i % 4, 0.0);
        }
        batch.end().unwrap();

        assert_eq!(batch.vertices().len(), 6 * 17);
        assert_eq!(batch.backend().uploads.len(), 1);
        assert_eq!(batch.backend().uploads[0].len(), 6 * 17);
        let total: u32 = batch.render_batches().iter().map(|rb| rb.vertex_count).sum();
        assert_eq!(total, 6 * 17);
        assert_tiles_buffer(&batch);
    }

    #[test]
    fn grouped_textures_give_one_batch_per_texture() {
        let mut batch = new_batch();
        batch.begin(GlyphSortType::Texture).unwrap();
        for texture in [4, 4, 4, 7, 7, 9] {
            draw_at(&mut batch, 0.0, texture, 0.0);
        }
        batch.end().unwrap();

        let textures: Vec<_> = batch.render_batches().iter().map(|rb| rb.texture).collect();
        assert_eq!(textures, vec![TextureHandle(4), TextureHandle(7), TextureHandle(9)]);
        assert_eq!(batch.render_batches()[0].vertex_count, 18);
        assert_eq!(batch.render_batches()[1].vertex_count, 12);
        assert_eq!(batch.render_batches()[2].vertex_count, 6);
        assert_tiles_buffer(&batch);
    }

    #[test]
    fn texture_sort_merges_interleaved_submissions() {
        let mut batch = new_batch();
        batch.begin(GlyphSortType::Texture).unwrap();
        for texture in [2, 1, 2, 1, 2] {
            draw_at(&mut batch, 0.0, texture, 0.0);
        }
        batch.end().unwrap();

        assert_eq!(
            batch.render_batches(),
            &[
                RenderBatch { offset: 0, vertex_count: 12, texture: TextureHandle(1) },
                RenderBatch { offset: 12, vertex_count: 18, texture: TextureHandle(2) },
            ]
        );
    }

    #[test]
    fn equal_texture_keys_keep_submission_order() {
        let mut batch = new_batch();
        batch.begin(GlyphSortType::Texture).unwrap();
        draw_at(&mut batch, 0.0, 1, 5.0); // A
        draw_at(&mut batch, 1.0, 1, 2.0); // B
        batch.end().unwrap();

        assert_eq!(batch.draw_order(), &[0, 1]);
        assert_eq!(drawn_xs(&batch), vec![0.0, 1.0]);
        assert_eq!(
            batch.render_batches(),
            &[RenderBatch { offset: 0, vertex_count: 12, texture: TextureHandle(1) }]
        );
    }

    #[test]
    fn front_to_back_orders_by_ascending_depth() {
        let mut batch = new_batch();
        batch.begin(GlyphSortType::FrontToBack).unwrap();
        draw_at(&mut batch, 3.0, 1, 3.0);
        draw_at(&mut batch, 1.0, 2, 1.0);
        draw_at(&mut batch, 2.0, 3, 2.0);
        batch.end().unwrap();

        assert_eq!(drawn_xs(&batch), vec![1.0, 2.0, 3.0]);
        let textures: Vec<_> = batch.render_batches().iter().map(|rb| rb.texture.0).collect();
        assert_eq!(textures, vec![2, 3, 1]);
        assert_eq!(batch.render_batches().len(), 3);
    }

    #[test]
    fn back_to_front_orders_by_descending_depth() {
        let mut batch = new_batch();
        batch.begin(GlyphSortType::BackToFront).unwrap();
        draw_at(&mut batch, 3.0, 1, 3.0);
        draw_at(&mut batch, 1.0, 2, 1.0);
        draw_at(&mut batch, 2.0, 3, 2.0);
        batch.end().unwrap();

        assert_eq!(drawn_xs(&batch), vec![3.0, 2.0, 1.0]);
    }

    #[test]
    fn equal_depth_different_texture_does_not_merge() {
        let mut batch = new_batch();
        batch.begin(GlyphSortType::FrontToBack).unwrap();
        draw_at(&mut batch, 0.0, 1, 1.0);
        draw_at(&mut batch, 1.0, 2, 1.0);
        draw_at(&mut batch, 2.0, 1, 1.0);
        batch.end().unwrap();

        assert_eq!(batch.render_batches().len(), 3);
        assert_tiles_buffer(&batch);
    }

    #[test]
    fn depth_sort_still_merges_adjacent_same_texture() {
        let mut batch = new_batch();
        batch.begin(GlyphSortType::BackToFront).unwrap();
        draw_at(&mut batch, 0.0, 5, 1.0);
        draw_at(&mut batch, 1.0, 5, 2.0);
        draw_at(&mut batch, 2.0, 6, 0.5);
        batch.end().unwrap();

        assert_eq!(
            batch.render_batches(),
            &[
                RenderBatch { offset: 0, vertex_count: 12, texture: TextureHandle(5) },
                RenderBatch { offset: 12, vertex_count: 6, texture: TextureHandle(6) },
            ]
        );
    }

    #[test]
    fn render_issues_one_draw_per_batch() {
        let mut batch = new_batch();
        batch.begin(GlyphSortType::Texture).unwrap();
        for texture in [3, 3, 8] {
            draw_at(&mut batch, 0.0, texture, 0.0);
        }
        batch.end().unwrap();

        let mut pass = FakePass::default();
        batch.render_batch(&mut pass).unwrap();
        assert_eq!(
            pass.calls,
            vec![
                Call::BindLayout,
                Call::BindTexture(TextureHandle(3)),
                Call::Draw(0..12),
                Call::BindTexture(TextureHandle(8)),
                Call::Draw(12..18),
            ]
        );
    }

    #[test]
    fn empty_frame_uploads_and_draws_nothing() {
        let mut batch = new_batch();
        batch.begin(GlyphSortType::Texture).unwrap();
        batch.end().unwrap();

        let mut pass = FakePass::default();
        batch.render_batch(&mut pass).unwrap();

        assert!(batch.backend().uploads.is_empty());
        assert!(batch.render_batches().is_empty());
        assert!(pass.calls.is_empty());
    }

    #[test]
    fn empty_frame_works_without_init() {
        let mut batch = SpriteBatch::new(FakeBackend::default(), &BatchConfig::default());
        batch.begin(GlyphSortType::Texture).unwrap();
        batch.end().unwrap();
        batch.render_batch(&mut FakePass::default()).unwrap();
    }

    #[test]
    fn same_input_gives_identical_batches() {
        let mut batch = new_batch();
        let mut frames = Vec::new();
        for _ in 0..2 {
            batch.begin(GlyphSortType::Texture).unwrap();
            for (i, texture) in [5, 1, 5, 3, 1, 3, 5].into_iter().enumerate() {
                draw_at(&mut batch, i as f32, texture, (i % 3) as f32);
            }
            batch.end().unwrap();
            frames.push((batch.render_batches().to_vec(), batch.vertices().to_vec()));
        }
        assert_eq!(frames[0], frames[1]);
    }

    #[test]
    fn begin_clears_previous_frame() {
        let mut batch = new_batch();
        batch.begin(GlyphSortType::Texture).unwrap();
        draw_at(&mut batch, 0.0, 1, 0.0);
        batch.end().unwrap();
        batch.render_batch(&mut FakePass::default()).unwrap();

        batch.begin(GlyphSortType::FrontToBack).unwrap();
        assert!(batch.glyphs().is_empty());
        assert!(batch.render_batches().is_empty());
        assert_eq!(batch.sort_type(), GlyphSortType::FrontToBack);
    }

    #[test]
    fn begin_default_uses_configured_sort() {
        let config = BatchConfig {
            default_sort: GlyphSortType::BackToFront,
            ..BatchConfig::default()
        };
        let mut batch = SpriteBatch::new(FakeBackend::default(), &config);
        batch.begin(GlyphSortType::Texture).unwrap();
        batch.end().unwrap();
        batch.begin_default().unwrap();
        assert_eq!(batch.sort_type(), GlyphSortType::BackToFront);
    }

    #[test]
    fn out_of_order_calls_are_rejected() {
        let mut batch = new_batch();

        let err = batch.draw(Rect::FULL, Rect::FULL, TextureHandle(0), 0.0, Color::WHITE);
        assert!(matches!(err, Err(BatchError::NotRecording)));
        assert!(matches!(batch.end(), Err(BatchError::NotRecording)));
        assert!(matches!(
            batch.render_batch(&mut FakePass::default()),
            Err(BatchError::NotBatched)
        ));

        batch.begin(GlyphSortType::Texture).unwrap();
        assert!(matches!(
            batch.begin(GlyphSortType::Texture),
            Err(BatchError::AlreadyRecording)
        ));
        assert!(matches!(
            batch.render_batch(&mut FakePass::default()),
            Err(BatchError::NotBatched)
        ));
    }

    #[test]
    fn begin_after_unrendered_end_is_allowed() {
        let mut batch = new_batch();
        batch.begin(GlyphSortType::Texture).unwrap();
        draw_at(&mut batch, 0.0, 1, 0.0);
        batch.end().unwrap();
        assert!(batch.has_unrendered_frame());

        batch.begin(GlyphSortType::Texture).unwrap();
        assert!(batch.render_batches().is_empty());
    }

    #[test]
    fn rendered_frames_are_not_reported_as_discarded() {
        let mut batch = new_batch();
        for _ in 0..3 {
            assert!(!batch.has_unrendered_frame());
            batch.begin(GlyphSortType::Texture).unwrap();
            draw_at(&mut batch, 0.0, 1, 0.0);
            batch.end().unwrap();
            assert!(batch.has_unrendered_frame());
            batch.render_batch(&mut FakePass::default()).unwrap();
            assert!(!batch.has_unrendered_frame());
        }
    }

    #[test]
    fn render_batch_can_be_reissued() {
        let mut batch = new_batch();
        batch.begin(GlyphSortType::Texture).unwrap();
        for texture in [2, 1, 2] {
            draw_at(&mut batch, 0.0, texture, 0.0);
        }
        batch.end().unwrap();

        let mut first = FakePass::default();
        let mut second = FakePass::default();
        batch.render_batch(&mut first).unwrap();
        batch.render_batch(&mut second).unwrap();

        assert_eq!(first.calls.len(), 5);
        assert_eq!(first.calls, second.calls);
        assert_eq!(batch.backend().uploads.len(), 1);
    }

    #[test]
    fn upload_before_init_is_an_error() {
        let mut batch = SpriteBatch::new(FakeBackend::default(), &BatchConfig::default());
        batch.begin(GlyphSortType::Texture).unwrap();
        draw_at(&mut batch, 0.0, 1, 0.0);
        assert!(matches!(batch.end(), Err(BatchError::NotInitialized)));
        assert!(batch.render_batches().is_empty());
        assert!(batch.vertices().is_empty());
        assert!(matches!(
            batch.render_batch(&mut FakePass::default()),
            Err(BatchError::NotBatched)
        ));

        // The frame is still open, so a retry after init goes through.
        batch.init().unwrap();
        batch.end().unwrap();
        assert_eq!(batch.render_batches().len(), 1);
        assert_eq!(batch.backend().uploads.len(), 1);
    }

    #[test]
    fn rotated_and_facing_draws_are_batched_like_plain_ones() {
        let mut batch = new_batch();
        batch.begin(GlyphSortType::Texture).unwrap();
        let dest = Rect::new(0.0, 0.0, 2.0, 2.0);
        batch.draw(dest, Rect::FULL, TextureHandle(1), 0.0, Color::WHITE).unwrap();
        batch.draw_rotated(dest, Rect::FULL, TextureHandle(1), 0.0, Color::WHITE, 0.3).unwrap();
        batch.draw_facing(dest, Rect::FULL, TextureHandle(1), 0.0, Color::WHITE, Vec2::new(0.0, -4.0)).unwrap();
        batch.end().unwrap();

        assert_eq!(batch.render_batches().len(), 1);
        assert_eq!(batch.render_batches()[0].vertex_count, 18);
    }

    #[cfg(feature = "diagnostics")]
    #[test]
    fn stats_track_last_frame() {
        let mut batch = new_batch();
        batch.begin(GlyphSortType::Texture).unwrap();
        for texture in [1, 2, 2] {
            draw_at(&mut batch, 0.0, texture, 0.0);
        }
        batch.end().unwrap();

        let stats = batch.stats();
        assert_eq!(stats.glyphs, 3);
        assert_eq!(stats.draw_calls, 2);
        assert_eq!(stats.vertices, 18);
    }
}
