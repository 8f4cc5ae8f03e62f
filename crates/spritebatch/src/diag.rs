//! Per-frame render statistics.
//!
//! Enabled by the `diagnostics` feature flag. Every [`SpriteBatch::end`]
//! records what the frame cost, so a game can put the numbers in an overlay
//! or ship them as JSON to an external viewer.
//!
//! [`SpriteBatch::end`]: crate::render2d::SpriteBatch::end

use serde::Serialize;

/// Counters for the most recent frame plus a few running totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RenderStats {
    /// Glyphs submitted in the last frame.
    pub glyphs: u32,
    /// Draw calls the last frame will issue (one per render batch).
    pub draw_calls: u32,
    /// Vertices uploaded for the last frame.
    pub vertices: u32,
    /// Frames batched since creation.
    pub frames: u64,
    /// Largest glyph count seen in any single frame.
    pub peak_glyphs: u32,
}

impl RenderStats {
    pub(crate) fn record_frame(&mut self, glyphs: usize, draw_calls: usize, vertices: usize) {
        self.glyphs = saturate(glyphs);
        self.draw_calls = saturate(draw_calls);
        self.vertices = saturate(vertices);
        self.frames += 1;
        self.peak_glyphs = self.peak_glyphs.max(self.glyphs);
    }

    /// Serialize to a compact JSON object.
    pub fn to_json(&self) -> String {
        // A struct of plain integers cannot fail to serialize.
        serde_json::to_string(self).unwrap_or_default()
    }
}

/// Counters stick at `u32::MAX` instead of wrapping.
fn saturate(count: usize) -> u32 {
    u32::try_from(count).unwrap_or(u32::MAX)
}
