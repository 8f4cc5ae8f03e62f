//! Sort policies for the glyphs of one frame.
//!
//! The policy decides both the visual draw order and how much merging the
//! batcher can do afterwards. All sorting is stable, so glyphs with equal keys
//! keep their submission order; that is what lets texture-by-texture
//! submission collapse into one draw call per texture.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::glyph::Glyph;

/// How [`SpriteBatch::end`](super::SpriteBatch::end) orders glyphs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GlyphSortType {
    /// Keep submission order.
    None,
    /// Smallest depth first.
    FrontToBack,
    /// Largest depth first. Use this for alpha-blended layering.
    BackToFront,
    /// Group by texture handle, ascending. Fewest draw calls.
    #[default]
    Texture,
}

impl GlyphSortType {
    /// Compare two glyphs under this policy.
    ///
    /// Depth uses IEEE total ordering so NaN depths cannot break the sort.
    pub fn compare(self, a: &Glyph, b: &Glyph) -> Ordering {
        match self {
            GlyphSortType::None => Ordering::Equal,
            GlyphSortType::FrontToBack => a.depth.total_cmp(&b.depth),
            GlyphSortType::BackToFront => b.depth.total_cmp(&a.depth),
            GlyphSortType::Texture => a.texture.cmp(&b.texture),
        }
    }

    /// Stable-sort `order`, a list of indices into `glyphs`.
    pub(crate) fn sort_indices(self, glyphs: &[Glyph], order: &mut [usize]) {
        if self == GlyphSortType::None {
            return;
        }
        order.sort_by(|&a, &b| self.compare(&glyphs[a], &glyphs[b]));
    }
}
