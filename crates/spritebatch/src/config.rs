//! Batch configuration.
//!
//! [`BatchConfig`] collects the few knobs the sprite batcher exposes. It is
//! plain serde data so it can live in a JSON file next to the game's other
//! settings; every field has a default, so a partial (or empty) file is valid.
//!
//! ```json
//! { "initial_glyph_capacity": 4096, "default_sort": "front_to_back", "filter": "linear" }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::BatchError;
use crate::render2d::GlyphSortType;

/// Texture filtering used by the sprite sampler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterMode {
    /// Crisp pixels. The right choice for pixel art.
    #[default]
    Nearest,
    /// Bilinear filtering.
    Linear,
}

impl From<FilterMode> for wgpu::FilterMode {
    fn from(mode: FilterMode) -> Self {
        match mode {
            FilterMode::Nearest => wgpu::FilterMode::Nearest,
            FilterMode::Linear => wgpu::FilterMode::Linear,
        }
    }
}

/// Settings for a [`SpriteBatch`](crate::render2d::SpriteBatch) and its wgpu
/// backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Number of glyphs the CPU-side vectors and the GPU vertex buffer are
    /// sized for up front. Both grow on demand past this.
    pub initial_glyph_capacity: usize,
    /// Sort policy used by [`SpriteBatch::begin_default`](crate::render2d::SpriteBatch::begin_default).
    pub default_sort: GlyphSortType,
    /// Sampler filter for every sprite texture.
    pub filter: FilterMode,
}

impl BatchConfig {
    /// Parse a config from a JSON string. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, BatchError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, BatchError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| BatchError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&json)?;
        log::debug!("Loaded batch config from '{}': {config:?}", path.display());
        Ok(config)
    }
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            initial_glyph_capacity: 1024,
            default_sort: GlyphSortType::Texture,
            filter: FilterMode::Nearest,
        }
    }
}
