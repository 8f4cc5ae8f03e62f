//! # Texture — Image Data on the GPU
//!
//! The batcher only ever sees a [`TextureHandle`]: an opaque, orderable id it
//! compares to sort and merge glyphs. This module is the provider on the other
//! side of that handle for the wgpu backend. It uploads RGBA pixels (or image
//! files) as `wgpu::Texture`s and keeps the bind group each one needs.
//!
//! ```text
//! TextureStore
//! ┌───────────────────────────────────────────────┐
//! │ entries: Vec<TextureEntry>                    │
//! │   [0] 1x1 white (default)   ◄── always here  │
//! │   [1] "player.png"                            │
//! │   [2] "tileset.png"                           │
//! │   ...                                         │
//! │                                               │
//! │ path_cache: HashMap<PathBuf, TextureHandle>   │
//! │   "player.png"  → Handle(1)                   │
//! │   "tileset.png" → Handle(2)                   │
//! └───────────────────────────────────────────────┘
//! ```
//!
//! ## The 1x1 White Default Texture
//!
//! Entry 0 is a single white pixel. The fragment shader multiplies the sample
//! by the vertex color, so drawing with this handle yields a solid quad in
//! the glyph's color without a separate untextured code path.
//!
//! Handles are assigned in load order, so under the `Texture` sort policy
//! glyphs are grouped in the order their textures were loaded.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use wgpu::util::DeviceExt;

use super::pipeline::SpriteRenderer;
use crate::error::BatchError;

/// Handle to a loaded texture. Compared and ordered by the batcher, never
/// dereferenced by it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct TextureHandle(pub usize);

/// Internal entry for a loaded GPU texture.
pub(crate) struct TextureEntry {
    pub bind_group: wgpu::BindGroup,
    pub width: u32,
    pub height: u32,
}

/// Stores all loaded GPU textures and their bind groups.
pub struct TextureStore {
    entries: Vec<TextureEntry>,
    path_cache: HashMap<PathBuf, TextureHandle>,
}

impl TextureStore {
    /// Create a new store with a 1x1 white default texture at index 0.
    pub fn new(renderer: &SpriteRenderer) -> Self {
        let default_entry = upload_rgba(renderer, "white 1x1", 1, 1, &[255u8, 255, 255, 255]);
        Self {
            entries: vec![default_entry],
            path_cache: HashMap::new(),
        }
    }

    /// The default 1x1 white texture handle.
    pub fn default_handle(&self) -> TextureHandle {
        TextureHandle(0)
    }

    /// Number of textures in the store, including the default.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Pixel size of a texture, if the handle belongs to this store.
    pub fn dimensions(&self, handle: TextureHandle) -> Option<(u32, u32)> {
        self.entries.get(handle.0).map(|e| (e.width, e.height))
    }

    pub(crate) fn get(&self, handle: TextureHandle) -> Option<&TextureEntry> {
        self.entries.get(handle.0)
    }

    /// Upload raw RGBA8 pixels as a new texture.
    pub fn create_from_rgba(
        &mut self,
        renderer: &SpriteRenderer,
        label: &str,
        width: u32,
        height: u32,
        data: &[u8],
    ) -> Result<TextureHandle, BatchError> {
        check_rgba(width, height, data.len())?;

        let handle = TextureHandle(self.entries.len());
        self.entries.push(upload_rgba(renderer, label, width, height, data));
        Ok(handle)
    }

    /// Load an image file (PNG or JPEG) and return its handle.
    ///
    /// Textures are cached by path: loading the same path twice returns the
    /// same handle without a second upload.
    pub fn load(
        &mut self,
        renderer: &SpriteRenderer,
        path: impl AsRef<Path>,
    ) -> Result<TextureHandle, BatchError> {
        let path = path.as_ref();
        if let Some(&handle) = self.path_cache.get(path) {
            return Ok(handle);
        }

        let img = image::open(path)
            .map_err(|source| BatchError::Texture {
                path: path.to_path_buf(),
                source,
            })?
            .to_rgba8();
        let (width, height) = img.dimensions();

        let label = path.display().to_string();
        let handle = self.create_from_rgba(renderer, &label, width, height, img.as_raw())?;
        self.path_cache.insert(path.to_path_buf(), handle);

        log::info!("Loaded texture '{label}' ({width}x{height}) as {handle:?}");
        Ok(handle)
    }
}

/// Reject zero-sized textures and pixel buffers that don't hold exactly
/// `width * height` RGBA8 texels.
fn check_rgba(width: u32, height: u32, len: usize) -> Result<(), BatchError> {
    if width == 0 || height == 0 {
        return Err(BatchError::EmptyTexture { width, height });
    }
    let expected = width as usize * height as usize * 4;
    if len != expected {
        return Err(BatchError::TextureSize {
            width,
            height,
            expected,
            actual: len,
        });
    }
    Ok(())
}

fn upload_rgba(
    renderer: &SpriteRenderer,
    label: &str,
    width: u32,
    height: u32,
    data: &[u8],
) -> TextureEntry {
    let texture = renderer.device.create_texture_with_data(
        &renderer.queue,
        &wgpu::TextureDescriptor {
            label: Some(label),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        },
        wgpu::util::TextureDataOrder::LayerMajor,
        data,
    );

    let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
    let bind_group = renderer.device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some(label),
        layout: &renderer.texture_bind_group_layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(&view),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Sampler(&renderer.sampler),
            },
        ],
    });

    TextureEntry {
        bind_group,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_rgba_length_is_accepted() {
        assert!(check_rgba(16, 8, 16 * 8 * 4).is_ok());
    }

    #[test]
    fn zero_dimension_is_rejected() {
        assert!(matches!(
            check_rgba(0, 4, 0),
            Err(BatchError::EmptyTexture { width: 0, height: 4 })
        ));
        assert!(matches!(check_rgba(3, 0, 0), Err(BatchError::EmptyTexture { .. })));
    }

    #[test]
    fn wrong_length_reports_sizes() {
        match check_rgba(2, 2, 15) {
            Err(BatchError::TextureSize { expected, actual, .. }) => {
                assert_eq!(expected, 16);
                assert_eq!(actual, 15);
            }
            other => panic!("expected TextureSize, got {other:?}"),
        }
    }
}
