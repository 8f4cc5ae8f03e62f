//! Error type for the sprite batcher and its wgpu backend.
//!
//! Sprite data itself has no failure modes: rectangles, colors and handles are
//! taken as given. What can go wrong is calling the frame protocol out of
//! order, using the GPU backend before it is ready, or failing to set up the
//! GPU context, a texture, or a config file.

use std::path::PathBuf;

use thiserror::Error;

/// Errors reported by [`SpriteBatch`](crate::render2d::SpriteBatch) and the
/// GPU-side helpers around it.
#[derive(Error, Debug)]
pub enum BatchError {
    /// `begin` was called while a frame was still being recorded.
    #[error("begin called while a frame is still recording; call end first")]
    AlreadyRecording,

    /// `draw` or `end` was called outside of `begin`/`end`.
    #[error("no frame is recording; call begin first")]
    NotRecording,

    /// `render_batch` was called without a matching `end`.
    #[error("no batches are ready; call end before render_batch")]
    NotBatched,

    /// The backend was asked to upload before `init` created its buffer.
    #[error("sprite backend used before init")]
    NotInitialized,

    /// The window surface could not provide a frame to draw into.
    #[error("failed to acquire surface texture: {0}")]
    Frame(#[from] wgpu::SurfaceError),

    #[error("failed to create surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),

    #[error("no suitable GPU adapter: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),

    #[error("failed to create GPU device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),

    /// The adapter reported no texture format the surface can present.
    #[error("surface supports no texture formats on this adapter")]
    UnsupportedSurface,

    /// A texture file could not be opened or decoded.
    #[error("failed to load texture '{path}': {source}")]
    Texture {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// A texture must be at least 1x1.
    #[error("texture size {width}x{height} has a zero dimension")]
    EmptyTexture { width: u32, height: u32 },

    /// Raw pixel data did not match the stated dimensions.
    #[error("texture data is {actual} bytes, expected {expected} for {width}x{height} RGBA")]
    TextureSize {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    #[error("failed to read config '{path}': {source}")]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    ConfigParse(#[from] serde_json::Error),
}
