//! Window-bound wgpu setup.
//!
//! The batcher needs nothing more than a `wgpu::Device` and `wgpu::Queue`;
//! [`GpuContext`] exists for the common case of drawing sprites straight into
//! a winit window. It owns the surface and keeps its configuration in sync
//! with the window size.
//!
//! ```text
//!   Window ─► Instance ─► Surface ─┐
//!                                  ├─► Adapter ─► Device + Queue
//!                 compatible_surface┘        │
//!                                  Surface::configure(format, size)
//! ```

use std::sync::Arc;

use winit::window::Window;

use crate::error::BatchError;

/// Device, queue and the configured surface of one window.
pub struct GpuContext {
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub surface: wgpu::Surface<'static>,
    pub surface_config: wgpu::SurfaceConfiguration,
}

impl GpuContext {
    /// Create a surface for `window` and a device that can present to it.
    pub fn new(window: Arc<Window>) -> Result<Self, BatchError> {
        let size = window.inner_size();
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
        let surface = instance.create_surface(window)?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            compatible_surface: Some(&surface),
            ..Default::default()
        }))?;
        let info = adapter.get_info();

        let (device, queue) = pollster::block_on(adapter.request_device(&wgpu::DeviceDescriptor {
            label: Some("spritebatch device"),
            ..Default::default()
        }))?;

        let caps = surface.get_capabilities(&adapter);
        let surface_config = surface_config_for(
            &caps.formats,
            &caps.alpha_modes,
            size.width,
            size.height,
        )?;
        surface.configure(&device, &surface_config);

        log::info!(
            "GPU ready: {} ({:?}), surface {:?} {}x{}",
            info.name,
            info.backend,
            surface_config.format,
            surface_config.width,
            surface_config.height
        );

        Ok(Self {
            device,
            queue,
            surface,
            surface_config,
        })
    }

    /// Reconfigure the surface for a new window size. Zero-sized (minimized)
    /// windows are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.surface_config.width = width;
        self.surface_config.height = height;
        self.surface.configure(&self.device, &self.surface_config);
    }

    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.surface_config.format
    }

    /// Surface size in physical pixels.
    pub fn surface_size(&self) -> (u32, u32) {
        (self.surface_config.width, self.surface_config.height)
    }
}

/// Pick the surface format: the first sRGB one, else whatever comes first.
fn pick_format(formats: &[wgpu::TextureFormat]) -> Option<wgpu::TextureFormat> {
    formats
        .iter()
        .copied()
        .find(|f| f.is_srgb())
        .or_else(|| formats.first().copied())
}

fn surface_config_for(
    formats: &[wgpu::TextureFormat],
    alpha_modes: &[wgpu::CompositeAlphaMode],
    width: u32,
    height: u32,
) -> Result<wgpu::SurfaceConfiguration, BatchError> {
    let format = pick_format(formats).ok_or(BatchError::UnsupportedSurface)?;
    let alpha_mode = alpha_modes
        .first()
        .copied()
        .unwrap_or(wgpu::CompositeAlphaMode::Auto);

    Ok(wgpu::SurfaceConfiguration {
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        format,
        width: width.max(1),
        height: height.max(1),
        present_mode: wgpu::PresentMode::AutoVsync,
        alpha_mode,
        view_formats: vec![],
        desired_maximum_frame_latency: 2,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use wgpu::{CompositeAlphaMode, TextureFormat};

    #[test]
    fn srgb_format_is_preferred() {
        let formats = [TextureFormat::Bgra8Unorm, TextureFormat::Bgra8UnormSrgb];
        assert_eq!(pick_format(&formats), Some(TextureFormat::Bgra8UnormSrgb));
    }

    #[test]
    fn falls_back_to_first_format() {
        let formats = [TextureFormat::Rgba16Float, TextureFormat::Bgra8Unorm];
        assert_eq!(pick_format(&formats), Some(TextureFormat::Rgba16Float));
    }

    #[test]
    fn zero_window_size_is_clamped() {
        let config =
            surface_config_for(&[TextureFormat::Bgra8UnormSrgb], &[CompositeAlphaMode::Opaque], 0, 0)
                .unwrap();
        assert_eq!((config.width, config.height), (1, 1));
        assert_eq!(config.alpha_mode, CompositeAlphaMode::Opaque);
    }

    #[test]
    fn surface_without_formats_is_an_error() {
        let result = surface_config_for(&[], &[], 800, 600);
        assert!(matches!(result, Err(BatchError::UnsupportedSurface)));
    }
}
