//! Render pass orchestration for a window surface.
//!
//! [`render_frame`] is the glue between a finished [`SpriteBatch`] and the
//! screen: acquire the surface texture, clear it, replay the batch's draw
//! calls into one render pass, submit and present.

use crate::error::BatchError;
use crate::render::gpu::GpuContext;
use crate::render2d::{SpriteBatch, SpritePass, SpriteRenderer, TextureStore};

/// The clear color for [`render_frame`].
#[derive(Debug, Clone, Copy)]
pub struct ClearColor(pub [f64; 4]);

impl Default for ClearColor {
    fn default() -> Self {
        // A pleasant dark blue, like a night sky.
        Self([0.1, 0.1, 0.15, 1.0])
    }
}

impl From<ClearColor> for wgpu::Color {
    fn from(c: ClearColor) -> Self {
        wgpu::Color {
            r: c.0[0],
            g: c.0[1],
            b: c.0[2],
            a: c.0[3],
        }
    }
}

/// Draw an already-ended batch to the window surface.
///
/// Surface errors (`Outdated`, `Lost`, `Timeout`) are returned to the caller,
/// which typically reconfigures the surface with [`GpuContext::resize`] and
/// tries again next frame.
pub fn render_frame(
    gpu: &GpuContext,
    batch: &SpriteBatch<SpriteRenderer>,
    textures: &TextureStore,
    clear_color: ClearColor,
) -> Result<(), BatchError> {
    let output = gpu.surface.get_current_texture()?;
    let view = output
        .texture
        .create_view(&wgpu::TextureViewDescriptor::default());
    let mut encoder = gpu
        .device
        .create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("sprite batch frame encoder"),
        });

    {
        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("sprite batch render pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: &view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(clear_color.into()),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        let mut pass = SpritePass::new(&mut render_pass, batch.backend(), textures);
        batch.render_batch(&mut pass)?;
    }

    gpu.queue.submit(std::iter::once(encoder.finish()));
    output.present();
    Ok(())
}
