//! Sprite batch demo — a grid of checkerboard sprites, a ring of spinning
//! sprites and a few that turn to face a moving target.
//!
//! Run with `RUST_LOG=debug` to see buffer growth and per-frame stats. Pass a
//! JSON config path as the first argument to override [`BatchConfig`].

use std::sync::Arc;
use std::time::Instant;

use spritebatch::prelude::*;
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::window::{Window, WindowId};

fn main() {
    env_logger::init();

    let config = match std::env::args().nth(1) {
        Some(path) => match BatchConfig::load(&path) {
            Ok(config) => config,
            Err(e) => {
                log::error!("{e}");
                return;
            }
        },
        None => BatchConfig::default(),
    };

    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(e) => {
            log::error!("Failed to create event loop: {e}");
            return;
        }
    };
    let mut app = DemoApp::new(config);
    if let Err(e) = event_loop.run_app(&mut app) {
        log::error!("Event loop error: {e}");
    }
}

/// GPU-side state, created once the window exists.
struct Scene {
    window: Arc<Window>,
    gpu: GpuContext,
    batch: SpriteBatch<SpriteRenderer>,
    textures: TextureStore,
    checkers: Vec<TextureHandle>,
    overlay: TextureHandle,
}

struct DemoApp {
    config: BatchConfig,
    scene: Option<Scene>,
    start: Instant,
    frame: u64,
}

impl DemoApp {
    fn new(config: BatchConfig) -> Self {
        Self {
            config,
            scene: None,
            start: Instant::now(),
            frame: 0,
        }
    }

    fn create_scene(&self, window: Arc<Window>) -> Result<Scene, BatchError> {
        let gpu = GpuContext::new(window.clone())?;
        let renderer = SpriteRenderer::for_surface(&gpu, &self.config);
        let mut textures = TextureStore::new(&renderer);

        let palette = [
            ([230, 80, 60], [120, 30, 20]),
            ([70, 170, 230], [20, 60, 110]),
            ([240, 200, 70], [130, 90, 10]),
        ];
        let mut checkers = Vec::new();
        for (i, (light, dark)) in palette.into_iter().enumerate() {
            let data = checkerboard(16, light, dark);
            let handle = textures.create_from_rgba(&renderer, &format!("checker {i}"), 16, 16, &data)?;
            checkers.push(handle);
        }

        // Under the texture sort, handles draw in load order. A white texture
        // loaded after the checkers puts the target and arrows on top.
        let overlay = textures.create_from_rgba(&renderer, "overlay white", 1, 1, &[255; 4])?;

        let mut batch = SpriteBatch::new(renderer, &self.config);
        batch.init()?;

        Ok(Scene {
            window,
            gpu,
            batch,
            textures,
            checkers,
            overlay,
        })
    }
}

impl ApplicationHandler for DemoApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.scene.is_some() {
            return;
        }

        let attrs = Window::default_attributes()
            .with_title("spritebatch — sprites")
            .with_inner_size(winit::dpi::LogicalSize::new(1280.0, 720.0));
        let window = match event_loop.create_window(attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("Failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        match self.create_scene(window) {
            Ok(scene) => {
                scene.window.request_redraw();
                self.scene = Some(scene);
            }
            Err(e) => {
                log::error!("Failed to set up demo: {e}");
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let Some(scene) = &mut self.scene else {
            return;
        };

        match event {
            WindowEvent::CloseRequested => {
                log::info!("Window close requested, exiting.");
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                scene.gpu.resize(size.width, size.height);
            }

            WindowEvent::RedrawRequested => {
                let t = self.start.elapsed().as_secs_f32();
                self.frame += 1;

                if let Err(e) = draw_scene(scene, t) {
                    log::error!("Batching failed: {e}");
                    event_loop.exit();
                    return;
                }

                match render_frame(&scene.gpu, &scene.batch, &scene.textures, ClearColor::default()) {
                    Ok(()) => {}
                    Err(BatchError::Frame(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated)) => {
                        let (w, h) = scene.gpu.surface_size();
                        scene.gpu.resize(w, h);
                    }
                    Err(BatchError::Frame(wgpu::SurfaceError::OutOfMemory)) => {
                        log::error!("Out of GPU memory!");
                        event_loop.exit();
                    }
                    Err(e) => log::warn!("Frame error: {e}"),
                }

                #[cfg(feature = "diagnostics")]
                if self.frame % 120 == 0 {
                    log::debug!("render stats: {}", scene.batch.stats().to_json());
                }

                scene.window.request_redraw();
            }

            _ => {}
        }
    }
}

/// Record one frame of sprites and upload it.
fn draw_scene(scene: &mut Scene, t: f32) -> Result<(), BatchError> {
    let (width, height) = scene.gpu.surface_size();
    let (half_w, half_h) = (width as f32 / 2.0, height as f32 / 2.0);
    scene
        .batch
        .backend()
        .set_view_projection(Mat4::orthographic_rh(-half_w, half_w, -half_h, half_h, -1.0, 1.0));

    let batch = &mut scene.batch;
    batch.begin(GlyphSortType::Texture)?;

    // Background grid, textures interleaved on purpose: the texture sort
    // still collapses it into one draw call per texture.
    let size = 40.0;
    for row in 0..12 {
        for col in 0..24 {
            let texture = scene.checkers[(row + col) % scene.checkers.len()];
            let dest = Rect::new(-half_w + col as f32 * (size + 4.0), -half_h + row as f32 * (size + 4.0), size, size);
            batch.draw(dest, Rect::FULL, texture, 0.0, Color::rgba(255, 255, 255, 160))?;
        }
    }

    // Spinning ring.
    for i in 0..16 {
        let phase = i as f32 / 16.0 * std::f32::consts::TAU;
        let center = Vec2::new(phase.cos(), phase.sin()) * 200.0;
        let dest = Rect::from_position_size(center - Vec2::splat(24.0), Vec2::splat(48.0));
        let texture = scene.checkers[i % scene.checkers.len()];
        batch.draw_rotated(dest, Rect::FULL, texture, 1.0, Color::WHITE, t + phase)?;
    }

    // Arrows that track a target moving in a figure eight.
    let target = Vec2::new((t * 0.7).sin() * 300.0, (t * 1.4).sin() * 150.0);
    let white = scene.overlay;
    batch.draw(
        Rect::from_position_size(target - Vec2::splat(6.0), Vec2::splat(12.0)),
        Rect::FULL,
        white,
        2.0,
        Color::RED,
    )?;
    for i in 0..6 {
        let origin = Vec2::new(-250.0 + i as f32 * 100.0, -250.0);
        let dest = Rect::from_position_size(origin - Vec2::new(20.0, 5.0), Vec2::new(40.0, 10.0));
        batch.draw_facing(dest, Rect::FULL, white, 2.0, Color::GREEN, target - origin)?;
    }

    batch.end()
}

/// An `n`×`n` RGBA checkerboard with 4-pixel cells.
fn checkerboard(n: u32, light: [u8; 3], dark: [u8; 3]) -> Vec<u8> {
    let mut data = Vec::with_capacity((n * n * 4) as usize);
    for y in 0..n {
        for x in 0..n {
            let [r, g, b] = if (x / 4 + y / 4) % 2 == 0 { light } else { dark };
            data.extend_from_slice(&[r, g, b, 255]);
        }
    }
    data
}
