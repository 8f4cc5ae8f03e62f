//! Rendering subsystem — wgpu context and frame helpers.

pub mod gpu;
pub mod pass;

pub use gpu::GpuContext;
pub use pass::ClearColor;
