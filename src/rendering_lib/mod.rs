// src/rendering_lib/mod.rs

pub mod backend;
pub mod polygon;
pub mod recording;
pub mod shader;
pub mod vertex;
pub mod wgpu_backend;

pub use backend::{AttribLocation, DrawMode, GraphicsBackend, ProgramId, ShaderProgram, UniformLocation};
pub use polygon::{Polygon, ScopedPolygon};
pub use recording::{BackendCall, RecordedBuffer, RecordingBackend};
pub use shader::WGSL_SHADER_SOURCE;
pub use vertex::Vertex;
pub use wgpu_backend::{WgpuBackend, WgpuBuffer};
