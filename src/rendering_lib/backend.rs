// src/rendering_lib/backend.rs

use crate::error::BackendError;

/// Primitive assembly for [`GraphicsBackend::draw_arrays`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DrawMode {
    /// Closed outline: every vertex joined to the next, the last to the first.
    LineLoop,
    /// Filled fan radiating from the first vertex.
    TriangleFan,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ProgramId(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AttribLocation(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct UniformLocation(pub u32);

/// Named locations of a shader program able to draw polygons.
///
/// Backends hand these out; polygons only read them.
#[derive(Clone, Debug, PartialEq)]
pub struct ShaderProgram {
    pub id: ProgramId,
    pub position: AttribLocation,
    pub center: UniformLocation,
    pub scale: UniformLocation,
    pub angle: UniformLocation,
    pub color: UniformLocation,
}

impl ShaderProgram {
    /// Program with the position attribute at 0 and the uniforms at 0..4 in
    /// `center, scale, angle, color` order.
    pub fn with_default_locations(id: ProgramId) -> Self {
        Self {
            id,
            position: AttribLocation(0),
            center: UniformLocation(0),
            scale: UniformLocation(1),
            angle: UniformLocation(2),
            color: UniformLocation(3),
        }
    }
}

/// Immediate-mode drawing context a [`Polygon`](super::Polygon) talks to.
///
/// Calls mutate global binding state (bound buffer, active program, enabled
/// attributes) and must all come from one thread.
pub trait GraphicsBackend {
    /// Owned handle to backend-resident vertex data.
    type Buffer;

    /// Uploads `data` once into a buffer the backend may treat as immutable.
    fn create_static_buffer(&mut self, data: &[f32]) -> Result<Self::Buffer, BackendError>;

    fn delete_buffer(&mut self, buffer: Self::Buffer);

    fn bind_buffer(&mut self, buffer: &Self::Buffer);

    fn use_program(&mut self, program: &ShaderProgram);

    fn active_program(&self) -> Option<ProgramId>;

    fn set_uniform_1f(&mut self, location: UniformLocation, value: f32);

    fn set_uniform_2f(&mut self, location: UniformLocation, value: [f32; 2]);

    fn set_uniform_4f(&mut self, location: UniformLocation, value: [f32; 4]);

    fn enable_vertex_attrib(&mut self, location: AttribLocation);

    /// Sources `location` from the currently bound buffer, `components`
    /// tightly packed floats per vertex.
    fn vertex_attrib_pointer(&mut self, location: AttribLocation, components: u32);

    fn disable_vertex_attrib(&mut self, location: AttribLocation);

    fn draw_arrays(&mut self, mode: DrawMode, first: u32, count: u32);
}
