// src/rendering_lib/recording.rs

use std::collections::{BTreeSet, HashMap};

use super::backend::{
    AttribLocation, DrawMode, GraphicsBackend, ProgramId, ShaderProgram, UniformLocation,
};
use crate::error::BackendError;

/// One call observed by a [`RecordingBackend`].
#[derive(Clone, Debug, PartialEq)]
pub enum BackendCall {
    CreateBuffer { id: u32, len: usize },
    DeleteBuffer { id: u32 },
    BindBuffer { id: u32 },
    UseProgram(ProgramId),
    Uniform1f(UniformLocation, f32),
    Uniform2f(UniformLocation, [f32; 2]),
    Uniform4f(UniformLocation, [f32; 4]),
    EnableAttrib(AttribLocation),
    AttribPointer { location: AttribLocation, components: u32, buffer: Option<u32> },
    DisableAttrib(AttribLocation),
    Draw { mode: DrawMode, first: u32, count: u32 },
}

/// Buffer handle issued by [`RecordingBackend`]. Deliberately not `Clone`.
#[derive(Debug, PartialEq, Eq)]
pub struct RecordedBuffer {
    id: u32,
}

impl RecordedBuffer {
    pub fn id(&self) -> u32 {
        self.id
    }
}

/// Backend that draws nothing and remembers everything.
///
/// Used to exercise polygons without a GPU: every call is appended to
/// [`calls`](Self::calls) and live buffer contents are kept for inspection.
#[derive(Debug, Default)]
pub struct RecordingBackend {
    calls: Vec<BackendCall>,
    buffers: HashMap<u32, Vec<f32>>,
    next_id: u32,
    bound: Option<u32>,
    program: Option<ProgramId>,
    enabled: BTreeSet<AttribLocation>,
    fail_next_allocation: bool,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the next `create_static_buffer` fail as if memory ran out.
    pub fn fail_next_allocation(&mut self) {
        self.fail_next_allocation = true;
    }

    pub fn calls(&self) -> &[BackendCall] {
        &self.calls
    }

    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    /// `(mode, first, count)` of every draw so far.
    pub fn draws(&self) -> Vec<(DrawMode, u32, u32)> {
        self.calls
            .iter()
            .filter_map(|call| match *call {
                BackendCall::Draw { mode, first, count } => Some((mode, first, count)),
                _ => None,
            })
            .collect()
    }

    /// Last value written to a 4-float uniform at `location`.
    pub fn last_uniform_4f(&self, location: UniformLocation) -> Option<[f32; 4]> {
        self.calls.iter().rev().find_map(|call| match *call {
            BackendCall::Uniform4f(loc, value) if loc == location => Some(value),
            _ => None,
        })
    }

    pub fn buffer_data(&self, id: u32) -> Option<&[f32]> {
        self.buffers.get(&id).map(Vec::as_slice)
    }

    pub fn live_buffers(&self) -> usize {
        self.buffers.len()
    }

    pub fn enabled_attributes(&self) -> Vec<AttribLocation> {
        self.enabled.iter().copied().collect()
    }
}

impl GraphicsBackend for RecordingBackend {
    type Buffer = RecordedBuffer;

    fn create_static_buffer(&mut self, data: &[f32]) -> Result<RecordedBuffer, BackendError> {
        if data.is_empty() {
            return Err(BackendError::EmptyBuffer);
        }
        if std::mem::take(&mut self.fail_next_allocation) {
            return Err(BackendError::Allocation("simulated out of memory".into()));
        }
        let id = self.next_id;
        self.next_id += 1;
        self.buffers.insert(id, data.to_vec());
        self.calls.push(BackendCall::CreateBuffer { id, len: data.len() });
        Ok(RecordedBuffer { id })
    }

    fn delete_buffer(&mut self, buffer: RecordedBuffer) {
        if self.buffers.remove(&buffer.id).is_none() {
            panic!("buffer {} deleted twice", buffer.id);
        }
        if self.bound == Some(buffer.id) {
            self.bound = None;
        }
        self.calls.push(BackendCall::DeleteBuffer { id: buffer.id });
    }

    fn bind_buffer(&mut self, buffer: &RecordedBuffer) {
        self.bound = Some(buffer.id);
        self.calls.push(BackendCall::BindBuffer { id: buffer.id });
    }

    fn use_program(&mut self, program: &ShaderProgram) {
        self.program = Some(program.id);
        self.calls.push(BackendCall::UseProgram(program.id));
    }

    fn active_program(&self) -> Option<ProgramId> {
        self.program
    }

    fn set_uniform_1f(&mut self, location: UniformLocation, value: f32) {
        self.calls.push(BackendCall::Uniform1f(location, value));
    }

    fn set_uniform_2f(&mut self, location: UniformLocation, value: [f32; 2]) {
        self.calls.push(BackendCall::Uniform2f(location, value));
    }

    fn set_uniform_4f(&mut self, location: UniformLocation, value: [f32; 4]) {
        self.calls.push(BackendCall::Uniform4f(location, value));
    }

    fn enable_vertex_attrib(&mut self, location: AttribLocation) {
        self.enabled.insert(location);
        self.calls.push(BackendCall::EnableAttrib(location));
    }

    fn vertex_attrib_pointer(&mut self, location: AttribLocation, components: u32) {
        self.calls.push(BackendCall::AttribPointer { location, components, buffer: self.bound });
    }

    fn disable_vertex_attrib(&mut self, location: AttribLocation) {
        self.enabled.remove(&location);
        self.calls.push(BackendCall::DisableAttrib(location));
    }

    fn draw_arrays(&mut self, mode: DrawMode, first: u32, count: u32) {
        self.calls.push(BackendCall::Draw { mode, first, count });
    }
}
