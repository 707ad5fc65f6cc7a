// src/rendering_lib/wgpu_backend.rs

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use bytemuck::{Pod, Zeroable};
use pollster::FutureExt;
use wgpu::util::DeviceExt;

use super::backend::{
    AttribLocation, DrawMode, GraphicsBackend, ProgramId, ShaderProgram, UniformLocation,
};
use super::shader::WGSL_SHADER_SOURCE;
use super::vertex::Vertex;
use crate::color::Color;
use crate::error::BackendError;

/// Uniform block shared by every polygon draw.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable, PartialEq)]
pub(crate) struct PolygonUniforms {
    viewport: [f32; 2],
    center: [f32; 2],
    scale: f32,
    angle: f32,
    _padding: [f32; 2], // color is vec4-aligned
    color: [f32; 4],
}

impl PolygonUniforms {
    fn new(viewport: [f32; 2]) -> Self {
        Self {
            viewport,
            center: [0.0, 0.0],
            scale: 1.0,
            angle: 0.0,
            _padding: [0.0; 2],
            color: Color::BLACK.to_rgba(),
        }
    }

    /// Routes a scalar uniform; `false` if `location` names no scalar.
    fn set_1f(&mut self, program: &ShaderProgram, location: UniformLocation, value: f32) -> bool {
        if location == program.scale {
            self.scale = value;
        } else if location == program.angle {
            self.angle = value;
        } else {
            return false;
        }
        true
    }

    fn set_2f(&mut self, program: &ShaderProgram, location: UniformLocation, value: [f32; 2]) -> bool {
        if location != program.center {
            return false;
        }
        self.center = value;
        true
    }

    fn set_4f(&mut self, program: &ShaderProgram, location: UniformLocation, value: [f32; 4]) -> bool {
        if location != program.color {
            return false;
        }
        self.color = value;
        true
    }
}

/// Index list emulating `mode` over `count` vertices, since wgpu has neither
/// fans nor loops. `None` when there are too few vertices to draw anything.
pub(crate) fn primitive_indices(mode: DrawMode, count: u32) -> Option<Vec<u32>> {
    match mode {
        DrawMode::TriangleFan if count >= 3 => {
            Some((1..count - 1).flat_map(|i| [0, i, i + 1]).collect())
        }
        DrawMode::LineLoop if count >= 2 => Some((0..count).chain(std::iter::once(0)).collect()),
        _ => None,
    }
}

/// Vertex buffer handle issued by [`WgpuBackend`].
pub struct WgpuBuffer {
    buffer: Arc<wgpu::Buffer>,
}

/// [`GraphicsBackend`] drawing through wgpu.
///
/// Every `draw_arrays` records and submits its own render pass onto the frame
/// target given to [`begin_frame`](Self::begin_frame), so uniform writes made
/// between draws take effect in call order.
pub struct WgpuBackend {
    device: Arc<wgpu::Device>,
    queue: Arc<wgpu::Queue>,

    fill_pipeline: wgpu::RenderPipeline,
    outline_pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    program: ShaderProgram,

    uniforms: PolygonUniforms,
    index_buffers: HashMap<(DrawMode, u32), (wgpu::Buffer, u32)>,

    active_program: Option<ProgramId>,
    bound: Option<Arc<wgpu::Buffer>>,
    attrib_source: Option<Arc<wgpu::Buffer>>,
    enabled: BTreeSet<AttribLocation>,
    target: Option<wgpu::TextureView>,
}

impl WgpuBackend {
    pub fn new(
        device: Arc<wgpu::Device>,
        queue: Arc<wgpu::Queue>,
        surface_format: wgpu::TextureFormat,
        viewport: [f32; 2],
    ) -> Self {
        let shader_module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Polygon Shader Module"),
            source: wgpu::ShaderSource::Wgsl(WGSL_SHADER_SOURCE.into()),
        });

        let uniforms = PolygonUniforms::new(viewport);
        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Polygon Uniform Buffer"),
            contents: bytemuck::bytes_of(&uniforms),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
            label: Some("polygon_uniform_bind_group_layout"),
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
            label: Some("polygon_uniform_bind_group"),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Polygon Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let fill_pipeline = create_pipeline(
            &device,
            &pipeline_layout,
            &shader_module,
            surface_format,
            wgpu::PrimitiveTopology::TriangleList,
            "Polygon Fill Pipeline",
        );
        let outline_pipeline = create_pipeline(
            &device,
            &pipeline_layout,
            &shader_module,
            surface_format,
            wgpu::PrimitiveTopology::LineStrip,
            "Polygon Outline Pipeline",
        );

        Self {
            device,
            queue,
            fill_pipeline,
            outline_pipeline,
            uniform_buffer,
            bind_group,
            program: ShaderProgram::with_default_locations(ProgramId(1)),
            uniforms,
            index_buffers: HashMap::new(),
            active_program: None,
            bound: None,
            attrib_source: None,
            enabled: BTreeSet::new(),
            target: None,
        }
    }

    /// Descriptor of the program this backend compiled at construction.
    pub fn program(&self) -> &ShaderProgram {
        &self.program
    }

    /// Directs subsequent draws at `texture`, sized `viewport` logical pixels.
    pub fn begin_frame(&mut self, texture: &wgpu::Texture, viewport: [f32; 2]) {
        self.target = Some(texture.create_view(&wgpu::TextureViewDescriptor::default()));
        self.uniforms.viewport = [viewport[0].max(1.0), viewport[1].max(1.0)];
    }

    pub fn end_frame(&mut self) {
        self.target = None;
    }

    /// Clears the current frame target.
    pub fn clear(&mut self, color: Color) {
        let Some(view) = self.target.as_ref() else {
            log::warn!("clear outside begin_frame/end_frame ignored");
            return;
        };
        let mut encoder = self.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Polygon Clear Encoder"),
        });
        {
            let _pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Polygon Clear Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations { load: wgpu::LoadOp::Clear(color.into()), store: wgpu::StoreOp::Store },
                })],
                depth_stencil_attachment: None, occlusion_query_set: None, timestamp_writes: None,
            });
        }
        self.queue.submit(std::iter::once(encoder.finish()));
    }
}

fn create_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    shader_module: &wgpu::ShaderModule,
    surface_format: wgpu::TextureFormat,
    topology: wgpu::PrimitiveTopology,
    label: &str,
) -> wgpu::RenderPipeline {
    let strip_index_format = match topology {
        wgpu::PrimitiveTopology::LineStrip | wgpu::PrimitiveTopology::TriangleStrip => {
            Some(wgpu::IndexFormat::Uint32)
        }
        _ => None,
    };

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(label),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader_module,
            entry_point: "vs_main",
            buffers: &[Vertex::desc()],
        },
        fragment: Some(wgpu::FragmentState {
            module: shader_module,
            entry_point: "fs_main",
            targets: &[Some(wgpu::ColorTargetState {
                format: surface_format,
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                write_mask: wgpu::ColorWrites::ALL,
            })],
        }),
        primitive: wgpu::PrimitiveState {
            topology,
            strip_index_format,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: None,
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview: None,
    })
}

impl GraphicsBackend for WgpuBackend {
    type Buffer = WgpuBuffer;

    fn create_static_buffer(&mut self, data: &[f32]) -> Result<WgpuBuffer, BackendError> {
        if data.is_empty() {
            return Err(BackendError::EmptyBuffer);
        }

        self.device.push_error_scope(wgpu::ErrorFilter::OutOfMemory);
        let buffer = self.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Polygon Vertex Buffer"),
            contents: bytemuck::cast_slice(data),
            usage: wgpu::BufferUsages::VERTEX,
        });
        if let Some(err) = self.device.pop_error_scope().block_on() {
            return Err(BackendError::Allocation(err.to_string()));
        }

        Ok(WgpuBuffer { buffer: Arc::new(buffer) })
    }

    fn delete_buffer(&mut self, buffer: WgpuBuffer) {
        for slot in [&mut self.bound, &mut self.attrib_source] {
            if slot.as_ref().is_some_and(|b| Arc::ptr_eq(b, &buffer.buffer)) {
                *slot = None;
            }
        }
        buffer.buffer.destroy();
    }

    fn bind_buffer(&mut self, buffer: &WgpuBuffer) {
        self.bound = Some(Arc::clone(&buffer.buffer));
    }

    fn use_program(&mut self, program: &ShaderProgram) {
        if program.id != self.program.id {
            log::warn!("program {:?} was not created by this backend", program.id);
        }
        self.active_program = Some(program.id);
    }

    fn active_program(&self) -> Option<ProgramId> {
        self.active_program
    }

    fn set_uniform_1f(&mut self, location: UniformLocation, value: f32) {
        if !self.uniforms.set_1f(&self.program, location, value) {
            log::warn!("no float uniform at {:?}", location);
        }
    }

    fn set_uniform_2f(&mut self, location: UniformLocation, value: [f32; 2]) {
        if !self.uniforms.set_2f(&self.program, location, value) {
            log::warn!("no vec2 uniform at {:?}", location);
        }
    }

    fn set_uniform_4f(&mut self, location: UniformLocation, value: [f32; 4]) {
        if !self.uniforms.set_4f(&self.program, location, value) {
            log::warn!("no vec4 uniform at {:?}", location);
        }
    }

    fn enable_vertex_attrib(&mut self, location: AttribLocation) {
        self.enabled.insert(location);
    }

    fn vertex_attrib_pointer(&mut self, location: AttribLocation, components: u32) {
        if location != self.program.position || components != 2 {
            log::warn!("unsupported attribute layout {:?} x{}", location, components);
            return;
        }
        self.attrib_source = self.bound.clone();
    }

    fn disable_vertex_attrib(&mut self, location: AttribLocation) {
        self.enabled.remove(&location);
    }

    fn draw_arrays(&mut self, mode: DrawMode, first: u32, count: u32) {
        let Some(view) = self.target.as_ref() else {
            log::warn!("draw outside begin_frame/end_frame skipped");
            return;
        };
        if !self.enabled.contains(&self.program.position) {
            log::warn!("draw with position attribute disabled skipped");
            return;
        }
        let Some(source) = self.attrib_source.as_ref() else {
            log::warn!("draw without a vertex buffer attached skipped");
            return;
        };

        let device = &self.device;
        let (index_buffer, index_count) = match self.index_buffers.entry((mode, count)) {
            std::collections::hash_map::Entry::Occupied(entry) => entry.into_mut(),
            std::collections::hash_map::Entry::Vacant(entry) => {
                let Some(indices) = primitive_indices(mode, count) else {
                    log::warn!("{:?} with {} vertices draws nothing", mode, count);
                    return;
                };
                let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("Polygon Index Buffer"),
                    contents: bytemuck::cast_slice(&indices),
                    usage: wgpu::BufferUsages::INDEX,
                });
                entry.insert((buffer, indices.len() as u32))
            }
        };

        self.queue.write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&self.uniforms));

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Polygon Draw Encoder"),
        });
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Polygon Draw Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations { load: wgpu::LoadOp::Load, store: wgpu::StoreOp::Store },
                })],
                depth_stencil_attachment: None, occlusion_query_set: None, timestamp_writes: None,
            });

            let pipeline = match mode {
                DrawMode::TriangleFan => &self.fill_pipeline,
                DrawMode::LineLoop => &self.outline_pipeline,
            };
            render_pass.set_pipeline(pipeline);
            render_pass.set_bind_group(0, &self.bind_group, &[]);
            render_pass.set_vertex_buffer(0, source.slice(..));
            render_pass.set_index_buffer(index_buffer.slice(..), wgpu::IndexFormat::Uint32);
            render_pass.draw_indexed(0..*index_count, first as i32, 0..1);
        }
        self.queue.submit(std::iter::once(encoder.finish()));
    }
}
