// src/rendering_lib/vertex.rs

use bytemuck::{Pod, Zeroable};

/// Vertex as stored in polygon buffers: a bare position, two floats.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
}

impl Vertex {
    const ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point2;

    #[test]
    fn stride_matches_flattened_points() {
        assert_eq!(Vertex::desc().array_stride, 2 * std::mem::size_of::<f32>() as u64);
        assert_eq!(std::mem::size_of::<Vertex>(), std::mem::size_of::<Point2>());
    }
}
