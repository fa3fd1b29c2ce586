//! # Vertex Stream Layouts
//!
//! Each attribute lives in its own vertex buffer, so the pipeline declares
//! four single-attribute layouts instead of one interleaved vertex struct.

use std::mem;

/// Shader locations of the four vertex streams.
pub mod location {
    pub const POSITION: u32 = 0;
    pub const COLOR: u32 = 1;
    pub const NORMAL: u32 = 2;
    pub const SPECULAR: u32 = 3;
}

const POSITION_ATTRIBUTES: [wgpu::VertexAttribute; 1] =
    wgpu::vertex_attr_array![location::POSITION => Float32x3];
const COLOR_ATTRIBUTES: [wgpu::VertexAttribute; 1] =
    wgpu::vertex_attr_array![location::COLOR => Float32x4];
const NORMAL_ATTRIBUTES: [wgpu::VertexAttribute; 1] =
    wgpu::vertex_attr_array![location::NORMAL => Float32x3];
const SPECULAR_ATTRIBUTES: [wgpu::VertexAttribute; 1] =
    wgpu::vertex_attr_array![location::SPECULAR => Float32];

fn layout(
    floats: usize,
    attributes: &'static [wgpu::VertexAttribute],
) -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: (floats * mem::size_of::<f32>()) as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes,
    }
}

/// Buffer layouts in slot order: position, color, normal, specular.
///
/// # Examples
///
/// ```no_run
/// use revolve::gfx::scene::vertex::stream_layouts;
///
/// let layouts = stream_layouts();
/// assert_eq!(layouts[1].array_stride, 16);
/// ```
pub fn stream_layouts() -> [wgpu::VertexBufferLayout<'static>; 4] {
    [
        layout(3, &POSITION_ATTRIBUTES),
        layout(4, &COLOR_ATTRIBUTES),
        layout(3, &NORMAL_ATTRIBUTES),
        layout(1, &SPECULAR_ATTRIBUTES),
    ]
}
