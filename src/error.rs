//! Error types
//!
//! Mesh errors are contract violations in generated or hand-built geometry.
//! Render errors cover GPU setup, stream validation before upload and frame
//! submission.

use thiserror::Error;

/// Invalid mesh topology or generator parameters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MeshError {
    #[error("index {index} at position {position} is outside the vertex range 0..{vertex_count}")]
    IndexOutOfRange {
        position: usize,
        index: u32,
        vertex_count: usize,
    },

    #[error("index count {0} is not a multiple of 3")]
    IndicesNotTriangles(usize),

    #[error("a regular polygon prism needs at least 3 sides, got {0}")]
    TooFewSides(u32),

    #[error("{index_count} indices need {needed} normals with this layout, found {found}")]
    MissingNormals {
        index_count: usize,
        needed: usize,
        found: usize,
    },
}

/// Failures in the render pipeline.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("scene object {object} has invalid geometry: {source}")]
    Mesh {
        object: usize,
        #[source]
        source: MeshError,
    },

    #[error(
        "stream lengths disagree: {positions} positions, {colors} colors, {normals} normals, {specular} specular values"
    )]
    StreamLengthMismatch {
        positions: usize,
        colors: usize,
        normals: usize,
        specular: usize,
    },

    #[error("no shader pipeline is available; shader compilation failed earlier")]
    NoPipeline,

    #[error("failed to create a surface for the window: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),

    #[error("no suitable GPU adapter: {0}")]
    AdapterUnavailable(#[from] wgpu::RequestAdapterError),

    #[error("failed to open the GPU device: {0}")]
    DeviceUnavailable(#[from] wgpu::RequestDeviceError),

    #[error("surface does not support any texture format")]
    NoSurfaceFormat,

    #[error("surface error: {0}")]
    Surface(#[from] wgpu::SurfaceError),
}
