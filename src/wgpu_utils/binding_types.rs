// src/wgpu_utils/binding_types.rs
//! WGPU binding type utilities

/// Uniform binding that rejects buffers smaller than `Content`
pub fn uniform_sized<Content>() -> wgpu::BindingType {
    wgpu::BindingType::Buffer {
        ty: wgpu::BufferBindingType::Uniform,
        has_dynamic_offset: false,
        min_binding_size: wgpu::BufferSize::new(std::mem::size_of::<Content>() as u64),
    }
}
