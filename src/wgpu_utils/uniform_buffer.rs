// src/wgpu_utils/uniform_buffer.rs
use std::marker::PhantomData;

fn short_type_name<T>() -> &'static str {
    let type_name = std::any::type_name::<T>();
    let pos = type_name.rfind(':').unwrap_or(0);
    if pos > 0 {
        &type_name[(pos + 1)..]
    } else {
        type_name
    }
}

/// Typed uniform buffer holding exactly one `Content`
///
/// Rewritten in full on every [`UniformBuffer::write`].
pub struct UniformBuffer<Content> {
    buffer: wgpu::Buffer,
    content_type: PhantomData<Content>,
}

impl<Content: bytemuck::Pod> UniformBuffer<Content> {
    pub fn new(device: &wgpu::Device) -> Self {
        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(&format!("UniformBuffer: {}", short_type_name::<Content>())),
            size: std::mem::size_of::<Content>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        UniformBuffer {
            buffer,
            content_type: PhantomData,
        }
    }

    pub fn write(&self, queue: &wgpu::Queue, content: Content) {
        queue.write_buffer(&self.buffer, 0, bytemuck::bytes_of(&content));
    }

    pub fn binding_resource(&self) -> wgpu::BindingResource<'_> {
        self.buffer.as_entire_binding()
    }
}

/// Growable vertex buffer for one flat attribute stream
///
/// The stream length changes whenever objects change, so the buffer is
/// recreated with the new size when the data no longer fits.
pub struct VertexStreamBuffer<Element> {
    label: String,
    buffer: wgpu::Buffer,
    element_type: PhantomData<Element>,
    capacity: usize,
    len: usize,
}

impl<Element: bytemuck::Pod> VertexStreamBuffer<Element> {
    /// Minimum allocation so that an empty scene still gets a valid buffer
    const MIN_ELEMENTS: usize = 4;

    pub fn new(device: &wgpu::Device, label: &str) -> Self {
        let label = format!("VertexStream<{}>: {}", short_type_name::<Element>(), label);
        let buffer = Self::allocate(device, &label, Self::MIN_ELEMENTS);
        VertexStreamBuffer {
            label,
            buffer,
            element_type: PhantomData,
            capacity: Self::MIN_ELEMENTS,
            len: 0,
        }
    }

    fn allocate(device: &wgpu::Device, label: &str, capacity: usize) -> wgpu::Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: (capacity * std::mem::size_of::<Element>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    /// Uploads `data`, reallocating if it exceeds the current capacity
    pub fn upload(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, data: &[Element]) {
        if data.len() > self.capacity {
            let capacity = data.len().next_power_of_two();
            log::debug!(
                "growing {} from {} to {} elements",
                self.label,
                self.capacity,
                capacity
            );
            self.buffer = Self::allocate(device, &self.label, capacity);
            self.capacity = capacity;
        }
        if !data.is_empty() {
            queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(data));
        }
        self.len = data.len();
    }

    /// Slice covering the uploaded elements only
    pub fn slice(&self) -> wgpu::BufferSlice<'_> {
        let end = (self.len.max(1) * std::mem::size_of::<Element>()) as u64;
        self.buffer.slice(..end)
    }
}
