// src/wgpu_utils/uniform_buffer.rs
use std::marker::PhantomData;
use wgpu::util::DeviceExt;

/// Typed uniform buffer that remembers what it holds
///
/// Writes of unchanged content are skipped, so uniforms can be pushed every
/// frame without tracking dirtiness by hand.
pub struct UniformBuffer<Content> {
    buffer: wgpu::Buffer,
    content_type: PhantomData<Content>,
    uploaded: Vec<u8>,
}

/// Last path segment of a type name, used as a buffer label
fn short_type_name(type_name: &str) -> &str {
    let generic_start = type_name.find('<').unwrap_or(type_name.len());
    match type_name[..generic_start].rfind("::") {
        Some(pos) => &type_name[pos + 2..],
        None => type_name,
    }
}

impl<Content: bytemuck::Pod> UniformBuffer<Content> {
    /// Buffer filled with zeroes
    pub fn new(device: &wgpu::Device) -> Self {
        Self::new_with_data(device, &<Content as bytemuck::Zeroable>::zeroed())
    }

    pub fn new_with_data(device: &wgpu::Device, initial_content: &Content) -> Self {
        let bytes = bytemuck::bytes_of(initial_content);
        let label = format!(
            "{} Uniform Buffer",
            short_type_name(std::any::type_name::<Content>())
        );
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&label),
            contents: bytes,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        UniformBuffer {
            buffer,
            content_type: PhantomData,
            uploaded: bytes.to_vec(),
        }
    }

    /// Queues a write unless `content` is what the buffer already holds
    pub fn update_content(&mut self, queue: &wgpu::Queue, content: Content) -> bool {
        let bytes = bytemuck::bytes_of(&content);
        if self.uploaded == bytes {
            return false;
        }
        queue.write_buffer(&self.buffer, 0, bytes);
        self.uploaded.clear();
        self.uploaded.extend_from_slice(bytes);
        true
    }

    pub fn binding_resource(&self) -> wgpu::BindingResource<'_> {
        self.buffer.as_entire_binding()
    }

    pub fn buffer(&self) -> &wgpu::Buffer {
        &self.buffer
    }
}

#[cfg(test)]
mod tests {
    use super::short_type_name;

    #[test]
    fn labels_use_the_last_path_segment() {
        assert_eq!(
            short_type_name("shadowbox::gfx::resources::global_bindings::GlobalUniform"),
            "GlobalUniform"
        );
        assert_eq!(short_type_name("ObjectUniform"), "ObjectUniform");
        assert_eq!(short_type_name("a::Wrapper<b::Inner>"), "Wrapper<b::Inner>");
    }
}
