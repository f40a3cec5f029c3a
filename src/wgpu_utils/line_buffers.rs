// src/wgpu_utils/line_buffers.rs
//! GPU-side storage for line geometry
//!
//! One vertex buffer per attribute stream plus a `Uint16` index buffer.
//! Only streams flagged `needs_update` are re-uploaded; a stream whose
//! storage was reallocated gets a fresh buffer.

use wgpu::util::DeviceExt;

use crate::gfx::geometry::{BufferAttribute, GeometryProvider};

const fn float_attribute(shader_location: u32, format: wgpu::VertexFormat) -> [wgpu::VertexAttribute; 1] {
    [wgpu::VertexAttribute {
        offset: 0,
        shader_location,
        format,
    }]
}

/// Shader inputs in `GeometryProvider::attributes` order:
/// position, previous, next, side, width, uv, counters
static LINE_ATTRIBUTES: [[wgpu::VertexAttribute; 1]; 7] = [
    float_attribute(0, wgpu::VertexFormat::Float32x3),
    float_attribute(1, wgpu::VertexFormat::Float32x3),
    float_attribute(2, wgpu::VertexFormat::Float32x3),
    float_attribute(3, wgpu::VertexFormat::Float32),
    float_attribute(4, wgpu::VertexFormat::Float32),
    float_attribute(5, wgpu::VertexFormat::Float32x2),
    float_attribute(6, wgpu::VertexFormat::Float32),
];

const LINE_ITEM_SIZES: [usize; 7] = [3, 3, 3, 1, 1, 2, 1];

struct StreamBuffer {
    buffer: wgpu::Buffer,
    generation: u32,
}

impl StreamBuffer {
    fn create<T: bytemuck::Pod>(
        device: &wgpu::Device,
        attribute: &BufferAttribute<T>,
        usage: wgpu::BufferUsages,
    ) -> Self {
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("Line Buffer: {}", attribute.name())),
            contents: bytemuck::cast_slice(attribute.array()),
            usage: usage | wgpu::BufferUsages::COPY_DST,
        });

        Self {
            buffer,
            generation: attribute.generation(),
        }
    }

    /// Push pending changes, returns whether anything was written
    fn sync<T: bytemuck::Pod>(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        attribute: &mut BufferAttribute<T>,
        usage: wgpu::BufferUsages,
    ) -> bool {
        if !attribute.needs_update() {
            return false;
        }

        if attribute.generation() != self.generation {
            *self = Self::create(device, attribute, usage);
        } else {
            queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(attribute.array()));
        }
        attribute.clear_update();
        true
    }
}

/// GPU buffers mirroring a line geometry
pub struct LineGpuBuffers {
    vertex_buffers: Vec<StreamBuffer>,
    index_buffer: StreamBuffer,
    index_count: u32,
}

impl LineGpuBuffers {
    /// Create buffers for every stream of `geometry` and clear its dirty flags
    pub fn new<G: GeometryProvider>(device: &wgpu::Device, geometry: &mut G) -> Self {
        let vertex_buffers = geometry
            .attributes_mut()
            .into_iter()
            .map(|attribute| {
                let stream = StreamBuffer::create(device, attribute, wgpu::BufferUsages::VERTEX);
                attribute.clear_update();
                stream
            })
            .collect();

        let index = geometry.index_mut();
        let index_buffer = StreamBuffer::create(device, index, wgpu::BufferUsages::INDEX);
        index.clear_update();

        Self {
            vertex_buffers,
            index_buffer,
            index_count: index.count() as u32,
        }
    }

    /// Upload every stream flagged as changed. Returns the number of streams written.
    pub fn upload<G: GeometryProvider>(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        geometry: &mut G,
    ) -> usize {
        let mut written = 0;
        for (stream, attribute) in self.vertex_buffers.iter_mut().zip(geometry.attributes_mut()) {
            if stream.sync(device, queue, attribute, wgpu::BufferUsages::VERTEX) {
                written += 1;
            }
        }

        let index = geometry.index_mut();
        if self
            .index_buffer
            .sync(device, queue, index, wgpu::BufferUsages::INDEX)
        {
            written += 1;
        }
        self.index_count = index.count() as u32;

        if written > 0 {
            log::trace!("Uploaded {} line streams", written);
        }
        written
    }

    pub fn index_count(&self) -> u32 {
        self.index_count
    }

    /// Vertex buffer layouts matching the slot order used by [`DrawMeshLine`]
    pub fn vertex_buffer_layouts() -> [wgpu::VertexBufferLayout<'static>; 7] {
        std::array::from_fn(|i| wgpu::VertexBufferLayout {
            array_stride: (LINE_ITEM_SIZES[i] * std::mem::size_of::<f32>()) as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &LINE_ATTRIBUTES[i],
        })
    }
}

pub trait DrawMeshLine<'a> {
    fn draw_mesh_line(&mut self, buffers: &'a LineGpuBuffers);
}

impl<'a, 'b> DrawMeshLine<'b> for wgpu::RenderPass<'a>
where
    'b: 'a,
{
    fn draw_mesh_line(&mut self, buffers: &'b LineGpuBuffers) {
        if buffers.index_count == 0 {
            return;
        }
        for (slot, stream) in buffers.vertex_buffers.iter().enumerate() {
            self.set_vertex_buffer(slot as u32, stream.buffer.slice(..));
        }
        self.set_index_buffer(buffers.index_buffer.buffer.slice(..), wgpu::IndexFormat::Uint16);
        self.draw_indexed(0..buffers.index_count, 0, 0..1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::geometry::MeshLine;
    use cgmath::Point3;

    #[test]
    fn test_layouts_match_geometry_streams() {
        let line = MeshLine::from_points(&[Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0)], None)
            .unwrap();
        let layouts = LineGpuBuffers::vertex_buffer_layouts();

        for (i, (layout, attribute)) in layouts.iter().zip(line.attributes()).enumerate() {
            assert_eq!(layout.array_stride, (attribute.item_size() * 4) as u64);
            assert_eq!(layout.attributes.len(), 1);
            assert_eq!(layout.attributes[0].shader_location, i as u32);
            assert_eq!(
                layout.attributes[0].format.size(),
                layout.array_stride,
                "stream {}",
                attribute.name()
            );
        }
    }

    #[test]
    fn test_uv_layout() {
        let layouts = LineGpuBuffers::vertex_buffer_layouts();
        assert_eq!(layouts[5].attributes[0].format, wgpu::VertexFormat::Float32x2);
        assert_eq!(layouts[5].array_stride, 8);
    }
}
