//! Vertex formats, CPU-side geometry and GPU meshes.

use std::ops::Range;

use cgmath::Vector3;
use wgpu::util::DeviceExt;

pub trait Vertex {
    fn desc() -> wgpu::VertexBufferLayout<'static>;
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub tex_coords: [f32; 2],
}

impl Vertex for MeshVertex {
    fn desc() -> wgpu::VertexBufferLayout<'static> {
        use std::mem;
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<MeshVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 6]>() as wgpu::BufferAddress,
                    shader_location: 2,
                    format: wgpu::VertexFormat::Float32x2,
                },
            ],
        }
    }
}

/// Indexed triangle list living in CPU memory.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Geometry {
    pub vertices: Vec<MeshVertex>,
    pub indices: Vec<u32>,
}

impl Geometry {
    pub fn new(vertices: Vec<MeshVertex>, indices: Vec<u32>) -> Self {
        Self { vertices, indices }
    }

    /// Axis aligned bounding box as (min, max). `None` for empty geometry.
    pub fn bounding_box(&self) -> Option<(Vector3<f32>, Vector3<f32>)> {
        let first: Vector3<f32> = self.vertices.first()?.position.into();
        Some(self.vertices.iter().fold((first, first), |(min, max), v| {
            let p: Vector3<f32> = v.position.into();
            (
                Vector3::new(min.x.min(p.x), min.y.min(p.y), min.z.min(p.z)),
                Vector3::new(max.x.max(p.x), max.y.max(p.y), max.z.max(p.z)),
            )
        }))
    }

    pub fn translate(&mut self, offset: Vector3<f32>) {
        for v in self.vertices.iter_mut() {
            v.position[0] += offset.x;
            v.position[1] += offset.y;
            v.position[2] += offset.z;
        }
    }

    /// Move the geometry so that its bounding box is centred on the origin.
    pub fn center(&mut self) -> &mut Self {
        if let Some((min, max)) = self.bounding_box() {
            self.translate(-(min + max) * 0.5);
        }
        self
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// A geometry uploaded to the GPU.
#[derive(Debug)]
pub struct Mesh {
    pub name: String,
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub num_elements: u32,
}

impl Mesh {
    pub fn new(device: &wgpu::Device, name: &str, geometry: &Geometry) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{name} Vertex Buffer")),
            contents: bytemuck::cast_slice(&geometry.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{name} Index Buffer")),
            contents: bytemuck::cast_slice(&geometry.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        Self {
            name: name.to_string(),
            vertex_buffer,
            index_buffer,
            num_elements: geometry.indices.len() as u32,
        }
    }
}

pub trait DrawMesh<'a> {
    /// Draws `instances` of `mesh`. The instance buffer must already be bound to slot 1
    /// and all bind groups of the active pipeline must be set.
    fn draw_mesh_instanced(&mut self, mesh: &'a Mesh, instances: Range<u32>);
}

impl<'a> DrawMesh<'a> for wgpu::RenderPass<'a> {
    fn draw_mesh_instanced(&mut self, mesh: &'a Mesh, instances: Range<u32>) {
        self.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
        self.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        self.draw_indexed(0..mesh.num_elements, 0, instances);
    }
}

/// Coloured vertex for line helpers.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LineVertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

impl Vertex for LineVertex {
    fn desc() -> wgpu::VertexBufferLayout<'static> {
        use std::mem;
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<LineVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x3,
                },
            ],
        }
    }
}
