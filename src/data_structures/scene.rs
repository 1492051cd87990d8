//! The scene root: materials, instanced meshes, line helpers and lights.
//!
//! Nodes are appended and never removed. A [`MeshNode`] keeps a fixed number of
//! instances; its instance buffer is sized once and rewritten whenever the node
//! is marked dirty.

use wgpu::util::DeviceExt;

use crate::{
    context::GPUResource,
    data_structures::{
        geometry,
        instance::Instance,
        light::LightRig,
        material::{Material, MaterialId},
        mesh::{LineVertex, Mesh},
    },
    render::{Instanced, Lines, Render},
};

/// Index of a mesh node inside its [`Scene`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// One mesh drawn with one material, once per instance.
#[derive(Debug)]
pub struct MeshNode {
    pub name: String,
    pub mesh: Mesh,
    pub material: MaterialId,
    pub cast_shadow: bool,
    instances: Vec<Instance>,
    instance_buffer: wgpu::Buffer,
    dirty: bool,
}

impl MeshNode {
    pub fn new(device: &wgpu::Device, mesh: Mesh, material: MaterialId, instances: Vec<Instance>) -> Self {
        let instance_data = instances.iter().map(Instance::to_raw).collect::<Vec<_>>();
        let instance_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{} Instance Buffer", mesh.name)),
            contents: bytemuck::cast_slice(&instance_data),
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        });
        Self {
            name: mesh.name.clone(),
            mesh,
            material,
            cast_shadow: false,
            instances,
            instance_buffer,
            dirty: false,
        }
    }

    pub fn with_cast_shadow(mut self, cast_shadow: bool) -> Self {
        self.cast_shadow = cast_shadow;
        self
    }

    pub fn instances(&self) -> &[Instance] {
        &self.instances
    }

    /// Mutable access to the instances. The count is fixed, the node is re-uploaded
    /// on the next [`MeshNode::write_to_buffer`].
    pub fn instances_mut(&mut self) -> &mut [Instance] {
        self.dirty = true;
        &mut self.instances
    }

    pub fn write_to_buffer(&mut self, queue: &wgpu::Queue) {
        if !self.dirty {
            return;
        }
        let instance_data = self.instances.iter().map(Instance::to_raw).collect::<Vec<_>>();
        queue.write_buffer(&self.instance_buffer, 0, bytemuck::cast_slice(&instance_data));
        self.dirty = false;
    }
}

/// A set of coloured line segments, e.g. an axes helper.
#[derive(Debug)]
pub struct LineNode {
    pub name: String,
    vertex_buffer: wgpu::Buffer,
    vertex_count: u32,
}

impl LineNode {
    pub fn new(device: &wgpu::Device, name: &str, vertices: &[LineVertex]) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{name} Line Buffer")),
            contents: bytemuck::cast_slice(vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        Self {
            name: name.to_string(),
            vertex_buffer,
            vertex_count: vertices.len() as u32,
        }
    }

    /// Red, green and blue lines of length `size` along x, y and z.
    pub fn axes(device: &wgpu::Device, size: f32) -> Self {
        Self::new(device, "axes", &geometry::axes(size))
    }
}

#[derive(Debug, Default)]
pub struct Scene {
    materials: Vec<Material>,
    nodes: Vec<MeshNode>,
    lines: Vec<LineNode>,
    pub lights: LightRig,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_material<M: Into<Material>>(&mut self, material: M) -> MaterialId {
        self.materials.push(material.into());
        MaterialId(self.materials.len() - 1)
    }

    pub fn material(&self, id: MaterialId) -> Option<&Material> {
        self.materials.get(id.0)
    }

    pub fn material_mut(&mut self, id: MaterialId) -> Option<&mut Material> {
        self.materials.get_mut(id.0)
    }

    pub fn add(&mut self, node: MeshNode) -> NodeId {
        log::debug!("Adding {} ({} instances)", node.name, node.instances.len());
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }

    pub fn add_lines(&mut self, lines: LineNode) {
        self.lines.push(lines);
    }

    pub fn node(&self, id: NodeId) -> Option<&MeshNode> {
        self.nodes.get(id.0)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut MeshNode> {
        self.nodes.get_mut(id.0)
    }

    pub fn nodes(&self) -> &[MeshNode] {
        &self.nodes
    }
}

impl GPUResource for Scene {
    fn write_to_buffer(&mut self, queue: &wgpu::Queue) {
        self.nodes.iter_mut().for_each(|node| node.write_to_buffer(queue));
    }

    fn get_render(&self) -> Render<'_> {
        let mut renders = Vec::with_capacity(self.nodes.len() + self.lines.len());
        for node in &self.nodes {
            let Some(material) = self.material(node.material) else {
                log::warn!("{} references a material that does not exist", node.name);
                continue;
            };
            renders.push(Render::Default(Instanced {
                instance: &node.instance_buffer,
                mesh: &node.mesh,
                material,
                amount: node.instances.len(),
                casts_shadow: node.cast_shadow,
            }));
        }
        for line in &self.lines {
            renders.push(Render::Lines(Lines {
                vertex: &line.vertex_buffer,
                amount: line.vertex_count,
            }));
        }
        Render::Composed(renders)
    }
}
