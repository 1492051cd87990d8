//! Surface materials.
//!
//! Two shading models are supported: matcap (a lit-sphere image indexed by the
//! view-space normal, no lights) and standard (base colour, roughness and metalness
//! lit by the scene's light rig). Each material owns the bind group its pipeline
//! expects at group 0.

use wgpu::util::DeviceExt;

use crate::data_structures::{color::Color, texture::Texture};

/// Index of a material inside a [`crate::data_structures::scene::Scene`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MaterialId(pub(crate) usize);

#[derive(Debug)]
pub struct MatcapMaterial {
    pub name: String,
    pub matcap: Texture,
    pub bind_group: wgpu::BindGroup,
}

impl MatcapMaterial {
    pub fn new(device: &wgpu::Device, layout: &wgpu::BindGroupLayout, name: &str, matcap: Texture) -> Self {
        let bind_group = matcap_bind_group(device, layout, name, &matcap);
        Self {
            name: name.to_string(),
            matcap,
            bind_group,
        }
    }

    /// Replace the matcap image. Every mesh using this material picks it up on the next frame.
    pub fn set_matcap(&mut self, device: &wgpu::Device, layout: &wgpu::BindGroupLayout, matcap: Texture) {
        self.bind_group = matcap_bind_group(device, layout, &self.name, &matcap);
        self.matcap = matcap;
    }
}

fn matcap_bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    name: &str,
    matcap: &Texture,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(&matcap.view),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Sampler(&matcap.sampler),
            },
        ],
        label: Some(name),
    })
}

/// Parameters of the lit material.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StandardParams {
    pub color: Color,
    pub roughness: f32,
    pub metalness: f32,
}

impl Default for StandardParams {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
            roughness: 1.0,
            metalness: 0.0,
        }
    }
}

impl StandardParams {
    pub fn with_roughness(mut self, roughness: f32) -> Self {
        self.roughness = roughness;
        self
    }

    pub fn to_uniform(&self) -> StandardUniform {
        StandardUniform {
            color: [self.color.r, self.color.g, self.color.b, 1.0],
            roughness: self.roughness.clamp(0.0, 1.0),
            metalness: self.metalness.clamp(0.0, 1.0),
            _padding: [0.0; 2],
        }
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct StandardUniform {
    color: [f32; 4],
    roughness: f32,
    metalness: f32,
    // uniforms are laid out in 16 byte blocks
    _padding: [f32; 2],
}

#[derive(Debug)]
pub struct StandardMaterial {
    pub name: String,
    #[allow(unused)]
    buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
}

impl StandardMaterial {
    pub fn new(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        name: &str,
        params: StandardParams,
    ) -> Self {
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{name} Material Buffer")),
            contents: bytemuck::cast_slice(&[params.to_uniform()]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
            label: Some(name),
        });
        Self {
            name: name.to_string(),
            buffer,
            bind_group,
        }
    }
}

#[derive(Debug)]
pub enum Material {
    Matcap(MatcapMaterial),
    Standard(StandardMaterial),
}

impl Material {
    pub fn bind_group(&self) -> &wgpu::BindGroup {
        match self {
            Material::Matcap(m) => &m.bind_group,
            Material::Standard(m) => &m.bind_group,
        }
    }
}

impl From<MatcapMaterial> for Material {
    fn from(m: MatcapMaterial) -> Self {
        Material::Matcap(m)
    }
}

impl From<StandardMaterial> for Material {
    fn from(m: StandardMaterial) -> Self {
        Material::Standard(m)
    }
}
