use wgpu::util::DeviceExt;

use crate::data_structures::{
    light::{LightRig, LightsUniform},
    texture::Texture,
};

/// GPU side of the light rig: the lights uniform and the directional shadow map.
///
/// Two bind groups share the uniform buffer. `bind_group` also exposes the shadow
/// map for sampling in the lit pass; `shadow_bind_group` only carries the buffer so
/// it can be bound while the shadow map is the render target.
#[derive(Debug)]
pub struct LightResources {
    pub uniform: LightsUniform,
    pub buffer: wgpu::Buffer,
    pub shadow_map: Texture,
    pub bind_group: wgpu::BindGroup,
    pub bind_group_layout: wgpu::BindGroupLayout,
    pub shadow_bind_group: wgpu::BindGroup,
    pub shadow_bind_group_layout: wgpu::BindGroupLayout,
}

impl LightResources {
    pub fn new(device: &wgpu::Device) -> Self {
        let uniform = LightsUniform::default();
        let buffer = mk_buffer(device, uniform);
        let shadow_map = Texture::create_shadow_map(device);
        let bind_group_layout = mk_bind_group_layout(device);
        let shadow_bind_group_layout = mk_shadow_bind_group_layout(device);
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&shadow_map.view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(&shadow_map.sampler),
                },
            ],
            label: Some("light_bind_group"),
        });
        let shadow_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &shadow_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
            label: Some("shadow_bind_group"),
        });
        Self {
            uniform,
            buffer,
            shadow_map,
            bind_group,
            bind_group_layout,
            shadow_bind_group,
            shadow_bind_group_layout,
        }
    }

    /// Pack `rig` and upload it. Shadows are sampled only if `shadows_enabled` and the
    /// rig has a shadow casting directional light.
    pub fn write(&mut self, queue: &wgpu::Queue, rig: &LightRig, shadows_enabled: bool) {
        self.uniform = rig.to_uniform(shadows_enabled);
        queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(&[self.uniform]));
    }

    /// Whether the last written rig needs a shadow pass.
    pub fn shadows_active(&self) -> bool {
        self.uniform.flags[0] > 0.5
    }
}

fn mk_buffer(device: &wgpu::Device, uniform: LightsUniform) -> wgpu::Buffer {
    device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("Lights Buffer"),
        contents: bytemuck::cast_slice(&[uniform]),
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
    })
}

fn mk_bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        entries: &[
            wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: 1,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Texture {
                    multisampled: false,
                    view_dimension: wgpu::TextureViewDimension::D2,
                    sample_type: wgpu::TextureSampleType::Depth,
                },
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: 2,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Comparison),
                count: None,
            },
        ],
        label: Some("light_bind_group_layout"),
    })
}

fn mk_shadow_bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        }],
        label: Some("shadow_bind_group_layout"),
    })
}
