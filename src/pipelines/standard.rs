use crate::{
    data_structures::{instance::InstanceRaw, mesh::{MeshVertex, Vertex}, texture::Texture},
    pipelines::basic::{PipelineDesc, mk_render_pipeline},
};

/// Group 0 of the standard pipeline: the material uniform.
pub fn mk_bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        }],
        label: Some("standard_material_bind_group_layout"),
    })
}

pub fn mk_standard_pipeline(
    device: &wgpu::Device,
    format: wgpu::TextureFormat,
    sample_count: u32,
    material_bind_group_layout: &wgpu::BindGroupLayout,
    camera_bind_group_layout: &wgpu::BindGroupLayout,
    light_bind_group_layout: &wgpu::BindGroupLayout,
) -> wgpu::RenderPipeline {
    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("Standard Pipeline Layout"),
        bind_group_layouts: &[
            material_bind_group_layout,
            camera_bind_group_layout,
            light_bind_group_layout,
        ],
        push_constant_ranges: &[],
    });
    let shader = wgpu::ShaderModuleDescriptor {
        label: Some("Standard Shader"),
        source: wgpu::ShaderSource::Wgsl(include_str!("standard.wgsl").into()),
    };
    mk_render_pipeline(
        device,
        PipelineDesc {
            label: "Standard Pipeline",
            layout: &layout,
            color_format: Some(format),
            depth_format: Some(Texture::DEPTH_FORMAT),
            depth_bias: wgpu::DepthBiasState::default(),
            sample_count,
            topology: wgpu::PrimitiveTopology::TriangleList,
            vertex_layouts: &[MeshVertex::desc(), InstanceRaw::desc()],
        },
        shader,
    )
}
