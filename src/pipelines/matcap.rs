use crate::{
    data_structures::{instance::InstanceRaw, mesh::{MeshVertex, Vertex}, texture::Texture},
    pipelines::basic::{PipelineDesc, mk_render_pipeline},
};

/// Group 0 of the matcap pipeline: the matcap image and its sampler.
pub fn mk_bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        entries: &[
            wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Texture {
                    multisampled: false,
                    view_dimension: wgpu::TextureViewDimension::D2,
                    sample_type: wgpu::TextureSampleType::Float { filterable: true },
                },
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: 1,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                count: None,
            },
        ],
        label: Some("matcap_bind_group_layout"),
    })
}

pub fn mk_matcap_pipeline(
    device: &wgpu::Device,
    format: wgpu::TextureFormat,
    sample_count: u32,
    matcap_bind_group_layout: &wgpu::BindGroupLayout,
    camera_bind_group_layout: &wgpu::BindGroupLayout,
) -> wgpu::RenderPipeline {
    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("Matcap Pipeline Layout"),
        bind_group_layouts: &[matcap_bind_group_layout, camera_bind_group_layout],
        push_constant_ranges: &[],
    });
    let shader = wgpu::ShaderModuleDescriptor {
        label: Some("Matcap Shader"),
        source: wgpu::ShaderSource::Wgsl(include_str!("matcap.wgsl").into()),
    };
    mk_render_pipeline(
        device,
        PipelineDesc {
            label: "Matcap Pipeline",
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
