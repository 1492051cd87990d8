use crate::{
    data_structures::{instance::InstanceRaw, mesh::{MeshVertex, Vertex}, texture::Texture},
    pipelines::basic::{PipelineDesc, mk_render_pipeline},
};

/// Depth-only pipeline rendering shadow casters from the directional light.
pub fn mk_shadow_pipeline(
    device: &wgpu::Device,
    shadow_bind_group_layout: &wgpu::BindGroupLayout,
) -> wgpu::RenderPipeline {
    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("Shadow Pipeline Layout"),
        bind_group_layouts: &[shadow_bind_group_layout],
        push_constant_ranges: &[],
    });
    let shader = wgpu::ShaderModuleDescriptor {
        label: Some("Shadow Shader"),
        source: wgpu::ShaderSource::Wgsl(include_str!("shadow.wgsl").into()),
    };
    mk_render_pipeline(
        device,
        PipelineDesc {
            label: "Shadow Pipeline",
            layout: &layout,
            color_format: None,
            depth_format: Some(Texture::DEPTH_FORMAT),
            // against acne on surfaces facing the light
            depth_bias: wgpu::DepthBiasState {
                constant: 2,
                slope_scale: 2.0,
                clamp: 0.0,
            },
            sample_count: 1,
            topology: wgpu::PrimitiveTopology::TriangleList,
            vertex_layouts: &[MeshVertex::desc(), InstanceRaw::desc()],
        },
        shader,
    )
}
