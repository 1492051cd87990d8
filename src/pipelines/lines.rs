use crate::{
    data_structures::{mesh::{LineVertex, Vertex}, texture::Texture},
    pipelines::basic::{PipelineDesc, mk_render_pipeline},
};

pub fn mk_lines_pipeline(
    device: &wgpu::Device,
    format: wgpu::TextureFormat,
    sample_count: u32,
    camera_bind_group_layout: &wgpu::BindGroupLayout,
) -> wgpu::RenderPipeline {
    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("Lines Pipeline Layout"),
        bind_group_layouts: &[camera_bind_group_layout],
        push_constant_ranges: &[],
    });
    let shader = wgpu::ShaderModuleDescriptor {
        label: Some("Lines Shader"),
        source: wgpu::ShaderSource::Wgsl(include_str!("lines.wgsl").into()),
    };
    mk_render_pipeline(
        device,
        PipelineDesc {
            label: "Lines Pipeline",
            layout: &layout,
            color_format: Some(format),
            depth_format: Some(Texture::DEPTH_FORMAT),
            depth_bias: wgpu::DepthBiasState::default(),
            sample_count,
            topology: wgpu::PrimitiveTopology::LineList,
            vertex_layouts: &[LineVertex::desc()],
        },
        shader,
    )
}
