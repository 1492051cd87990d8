/// Shared render pipeline construction.
///
/// `color_format` is `None` for depth-only passes (the shadow map); line pipelines
/// pass a line topology and are not culled. `sample_count` must match the
/// attachments of the pass the pipeline is used in.
pub struct PipelineDesc<'a> {
    pub label: &'a str,
    pub layout: &'a wgpu::PipelineLayout,
    pub color_format: Option<wgpu::TextureFormat>,
    pub depth_format: Option<wgpu::TextureFormat>,
    pub depth_bias: wgpu::DepthBiasState,
    pub topology: wgpu::PrimitiveTopology,
    pub sample_count: u32,
    pub vertex_layouts: &'a [wgpu::VertexBufferLayout<'a>],
}

pub fn mk_render_pipeline(
    device: &wgpu::Device,
    desc: PipelineDesc,
    shader: wgpu::ShaderModuleDescriptor,
) -> wgpu::RenderPipeline {
    let shader = device.create_shader_module(shader);
    let targets = [desc.color_format.map(|format| wgpu::ColorTargetState {
        format,
        blend: Some(wgpu::BlendState {
            alpha: wgpu::BlendComponent::REPLACE,
            color: wgpu::BlendComponent::REPLACE,
        }),
        write_mask: wgpu::ColorWrites::ALL,
    })];
    let cull_mode = match desc.topology {
        wgpu::PrimitiveTopology::TriangleList | wgpu::PrimitiveTopology::TriangleStrip => {
            Some(wgpu::Face::Back)
        }
        _ => None,
    };

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        cache: None,
        label: Some(desc.label),
        layout: Some(desc.layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            buffers: desc.vertex_layouts,
            compilation_options: Default::default(),
        },
        fragment: desc.color_format.map(|_| wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_main"),
            targets: &targets,
            compilation_options: Default::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology: desc.topology,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode,
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },
        depth_stencil: desc.depth_format.map(|format| wgpu::DepthStencilState {
            format,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: wgpu::StencilState::default(),
            bias: desc.depth_bias,
        }),
        multisample: wgpu::MultisampleState {
            count: desc.sample_count,
            mask: !0,
            alpha_to_coverage_enabled: false,
        },
        multiview: None,
    })
}
