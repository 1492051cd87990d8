//! Render pipelines and the bind group layouts they share.

pub mod basic;
pub mod light;
pub mod lines;
pub mod matcap;
pub mod shadow;
pub mod standard;

/// All pipelines used by the engine, built once per surface format.
///
/// The main pass pipelines render with `sample_count` samples, the shadow pipeline
/// always with one.
#[derive(Debug)]
pub struct Pipelines {
    pub matcap: wgpu::RenderPipeline,
    pub standard: wgpu::RenderPipeline,
    pub shadow: wgpu::RenderPipeline,
    pub lines: wgpu::RenderPipeline,
}

/// Bind group layouts a flow needs to create materials.
#[derive(Debug, Clone)]
pub struct Layouts {
    pub camera: wgpu::BindGroupLayout,
    pub matcap: wgpu::BindGroupLayout,
    pub standard: wgpu::BindGroupLayout,
    pub light: wgpu::BindGroupLayout,
    pub shadow: wgpu::BindGroupLayout,
}

impl Pipelines {
    pub fn new(device: &wgpu::Device, format: wgpu::TextureFormat, sample_count: u32, layouts: &Layouts) -> Self {
        Self {
            matcap: matcap::mk_matcap_pipeline(device, format, sample_count, &layouts.matcap, &layouts.camera),
            standard: standard::mk_standard_pipeline(
                device,
                format,
                sample_count,
                &layouts.standard,
                &layouts.camera,
                &layouts.light,
            ),
            shadow: shadow::mk_shadow_pipeline(device, &layouts.shadow),
            lines: lines::mk_lines_pipeline(device, format, sample_count, &layouts.camera),
        }
    }
}
