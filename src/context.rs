//! The render context shared by all flows.
//!
//! [`Context`] owns the surface, device and queue together with the camera, the
//! light resources and every pipeline. Flows receive it by reference in each
//! lifecycle hook; only `on_init` and `Out::Configure` get mutable access.

use std::sync::Arc;

use cgmath::Deg;
use wgpu::util::DeviceExt;
use winit::{dpi::PhysicalSize, window::Window};

use crate::{
    camera::{Camera, CameraResources, CameraUniform, OrbitController, Projection},
    data_structures::texture::Texture,
    pipelines::{Layouts, Pipelines, light::LightResources, matcap, standard},
    render::Render,
    viewport::Viewport,
};

pub const FIELD_OF_VIEW: Deg<f32> = Deg(75.0);
pub const Z_NEAR: f32 = 0.1;
pub const Z_FAR: f32 = 100.0;
/// Samples per pixel of the main pass when the adapter supports it.
pub const MSAA_SAMPLES: u32 = 4;

/// Sample count for the main pass: [`MSAA_SAMPLES`] if both the surface format and
/// the depth format can be multisampled that often and the colour can be resolved,
/// else 1.
pub fn supported_sample_count(
    color: wgpu::TextureFormatFeatureFlags,
    depth: wgpu::TextureFormatFeatureFlags,
) -> u32 {
    let resolvable = color.contains(wgpu::TextureFormatFeatureFlags::MULTISAMPLE_RESOLVE);
    if resolvable && color.sample_count_supported(MSAA_SAMPLES) && depth.sample_count_supported(MSAA_SAMPLES) {
        MSAA_SAMPLES
    } else {
        1
    }
}

/// Something with GPU buffers that can describe how it is drawn.
pub trait GPUResource {
    /// Upload pending CPU-side changes.
    fn write_to_buffer(&mut self, queue: &wgpu::Queue);

    fn get_render(&self) -> Render<'_>;
}

/// The part of the [`Context`] flow constructors need to create GPU resources.
///
/// Device and queue are reference counted handles, cloning them is cheap.
#[derive(Debug, Clone)]
pub struct InitContext {
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub format: wgpu::TextureFormat,
    pub layouts: Layouts,
}

impl From<&Context> for InitContext {
    fn from(ctx: &Context) -> Self {
        Self {
            device: ctx.device.clone(),
            queue: ctx.queue.clone(),
            format: ctx.config.format,
            layouts: ctx.layouts.clone(),
        }
    }
}

#[derive(Debug)]
pub struct Context {
    pub(crate) window: Arc<Window>,
    pub(crate) depth_texture: Texture,
    /// Multisampled colour target, `None` when `sample_count` is 1.
    pub(crate) msaa_target: Option<wgpu::TextureView>,
    pub sample_count: u32,
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    pub viewport: Viewport,
    pub camera: CameraResources,
    pub projection: Projection,
    pub light: LightResources,
    pub layouts: Layouts,
    pub pipelines: Pipelines,
    pub clear_colour: wgpu::Color,
    /// Render the directional shadow map when the light rig asks for it.
    pub shadows: bool,
}

impl Context {
    pub async fn new(window: Arc<Window>) -> anyhow::Result<Self> {
        let viewport = Viewport::from_physical(window.inner_size(), window.scale_factor());
        let size = surface_size(&viewport);

        log::info!("WGPU setup");
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            #[cfg(not(target_arch = "wasm32"))]
            backends: wgpu::Backends::PRIMARY,
            #[cfg(target_arch = "wasm32")]
            backends: wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance.create_surface(window.clone())?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;
        log::info!("Device and queue on {}", adapter.get_info().name);
        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: None,
                required_features: wgpu::Features::empty(),
                // WebGL doesn't support all of wgpu's features
                required_limits: if cfg!(target_arch = "wasm32") {
                    wgpu::Limits::downlevel_webgl2_defaults()
                } else {
                    wgpu::Limits::default()
                },
                memory_hints: Default::default(),
                trace: wgpu::Trace::Off,
            })
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        // The shaders output linear colour and rely on an sRGB surface for encoding
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("the surface is not supported by the adapter"))?;
        let sample_count = supported_sample_count(
            adapter.get_texture_format_features(surface_format).flags,
            adapter.get_texture_format_features(Texture::DEPTH_FORMAT).flags,
        );
        log::info!("Rendering with {}x multisampling", sample_count);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width,
            height: size.height,
            present_mode: surface_caps.present_modes[0],
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };

        let camera = Camera::new((0.0, 0.0, 3.0), (0.0, 0.0, 0.0));
        let projection = Projection::new(viewport.width, viewport.height, FIELD_OF_VIEW, Z_NEAR, Z_FAR);
        let mut controller = OrbitController::new();
        controller.set_viewport_height(viewport.height);

        let mut camera_uniform = CameraUniform::new();
        camera_uniform.update_view_proj(&camera, &projection);

        let camera_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Camera Buffer"),
            contents: bytemuck::cast_slice(&[camera_uniform]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let camera_bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
            label: Some("camera_bind_group_layout"),
        });

        let camera_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &camera_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            }],
            label: Some("camera_bind_group"),
        });

        let light = LightResources::new(&device);

        let layouts = Layouts {
            camera: camera_bind_group_layout.clone(),
            matcap: matcap::mk_bind_group_layout(&device),
            standard: standard::mk_bind_group_layout(&device),
            light: light.bind_group_layout.clone(),
            shadow: light.shadow_bind_group_layout.clone(),
        };
        let pipelines = Pipelines::new(&device, config.format, sample_count, &layouts);

        let camera = CameraResources {
            camera,
            controller,
            uniform: camera_uniform,
            buffer: camera_buffer,
            bind_group: camera_bind_group,
            bind_group_layout: camera_bind_group_layout,
        };

        let depth_texture =
            Texture::create_depth_texture(&device, [config.width, config.height], sample_count, "depth_texture");
        let msaa_target = Texture::create_msaa_target(&device, &config, sample_count);

        Ok(Self {
            window,
            depth_texture,
            msaa_target,
            sample_count,
            surface,
            device,
            queue,
            config,
            viewport,
            camera,
            projection,
            light,
            layouts,
            pipelines,
            clear_colour: wgpu::Color::BLACK,
            shadows: false,
        })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    /// Apply a new viewport: camera aspect, drawing buffer, depth buffer and the
    /// multisampled colour target.
    ///
    /// Returns `false` and changes nothing if the viewport has a zero edge.
    pub fn resize(&mut self, viewport: Viewport) -> bool {
        if !viewport.is_drawable() {
            return false;
        }
        let size = surface_size(&viewport);
        self.viewport = viewport;
        self.config.width = size.width;
        self.config.height = size.height;
        self.projection.resize(viewport.width, viewport.height);
        self.camera.controller.set_viewport_height(viewport.height);
        self.surface.configure(&self.device, &self.config);
        self.depth_texture = Texture::create_depth_texture(
            &self.device,
            [self.config.width, self.config.height],
            self.sample_count,
            "depth_texture",
        );
        self.msaa_target = Texture::create_msaa_target(&self.device, &self.config, self.sample_count);
        log::debug!(
            "Resized to {}x{} (buffer {}x{}, pixel ratio {})",
            viewport.width,
            viewport.height,
            size.width,
            size.height,
            viewport.pixel_ratio()
        );
        true
    }

    /// Place the eye and the orbit target, dropping pending orbit motion.
    pub fn look_at<P: Into<cgmath::Point3<f32>>>(&mut self, eye: P, target: P) {
        self.camera.reset(eye, target);
        self.write_camera();
    }

    pub(crate) fn write_camera(&mut self) {
        self.camera.uniform.update_view_proj(&self.camera.camera, &self.projection);
        self.queue
            .write_buffer(&self.camera.buffer, 0, bytemuck::cast_slice(&[self.camera.uniform]));
    }
}

/// Size of the drawing buffer for `viewport`.
///
/// In the browser the canvas backing store is sized with the clamped pixel ratio.
/// Native swapchains must match the window's pixel size, so the window size is used.
fn surface_size(viewport: &Viewport) -> PhysicalSize<u32> {
    #[cfg(target_arch = "wasm32")]
    {
        viewport.drawing_buffer()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        PhysicalSize::new(viewport.width.max(1), viewport.height.max(1))
    }
}
