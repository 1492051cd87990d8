//! Flow control and application event loop.
//!
//! A "flow" is a self-contained part of a scene: it owns its GPU resources, reacts
//! to input, advances its animation and describes what it wants drawn each frame.
//! The engine owns the window and the [`Context`], drives the flows and composes
//! their renders into one frame.
//!
//! # User-facing types
//!
//! - [`GraphicsFlow<S, E>`] is the trait for scene parts that handle events and rendering
//! - [`Out<E>`] is the output type for async event handling and context configuration
//!
//! # Lifecycle Flow
//!
//! Each frame:
//! 1. Window events go to the orbit controller and then to every flow
//! 2. The clock is sampled and `on_update` is called on all flows
//! 3. The orbit controller moves the camera and the camera uniform is uploaded
//! 4. The first flow providing a light rig has it uploaded
//! 5. Flows' `on_render()` are collected and batched per pipeline
//! 6. The shadow map is rendered if the light rig casts shadows
//! 7. The main pass is rendered, resolved from its multisampled target when there
//!    is one, and presented

use std::{fmt::Debug, iter, pin::Pin, sync::Arc};

use futures::{StreamExt, stream::FuturesUnordered};

use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop, EventLoopProxy},
    window::Window,
};

use crate::{
    clock::{Clock, FrameTime},
    context::{Context, InitContext},
    data_structures::{light::LightRig, mesh::DrawMesh},
    render::{Batches, Render},
    viewport::Viewport,
};

#[cfg(target_arch = "wasm32")]
pub(crate) const CANVAS_SELECTOR: &str = "canvas#canvas";

///
/// This is the Output Type for every lifecycle hook where a flow can hand over async work
/// that is handled according to the platform you're running on.
///
/// `Out::FutEvent` resolves futures of events that are put into the event queue once
/// resolved. They come back through `on_custom_events` and have no side effects unless
/// handled there.
///
/// `Out::Configure` modifies the Context at runtime, for instance the clear colour.
///
/// `Empty` is the default output used when nothing has to be handled.
///
pub enum Out<E> {
    FutEvent(Vec<Box<dyn Future<Output = E>>>),
    Configure(Box<dyn FnOnce(&mut Context)>),
    Empty,
}

impl<E> Default for Out<E> {
    fn default() -> Self {
        Self::Empty
    }
}

/// Trait for implementing a part of a scene.
///
/// # Lifecycle
///
/// 1. `on_init()` is called once after all flows are constructed; configure the context
///    (camera, clear colour, shadows) and start asset loads here
/// 2. `on_window_events()` is called for each winit window event
/// 3. `on_update()` is called every frame before rendering
/// 4. `on_custom_events()` is called with resolved events
/// 5. `on_render()` is called each frame and specifies how to render `self`
///
pub trait GraphicsFlow<S, E> {
    /// Initialize the flow and configure the context.
    ///
    /// This is the only hook with mutable access to the Context.
    fn on_init(&mut self, ctx: &mut Context, state: &mut S) -> Out<E>;

    /// Update state every frame. `time` carries the elapsed time since the loop started.
    fn on_update(&mut self, ctx: &Context, state: &mut S, time: FrameTime) -> Out<E>;

    /// Handle window events (keyboard, mouse, resizing, ...).
    fn on_window_events(&mut self, _ctx: &Context, _state: &mut S, _event: &WindowEvent) -> Out<E> {
        Out::Empty
    }

    /// Handle custom application events.
    ///
    /// Returns the event if it was not consumed so it can be passed to the next flow.
    fn on_custom_events(&mut self, _ctx: &Context, _state: &mut S, event: E) -> Option<E> {
        Some(event)
    }

    /// The lights this flow wants uploaded for the frame.
    fn light_rig(&self) -> Option<&LightRig> {
        None
    }

    /// Return renderable objects for this flow.
    fn on_render(&self) -> Render<'_>;
}

// Dummy impl to make wasm work
impl<State, Event> Debug for dyn GraphicsFlow<State, Event> + 'static {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("GraphicsFlow")
    }
}

/// Type alias for a flow constructor (factory function).
///
/// A flow constructor takes an [`InitContext`] and asynchronously returns a boxed
/// `GraphicsFlow`, so flows can create their GPU resources before the first frame.
pub type FlowConstructor<S, E> =
    Box<dyn FnOnce(InitContext) -> Pin<Box<dyn Future<Output = Box<dyn GraphicsFlow<S, E>>>>>>;

/// Application state bundle: GPU context, app state, clock and surface status.
#[derive(Debug)]
pub struct AppState<State: 'static> {
    pub(crate) ctx: Context,
    state: State,
    clock: Clock,
    is_surface_configured: bool,
}

impl<State: Default> AppState<State> {
    async fn new(window: Arc<Window>) -> anyhow::Result<Self> {
        let ctx = Context::new(window).await?;
        Ok(Self {
            ctx,
            state: State::default(),
            clock: Clock::new(),
            is_surface_configured: false,
        })
    }

    fn resize(&mut self, viewport: Viewport) {
        if self.ctx.resize(viewport) {
            self.is_surface_configured = true;
        }
    }

    fn current_viewport(&self) -> Viewport {
        let window = &self.ctx.window;
        Viewport::from_physical(window.inner_size(), window.scale_factor())
    }

    fn render<Event>(&mut self, graphics_flows: &[Box<dyn GraphicsFlow<State, Event>>]) -> Result<(), wgpu::SurfaceError> {
        // invoke main render loop
        self.ctx.window.request_redraw();

        // Rendering requires the surface to be configured
        if !self.is_surface_configured {
            return Ok(());
        }

        let output = self.ctx.surface.get_current_texture()?;
        let view = output.texture.create_view(&wgpu::TextureViewDescriptor::default());

        let mut batches = Batches::default();
        graphics_flows
            .iter()
            .for_each(|flow| flow.on_render().partition(&mut batches));

        let ctx = &self.ctx;
        let mut encoder = ctx.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Render Encoder"),
        });

        if ctx.light.shadows_active() {
            let mut shadow_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Shadow Pass"),
                color_attachments: &[],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &ctx.light.shadow_map.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });
            shadow_pass.set_pipeline(&ctx.pipelines.shadow);
            shadow_pass.set_bind_group(0, &ctx.light.shadow_bind_group, &[]);
            for instanced in batches.shadow_casters() {
                shadow_pass.set_vertex_buffer(1, instanced.instance.slice(..));
                shadow_pass.draw_mesh_instanced(instanced.mesh, 0..instanced.amount as u32);
            }
        }

        {
            let (target, resolve_target) = match &ctx.msaa_target {
                Some(msaa) => (msaa, Some(&view)),
                None => (&view, None),
            };
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: target,
                    resolve_target,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(ctx.clear_colour),
                        // samples are only needed until they are resolved
                        store: if resolve_target.is_some() {
                            wgpu::StoreOp::Discard
                        } else {
                            wgpu::StoreOp::Store
                        },
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &ctx.depth_texture.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            if !batches.matcap.is_empty() {
                render_pass.set_pipeline(&ctx.pipelines.matcap);
                render_pass.set_bind_group(1, &ctx.camera.bind_group, &[]);
                for instanced in &batches.matcap {
                    render_pass.set_bind_group(0, instanced.material.bind_group(), &[]);
                    render_pass.set_vertex_buffer(1, instanced.instance.slice(..));
                    render_pass.draw_mesh_instanced(instanced.mesh, 0..instanced.amount as u32);
                }
            }

            if !batches.standard.is_empty() {
                render_pass.set_pipeline(&ctx.pipelines.standard);
                render_pass.set_bind_group(1, &ctx.camera.bind_group, &[]);
                render_pass.set_bind_group(2, &ctx.light.bind_group, &[]);
                for instanced in &batches.standard {
                    render_pass.set_bind_group(0, instanced.material.bind_group(), &[]);
                    render_pass.set_vertex_buffer(1, instanced.instance.slice(..));
                    render_pass.draw_mesh_instanced(instanced.mesh, 0..instanced.amount as u32);
                }
            }

            if !batches.lines.is_empty() {
                render_pass.set_pipeline(&ctx.pipelines.lines);
                render_pass.set_bind_group(0, &ctx.camera.bind_group, &[]);
                for lines in &batches.lines {
                    render_pass.set_vertex_buffer(0, lines.vertex.slice(..));
                    render_pass.draw(0..lines.amount, 0..1);
                }
            }
        }

        ctx.queue.submit(iter::once(encoder.finish()));
        output.present();
        Ok(())
    }
}

pub struct App<State: 'static, Event: 'static> {
    #[cfg(not(target_arch = "wasm32"))]
    async_runtime: tokio::runtime::Runtime,
    proxy: EventLoopProxy<FlowEvent<State, Event>>,
    title: String,
    state: Option<AppState<State>>,
    // This will hold the fully initialized flows once they are ready.
    graphics_flows: Vec<Box<dyn GraphicsFlow<State, Event>>>,
    // We use Option to `take()` the constructors on the first resume.
    constructors: Option<Vec<FlowConstructor<State, Event>>>,
}

impl<State, Event> App<State, Event>
where
    State: 'static + Default,
    Event: 'static,
{
    fn new(
        event_loop: &EventLoop<FlowEvent<State, Event>>,
        title: &str,
        constructors: Vec<FlowConstructor<State, Event>>,
    ) -> anyhow::Result<Self> {
        let proxy = event_loop.create_proxy();
        #[cfg(not(target_arch = "wasm32"))]
        let async_runtime = tokio::runtime::Runtime::new()?;
        Ok(Self {
            #[cfg(not(target_arch = "wasm32"))]
            async_runtime,
            proxy,
            title: title.to_string(),
            state: None,
            graphics_flows: Vec::new(),
            constructors: Some(constructors),
        })
    }

    fn init_flows(&mut self) {
        let Some(app_state) = self.state.as_mut() else {
            return;
        };
        let viewport = app_state.current_viewport();
        app_state.resize(viewport);
        for flow in self.graphics_flows.iter_mut() {
            let out = flow.on_init(&mut app_state.ctx, &mut app_state.state);
            handle_flow_output(
                #[cfg(not(target_arch = "wasm32"))]
                &self.async_runtime,
                &mut app_state.ctx,
                self.proxy.clone(),
                out,
            );
        }
        // Animation time starts with the first rendered frame
        app_state.clock = Clock::new();
        app_state.ctx.window.request_redraw();
    }

    fn update(&mut self) {
        let Some(state) = self.state.as_mut() else {
            return;
        };
        let time = state.clock.tick();
        for flow in self.graphics_flows.iter_mut() {
            let out = flow.on_update(&state.ctx, &mut state.state, time);
            handle_flow_output(
                #[cfg(not(target_arch = "wasm32"))]
                &self.async_runtime,
                &mut state.ctx,
                self.proxy.clone(),
                out,
            );
        }

        let ctx = &mut state.ctx;
        ctx.camera.controller.update(&mut ctx.camera.camera);
        ctx.write_camera();

        if let Some(rig) = self.graphics_flows.iter().find_map(|flow| flow.light_rig()) {
            ctx.light.write(&ctx.queue, rig, ctx.shadows);
        }
    }
}

pub(crate) enum FlowEvent<State: 'static, Event: 'static> {
    Initialized {
        state: AppState<State>,
        flows: Vec<Box<dyn GraphicsFlow<State, Event>>>,
    },
    Custom(Event),
}

impl<State, Event> Debug for FlowEvent<State, Event> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Initialized { state: _, flows } => f.debug_struct("Initialized").field("flows", flows).finish(),
            Self::Custom(_) => f.write_str("Custom(E)"),
        }
    }
}

impl<State: 'static + Default, Event: 'static> ApplicationHandler<FlowEvent<State, Event>> for App<State, Event> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let Some(constructors) = self.constructors.take() else {
            return;
        };

        #[allow(unused_mut)]
        let mut window_attributes = Window::default_attributes().with_title(self.title.clone());

        #[cfg(target_arch = "wasm32")]
        {
            use winit::platform::web::WindowAttributesExtWebSys;

            window_attributes = window_attributes.with_canvas(find_canvas());
        }

        let window = match event_loop.create_window(window_attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("Cannot create a window: {}", e);
                event_loop.exit();
                return;
            }
        };

        let init_future = async move {
            let app_state = AppState::<State>::new(window).await?;
            let flow_futures: Vec<_> = constructors
                .into_iter()
                // The clone in into() leverages the internal Arcs of Device and Queue and thus only clones the ref
                .map(|constructor| constructor((&app_state.ctx).into()))
                .collect();
            let flows: Vec<_> = futures::future::join_all(flow_futures).await;
            anyhow::Ok((app_state, flows))
        };

        #[cfg(not(target_arch = "wasm32"))]
        {
            match self.async_runtime.block_on(init_future) {
                Ok((app_state, flows)) => {
                    self.state = Some(app_state);
                    self.graphics_flows = flows;
                    self.init_flows();
                }
                Err(e) => {
                    log::error!("App initialization failed. Cannot create the main context: {:#}", e);
                    event_loop.exit();
                }
            }
        }

        #[cfg(target_arch = "wasm32")]
        {
            let proxy = self.proxy.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match init_future.await {
                    Ok((state, flows)) => {
                        if proxy.send_event(FlowEvent::Initialized { state, flows }).is_err() {
                            log::error!("The event loop closed before initialization finished");
                        }
                    }
                    Err(e) => log::error!("App initialization failed. Cannot create the main context: {:#}", e),
                }
            });
        }
    }

    fn user_event(&mut self, _event_loop: &ActiveEventLoop, event: FlowEvent<State, Event>) {
        match event {
            FlowEvent::Initialized { state, flows } => {
                // This is the message from our wasm `spawn_local`
                self.state = Some(state);
                self.graphics_flows = flows;
                self.init_flows();
            }
            FlowEvent::Custom(custom_event) => {
                if let Some(state) = &mut self.state {
                    let result = self
                        .graphics_flows
                        .iter_mut()
                        .try_fold(custom_event, |event, flow| {
                            match flow.on_custom_events(&state.ctx, &mut state.state, event) {
                                Some(event) => Ok(event),
                                None => Err(()),
                            }
                        });
                    if result.is_ok() {
                        log::warn!("Custom event was not consumed this cycle");
                    }
                }
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: winit::window::WindowId, event: WindowEvent) {
        let state = match &mut self.state {
            Some(state) => state,
            None => return,
        };

        let camera = &mut state.ctx.camera;
        camera
            .controller
            .handle_window_events(&event, &camera.camera, &state.ctx.projection);

        for flow in self.graphics_flows.iter_mut() {
            let out = flow.on_window_events(&state.ctx, &mut state.state, &event);
            handle_flow_output(
                #[cfg(not(target_arch = "wasm32"))]
                &self.async_runtime,
                &mut state.ctx,
                self.proxy.clone(),
                out,
            );
        }

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => {
                let viewport = Viewport::from_physical(size, state.ctx.window.scale_factor());
                state.resize(viewport);
            }
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                let viewport = Viewport::from_physical(state.ctx.window.inner_size(), scale_factor);
                state.resize(viewport);
            }
            WindowEvent::RedrawRequested => {
                self.update();
                let Some(state) = self.state.as_mut() else {
                    return;
                };
                match state.render(&self.graphics_flows) {
                    Ok(()) => (),
                    // Reconfigure the surface if it's lost or outdated
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        let viewport = state.current_viewport();
                        state.resize(viewport);
                    }
                    Err(e) => {
                        log::error!("Unable to render {}", e);
                    }
                }
            }
            _ => {}
        }
    }
}

fn handle_flow_output<State, Event>(
    #[cfg(not(target_arch = "wasm32"))] async_runtime: &tokio::runtime::Runtime,
    ctx: &mut Context,
    proxy: EventLoopProxy<FlowEvent<State, Event>>,
    out: Out<Event>,
) where
    State: 'static,
    Event: 'static,
{
    match out {
        // Send the events passed by the flow to winit
        Out::FutEvent(futures) => {
            let send = move |event: Event| proxy.send_event(FlowEvent::Custom(event)).is_ok();
            #[cfg(not(target_arch = "wasm32"))]
            async_runtime.block_on(forward_events(futures, send));

            #[cfg(target_arch = "wasm32")]
            wasm_bindgen_futures::spawn_local(forward_events(futures, send));
        }
        Out::Configure(f) => f(ctx),
        Out::Empty => (),
    }
}

/// Drive `futures` concurrently and pass every event to `send` as soon as its own
/// future resolves, so a slow load never holds back a fast one.
///
/// Stops once `send` returns `false`, which means the event loop is gone.
pub async fn forward_events<Event, F>(futures: Vec<Box<dyn Future<Output = Event>>>, mut send: F)
where
    F: FnMut(Event) -> bool,
{
    let mut pending: FuturesUnordered<_> = futures.into_iter().map(Pin::from).collect();
    while let Some(event) = pending.next().await {
        if !send(event) {
            log::error!("Event loop closed before all events could be processed");
            return;
        }
    }
}

/// The page's `<canvas id="canvas">`, if there is one.
#[cfg(target_arch = "wasm32")]
pub(crate) fn find_canvas() -> Option<web_sys::HtmlCanvasElement> {
    use wasm_bindgen::JsCast;

    web_sys::window()?
        .document()?
        .query_selector(CANVAS_SELECTOR)
        .ok()
        .flatten()?
        .dyn_into::<web_sys::HtmlCanvasElement>()
        .ok()
}

fn init_logger() {
    #[cfg(not(target_arch = "wasm32"))]
    {
        if let Err(e) = env_logger::try_init() {
            eprintln!("Warning: Could not initialize logger: {}", e);
        }
    }

    #[cfg(target_arch = "wasm32")]
    {
        // A second demo on the same page finds the logger already installed
        let _ = console_log::init_with_level(log::Level::Info);
    }
}

/// Build the window and drive `constructors` until the window is closed.
///
/// In the browser nothing happens unless the page has a `<canvas id="canvas">`.
pub fn run<State: 'static + Default, Event: 'static>(
    title: &str,
    constructors: Vec<FlowConstructor<State, Event>>,
) -> anyhow::Result<()> {
    init_logger();

    #[cfg(target_arch = "wasm32")]
    {
        if find_canvas().is_none() {
            log::info!("No {} on the page, nothing to render", CANVAS_SELECTOR);
            return Ok(());
        }
    }

    let event_loop: EventLoop<FlowEvent<State, Event>> = EventLoop::with_user_event().build()?;
    let app: App<State, Event> = App::new(&event_loop, title, constructors)?;

    #[cfg(not(target_arch = "wasm32"))]
    {
        let mut app = app;
        event_loop.run_app(&mut app)?;
    }

    #[cfg(target_arch = "wasm32")]
    {
        use winit::platform::web::EventLoopExtWebSys;

        event_loop.spawn_app(app);
    }

    Ok(())
}
