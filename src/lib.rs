//! scene-ngin
//!
//! Two small scene demos on a minimal instancing renderer that runs natively and
//! in the browser (WebGL2 on a `canvas#canvas`). The renderer draws instanced
//! meshes with a matcap or a lit standard material, a fixed light rig with one
//! directional shadow map, and helper lines.
//!
//! High-level modules
//! - `camera`: camera, projection, orbit controller and the camera uniform
//! - `clock`: elapsed-time clock sampled once per frame
//! - `context`: central GPU and window context that owns device/queue/pipelines
//! - `data_structures`: meshes, instances, geometries, text, materials, lights, scene
//! - `debug`: keyboard driven panel of numeric bindings
//! - `demos`: the text and the lights demo
//! - `flow`: flow trait and the event loop
//! - `pipelines`: matcap, standard, shadow and line pipelines
//! - `resources`: asset loading for native and web
//! - `render`: render composition and per-pipeline batching
//! - `viewport`: window size and pixel ratio bookkeeping
//!

pub mod camera;
pub mod clock;
pub mod context;
pub mod data_structures;
pub mod debug;
pub mod demos;
pub mod flow;
pub mod pipelines;
pub mod render;
pub mod resources;
pub mod viewport;

#[cfg(target_arch = "wasm32")]
pub mod web;

// Re-exports commonly used types for convenience in downstream code.
pub use cgmath;
pub use winit::event::WindowEvent;
