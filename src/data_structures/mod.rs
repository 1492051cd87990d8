//! Scene data: geometry, instances, materials, lights and textures.
//!
//! - `geometry` builds procedural primitives (torus, sphere, box, plane, axes)
//! - `text` parses typeface fonts and extrudes text into geometry
//! - `mesh` holds vertex formats and GPU meshes
//! - `instance` holds per-instance transformation data
//! - `material` contains the matcap and standard materials
//! - `light` describes the light rig and its GPU layout
//! - `scene` is the root container the demos populate
//! - `texture` wraps GPU textures, depth buffers and the shadow map

pub mod color;
pub mod geometry;
pub mod instance;
pub mod light;
pub mod material;
pub mod mesh;
pub mod scene;
pub mod text;
pub mod texture;
