//! The two demo scenes.
//!
//! - [`text`]: matcap shaded text surrounded by a thousand scattered donuts
//! - [`lights`]: primitives lit by every light kind, with shadows and a debug panel
//!
//! Both share the camera setup below and start through [`crate::flow::run`].

use cgmath::Point3;

use crate::context::Context;

pub mod lights;
pub mod text;

/// Put the camera at `eye` looking at the origin and enable orbit damping.
pub(crate) fn orbit_camera(ctx: &mut Context, eye: Point3<f32>) {
    ctx.look_at(eye, Point3::new(0.0, 0.0, 0.0));
    ctx.camera.controller.enable_damping = true;
}
