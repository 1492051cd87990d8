//! Perspective camera, orbit controls and the camera uniform.
//!
//! The camera is described by an eye position and a target it looks at. The
//! [`OrbitController`] revolves the eye around the target using spherical
//! coordinates, with optional inertial damping after the pointer is released.

use std::f32::consts::PI;

use cgmath::{InnerSpace, Matrix4, Point3, Rad, SquareMatrix, Vector3};
use winit::{
    dpi::PhysicalPosition,
    event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent},
};

/// cgmath produces OpenGL clip space (z in [-1, 1]); wgpu expects z in [0, 1].
#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: Matrix4<f32> = Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
);

/// Keeps the polar angle away from the poles where `look_at` degenerates.
const POLAR_EPSILON: f32 = 1e-6;

#[derive(Clone, Debug)]
pub struct Camera {
    pub position: Point3<f32>,
    pub target: Point3<f32>,
    pub up: Vector3<f32>,
}

impl Camera {
    pub fn new<P: Into<Point3<f32>>>(position: P, target: P) -> Self {
        Self {
            position: position.into(),
            target: target.into(),
            up: Vector3::unit_y(),
        }
    }

    pub fn calc_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(self.position, self.target, self.up)
    }
}

#[derive(Clone, Debug)]
pub struct Projection {
    pub aspect: f32,
    pub fovy: Rad<f32>,
    pub znear: f32,
    pub zfar: f32,
}

impl Projection {
    pub fn new<F: Into<Rad<f32>>>(width: u32, height: u32, fovy: F, znear: f32, zfar: f32) -> Self {
        Self {
            aspect: width as f32 / height.max(1) as f32,
            fovy: fovy.into(),
            znear,
            zfar,
        }
    }

    /// Recompute the aspect ratio. A zero height leaves the projection untouched.
    pub fn resize(&mut self, width: u32, height: u32) {
        if height == 0 {
            return;
        }
        self.aspect = width as f32 / height as f32;
    }

    pub fn calc_matrix(&self) -> Matrix4<f32> {
        OPENGL_TO_WGPU_MATRIX * cgmath::perspective(self.fovy, self.aspect, self.znear, self.zfar)
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    view_position: [f32; 4],
    view: [[f32; 4]; 4],
    view_proj: [[f32; 4]; 4],
}

impl CameraUniform {
    pub fn new() -> Self {
        Self {
            view_position: [0.0; 4],
            view: Matrix4::identity().into(),
            view_proj: Matrix4::identity().into(),
        }
    }

    pub fn update_view_proj(&mut self, camera: &Camera, projection: &Projection) {
        let view = camera.calc_matrix();
        self.view_position = camera.position.to_homogeneous().into();
        self.view = view.into();
        self.view_proj = (projection.calc_matrix() * view).into();
    }
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new()
    }
}

/// GPU side of the camera together with its controller.
#[derive(Debug)]
pub struct CameraResources {
    pub camera: Camera,
    pub controller: OrbitController,
    pub uniform: CameraUniform,
    pub buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
    pub bind_group_layout: wgpu::BindGroupLayout,
}

impl CameraResources {
    /// Move the eye and target, dropping any pending orbit motion.
    pub fn reset<P: Into<Point3<f32>>>(&mut self, position: P, target: P) {
        self.camera.position = position.into();
        self.camera.target = target.into();
        self.controller.stop();
    }
}

/// Spherical coordinates of the eye relative to the target (y up).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Spherical {
    pub radius: f32,
    /// Polar angle measured from +y.
    pub phi: f32,
    /// Azimuth around +y measured from +z.
    pub theta: f32,
}

impl Spherical {
    pub fn from_offset(offset: Vector3<f32>) -> Self {
        let radius = offset.magnitude();
        if radius == 0.0 {
            return Self {
                radius,
                phi: 0.0,
                theta: 0.0,
            };
        }
        Self {
            radius,
            theta: offset.x.atan2(offset.z),
            phi: (offset.y / radius).clamp(-1.0, 1.0).acos(),
        }
    }

    pub fn to_offset(self) -> Vector3<f32> {
        let sin_phi_radius = self.phi.sin() * self.radius;
        Vector3::new(
            sin_phi_radius * self.theta.sin(),
            self.phi.cos() * self.radius,
            sin_phi_radius * self.theta.cos(),
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Drag {
    None,
    Rotate,
    Pan,
}

/// Pointer-driven orbit controls: left drag rotates, right drag pans, the wheel dollies.
#[derive(Debug)]
pub struct OrbitController {
    pub enable_damping: bool,
    pub damping_factor: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    // pending motion, consumed (or decayed) by `update`
    theta_delta: f32,
    phi_delta: f32,
    scale: f32,
    pan_offset: Vector3<f32>,
    drag: Drag,
    cursor: Option<PhysicalPosition<f64>>,
    viewport_height: f32,
}

impl OrbitController {
    pub fn new() -> Self {
        Self {
            enable_damping: false,
            damping_factor: 0.05,
            rotate_speed: 1.0,
            zoom_speed: 1.0,
            min_distance: 0.0,
            max_distance: f32::INFINITY,
            theta_delta: 0.0,
            phi_delta: 0.0,
            scale: 1.0,
            pan_offset: Vector3::new(0.0, 0.0, 0.0),
            drag: Drag::None,
            cursor: None,
            viewport_height: 1.0,
        }
    }

    /// Height of the render surface; drag distances are measured relative to it.
    pub fn set_viewport_height(&mut self, height: u32) {
        self.viewport_height = height.max(1) as f32;
    }

    pub fn rotate_left(&mut self, angle: f32) {
        self.theta_delta -= angle;
    }

    pub fn rotate_up(&mut self, angle: f32) {
        self.phi_delta -= angle;
    }

    /// `factor` > 1 moves the eye towards the target.
    pub fn dolly_in(&mut self, factor: f32) {
        self.scale /= factor;
    }

    pub fn dolly_out(&mut self, factor: f32) {
        self.scale *= factor;
    }

    /// Queue a pan by pixel deltas, expressed in the camera's screen plane.
    pub fn pan(&mut self, camera: &Camera, projection: &Projection, dx: f32, dy: f32) {
        let offset = camera.position - camera.target;
        let target_distance = offset.magnitude() * (projection.fovy.0 / 2.0).tan();
        let forward = -offset.normalize();
        let right = forward.cross(camera.up).normalize();
        let up = right.cross(forward);
        let pan_left = right * (-2.0 * dx * target_distance / self.viewport_height);
        let pan_up = up * (2.0 * dy * target_distance / self.viewport_height);
        self.pan_offset += pan_left + pan_up;
    }

    /// Whether any rotation, zoom or pan is still pending.
    pub fn is_moving(&self) -> bool {
        const REST: f32 = 1e-6;
        self.theta_delta.abs() > REST
            || self.phi_delta.abs() > REST
            || (self.scale - 1.0).abs() > REST
            || self.pan_offset.magnitude2() > REST * REST
    }

    pub fn stop(&mut self) {
        self.theta_delta = 0.0;
        self.phi_delta = 0.0;
        self.scale = 1.0;
        self.pan_offset = Vector3::new(0.0, 0.0, 0.0);
    }

    fn zoom_scale(&self) -> f32 {
        0.95f32.powf(self.zoom_speed)
    }

    pub fn handle_window_events(
        &mut self,
        event: &WindowEvent,
        camera: &Camera,
        projection: &Projection,
    ) {
        match event {
            WindowEvent::MouseInput { state, button, .. } => {
                self.drag = match (button, state) {
                    (MouseButton::Left, ElementState::Pressed) => Drag::Rotate,
                    (MouseButton::Right, ElementState::Pressed) => Drag::Pan,
                    (_, ElementState::Released) => Drag::None,
                    _ => self.drag,
                };
            }
            WindowEvent::CursorMoved { position, .. } => {
                if let Some(last) = self.cursor {
                    let dx = (position.x - last.x) as f32;
                    let dy = (position.y - last.y) as f32;
                    match self.drag {
                        Drag::Rotate => {
                            self.rotate_left(2.0 * PI * dx / self.viewport_height * self.rotate_speed);
                            self.rotate_up(2.0 * PI * dy / self.viewport_height * self.rotate_speed);
                        }
                        Drag::Pan => self.pan(camera, projection, dx, dy),
                        Drag::None => (),
                    }
                }
                self.cursor = Some(*position);
            }
            WindowEvent::CursorLeft { .. } => {
                self.cursor = None;
                self.drag = Drag::None;
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let dy = match delta {
                    MouseScrollDelta::LineDelta(_, y) => *y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32,
                };
                if dy > 0.0 {
                    self.dolly_in(1.0 / self.zoom_scale());
                } else if dy < 0.0 {
                    self.dolly_out(1.0 / self.zoom_scale());
                }
            }
            _ => (),
        }
    }

    /// Apply pending motion to the camera. With damping enabled only a fraction of
    /// the pending motion is applied and the remainder decays each call.
    pub fn update(&mut self, camera: &mut Camera) {
        let offset = camera.position - camera.target;
        let mut spherical = Spherical::from_offset(offset);

        let (theta_delta, phi_delta, pan) = if self.enable_damping {
            (
                self.theta_delta * self.damping_factor,
                self.phi_delta * self.damping_factor,
                self.pan_offset * self.damping_factor,
            )
        } else {
            (self.theta_delta, self.phi_delta, self.pan_offset)
        };
        spherical.theta += theta_delta;
        spherical.phi = (spherical.phi + phi_delta).clamp(POLAR_EPSILON, PI - POLAR_EPSILON);
        spherical.radius = (spherical.radius * self.scale).clamp(self.min_distance, self.max_distance);

        camera.target += pan;
        camera.position = camera.target + spherical.to_offset();

        if self.enable_damping {
            self.theta_delta *= 1.0 - self.damping_factor;
            self.phi_delta *= 1.0 - self.damping_factor;
            self.pan_offset *= 1.0 - self.damping_factor;
        } else {
            self.theta_delta = 0.0;
            self.phi_delta = 0.0;
            self.pan_offset = Vector3::new(0.0, 0.0, 0.0);
        }
        self.scale = 1.0;
    }
}

impl Default for OrbitController {
    fn default() -> Self {
        Self::new()
    }
}
