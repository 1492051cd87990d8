//! Instance transformation data for GPU rendering.
//!
//! Per-instance data like position, rotation, and scale is stored as
//! GPU buffers and passed to shaders for efficient multi-draw instancing.

use std::f32::consts::PI;

use cgmath::{Euler, Rad, Vector3};
use rand::Rng;

use crate::data_structures::mesh::Vertex;

/// Per-instance transformation: position, XYZ Euler rotation and scale.
///
/// Multiple copies of the same mesh can be rendered with different transforms in a
/// single draw call. The instance data is packed into a GPU buffer and read by the
/// vertex shaders.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Instance {
    pub position: Vector3<f32>,
    pub rotation: Euler<Rad<f32>>,
    pub scale: Vector3<f32>,
    pub receive_shadow: bool,
}

impl Instance {
    /// Create a new instance with identity transformation (no move, rotate, or scale).
    pub fn new() -> Self {
        Self {
            position: Vector3::new(0.0, 0.0, 0.0),
            rotation: Euler::new(Rad(0.0), Rad(0.0), Rad(0.0)),
            scale: Vector3::new(1.0, 1.0, 1.0),
            receive_shadow: false,
        }
    }

    pub fn with_position(mut self, x: f32, y: f32, z: f32) -> Self {
        self.position = Vector3::new(x, y, z);
        self
    }

    pub fn with_rotation_x(mut self, angle: f32) -> Self {
        self.rotation.x = Rad(angle);
        self
    }

    pub fn to_matrix(&self) -> cgmath::Matrix4<f32> {
        cgmath::Matrix4::from_translation(self.position)
            * cgmath::Matrix4::from(self.rotation)
            * cgmath::Matrix4::from_nonuniform_scale(self.scale.x, self.scale.y, self.scale.z)
    }

    pub fn to_raw(&self) -> InstanceRaw {
        InstanceRaw {
            model: self.to_matrix().into(),
            normal: cgmath::Matrix3::from(self.rotation).into(),
            receive_shadow: if self.receive_shadow { 1.0 } else { 0.0 },
        }
    }

    /// Set rotation-x to `0.15 * t` and rotation-y to `0.1 * t` for `t` seconds of
    /// elapsed time. Rotation-z is left alone.
    pub fn spin(&mut self, elapsed_secs: f32) {
        self.rotation.x = Rad(0.15 * elapsed_secs);
        self.rotation.y = Rad(0.1 * elapsed_secs);
    }

    /// A random instance inside a cube of edge `extent` centred at the origin, rotated
    /// by [0, π) around x and y and uniformly scaled by [0, 1).
    pub fn scattered<R: Rng + ?Sized>(rng: &mut R, extent: f32) -> Self {
        let mut centred = || (rng.random::<f32>() - 0.5) * extent;
        let position = Vector3::new(centred(), centred(), centred());
        let rotation = Euler::new(
            Rad(PI * rng.random::<f32>()),
            Rad(PI * rng.random::<f32>()),
            Rad(0.0),
        );
        let scale = rng.random::<f32>();
        Self {
            position,
            rotation,
            scale: Vector3::new(scale, scale, scale),
            receive_shadow: false,
        }
    }
}

/// `count` independently scattered instances, see [`Instance::scattered`].
pub fn scatter<R: Rng + ?Sized>(rng: &mut R, count: usize, extent: f32) -> Vec<Instance> {
    (0..count).map(|_| Instance::scattered(rng, extent)).collect()
}

impl Default for Instance {
    fn default() -> Self {
        Self::new()
    }
}

/**
 * The raw instance is the actual data stored on the GPU
 */
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct InstanceRaw {
    model: [[f32; 4]; 4],
    normal: [[f32; 3]; 3],
    receive_shadow: f32,
}

/**
 * As we store vertex data directly in the GPU memory we need to tell what the bytes refer to:
 *
 * offset: zero as we want to use the full space.
 * stride: length of an instance
 *
 * Stride layout here: model matrix as four 4d vectors, rotation as three 3d vectors, shadow flag
 */
impl Vertex for InstanceRaw {
    fn desc() -> wgpu::VertexBufferLayout<'static> {
        use std::mem;
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<InstanceRaw>() as wgpu::BufferAddress,
            // Shaders only advance to the next instance when a new instance starts
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 5,
                    format: wgpu::VertexFormat::Float32x4,
                },
                // A mat4 takes up 4 vertex slots as it is technically 4 vec4s.
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 4]>() as wgpu::BufferAddress,
                    shader_location: 6,
                    format: wgpu::VertexFormat::Float32x4,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 8]>() as wgpu::BufferAddress,
                    shader_location: 7,
                    format: wgpu::VertexFormat::Float32x4,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 12]>() as wgpu::BufferAddress,
                    shader_location: 8,
                    format: wgpu::VertexFormat::Float32x4,
                },
                // normal matrix
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 16]>() as wgpu::BufferAddress,
                    shader_location: 9,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 19]>() as wgpu::BufferAddress,
                    shader_location: 10,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 22]>() as wgpu::BufferAddress,
                    shader_location: 11,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 25]>() as wgpu::BufferAddress,
                    shader_location: 12,
                    format: wgpu::VertexFormat::Float32,
                },
            ],
        }
    }
}
