//! Procedural primitive geometries.
//!
//! Parameters and vertex order follow the conventions of common web scene
//! libraries so that scenes authored against them look the same: triangles wind
//! counter-clockwise when seen from the side their normals point to.

use std::f32::consts::PI;

use cgmath::{InnerSpace, Vector3};

use crate::data_structures::mesh::{Geometry, LineVertex, MeshVertex};

/// A torus in the xy plane around the origin.
///
/// * `radius` from the centre of the torus to the centre of the tube
/// * `tube` radius of the tube
pub fn torus(radius: f32, tube: f32, radial_segments: u32, tubular_segments: u32) -> Geometry {
    let radial_segments = radial_segments.max(2);
    let tubular_segments = tubular_segments.max(3);
    let mut vertices = Vec::with_capacity(((radial_segments + 1) * (tubular_segments + 1)) as usize);

    for j in 0..=radial_segments {
        for i in 0..=tubular_segments {
            let u = i as f32 / tubular_segments as f32 * PI * 2.0;
            let v = j as f32 / radial_segments as f32 * PI * 2.0;
            let position = Vector3::new(
                (radius + tube * v.cos()) * u.cos(),
                (radius + tube * v.cos()) * u.sin(),
                tube * v.sin(),
            );
            let centre = Vector3::new(radius * u.cos(), radius * u.sin(), 0.0);
            let normal = (position - centre).normalize();
            vertices.push(MeshVertex {
                position: position.into(),
                normal: normal.into(),
                tex_coords: [
                    i as f32 / tubular_segments as f32,
                    j as f32 / radial_segments as f32,
                ],
            });
        }
    }

    let stride = tubular_segments + 1;
    let mut indices = Vec::with_capacity((radial_segments * tubular_segments * 6) as usize);
    for j in 1..=radial_segments {
        for i in 1..=tubular_segments {
            let a = stride * j + i - 1;
            let b = stride * (j - 1) + i - 1;
            let c = stride * (j - 1) + i;
            let d = stride * j + i;
            indices.extend_from_slice(&[a, b, d, b, c, d]);
        }
    }
    Geometry::new(vertices, indices)
}

/// A UV sphere centred on the origin.
pub fn sphere(radius: f32, width_segments: u32, height_segments: u32) -> Geometry {
    let width_segments = width_segments.max(3);
    let height_segments = height_segments.max(2);
    let mut vertices = Vec::new();

    for iy in 0..=height_segments {
        let v = iy as f32 / height_segments as f32;
        // avoid a seam of degenerate texels at the poles
        let u_offset = if iy == 0 {
            0.5 / width_segments as f32
        } else if iy == height_segments {
            -0.5 / width_segments as f32
        } else {
            0.0
        };
        for ix in 0..=width_segments {
            let u = ix as f32 / width_segments as f32;
            let phi = u * PI * 2.0;
            let theta = v * PI;
            let position = Vector3::new(
                -radius * phi.cos() * theta.sin(),
                radius * theta.cos(),
                radius * phi.sin() * theta.sin(),
            );
            let normal = if position.magnitude2() > 0.0 {
                position.normalize()
            } else {
                Vector3::unit_y()
            };
            vertices.push(MeshVertex {
                position: position.into(),
                normal: normal.into(),
                tex_coords: [u + u_offset, 1.0 - v],
            });
        }
    }

    let stride = width_segments + 1;
    let mut indices = Vec::new();
    for iy in 0..height_segments {
        for ix in 0..width_segments {
            let a = iy * stride + ix + 1;
            let b = iy * stride + ix;
            let c = (iy + 1) * stride + ix;
            let d = (iy + 1) * stride + ix + 1;
            if iy != 0 {
                indices.extend_from_slice(&[a, b, d]);
            }
            if iy != height_segments - 1 {
                indices.extend_from_slice(&[b, c, d]);
            }
        }
    }
    Geometry::new(vertices, indices)
}

/// An axis aligned box centred on the origin, one quad per face.
pub fn cuboid(width: f32, height: f32, depth: f32) -> Geometry {
    let half = Vector3::new(width / 2.0, height / 2.0, depth / 2.0);
    let x = Vector3::unit_x();
    let y = Vector3::unit_y();
    let z = Vector3::unit_z();
    // (normal, u, v) with u x v == normal
    let faces = [
        (x, -z, y),
        (-x, z, y),
        (y, x, -z),
        (-y, x, z),
        (z, x, y),
        (-z, -x, y),
    ];

    let mut vertices = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);
    for (normal, u, v) in faces {
        let scale = |d: Vector3<f32>| Vector3::new(d.x * half.x, d.y * half.y, d.z * half.z);
        let centre = scale(normal);
        let (u_half, v_half) = (scale(u), scale(v));
        let base = vertices.len() as u32;
        let corners = [
            (centre - u_half - v_half, [0.0, 1.0]),
            (centre + u_half - v_half, [1.0, 1.0]),
            (centre + u_half + v_half, [1.0, 0.0]),
            (centre - u_half + v_half, [0.0, 0.0]),
        ];
        for (position, tex_coords) in corners {
            vertices.push(MeshVertex {
                position: position.into(),
                normal: normal.into(),
                tex_coords,
            });
        }
        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }
    Geometry::new(vertices, indices)
}

/// A single quad in the xy plane facing +z.
pub fn plane(width: f32, height: f32) -> Geometry {
    let (w, h) = (width / 2.0, height / 2.0);
    let corner = |x: f32, y: f32, tex_coords: [f32; 2]| MeshVertex {
        position: [x, y, 0.0],
        normal: [0.0, 0.0, 1.0],
        tex_coords,
    };
    Geometry::new(
        vec![
            corner(-w, h, [0.0, 0.0]),
            corner(w, h, [1.0, 0.0]),
            corner(-w, -h, [0.0, 1.0]),
            corner(w, -h, [1.0, 1.0]),
        ],
        vec![0, 2, 1, 2, 3, 1],
    )
}

/// Line list for an axes helper: x red, y green, z blue.
pub fn axes(size: f32) -> Vec<LineVertex> {
    let line = |to: [f32; 3], from_color: [f32; 3], to_color: [f32; 3]| {
        [
            LineVertex {
                position: [0.0; 3],
                color: from_color,
            },
            LineVertex {
                position: to,
                color: to_color,
            },
        ]
    };
    [
        line([size, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 0.6, 0.0]),
        line([0.0, size, 0.0], [0.0, 1.0, 0.0], [0.6, 1.0, 0.0]),
        line([0.0, 0.0, size], [0.0, 0.0, 1.0], [0.0, 0.6, 1.0]),
    ]
    .concat()
}
