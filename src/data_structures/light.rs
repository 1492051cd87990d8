//! Light descriptions.
//!
//! A [`LightRig`] holds at most one light of each kind. It is plain data owned by the
//! scene and is packed into a [`LightsUniform`] whenever it is written to the GPU.

use std::f32::consts::PI;

use cgmath::{EuclideanSpace, InnerSpace, Matrix4, Point3, Vector3};

use crate::{camera::OPENGL_TO_WGPU_MATRIX, data_structures::color::Color};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AmbientLight {
    pub color: Color,
    pub intensity: f32,
}

/// Orthographic volume used when rendering the directional shadow map.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShadowCamera {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
    pub near: f32,
    pub far: f32,
    pub bias: f32,
}

impl Default for ShadowCamera {
    fn default() -> Self {
        Self {
            left: -5.0,
            right: 5.0,
            top: 5.0,
            bottom: -5.0,
            near: 0.5,
            far: 500.0,
            bias: 0.0,
        }
    }
}

/// Parallel light shining from `position` towards `target`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DirectionalLight {
    pub color: Color,
    pub intensity: f32,
    pub position: Point3<f32>,
    pub target: Point3<f32>,
    pub cast_shadow: bool,
    pub shadow: ShadowCamera,
}

impl DirectionalLight {
    pub fn new(color: Color, intensity: f32) -> Self {
        Self {
            color,
            intensity,
            position: Point3::new(0.0, 1.0, 0.0),
            target: Point3::origin(),
            cast_shadow: false,
            shadow: ShadowCamera::default(),
        }
    }

    /// Normalised direction from a lit surface towards the light.
    pub fn direction(&self) -> Vector3<f32> {
        let d = self.position - self.target;
        if d.magnitude2() == 0.0 {
            Vector3::unit_y()
        } else {
            d.normalize()
        }
    }

    /// World to light clip space, used for the shadow pass.
    pub fn shadow_view_proj(&self) -> Matrix4<f32> {
        let forward = -self.direction();
        let up = if forward.y.abs() > 0.99 {
            Vector3::unit_z()
        } else {
            Vector3::unit_y()
        };
        let view = Matrix4::look_at_rh(self.position, self.position + forward, up);
        let s = self.shadow;
        let proj = cgmath::ortho(s.left, s.right, s.bottom, s.top, s.near, s.far);
        OPENGL_TO_WGPU_MATRIX * proj * view
    }
}

/// Sky/ground gradient lighting by normal direction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HemisphereLight {
    pub sky_color: Color,
    pub ground_color: Color,
    pub intensity: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointLight {
    pub color: Color,
    pub intensity: f32,
    pub position: Point3<f32>,
    /// Cut-off distance, 0 means unlimited.
    pub distance: f32,
    pub decay: f32,
}

impl PointLight {
    pub fn new(color: Color, intensity: f32) -> Self {
        Self {
            color,
            intensity,
            position: Point3::origin(),
            distance: 0.0,
            decay: 2.0,
        }
    }
}

/// A rectangular one-sided emitter. Its orientation is fixed when [`RectAreaLight::look_at`]
/// is called; moving it afterwards keeps the facing direction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RectAreaLight {
    pub color: Color,
    pub intensity: f32,
    pub width: f32,
    pub height: f32,
    pub position: Point3<f32>,
    facing: Vector3<f32>,
}

impl RectAreaLight {
    pub fn new(color: Color, intensity: f32, width: f32, height: f32) -> Self {
        Self {
            color,
            intensity,
            width,
            height,
            position: Point3::origin(),
            facing: -Vector3::unit_z(),
        }
    }

    /// Turn the emitting side towards `target`. Ignored if `target` is the light's position.
    pub fn look_at(&mut self, target: Point3<f32>) {
        let d = target - self.position;
        if d.magnitude2() > 0.0 {
            self.facing = d.normalize();
        }
    }

    pub fn facing(&self) -> Vector3<f32> {
        self.facing
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpotLight {
    pub color: Color,
    pub intensity: f32,
    pub distance: f32,
    /// Half angle of the cone in radians, at most π/2.
    pub angle: f32,
    /// Fraction of the cone that is attenuated, in [0, 1].
    pub penumbra: f32,
    pub decay: f32,
    pub position: Point3<f32>,
    pub target: Point3<f32>,
}

impl SpotLight {
    pub fn new(color: Color, intensity: f32, distance: f32, angle: f32, penumbra: f32, decay: f32) -> Self {
        Self {
            color,
            intensity,
            distance,
            angle: angle.clamp(0.0, PI / 2.0),
            penumbra: penumbra.clamp(0.0, 1.0),
            decay,
            position: Point3::new(0.0, 1.0, 0.0),
            target: Point3::origin(),
        }
    }

    pub fn direction(&self) -> Vector3<f32> {
        let d = self.target - self.position;
        if d.magnitude2() == 0.0 {
            -Vector3::unit_y()
        } else {
            d.normalize()
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct LightRig {
    pub ambient: Option<AmbientLight>,
    pub directional: Option<DirectionalLight>,
    pub hemisphere: Option<HemisphereLight>,
    pub point: Option<PointLight>,
    pub rect_area: Option<RectAreaLight>,
    pub spot: Option<SpotLight>,
}

impl LightRig {
    /// Whether a shadow pass is needed for this rig.
    pub fn casts_shadow(&self) -> bool {
        self.directional.is_some_and(|d| d.cast_shadow && d.intensity > 0.0)
    }

    pub fn to_uniform(&self, shadows_enabled: bool) -> LightsUniform {
        let mut u = LightsUniform::default();
        if let Some(a) = self.ambient {
            u.ambient = vec4(a.color.scaled(a.intensity), 0.0);
        }
        if let Some(h) = self.hemisphere {
            u.hemisphere_sky = vec4(h.sky_color.scaled(h.intensity), 0.0);
            u.hemisphere_ground = vec4(h.ground_color.scaled(h.intensity), 0.0);
        }
        if let Some(d) = self.directional {
            u.directional_direction = vec4(d.direction().into(), 0.0);
            u.directional_color = vec4(d.color.scaled(d.intensity), 0.0);
            u.shadow_view_proj = d.shadow_view_proj().into();
            if shadows_enabled && self.casts_shadow() {
                u.flags = [1.0, d.shadow.bias, 0.0, 0.0];
            }
        }
        if let Some(p) = self.point {
            u.point_position = vec4(p.position.into(), p.distance);
            u.point_color = vec4(p.color.scaled(p.intensity), p.decay);
        }
        if let Some(s) = self.spot {
            u.spot_position = vec4(s.position.into(), s.distance);
            u.spot_direction = vec4(s.direction().into(), s.angle.cos());
            u.spot_color = vec4(s.color.scaled(s.intensity), 0.0);
            // the inner cosine must stay above the outer one for smoothstep
            let inner = (s.angle * (1.0 - s.penumbra)).cos().max(s.angle.cos() + 1e-4);
            u.spot_cone = [inner, s.decay, 0.0, 0.0];
        }
        if let Some(r) = self.rect_area {
            u.rect_position = vec4(r.position.into(), r.width * r.height);
            u.rect_normal = vec4(r.facing().into(), 0.0);
            u.rect_color = vec4(r.color.scaled(r.intensity), 0.0);
        }
        u
    }
}

fn vec4(xyz: [f32; 3], w: f32) -> [f32; 4] {
    [xyz[0], xyz[1], xyz[2], w]
}

/// GPU layout of a [`LightRig`]. Colours are premultiplied by intensity; a light
/// that is absent has a black colour.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightsUniform {
    pub ambient: [f32; 4],
    pub hemisphere_sky: [f32; 4],
    pub hemisphere_ground: [f32; 4],
    pub directional_direction: [f32; 4],
    pub directional_color: [f32; 4],
    /// w: cut-off distance
    pub point_position: [f32; 4],
    /// w: decay
    pub point_color: [f32; 4],
    /// w: cut-off distance
    pub spot_position: [f32; 4],
    /// w: cosine of the cone angle
    pub spot_direction: [f32; 4],
    pub spot_color: [f32; 4],
    /// x: cosine of the inner (penumbra) angle, y: decay
    pub spot_cone: [f32; 4],
    /// w: emitting area
    pub rect_position: [f32; 4],
    pub rect_normal: [f32; 4],
    pub rect_color: [f32; 4],
    pub shadow_view_proj: [[f32; 4]; 4],
    /// x: shadows on, y: depth bias
    pub flags: [f32; 4],
}

impl Default for LightsUniform {
    fn default() -> Self {
        Self {
            spot_cone: [1.0, 0.0, 0.0, 0.0],
            ..<Self as bytemuck::Zeroable>::zeroed()
        }
    }
}
