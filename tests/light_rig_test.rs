use cgmath::{InnerSpace, Matrix4, Point3, Vector4};
use scene_ngin::{
    data_structures::{
        color::{Color, srgb_to_linear},
        light::{LightRig, LightsUniform},
    },
    demos::lights::light_rig,
};

mod common;

#[test]
fn white_hex_is_linear_white() {
    let white = Color::from_hex(0xffffff);
    common::assert_close(white.r, 1.0, 1e-6);
    common::assert_close(white.g, 1.0, 1e-6);
    common::assert_close(white.b, 1.0, 1e-6);
    assert_eq!(Color::from_hex(0x000000), Color::BLACK);
    // sRGB mid grey is darker in linear space
    common::assert_close(srgb_to_linear(0.5), 0.214, 1e-3);
}

#[test]
fn empty_rig_is_dark() {
    let uniform = LightRig::default().to_uniform(true);
    assert_eq!(uniform, LightsUniform::default());
    assert_eq!(uniform.ambient, [0.0; 4]);
    assert_eq!(uniform.flags[0], 0.0);
}

#[test]
fn shadows_need_renderer_and_light() {
    let rig = light_rig();
    assert!(rig.casts_shadow());
    assert_eq!(rig.to_uniform(true).flags[0], 1.0);
    assert_eq!(rig.to_uniform(false).flags[0], 0.0);

    let mut no_cast = rig.clone();
    if let Some(d) = no_cast.directional.as_mut() {
        d.cast_shadow = false;
    }
    assert!(!no_cast.casts_shadow());
    assert_eq!(no_cast.to_uniform(true).flags[0], 0.0);
}

#[test]
fn colours_are_premultiplied_by_intensity() {
    let uniform = light_rig().to_uniform(true);
    assert_eq!(uniform.ambient, [1.0, 1.0, 1.0, 0.0]);

    let sky = Color::from_hex(0x0000ff);
    common::assert_close(uniform.hemisphere_sky[2], sky.b * 0.9, 1e-6);
    common::assert_close(uniform.hemisphere_ground[0], 0.9, 1e-6);
    common::assert_close(uniform.directional_color[0], 0.3, 1e-6);
}

#[test]
fn point_and_spot_parameters_are_packed() {
    let uniform = light_rig().to_uniform(true);
    assert_eq!(uniform.point_position[3], 3.0);
    assert_eq!(uniform.point_color[3], 2.0);

    assert_eq!(uniform.spot_position, [0.0, 1.0, 0.0, 3.0]);
    assert_eq!(&uniform.spot_direction[..3], &[0.0, -1.0, 0.0]);
    let outer = uniform.spot_direction[3];
    common::assert_close(outer, std::f32::consts::FRAC_PI_4.cos(), 1e-6);
    // penumbra 0.25: the full-intensity cone is narrower than the outer one
    assert!(uniform.spot_cone[0] > outer);
    assert_eq!(uniform.spot_cone[1], 0.0);
}

#[test]
fn hard_edged_spot_still_orders_its_cones() {
    let mut rig = light_rig();
    if let Some(s) = rig.spot.as_mut() {
        s.penumbra = 0.0;
    }
    let uniform = rig.to_uniform(true);
    assert!(uniform.spot_cone[0] > uniform.spot_direction[3]);
}

#[test]
fn rect_light_faces_the_origin() {
    let uniform = light_rig().to_uniform(true);
    assert_eq!(uniform.rect_position, [-1.5, 0.0, 1.5, 1.0]);
    let normal = cgmath::Vector3::new(uniform.rect_normal[0], uniform.rect_normal[1], uniform.rect_normal[2]);
    common::assert_close(normal.magnitude(), 1.0, 1e-6);
    common::assert_close(normal.x, std::f32::consts::FRAC_1_SQRT_2, 1e-6);
    common::assert_close(normal.z, -std::f32::consts::FRAC_1_SQRT_2, 1e-6);
}

#[test]
fn directional_light_shines_down() {
    let rig = light_rig();
    let directional = rig.directional.expect("directional light");
    assert_eq!(directional.position, Point3::new(0.0, 1.0, 0.0));
    let direction = directional.direction();
    common::assert_close(direction.y, 1.0, 1e-6);
}

#[test]
fn shadow_camera_sees_the_scene() {
    let rig = light_rig();
    let directional = rig.directional.expect("directional light");
    let view_proj: Matrix4<f32> = directional.shadow_view_proj();

    for point in [
        Vector4::new(0.0, 0.0, 0.0, 1.0),
        Vector4::new(-1.5, 0.0, 0.0, 1.0),
        Vector4::new(2.5, -0.65, 2.5, 1.0),
    ] {
        let clip = view_proj * point;
        let ndc = clip / clip.w;
        assert!(ndc.x.abs() <= 1.0 && ndc.y.abs() <= 1.0, "{point:?} outside the shadow map");
        assert!((0.0..=1.0).contains(&ndc.z), "{point:?} outside the depth range");
    }
}

#[test]
fn uniform_matches_the_shader_layout() {
    // 14 vec4s, a mat4 and the flags vec4
    assert_eq!(std::mem::size_of::<LightsUniform>(), (14 + 4 + 1) * 16);
}
