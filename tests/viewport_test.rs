use cgmath::{Deg, Rad};
use scene_ngin::{
    camera::Projection,
    context::{FIELD_OF_VIEW, Z_FAR, Z_NEAR},
    viewport::{MAX_PIXEL_RATIO, Viewport, clamp_pixel_ratio},
};
use winit::dpi::PhysicalSize;

mod common;

fn projection(width: u32, height: u32) -> Projection {
    Projection::new(width, height, FIELD_OF_VIEW, Z_NEAR, Z_FAR)
}

#[test]
fn pixel_ratio_is_clamped_to_two() {
    assert_eq!(clamp_pixel_ratio(3.0), MAX_PIXEL_RATIO);
    assert_eq!(clamp_pixel_ratio(2.0), 2.0);
    assert_eq!(clamp_pixel_ratio(1.0), 1.0);
    assert_eq!(clamp_pixel_ratio(1.5), 1.5);
}

#[test]
fn invalid_pixel_ratio_falls_back_to_one() {
    assert_eq!(clamp_pixel_ratio(f64::NAN), 1.0);
    assert_eq!(clamp_pixel_ratio(0.0), 1.0);
    assert_eq!(clamp_pixel_ratio(-2.0), 1.0);
}

#[test]
fn aspect_matches_viewport_after_resize() {
    let mut projection = projection(800, 600);
    common::assert_close(projection.aspect, 4.0 / 3.0, 1e-6);

    let viewport = Viewport::new(1920, 1080, 1.0);
    projection.resize(viewport.width, viewport.height);
    assert_eq!(projection.aspect, 1920.0 / 1080.0);
    assert_eq!(projection.aspect, viewport.aspect());
    assert_eq!(viewport.drawing_buffer(), PhysicalSize::new(1920, 1080));
}

#[test]
fn resize_is_idempotent() {
    let mut projection = projection(800, 600);
    projection.resize(1280, 720);
    let once = projection.aspect;
    projection.resize(1280, 720);
    assert_eq!(projection.aspect, once);
}

#[test]
fn zero_height_is_ignored() {
    let mut projection = projection(800, 600);
    projection.resize(800, 0);
    common::assert_close(projection.aspect, 4.0 / 3.0, 1e-6);
    assert!(!Viewport::new(800, 0, 1.0).is_drawable());
    assert!(!Viewport::new(0, 600, 1.0).is_drawable());
    assert!(Viewport::new(1, 1, 1.0).is_drawable());
}

#[test]
fn drawing_buffer_uses_clamped_ratio() {
    // 1000x500 logical pixels on a 3x display
    let dense = Viewport::from_physical(PhysicalSize::new(3000, 1500), 3.0);
    assert_eq!(dense.logical_size(), (1000.0, 500.0));
    assert_eq!(dense.pixel_ratio(), 2.0);
    assert_eq!(dense.drawing_buffer(), PhysicalSize::new(2000, 1000));

    // below the clamp the buffer is the physical size
    let retina = Viewport::from_physical(PhysicalSize::new(2000, 1000), 2.0);
    assert_eq!(retina.drawing_buffer(), PhysicalSize::new(2000, 1000));
    assert_eq!(retina.aspect(), 2.0);
}

#[test]
fn projection_keeps_field_of_view() {
    let projection = projection(640, 480);
    let expected: Rad<f32> = Deg(75.0).into();
    assert_eq!(projection.fovy, expected);
    assert_eq!(projection.znear, 0.1);
    assert_eq!(projection.zfar, 100.0);
}
