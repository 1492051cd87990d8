use cgmath::{InnerSpace, Point3};
use scene_ngin::{
    camera::{Camera, OrbitController, Projection, Spherical},
    context::{FIELD_OF_VIEW, Z_FAR, Z_NEAR},
};

mod common;

fn camera() -> Camera {
    Camera::new((0.0, 0.0, 3.0), (0.0, 0.0, 0.0))
}

fn orbit(camera: &Camera) -> Spherical {
    Spherical::from_offset(camera.position - camera.target)
}

#[test]
fn spherical_round_trips_the_eye_offset() {
    let eye = Point3::new(1.0, 1.0, 2.0);
    let offset = eye - Point3::new(0.0, 0.0, 0.0);
    let back = Spherical::from_offset(offset).to_offset();
    common::assert_close((back - offset).magnitude(), 0.0, 1e-5);
}

#[test]
fn rotation_without_damping_is_applied_at_once() {
    let mut camera = camera();
    let mut controls = OrbitController::new();
    controls.rotate_left(0.5);
    assert!(controls.is_moving());
    controls.update(&mut camera);

    let s = orbit(&camera);
    common::assert_close(s.theta, -0.5, 1e-5);
    common::assert_close(s.radius, 3.0, 1e-5);
    assert!(!controls.is_moving());
}

#[test]
fn damping_spreads_motion_over_frames_and_comes_to_rest() {
    let mut camera = camera();
    let mut controls = OrbitController::new();
    controls.enable_damping = true;
    controls.rotate_left(1.0);

    controls.update(&mut camera);
    common::assert_close(orbit(&camera).theta, -0.05, 1e-5);
    assert!(controls.is_moving());

    let mut frames = 1;
    while controls.is_moving() {
        controls.update(&mut camera);
        frames += 1;
        assert!(frames < 10_000, "damping never settled");
    }
    let s = orbit(&camera);
    common::assert_close(s.theta, -1.0, 1e-3);
    common::assert_close(s.radius, 3.0, 1e-4);
}

#[test]
fn polar_angle_never_reaches_the_pole() {
    let mut camera = camera();
    let mut controls = OrbitController::new();
    controls.rotate_up(10.0);
    controls.update(&mut camera);
    // the eye stays a hair off the vertical axis so look_at keeps a valid basis
    assert!(camera.position.z > 0.0);
    assert!(camera.position.y.is_finite());
    common::assert_close(orbit(&camera).radius, 3.0, 1e-4);
}

#[test]
fn dolly_scales_the_distance() {
    let mut camera = camera();
    let mut controls = OrbitController::new();
    controls.dolly_in(2.0);
    controls.update(&mut camera);
    common::assert_close(orbit(&camera).radius, 1.5, 1e-5);

    controls.dolly_out(4.0);
    controls.update(&mut camera);
    common::assert_close(orbit(&camera).radius, 6.0, 1e-4);
}

#[test]
fn pan_moves_eye_and_target_together() {
    let mut camera = camera();
    let projection = Projection::new(800, 600, FIELD_OF_VIEW, Z_NEAR, Z_FAR);
    let mut controls = OrbitController::new();
    controls.set_viewport_height(600);
    let before = camera.position - camera.target;

    controls.pan(&camera, &projection, 100.0, 0.0);
    controls.update(&mut camera);

    let after = camera.position - camera.target;
    common::assert_close((after - before).magnitude(), 0.0, 1e-5);
    // dragging right moves the scene right, so the target moves left
    assert!(camera.target.x < 0.0);
    common::assert_close(camera.target.y, 0.0, 1e-6);
}

#[test]
fn stop_drops_pending_motion() {
    let mut camera = camera();
    let mut controls = OrbitController::new();
    controls.enable_damping = true;
    controls.rotate_left(1.0);
    controls.stop();
    assert!(!controls.is_moving());
    controls.update(&mut camera);
    common::assert_close(camera.position.z, 3.0, 1e-6);
}
