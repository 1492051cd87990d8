use std::f32::consts::PI;

use scene_ngin::data_structures::instance::{Instance, scatter};
use scene_ngin::demos::text::{DONUT_COUNT, DONUT_EXTENT};

mod common;

#[test]
fn donuts_stay_inside_the_cube() {
    let donuts = scatter(&mut common::seeded_rng(7), DONUT_COUNT, DONUT_EXTENT);
    assert_eq!(donuts.len(), 1000);
    for donut in &donuts {
        for c in [donut.position.x, donut.position.y, donut.position.z] {
            assert!((-5.0..5.0).contains(&c), "position component {c} out of range");
        }
    }
}

#[test]
fn donut_rotation_and_scale_ranges() {
    for donut in scatter(&mut common::seeded_rng(42), DONUT_COUNT, DONUT_EXTENT) {
        assert!((0.0..PI).contains(&donut.rotation.x.0));
        assert!((0.0..PI).contains(&donut.rotation.y.0));
        assert_eq!(donut.rotation.z.0, 0.0);
        assert!((0.0..1.0).contains(&donut.scale.x));
        assert_eq!(donut.scale.x, donut.scale.y);
        assert_eq!(donut.scale.y, donut.scale.z);
    }
}

#[test]
fn same_seed_same_population() {
    let a = scatter(&mut common::seeded_rng(3), 16, DONUT_EXTENT);
    let b = scatter(&mut common::seeded_rng(3), 16, DONUT_EXTENT);
    let c = scatter(&mut common::seeded_rng(4), 16, DONUT_EXTENT);
    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn population_spreads_over_the_cube() {
    let donuts = scatter(&mut common::seeded_rng(11), DONUT_COUNT, DONUT_EXTENT);
    let mean_x = donuts.iter().map(|d| d.position.x).sum::<f32>() / donuts.len() as f32;
    let mean_scale = donuts.iter().map(|d| d.scale.x).sum::<f32>() / donuts.len() as f32;
    common::assert_close(mean_x, 0.0, 0.5);
    common::assert_close(mean_scale, 0.5, 0.05);
}

#[test]
fn spin_starts_at_zero() {
    let mut instance = Instance::new();
    instance.spin(0.0);
    assert_eq!(instance.rotation.x.0, 0.0);
    assert_eq!(instance.rotation.y.0, 0.0);
}

#[test]
fn spin_follows_elapsed_time() {
    let mut instance = Instance::new().with_position(-1.5, 0.0, 0.0);
    instance.spin(2.0);
    common::assert_close(instance.rotation.x.0, 0.3, 1e-6);
    common::assert_close(instance.rotation.y.0, 0.2, 1e-6);
    assert_eq!(instance.rotation.z.0, 0.0);
    assert_eq!(instance.position.x, -1.5);
}

#[test]
fn spin_is_monotonic() {
    let mut instance = Instance::new();
    let mut last = (f32::NEG_INFINITY, f32::NEG_INFINITY);
    for step in 0..100 {
        instance.spin(step as f32 * 0.25);
        let now = (instance.rotation.x.0, instance.rotation.y.0);
        assert!(now.0 > last.0 && now.1 > last.1);
        last = now;
    }
}

#[test]
fn spin_overwrites_instead_of_accumulating() {
    let mut instance = Instance::new();
    instance.spin(5.0);
    instance.spin(1.0);
    common::assert_close(instance.rotation.x.0, 0.15, 1e-6);
    common::assert_close(instance.rotation.y.0, 0.1, 1e-6);
}
