use scene_ngin::{
    debug::{DebugPanel, NumberBinding},
    demos::lights::{debug_panel, light_rig},
};

mod common;

#[derive(Default)]
struct Knob {
    value: f32,
}

fn knob() -> NumberBinding<Knob> {
    NumberBinding::new("value", "value", |k: &Knob| k.value, |k: &mut Knob, v| k.value = v)
}

#[test]
fn bounded_values_are_clamped() {
    let binding = knob().min(0.0).max(3.0).step(0.01);
    assert_eq!(binding.constrain(3.5), 3.0);
    assert_eq!(binding.constrain(-1.0), 0.0);
    common::assert_close(binding.constrain(1.234), 1.23, 1e-5);
}

#[test]
fn unbounded_values_snap_to_the_step() {
    let binding = knob().step(0.02);
    common::assert_close(binding.constrain(0.035), 0.04, 1e-6);
    common::assert_close(binding.constrain(-1.509), -1.5, 1e-6);
    common::assert_close(binding.constrain(100.0), 100.0, 1e-4);
}

#[test]
fn set_writes_the_constrained_value() {
    let binding = knob().min(0.0).max(1.0).step(0.5);
    let mut target = Knob::default();
    assert_eq!(binding.set(&mut target, 0.7), 0.5);
    assert_eq!(target.value, 0.5);
    assert_eq!(binding.set(&mut target, f32::NAN), 0.5);
    assert_eq!(target.value, 0.5);
}

#[test]
fn nudge_moves_by_whole_steps() {
    let binding = knob().step(0.25);
    let mut target = Knob::default();
    binding.nudge(&mut target, 1.0);
    binding.nudge(&mut target, 1.0);
    binding.nudge(&mut target, -3.0);
    common::assert_close(target.value, -0.25, 1e-6);
}

#[test]
fn lights_panel_has_the_three_folders() {
    let panel = debug_panel();
    assert_eq!(panel.len(), 7);

    let intensity = panel.binding("AmbientLight", "intensity").expect("ambient intensity");
    assert_eq!((intensity.min, intensity.max, intensity.step), (Some(0.0), Some(3.0), 0.01));
    for folder in ["RectAreaLight", "SpotLight"] {
        for path in ["position.x", "position.y", "position.z"] {
            let binding = panel.binding(folder, path).expect("position binding");
            assert_eq!((binding.min, binding.max, binding.step), (None, None, 0.02));
        }
    }
    assert!(panel.binding("PointLight", "position.x").is_none());
}

#[test]
fn ambient_intensity_is_clamped_on_the_rig() {
    let panel = debug_panel();
    let mut rig = light_rig();
    let intensity = panel.binding("AmbientLight", "intensity").expect("ambient intensity");
    assert_eq!(intensity.get(&rig), 1.0);

    assert_eq!(intensity.set(&mut rig, 5.0), 3.0);
    assert_eq!(rig.ambient.map(|a| a.intensity), Some(3.0));
    assert_eq!(intensity.set(&mut rig, -1.0), 0.0);
    assert_eq!(rig.ambient.map(|a| a.intensity), Some(0.0));
}

#[test]
fn moving_the_rect_light_keeps_its_facing() {
    let panel = debug_panel();
    let mut rig = light_rig();
    let facing = rig.rect_area.map(|r| r.facing());
    let x = panel.binding("RectAreaLight", "position.x").expect("rect x");

    common::assert_close(x.get(&rig), -1.5, 1e-6);
    x.nudge(&mut rig, 10.0);
    common::assert_close(x.get(&rig), -1.3, 1e-5);
    assert_eq!(rig.rect_area.map(|r| r.facing()), facing);
}

#[test]
fn spot_position_is_unbounded() {
    let panel = debug_panel();
    let mut rig = light_rig();
    let y = panel.binding("SpotLight", "position.y").expect("spot y");
    common::assert_close(y.set(&mut rig, 250.0), 250.0, 1e-3);
    common::assert_close(rig.spot.map_or(0.0, |s| s.position.y), 250.0, 1e-3);
}

#[test]
fn selection_wraps_around() {
    let mut panel = debug_panel();
    assert_eq!(panel.selected().map(|(folder, b)| (folder, b.path)), Some(("AmbientLight", "intensity")));

    panel.select_previous();
    assert_eq!(panel.selected().map(|(folder, b)| (folder, b.path)), Some(("SpotLight", "position.z")));

    panel.select_next();
    panel.select_next();
    assert_eq!(panel.selected().map(|(folder, b)| (folder, b.path)), Some(("RectAreaLight", "position.x")));
}

#[test]
fn nudge_selected_targets_the_selection() {
    let panel = debug_panel();
    let mut rig = light_rig();
    let value = panel.nudge_selected(&mut rig, 10.0);
    assert_eq!(value.map(|v| (v * 100.0).round()), Some(110.0));
}

#[test]
fn toggle_and_describe() {
    let mut panel = debug_panel();
    assert!(panel.is_visible());
    assert!(!panel.toggle());
    assert!(panel.toggle());

    let text = panel.describe(&light_rig());
    for folder in ["AmbientLight", "RectAreaLight", "SpotLight"] {
        assert!(text.contains(folder), "{folder} missing from\n{text}");
    }
    assert!(text.lines().any(|line| line.contains('>') && line.contains("intensity")));
}

#[test]
fn empty_panel_selects_nothing() {
    let mut panel: DebugPanel<Knob> = DebugPanel::new("empty");
    panel.select_next();
    assert!(panel.is_empty());
    assert!(panel.selected().is_none());
    assert!(panel.nudge_selected(&mut Knob::default(), 1.0).is_none());
}
