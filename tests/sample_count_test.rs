use scene_ngin::context::{MSAA_SAMPLES, supported_sample_count};
use wgpu::TextureFormatFeatureFlags as Flags;

#[test]
fn four_samples_when_colour_and_depth_allow_it() {
    let color = Flags::MULTISAMPLE_X4 | Flags::MULTISAMPLE_RESOLVE | Flags::FILTERABLE;
    let depth = Flags::MULTISAMPLE_X4;
    assert_eq!(MSAA_SAMPLES, 4);
    assert_eq!(supported_sample_count(color, depth), 4);
}

#[test]
fn single_sample_without_resolve() {
    assert_eq!(supported_sample_count(Flags::MULTISAMPLE_X4, Flags::MULTISAMPLE_X4), 1);
}

#[test]
fn single_sample_when_depth_cannot_be_multisampled() {
    let color = Flags::MULTISAMPLE_X4 | Flags::MULTISAMPLE_RESOLVE;
    assert_eq!(supported_sample_count(color, Flags::empty()), 1);
    assert_eq!(supported_sample_count(color, Flags::MULTISAMPLE_X2), 1);
}

#[test]
fn single_sample_on_bare_formats() {
    assert_eq!(supported_sample_count(Flags::empty(), Flags::empty()), 1);
}
