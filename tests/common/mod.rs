#![allow(dead_code)]

use rand::{SeedableRng, rngs::StdRng};

pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

pub fn assert_close(actual: f32, expected: f32, tolerance: f32) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {expected} ± {tolerance}, got {actual}"
    );
}

/// A two glyph typeface: `a` is a unit square, `b` a square with a square hole,
/// space has no outline. Resolution 100, so a glyph spans one em.
pub const TINY_FONT: &str = r#"{
    "familyName": "Tiny",
    "resolution": 100,
    "underlineThickness": 10,
    "boundingBox": { "xMin": 0, "xMax": 100, "yMin": 0, "yMax": 100 },
    "glyphs": {
        "a": { "ha": 120, "o": "m 0 0 l 100 0 l 100 100 l 0 100 z" },
        "b": { "ha": 120, "o": "m 0 0 l 100 0 l 100 100 l 0 100 z m 25 25 l 25 75 l 75 75 l 75 25 z" },
        " ": { "ha": 60 }
    }
}"#;
