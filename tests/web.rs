//! Browser-only behaviour. Run with `wasm-pack test --headless --firefox`.
#![cfg(target_arch = "wasm32")]

use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn canvas_count() -> u32 {
    let document = web_sys::window().and_then(|w| w.document()).expect("a document");
    document
        .query_selector_all("canvas")
        .map(|list| list.length())
        .unwrap_or_default()
}

#[wasm_bindgen_test]
fn text_demo_without_canvas_does_nothing() {
    assert_eq!(canvas_count(), 0);
    assert!(scene_ngin::demos::text::run().is_ok());
    assert_eq!(canvas_count(), 0);
}

#[wasm_bindgen_test]
fn lights_demo_without_canvas_does_nothing() {
    assert_eq!(canvas_count(), 0);
    assert!(scene_ngin::demos::lights::run().is_ok());
    assert_eq!(canvas_count(), 0);
}
