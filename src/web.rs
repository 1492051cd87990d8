//! Browser entry points. Each expects a `<canvas id="canvas">` on the page and does
//! nothing without one.

use wasm_bindgen::prelude::*;

use crate::demos;

#[wasm_bindgen]
pub fn run_text() -> Result<(), JsValue> {
    demos::text::run().map_err(|e| JsValue::from_str(&format!("{:#}", e)))
}

#[wasm_bindgen]
pub fn run_lights() -> Result<(), JsValue> {
    demos::lights::run().map_err(|e| JsValue::from_str(&format!("{:#}", e)))
}
