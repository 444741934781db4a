//! Coordinate helpers exported to JavaScript
//!
//! Thin wrappers over `signdesk_core::coords`. Pairs come back as
//! two-element arrays, `[x, y]`.

use signdesk_core::coords;
use signdesk_core::SignaturePosition;
use wasm_bindgen::prelude::*;

/// Pixel offset inside a surface → page fractions, clamped to [0, 1]
#[wasm_bindgen(js_name = normalizeClick)]
pub fn normalize_click(
    offset_x: f64,
    offset_y: f64,
    width: f64,
    height: f64,
) -> Result<Vec<f64>, JsValue> {
    let (x, y) = coords::normalize(offset_x, offset_y, width, height)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    Ok(vec![x, y])
}

/// Where a saved signature position lands on a page of the given size
#[wasm_bindgen(js_name = positionToPdf)]
pub fn position_to_pdf(x: f64, y: f64, page_width: f64, page_height: f64) -> Vec<f64> {
    let position = SignaturePosition::new(x, y, 1);
    let (pdf_x, pdf_y) = coords::position_to_pdf(&position, [0.0, 0.0, page_width, page_height]);
    vec![pdf_x, pdf_y]
}
