//! Coordinate transforms between surface pixels, normalized page fractions
//! and PDF user space

use crate::error::{Result, SignDeskError};
use signdesk_types::SignaturePosition;

/// Convert a pixel offset inside a surface into page fractions in [0, 1].
///
/// Offsets outside the surface are clamped to its edges.
pub fn normalize(offset_x: f64, offset_y: f64, width: f64, height: f64) -> Result<(f64, f64)> {
    // NaN fails both comparisons
    if !(width > 0.0 && height > 0.0) {
        return Err(SignDeskError::InvalidSurface { width, height });
    }

    let x = (offset_x / width).clamp(0.0, 1.0);
    let y = (offset_y / height).clamp(0.0, 1.0);

    Ok((x, y))
}

/// Convert page fractions back into a pixel offset inside a surface
pub fn denormalize(x: f64, y: f64, width: f64, height: f64) -> (f64, f64) {
    (x * width, y * height)
}

/// Convert DOM coordinates (top-left origin, pixels) to PDF coordinates (bottom-left origin, points)
pub fn dom_to_pdf(
    dom_x: f64,
    dom_y: f64,
    container_width: f64,
    container_height: f64,
    media_box: [f64; 4],
) -> (f64, f64) {
    let [mb_x, mb_y, mb_width, mb_height] = media_box;

    let x_pct = dom_x / container_width;
    let y_pct = dom_y / container_height;

    // Flip Y axis
    let pdf_x = mb_x + (x_pct * mb_width);
    let pdf_y = mb_y + (mb_height - (y_pct * mb_height));

    (pdf_x, pdf_y)
}

/// Convert PDF coordinates to DOM coordinates
pub fn pdf_to_dom(
    pdf_x: f64,
    pdf_y: f64,
    container_width: f64,
    container_height: f64,
    media_box: [f64; 4],
) -> (f64, f64) {
    let [mb_x, mb_y, mb_width, mb_height] = media_box;

    let x_pct = (pdf_x - mb_x) / mb_width;
    let y_pct = 1.0 - ((pdf_y - mb_y) / mb_height);

    (x_pct * container_width, y_pct * container_height)
}

/// Map a normalized position onto a page's media box `[x, y, width, height]`
pub fn position_to_pdf(position: &SignaturePosition, media_box: [f64; 4]) -> (f64, f64) {
    // A unit container makes the DOM offset equal to the fraction
    dom_to_pdf(position.x, position.y, 1.0, 1.0, media_box)
}

/// Build a normalized position from a point in a page's media box
pub fn position_from_pdf(
    pdf_x: f64,
    pdf_y: f64,
    page: u32,
    media_box: [f64; 4],
) -> SignaturePosition {
    let (x, y) = pdf_to_dom(pdf_x, pdf_y, 1.0, 1.0, media_box);
    SignaturePosition::new(x, y, page)
}
