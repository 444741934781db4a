//! Freehand signature capture
//!
//! [`SignaturePad`] tracks pointer input on a drawable surface. A press starts
//! a stroke, each move while pressed appends a segment from the previous
//! position, and a release (or the pointer leaving the surface) ends it.
//! Strokes are kept only for the current surface size: resizing wipes them,
//! the same way resizing a `<canvas>` discards its pixels.

use crate::error::{Result, SignDeskError};
use crate::raster::{png_data_url, png_from_data_url, Point, Raster, Segment, StrokeStyle};
use signdesk_types::SignatureCapture;
use tracing::{debug, info, warn};

#[derive(Debug, Clone)]
pub struct SignaturePad {
    width: u32,
    height: u32,
    style: StrokeStyle,
    name: String,
    segments: Vec<Segment>,
    /// Last pointer position of the stroke in progress
    cursor: Option<Point>,
    is_empty: bool,
}

impl SignaturePad {
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_style(width, height, StrokeStyle::default())
    }

    pub fn with_style(width: u32, height: u32, style: StrokeStyle) -> Self {
        Self {
            width,
            height,
            style,
            name: String::new(),
            segments: Vec::new(),
            cursor: None,
            is_empty: true,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn style(&self) -> &StrokeStyle {
        &self.style
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }

    pub fn is_empty(&self) -> bool {
        self.is_empty
    }

    pub fn is_drawing(&self) -> bool {
        self.cursor.is_some()
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Start a stroke. The surface counts as non-empty from this point on.
    pub fn pointer_down(&mut self, x: f64, y: f64) {
        let p = Point::new(x, y);
        self.cursor = Some(p);
        self.is_empty = false;
        // A press with no movement still leaves a dot
        self.segments.push(Segment { from: p, to: p });
        debug!(x, y, "stroke started");
    }

    /// Extend the current stroke; ignored when no button is held.
    ///
    /// Returns the segment appended so a host can draw it immediately.
    pub fn pointer_move(&mut self, x: f64, y: f64) -> Option<Segment> {
        let from = self.cursor?;
        let to = Point::new(x, y);
        let segment = Segment { from, to };
        self.segments.push(segment);
        self.cursor = Some(to);
        Some(segment)
    }

    pub fn pointer_up(&mut self) {
        if self.cursor.take().is_some() {
            debug!(segments = self.segments.len(), "stroke ended");
        }
    }

    /// Leaving the surface ends the stroke like a release
    pub fn pointer_leave(&mut self) {
        self.pointer_up();
    }

    /// Erase everything. A no-op on an empty surface.
    pub fn clear(&mut self) {
        if self.is_empty && self.segments.is_empty() {
            return;
        }
        self.segments.clear();
        self.cursor = None;
        self.is_empty = true;
        debug!("signature cleared");
    }

    /// Change the surface size, dropping all drawing state.
    ///
    /// Returns true if anything was discarded.
    pub fn resize(&mut self, width: u32, height: u32) -> bool {
        let had_ink = !self.is_empty;
        self.width = width;
        self.height = height;
        self.segments.clear();
        self.cursor = None;
        self.is_empty = true;
        if had_ink {
            debug!(width, height, "surface resized, strokes discarded");
        }
        had_ink
    }

    pub fn can_save(&self) -> bool {
        !self.is_empty && !self.name.trim().is_empty()
    }

    /// Rasterize the strokes at the current surface size
    pub fn render(&self) -> Raster {
        let mut raster = Raster::new(self.width, self.height);
        for segment in &self.segments {
            raster.draw_segment(segment, &self.style);
        }
        raster
    }

    /// Trimmed signer name, once the drawing and name are both present
    fn ready_name(&self) -> Result<&str> {
        if self.is_empty {
            warn!("signature save rejected: empty drawing");
            return Err(SignDeskError::EmptyDrawing);
        }

        let name = self.name.trim();
        if name.is_empty() {
            warn!("signature save rejected: blank name");
            return Err(SignDeskError::BlankName);
        }

        if self.width == 0 || self.height == 0 {
            return Err(SignDeskError::InvalidSurface {
                width: f64::from(self.width),
                height: f64::from(self.height),
            });
        }
        Ok(name)
    }

    /// Produce the name/image pair for a signing action, rasterizing the
    /// recorded strokes
    pub fn save(&self) -> Result<SignatureCapture> {
        let name = self.ready_name()?;
        let png = self.render().encode_png()?;
        info!(
            signer = name,
            bytes = png.len(),
            segments = self.segments.len(),
            "signature captured"
        );

        Ok(SignatureCapture {
            name: name.to_string(),
            image_data_url: png_data_url(&png),
            png,
            width: self.width,
            height: self.height,
        })
    }

    /// Produce the name/image pair from an image the host already exported,
    /// such as a `<canvas>` element's `toDataURL("image/png")`
    pub fn save_with_image(&self, image_data_url: String) -> Result<SignatureCapture> {
        let name = self.ready_name()?;
        let png = png_from_data_url(&image_data_url)?;
        info!(signer = name, bytes = png.len(), "signature captured from surface");

        Ok(SignatureCapture {
            name: name.to_string(),
            image_data_url,
            png,
            width: self.width,
            height: self.height,
        })
    }
}
