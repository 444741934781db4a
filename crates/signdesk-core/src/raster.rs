//! Rasterization of signature strokes into a PNG image

use crate::error::{Result, SignDeskError};
use base64::{engine::general_purpose::STANDARD, Engine};
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, Rgba, RgbaImage};
use imageproc::drawing::{draw_antialiased_line_segment_mut, draw_filled_circle_mut};
use imageproc::pixelops::interpolate;

pub const PNG_DATA_URL_PREFIX: &str = "data:image/png;base64,";

/// A point in surface pixels (top-left origin)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// One straight piece of a stroke. A zero-length segment draws a dot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub from: Point,
    pub to: Point,
}

impl Segment {
    pub fn length(&self) -> f64 {
        (self.to.x - self.from.x).hypot(self.to.y - self.from.y)
    }
}

/// Pen used for every segment: round caps and joins
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    pub line_width: f64,
    pub rgb: [u8; 3],
}

impl StrokeStyle {
    fn pixel(&self) -> Rgba<u8> {
        let [r, g, b] = self.rgb;
        Rgba([r, g, b, 255])
    }

    fn radius(&self) -> i32 {
        (self.line_width / 2.0).round() as i32
    }
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            line_width: 2.0,
            rgb: [0, 0, 0],
        }
    }
}

/// Transparent RGBA image the strokes are drawn onto
#[derive(Debug, Clone)]
pub struct Raster {
    image: RgbaImage,
}

impl Raster {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::new(width, height),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// RGBA value at a pixel, or None outside the image
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        self.image.get_pixel_checked(x, y).map(|p| p.0)
    }

    /// Number of pixels with any ink
    pub fn inked_pixels(&self) -> usize {
        self.image.pixels().filter(|p| p.0[3] > 0).count()
    }

    /// Draw a round-capped segment.
    ///
    /// The pen is stamped as a filled disc at every pixel step along the
    /// segment, then the centre line is drawn anti-aliased on top.
    pub fn draw_segment(&mut self, segment: &Segment, style: &StrokeStyle) {
        if !self.touches(segment, style) {
            return;
        }

        let color = style.pixel();
        let radius = style.radius();
        let steps = segment.length().ceil().max(1.0) as u32;

        for i in 0..=steps {
            let t = f64::from(i) / f64::from(steps);
            let x = segment.from.x + (segment.to.x - segment.from.x) * t;
            let y = segment.from.y + (segment.to.y - segment.from.y) * t;
            draw_filled_circle_mut(&mut self.image, (x as i32, y as i32), radius, color);
        }

        let start = (segment.from.x as i32, segment.from.y as i32);
        let end = (segment.to.x as i32, segment.to.y as i32);
        // A dot is fully covered by the discs
        if start != end {
            draw_antialiased_line_segment_mut(&mut self.image, start, end, color, interpolate);
        }
    }

    /// Whether the pen footprint of `segment` overlaps the image at all
    fn touches(&self, segment: &Segment, style: &StrokeStyle) -> bool {
        let reach = style.line_width / 2.0 + 1.0;
        let (w, h) = (f64::from(self.width()), f64::from(self.height()));
        segment.from.x.min(segment.to.x) - reach < w
            && segment.from.y.min(segment.to.y) - reach < h
            && segment.from.x.max(segment.to.x) + reach >= 0.0
            && segment.from.y.max(segment.to.y) + reach >= 0.0
    }

    /// Encode as an 8-bit RGBA PNG
    pub fn encode_png(&self) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        PngEncoder::new(&mut out)
            .write_image(
                self.image.as_raw(),
                self.width(),
                self.height(),
                ExtendedColorType::Rgba8,
            )
            .map_err(|e| SignDeskError::ImageEncoding(e.to_string()))?;
        Ok(out)
    }
}

/// Wrap PNG bytes in a `data:` URL
pub fn png_data_url(png: &[u8]) -> String {
    format!("{}{}", PNG_DATA_URL_PREFIX, STANDARD.encode(png))
}

/// PNG bytes carried by a `data:image/png;base64,` URL
pub fn png_from_data_url(url: &str) -> Result<Vec<u8>> {
    let payload = url
        .strip_prefix(PNG_DATA_URL_PREFIX)
        .ok_or_else(|| SignDeskError::ImageEncoding("not a PNG data URL".to_string()))?;
    STANDARD
        .decode(payload)
        .map_err(|e| SignDeskError::ImageEncoding(e.to_string()))
}
