//! Signature drawing surface bound to a `<canvas>` element
//!
//! Mouse events feed a [`SignaturePad`]; each segment it reports is stroked
//! on the canvas right away so the user sees their signature as they draw.
//! Saving exports the canvas pixels themselves, so the image is exactly what
//! the user saw. The backing store follows the element's displayed size.

use crate::app::{to_js, SignDeskApp};
use signdesk_core::raster::{Segment, StrokeStyle};
use signdesk_core::{SignDeskError, SignaturePad, SignatureCapture};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, Window};

type Listener = Closure<dyn FnMut(MouseEvent)>;

#[wasm_bindgen]
pub struct SignatureCanvas {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
    pad: Rc<RefCell<SignaturePad>>,
    listeners: Vec<(&'static str, Listener)>,
    window: Window,
    on_resize: Option<Closure<dyn FnMut()>>,
}

#[wasm_bindgen]
impl SignatureCanvas {
    /// Bind the canvas with id `canvas_id`, using the app's stroke settings
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: &str, app: &SignDeskApp) -> Result<SignatureCanvas, JsValue> {
        let window =
            web_sys::window().ok_or_else(|| JsValue::from_str("No window object available"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("No document object available"))?;

        let canvas = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| JsValue::from_str(&format!("Canvas '{}' not found", canvas_id)))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| JsValue::from_str(&format!("'{}' is not a canvas", canvas_id)))?;

        let context = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;

        let style = app.config().capture.stroke_style();
        let pad = SignaturePad::with_style(canvas.width(), canvas.height(), style);

        let mut surface = Self {
            canvas,
            context,
            pad: Rc::new(RefCell::new(pad)),
            listeners: Vec::new(),
            window,
            on_resize: None,
        };
        fit_to_display(&surface.canvas, &surface.context, &surface.pad);
        surface.apply_style();
        surface.attach_listeners()?;
        surface.watch_window_size()?;
        Ok(surface)
    }

    #[wasm_bindgen(js_name = setName)]
    pub fn set_name(&self, name: &str) {
        self.pad.borrow_mut().set_name(name);
    }

    #[wasm_bindgen(getter, js_name = isEmpty)]
    pub fn is_empty(&self) -> bool {
        self.pad.borrow().is_empty()
    }

    #[wasm_bindgen(getter, js_name = canSave)]
    pub fn can_save(&self) -> bool {
        self.pad.borrow().can_save()
    }

    /// Erase the drawing
    pub fn clear(&self) {
        self.pad.borrow_mut().clear();
        self.context.clear_rect(
            0.0,
            0.0,
            f64::from(self.canvas.width()),
            f64::from(self.canvas.height()),
        );
    }

    /// Match the backing store to a new display size. Drops the drawing.
    pub fn resize(&self, width: u32, height: u32) {
        resize_surface(&self.canvas, &self.context, &self.pad, width, height);
    }

    /// Re-measure the element and resize to match
    #[wasm_bindgen(js_name = fitToDisplay)]
    pub fn fit_to_display(&self) {
        fit_to_display(&self.canvas, &self.context, &self.pad);
    }

    /// `{ name, image_data_url, width, height }` for the current drawing
    pub fn save(&self) -> Result<JsValue, JsValue> {
        let capture = self.capture().map_err(|e| JsValue::from_str(&e.to_string()))?;
        to_js(&capture)
    }
}

impl SignatureCanvas {
    /// The drawn signature, exported from the canvas as a PNG
    pub fn capture(&self) -> Result<SignatureCapture, SignDeskError> {
        let pad = self.pad.borrow();
        if !pad.can_save() {
            // Reports the missing drawing or name without exporting
            return pad.save();
        }
        let image = self
            .canvas
            .to_data_url_with_type("image/png")
            .map_err(|_| SignDeskError::ImageEncoding("canvas export failed".to_string()))?;
        pad.save_with_image(image)
    }

    fn apply_style(&self) {
        let style = *self.pad.borrow().style();
        apply_stroke_style(&self.context, &style);
    }

    fn watch_window_size(&mut self) -> Result<(), JsValue> {
        let canvas = self.canvas.clone();
        let context = self.context.clone();
        let pad = Rc::clone(&self.pad);
        let listener = Closure::wrap(Box::new(move || {
            fit_to_display(&canvas, &context, &pad);
        }) as Box<dyn FnMut()>);

        self.window
            .add_event_listener_with_callback("resize", listener.as_ref().unchecked_ref())?;
        self.on_resize = Some(listener);
        Ok(())
    }

    fn attach_listeners(&mut self) -> Result<(), JsValue> {
        let down = {
            let pad = Rc::clone(&self.pad);
            let context = self.context.clone();
            Closure::wrap(Box::new(move |event: MouseEvent| {
                let (x, y) = offset(&event);
                pad.borrow_mut().pointer_down(x, y);
                stroke_segment(&context, x, y, x, y);
            }) as Box<dyn FnMut(MouseEvent)>)
        };

        let moved = {
            let pad = Rc::clone(&self.pad);
            let context = self.context.clone();
            Closure::wrap(Box::new(move |event: MouseEvent| {
                let (x, y) = offset(&event);
                let segment: Option<Segment> = pad.borrow_mut().pointer_move(x, y);
                if let Some(s) = segment {
                    stroke_segment(&context, s.from.x, s.from.y, s.to.x, s.to.y);
                }
            }) as Box<dyn FnMut(MouseEvent)>)
        };

        let up = {
            let pad = Rc::clone(&self.pad);
            Closure::wrap(Box::new(move |_event: MouseEvent| {
                pad.borrow_mut().pointer_up();
            }) as Box<dyn FnMut(MouseEvent)>)
        };

        let leave = {
            let pad = Rc::clone(&self.pad);
            Closure::wrap(Box::new(move |_event: MouseEvent| {
                pad.borrow_mut().pointer_leave();
            }) as Box<dyn FnMut(MouseEvent)>)
        };

        for (name, listener) in [
            ("mousedown", down),
            ("mousemove", moved),
            ("mouseup", up),
            ("mouseleave", leave),
        ] {
            self.canvas
                .add_event_listener_with_callback(name, listener.as_ref().unchecked_ref())?;
            self.listeners.push((name, listener));
        }
        Ok(())
    }
}

impl Drop for SignatureCanvas {
    fn drop(&mut self) {
        for (name, listener) in &self.listeners {
            let _ = self
                .canvas
                .remove_event_listener_with_callback(name, listener.as_ref().unchecked_ref());
        }
        if let Some(listener) = &self.on_resize {
            let _ = self
                .window
                .remove_event_listener_with_callback("resize", listener.as_ref().unchecked_ref());
        }
    }
}

fn resize_surface(
    canvas: &HtmlCanvasElement,
    context: &CanvasRenderingContext2d,
    pad: &RefCell<SignaturePad>,
    width: u32,
    height: u32,
) {
    canvas.set_width(width);
    canvas.set_height(height);
    pad.borrow_mut().resize(width, height);
    // Resizing a canvas resets its context state
    let style = *pad.borrow().style();
    apply_stroke_style(context, &style);
}

/// Match the backing store to the element's laid-out size. A hidden element
/// measures 0x0 and keeps its current size.
fn fit_to_display(
    canvas: &HtmlCanvasElement,
    context: &CanvasRenderingContext2d,
    pad: &RefCell<SignaturePad>,
) {
    let rect = canvas.get_bounding_client_rect();
    let (width, height) = (rect.width().round() as u32, rect.height().round() as u32);
    if width == 0 || height == 0 {
        return;
    }
    if (width, height) != (canvas.width(), canvas.height()) {
        resize_surface(canvas, context, pad, width, height);
    }
}

fn offset(event: &MouseEvent) -> (f64, f64) {
    (f64::from(event.offset_x()), f64::from(event.offset_y()))
}

/// CSS colour string for an RGB triple
pub fn css_color(rgb: [u8; 3]) -> String {
    format!("#{:02x}{:02x}{:02x}", rgb[0], rgb[1], rgb[2])
}

fn apply_stroke_style(context: &CanvasRenderingContext2d, style: &StrokeStyle) {
    context.set_line_width(style.line_width);
    context.set_line_cap("round");
    context.set_line_join("round");
    context.set_stroke_style_str(&css_color(style.rgb));
}

fn stroke_segment(context: &CanvasRenderingContext2d, x0: f64, y0: f64, x1: f64, y1: f64) {
    context.begin_path();
    context.move_to(x0, y0);
    context.line_to(x1, y1);
    context.stroke();
}


#[cfg(test)]
#[cfg(target_arch = "wasm32")]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn mount(id: &str) -> HtmlCanvasElement {
        let document = web_sys::window().unwrap().document().unwrap();
        let canvas = document
            .create_element("canvas")
            .unwrap()
            .dyn_into::<HtmlCanvasElement>()
            .unwrap();
        canvas.set_id(id);
        canvas.set_width(200);
        canvas.set_height(80);
        document.body().unwrap().append_child(&canvas).unwrap();
        canvas
    }

    #[wasm_bindgen_test]
    fn test_binds_canvas_size() {
        mount("sig-size");
        let app = SignDeskApp::default();
        let surface = SignatureCanvas::new("sig-size", &app).unwrap();
        assert!(surface.is_empty());
        assert_eq!(surface.pad.borrow().width(), 200);
        assert_eq!(surface.pad.borrow().height(), 80);
    }

    #[wasm_bindgen_test]
    fn test_mouse_events_draw() {
        let canvas = mount("sig-draw");
        let app = SignDeskApp::default();
        let surface = SignatureCanvas::new("sig-draw", &app).unwrap();

        for kind in ["mousedown", "mousemove", "mouseup"] {
            let event = MouseEvent::new(kind).unwrap();
            canvas.dispatch_event(&event).unwrap();
        }
        assert!(!surface.is_empty());

        surface.set_name("Jane Doe");
        assert!(surface.can_save());
        assert_eq!(surface.capture().unwrap().name, "Jane Doe");

        surface.clear();
        assert!(surface.is_empty());
    }

    #[wasm_bindgen_test]
    fn test_backing_store_follows_displayed_size() {
        let canvas = mount("sig-fit");
        canvas.style().set_property("width", "320px").unwrap();
        canvas.style().set_property("height", "120px").unwrap();

        let app = SignDeskApp::default();
        let surface = SignatureCanvas::new("sig-fit", &app).unwrap();
        assert_eq!((canvas.width(), canvas.height()), (320, 120));
        assert_eq!(surface.pad.borrow().width(), 320);

        canvas.style().set_property("width", "400px").unwrap();
        let resize = web_sys::Event::new("resize").unwrap();
        web_sys::window().unwrap().dispatch_event(&resize).unwrap();
        assert_eq!(canvas.width(), 400);
        assert_eq!(surface.pad.borrow().width(), 400);
    }

    #[wasm_bindgen_test]
    fn test_capture_exports_canvas_pixels() {
        let canvas = mount("sig-export");
        let app = SignDeskApp::default();
        let surface = SignatureCanvas::new("sig-export", &app).unwrap();

        for kind in ["mousedown", "mousemove", "mouseup"] {
            canvas.dispatch_event(&MouseEvent::new(kind).unwrap()).unwrap();
        }
        surface.set_name("Jane Doe");

        let capture = surface.capture().unwrap();
        assert_eq!(
            capture.image_data_url,
            canvas.to_data_url_with_type("image/png").unwrap()
        );
        assert!(capture.png.starts_with(&[0x89, b'P', b'N', b'G']));
    }

    #[wasm_bindgen_test]
    fn test_missing_canvas() {
        let app = SignDeskApp::default();
        assert!(SignatureCanvas::new("no-such-canvas", &app).is_err());
    }
}
