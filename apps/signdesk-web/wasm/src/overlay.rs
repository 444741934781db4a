//! Marker overlay on the page preview
//!
//! `MarkerOverlay` draws the current page's signature markers as absolutely
//! positioned elements inside the preview surface and turns clicks on that
//! surface into placement or removal actions on the app.

use crate::app::{to_js, MarkerView, OverlayView, SignDeskApp};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, MouseEvent};

const MARKER_CLASS: &str = "signature-marker";
const MARKER_INDEX_ATTR: &str = "data-marker-index";

#[wasm_bindgen]
pub struct MarkerOverlay {
    document: Document,
    surface: HtmlElement,
}

#[wasm_bindgen]
impl MarkerOverlay {
    /// Bind the preview element with id `surface_id`
    #[wasm_bindgen(constructor)]
    pub fn new(surface_id: &str) -> Result<MarkerOverlay, JsValue> {
        let window =
            web_sys::window().ok_or_else(|| JsValue::from_str("No window object available"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("No document object available"))?;

        let surface = document
            .get_element_by_id(surface_id)
            .ok_or_else(|| JsValue::from_str(&format!("Element '{}' not found", surface_id)))?
            .dyn_into::<HtmlElement>()
            .map_err(|_| JsValue::from_str(&format!("'{}' is not an HTML element", surface_id)))?;

        let style = surface.style();
        style.set_property("position", "relative")?;
        style.set_property("transform-origin", "top center")?;

        Ok(Self { document, surface })
    }

    /// Redraw markers for the app's current setup page.
    ///
    /// Returns the number of markers drawn.
    pub fn render(&self, app: &SignDeskApp) -> Result<u32, JsValue> {
        self.clear_markers()?;

        let Some(view) = app.overlay_view() else {
            return Ok(0);
        };

        self.apply_surface_style(&view)?;
        for marker in &view.markers {
            let element = self.create_marker(marker)?;
            self.surface.append_child(&element)?;
        }
        Ok(view.markers.len() as u32)
    }

    /// Handle a click on the surface: a click on a marker removes it,
    /// anywhere else places one if placement is armed.
    ///
    /// Returns the action's outcome and redraws.
    #[wasm_bindgen(js_name = handleClick)]
    pub fn handle_click(
        &self,
        app: &mut SignDeskApp,
        event: &MouseEvent,
    ) -> Result<JsValue, JsValue> {
        let marker_index = event
            .target()
            .and_then(|t| t.dyn_into::<Element>().ok())
            .and_then(|el| el.closest(&format!("[{}]", MARKER_INDEX_ATTR)).ok().flatten())
            .and_then(|el| el.get_attribute(MARKER_INDEX_ATTR))
            .and_then(|index| index.parse::<usize>().ok());

        let outcome = match marker_index {
            Some(index) => {
                event.stop_propagation();
                app.remove_marker_internal(index)
            }
            None => {
                // The bounding rect already includes the zoom transform
                let rect = self.surface.get_bounding_client_rect();
                let offset_x = f64::from(event.client_x()) - rect.left();
                let offset_y = f64::from(event.client_y()) - rect.top();
                app.click_surface_internal(offset_x, offset_y, rect.width(), rect.height())
            }
        };

        self.render(app)?;
        to_js(&outcome)
    }
}

impl MarkerOverlay {
    fn clear_markers(&self) -> Result<(), JsValue> {
        while let Some(marker) = self.surface.query_selector(&format!(".{}", MARKER_CLASS))? {
            marker.remove();
        }
        Ok(())
    }

    fn apply_surface_style(&self, view: &OverlayView) -> Result<(), JsValue> {
        let style = self.surface.style();
        style.set_property("transform", &format!("scale({})", view.zoom))?;
        style.set_property("cursor", if view.placing { "crosshair" } else { "default" })?;
        Ok(())
    }

    fn create_marker(&self, marker: &MarkerView) -> Result<Element, JsValue> {
        let element = self.document.create_element("div")?;
        element.set_class_name(MARKER_CLASS);
        element.set_attribute(MARKER_INDEX_ATTR, &marker.index.to_string())?;
        element.set_attribute("title", "Click to remove")?;
        element.set_text_content(Some("Sign Here"));

        if let Some(html) = element.dyn_ref::<HtmlElement>() {
            let style = html.style();
            style.set_property("position", "absolute")?;
            style.set_property("left", &marker.left)?;
            style.set_property("top", &marker.top)?;
            style.set_property("transform", "translate(-50%, -50%)")?;
            style.set_property("cursor", "pointer")?;
        }

        Ok(element)
    }
}
