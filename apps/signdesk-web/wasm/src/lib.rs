//! SignDesk - Document Signature Workflow
//!
//! Browser bindings for the SignDesk front-end: application state and
//! routing, the freehand signature canvas and the signature placement
//! overlay. All state lives in memory; nothing leaves the page.

use wasm_bindgen::prelude::*;

pub mod app;
pub mod canvas;
pub mod coords;
pub mod logging;
pub mod overlay;
pub mod timer;

pub use app::SignDeskApp;
pub use canvas::SignatureCanvas;
pub use overlay::MarkerOverlay;

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    web_sys::console::log_1(&"SignDesk WASM initialized".into());
}
