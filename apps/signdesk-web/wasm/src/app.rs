//! Application state exposed to JavaScript
//!
//! `SignDeskApp` owns the mock collections, the current route and the page
//! controller for it. The host calls an action, then re-renders from the
//! view getters and shows whatever `drainToasts` returns. Every action's
//! logic lives in an internal method that returns plain Rust values so it
//! can be tested without a browser.

use crate::canvas::SignatureCanvas;
use serde::Serialize;
use signdesk_core::date::today;
use signdesk_core::{
    AdminDetailPage, AdminListPage, AdminSetupPage, Config, Document, EmployeeDetailPage,
    EmployeeDocuments, EmployeeListPage, FileRef, LoadState, Notifier, Outcome, PlacementOverlay,
    Route, SignatureCapture, Template, TemplateLibrary, Toast,
};
use tracing::{debug, info};
use wasm_bindgen::prelude::*;

/// Controller for the page the current route points at
#[derive(Debug)]
enum Page {
    Home,
    EmployeeList(EmployeeListPage),
    EmployeeDetail(EmployeeDetailPage),
    AdminList(AdminListPage),
    AdminDetail(AdminDetailPage),
    AdminSetup(AdminSetupPage),
    NotFound,
}

impl Page {
    fn for_route(route: &Route) -> Self {
        match route {
            Route::Home => Page::Home,
            Route::EmployeeDocuments => Page::EmployeeList(EmployeeListPage::new()),
            Route::EmployeeDocument(id) => Page::EmployeeDetail(EmployeeDetailPage::new(id)),
            Route::AdminDocuments => Page::AdminList(AdminListPage::new()),
            Route::AdminDocument(id) => Page::AdminDetail(AdminDetailPage::new(id)),
            Route::AdminDocumentSetup(id) => Page::AdminSetup(AdminSetupPage::new(id)),
            Route::NotFound(_) => Page::NotFound,
        }
    }

    fn load_state(&self) -> LoadState {
        match self {
            Page::EmployeeDetail(p) => p.state(),
            Page::AdminDetail(p) => p.state(),
            Page::AdminSetup(p) => p.state(),
            _ => LoadState::Ready,
        }
    }
}

/// One marker as the overlay renders it
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerView {
    /// Index into the full marker list, used for removal
    pub index: usize,
    pub x: f64,
    pub y: f64,
    pub page: u32,
    pub left: String,
    pub top: String,
}

impl MarkerView {
    pub fn new(index: usize, x: f64, y: f64, page: u32) -> Self {
        Self {
            index,
            x,
            y,
            page,
            left: format!("{}%", x * 100.0),
            top: format!("{}%", y * 100.0),
        }
    }
}

/// Presentation state of the placement overlay
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlayView {
    pub placing: bool,
    pub current_page: u32,
    pub total_pages: u32,
    pub page_label: String,
    pub zoom: f64,
    pub zoom_label: String,
    pub can_go_prev: bool,
    pub can_go_next: bool,
    pub can_zoom_in: bool,
    pub can_zoom_out: bool,
    pub marker_count: usize,
    pub markers: Vec<MarkerView>,
}

impl From<&PlacementOverlay> for OverlayView {
    fn from(overlay: &PlacementOverlay) -> Self {
        Self {
            placing: overlay.is_placing(),
            current_page: overlay.current_page(),
            total_pages: overlay.total_pages(),
            page_label: overlay.page_label(),
            zoom: overlay.zoom(),
            zoom_label: overlay.zoom_label(),
            can_go_prev: overlay.can_go_prev(),
            can_go_next: overlay.can_go_next(),
            can_zoom_in: overlay.can_zoom_in(),
            can_zoom_out: overlay.can_zoom_out(),
            marker_count: overlay.markers().len(),
            markers: overlay
                .markers_on_current_page()
                .into_iter()
                .map(|(i, m)| MarkerView::new(i, m.x, m.y, m.page))
                .collect(),
        }
    }
}

/// Serialize into plain JS objects rather than `Map`s
pub(crate) fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// SignDesk front-end state
#[wasm_bindgen]
#[derive(Debug)]
pub struct SignDeskApp {
    config: Config,
    documents: EmployeeDocuments,
    templates: TemplateLibrary,
    notifier: Notifier,
    route: Route,
    page: Page,
}

impl Default for SignDeskApp {
    fn default() -> Self {
        Self::with_config(Config::default())
    }
}

#[wasm_bindgen]
impl SignDeskApp {
    /// Create the app, optionally overriding settings with a TOML document
    #[wasm_bindgen(constructor)]
    pub fn new(config_toml: Option<String>) -> Result<SignDeskApp, JsValue> {
        let config = match config_toml {
            Some(toml) => Config::from_str(&toml)
                .map_err(|e| JsValue::from_str(&format!("{:#}", e)))?,
            None => Config::default(),
        };
        crate::logging::init(&config.app.log_level);
        Ok(Self::with_config(config))
    }

    // ------------------------------------------------------------------
    // Routing and loading
    // ------------------------------------------------------------------

    /// Switch to the page for `path`; returns the matched route
    pub fn navigate(&mut self, path: &str) -> Result<JsValue, JsValue> {
        self.navigate_internal(path);
        to_js(&self.route)
    }

    #[wasm_bindgen(getter)]
    pub fn path(&self) -> String {
        self.route.path()
    }

    #[wasm_bindgen(js_name = currentRoute)]
    pub fn route(&self) -> Result<JsValue, JsValue> {
        to_js(&self.route)
    }

    #[wasm_bindgen(getter, js_name = isLoading)]
    pub fn is_loading(&self) -> bool {
        self.page.load_state() == LoadState::Loading
    }

    /// Resolves once the simulated fetch delay has passed
    #[wasm_bindgen(js_name = loadingDelay)]
    pub fn loading_delay(&self) -> js_sys::Promise {
        crate::timer::delay(self.config.app.loading_delay_ms)
    }

    #[wasm_bindgen(js_name = finishLoading)]
    pub fn finish_loading(&mut self) -> Result<JsValue, JsValue> {
        let outcome = self.finish_loading_internal();
        to_js(&outcome)
    }

    #[wasm_bindgen(js_name = drainToasts)]
    pub fn drain_toasts(&mut self) -> Result<JsValue, JsValue> {
        to_js(&self.notifier.drain())
    }

    // ------------------------------------------------------------------
    // Lists
    // ------------------------------------------------------------------

    #[wasm_bindgen(js_name = setQuery)]
    pub fn set_query(&mut self, query: &str) {
        self.set_query_internal(query);
    }

    /// Filtered documents or templates for the current list page
    #[wasm_bindgen(js_name = listItems)]
    pub fn list_items(&self) -> Result<JsValue, JsValue> {
        match &self.page {
            Page::EmployeeList(_) => to_js(&self.visible_documents()),
            Page::AdminList(_) => to_js(&self.visible_templates()),
            _ => Ok(JsValue::NULL),
        }
    }

    #[wasm_bindgen(js_name = emptyMessage)]
    pub fn empty_message(&self) -> Option<String> {
        self.empty_message_internal().map(str::to_string)
    }

    /// Open a list item's detail page
    pub fn open(&mut self, id: &str) -> Result<JsValue, JsValue> {
        let outcome = self.open_internal(id);
        to_js(&outcome)
    }

    pub fn back(&mut self) -> Result<JsValue, JsValue> {
        let outcome = self.back_internal();
        to_js(&outcome)
    }

    pub fn download(&mut self) -> Result<JsValue, JsValue> {
        let outcome = self.download_internal();
        to_js(&outcome)
    }

    // ------------------------------------------------------------------
    // Employee detail
    // ------------------------------------------------------------------

    #[wasm_bindgen(js_name = currentDocument)]
    pub fn current_document(&self) -> Result<JsValue, JsValue> {
        match self.current_document_internal() {
            Some(doc) => to_js(doc),
            None => Ok(JsValue::NULL),
        }
    }

    #[wasm_bindgen(js_name = openCapture)]
    pub fn open_capture(&mut self) -> bool {
        self.open_capture_internal()
    }

    #[wasm_bindgen(js_name = cancelCapture)]
    pub fn cancel_capture(&mut self) {
        if let Page::EmployeeDetail(page) = &mut self.page {
            page.cancel_capture();
        }
    }

    #[wasm_bindgen(getter, js_name = isCapturing)]
    pub fn is_capturing(&self) -> bool {
        matches!(&self.page, Page::EmployeeDetail(p) if p.is_capturing())
    }

    /// Sign the current document with whatever is drawn on `canvas`
    #[wasm_bindgen(js_name = applySignature)]
    pub fn apply_signature(&mut self, canvas: &SignatureCanvas) -> Result<JsValue, JsValue> {
        let outcome = match canvas.capture() {
            Ok(capture) => self.apply_capture_internal(&capture),
            Err(err) => self.apply(Outcome::error(&err)),
        };
        to_js(&outcome)
    }

    // ------------------------------------------------------------------
    // Admin list and upload
    // ------------------------------------------------------------------

    #[wasm_bindgen(js_name = showUploader)]
    pub fn show_uploader(&mut self) {
        if let Page::AdminList(page) = &mut self.page {
            page.show_uploader();
        }
    }

    #[wasm_bindgen(getter, js_name = isUploaderShown)]
    pub fn is_uploader_shown(&self) -> bool {
        matches!(&self.page, Page::AdminList(p) if p.is_uploader_shown())
    }

    #[wasm_bindgen(js_name = cancelUpload)]
    pub fn cancel_upload(&mut self) {
        if let Page::AdminList(page) = &mut self.page {
            page.cancel_upload();
        }
    }

    #[wasm_bindgen(js_name = setUploadTitle)]
    pub fn set_upload_title(&mut self, title: &str) {
        if let Page::AdminList(page) = &mut self.page {
            page.form.set_title(title);
        }
    }

    #[wasm_bindgen(js_name = setDragging)]
    pub fn set_dragging(&mut self, dragging: bool) {
        if let Page::AdminList(page) = &mut self.page {
            if dragging {
                page.form.drag_over();
            } else {
                page.form.drag_leave();
            }
        }
    }

    /// A file dropped on the drop zone; only PDFs are kept
    #[wasm_bindgen(js_name = dropFile)]
    pub fn drop_file(
        &mut self,
        name: &str,
        size: f64,
        mime_type: &str,
    ) -> Result<JsValue, JsValue> {
        let outcome = self.drop_file_internal(FileRef::new(name, size as u64, mime_type));
        to_js(&outcome)
    }

    /// A file picked through the browse dialog
    #[wasm_bindgen(js_name = selectFile)]
    pub fn select_file(&mut self, name: &str, size: f64, mime_type: &str) {
        if let Page::AdminList(page) = &mut self.page {
            page.form.select_file(FileRef::new(name, size as u64, mime_type));
        }
    }

    #[wasm_bindgen(js_name = removeFile)]
    pub fn remove_file(&mut self) {
        if let Page::AdminList(page) = &mut self.page {
            page.form.remove_file();
        }
    }

    /// Title, file and drag state of the upload form
    #[wasm_bindgen(js_name = uploadForm)]
    pub fn upload_form(&self) -> Result<JsValue, JsValue> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct FormView<'a> {
            title: &'a str,
            file: Option<&'a FileRef>,
            size_label: Option<String>,
            dragging: bool,
            can_submit: bool,
        }

        match &self.page {
            Page::AdminList(page) => to_js(&FormView {
                title: page.form.title(),
                file: page.form.file(),
                size_label: page.form.file().map(FileRef::size_label),
                dragging: page.form.is_dragging(),
                can_submit: page.form.can_submit(),
            }),
            _ => Ok(JsValue::NULL),
        }
    }

    #[wasm_bindgen(js_name = submitUpload)]
    pub fn submit_upload(&mut self) -> Result<JsValue, JsValue> {
        let outcome = self.submit_upload_internal();
        to_js(&outcome)
    }

    // ------------------------------------------------------------------
    // Admin detail
    // ------------------------------------------------------------------

    #[wasm_bindgen(js_name = currentTemplate)]
    pub fn current_template(&self) -> Result<JsValue, JsValue> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct TemplateView<'a> {
            #[serde(flatten)]
            template: &'a Template,
            position_summaries: Vec<String>,
        }

        match self.current_template_internal() {
            Some(template) => to_js(&TemplateView {
                template,
                position_summaries: template.position_summaries(),
            }),
            None => Ok(JsValue::NULL),
        }
    }

    #[wasm_bindgen(js_name = requestDelete)]
    pub fn request_delete(&mut self) {
        if let Page::AdminDetail(page) = &mut self.page {
            page.request_delete();
        }
    }

    #[wasm_bindgen(js_name = cancelDelete)]
    pub fn cancel_delete(&mut self) {
        if let Page::AdminDetail(page) = &mut self.page {
            page.cancel_delete();
        }
    }

    #[wasm_bindgen(getter, js_name = isConfirmingDelete)]
    pub fn is_confirming_delete(&self) -> bool {
        matches!(&self.page, Page::AdminDetail(p) if p.is_confirming_delete())
    }

    #[wasm_bindgen(js_name = confirmDelete)]
    pub fn confirm_delete(&mut self) -> Result<JsValue, JsValue> {
        let outcome = self.confirm_delete_internal();
        to_js(&outcome)
    }

    /// Go to signature setup for the current template
    pub fn edit(&mut self) -> Result<JsValue, JsValue> {
        let outcome = match &self.page {
            Page::AdminDetail(page) => page.edit(),
            _ => Outcome::none(),
        };
        to_js(&self.apply(outcome))
    }

    pub fn assign(&mut self) -> Result<JsValue, JsValue> {
        let outcome = match &self.page {
            Page::AdminDetail(page) => page.assign(),
            _ => Outcome::none(),
        };
        to_js(&self.apply(outcome))
    }

    // ------------------------------------------------------------------
    // Signature setup
    // ------------------------------------------------------------------

    /// Overlay presentation state, or null outside a loaded setup page
    #[wasm_bindgen(js_name = overlayState)]
    pub fn overlay_state(&self) -> Result<JsValue, JsValue> {
        match self.overlay_view() {
            Some(view) => to_js(&view),
            None => Ok(JsValue::NULL),
        }
    }

    #[wasm_bindgen(js_name = togglePlacing)]
    pub fn toggle_placing(&mut self) -> bool {
        self.toggle_placing_internal()
    }

    #[wasm_bindgen(js_name = nextPage)]
    pub fn next_page(&mut self) -> u32 {
        self.overlay_mut().map(|o| o.next_page()).unwrap_or(1)
    }

    #[wasm_bindgen(js_name = prevPage)]
    pub fn prev_page(&mut self) -> u32 {
        self.overlay_mut().map(|o| o.prev_page()).unwrap_or(1)
    }

    #[wasm_bindgen(js_name = zoomIn)]
    pub fn zoom_in(&mut self) -> f64 {
        self.overlay_mut().map(|o| o.zoom_in()).unwrap_or(1.0)
    }

    #[wasm_bindgen(js_name = zoomOut)]
    pub fn zoom_out(&mut self) -> f64 {
        self.overlay_mut().map(|o| o.zoom_out()).unwrap_or(1.0)
    }

    #[wasm_bindgen(js_name = savePositions)]
    pub fn save_positions(&mut self) -> Result<JsValue, JsValue> {
        let outcome = self.save_positions_internal();
        to_js(&outcome)
    }

    #[wasm_bindgen(js_name = cancelSetup)]
    pub fn cancel_setup(&mut self) -> Result<JsValue, JsValue> {
        let outcome = match &self.page {
            Page::AdminSetup(page) => page.cancel(),
            _ => Outcome::none(),
        };
        to_js(&self.apply(outcome))
    }
}

// Internal methods (testable without JsValue)
impl SignDeskApp {
    pub fn with_config(config: Config) -> Self {
        Self {
            config,
            documents: EmployeeDocuments::new(),
            templates: TemplateLibrary::new(),
            notifier: Notifier::new(),
            route: Route::Home,
            page: Page::Home,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn current_route(&self) -> &Route {
        &self.route
    }

    pub fn documents(&self) -> &EmployeeDocuments {
        &self.documents
    }

    pub fn templates(&self) -> &TemplateLibrary {
        &self.templates
    }

    pub fn navigate_internal(&mut self, path: &str) -> &Route {
        let route = Route::parse(path);
        debug!(%route, "navigate");
        self.page = Page::for_route(&route);
        self.route = route;
        &self.route
    }

    /// Queue the toast and follow the navigation, if any
    fn apply(&mut self, outcome: Outcome) -> Outcome {
        if let Some(toast) = &outcome.toast {
            self.notifier.push(toast.clone());
        }
        if let Some(route) = &outcome.navigate {
            self.navigate_internal(&route.path());
        }
        outcome
    }

    pub fn take_toasts(&mut self) -> Vec<Toast> {
        self.notifier.drain()
    }

    pub fn load_state(&self) -> LoadState {
        self.page.load_state()
    }

    pub fn finish_loading_internal(&mut self) -> Outcome {
        let outcome = match &mut self.page {
            Page::EmployeeDetail(page) => page.finish_loading(&self.documents),
            Page::AdminDetail(page) => page.finish_loading(&self.templates),
            Page::AdminSetup(page) => page.finish_loading(&self.templates, &self.config),
            _ => Outcome::none(),
        };
        self.apply(outcome)
    }

    pub fn set_query_internal(&mut self, query: &str) {
        match &mut self.page {
            Page::EmployeeList(page) => page.query = query.to_string(),
            Page::AdminList(page) => page.query = query.to_string(),
            _ => {}
        }
    }

    pub fn visible_documents(&self) -> Vec<&Document> {
        match &self.page {
            Page::EmployeeList(page) => page.view(&self.documents),
            _ => Vec::new(),
        }
    }

    pub fn visible_templates(&self) -> Vec<&Template> {
        match &self.page {
            Page::AdminList(page) => page.view(&self.templates),
            _ => Vec::new(),
        }
    }

    pub fn empty_message_internal(&self) -> Option<&'static str> {
        match &self.page {
            Page::EmployeeList(page) => Some(page.empty_message()),
            Page::AdminList(page) => Some(page.empty_message()),
            _ => None,
        }
    }

    pub fn open_internal(&mut self, id: &str) -> Outcome {
        let outcome = match &self.page {
            Page::EmployeeList(page) => page.open(id),
            Page::AdminList(page) => page.open(id),
            _ => Outcome::none(),
        };
        self.apply(outcome)
    }

    pub fn back_internal(&mut self) -> Outcome {
        let outcome = match &self.page {
            Page::EmployeeDetail(page) => page.back(),
            Page::AdminDetail(page) => page.back(),
            Page::AdminSetup(page) => page.cancel(),
            Page::NotFound => Outcome::navigate(Route::Home),
            _ => Outcome::none(),
        };
        self.apply(outcome)
    }

    pub fn download_internal(&mut self) -> Outcome {
        let outcome = match &self.page {
            Page::EmployeeDetail(page) => page.download(),
            Page::AdminDetail(page) => page.download(),
            _ => Outcome::none(),
        };
        self.apply(outcome)
    }

    pub fn current_document_internal(&self) -> Option<&Document> {
        match &self.page {
            Page::EmployeeDetail(page) if page.state() == LoadState::Ready => {
                page.document(&self.documents)
            }
            _ => None,
        }
    }

    pub fn current_template_internal(&self) -> Option<&Template> {
        match &self.page {
            Page::AdminDetail(page) if page.state() == LoadState::Ready => {
                page.template(&self.templates)
            }
            _ => None,
        }
    }

    pub fn open_capture_internal(&mut self) -> bool {
        match &mut self.page {
            Page::EmployeeDetail(page) => page.open_capture(&self.documents),
            _ => false,
        }
    }

    pub fn apply_capture_internal(&mut self, capture: &SignatureCapture) -> Outcome {
        let outcome = match &mut self.page {
            Page::EmployeeDetail(page) => {
                page.apply_capture(&mut self.documents, capture, today())
            }
            _ => Outcome::none(),
        };
        self.apply(outcome)
    }

    pub fn drop_file_internal(&mut self, file: FileRef) -> Outcome {
        let outcome = match &mut self.page {
            Page::AdminList(page) => match page.form.drop_file(file) {
                Ok(()) => Outcome::none(),
                Err(err) => Outcome::error(&err),
            },
            _ => Outcome::none(),
        };
        self.apply(outcome)
    }

    pub fn submit_upload_internal(&mut self) -> Outcome {
        let outcome = match &mut self.page {
            Page::AdminList(page) => page.submit_upload(&mut self.templates, today()),
            _ => Outcome::none(),
        };
        if let Some(Route::AdminDocumentSetup(id)) = &outcome.navigate {
            info!(id = %id, "template created, continuing to setup");
        }
        self.apply(outcome)
    }

    pub fn confirm_delete_internal(&mut self) -> Outcome {
        let outcome = match &mut self.page {
            Page::AdminDetail(page) => page.confirm_delete(&mut self.templates),
            _ => Outcome::none(),
        };
        self.apply(outcome)
    }

    pub fn overlay(&self) -> Option<&PlacementOverlay> {
        match &self.page {
            Page::AdminSetup(page) => page.overlay(),
            _ => None,
        }
    }

    fn overlay_mut(&mut self) -> Option<&mut PlacementOverlay> {
        match &mut self.page {
            Page::AdminSetup(page) => page.overlay_mut(),
            _ => None,
        }
    }

    pub fn overlay_view(&self) -> Option<OverlayView> {
        self.overlay().map(OverlayView::from)
    }

    pub fn toggle_placing_internal(&mut self) -> bool {
        self.overlay_mut().map(|o| o.toggle_placing()).unwrap_or(false)
    }

    pub fn click_surface_internal(
        &mut self,
        offset_x: f64,
        offset_y: f64,
        width: f64,
        height: f64,
    ) -> Outcome {
        let outcome = match &mut self.page {
            Page::AdminSetup(page) => page.click_surface(offset_x, offset_y, width, height),
            _ => Outcome::none(),
        };
        self.apply(outcome)
    }

    pub fn remove_marker_internal(&mut self, index: usize) -> Outcome {
        let outcome = match &mut self.page {
            Page::AdminSetup(page) => page.remove_marker(index),
            _ => Outcome::none(),
        };
        self.apply(outcome)
    }

    pub fn save_positions_internal(&mut self) -> Outcome {
        let outcome = match &mut self.page {
            Page::AdminSetup(page) => page.save(&mut self.templates),
            _ => Outcome::none(),
        };
        self.apply(outcome)
    }
}
