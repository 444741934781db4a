//! Page controllers
//!
//! Each page owns only its presentation state and borrows the collection it
//! works on for the duration of an action. Actions return an [`Outcome`]
//! describing the toast to show and where to navigate next; the host applies
//! both.

use crate::config::Config;
use crate::error::SignDeskError;
use crate::library::{EmployeeDocuments, TemplateLibrary};
use crate::notify::Toast;
use crate::placement::PlacementOverlay;
use crate::route::Route;
use crate::upload::UploadForm;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use signdesk_types::{Document, SignatureCapture, SignaturePosition, Template};
use tracing::debug;

/// Detail pages show a spinner until the simulated fetch completes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadState {
    Loading,
    Ready,
    /// The id did not match anything; the page redirects away
    Missing,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Outcome {
    pub toast: Option<Toast>,
    pub navigate: Option<Route>,
}

impl Outcome {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn toast(toast: Toast) -> Self {
        Self {
            toast: Some(toast),
            navigate: None,
        }
    }

    pub fn navigate(route: Route) -> Self {
        Self {
            toast: None,
            navigate: Some(route),
        }
    }

    pub fn then(mut self, route: Route) -> Self {
        self.navigate = Some(route);
        self
    }

    pub fn error(err: &SignDeskError) -> Self {
        Self::toast(Toast::from(err))
    }
}

/// Employee document list
#[derive(Debug, Clone, Default)]
pub struct EmployeeListPage {
    pub query: String,
}

impl EmployeeListPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view<'a>(&self, docs: &'a EmployeeDocuments) -> Vec<&'a Document> {
        docs.filter(&self.query)
    }

    pub fn empty_message(&self) -> &'static str {
        if self.query.is_empty() {
            "You don't have any documents yet."
        } else {
            "No documents match your search criteria. Try a different search term."
        }
    }

    pub fn open(&self, id: &str) -> Outcome {
        Outcome::navigate(Route::EmployeeDocument(id.to_string()))
    }
}

/// One employee document, with the signing flow
#[derive(Debug, Clone)]
pub struct EmployeeDetailPage {
    id: String,
    state: LoadState,
    capturing: bool,
}

impl EmployeeDetailPage {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            state: LoadState::Loading,
            capturing: false,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn is_capturing(&self) -> bool {
        self.capturing
    }

    /// Called once the loading delay has elapsed
    pub fn finish_loading(&mut self, docs: &EmployeeDocuments) -> Outcome {
        match docs.get(&self.id) {
            Ok(_) => {
                self.state = LoadState::Ready;
                Outcome::none()
            }
            Err(err) => {
                self.state = LoadState::Missing;
                Outcome::error(&err).then(Route::EmployeeDocuments)
            }
        }
    }

    pub fn document<'a>(&self, docs: &'a EmployeeDocuments) -> Option<&'a Document> {
        docs.get(&self.id).ok()
    }

    /// Show the capture surface. Signed documents have nothing to sign.
    pub fn open_capture(&mut self, docs: &EmployeeDocuments) -> bool {
        self.capturing = self.state == LoadState::Ready
            && self.document(docs).is_some_and(|d| !d.is_signed());
        self.capturing
    }

    pub fn cancel_capture(&mut self) {
        self.capturing = false;
    }

    /// Sign with a saved capture. Has no effect unless the capture surface
    /// is open on a loaded document.
    pub fn apply_capture(
        &mut self,
        docs: &mut EmployeeDocuments,
        capture: &SignatureCapture,
        today: NaiveDate,
    ) -> Outcome {
        if self.state != LoadState::Ready || !self.capturing {
            return Outcome::none();
        }
        match docs.sign(&self.id, capture, today) {
            Ok(_) => {
                self.capturing = false;
                Outcome::toast(Toast::success("Document signed successfully"))
            }
            Err(err) => Outcome::error(&err),
        }
    }

    pub fn download(&self) -> Outcome {
        Outcome::toast(Toast::success("Document downloaded successfully"))
    }

    pub fn back(&self) -> Outcome {
        Outcome::navigate(Route::EmployeeDocuments)
    }
}

/// Admin template list with the upload form
#[derive(Debug, Clone, Default)]
pub struct AdminListPage {
    pub query: String,
    pub form: UploadForm,
    show_uploader: bool,
}

impl AdminListPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view<'a>(&self, templates: &'a TemplateLibrary) -> Vec<&'a Template> {
        templates.filter(&self.query)
    }

    pub fn empty_message(&self) -> &'static str {
        if self.query.is_empty() {
            "Start by uploading your first document template."
        } else {
            "No templates match your search criteria. Try a different search term."
        }
    }

    pub fn is_uploader_shown(&self) -> bool {
        self.show_uploader
    }

    pub fn show_uploader(&mut self) {
        self.show_uploader = true;
    }

    /// Hide the form and forget anything entered into it
    pub fn cancel_upload(&mut self) {
        self.show_uploader = false;
        self.form = UploadForm::new();
    }

    /// Create the template and continue to signature setup
    pub fn submit_upload(&mut self, templates: &mut TemplateLibrary, today: NaiveDate) -> Outcome {
        let (file, title) = match self.form.submit() {
            Ok(submission) => submission,
            Err(err) => return Outcome::error(&err),
        };

        debug!(file = %file.name, size = file.size, "submitting upload");
        let id = templates.upload(&title, today).id.clone();
        self.cancel_upload();
        Outcome::navigate(Route::AdminDocumentSetup(id))
    }

    pub fn open(&self, id: &str) -> Outcome {
        Outcome::navigate(Route::AdminDocument(id.to_string()))
    }
}

/// One template, with delete confirmation
#[derive(Debug, Clone)]
pub struct AdminDetailPage {
    id: String,
    state: LoadState,
    confirming_delete: bool,
}

impl AdminDetailPage {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            state: LoadState::Loading,
            confirming_delete: false,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn is_confirming_delete(&self) -> bool {
        self.confirming_delete
    }

    pub fn finish_loading(&mut self, templates: &TemplateLibrary) -> Outcome {
        match templates.get(&self.id) {
            Ok(_) => {
                self.state = LoadState::Ready;
                Outcome::none()
            }
            Err(err) => {
                self.state = LoadState::Missing;
                Outcome::error(&err).then(Route::AdminDocuments)
            }
        }
    }

    pub fn template<'a>(&self, templates: &'a TemplateLibrary) -> Option<&'a Template> {
        templates.get(&self.id).ok()
    }

    pub fn request_delete(&mut self) {
        self.confirming_delete = true;
    }

    pub fn cancel_delete(&mut self) {
        self.confirming_delete = false;
    }

    pub fn confirm_delete(&mut self, templates: &mut TemplateLibrary) -> Outcome {
        self.confirming_delete = false;
        match templates.delete(&self.id) {
            Ok(_) => Outcome::toast(Toast::success("Template deleted successfully"))
                .then(Route::AdminDocuments),
            Err(err) => Outcome::error(&err).then(Route::AdminDocuments),
        }
    }

    pub fn edit(&self) -> Outcome {
        Outcome::navigate(Route::AdminDocumentSetup(self.id.clone()))
    }

    pub fn assign(&self) -> Outcome {
        Outcome::toast(Toast::info(
            "This feature would allow assigning the template to employees",
        ))
    }

    pub fn download(&self) -> Outcome {
        Outcome::toast(Toast::success("Template downloaded successfully"))
    }

    pub fn back(&self) -> Outcome {
        Outcome::navigate(Route::AdminDocuments)
    }
}

/// Signature placement for one template
#[derive(Debug, Clone)]
pub struct AdminSetupPage {
    id: String,
    state: LoadState,
    overlay: Option<PlacementOverlay>,
}

impl AdminSetupPage {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            state: LoadState::Loading,
            overlay: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    /// Build the overlay from the template's saved positions
    pub fn finish_loading(&mut self, templates: &TemplateLibrary, config: &Config) -> Outcome {
        match templates.get(&self.id) {
            Ok(template) => {
                let overlay =
                    PlacementOverlay::with_config(config.placement.preview_pages, &config.placement)
                        .with_markers(template.signature_positions.clone());
                self.overlay = Some(overlay);
                self.state = LoadState::Ready;
                Outcome::none()
            }
            Err(err) => {
                self.state = LoadState::Missing;
                Outcome::error(&err).then(Route::AdminDocuments)
            }
        }
    }

    pub fn overlay(&self) -> Option<&PlacementOverlay> {
        self.overlay.as_ref()
    }

    pub fn overlay_mut(&mut self) -> Option<&mut PlacementOverlay> {
        self.overlay.as_mut()
    }

    pub fn click_surface(
        &mut self,
        offset_x: f64,
        offset_y: f64,
        width: f64,
        height: f64,
    ) -> Outcome {
        let Some(overlay) = self.overlay.as_mut() else {
            return Outcome::none();
        };
        match overlay.click_surface(offset_x, offset_y, width, height) {
            Ok(Some(_)) => Outcome::toast(Toast::success("Signature marker added")),
            Ok(None) => Outcome::none(),
            Err(err) => Outcome::error(&err),
        }
    }

    pub fn remove_marker(&mut self, index: usize) -> Outcome {
        let Some(overlay) = self.overlay.as_mut() else {
            return Outcome::none();
        };
        match overlay.remove_marker(index) {
            Ok(_) => Outcome::toast(Toast::success("Signature marker removed")),
            Err(err) => Outcome::error(&err),
        }
    }

    /// Write the markers back to the template and return to the list
    pub fn save(&mut self, templates: &mut TemplateLibrary) -> Outcome {
        let positions: Vec<SignaturePosition> = match self.overlay.as_ref().map(|o| o.save()) {
            Some(Ok(positions)) => positions,
            Some(Err(err)) => return Outcome::error(&err),
            None => return Outcome::none(),
        };

        match templates.save_positions(&self.id, positions) {
            Ok(()) => Outcome::toast(Toast::success("Signature positions saved successfully"))
                .then(Route::AdminDocuments),
            Err(err) => Outcome::error(&err),
        }
    }

    pub fn cancel(&self) -> Outcome {
        Outcome::navigate(Route::AdminDocuments)
    }
}
