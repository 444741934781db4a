//! SignDesk core logic
//!
//! Platform-independent state for the SignDesk document signing front-end:
//! the freehand signature pad, the signature placement overlay, the in-memory
//! document collections and the page controllers that tie them together.
//! Everything here runs natively so it can be tested without a browser; the
//! `signdesk-wasm` crate binds it to the DOM.

pub mod capture;
pub mod config;
pub mod coords;
pub mod date;
pub mod error;
pub mod library;
pub mod notify;
pub mod pages;
pub mod placement;
pub mod raster;
pub mod route;
pub mod seed;
pub mod upload;

pub use capture::SignaturePad;
pub use config::Config;
pub use coords::{dom_to_pdf, normalize, pdf_to_dom, position_from_pdf, position_to_pdf};
pub use error::{Result, SignDeskError};
pub use library::{EmployeeDocuments, TemplateLibrary};
pub use notify::{Notifier, Toast, ToastLevel};
pub use pages::{
    AdminDetailPage, AdminListPage, AdminSetupPage, EmployeeDetailPage, EmployeeListPage,
    LoadState, Outcome,
};
pub use placement::PlacementOverlay;
pub use route::Route;
pub use upload::{FileRef, UploadForm};

// Re-export the data model
pub use signdesk_types::{Document, DocumentStatus, SignatureCapture, SignaturePosition, Template};
