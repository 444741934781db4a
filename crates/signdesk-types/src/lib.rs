pub mod types;

pub use types::{Document, DocumentStatus, SignatureCapture, SignaturePosition, Template};
