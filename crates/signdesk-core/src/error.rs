use thiserror::Error;

/// Errors raised by SignDesk operations.
///
/// The `Display` text is what the user sees in the error toast.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SignDeskError {
    #[error("Please draw your signature first")]
    EmptyDrawing,

    #[error("Please enter your full name")]
    BlankName,

    #[error("Please add at least one signature location")]
    NoMarkers,

    #[error("Please select a file to upload")]
    MissingFile,

    #[error("Please enter a document title")]
    MissingTitle,

    #[error("Only PDF files are accepted")]
    NotPdf,

    #[error("{kind} not found")]
    NotFound { kind: &'static str, id: String },

    #[error("Document has already been signed")]
    AlreadySigned,

    #[error("Signature marker {0} does not exist")]
    MarkerNotFound(usize),

    #[error("Surface has no area ({width}x{height})")]
    InvalidSurface { width: f64, height: f64 },

    #[error("Failed to encode signature image: {0}")]
    ImageEncoding(String),
}

impl SignDeskError {
    pub fn document_not_found(id: &str) -> Self {
        SignDeskError::NotFound {
            kind: "Document",
            id: id.to_string(),
        }
    }

    pub fn template_not_found(id: &str) -> Self {
        SignDeskError::NotFound {
            kind: "Template",
            id: id.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SignDeskError>;
