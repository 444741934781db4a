//! Template upload form state

use crate::error::{Result, SignDeskError};
use serde::{Deserialize, Serialize};
use tracing::warn;

pub const PDF_MIME: &str = "application/pdf";

/// A picked file. Only its metadata is ever looked at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileRef {
    pub name: String,
    pub size: u64,
    pub mime_type: String,
}

impl FileRef {
    pub fn new(name: &str, size: u64, mime_type: &str) -> Self {
        Self {
            name: name.to_string(),
            size,
            mime_type: mime_type.to_string(),
        }
    }

    pub fn is_pdf(&self) -> bool {
        self.mime_type == PDF_MIME
    }

    /// Size in megabytes with two decimals, e.g. "1.50 MB"
    pub fn size_label(&self) -> String {
        format!("{:.2} MB", self.size as f64 / 1024.0 / 1024.0)
    }
}

#[derive(Debug, Clone, Default)]
pub struct UploadForm {
    title: String,
    file: Option<FileRef>,
    dragging: bool,
}

impl UploadForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }

    pub fn file(&self) -> Option<&FileRef> {
        self.file.as_ref()
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn drag_over(&mut self) {
        self.dragging = true;
    }

    pub fn drag_leave(&mut self) {
        self.dragging = false;
    }

    /// A file dropped on the drop zone must be a PDF
    pub fn drop_file(&mut self, file: FileRef) -> Result<()> {
        self.dragging = false;
        if !file.is_pdf() {
            warn!(name = %file.name, mime = %file.mime_type, "rejected non-PDF drop");
            return Err(SignDeskError::NotPdf);
        }
        self.file = Some(file);
        Ok(())
    }

    /// A file chosen through the browse dialog, which already filters on `.pdf`
    pub fn select_file(&mut self, file: FileRef) {
        self.file = Some(file);
    }

    pub fn remove_file(&mut self) {
        self.file = None;
    }

    pub fn can_submit(&self) -> bool {
        self.file.is_some() && !self.title.trim().is_empty()
    }

    /// The chosen file and trimmed title
    pub fn submit(&self) -> Result<(FileRef, String)> {
        let file = self.file.clone().ok_or(SignDeskError::MissingFile)?;
        let title = self.title.trim();
        if title.is_empty() {
            return Err(SignDeskError::MissingTitle);
        }
        Ok((file, title.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pdf() -> FileRef {
        FileRef::new("agreement.pdf", 1_572_864, PDF_MIME)
    }

    #[test]
    fn test_size_label() {
        assert_eq!(pdf().size_label(), "1.50 MB");
        assert_eq!(FileRef::new("tiny.pdf", 0, PDF_MIME).size_label(), "0.00 MB");
    }

    #[test]
    fn test_drop_rejects_non_pdf() {
        let mut form = UploadForm::new();
        form.drag_over();
        let err = form
            .drop_file(FileRef::new("photo.png", 10, "image/png"))
            .unwrap_err();
        assert_eq!(err, SignDeskError::NotPdf);
        assert!(form.file().is_none());
        assert!(!form.is_dragging());
    }

    #[test]
    fn test_submit_requires_file_before_title() {
        let mut form = UploadForm::new();
        assert_eq!(form.submit().unwrap_err(), SignDeskError::MissingFile);

        form.select_file(pdf());
        assert_eq!(form.submit().unwrap_err(), SignDeskError::MissingTitle);

        form.set_title("   ");
        assert!(!form.can_submit());
        assert_eq!(form.submit().unwrap_err(), SignDeskError::MissingTitle);
    }

    #[test]
    fn test_submit_trims_title() {
        let mut form = UploadForm::new();
        form.drop_file(pdf()).unwrap();
        form.set_title("  Offer Letter ");
        assert!(form.can_submit());
        let (file, title) = form.submit().unwrap();
        assert_eq!(file.name, "agreement.pdf");
        assert_eq!(title, "Offer Letter");
    }

    #[test]
    fn test_remove_file() {
        let mut form = UploadForm::new();
        form.select_file(pdf());
        form.remove_file();
        assert!(form.file().is_none());
    }
}
