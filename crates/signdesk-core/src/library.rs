//! In-memory document collections
//!
//! Both collections start from the mock data in [`crate::seed`] and live only
//! as long as the page state that owns them.

use crate::date::display_date;
use crate::error::{Result, SignDeskError};
use chrono::NaiveDate;
use signdesk_types::{Document, DocumentStatus, SignatureCapture, SignaturePosition, Template};
use tracing::{info, warn};

const TEMPLATE_ID_PREFIX: &str = "template";

/// Case-insensitive substring match against any of the given fields.
/// An empty query matches everything.
pub fn matches_query(query: &str, fields: &[Option<&str>]) -> bool {
    if query.is_empty() {
        return true;
    }
    let needle = query.to_lowercase();
    fields
        .iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(&needle))
}

/// Documents assigned to the current employee
#[derive(Debug, Clone)]
pub struct EmployeeDocuments {
    documents: Vec<Document>,
}

impl Default for EmployeeDocuments {
    fn default() -> Self {
        Self::new()
    }
}

impl EmployeeDocuments {
    pub fn new() -> Self {
        Self::from_documents(crate::seed::employee_documents())
    }

    pub fn from_documents(documents: Vec<Document>) -> Self {
        Self { documents }
    }

    pub fn all(&self) -> &[Document] {
        &self.documents
    }

    /// Match on title or role label
    pub fn filter(&self, query: &str) -> Vec<&Document> {
        self.documents
            .iter()
            .filter(|d| matches_query(query, &[Some(d.title.as_str()), d.job_title.as_deref()]))
            .collect()
    }

    pub fn get(&self, id: &str) -> Result<&Document> {
        self.documents
            .iter()
            .find(|d| d.id == id)
            .ok_or_else(|| SignDeskError::document_not_found(id))
    }

    /// Apply a capture: pending becomes signed, with signer name and date
    pub fn sign(
        &mut self,
        id: &str,
        capture: &SignatureCapture,
        on: NaiveDate,
    ) -> Result<&Document> {
        let doc = self
            .documents
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or_else(|| SignDeskError::document_not_found(id))?;

        if doc.status == DocumentStatus::Signed {
            warn!(id, "document already signed");
            return Err(SignDeskError::AlreadySigned);
        }

        let date = display_date(on);
        doc.status = DocumentStatus::Signed;
        doc.signed_by = Some(capture.name.clone());
        doc.date = format!("Signed on {}", date);
        doc.signed_date = Some(date);

        info!(id, signer = %capture.name, "document signed");
        Ok(&*doc)
    }
}

/// Admin-side document templates
#[derive(Debug, Clone)]
pub struct TemplateLibrary {
    templates: Vec<Template>,
}

impl Default for TemplateLibrary {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateLibrary {
    pub fn new() -> Self {
        Self::from_templates(crate::seed::templates())
    }

    pub fn from_templates(templates: Vec<Template>) -> Self {
        Self { templates }
    }

    pub fn all(&self) -> &[Template] {
        &self.templates
    }

    pub fn filter(&self, query: &str) -> Vec<&Template> {
        self.templates
            .iter()
            .filter(|t| matches_query(query, &[Some(t.title.as_str())]))
            .collect()
    }

    pub fn get(&self, id: &str) -> Result<&Template> {
        self.templates
            .iter()
            .find(|t| t.id == id)
            .ok_or_else(|| SignDeskError::template_not_found(id))
    }

    /// Add a template for an uploaded file. Newest templates come first.
    ///
    /// The file itself is never read; only the title is kept.
    pub fn upload(&mut self, title: &str, on: NaiveDate) -> &Template {
        let id = self.next_id();
        let template = Template::new(&id, title, &format!("Created on {}", display_date(on)));
        self.templates.insert(0, template);
        info!(id = %id, title, "template uploaded");
        &self.templates[0]
    }

    pub fn save_positions(&mut self, id: &str, positions: Vec<SignaturePosition>) -> Result<()> {
        let template = self
            .templates
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| SignDeskError::template_not_found(id))?;
        info!(id, count = positions.len(), "signature positions saved");
        template.signature_positions = positions;
        Ok(())
    }

    pub fn delete(&mut self, id: &str) -> Result<Template> {
        let index = self
            .templates
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| SignDeskError::template_not_found(id))?;
        info!(id, "template deleted");
        Ok(self.templates.remove(index))
    }

    /// `template{n}` with n one past the highest number in use
    fn next_id(&self) -> String {
        let highest = self
            .templates
            .iter()
            .filter_map(|t| t.id.strip_prefix(TEMPLATE_ID_PREFIX))
            .filter_map(|n| n.parse::<u32>().ok())
            .max()
            .unwrap_or(0);
        format!("{}{}", TEMPLATE_ID_PREFIX, highest + 1)
    }
}
