use serde::{Deserialize, Serialize};

/// Signing state of an employee document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DocumentStatus {
    #[default]
    Pending,
    Signed,
    Expired,
}

impl DocumentStatus {
    /// Label shown on the status badge
    pub fn label(&self) -> &'static str {
        match self {
            DocumentStatus::Pending => "Pending",
            DocumentStatus::Signed => "Signed",
            DocumentStatus::Expired => "Expired",
        }
    }
}

impl std::fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentStatus::Pending => write!(f, "pending"),
            DocumentStatus::Signed => write!(f, "signed"),
            DocumentStatus::Expired => write!(f, "expired"),
        }
    }
}

/// A document assigned to an employee
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub title: String,
    /// Role the document was issued for, e.g. "Software Engineer"
    pub job_title: Option<String>,
    pub status: DocumentStatus,
    /// Display string, e.g. "Added on Jun 12, 2023"
    pub date: String,
    pub signed_by: Option<String>,
    pub signed_date: Option<String>,
}

impl Document {
    pub fn new(id: &str, title: &str, job_title: Option<&str>, date: &str) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            job_title: job_title.map(str::to_string),
            status: DocumentStatus::Pending,
            date: date.to_string(),
            signed_by: None,
            signed_date: None,
        }
    }

    pub fn is_signed(&self) -> bool {
        self.status == DocumentStatus::Signed
    }

    /// Label for the card's primary action
    pub fn action_label(&self) -> &'static str {
        if self.is_signed() {
            "View Signed Document"
        } else {
            "View & Sign"
        }
    }
}

/// A normalized signature location on one page of a template.
///
/// `x` and `y` are fractions of the rendered page surface (0.0 = left/top,
/// 1.0 = right/bottom). `page` is 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignaturePosition {
    pub x: f64,
    pub y: f64,
    pub page: u32,
}

impl SignaturePosition {
    /// Create a position, clamping coordinates into [0, 1] and the page to >= 1
    pub fn new(x: f64, y: f64, page: u32) -> Self {
        Self {
            x: clamp_unit(x),
            y: clamp_unit(y),
            page: page.max(1),
        }
    }

    /// Coordinates as whole percentages, as shown in the template details
    pub fn percent(&self) -> (u32, u32) {
        (
            (self.x * 100.0).round() as u32,
            (self.y * 100.0).round() as u32,
        )
    }
}

fn clamp_unit(v: f64) -> f64 {
    if v.is_nan() {
        0.0
    } else {
        v.clamp(0.0, 1.0)
    }
}

/// An admin-side document awaiting signature-position configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    pub id: String,
    pub title: String,
    /// Display string, e.g. "Created on Jun 10, 2023"
    pub date: String,
    pub assigned_count: u32,
    pub signature_positions: Vec<SignaturePosition>,
}

impl Template {
    pub fn new(id: &str, title: &str, date: &str) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            date: date.to_string(),
            assigned_count: 0,
            signature_positions: Vec::new(),
        }
    }

    /// One summary line per configured position
    pub fn position_summaries(&self) -> Vec<String> {
        self.signature_positions
            .iter()
            .enumerate()
            .map(|(i, pos)| {
                let (x, y) = pos.percent();
                format!(
                    "Position {}: Page {}, coordinates ({}%, {}%)",
                    i + 1,
                    pos.page,
                    x,
                    y
                )
            })
            .collect()
    }
}

/// Result of a freehand signing action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignatureCapture {
    /// Trimmed full name typed by the signer
    pub name: String,
    /// `data:image/png;base64,...` URL of the drawn strokes
    pub image_data_url: String,
    /// Raw PNG bytes of the same image
    #[serde(skip)]
    pub png: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_is_clamped() {
        let pos = SignaturePosition::new(1.4, -0.2, 0);
        assert_eq!(pos.x, 1.0);
        assert_eq!(pos.y, 0.0);
        assert_eq!(pos.page, 1);

        let pos = SignaturePosition::new(f64::NAN, 0.5, 3);
        assert_eq!(pos.x, 0.0);
        assert_eq!(pos.page, 3);
    }

    #[test]
    fn test_position_summaries() {
        let mut template = Template::new("template1", "Employment Agreement Template", "");
        template.signature_positions = vec![
            SignaturePosition::new(0.2, 0.7, 1),
            SignaturePosition::new(0.8, 0.9, 3),
        ];
        assert_eq!(
            template.position_summaries(),
            vec![
                "Position 1: Page 1, coordinates (20%, 70%)".to_string(),
                "Position 2: Page 3, coordinates (80%, 90%)".to_string(),
            ]
        );
    }

    #[test]
    fn test_status_serializes_snake_case() {
        let json = serde_json::to_string(&DocumentStatus::Signed).unwrap();
        assert_eq!(json, "\"signed\"");
        let status: DocumentStatus = serde_json::from_str("\"expired\"").unwrap();
        assert_eq!(status, DocumentStatus::Expired);
    }

    #[test]
    fn test_document_action_label() {
        let mut doc = Document::new("doc1", "Employment Agreement", None, "Added on Jun 12, 2023");
        assert_eq!(doc.action_label(), "View & Sign");
        doc.status = DocumentStatus::Signed;
        assert_eq!(doc.action_label(), "View Signed Document");
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn position_always_within_unit_square(
                x in proptest::num::f64::ANY,
                y in proptest::num::f64::ANY,
                page in any::<u32>(),
            ) {
                let pos = SignaturePosition::new(x, y, page);
                prop_assert!((0.0..=1.0).contains(&pos.x));
                prop_assert!((0.0..=1.0).contains(&pos.y));
                prop_assert!(pos.page >= 1);
            }
        }
    }
}
