//! Mock data every session starts from

use signdesk_types::{Document, DocumentStatus, SignaturePosition, Template};

const ROLE: &str = "Software Engineer";

pub fn employee_documents() -> Vec<Document> {
    vec![
        Document::new("doc1", "Employment Agreement", Some(ROLE), "Added on Jun 12, 2023"),
        signed(
            Document::new("doc2", "Health Insurance Form", Some(ROLE), "Signed on Jun 14, 2023"),
            "John Doe",
            "Jun 14, 2023",
        ),
        Document::new("doc3", "Tax Declaration Form W-4", Some(ROLE), "Added on Jun 12, 2023"),
        signed(
            Document::new(
                "doc4",
                "Company Policy Acknowledgment",
                Some(ROLE),
                "Signed on Jun 13, 2023",
            ),
            "John Doe",
            "Jun 13, 2023",
        ),
        Document::new("doc5", "Direct Deposit Authorization", Some(ROLE), "Added on Jun 12, 2023"),
    ]
}

pub fn templates() -> Vec<Template> {
    vec![
        template(
            "template1",
            "Employment Agreement Template",
            "Created on Jun 10, 2023",
            12,
            &[(0.2, 0.7, 1), (0.8, 0.9, 3)],
        ),
        template(
            "template2",
            "Health Insurance Form Template",
            "Created on Jun 5, 2023",
            8,
            &[(0.5, 0.8, 2)],
        ),
        template(
            "template3",
            "Tax Declaration Form W-4 Template",
            "Created on May 28, 2023",
            15,
            &[(0.3, 0.6, 1), (0.7, 0.3, 2)],
        ),
    ]
}

fn signed(mut doc: Document, by: &str, on: &str) -> Document {
    doc.status = DocumentStatus::Signed;
    doc.signed_by = Some(by.to_string());
    doc.signed_date = Some(on.to_string());
    doc
}

fn template(
    id: &str,
    title: &str,
    date: &str,
    assigned_count: u32,
    positions: &[(f64, f64, u32)],
) -> Template {
    let mut t = Template::new(id, title, date);
    t.assigned_count = assigned_count;
    t.signature_positions = positions
        .iter()
        .map(|&(x, y, page)| SignaturePosition::new(x, y, page))
        .collect();
    t
}
