//! End-to-end workflows over the mock collections
//!
//! Each test drives the page controllers the way the browser host does:
//! finish loading, perform actions, follow the returned navigation.
//!
//! Run with: cargo test -p signdesk-core --test workflows

use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use signdesk_core::{
    AdminDetailPage, AdminListPage, AdminSetupPage, Config, DocumentStatus, EmployeeDetailPage,
    EmployeeDocuments, EmployeeListPage, FileRef, LoadState, Notifier, Outcome, Route,
    SignDeskError, SignaturePad, SignaturePosition, TemplateLibrary, ToastLevel,
};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 6, 20).unwrap()
}

/// Apply an outcome the way the host does, returning the new route if any
fn apply(notifier: &mut Notifier, outcome: Outcome) -> Option<Route> {
    if let Some(toast) = outcome.toast {
        notifier.push(toast);
    }
    outcome.navigate
}

// ============================================================================
// Employee signing
// ============================================================================

#[test]
fn test_employee_signs_pending_document() {
    let mut docs = EmployeeDocuments::new();
    let mut notifier = Notifier::new();

    let list = EmployeeListPage::new();
    let route = apply(&mut notifier, list.open("doc1")).unwrap();
    assert_eq!(route.path(), "/employee/documents/doc1");

    let Route::EmployeeDocument(id) = Route::parse(&route.path()) else {
        panic!("expected a document route, got {:?}", route);
    };
    let mut page = EmployeeDetailPage::new(&id);
    assert_eq!(apply(&mut notifier, page.finish_loading(&docs)), None);
    assert!(page.open_capture(&docs));

    let mut pad = SignaturePad::new(400, 150);
    pad.pointer_down(20.0, 100.0);
    pad.pointer_move(80.0, 40.0);
    pad.pointer_move(160.0, 110.0);
    pad.pointer_up();
    pad.set_name("Jane Doe");
    let capture = pad.save().unwrap();

    assert_eq!(
        apply(&mut notifier, page.apply_capture(&mut docs, &capture, today())),
        None
    );

    let doc = docs.get("doc1").unwrap();
    assert_eq!(doc.status, DocumentStatus::Signed);
    assert_eq!(doc.signed_by.as_deref(), Some("Jane Doe"));
    assert_eq!(doc.signed_date.as_deref(), Some("Jun 20, 2023"));

    let toasts = notifier.drain();
    assert_eq!(toasts.len(), 1);
    assert_eq!(toasts[0].level, ToastLevel::Success);
    assert_eq!(toasts[0].message, "Document signed successfully");
}

#[test]
fn test_capture_validation_messages() {
    let mut pad = SignaturePad::new(400, 150);
    pad.set_name("Jane Doe");
    assert_eq!(
        pad.save().unwrap_err().to_string(),
        "Please draw your signature first"
    );

    pad.pointer_down(5.0, 5.0);
    pad.pointer_up();
    pad.set_name("");
    assert_eq!(pad.save().unwrap_err().to_string(), "Please enter your full name");
}

#[test]
fn test_unknown_document_redirects_to_list() {
    let docs = EmployeeDocuments::new();
    let mut notifier = Notifier::new();
    let mut page = EmployeeDetailPage::new("doc404");

    let route = apply(&mut notifier, page.finish_loading(&docs));
    assert_eq!(route, Some(Route::EmployeeDocuments));
    assert_eq!(page.state(), LoadState::Missing);
    assert_eq!(notifier.drain()[0].message, "Document not found");
}

#[test]
fn test_signed_document_shows_in_filtered_list() {
    let mut docs = EmployeeDocuments::new();
    let mut pad = SignaturePad::new(100, 50);
    pad.pointer_down(10.0, 10.0);
    pad.set_name("Jane Doe");
    docs.sign("doc5", &pad.save().unwrap(), today()).unwrap();

    let mut list = EmployeeListPage::new();
    list.query = "DIRECT deposit".to_string();
    let view = list.view(&docs);
    assert_eq!(view.len(), 1);
    assert_eq!(view[0].date, "Signed on Jun 20, 2023");
}

// ============================================================================
// Admin templates
// ============================================================================

#[test]
fn test_upload_then_place_markers() {
    let mut templates = TemplateLibrary::new();
    let config = Config::default();
    let mut notifier = Notifier::new();

    let mut list = AdminListPage::new();
    list.show_uploader();
    let err = list
        .form
        .drop_file(FileRef::new("scan.jpg", 4096, "image/jpeg"))
        .unwrap_err();
    assert_eq!(err, SignDeskError::NotPdf);

    list.form
        .drop_file(FileRef::new("offer.pdf", 1_572_864, "application/pdf"))
        .unwrap();
    list.form.set_title("Offer Letter");
    let route = apply(&mut notifier, list.submit_upload(&mut templates, today())).unwrap();
    assert_eq!(route.path(), "/admin/documents/template4/setup");

    let mut setup = AdminSetupPage::new("template4");
    apply(&mut notifier, setup.finish_loading(&templates, &config));
    assert_eq!(setup.state(), LoadState::Ready);

    // Saving with no markers is rejected
    assert_eq!(apply(&mut notifier, setup.save(&mut templates)), None);
    assert_eq!(
        notifier.drain()[0].message,
        "Please add at least one signature location"
    );

    setup.overlay_mut().unwrap().toggle_placing();
    apply(&mut notifier, setup.click_surface(150.0, 300.0, 300.0, 600.0));
    setup.overlay_mut().unwrap().toggle_placing();
    apply(&mut notifier, setup.click_surface(30.0, 540.0, 300.0, 600.0));
    setup.overlay_mut().unwrap().toggle_placing();
    apply(&mut notifier, setup.click_surface(270.0, 60.0, 300.0, 600.0));

    // Remove the middle marker; the others keep their order
    apply(&mut notifier, setup.remove_marker(1));

    let route = apply(&mut notifier, setup.save(&mut templates));
    assert_eq!(route, Some(Route::AdminDocuments));

    let saved = &templates.get("template4").unwrap().signature_positions;
    assert_eq!(
        saved,
        &vec![
            SignaturePosition::new(0.5, 0.5, 1),
            SignaturePosition::new(0.9, 0.1, 1),
        ]
    );
    assert_eq!(
        templates.get("template4").unwrap().position_summaries()[0],
        "Position 1: Page 1, coordinates (50%, 50%)"
    );
}

#[test]
fn test_markers_on_other_pages_survive_removal() {
    let templates = TemplateLibrary::new();
    let mut setup = AdminSetupPage::new("template1");
    setup.finish_loading(&templates, &Config::default());

    let overlay = setup.overlay_mut().unwrap();
    assert_eq!(overlay.next_page(), 2);
    assert_eq!(overlay.next_page(), 3);
    let on_page = overlay.markers_on_current_page();
    assert_eq!(on_page.len(), 1);
    let (index, marker) = on_page[0];
    assert_eq!(marker.page, 3);

    overlay.remove_marker(index).unwrap();
    assert_eq!(overlay.markers(), &[SignaturePosition::new(0.2, 0.7, 1)]);
}

#[test]
fn test_delete_template_from_detail() {
    let mut templates = TemplateLibrary::new();
    let mut notifier = Notifier::new();
    let mut page = AdminDetailPage::new("template1");
    apply(&mut notifier, page.finish_loading(&templates));

    page.request_delete();
    let route = apply(&mut notifier, page.confirm_delete(&mut templates));
    assert_eq!(route, Some(Route::AdminDocuments));
    assert_eq!(templates.all().len(), 2);

    let mut list = AdminListPage::new();
    list.query = "employment".to_string();
    assert!(list.view(&templates).is_empty());
    assert!(list.empty_message().starts_with("No templates match"));
}

#[test]
fn test_config_drives_overlay_bounds() {
    let config = Config::from_str(
        r#"
        [placement]
        min_zoom_percent = 80
        max_zoom_percent = 120
        zoom_step_percent = 20
        preview_pages = 4
        "#,
    )
    .unwrap();

    let templates = TemplateLibrary::new();
    let mut setup = AdminSetupPage::new("template2");
    setup.finish_loading(&templates, &config);
    let overlay = setup.overlay_mut().unwrap();

    assert_eq!(overlay.total_pages(), 4);
    overlay.zoom_in();
    overlay.zoom_in();
    assert_eq!(overlay.zoom_label(), "120%");
    assert!(!overlay.can_zoom_in());
    overlay.zoom_out();
    overlay.zoom_out();
    overlay.zoom_out();
    assert_eq!(overlay.zoom_label(), "80%");
}
