//! Client-side routes

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "page", content = "id", rename_all = "snake_case")]
pub enum Route {
    Home,
    EmployeeDocuments,
    EmployeeDocument(String),
    AdminDocuments,
    AdminDocument(String),
    AdminDocumentSetup(String),
    /// Unknown path, kept for the not-found page
    NotFound(String),
}

impl Route {
    /// Match a path against the route table. Trailing slashes are ignored.
    pub fn parse(path: &str) -> Self {
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            [] => Route::Home,
            ["employee", "documents"] => Route::EmployeeDocuments,
            ["employee", "documents", id] => Route::EmployeeDocument(id.to_string()),
            ["admin", "documents"] => Route::AdminDocuments,
            ["admin", "documents", id] => Route::AdminDocument(id.to_string()),
            ["admin", "documents", id, "setup"] => Route::AdminDocumentSetup(id.to_string()),
            _ => Route::NotFound(path.to_string()),
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::EmployeeDocuments => "/employee/documents".to_string(),
            Route::EmployeeDocument(id) => format!("/employee/documents/{}", id),
            Route::AdminDocuments => "/admin/documents".to_string(),
            Route::AdminDocument(id) => format!("/admin/documents/{}", id),
            Route::AdminDocumentSetup(id) => format!("/admin/documents/{}/setup", id),
            Route::NotFound(path) => path.clone(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Route::NotFound(_))
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_route_table() {
        assert_eq!(Route::parse("/"), Route::Home);
        assert_eq!(Route::parse(""), Route::Home);
        assert_eq!(Route::parse("/employee/documents"), Route::EmployeeDocuments);
        assert_eq!(
            Route::parse("/employee/documents/doc1"),
            Route::EmployeeDocument("doc1".into())
        );
        assert_eq!(Route::parse("/admin/documents/"), Route::AdminDocuments);
        assert_eq!(
            Route::parse("/admin/documents/template2"),
            Route::AdminDocument("template2".into())
        );
        assert_eq!(
            Route::parse("/admin/documents/template2/setup"),
            Route::AdminDocumentSetup("template2".into())
        );
    }

    #[test]
    fn test_unknown_paths_fall_through() {
        for path in ["/admin", "/employee/documents/doc1/setup", "/settings"] {
            let route = Route::parse(path);
            assert!(route.is_not_found(), "{} should not match", path);
            assert_eq!(route.path(), path);
        }
    }

    #[test]
    fn test_path_parses_back() {
        let routes = [
            Route::Home,
            Route::EmployeeDocuments,
            Route::EmployeeDocument("doc3".into()),
            Route::AdminDocuments,
            Route::AdminDocument("template1".into()),
            Route::AdminDocumentSetup("template9".into()),
        ];
        for route in routes {
            assert_eq!(Route::parse(&route.path()), route);
        }
    }

    #[test]
    fn test_serializes_with_page_tag() {
        let json = serde_json::to_string(&Route::AdminDocumentSetup("template1".into())).unwrap();
        assert_eq!(json, r#"{"page":"admin_document_setup","id":"template1"}"#);
    }
}
