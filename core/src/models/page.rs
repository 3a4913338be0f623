use serde::Serialize;
use serde_json::Value;

use super::FromRaw;
use crate::coerce;
use crate::error::MappingError;

/// Index-based paging block of a search result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Page {
    pub count: i64,
    /// Number of the following page; zero or less when this is the last one.
    pub next: i64,
}

impl Page {
    pub fn has_next(&self) -> bool {
        self.next > 0
    }
}

/// Cursor-based paging block of a discover result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiscoverPage {
    pub limit: i64,
    pub count: i64,
    pub has_next: bool,
    /// Opaque continuation cursor for the following page.
    pub after: String,
}

impl FromRaw for Page {
    fn from_raw(raw: &Value) -> Result<Self, MappingError> {
        let obj = coerce::as_object(raw)?;
        Ok(Self {
            count: coerce::int(obj, "count")?,
            next: coerce::int(obj, "next")?,
        })
    }
}

impl FromRaw for DiscoverPage {
    fn from_raw(raw: &Value) -> Result<Self, MappingError> {
        let obj = coerce::as_object(raw)?;
        Ok(Self {
            limit: coerce::int(obj, "limit")?,
            count: coerce::int(obj, "count")?,
            has_next: coerce::boolean(obj, "has_next")?,
            after: coerce::string(obj, "after")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn page_next_zero_means_last() {
        let page = Page::from_raw(&json!({"count": 30, "next": 0})).unwrap();
        assert!(!page.has_next());
        let page = Page::from_raw(&json!({"count": 30, "next": "3"})).unwrap();
        assert!(page.has_next());
        assert_eq!(page.next, 3);
    }

    #[test]
    fn negative_next_means_last() {
        let page = Page::from_raw(&json!({"count": 30, "next": -1})).unwrap();
        assert!(!page.has_next());
    }

    #[test]
    fn discover_page_maps_cursor() {
        let page = DiscoverPage::from_raw(&json!({
            "limit": 30, "count": 30, "has_next": 1, "after": "XYZ"
        }))
        .unwrap();
        assert!(page.has_next);
        assert_eq!(page.after, "XYZ");
    }

    #[test]
    fn discover_page_null_cursor_is_empty() {
        let page = DiscoverPage::from_raw(&json!({
            "limit": 30, "count": 2, "has_next": false, "after": null
        }))
        .unwrap();
        assert_eq!(page.after, "");
    }

    #[test]
    fn page_requires_next() {
        let err = Page::from_raw(&json!({"count": 1})).unwrap_err();
        assert_eq!(err.field(), "next");
    }
}
