//! Stateful walkers over paged actions.
//!
//! Search results page by number: the result's `page.next` names the
//! following page and is zero on the last one. The discover feed pages by
//! cursor: `page.has_next` says whether more exists and `page.after` is the
//! cursor to continue from.
//!
//! Both pagers share the same shape. `fetch` (re)loads the current page,
//! `advance` moves to the following one and returns `Ok(None)` without any
//! network call once the last page has been seen, and `reset` goes back to
//! the start: page 1, or the feed without a cursor.

use tracing::debug;

use crate::client::ActionResult;
use crate::error::AisearchError;
use crate::http::Transport;
use crate::models::{RecommendationDiscover, SearchQueryResult};
use crate::params::{DiscoverParams, SearchQuery};
use crate::sdk::Aisearch;

/// Walks search result pages by number.
pub struct SearchPager<'a, T> {
    sdk: &'a Aisearch<T>,
    params: SearchQuery,
    current: Option<ActionResult<SearchQueryResult>>,
}

impl<'a, T: Transport> SearchPager<'a, T> {
    pub fn new(sdk: &'a Aisearch<T>, params: SearchQuery) -> Self {
        Self {
            sdk,
            params,
            current: None,
        }
    }

    /// Page number the next `fetch` will request.
    pub fn page(&self) -> u64 {
        self.params.page()
    }

    /// The most recently fetched result, if any.
    pub fn current(&self) -> Option<&ActionResult<SearchQueryResult>> {
        self.current.as_ref()
    }

    pub fn fetch(&mut self) -> Result<&ActionResult<SearchQueryResult>, AisearchError> {
        let result = self.sdk.search_query(&self.params)?;
        Ok(&*self.current.insert(result))
    }

    /// Whether the last fetched result announced a following page.
    pub fn has_next(&self) -> bool {
        self.next_page().is_some()
    }

    pub fn advance(
        &mut self,
    ) -> Result<Option<&ActionResult<SearchQueryResult>>, AisearchError> {
        let Some(next) = self.next_page() else {
            debug!(page = self.params.page(), "search pages exhausted");
            return Ok(None);
        };
        self.params.set_page(next);
        self.fetch().map(Some)
    }

    pub fn reset(&mut self) -> Result<&ActionResult<SearchQueryResult>, AisearchError> {
        self.params.set_page(1);
        self.fetch()
    }

    fn next_page(&self) -> Option<u64> {
        let page = self.current.as_ref()?.model.as_ref()?.page?;
        u64::try_from(page.next).ok().filter(|next| *next > 0)
    }
}

/// Walks the discover feed by cursor.
pub struct DiscoverPager<'a, T> {
    sdk: &'a Aisearch<T>,
    params: DiscoverParams,
    current: Option<ActionResult<RecommendationDiscover>>,
}

impl<'a, T: Transport> DiscoverPager<'a, T> {
    pub fn new(sdk: &'a Aisearch<T>, params: DiscoverParams) -> Self {
        Self {
            sdk,
            params,
            current: None,
        }
    }

    /// Cursor the next `fetch` will send; `None` for the start of the feed.
    pub fn cursor(&self) -> Option<&str> {
        self.params.after()
    }

    pub fn current(&self) -> Option<&ActionResult<RecommendationDiscover>> {
        self.current.as_ref()
    }

    pub fn fetch(&mut self) -> Result<&ActionResult<RecommendationDiscover>, AisearchError> {
        let result = self.sdk.discover(&self.params)?;
        Ok(&*self.current.insert(result))
    }

    pub fn has_next(&self) -> bool {
        self.next_cursor().is_some()
    }

    pub fn advance(
        &mut self,
    ) -> Result<Option<&ActionResult<RecommendationDiscover>>, AisearchError> {
        let Some(after) = self.next_cursor() else {
            debug!("discover feed exhausted");
            return Ok(None);
        };
        self.params.set_after(&after);
        self.fetch().map(Some)
    }

    pub fn reset(&mut self) -> Result<&ActionResult<RecommendationDiscover>, AisearchError> {
        self.params.set_after("");
        self.fetch()
    }

    fn next_cursor(&self) -> Option<String> {
        let page = &self.current.as_ref()?.model.as_ref()?.page;
        page.has_next.then(|| page.after.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use crate::http::{HttpRequest, HttpResponse};
    use serde_json::{json, Value};
    use std::cell::RefCell;
    use std::collections::VecDeque;

    /// Replays canned responses and records every requested URL.
    struct Scripted {
        responses: RefCell<VecDeque<Result<HttpResponse, AisearchError>>>,
        urls: RefCell<Vec<String>>,
    }

    impl Scripted {
        fn new(responses: Vec<Result<HttpResponse, AisearchError>>) -> Self {
            Self {
                responses: RefCell::new(responses.into()),
                urls: RefCell::new(Vec::new()),
            }
        }

        fn calls(&self) -> usize {
            self.urls.borrow().len()
        }

        fn last_url(&self) -> String {
            self.urls.borrow().last().cloned().unwrap_or_default()
        }
    }

    impl Transport for Scripted {
        fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, AisearchError> {
            self.urls.borrow_mut().push(request.url.clone());
            self.responses
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| Err(AisearchError::Transport("script exhausted".into())))
        }
    }

    fn ok(body: Value) -> Result<HttpResponse, AisearchError> {
        Ok(HttpResponse {
            status: 200,
            headers: Vec::new(),
            body: body.to_string(),
        })
    }

    fn search_page(next: i64) -> Value {
        json!({
            "status": "success",
            "count": 90,
            "query": "shoes",
            "page": {"count": 30, "next": next}
        })
    }

    fn discover_page(has_next: bool, after: &str) -> Value {
        json!({
            "count": 60,
            "page": {"limit": 30, "count": 30, "has_next": has_next, "after": after}
        })
    }

    fn sdk(transport: Scripted) -> Aisearch<Scripted> {
        Aisearch::with_transport(ClientConfig::new(7, "tok"), transport)
    }

    #[test]
    fn search_pager_stops_when_next_is_zero() {
        let sdk = sdk(Scripted::new(vec![ok(search_page(0))]));
        let mut pager = sdk.search_pager(SearchQuery::new("u", "shoes"));
        pager.fetch().unwrap();
        assert!(!pager.has_next());
        assert!(pager.advance().unwrap().is_none());
        assert_eq!(sdk.transport().calls(), 1);
    }

    #[test]
    fn search_pager_requests_announced_page() {
        let sdk = sdk(Scripted::new(vec![ok(search_page(3)), ok(search_page(0))]));
        let mut pager = sdk.search_pager(SearchQuery::new("u", "shoes"));
        pager.fetch().unwrap();
        assert!(pager.has_next());
        let result = pager.advance().unwrap().unwrap();
        assert_eq!(result.status, 200);
        assert_eq!(pager.page(), 3);
        assert!(sdk.transport().last_url().contains("&page=3&"));
        assert!(pager.advance().unwrap().is_none());
        assert_eq!(sdk.transport().calls(), 2);
    }

    #[test]
    fn search_pager_without_fetch_has_no_next() {
        let sdk = sdk(Scripted::new(Vec::new()));
        let mut pager = sdk.search_pager(SearchQuery::new("u", "shoes"));
        assert!(!pager.has_next());
        assert!(pager.advance().unwrap().is_none());
        assert_eq!(sdk.transport().calls(), 0);
    }

    #[test]
    fn search_pager_reset_returns_to_first_page() {
        let sdk = sdk(Scripted::new(vec![
            ok(search_page(2)),
            ok(search_page(0)),
            ok(search_page(2)),
        ]));
        let mut pager = sdk.search_pager(SearchQuery::new("u", "shoes"));
        pager.fetch().unwrap();
        pager.advance().unwrap();
        assert_eq!(pager.page(), 2);
        pager.reset().unwrap();
        assert_eq!(pager.page(), 1);
        assert!(sdk.transport().last_url().contains("&page=1&"));
        assert!(pager.has_next());
    }

    #[test]
    fn search_pager_reset_ignores_starting_page() {
        let sdk = sdk(Scripted::new(vec![ok(search_page(6)), ok(search_page(2))]));
        let mut pager = sdk.search_pager(SearchQuery::new("u", "shoes").with_page(5));
        pager.fetch().unwrap();
        assert!(sdk.transport().last_url().contains("&page=5&"));
        pager.reset().unwrap();
        assert_eq!(pager.page(), 1);
        assert!(sdk.transport().last_url().contains("&page=1&"));
    }

    #[test]
    fn search_pager_propagates_errors() {
        let sdk = sdk(Scripted::new(vec![
            ok(search_page(2)),
            Err(AisearchError::Transport("connection reset".into())),
        ]));
        let mut pager = sdk.search_pager(SearchQuery::new("u", "shoes"));
        pager.fetch().unwrap();
        let err = pager.advance().unwrap_err();
        assert!(matches!(err, AisearchError::Transport(_)));
    }

    #[test]
    fn search_pager_not_found_has_no_next() {
        let sdk = sdk(Scripted::new(vec![Ok(HttpResponse {
            status: 404,
            headers: Vec::new(),
            body: String::new(),
        })]));
        let mut pager = sdk.search_pager(SearchQuery::new("u", "shoes"));
        assert!(pager.fetch().unwrap().model.is_none());
        assert!(!pager.has_next());
    }

    #[test]
    fn discover_pager_stops_when_has_next_is_false() {
        let sdk = sdk(Scripted::new(vec![ok(discover_page(false, ""))]));
        let mut pager = sdk.discover_pager(DiscoverParams::new("u"));
        pager.fetch().unwrap();
        assert!(!pager.has_next());
        assert!(pager.advance().unwrap().is_none());
        assert_eq!(sdk.transport().calls(), 1);
    }

    #[test]
    fn discover_pager_sends_cursor() {
        let sdk = sdk(Scripted::new(vec![
            ok(discover_page(true, "XYZ")),
            ok(discover_page(false, "")),
        ]));
        let mut pager = sdk.discover_pager(DiscoverParams::new("u"));
        pager.fetch().unwrap();
        assert!(!sdk.transport().last_url().contains("after="));
        pager.advance().unwrap().unwrap();
        assert_eq!(pager.cursor(), Some("XYZ"));
        assert!(sdk.transport().last_url().ends_with("&after=XYZ"));
        assert!(pager.advance().unwrap().is_none());
    }

    #[test]
    fn discover_pager_reset_drops_cursor() {
        let sdk = sdk(Scripted::new(vec![
            ok(discover_page(true, "XYZ")),
            ok(discover_page(false, "")),
            ok(discover_page(true, "XYZ")),
        ]));
        let mut pager = sdk.discover_pager(DiscoverParams::new("u"));
        pager.fetch().unwrap();
        pager.advance().unwrap();
        pager.reset().unwrap();
        assert_eq!(pager.cursor(), None);
        assert!(!sdk.transport().last_url().contains("after="));
    }

    #[test]
    fn discover_pager_reset_clears_starting_cursor() {
        let sdk = sdk(Scripted::new(vec![
            ok(discover_page(true, "DEF")),
            ok(discover_page(true, "XYZ")),
        ]));
        let mut pager = sdk.discover_pager(DiscoverParams::new("u").with_after("ABC"));
        pager.fetch().unwrap();
        assert!(sdk.transport().last_url().ends_with("&after=ABC"));
        pager.reset().unwrap();
        assert_eq!(pager.cursor(), None);
        assert!(!sdk.transport().last_url().contains("after="));
    }

    #[test]
    fn discover_pager_propagates_http_errors() {
        let sdk = sdk(Scripted::new(vec![
            ok(discover_page(true, "XYZ")),
            Ok(HttpResponse {
                status: 503,
                headers: Vec::new(),
                body: r#"{"error":"busy"}"#.to_string(),
            }),
        ]));
        let mut pager = sdk.discover_pager(DiscoverParams::new("u"));
        pager.fetch().unwrap();
        let err = pager.advance().unwrap_err();
        assert!(matches!(err, AisearchError::HttpStatus { status: 503, .. }));
    }
}
