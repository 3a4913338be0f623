//! Request parameters for each action.
//!
//! Parameter sets are plain values: construct with `new`, refine with the
//! consuming `with_*` methods, then hand them to the client, which serializes
//! them once with `to_query`. Optional strings that are empty are left out of
//! the query entirely.

use serde::Serialize;

use crate::query::{encode_attributes, QueryString};

pub const DEFAULT_SEARCH_LIMIT: u32 = 30;
pub const DEFAULT_DISCOVER_LIMIT: u32 = 30;
pub const DEFAULT_PRODUCT_LIMIT: u32 = 5;

/// Result ordering for a search query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Sort {
    /// Relevance, as decided by the server.
    #[default]
    Default,
    PriceAsc,
    PriceDesc,
    NameAsc,
    NameDesc,
    CreatedAtAsc,
    CreatedAtDesc,
}

impl Sort {
    pub fn as_str(self) -> &'static str {
        match self {
            Sort::Default => "",
            Sort::PriceAsc => "price",
            Sort::PriceDesc => "-price",
            Sort::NameAsc => "name",
            Sort::NameDesc => "-name",
            Sort::CreatedAtAsc => "created_at",
            Sort::CreatedAtDesc => "-created_at",
        }
    }
}

/// Optional blocks of a search result the server should include.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expand {
    Product,
    Filter,
    PopularCategories,
    Recommendation,
}

impl Expand {
    pub const ALL: [Expand; 4] = [
        Expand::Product,
        Expand::Filter,
        Expand::PopularCategories,
        Expand::Recommendation,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Expand::Product => "product",
            Expand::Filter => "filter",
            Expand::PopularCategories => "popularCategories",
            Expand::Recommendation => "recommendation",
        }
    }
}

/// Parameters of `search/query`.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    user_id: String,
    query: String,
    limit: u32,
    page: u64,
    sort: Sort,
    expand: Vec<Expand>,
    /// Selected facets in the order they were added.
    attributes: Vec<(i64, Vec<i64>)>,
    min_price: f64,
    max_price: f64,
    segments: Option<String>,
    negative_segments: Option<String>,
}

impl SearchQuery {
    pub fn new(user_id: &str, query: &str) -> Self {
        Self {
            user_id: user_id.to_string(),
            query: query.to_string(),
            limit: DEFAULT_SEARCH_LIMIT,
            page: 1,
            sort: Sort::Default,
            expand: Expand::ALL.to_vec(),
            attributes: Vec::new(),
            min_price: 0.0,
            max_price: 0.0,
            segments: None,
            negative_segments: None,
        }
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_page(mut self, page: u64) -> Self {
        self.page = page;
        self
    }

    pub fn with_sort(mut self, sort: Sort) -> Self {
        self.sort = sort;
        self
    }

    pub fn with_expand(mut self, expand: &[Expand]) -> Self {
        self.expand = expand.to_vec();
        self
    }

    pub fn with_price_range(mut self, min_price: f64, max_price: f64) -> Self {
        self.min_price = min_price;
        self.max_price = max_price;
        self
    }

    pub fn with_segments(mut self, segments: &str) -> Self {
        self.segments = non_empty(segments);
        self
    }

    pub fn with_negative_segments(mut self, negative_segments: &str) -> Self {
        self.negative_segments = non_empty(negative_segments);
        self
    }

    /// Select `child_id` under `parent_id`. Selecting twice is a no-op.
    pub fn with_filter_attribute(mut self, parent_id: i64, child_id: i64) -> Self {
        match self.attributes.iter_mut().find(|(p, _)| *p == parent_id) {
            Some((_, children)) => {
                if !children.contains(&child_id) {
                    children.push(child_id);
                }
            }
            None => self.attributes.push((parent_id, vec![child_id])),
        }
        self
    }

    /// Deselect `child_id`; a parent left without children is dropped.
    pub fn without_filter_attribute(mut self, parent_id: i64, child_id: i64) -> Self {
        if let Some((_, children)) = self.attributes.iter_mut().find(|(p, _)| *p == parent_id) {
            children.retain(|c| *c != child_id);
        }
        self.attributes.retain(|(_, children)| !children.is_empty());
        self
    }

    /// Clear the selection of one parent, or of every parent when `None`.
    pub fn without_filter_attributes(mut self, parent_id: Option<i64>) -> Self {
        match parent_id {
            Some(parent_id) => self.attributes.retain(|(p, _)| *p != parent_id),
            None => self.attributes.clear(),
        }
        self
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn sort(&self) -> Sort {
        self.sort
    }

    pub fn filter_attributes(&self) -> &[(i64, Vec<i64>)] {
        &self.attributes
    }

    pub(crate) fn set_page(&mut self, page: u64) {
        self.page = page;
    }

    pub fn to_query(&self, client_token: &str) -> QueryString {
        let expand: Vec<&str> = self.expand.iter().map(|e| e.as_str()).collect();
        let mut q = QueryString::new();
        q.push("query", &self.query)
            .push("user_id", &self.user_id)
            .push("expand", expand.join(","))
            .push("client-token", client_token)
            .push("limit", self.limit)
            .push("page", self.page)
            .push("sort", self.sort.as_str())
            .push("attributes", encode_attributes(&self.attributes))
            .push("min_price", self.min_price)
            .push("max_price", self.max_price)
            .push_opt("segments", self.segments.as_deref())
            .push_opt("negative_segments", self.negative_segments.as_deref());
        q
    }
}

/// Parameters of `search/recommendation`, the empty-query search panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRecommendationParams {
    user_id: String,
    product_limit: u32,
    segments: Option<String>,
    negative_segments: Option<String>,
}

impl SearchRecommendationParams {
    pub fn new(user_id: &str) -> Self {
        Self {
            user_id: user_id.to_string(),
            product_limit: DEFAULT_PRODUCT_LIMIT,
            segments: None,
            negative_segments: None,
        }
    }

    pub fn with_product_limit(mut self, product_limit: u32) -> Self {
        self.product_limit = product_limit;
        self
    }

    pub fn with_segments(mut self, segments: &str) -> Self {
        self.segments = non_empty(segments);
        self
    }

    pub fn with_negative_segments(mut self, negative_segments: &str) -> Self {
        self.negative_segments = non_empty(negative_segments);
        self
    }

    pub fn to_query(&self, client_token: &str) -> QueryString {
        let mut q = QueryString::new();
        q.push("user_id", &self.user_id)
            .push("client-token", client_token)
            .push("product-limit", self.product_limit)
            .push_opt("segments", self.segments.as_deref())
            .push_opt("negative_segments", self.negative_segments.as_deref());
        q
    }
}

/// Parameters of `recommendation/carousel`.
///
/// Category and brand narrowing are optional and may be given by id, by
/// remote key or (brand only) by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CarouselParams {
    user_id: String,
    category_id: Option<i64>,
    category_remote_key: Option<String>,
    brand_id: Option<i64>,
    brand_remote_key: Option<String>,
    brand_name: Option<String>,
    segments: Option<String>,
    negative_segments: Option<String>,
}

impl CarouselParams {
    pub fn new(user_id: &str) -> Self {
        Self {
            user_id: user_id.to_string(),
            ..Self::default()
        }
    }

    pub fn with_category_id(mut self, category_id: i64) -> Self {
        self.category_id = Some(category_id).filter(|id| *id != 0);
        self
    }

    pub fn with_category_remote_key(mut self, key: &str) -> Self {
        self.category_remote_key = non_empty(key);
        self
    }

    pub fn with_brand_id(mut self, brand_id: i64) -> Self {
        self.brand_id = Some(brand_id).filter(|id| *id != 0);
        self
    }

    pub fn with_brand_remote_key(mut self, key: &str) -> Self {
        self.brand_remote_key = non_empty(key);
        self
    }

    pub fn with_brand_name(mut self, name: &str) -> Self {
        self.brand_name = non_empty(name);
        self
    }

    pub fn with_segments(mut self, segments: &str) -> Self {
        self.segments = non_empty(segments);
        self
    }

    pub fn with_negative_segments(mut self, negative_segments: &str) -> Self {
        self.negative_segments = non_empty(negative_segments);
        self
    }

    pub fn to_query(&self, client_token: &str) -> QueryString {
        let category_id = self.category_id.map(|id| id.to_string());
        let brand_id = self.brand_id.map(|id| id.to_string());
        let mut q = QueryString::new();
        q.push("client-token", client_token)
            .push("user_id", &self.user_id)
            .push_opt("segments", self.segments.as_deref())
            .push_opt("negative_segments", self.negative_segments.as_deref())
            .push_opt("category_id", category_id.as_deref())
            .push_opt("category_remote_key", self.category_remote_key.as_deref())
            .push_opt("brand_id", brand_id.as_deref())
            .push_opt("brand_remote_key", self.brand_remote_key.as_deref())
            .push_opt("brand_name", self.brand_name.as_deref());
        q
    }
}

/// Parameters of `recommendation/discover`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoverParams {
    user_id: String,
    limit: u32,
    after: Option<String>,
    segments: Option<String>,
    negative_segments: Option<String>,
}

impl DiscoverParams {
    pub fn new(user_id: &str) -> Self {
        Self {
            user_id: user_id.to_string(),
            limit: DEFAULT_DISCOVER_LIMIT,
            after: None,
            segments: None,
            negative_segments: None,
        }
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    /// Continue from a cursor returned in a previous page's `after`.
    pub fn with_after(mut self, after: &str) -> Self {
        self.after = non_empty(after);
        self
    }

    pub fn with_segments(mut self, segments: &str) -> Self {
        self.segments = non_empty(segments);
        self
    }

    pub fn with_negative_segments(mut self, negative_segments: &str) -> Self {
        self.negative_segments = non_empty(negative_segments);
        self
    }

    pub fn after(&self) -> Option<&str> {
        self.after.as_deref()
    }

    pub(crate) fn set_after(&mut self, after: &str) {
        self.after = non_empty(after);
    }

    pub fn to_query(&self, client_token: &str) -> QueryString {
        let mut q = QueryString::new();
        q.push("client-token", client_token)
            .push("user_id", &self.user_id)
            .push("limit", self.limit)
            .push_opt("after", self.after.as_deref())
            .push_opt("segments", self.segments.as_deref())
            .push_opt("negative_segments", self.negative_segments.as_deref());
        q
    }
}

/// Removal of one entry from a user's recent queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentQueryDelete {
    user_id: String,
    query: String,
}

#[derive(Serialize)]
pub(crate) struct RecentQueryBody<'a> {
    pub query: &'a str,
}

impl RecentQueryDelete {
    pub fn new(user_id: &str, query: &str) -> Self {
        Self {
            user_id: user_id.to_string(),
            query: query.to_string(),
        }
    }

    pub fn to_query(&self, client_token: &str) -> QueryString {
        let mut q = QueryString::new();
        q.push("client-token", client_token)
            .push("user_id", &self.user_id);
        q
    }

    pub(crate) fn body(&self) -> RecentQueryBody<'_> {
        RecentQueryBody { query: &self.query }
    }
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}
