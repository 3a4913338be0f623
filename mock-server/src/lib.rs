//! In-process emulation of the aisearch HTTP API.
//!
//! Serves the same routes, query parameters and JSON shapes as the real
//! service over a small seeded catalogue, so the client can be exercised end
//! to end without network access. State (recent queries and discover
//! cursors) lives in memory for the lifetime of the router.

mod catalog;

use std::{
    cmp::Ordering,
    collections::{HashMap, VecDeque},
    sync::Arc,
};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Map, Value};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::{debug, warn};
use uuid::Uuid;

use catalog::Item;

pub const SITE_ID: u64 = 1234;
pub const CLIENT_TOKEN: &str = "test-token";
pub const CATALOG_SIZE: usize = 75;

const MAX_RECENT: usize = 5;
const MAX_CURSORS: usize = 64;
const CAROUSEL_SIZE: usize = 10;

/// Site the mock answers for and the token it accepts.
#[derive(Clone, Debug)]
pub struct MockConfig {
    pub site_id: u64,
    pub client_token: String,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            site_id: SITE_ID,
            client_token: CLIENT_TOKEN.to_string(),
        }
    }
}

pub struct Store {
    items: Vec<Item>,
    /// Recent queries per user id, most recent first.
    recent: HashMap<String, Vec<String>>,
    /// Discover cursors and the offset into `items` each resumes at, oldest
    /// first. Bounded by `MAX_CURSORS`.
    cursors: VecDeque<(Uuid, usize)>,
}

impl Store {
    fn seeded() -> Self {
        Self {
            items: catalog::seed_items(),
            recent: HashMap::new(),
            cursors: VecDeque::new(),
        }
    }

    fn remember(&mut self, user_id: &str, query: &str) {
        let list = self.recent.entry(user_id.to_string()).or_default();
        list.retain(|q| q != query);
        list.insert(0, query.to_string());
        list.truncate(MAX_RECENT);
    }

    fn recent(&self, user_id: &str) -> Vec<String> {
        self.recent.get(user_id).cloned().unwrap_or_default()
    }

    fn issue_cursor(&mut self, offset: usize) -> Uuid {
        let cursor = Uuid::new_v4();
        if self.cursors.len() == MAX_CURSORS {
            self.cursors.pop_front();
        }
        self.cursors.push_back((cursor, offset));
        cursor
    }

    fn cursor_offset(&self, cursor: &Uuid) -> Option<usize> {
        self.cursors
            .iter()
            .find(|(id, _)| id == cursor)
            .map(|(_, offset)| *offset)
    }
}

pub type Db = Arc<RwLock<Store>>;

#[derive(Clone)]
pub struct AppState {
    config: Arc<MockConfig>,
    db: Db,
}

#[derive(Deserialize)]
pub struct RecentQueryBody {
    pub query: String,
}

/// Error answered as `{"error": message}`.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

type Params = HashMap<String, String>;
type ApiResult = Result<Json<Value>, ApiError>;

pub fn app() -> Router {
    app_with(MockConfig::default())
}

pub fn app_with(config: MockConfig) -> Router {
    let state = AppState {
        config: Arc::new(config),
        db: Arc::new(RwLock::new(Store::seeded())),
    };
    Router::new()
        .route("/sites/{site_id}/v1/search/query", get(search_query))
        .route("/sites/{site_id}/v1/search/query/recent", delete(delete_recent_query))
        .route("/sites/{site_id}/v1/search/recommendation", get(search_recommendation))
        .route("/sites/{site_id}/v1/recommendation/carousel", get(carousel))
        .route("/sites/{site_id}/v1/recommendation/discover", get(discover))
        .route("/sites/{site_id}/v1/settings", get(settings))
        .with_state(state)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn authorize(state: &AppState, site_id: u64, params: &Params) -> Result<(), ApiError> {
    if site_id != state.config.site_id {
        warn!(site_id, "unknown site");
        return Err(ApiError::new(StatusCode::NOT_FOUND, "site not found"));
    }
    if params.get("client-token") != Some(&state.config.client_token) {
        warn!(site_id, "rejected client token");
        return Err(ApiError::new(StatusCode::UNAUTHORIZED, "invalid client token"));
    }
    Ok(())
}

fn text<'a>(params: &'a Params, key: &str) -> &'a str {
    params.get(key).map(String::as_str).unwrap_or("")
}

fn number<T: std::str::FromStr>(params: &Params, key: &str, default: T) -> Result<T, ApiError> {
    match params.get(key).filter(|v| !v.is_empty()) {
        None => Ok(default),
        Some(raw) => raw
            .parse()
            .map_err(|_| ApiError::new(StatusCode::BAD_REQUEST, format!("invalid {key}"))),
    }
}

/// Parse `parent:child,child|parent:child`.
fn selection(raw: &str) -> Result<Vec<(i64, Vec<i64>)>, ApiError> {
    let invalid = || ApiError::new(StatusCode::BAD_REQUEST, "invalid attributes");
    raw.split('|')
        .filter(|group| !group.is_empty())
        .map(|group| {
            let (parent, children) = group.split_once(':').ok_or_else(invalid)?;
            let parent = parent.parse::<i64>().map_err(|_| invalid())?;
            let children = children
                .split(',')
                .map(|c| c.parse::<i64>().map_err(|_| invalid()))
                .collect::<Result<Vec<_>, _>>()?;
            Ok((parent, children))
        })
        .collect()
}

fn sort_items(items: &mut [&Item], sort: &str) {
    let by_price = |a: &&Item, b: &&Item| a.price.partial_cmp(&b.price).unwrap_or(Ordering::Equal);
    match sort {
        "price" => items.sort_by(by_price),
        "-price" => items.sort_by(|a, b| by_price(b, a)),
        "name" => items.sort_by(|a, b| a.name.cmp(&b.name)),
        "-name" => items.sort_by(|a, b| b.name.cmp(&a.name)),
        "created_at" => items.sort_by_key(|i| i.id),
        "-created_at" => items.sort_by_key(|i| std::cmp::Reverse(i.id)),
        _ => {}
    }
}

fn products(items: &[&Item]) -> Vec<Value> {
    items.iter().map(|item| item.to_json()).collect()
}

async fn search_query(
    State(state): State<AppState>,
    Path(site_id): Path<u64>,
    Query(params): Query<Params>,
) -> ApiResult {
    authorize(&state, site_id, &params)?;
    let query = text(&params, "query").to_string();
    let user_id = text(&params, "user_id");
    let limit = number(&params, "limit", 30usize)?.max(1);
    let page = number(&params, "page", 1usize)?.max(1);
    let min_price = number(&params, "min_price", 0.0f64)?;
    let max_price = number(&params, "max_price", 0.0f64)?;
    let selected = selection(text(&params, "attributes"))?;
    let expand: Vec<&str> = text(&params, "expand").split(',').collect();

    let mut store = state.db.write().await;
    if !query.is_empty() && !user_id.is_empty() {
        store.remember(user_id, &query);
    }

    let needle = query.to_lowercase();
    let matched: Vec<&Item> = store
        .items
        .iter()
        .filter(|item| item.name.to_lowercase().contains(&needle))
        .collect();
    let mut hits: Vec<&Item> = matched
        .iter()
        .copied()
        .filter(|item| min_price <= 0.0 || item.price >= min_price)
        .filter(|item| max_price <= 0.0 || item.price <= max_price)
        .filter(|item| {
            selected
                .iter()
                .all(|(parent, children)| item.child_in(*parent).is_some_and(|c| children.contains(&c)))
        })
        .collect();
    sort_items(&mut hits, text(&params, "sort"));

    let start = (page - 1) * limit;
    let slice: Vec<&Item> = hits.iter().copied().skip(start).take(limit).collect();
    let next = if start + limit < hits.len() { page + 1 } else { 0 };
    debug!(%query, count = hits.len(), page, next, "search query");

    let mut body = Map::new();
    body.insert("status".into(), json!("success"));
    body.insert("count".into(), json!(hits.len()));
    let listed = if expand.contains(&"product") { products(&slice) } else { Vec::new() };
    body.insert("products".into(), json!(listed));
    body.insert("page".into(), json!({"count": slice.len(), "next": next}));
    body.insert("attribute_parents".into(), json!(catalog::attribute_parents()));
    body.insert("attributes".into(), json!(catalog::attribute_children()));
    body.insert("recent".into(), json!(store.recent(user_id)));
    body.insert("query".into(), json!(query));
    if expand.contains(&"filter") {
        let prices = matched.iter().map(|item| item.price);
        let min = prices.clone().fold(f64::INFINITY, f64::min);
        let max = prices.fold(0.0, f64::max);
        let min = if min.is_finite() { min } else { 0.0 };
        let chosen: Map<String, Value> = selected
            .iter()
            .map(|(parent, children)| (parent.to_string(), json!(children)))
            .collect();
        body.insert(
            "filter".into(),
            json!({
                "selected": chosen,
                "attributes": catalog::filter_attributes(&matched),
                "price": {"min": min, "max": max}
            }),
        );
    }
    if expand.contains(&"popularCategories") {
        body.insert("popularCategories".into(), json!(catalog::popular_categories()));
    }
    if expand.contains(&"recommendation") {
        let suggestions: Vec<String> = store
            .items
            .iter()
            .filter(|item| !needle.is_empty() && item.name.to_lowercase().starts_with(&needle))
            .take(3)
            .map(|item| item.name.to_lowercase())
            .collect();
        body.insert(
            "recommendation".into(),
            json!({
                "relating": {"attributes": [], "pageRedirects": catalog::page_redirects(&query)},
                "autocomplete": suggestions
            }),
        );
    }
    Ok(Json(Value::Object(body)))
}

async fn delete_recent_query(
    State(state): State<AppState>,
    Path(site_id): Path<u64>,
    Query(params): Query<Params>,
    Json(input): Json<RecentQueryBody>,
) -> Result<StatusCode, ApiError> {
    authorize(&state, site_id, &params)?;
    let user_id = text(&params, "user_id");
    let mut store = state.db.write().await;
    let removed = store.recent.get_mut(user_id).is_some_and(|list| {
        let before = list.len();
        list.retain(|q| *q != input.query);
        list.len() < before
    });
    if !removed {
        return Err(ApiError::new(StatusCode::NOT_FOUND, "query not found"));
    }
    debug!(user_id, query = %input.query, "recent query removed");
    Ok(StatusCode::NO_CONTENT)
}

async fn search_recommendation(
    State(state): State<AppState>,
    Path(site_id): Path<u64>,
    Query(params): Query<Params>,
) -> ApiResult {
    authorize(&state, site_id, &params)?;
    let user_id = text(&params, "user_id");
    let limit = number(&params, "product-limit", 5usize)?;
    let store = state.db.read().await;
    let recent = store.recent(user_id);

    let interests: Vec<&Item> = match recent.first() {
        Some(last) => {
            let needle = last.to_lowercase();
            store
                .items
                .iter()
                .filter(|item| item.name.to_lowercase().contains(&needle))
                .take(limit)
                .collect()
        }
        None => Vec::new(),
    };
    let popular: Vec<&Item> = store.items.iter().take(limit).collect();

    Ok(Json(json!({
        "attribute_parents": catalog::attribute_parents(),
        "attributes": catalog::attribute_children(),
        "interests": {"clicks": [], "products": products(&interests)},
        "popular": {
            "searches": [{"query": "running shoe", "count": 42}, {"query": "boot", "count": 17}],
            "categories": catalog::popular_categories(),
            "products": products(&popular)
        },
        "cta": catalog::cta(),
        "recent": recent
    })))
}

async fn carousel(
    State(state): State<AppState>,
    Path(site_id): Path<u64>,
    Query(params): Query<Params>,
) -> ApiResult {
    authorize(&state, site_id, &params)?;
    let category_id = number(&params, "category_id", 0i64)?;
    let brand_id = number(&params, "brand_id", 0i64)?;
    let category_key = text(&params, "category_remote_key");
    let brand_key = text(&params, "brand_remote_key");
    let brand_name = text(&params, "brand_name").to_lowercase();

    let store = state.db.read().await;
    let picked: Vec<&Item> = store
        .items
        .iter()
        .filter(|item| category_id == 0 || item.category_id == category_id)
        .filter(|item| category_key.is_empty() || format!("cat-{}", item.category_id) == category_key)
        .filter(|item| brand_id == 0 || item.brand_id == brand_id)
        .filter(|item| brand_key.is_empty() || format!("brand-{}", item.brand_id) == brand_key)
        .filter(|item| brand_name.is_empty() || item.brand.to_lowercase() == brand_name)
        .take(CAROUSEL_SIZE)
        .collect();

    Ok(Json(json!({
        "attributes": catalog::attribute_children(),
        "attribute_parents": catalog::attribute_parents(),
        "products": products(&picked),
        "personalized": !store.recent(text(&params, "user_id")).is_empty()
    })))
}

async fn discover(
    State(state): State<AppState>,
    Path(site_id): Path<u64>,
    Query(params): Query<Params>,
) -> ApiResult {
    authorize(&state, site_id, &params)?;
    let limit = number(&params, "limit", 30usize)?.max(1);
    let mut store = state.db.write().await;

    let offset = match params.get("after").filter(|a| !a.is_empty()) {
        None => 0,
        Some(raw) => Uuid::parse_str(raw)
            .ok()
            .and_then(|cursor| store.cursor_offset(&cursor))
            .ok_or_else(|| ApiError::new(StatusCode::BAD_REQUEST, "invalid cursor"))?,
    };

    let total = store.items.len();
    let end = (offset + limit).min(total);
    let page: Vec<Value> = store.items[offset.min(total)..end]
        .iter()
        .map(Item::to_json)
        .collect();
    let after = if end < total {
        store.issue_cursor(end).to_string()
    } else {
        String::new()
    };
    let has_next = i64::from(!after.is_empty());
    debug!(offset, end, total, "discover page");

    Ok(Json(json!({
        "attributes": [],
        "attribute_parents": [],
        "products": page,
        "count": total,
        "page": {
            "limit": limit,
            "count": page.len(),
            "has_next": has_next,
            "after": after
        }
    })))
}

async fn settings(
    State(state): State<AppState>,
    Path(site_id): Path<u64>,
    Query(params): Query<Params>,
) -> ApiResult {
    authorize(&state, site_id, &params)?;
    Ok(Json(catalog::settings()))
}
