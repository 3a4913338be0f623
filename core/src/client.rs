//! Stateless request builder and response parser for the aisearch API.
//!
//! # Design
//! `AisearchClient` holds only its [`ClientConfig`] and carries no mutable
//! state between calls. Each action is split into a `build_*` method that
//! produces an `HttpRequest` and a `parse_*` method that consumes an
//! `HttpResponse`. Whoever owns a [`Transport`](crate::http::Transport)
//! executes the round-trip in between; [`crate::Aisearch`] bundles the two.
//!
//! Status handling is shared by every action:
//! - 200 with a JSON body maps onto the action's record.
//! - 404, and any other 2xx, yield an [`ActionResult`] without a model.
//! - Every other status is an [`AisearchError::HttpStatus`].

use serde_json::Value;
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::error::AisearchError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::models::{
    FromRaw, RecommendationCarousel, RecommendationDiscover, SearchQueryResult,
    SearchRecommendation, Settings,
};
use crate::params::{
    CarouselParams, DiscoverParams, RecentQueryDelete, SearchQuery, SearchRecommendationParams,
};
use crate::query::QueryString;

/// Outcome of one action: the HTTP status and, on 200, the mapped record.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionResult<M> {
    pub status: u16,
    pub model: Option<M>,
}

impl<M> ActionResult<M> {
    pub fn is_found(&self) -> bool {
        self.model.is_some()
    }

    pub fn into_model(self) -> Option<M> {
        self.model
    }
}

/// Synchronous, stateless client for the aisearch API.
#[derive(Debug, Clone)]
pub struct AisearchClient {
    config: ClientConfig,
}

impl AisearchClient {
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn build_search_query(&self, params: &SearchQuery) -> HttpRequest {
        self.get("search/query", &params.to_query(&self.config.client_token))
    }

    pub fn build_search_recommendation(&self, params: &SearchRecommendationParams) -> HttpRequest {
        self.get(
            "search/recommendation",
            &params.to_query(&self.config.client_token),
        )
    }

    pub fn build_carousel(&self, params: &CarouselParams) -> HttpRequest {
        self.get(
            "recommendation/carousel",
            &params.to_query(&self.config.client_token),
        )
    }

    /// A cursor that is itself an absolute URL is requested as is; any other
    /// cursor travels in the `after` parameter.
    pub fn build_discover(&self, params: &DiscoverParams) -> HttpRequest {
        match params.after().filter(|after| is_absolute_url(after)) {
            Some(url) => HttpRequest {
                method: HttpMethod::Get,
                url: url.to_string(),
                headers: self.default_headers(),
                body: None,
            },
            None => self.get(
                "recommendation/discover",
                &params.to_query(&self.config.client_token),
            ),
        }
    }

    pub fn build_settings(&self) -> HttpRequest {
        let mut query = QueryString::new();
        query.push("client-token", &self.config.client_token);
        self.get("settings", &query)
    }

    pub fn build_delete_recent_query(
        &self,
        params: &RecentQueryDelete,
    ) -> Result<HttpRequest, AisearchError> {
        let body =
            serde_json::to_string(&params.body()).map_err(|source| AisearchError::Protocol {
                context: "recent query body".to_string(),
                source,
            })?;
        Ok(HttpRequest {
            method: HttpMethod::Delete,
            url: self.url(
                "search/query/recent",
                &params.to_query(&self.config.client_token),
            ),
            headers: self.default_headers(),
            body: Some(body),
        })
    }

    pub fn parse_search_query(
        &self,
        response: HttpResponse,
    ) -> Result<ActionResult<SearchQueryResult>, AisearchError> {
        parse_model(&response, "search query")
    }

    pub fn parse_search_recommendation(
        &self,
        response: HttpResponse,
    ) -> Result<ActionResult<SearchRecommendation>, AisearchError> {
        parse_model(&response, "search recommendation")
    }

    pub fn parse_carousel(
        &self,
        response: HttpResponse,
    ) -> Result<ActionResult<RecommendationCarousel>, AisearchError> {
        parse_model(&response, "recommendation carousel")
    }

    pub fn parse_discover(
        &self,
        response: HttpResponse,
    ) -> Result<ActionResult<RecommendationDiscover>, AisearchError> {
        parse_model(&response, "recommendation discover")
    }

    pub fn parse_settings(
        &self,
        response: HttpResponse,
    ) -> Result<ActionResult<Settings>, AisearchError> {
        parse_model(&response, "settings")
    }

    /// `true` only when the server answered 204; 404 and other 2xx are `false`.
    pub fn parse_delete_recent_query(&self, response: HttpResponse) -> Result<bool, AisearchError> {
        check_status(&response)?;
        Ok(response.status == 204)
    }

    fn get(&self, path: &str, query: &QueryString) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: self.url(path, query),
            headers: self.default_headers(),
            body: None,
        }
    }

    fn url(&self, path: &str, query: &QueryString) -> String {
        format!("{}/{path}?{}", self.config.api_root(), query.encode())
    }

    fn default_headers(&self) -> Vec<(String, String)> {
        vec![
            ("User-Agent".to_string(), self.config.user_agent.clone()),
            ("Content-Type".to_string(), "application/json".to_string()),
        ]
    }
}

fn is_absolute_url(cursor: &str) -> bool {
    cursor.starts_with("http://") || cursor.starts_with("https://")
}

fn parse_model<M: FromRaw>(
    response: &HttpResponse,
    context: &str,
) -> Result<ActionResult<M>, AisearchError> {
    check_status(response)?;
    if response.status != 200 {
        debug!(status = response.status, context, "no model for status");
        return Ok(ActionResult {
            status: response.status,
            model: None,
        });
    }
    let raw: Value =
        serde_json::from_str(&response.body).map_err(|source| AisearchError::Protocol {
            context: context.to_string(),
            source,
        })?;
    let model = M::from_raw(&raw)?;
    Ok(ActionResult {
        status: response.status,
        model: Some(model),
    })
}

/// Let 2xx and 404 through; anything else becomes `HttpStatus`.
fn check_status(response: &HttpResponse) -> Result<(), AisearchError> {
    if (200..300).contains(&response.status) || response.status == 404 {
        return Ok(());
    }
    let message = error_message(&response.body);
    warn!(status = response.status, message = ?message, "request rejected");
    Err(AisearchError::HttpStatus {
        status: response.status,
        message,
    })
}

fn error_message(body: &str) -> Option<String> {
    let raw: Value = serde_json::from_str(body).ok()?;
    match raw.get("error")? {
        Value::Null => None,
        Value::String(message) => Some(message.clone()),
        other => Some(other.to_string()),
    }
}
