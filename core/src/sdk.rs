//! Executing front end: an [`AisearchClient`] paired with a [`Transport`].

use tracing::debug;

use crate::client::{ActionResult, AisearchClient};
use crate::config::ClientConfig;
use crate::error::AisearchError;
use crate::http::{HttpRequest, HttpResponse, Transport, UreqTransport};
use crate::models::{
    RecommendationCarousel, RecommendationDiscover, SearchQueryResult, SearchRecommendation,
    Settings,
};
use crate::pagination::{DiscoverPager, SearchPager};
use crate::params::{
    CarouselParams, DiscoverParams, RecentQueryDelete, SearchQuery, SearchRecommendationParams,
};
use crate::query::redact_token;

/// Runs every action end to end over a transport.
///
/// ```no_run
/// use aisearch_core::{Aisearch, ClientConfig, SearchQuery};
///
/// let sdk = Aisearch::new(ClientConfig::new(1234, "client-token"));
/// let result = sdk.search_query(&SearchQuery::new("user-1", "laptop"))?;
/// if let Some(found) = result.model {
///     println!("{} products", found.count);
/// }
/// # Ok::<(), aisearch_core::AisearchError>(())
/// ```
#[derive(Clone)]
pub struct Aisearch<T = UreqTransport> {
    client: AisearchClient,
    transport: T,
}

impl Aisearch<UreqTransport> {
    pub fn new(config: ClientConfig) -> Self {
        let transport = UreqTransport::new(&config);
        Self::with_transport(config, transport)
    }

    /// Configuration from `AISEARCH_*` variables, see [`ClientConfig::from_env`].
    pub fn from_env() -> Result<Self, AisearchError> {
        Ok(Self::new(ClientConfig::from_env()?))
    }
}

impl<T: Transport> Aisearch<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self {
            client: AisearchClient::new(config),
            transport,
        }
    }

    pub fn client(&self) -> &AisearchClient {
        &self.client
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn search_query(
        &self,
        params: &SearchQuery,
    ) -> Result<ActionResult<SearchQueryResult>, AisearchError> {
        let response = self.send(&self.client.build_search_query(params))?;
        self.client.parse_search_query(response)
    }

    pub fn search_recommendation(
        &self,
        params: &SearchRecommendationParams,
    ) -> Result<ActionResult<SearchRecommendation>, AisearchError> {
        let response = self.send(&self.client.build_search_recommendation(params))?;
        self.client.parse_search_recommendation(response)
    }

    pub fn carousel(
        &self,
        params: &CarouselParams,
    ) -> Result<ActionResult<RecommendationCarousel>, AisearchError> {
        let response = self.send(&self.client.build_carousel(params))?;
        self.client.parse_carousel(response)
    }

    pub fn discover(
        &self,
        params: &DiscoverParams,
    ) -> Result<ActionResult<RecommendationDiscover>, AisearchError> {
        let response = self.send(&self.client.build_discover(params))?;
        self.client.parse_discover(response)
    }

    pub fn settings(&self) -> Result<ActionResult<Settings>, AisearchError> {
        let response = self.send(&self.client.build_settings())?;
        self.client.parse_settings(response)
    }

    /// Remove one query from the user's recent list. `true` when the server
    /// confirmed with 204.
    pub fn delete_recent_query(&self, params: &RecentQueryDelete) -> Result<bool, AisearchError> {
        let response = self.send(&self.client.build_delete_recent_query(params)?)?;
        self.client.parse_delete_recent_query(response)
    }

    /// Pager over search result pages, starting at `params.page()`.
    pub fn search_pager(&self, params: SearchQuery) -> SearchPager<'_, T> {
        SearchPager::new(self, params)
    }

    /// Pager over the discover feed, starting at the cursor in `params`.
    pub fn discover_pager(&self, params: DiscoverParams) -> DiscoverPager<'_, T> {
        DiscoverPager::new(self, params)
    }

    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, AisearchError> {
        debug!(
            method = request.method.as_str(),
            url = %redact_token(&request.url),
            "sending request"
        );
        self.transport.execute(request)
    }
}
