//! Synchronous client for the aisearch product search and recommendation API.
//!
//! # Overview
//! Covers the public endpoints of a site: search queries with facets and
//! sorting, the empty-query search panel, product carousels, the cursor-paged
//! discover feed, site settings and removal of a recent query.
//!
//! # Design
//! - `AisearchClient` is stateless. It builds `HttpRequest` values and parses
//!   `HttpResponse` values without touching the network (host-does-IO), so
//!   every action is testable from plain data.
//! - [`Transport`] performs the round-trip; [`UreqTransport`] is the default
//!   and [`Aisearch`] ties a client and a transport together.
//! - Responses are decoded to `serde_json::Value` first, then mapped onto
//!   typed records through [`FromRaw`] with lenient scalar coercion.
//! - 404 is reported as an [`ActionResult`] without a model; other non-2xx
//!   statuses are [`AisearchError::HttpStatus`].
//! - [`SearchPager`] and [`DiscoverPager`] walk numbered and cursor pages.

pub mod client;
mod coerce;
pub mod config;
pub mod error;
pub mod http;
pub mod models;
pub mod pagination;
pub mod params;
pub mod query;
pub mod sdk;

pub use client::{ActionResult, AisearchClient};
pub use config::ClientConfig;
pub use error::{AisearchError, MappingError};
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport, UreqTransport};
pub use models::FromRaw;
pub use pagination::{DiscoverPager, SearchPager};
pub use params::{
    CarouselParams, DiscoverParams, Expand, RecentQueryDelete, SearchQuery,
    SearchRecommendationParams, Sort,
};
pub use sdk::Aisearch;
