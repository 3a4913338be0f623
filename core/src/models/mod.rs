//! Response records and the functions that map raw JSON onto them.
//!
//! # Design
//! Every record is an immutable value built once by [`FromRaw::from_raw`]
//! from one JSON object. Aggregates map their children bottom-up through the
//! same trait, so each record can be tested alone against a fixture.
//! Field-level conversions all go through [`crate::coerce`].
//!
//! Records serialize back to the API's own key names, which keeps typed
//! scalar fields comparable with the source payload.

mod attribute;
mod category;
mod filter;
#[cfg(test)]
mod fixtures;
mod page;
mod product;
mod recommendation;
mod search;
mod settings;

use serde_json::Value;

use crate::error::MappingError;

pub use attribute::{
    AttributeChild, AttributeParent, FilterAttributeChild, FilterAttributeParent,
    RelatingAttributeChild, RelatingAttributeParent,
};
pub use category::PopularCategory;
pub use filter::{Filter, FilterPrice};
pub use page::{DiscoverPage, Page};
pub use product::{Product, ProductVariant};
pub use recommendation::{
    Interests, PageRedirect, Popular, Recommendation, RecommendationCarousel,
    RecommendationDiscover, Relating, SearchRecommendation,
};
pub use search::SearchQueryResult;
pub use settings::{Cta, CtaTyping, Currency, Settings, Subscription};

/// Build a record from one raw JSON value.
///
/// Implementations never mutate `raw` and never return a partially built
/// record: any missing or uncoercible field aborts the whole mapping.
pub trait FromRaw: Sized {
    fn from_raw(raw: &Value) -> Result<Self, MappingError>;
}
