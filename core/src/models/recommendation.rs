//! Recommendation aggregates: the relating block embedded in search results,
//! the search-panel recommendation, the carousel and the discover feed.

use serde::Serialize;
use serde_json::Value;

use super::{
    AttributeChild, AttributeParent, Cta, DiscoverPage, FromRaw, PopularCategory, Product,
    RelatingAttributeParent,
};
use crate::coerce;
use crate::error::MappingError;

/// Recommendation block nested in a search query result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub relating: Relating,
    /// Autocomplete suggestions, shape decided by the server.
    pub autocomplete: Value,
}

/// Facets and landing pages related to the current query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Relating {
    pub attributes: Vec<RelatingAttributeParent>,
    #[serde(rename = "pageRedirects")]
    pub page_redirects: Vec<PageRedirect>,
}

/// A content page the query should lead to.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageRedirect {
    pub id: i64,
    pub name: String,
    pub url: String,
    /// Navigate straight to `url` instead of showing results.
    pub auto_redirect: bool,
    pub position: i64,
    #[serde(rename = "type")]
    pub kind: String,
    pub detail: Value,
    pub created_at: String,
    pub updated_at: String,
}

/// Content of the empty-query search panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchRecommendation {
    pub attribute_parents: Vec<AttributeParent>,
    pub attributes: Vec<AttributeChild>,
    pub interests: Interests,
    pub popular: Popular,
    pub cta: Cta,
    pub recent: Vec<String>,
}

/// Products derived from the user's own activity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Interests {
    pub clicks: Vec<Product>,
    pub products: Vec<Product>,
}

/// Site-wide popular searches, categories and products.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Popular {
    pub searches: Vec<Value>,
    pub categories: Vec<PopularCategory>,
    pub products: Vec<Product>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationCarousel {
    pub attributes: Vec<AttributeChild>,
    pub attribute_parents: Vec<AttributeParent>,
    pub products: Vec<Product>,
    /// Whether the products were picked for this user rather than site-wide.
    pub personalized: bool,
}

/// One page of the cursor-paged discover feed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationDiscover {
    pub attributes: Vec<AttributeChild>,
    pub attribute_parents: Vec<AttributeParent>,
    pub products: Vec<Product>,
    pub count: i64,
    pub page: DiscoverPage,
}

impl FromRaw for Recommendation {
    fn from_raw(raw: &Value) -> Result<Self, MappingError> {
        let obj = coerce::as_object(raw)?;
        Ok(Self {
            relating: coerce::nested(obj, "relating")?,
            autocomplete: coerce::opaque(obj, "autocomplete"),
        })
    }
}

impl FromRaw for Relating {
    fn from_raw(raw: &Value) -> Result<Self, MappingError> {
        let obj = coerce::as_object(raw)?;
        Ok(Self {
            attributes: coerce::list(obj, "attributes")?,
            page_redirects: coerce::list(obj, "pageRedirects")?,
        })
    }
}

impl FromRaw for PageRedirect {
    fn from_raw(raw: &Value) -> Result<Self, MappingError> {
        let obj = coerce::as_object(raw)?;
        Ok(Self {
            id: coerce::int(obj, "id")?,
            name: coerce::string(obj, "name")?,
            url: coerce::string(obj, "url")?,
            auto_redirect: coerce::boolean(obj, "auto_redirect")?,
            position: coerce::int(obj, "position")?,
            kind: coerce::string(obj, "type")?,
            detail: coerce::opaque(obj, "detail"),
            created_at: coerce::string(obj, "created_at")?,
            updated_at: coerce::string(obj, "updated_at")?,
        })
    }
}

impl FromRaw for SearchRecommendation {
    fn from_raw(raw: &Value) -> Result<Self, MappingError> {
        let obj = coerce::as_object(raw)?;
        Ok(Self {
            attribute_parents: coerce::list(obj, "attribute_parents")?,
            attributes: coerce::list(obj, "attributes")?,
            interests: coerce::nested(obj, "interests")?,
            popular: coerce::nested(obj, "popular")?,
            cta: coerce::nested(obj, "cta")?,
            recent: coerce::string_list(obj, "recent")?,
        })
    }
}

impl FromRaw for Interests {
    fn from_raw(raw: &Value) -> Result<Self, MappingError> {
        let obj = coerce::as_object(raw)?;
        Ok(Self {
            clicks: coerce::list(obj, "clicks")?,
            products: coerce::list(obj, "products")?,
        })
    }
}

impl FromRaw for Popular {
    fn from_raw(raw: &Value) -> Result<Self, MappingError> {
        let obj = coerce::as_object(raw)?;
        Ok(Self {
            searches: coerce::opaque_list(obj, "searches")?,
            categories: coerce::list(obj, "categories")?,
            products: coerce::list(obj, "products")?,
        })
    }
}

impl FromRaw for RecommendationCarousel {
    fn from_raw(raw: &Value) -> Result<Self, MappingError> {
        let obj = coerce::as_object(raw)?;
        Ok(Self {
            attributes: coerce::list(obj, "attributes")?,
            attribute_parents: coerce::list(obj, "attribute_parents")?,
            products: coerce::list(obj, "products")?,
            personalized: coerce::boolean(obj, "personalized")?,
        })
    }
}

impl FromRaw for RecommendationDiscover {
    fn from_raw(raw: &Value) -> Result<Self, MappingError> {
        let obj = coerce::as_object(raw)?;
        Ok(Self {
            attributes: coerce::list(obj, "attributes")?,
            attribute_parents: coerce::list(obj, "attribute_parents")?,
            products: coerce::list(obj, "products")?,
            count: coerce::int(obj, "count")?,
            page: coerce::nested(obj, "page")?,
        })
    }
}
