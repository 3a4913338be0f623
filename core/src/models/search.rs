use serde::Serialize;
use serde_json::Value;

use super::{
    AttributeChild, AttributeParent, Filter, FromRaw, Page, PopularCategory, Product,
    Recommendation,
};
use crate::coerce;
use crate::error::MappingError;

/// Result of a search query, the richest response of the API.
///
/// `page`, `filter` and `recommendation` are `None` when the server leaves
/// them out (typically because they were not requested through `expand`).
/// Every list is present, possibly empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchQueryResult {
    pub status: String,
    /// Total number of matching products.
    pub count: i64,
    pub products: Vec<Product>,
    pub page: Option<Page>,
    pub attribute_parents: Vec<AttributeParent>,
    pub attributes: Vec<AttributeChild>,
    /// The user's recent queries, most recent first.
    pub recent: Vec<String>,
    /// The query as understood by the server.
    pub query: String,
    pub filter: Option<Filter>,
    #[serde(rename = "popularCategories")]
    pub popular_categories: Vec<PopularCategory>,
    pub recommendation: Option<Recommendation>,
}

impl SearchQueryResult {
    /// Whether the server announced another page after this one.
    pub fn has_next_page(&self) -> bool {
        self.page.is_some_and(|page| page.has_next())
    }

    /// Children in [`Self::attributes`] that belong to `parent_id`.
    pub fn children_of(&self, parent_id: i64) -> impl Iterator<Item = &AttributeChild> + '_ {
        self.attributes
            .iter()
            .filter(move |child| child.parent_id == parent_id)
    }
}

impl FromRaw for SearchQueryResult {
    fn from_raw(raw: &Value) -> Result<Self, MappingError> {
        let obj = coerce::as_object(raw)?;
        Ok(Self {
            status: coerce::string(obj, "status")?,
            count: coerce::int(obj, "count")?,
            products: coerce::list(obj, "products")?,
            page: coerce::optional(obj, "page")?,
            attribute_parents: coerce::list(obj, "attribute_parents")?,
            attributes: coerce::list(obj, "attributes")?,
            recent: coerce::string_list(obj, "recent")?,
            query: coerce::string(obj, "query")?,
            filter: coerce::optional(obj, "filter")?,
            popular_categories: coerce::list(obj, "popularCategories")?,
            recommendation: coerce::optional(obj, "recommendation")?,
        })
    }
}
