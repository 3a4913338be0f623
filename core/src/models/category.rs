use serde::Serialize;
use serde_json::Value;

use super::FromRaw;
use crate::coerce;
use crate::error::MappingError;

/// A category promoted by the search panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PopularCategory {
    pub id: i64,
    pub name: String,
    pub image_url: String,
    pub url: String,
    /// Free-form merchant data, passed through untouched.
    pub custom: Value,
    pub position: i64,
    pub created_at: String,
    pub updated_at: String,
}

impl FromRaw for PopularCategory {
    fn from_raw(raw: &Value) -> Result<Self, MappingError> {
        let obj = coerce::as_object(raw)?;
        Ok(Self {
            id: coerce::int(obj, "id")?,
            name: coerce::string(obj, "name")?,
            image_url: coerce::string(obj, "image_url")?,
            url: coerce::string(obj, "url")?,
            custom: coerce::opaque(obj, "custom"),
            position: coerce::int(obj, "position")?,
            created_at: coerce::string(obj, "created_at")?,
            updated_at: coerce::string(obj, "updated_at")?,
        })
    }
}
