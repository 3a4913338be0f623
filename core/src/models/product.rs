use serde::Serialize;
use serde_json::Value;

use super::FromRaw;
use crate::coerce;
use crate::error::MappingError;

/// A catalogue product as returned by search and recommendation endpoints.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub images: Vec<String>,
    pub url: String,
    pub stock: i64,
    pub is_new: bool,
    /// Price before discounts.
    #[serde(rename = "buying_price")]
    pub base_price: f64,
    /// Price the customer pays now.
    pub price: f64,
    pub currency_code: String,
    pub category_id: i64,
    pub brand_id: i64,
    pub sku: String,
    pub master_key: String,
    pub barcode: String,
    pub custom: Value,
    pub attributes: Value,
    pub variants: Vec<ProductVariant>,
    pub brand: String,
}

/// A purchasable variation of a [`Product`]. Has no identity of its own.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductVariant {
    pub name: String,
    pub stock: i64,
    #[serde(rename = "buying_price")]
    pub base_price: f64,
    pub price: f64,
    pub sku: String,
    pub master_key: String,
    pub custom: Value,
    pub attributes: Value,
}

impl FromRaw for Product {
    fn from_raw(raw: &Value) -> Result<Self, MappingError> {
        let obj = coerce::as_object(raw)?;
        Ok(Self {
            id: coerce::int(obj, "id")?,
            name: coerce::string(obj, "name")?,
            images: coerce::string_list(obj, "images")?,
            url: coerce::string(obj, "url")?,
            stock: coerce::int(obj, "stock")?,
            is_new: coerce::boolean(obj, "is_new")?,
            base_price: coerce::float(obj, "buying_price")?,
            price: coerce::float(obj, "price")?,
            currency_code: coerce::string(obj, "currency_code")?,
            category_id: coerce::int(obj, "category_id")?,
            brand_id: coerce::int(obj, "brand_id")?,
            sku: coerce::string(obj, "sku")?,
            master_key: coerce::string(obj, "master_key")?,
            barcode: coerce::string(obj, "barcode")?,
            custom: coerce::opaque(obj, "custom"),
            attributes: coerce::opaque(obj, "attributes"),
            variants: coerce::list(obj, "variants")?,
            brand: coerce::string(obj, "brand")?,
        })
    }
}

impl FromRaw for ProductVariant {
    fn from_raw(raw: &Value) -> Result<Self, MappingError> {
        let obj = coerce::as_object(raw)?;
        Ok(Self {
            name: coerce::string(obj, "name")?,
            stock: coerce::int(obj, "stock")?,
            base_price: coerce::float(obj, "buying_price")?,
            price: coerce::float(obj, "price")?,
            sku: coerce::string(obj, "sku")?,
            master_key: coerce::string(obj, "master_key")?,
            custom: coerce::opaque(obj, "custom"),
            attributes: coerce::opaque(obj, "attributes"),
        })
    }
}
