//! Seeded catalogue data served by the mock API.
//!
//! Everything is deterministic so tests can assert on counts and ids. Some
//! numeric fields are emitted as strings, the way the real API's database
//! layer sometimes does, to exercise the client's lenient coercion.

use serde_json::{json, Value};

pub const COLOR_PARENT: i64 = 10;
pub const SIZE_PARENT: i64 = 20;

/// One seeded product together with the facets used for filtering.
#[derive(Clone, Debug)]
pub struct Item {
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub category_id: i64,
    pub brand_id: i64,
    pub brand: String,
    pub color: i64,
    pub size: i64,
}

const NAMES: [&str; 3] = ["Running Shoe", "Leather Boot", "Laptop Sleeve"];
const BRANDS: [(i64, &str); 2] = [(8, "Acme"), (9, "Globex")];

/// 75 products: 25 of each name, alternating brands, colours and sizes.
pub fn seed_items() -> Vec<Item> {
    (1..=75)
        .map(|id: i64| {
            let idx = (id - 1) as usize;
            let (brand_id, brand) = BRANDS[idx % BRANDS.len()];
            Item {
                id,
                name: format!("{} {id}", NAMES[idx % NAMES.len()]),
                price: 10.0 + (id as f64) * 2.5,
                category_id: 1 + (idx % NAMES.len()) as i64,
                brand_id,
                brand: brand.to_string(),
                color: if id % 2 == 0 { 101 } else { 102 },
                size: if id % 3 == 0 { 201 } else { 202 },
            }
        })
        .collect()
}

impl Item {
    pub fn child_in(&self, parent_id: i64) -> Option<i64> {
        match parent_id {
            COLOR_PARENT => Some(self.color),
            SIZE_PARENT => Some(self.size),
            _ => None,
        }
    }

    pub fn to_json(&self) -> Value {
        let is_new = i64::from(self.id <= 5);
        json!({
            "id": self.id,
            "name": self.name,
            "images": [format!("https://cdn.example.com/p/{}.jpg", self.id)],
            "url": format!("https://shop.example.com/p/{}", self.id),
            "stock": (self.id % 7).to_string(),
            "is_new": is_new,
            "buying_price": self.price + 5.0,
            "price": self.price,
            "currency_code": "TRY",
            "category_id": self.category_id,
            "brand_id": self.brand_id,
            "sku": format!("SKU-{}", self.id),
            "master_key": format!("MK-{}", self.id),
            "barcode": format!("869{:010}", self.id),
            "custom": null,
            "attributes": [
                {"parent": COLOR_PARENT, "child": self.color},
                {"parent": SIZE_PARENT, "child": self.size}
            ],
            "variants": [
                {
                    "name": "Standard",
                    "stock": 2,
                    "buying_price": self.price + 5.0,
                    "price": self.price,
                    "sku": format!("SKU-{}-S", self.id),
                    "master_key": format!("MK-{}", self.id),
                    "custom": null,
                    "attributes": {}
                }
            ],
            "brand": self.brand
        })
    }
}

pub fn attribute_parents() -> Vec<Value> {
    [(COLOR_PARENT, "Colour"), (SIZE_PARENT, "Size")]
        .into_iter()
        .map(|(id, label)| {
            json!({
                "id": id,
                "group_id": 1,
                "position": id / 10,
                "name": label,
                "regular_name": label.to_lowercase(),
                "filter_label": label,
                "filter_type": "checkbox",
                "remote_key": format!("attr-{id}"),
                "show_in_full_search": "1",
                "show_in_recommendation": 1,
                "recommendation_title": format!("Shop by {}", label.to_lowercase()),
                "is_option": 0,
                "created_at": "2024-01-01 00:00:00",
                "updated_at": "2024-01-01 00:00:00"
            })
        })
        .collect()
}

fn children() -> [(i64, i64, &'static str, &'static str); 4] {
    [
        (101, COLOR_PARENT, "Red", "#ff0000"),
        (102, COLOR_PARENT, "Black", "#000000"),
        (201, SIZE_PARENT, "S", ""),
        (202, SIZE_PARENT, "M", ""),
    ]
}

pub fn attribute_children() -> Vec<Value> {
    children()
        .into_iter()
        .map(|(id, parent_id, name, color)| {
            let color_code = if color.is_empty() { Value::Null } else { json!(color) };
            json!({
                "id": id,
                "parent_id": parent_id,
                "group_id": 1,
                "position": id % 100,
                "name": name,
                "regular_name": name.to_lowercase(),
                "filter_label": name,
                "color_code": color_code,
                "remote_key": format!("attr-{id}"),
                "created_at": "2024-01-01 00:00:00",
                "updated_at": "2024-01-01 00:00:00"
            })
        })
        .collect()
}

/// Facet block with per-child counts over `items`.
pub fn filter_attributes(items: &[&Item]) -> Vec<Value> {
    [(COLOR_PARENT, "Colour"), (SIZE_PARENT, "Size")]
        .into_iter()
        .map(|(parent_id, label)| {
            let kids: Vec<Value> = children()
                .into_iter()
                .filter(|(_, p, _, _)| *p == parent_id)
                .map(|(id, _, name, color)| {
                    let count = items
                        .iter()
                        .filter(|item| item.child_in(parent_id) == Some(id))
                        .count();
                    json!({
                        "id": id,
                        "parent_id": parent_id,
                        "group_id": 1,
                        "position": id % 100,
                        "name": name,
                        "filter_label": name,
                        "color_code": color,
                        "count": count.to_string()
                    })
                })
                .collect();
            json!({
                "id": parent_id,
                "name": label,
                "filter_label": label,
                "filter_type": "checkbox",
                "show_in_full_search": true,
                "show_in_recommendation": true,
                "recommendation_title": "",
                "is_option": false,
                "children": kids
            })
        })
        .collect()
}

pub fn popular_categories() -> Vec<Value> {
    NAMES
        .iter()
        .enumerate()
        .map(|(idx, name)| {
            let id = idx as i64 + 1;
            let highlight = id == 1;
            json!({
                "id": id,
                "name": format!("{name}s"),
                "image_url": format!("https://cdn.example.com/c/{id}.png"),
                "url": format!("https://shop.example.com/c/{id}"),
                "custom": {"highlight": highlight},
                "position": id,
                "created_at": "2024-01-01 00:00:00",
                "updated_at": "2024-01-01 00:00:00"
            })
        })
        .collect()
}

pub fn cta() -> Value {
    json!({"typing": [
        {"id": 1, "message": "Search for shoes, boots and more"},
        {"id": 2, "message": "Try \"laptop sleeve\""}
    ]})
}

pub fn settings() -> Value {
    json!({
        "status": 1,
        "language_id": "tr",
        "cta": cta(),
        "currencies": [
            currency("TRY", "₺", "1.0000", 1),
            currency("USD", "$", "0.0310", 0),
            currency("EUR", "€", "0.0285", 0)
        ],
        "subscription": {"remove_branding": "0"}
    })
}

fn currency(code: &str, symbol: &str, rate: &str, active: i64) -> Value {
    let symbol_position = i64::from(code == "TRY");
    json!({
        "currency_code": code,
        "decimal_point": ",",
        "thousands_separator": ".",
        "symbol": symbol,
        "exchange_rate": rate,
        "symbol_position": symbol_position,
        "remove_decimal_zero": 1,
        "is_active": active
    })
}

pub fn page_redirects(query: &str) -> Vec<Value> {
    if !query.to_lowercase().contains("shipping") {
        return Vec::new();
    }
    vec![json!({
        "id": 1,
        "name": "Shipping",
        "url": "https://shop.example.com/shipping",
        "auto_redirect": 0,
        "position": 0,
        "type": "page",
        "detail": {"keywords": ["shipping", "delivery"]},
        "created_at": "2024-01-01 00:00:00",
        "updated_at": "2024-01-01 00:00:00"
    })]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_is_deterministic() {
        let items = seed_items();
        assert_eq!(items.len(), 75);
        assert_eq!(items[0].name, "Running Shoe 1");
        assert_eq!(items[1].name, "Leather Boot 2");
        assert_eq!(items[2].brand, "Acme");
        assert_eq!(items.iter().filter(|i| i.name.starts_with("Laptop")).count(), 25);
    }

    #[test]
    fn filter_counts_cover_every_item() {
        let items = seed_items();
        let refs: Vec<&Item> = items.iter().collect();
        let block = filter_attributes(&refs);
        let colour_total: usize = block[0]["children"]
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["count"].as_str().unwrap().parse::<usize>().unwrap())
            .sum();
        assert_eq!(colour_total, 75);
    }

    #[test]
    fn settings_lists_three_currencies() {
        let settings = settings();
        let codes: Vec<&str> = settings["currencies"]
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["currency_code"].as_str().unwrap())
            .collect();
        assert_eq!(codes, vec!["TRY", "USD", "EUR"]);
    }
}
