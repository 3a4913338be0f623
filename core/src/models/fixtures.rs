//! Raw payload builders shared by the mapper tests.

use serde_json::{json, Value};

pub(crate) fn variant(name: &str, price: f64) -> Value {
    json!({
        "name": name,
        "stock": 4,
        "buying_price": 25.0,
        "price": price,
        "sku": format!("SKU-{name}"),
        "master_key": "MK-1",
        "custom": null,
        "attributes": {"size": name}
    })
}

pub(crate) fn product(id: i64) -> Value {
    json!({
        "id": id,
        "name": format!("Product {id}"),
        "images": [
            format!("https://cdn.example.com/{id}-a.jpg"),
            format!("https://cdn.example.com/{id}-b.jpg")
        ],
        "url": format!("https://shop.example.com/p/{id}"),
        "stock": 10,
        "is_new": true,
        "buying_price": 24.0,
        "price": 19.99,
        "currency_code": "TRY",
        "category_id": 3,
        "brand_id": 8,
        "sku": format!("SKU-{id}"),
        "master_key": format!("MK-{id}"),
        "barcode": "8690000000000",
        "custom": {"badge": "eco"},
        "attributes": [{"parent": 10, "child": 101}],
        "variants": [variant("L", 19.99), variant("XL", 21.5)],
        "brand": "Acme"
    })
}

pub(crate) fn attribute_parent(id: i64) -> Value {
    json!({
        "id": id,
        "group_id": 1,
        "position": 2,
        "name": format!("Parent {id}"),
        "regular_name": format!("parent-{id}"),
        "filter_label": "Colour",
        "filter_type": "checkbox",
        "remote_key": format!("rk-{id}"),
        "show_in_full_search": 1,
        "show_in_recommendation": 0,
        "recommendation_title": "Pick a colour",
        "is_option": "1",
        "created_at": "2024-01-01 10:00:00",
        "updated_at": "2024-02-01 10:00:00"
    })
}

pub(crate) fn attribute_child(id: i64, parent_id: i64) -> Value {
    json!({
        "id": id,
        "parent_id": parent_id,
        "group_id": 1,
        "position": 0,
        "name": format!("Child {id}"),
        "regular_name": format!("child-{id}"),
        "filter_label": "Red",
        "color_code": "#ff0000",
        "remote_key": format!("rk-{id}"),
        "created_at": "2024-01-01 10:00:00",
        "updated_at": "2024-02-01 10:00:00"
    })
}

pub(crate) fn filter_child(id: i64, parent_id: i64, count: Value) -> Value {
    json!({
        "id": id,
        "parent_id": parent_id,
        "group_id": 1,
        "position": 0,
        "name": format!("Child {id}"),
        "filter_label": "Red",
        "color_code": null,
        "count": count
    })
}

pub(crate) fn filter_parent(id: i64, children: Vec<Value>) -> Value {
    json!({
        "id": id,
        "name": format!("Parent {id}"),
        "filter_label": "Colour",
        "filter_type": "checkbox",
        "show_in_full_search": true,
        "show_in_recommendation": false,
        "recommendation_title": "",
        "is_option": 0,
        "children": children
    })
}

pub(crate) fn popular_category(id: i64) -> Value {
    json!({
        "id": id,
        "name": format!("Category {id}"),
        "image_url": format!("https://cdn.example.com/c{id}.png"),
        "url": format!("https://shop.example.com/c/{id}"),
        "custom": {"segments": ["vip"]},
        "position": id,
        "created_at": "2024-01-01 10:00:00",
        "updated_at": "2024-02-01 10:00:00"
    })
}

pub(crate) fn page_redirect(id: i64) -> Value {
    json!({
        "id": id,
        "name": "Shipping",
        "url": "https://shop.example.com/shipping",
        "auto_redirect": 1,
        "position": 0,
        "type": "page",
        "detail": {"keywords": ["cargo", "delivery"]},
        "created_at": "2024-01-01 10:00:00",
        "updated_at": "2024-02-01 10:00:00"
    })
}

pub(crate) fn currency(code: &str, active: i64) -> Value {
    json!({
        "currency_code": code,
        "decimal_point": ",",
        "thousands_separator": ".",
        "symbol": "₺",
        "exchange_rate": "1.0000",
        "symbol_position": 1,
        "remove_decimal_zero": 1,
        "is_active": active
    })
}
