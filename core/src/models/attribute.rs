//! Facet taxonomy records.
//!
//! Three shapes of the same parent/child taxonomy come back from the API:
//!
//! - [`AttributeParent`] / [`AttributeChild`] arrive as two flat lists. A
//!   child points at its parent through `parent_id` but is owned by whichever
//!   list holds it.
//! - [`FilterAttributeParent`] embeds its [`FilterAttributeChild`] list and
//!   each child carries a result `count`.
//! - [`RelatingAttributeParent`] embeds [`RelatingAttributeChild`] values
//!   inside a recommendation's relating block.
//!
//! An embedded child's `parent_id` is taken from the payload as sent.

use serde::Serialize;
use serde_json::Value;

use super::FromRaw;
use crate::coerce;
use crate::error::MappingError;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttributeParent {
    pub id: i64,
    pub group_id: i64,
    pub position: i64,
    pub name: String,
    pub regular_name: String,
    pub filter_label: String,
    pub filter_type: String,
    pub remote_key: String,
    pub show_in_full_search: bool,
    pub show_in_recommendation: bool,
    pub recommendation_title: String,
    pub is_option: bool,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttributeChild {
    pub id: i64,
    pub parent_id: i64,
    pub group_id: i64,
    pub position: i64,
    pub name: String,
    pub regular_name: String,
    pub filter_label: String,
    pub color_code: String,
    pub remote_key: String,
    pub created_at: String,
    pub updated_at: String,
}

/// A facet offered by the filter panel, with its selectable values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterAttributeParent {
    pub id: i64,
    pub name: String,
    pub filter_label: String,
    pub filter_type: String,
    pub show_in_full_search: bool,
    pub show_in_recommendation: bool,
    pub recommendation_title: String,
    pub is_option: bool,
    /// In source order.
    pub children: Vec<FilterAttributeChild>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterAttributeChild {
    pub id: i64,
    pub parent_id: i64,
    pub group_id: i64,
    pub position: i64,
    pub name: String,
    pub filter_label: String,
    pub color_code: String,
    /// Number of results carrying this value.
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RelatingAttributeParent {
    pub id: i64,
    pub name: String,
    pub filter_label: String,
    pub filter_type: String,
    pub show_in_full_search: bool,
    pub show_in_recommendation: bool,
    pub recommendation_title: String,
    pub is_option: bool,
    pub children: Vec<RelatingAttributeChild>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RelatingAttributeChild {
    pub id: i64,
    pub parent_id: i64,
    pub group_id: i64,
    pub position: i64,
    pub name: String,
    pub filter_label: String,
    pub color_code: String,
}

impl AttributeParent {
    /// Children of this parent found in `pool`, in pool order.
    pub fn children_in<'a>(
        &self,
        pool: &'a [AttributeChild],
    ) -> impl Iterator<Item = &'a AttributeChild> + 'a {
        let id = self.id;
        pool.iter().filter(move |child| child.parent_id == id)
    }
}

impl FromRaw for AttributeParent {
    fn from_raw(raw: &Value) -> Result<Self, MappingError> {
        let obj = coerce::as_object(raw)?;
        Ok(Self {
            id: coerce::int(obj, "id")?,
            group_id: coerce::int(obj, "group_id")?,
            position: coerce::int(obj, "position")?,
            name: coerce::string(obj, "name")?,
            regular_name: coerce::string(obj, "regular_name")?,
            filter_label: coerce::string(obj, "filter_label")?,
            filter_type: coerce::string(obj, "filter_type")?,
            remote_key: coerce::string(obj, "remote_key")?,
            show_in_full_search: coerce::boolean(obj, "show_in_full_search")?,
            show_in_recommendation: coerce::boolean(obj, "show_in_recommendation")?,
            recommendation_title: coerce::string(obj, "recommendation_title")?,
            is_option: coerce::boolean(obj, "is_option")?,
            created_at: coerce::string(obj, "created_at")?,
            updated_at: coerce::string(obj, "updated_at")?,
        })
    }
}

impl FromRaw for AttributeChild {
    fn from_raw(raw: &Value) -> Result<Self, MappingError> {
        let obj = coerce::as_object(raw)?;
        Ok(Self {
            id: coerce::int(obj, "id")?,
            parent_id: coerce::int(obj, "parent_id")?,
            group_id: coerce::int(obj, "group_id")?,
            position: coerce::int(obj, "position")?,
            name: coerce::string(obj, "name")?,
            regular_name: coerce::string(obj, "regular_name")?,
            filter_label: coerce::string(obj, "filter_label")?,
            color_code: coerce::string(obj, "color_code")?,
            remote_key: coerce::string(obj, "remote_key")?,
            created_at: coerce::string(obj, "created_at")?,
            updated_at: coerce::string(obj, "updated_at")?,
        })
    }
}

impl FromRaw for FilterAttributeParent {
    fn from_raw(raw: &Value) -> Result<Self, MappingError> {
        let obj = coerce::as_object(raw)?;
        Ok(Self {
            id: coerce::int(obj, "id")?,
            name: coerce::string(obj, "name")?,
            filter_label: coerce::string(obj, "filter_label")?,
            filter_type: coerce::string(obj, "filter_type")?,
            show_in_full_search: coerce::boolean(obj, "show_in_full_search")?,
            show_in_recommendation: coerce::boolean(obj, "show_in_recommendation")?,
            recommendation_title: coerce::string(obj, "recommendation_title")?,
            is_option: coerce::boolean(obj, "is_option")?,
            children: coerce::list(obj, "children")?,
        })
    }
}

impl FromRaw for FilterAttributeChild {
    fn from_raw(raw: &Value) -> Result<Self, MappingError> {
        let obj = coerce::as_object(raw)?;
        Ok(Self {
            id: coerce::int(obj, "id")?,
            parent_id: coerce::int(obj, "parent_id")?,
            group_id: coerce::int(obj, "group_id")?,
            position: coerce::int(obj, "position")?,
            name: coerce::string(obj, "name")?,
            filter_label: coerce::string(obj, "filter_label")?,
            color_code: coerce::string(obj, "color_code")?,
            count: coerce::int(obj, "count")?,
        })
    }
}

impl FromRaw for RelatingAttributeParent {
    fn from_raw(raw: &Value) -> Result<Self, MappingError> {
        let obj = coerce::as_object(raw)?;
        Ok(Self {
            id: coerce::int(obj, "id")?,
            name: coerce::string(obj, "name")?,
            filter_label: coerce::string(obj, "filter_label")?,
            filter_type: coerce::string(obj, "filter_type")?,
            show_in_full_search: coerce::boolean(obj, "show_in_full_search")?,
            show_in_recommendation: coerce::boolean(obj, "show_in_recommendation")?,
            recommendation_title: coerce::string(obj, "recommendation_title")?,
            is_option: coerce::boolean(obj, "is_option")?,
            children: coerce::list(obj, "children")?,
        })
    }
}

impl FromRaw for RelatingAttributeChild {
    fn from_raw(raw: &Value) -> Result<Self, MappingError> {
        let obj = coerce::as_object(raw)?;
        Ok(Self {
            id: coerce::int(obj, "id")?,
            parent_id: coerce::int(obj, "parent_id")?,
            group_id: coerce::int(obj, "group_id")?,
            position: coerce::int(obj, "position")?,
            name: coerce::string(obj, "name")?,
            filter_label: coerce::string(obj, "filter_label")?,
            color_code: coerce::string(obj, "color_code")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures;
    use serde_json::json;

    #[test]
    fn maps_attribute_parent_with_coerced_flags() {
        let parent = AttributeParent::from_raw(&fixtures::attribute_parent(10)).unwrap();
        assert_eq!(parent.id, 10);
        assert!(parent.show_in_full_search);
        assert!(!parent.show_in_recommendation);
        assert!(parent.is_option);
        assert_eq!(parent.remote_key, "rk-10");
    }

    #[test]
    fn children_in_filters_pool_by_parent() {
        let parent = AttributeParent::from_raw(&fixtures::attribute_parent(10)).unwrap();
        let pool: Vec<AttributeChild> = [(101, 10), (201, 20), (102, 10)]
            .iter()
            .map(|&(id, p)| AttributeChild::from_raw(&fixtures::attribute_child(id, p)).unwrap())
            .collect();
        let ids: Vec<i64> = parent.children_in(&pool).map(|c| c.id).collect();
        assert_eq!(ids, vec![101, 102]);
    }

    #[test]
    fn maps_attribute_child_back_reference() {
        let child = AttributeChild::from_raw(&fixtures::attribute_child(101, 10)).unwrap();
        assert_eq!(child.parent_id, 10);
        assert_eq!(child.color_code, "#ff0000");
    }

    #[test]
    fn filter_parent_keeps_child_order_and_counts() {
        let raw = fixtures::filter_parent(
            10,
            vec![
                fixtures::filter_child(103, 10, json!(5)),
                fixtures::filter_child(101, 10, json!("12")),
                fixtures::filter_child(102, 10, json!(0)),
            ],
        );
        let parent = FilterAttributeParent::from_raw(&raw).unwrap();
        let ids: Vec<i64> = parent.children.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![103, 101, 102]);
        assert_eq!(parent.children[1].count, 12);
        assert!(parent.children.iter().all(|c| c.parent_id == parent.id));
        assert_eq!(parent.children[0].color_code, "");
    }

    #[test]
    fn filter_child_keeps_its_own_parent_id() {
        let raw = fixtures::filter_parent(
            10,
            vec![
                fixtures::filter_child(101, 10, json!(1)),
                fixtures::filter_child(201, 20, json!(1)),
            ],
        );
        let parent = FilterAttributeParent::from_raw(&raw).unwrap();
        let parents: Vec<i64> = parent.children.iter().map(|c| c.parent_id).collect();
        assert_eq!(parents, vec![10, 20]);
    }

    #[test]
    fn filter_parent_without_children_has_empty_list() {
        let mut raw = fixtures::filter_parent(10, Vec::new());
        raw.as_object_mut().unwrap().remove("children");
        let parent = FilterAttributeParent::from_raw(&raw).unwrap();
        assert!(parent.children.is_empty());
    }

    #[test]
    fn relating_parent_maps_children() {
        let raw = json!({
            "id": 4,
            "name": "Size",
            "filter_label": "Size",
            "filter_type": "list",
            "show_in_full_search": "0",
            "show_in_recommendation": "1",
            "recommendation_title": "Sizes",
            "is_option": false,
            "children": [
                {"id": 41, "parent_id": "4", "group_id": 1, "position": 0,
                 "name": "S", "filter_label": "S", "color_code": ""}
            ]
        });
        let parent = RelatingAttributeParent::from_raw(&raw).unwrap();
        assert!(!parent.show_in_full_search);
        assert!(parent.show_in_recommendation);
        assert_eq!(parent.children.len(), 1);
        assert_eq!(parent.children[0].parent_id, 4);
    }

    #[test]
    fn filter_child_count_must_be_numeric() {
        let raw = fixtures::filter_parent(10, vec![fixtures::filter_child(101, 10, json!("many"))]);
        let err = FilterAttributeParent::from_raw(&raw).unwrap_err();
        assert_eq!(err.field(), "children[0].count");
    }
}
