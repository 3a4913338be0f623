use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use super::{FilterAttributeParent, FromRaw};
use crate::coerce::{self, Object};
use crate::error::MappingError;

/// Facets available for the current result set plus the caller's current
/// selection.
///
/// The selection (parent id to selected child ids) is kept private and only
/// answered through [`Filter::is_selected`] and [`Filter::count_selected`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Filter {
    pub attributes: Vec<FilterAttributeParent>,
    pub price: FilterPrice,
    selected: BTreeMap<i64, Vec<i64>>,
}

/// Price bounds of the current result set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FilterPrice {
    pub min: f64,
    pub max: f64,
}

impl Filter {
    /// Total number of selected child ids across all parents.
    ///
    /// Duplicate ids under one parent are counted as many times as they occur.
    pub fn count_selected(&self) -> usize {
        self.selected.values().map(Vec::len).sum()
    }

    /// Whether `child_id` is selected under `parent_id`. Unknown ids are
    /// simply not selected.
    pub fn is_selected(&self, parent_id: i64, child_id: i64) -> bool {
        self.selected
            .get(&parent_id)
            .is_some_and(|children| children.contains(&child_id))
    }
}

impl FromRaw for Filter {
    fn from_raw(raw: &Value) -> Result<Self, MappingError> {
        let obj = coerce::as_object(raw)?;
        Ok(Self {
            attributes: coerce::list(obj, "attributes")?,
            price: coerce::nested(obj, "price")?,
            selected: selection(obj).map_err(|e| e.within("selected"))?,
        })
    }
}

impl FromRaw for FilterPrice {
    fn from_raw(raw: &Value) -> Result<Self, MappingError> {
        let obj = coerce::as_object(raw)?;
        Ok(Self {
            min: coerce::float(obj, "min")?,
            max: coerce::float(obj, "max")?,
        })
    }
}

/// Read the selection map.
///
/// Arrives either as an object keyed by parent id or, when the server's
/// encoder saw sequential keys, as an array whose index is the parent id.
fn selection(obj: &Object) -> Result<BTreeMap<i64, Vec<i64>>, MappingError> {
    let mut selected = BTreeMap::new();
    match obj.get("selected") {
        None | Some(Value::Null) => {}
        Some(Value::Object(map)) => {
            for (key, children) in map {
                let parent_id = coerce::to_int(&Value::String(key.clone())).map_err(|e| e.within(key))?;
                selected.insert(parent_id, child_ids(children).map_err(|e| e.within(key))?);
            }
        }
        Some(Value::Array(items)) => {
            for (i, children) in items.iter().enumerate() {
                let ids = child_ids(children).map_err(|e| e.within(&format!("[{i}]")))?;
                if !ids.is_empty() {
                    selected.insert(i as i64, ids);
                }
            }
        }
        Some(other) => {
            return Err(MappingError::InvalidType {
                field: String::new(),
                expected: "object",
                found: coerce::describe(other),
            })
        }
    }
    Ok(selected)
}

fn child_ids(raw: &Value) -> Result<Vec<i64>, MappingError> {
    match raw {
        Value::Null => Ok(Vec::new()),
        Value::Array(ids) => ids
            .iter()
            .enumerate()
            .map(|(i, id)| coerce::to_int(id).map_err(|e| e.within(&format!("[{i}]"))))
            .collect(),
        other => Err(MappingError::InvalidType {
            field: String::new(),
            expected: "array",
            found: coerce::describe(other),
        }),
    }
}
