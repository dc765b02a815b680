// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::Value;

use crate::backends::local::objects::{IterableObject, RowListObject};
use crate::errors::DataObjectError;
use crate::traits::{DataObjectRef, FieldList, Row, Store};

#[derive(Debug, Clone)]
struct StoredObject {
    fields: FieldList,
    rows: Vec<Row>,
    consumable: bool,
}

/// Store serving named row sets from memory.
///
/// Consumable objects are handed out as a fresh [`IterableObject`] on every
/// request; the others as a shared [`RowListObject`]. Request parameters are
/// accepted and ignored.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    objects: BTreeMap<String, StoredObject>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces object `name`. Every row must have one value per field.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        fields: FieldList,
        rows: Vec<Row>,
        consumable: bool,
    ) -> Result<(), DataObjectError> {
        if let Some((index, row)) = rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != fields.len())
        {
            return Err(DataObjectError::FieldMismatch {
                reason: format!(
                    "row {} has {} values but {} declares {}",
                    index,
                    row.len(),
                    fields,
                    fields.len()
                ),
            });
        }

        self.objects.insert(
            name.into(),
            StoredObject {
                fields,
                rows,
                consumable,
            },
        );
        Ok(())
    }

    pub fn object_names(&self) -> impl Iterator<Item = &String> {
        self.objects.keys()
    }
}

impl Store for MemoryStore {
    fn get_object(
        &self,
        name: &str,
        _params: &BTreeMap<String, Value>,
    ) -> Result<DataObjectRef, DataObjectError> {
        let stored = self
            .objects
            .get(name)
            .ok_or_else(|| DataObjectError::NoSuchObject {
                name: name.to_string(),
            })?;

        let object: DataObjectRef = if stored.consumable {
            Arc::new(IterableObject::new(
                stored.fields.clone(),
                stored.rows.clone().into_iter(),
            ))
        } else {
            Arc::new(RowListObject::new(stored.fields.clone(), stored.rows.clone()))
        };
        Ok(object)
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_memory_store_objects() {
        let mut store = MemoryStore::new();
        store
            .insert("once", FieldList::new(["x"]), vec![vec![json!(1)]], true)
            .unwrap();
        store
            .insert("many", FieldList::new(["x"]), vec![vec![json!(1)]], false)
            .unwrap();
        let params = BTreeMap::new();

        let once = store.get_object("once", &params).unwrap();
        let many = store.get_object("many", &params).unwrap();
        assert!(once.is_consumable());
        assert!(!many.is_consumable());
        assert_eq!(once.rows().unwrap().count(), 1);
        assert_eq!(store.get_object("once", &params).unwrap().rows().unwrap().count(), 1);

        assert_eq!(
            store.get_object("missing", &params).err(),
            Some(DataObjectError::NoSuchObject { name: "missing".to_string() })
        );
        assert_eq!(store.object_names().count(), 2);
    }

    #[test]
    fn test_memory_store_rejects_ragged_rows() {
        let mut store = MemoryStore::new();
        let result = store.insert(
            "bad",
            FieldList::new(["x", "y"]),
            vec![vec![json!(1), json!(2)], vec![json!(3)]],
            false,
        );

        assert_eq!(
            result,
            Err(DataObjectError::FieldMismatch {
                reason: "row 1 has 1 values but [x, y] declares 2".to_string()
            })
        );
    }
}
