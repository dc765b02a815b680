// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! In-memory data objects.

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use crate::errors::DataObjectError;
use crate::operation::Representation;
use crate::traits::{DataObject, DataObjectRef, FieldList, Row, RowIter};

/// Materialized rows that can be read any number of times.
#[derive(Debug, Clone, PartialEq)]
pub struct RowListObject {
    fields: FieldList,
    rows: Arc<Vec<Row>>,
}

impl RowListObject {
    pub fn new(fields: FieldList, rows: Vec<Row>) -> Self {
        Self {
            fields,
            rows: Arc::new(rows),
        }
    }
}

impl DataObject for RowListObject {
    fn representations(&self) -> Vec<Representation> {
        vec![Representation::ROWS, Representation::RECORDS]
    }

    fn is_consumable(&self) -> bool {
        false
    }

    fn retained(&self) -> Result<DataObjectRef, DataObjectError> {
        Ok(Arc::new(self.clone()))
    }

    fn fields(&self) -> FieldList {
        self.fields.clone()
    }

    fn rows(&self) -> Result<RowIter, DataObjectError> {
        let rows = Arc::clone(&self.rows);
        Ok(Box::new((0..rows.len()).map(move |index| rows[index].clone())))
    }
}

/// Rows produced lazily by an iterator; readable once.
///
/// [`retained`](DataObject::retained) drains the iterator into a
/// [`RowListObject`]. Any read after that, or after a first
/// [`rows`](DataObject::rows) call, fails with [`DataObjectError::Consumed`].
pub struct IterableObject {
    fields: FieldList,
    iterator: Mutex<Option<RowIter>>,
}

impl IterableObject {
    pub fn new<I>(fields: FieldList, rows: I) -> Self
    where
        I: Iterator<Item = Row> + Send + 'static,
    {
        Self {
            fields,
            iterator: Mutex::new(Some(Box::new(rows))),
        }
    }

    fn take(&self) -> Result<RowIter, DataObjectError> {
        self.iterator
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
            .ok_or(DataObjectError::Consumed)
    }

    pub fn is_consumed(&self) -> bool {
        self.iterator
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_none()
    }
}

impl fmt::Debug for IterableObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IterableObject")
            .field("fields", &self.fields)
            .field("consumed", &self.is_consumed())
            .finish()
    }
}

impl DataObject for IterableObject {
    fn representations(&self) -> Vec<Representation> {
        vec![Representation::ROWS, Representation::RECORDS]
    }

    fn is_consumable(&self) -> bool {
        true
    }

    fn retained(&self) -> Result<DataObjectRef, DataObjectError> {
        let rows: Vec<Row> = self.take()?.collect();
        Ok(Arc::new(RowListObject::new(self.fields.clone(), rows)))
    }

    fn fields(&self) -> FieldList {
        self.fields.clone()
    }

    fn rows(&self) -> Result<RowIter, DataObjectError> {
        self.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rows() -> Vec<Row> {
        vec![vec![json!(1), json!("a")], vec![json!(2), json!("b")]]
    }

    #[test]
    fn test_row_list_is_rereadable() {
        let object = RowListObject::new(FieldList::new(["id", "name"]), rows());

        assert_eq!(object.rows().unwrap().collect::<Vec<_>>(), rows());
        assert_eq!(object.rows().unwrap().count(), 2);
        assert!(!object.is_consumable());

        let records: Vec<_> = object.records().unwrap().collect();
        assert_eq!(records[1].get("name"), Some(&json!("b")));
    }

    #[test]
    fn test_iterable_reads_once() {
        let object = IterableObject::new(FieldList::new(["id", "name"]), rows().into_iter());

        assert!(object.is_consumable());
        assert_eq!(object.rows().unwrap().count(), 2);
        assert!(object.is_consumed());
        assert_eq!(object.rows().err(), Some(DataObjectError::Consumed));
        assert_eq!(object.retained().err(), Some(DataObjectError::Consumed));
    }

    #[test]
    fn test_iterable_retention() {
        let object = IterableObject::new(FieldList::new(["id", "name"]), rows().into_iter());

        let retained = object.retained().unwrap();

        assert!(!retained.is_consumable());
        assert_eq!(retained.fields(), FieldList::new(["id", "name"]));
        assert_eq!(retained.rows().unwrap().collect::<Vec<_>>(), rows());
        assert_eq!(retained.rows().unwrap().collect::<Vec<_>>(), rows());
        assert!(object.rows().is_err());
    }
}
