// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::fmt;
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::errors::DataObjectError;
use crate::operation::Representation;

/// One row of values, positionally matching the object's [`FieldList`].
pub type Row = Vec<Value>;

/// A row keyed by field name.
pub type Record = Map<String, Value>;

pub type RowIter = Box<dyn Iterator<Item = Row> + Send>;
pub type RecordIter = Box<dyn Iterator<Item = Record> + Send>;

/// Shared handle to a data object, as passed between graph steps and operations.
pub type DataObjectRef = Arc<dyn DataObject>;

/// Contract between the dispatch core and any backend data object.
///
/// The resolver and the execution engine only ever look at
/// [`representations`](DataObject::representations),
/// [`is_consumable`](DataObject::is_consumable) and
/// [`retained`](DataObject::retained). Row access is used by the operations
/// of backends that understand the `rows`/`records` representations.
pub trait DataObject: Send + Sync + fmt::Debug {
    /// Representations this object currently provides, most preferred first.
    fn representations(&self) -> Vec<Representation>;

    /// `true` when the content can be read only once.
    fn is_consumable(&self) -> bool;

    /// Returns an equivalent object that can be read any number of times.
    ///
    /// Only meaningful for consumable objects. Calling it consumes the
    /// receiver's content.
    fn retained(&self) -> Result<DataObjectRef, DataObjectError> {
        Err(DataObjectError::NotRetainable)
    }

    fn fields(&self) -> FieldList {
        FieldList::default()
    }

    fn rows(&self) -> Result<RowIter, DataObjectError> {
        Err(DataObjectError::RepresentationUnavailable {
            representation: Representation::ROWS.to_string(),
        })
    }

    /// Rows keyed by field names. Defaults to zipping [`rows`](DataObject::rows)
    /// with [`fields`](DataObject::fields).
    fn records(&self) -> Result<RecordIter, DataObjectError> {
        let names = self.fields().names().to_vec();
        let rows = self.rows()?;
        Ok(Box::new(rows.map(move |row| {
            names.iter().cloned().zip(row).collect::<Record>()
        })))
    }
}

/// Ordered list of field names describing the columns of a row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldList(Vec<String>);

impl FieldList {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(names.into_iter().map(Into::into).collect())
    }

    pub fn names(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|field| field == name)
    }

    pub fn index(&self, name: &str) -> Result<usize, DataObjectError> {
        self.0
            .iter()
            .position(|field| field == name)
            .ok_or_else(|| DataObjectError::UnknownField {
                field: name.to_string(),
            })
    }

    pub fn indexes(&self, names: &[String]) -> Result<Vec<usize>, DataObjectError> {
        names.iter().map(|name| self.index(name)).collect()
    }

    pub fn push(&mut self, name: impl Into<String>) {
        self.0.push(name.into());
    }
}

impl fmt::Display for FieldList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.0.join(", "))
    }
}

impl From<Vec<String>> for FieldList {
    fn from(names: Vec<String>) -> Self {
        Self(names)
    }
}
