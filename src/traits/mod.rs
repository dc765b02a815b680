// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod data_object;
pub mod observer;
pub mod store;

pub use data_object::{
    DataObject, DataObjectRef, FieldList, Record, RecordIter, Row, RowIter,
};
pub use observer::DispatchObserver;
pub use store::Store;
