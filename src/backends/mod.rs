// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Backend implementations of data objects, stores and operations.
//!
//! # Available Backends
//!
//! ## Local Backend
//! In-process row data held in memory:
//! - **Objects**: `RowListObject` (re-readable) and `IterableObject` (single pass)
//! - **Stores**: `MemoryStore`, created from configuration by `StoreFactory`
//! - **Operations**: row operations (`distinct`, `sort`, `join_details`, ...) and
//!   representation-agnostic helpers (`keep_fields`, `debug_fields`, ...)
//!
//! ## Stub Backend (Test-Only)
//! Testing utilities for resolver and engine development (only available in test builds):
//! - **StubObject**: Object with fixed representations that counts retentions
//! - **CallLog**: Records which implementation ran, in order
//! - **Note**: NOT available in production builds
//!
//! # Architecture
//!
//! ```text
//! Configuration -> StoreFactory -> Store -> source nodes -> operations -> results
//! ```
//!
//! # Examples
//!
//! ```rust
//! use bubblegraph::backends::local::{local_library, MemoryStore};
//! use bubblegraph::engine::ExecutionEngine;
//! use bubblegraph::graph::{Graph, Node};
//! use bubblegraph::operation::Resolver;
//! use bubblegraph::traits::FieldList;
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! let mut store = MemoryStore::new();
//! store.insert("data", FieldList::new(["x"]), vec![vec![json!(2)], vec![json!(1)]], true)?;
//!
//! let mut graph = Graph::new();
//! graph.add(Node::store("default", "data"), Some("source"))?;
//! graph.add(Node::operation("sort").with_kwarg("orderby", "x"), Some("sorted"))?;
//! graph.connect("source", "sorted")?;
//!
//! let engine = ExecutionEngine::new(Resolver::new(local_library()?))
//!     .with_store("default", Arc::new(store));
//! let results = engine.run(&graph)?;
//! let rows: Vec<_> = results.by_name("sorted").unwrap().rows()?.collect();
//! assert_eq!(rows, vec![vec![json!(1)], vec![json!(2)]]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod local;
#[cfg(test)]
pub mod stub;
