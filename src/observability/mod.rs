// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Observability module for structured logging and dispatch auditing.
//!
//! Message types follow a struct-based pattern with `Display` and
//! [`messages::StructuredLog`] implementations so that log text and fields
//! are defined in one place rather than scattered through the engine.
//!
//! # Architecture
//!
//! * `messages::dispatch` - resolver attempts, retries and completions
//! * `messages::engine` - plan and run lifecycle
//! * `messages::graph` - graph construction and ordering
//! * `observers` - [`crate::traits::DispatchObserver`] implementations
//!
//! # Usage
//!
//! ```rust
//! use bubblegraph::observability::messages::dispatch::OperationRetried;
//!
//! let msg = OperationRetried {
//!     operation: "distinct",
//!     signature: "sql",
//!     reason: "statement is not composable",
//! };
//!
//! tracing::info!("{}", msg);
//! ```

pub mod messages;
pub mod observers;

pub use observers::{CollectingObserver, DispatchRecord, TracingObserver};
