// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Centralized message types for structured logging.
//!
//! Every diagnostic emitted by the resolver, graph and engine is one of the
//! types below. Each implements `Display` for the human-readable text and
//! [`StructuredLog`] to emit the event with its fields attached.
//!
//! # Organization
//!
//! * `dispatch` - operation calls, retries and experimental warnings
//! * `engine` - plan construction, step evaluation and retention
//! * `graph` - graph construction and ordering
//!
//! # Usage Pattern
//!
//! ```rust
//! use bubblegraph::observability::messages::{engine::ExecutionStarted, StructuredLog};
//!
//! let msg = ExecutionStarted { step_count: 5 };
//!
//! msg.log();
//! ```

use tracing::Span;

pub mod dispatch;
pub mod engine;
pub mod graph;

/// A message that knows its own log level and structured fields.
pub trait StructuredLog {
    /// Emits the message as a tracing event.
    fn log(&self);

    /// Opens a span carrying the message's fields.
    fn span(&self, name: &str) -> Span;
}
