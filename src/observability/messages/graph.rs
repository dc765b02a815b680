// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for graph construction and ordering.

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// A node was added to a graph.
///
/// # Log Level
/// `trace!` - Construction detail
pub struct NodeAdded<'a> {
    pub node: &'a str,
    pub kind: &'a str,
}

impl Display for NodeAdded<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Added {} node '{}'", self.kind, self.node)
    }
}

impl StructuredLog for NodeAdded<'_> {
    fn log(&self) {
        tracing::trace!(node = self.node, kind = self.kind, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::trace_span!(
            "node_added",
            span_name = name,
            node = self.node,
            kind = self.kind,
        )
    }
}

/// Topological sort failed (cyclic dependency detected).
///
/// # Log Level
/// `error!` - Failure requiring attention
///
/// # Example
/// ```
/// use bubblegraph::observability::messages::graph::TopologicalSortFailed;
///
/// let msg = TopologicalSortFailed {
///     remaining: 2,
///     total: 5,
/// };
///
/// tracing::error!("{}", msg);
/// ```
pub struct TopologicalSortFailed {
    pub remaining: usize,
    pub total: usize,
}

impl Display for TopologicalSortFailed {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Topological sort failed: {} of {} connections remain in a cycle",
            self.remaining, self.total
        )
    }
}

impl StructuredLog for TopologicalSortFailed {
    fn log(&self) {
        tracing::error!(
            remaining = self.remaining,
            total = self.total,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::error_span!(
            "topological_sort_failed",
            span_name = name,
            remaining = self.remaining,
            total = self.total,
        )
    }
}
