// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Pipeline graphs: nodes connected through named outlets.

#[allow(clippy::module_inception)]
mod graph;
mod node;

pub use graph::{Connection, Graph, NodeId, NodeRef};
pub use node::Node;
