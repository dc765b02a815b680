// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    #[error("Node with name '{0}' already exists")]
    DuplicateNodeName(String),

    #[error("Unable to find node '{0}'")]
    UnknownNode(String),

    #[error("Target '{target}' already has a connection for outlet '{outlet}'")]
    OutletAlreadyBound { target: String, outlet: String },

    #[error("No node name provided")]
    EmptyNodeName,

    /// Edges remained after every zero in-degree node was removed.
    #[error("Graph has at least one cycle ({remaining} connections left of {total})")]
    CycleDetected { remaining: usize, total: usize },
}
