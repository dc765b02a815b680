// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use thiserror::Error;

use crate::errors::{DataObjectError, DispatchError, GraphError};

/// Errors that abort plan construction or a run of the execution engine.
///
/// Steps evaluated before the failure keep their side effects; there is no
/// rollback.
#[derive(Error, Debug)]
pub enum ExecutionError {
    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    #[error("Outlet '{outlet}' of node '{node}' is not connected")]
    UnboundOutlet { node: String, outlet: String },

    #[error("Unknown store '{store}' referenced by node '{node}'")]
    UnknownStore { node: String, store: String },

    #[error("Source node '{node}' failed: {source}")]
    SourceFailed {
        node: String,
        #[source]
        source: DataObjectError,
    },

    #[error("Failed to retain output of node '{node}': {source}")]
    RetentionFailed {
        node: String,
        #[source]
        source: DataObjectError,
    },

    #[error("Internal error: {message}")]
    InternalError { message: String },
}
