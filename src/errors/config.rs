// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::fmt;

use thiserror::Error;

use crate::errors::GraphError;

/// Errors raised while registering operation implementations.
///
/// These are setup-time programming errors: the library refuses the
/// registration and leaves the operation untouched.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    /// Signature length differs from the arity fixed by the first registration.
    #[error("Operation '{operation}' expects {expected} operands, signature ({signature}) has {found}")]
    ArityMismatch {
        operation: String,
        signature: String,
        expected: usize,
        found: usize,
    },

    /// The exact same signature is already registered for the operation.
    #[error("Operation '{operation}' with signature ({signature}) is already registered")]
    DuplicateSignature { operation: String, signature: String },

    /// The implementation declares fewer parameter names than it has operands.
    #[error("Operation '{operation}' implementation declares {declared} parameter names but needs at least {required} operand names")]
    MissingOperandNames {
        operation: String,
        declared: usize,
        required: usize,
    },
}

/// Errors found while validating a pipeline configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Two nodes share the same id
    DuplicateNodeId { node_id: String },
    /// A node declares both a `source` and an `operation`
    AmbiguousNode { node_id: String },
    /// A node declares neither a `source` nor an `operation`
    EmptyNode { node_id: String },
    /// A node input references a node that doesn't exist
    UnresolvedInput {
        node_id: String,
        outlet: String,
        missing_node: String,
    },
    /// A source node references a store that isn't configured
    UnknownStore { node_id: String, store: String },
    /// A store is configured with a type no backend provides
    UnsupportedStoreType { store: String, store_type: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::DuplicateNodeId { node_id } => {
                write!(f, "Duplicate node ID: '{}'", node_id)
            }
            ValidationError::AmbiguousNode { node_id } => {
                write!(
                    f,
                    "Node '{}' declares both a source and an operation",
                    node_id
                )
            }
            ValidationError::EmptyNode { node_id } => {
                write!(
                    f,
                    "Node '{}' declares neither a source nor an operation",
                    node_id
                )
            }
            ValidationError::UnresolvedInput {
                node_id,
                outlet,
                missing_node,
            } => {
                write!(
                    f,
                    "Node '{}' reads outlet '{}' from '{}' which does not exist",
                    node_id, outlet, missing_node
                )
            }
            ValidationError::UnknownStore { node_id, store } => {
                write!(
                    f,
                    "Node '{}' reads from store '{}' which is not configured",
                    node_id, store
                )
            }
            ValidationError::UnsupportedStoreType { store, store_type } => {
                write!(
                    f,
                    "Store '{}' has unsupported type '{}'",
                    store, store_type
                )
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Errors raised while turning a validated configuration into a runnable graph.
#[derive(Error, Debug)]
pub enum RuntimeError {
    #[error("Failed to create store '{store}': {reason}")]
    StoreCreationFailed { store: String, reason: String },

    #[error(transparent)]
    Graph(#[from] GraphError),
}
