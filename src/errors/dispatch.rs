// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use thiserror::Error;

use crate::errors::DataObjectError;

/// Errors raised by the resolver while dispatching an operation call.
///
/// All of them are fatal for the call: the resolver never retries on its own
/// beyond the retry requests returned by implementations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DispatchError {
    #[error("Operation '{0}' not found")]
    UnknownOperation(String),

    #[error("Operation '{operation}' expects {expected} operands, got {found}")]
    OperandCount {
        operation: String,
        expected: usize,
        found: usize,
    },

    /// A list operand without members has no representations to dispatch on.
    #[error("Operand {position} of operation '{operation}' is an empty list")]
    EmptyListOperand { operation: String, position: usize },

    #[error("No matching signature found for operation '{operation}' (args: {representations})")]
    NoMatchingSignature {
        operation: String,
        representations: String,
    },

    #[error("No signature ({signature}) in operation '{operation}'")]
    UnknownSignature { operation: String, signature: String },

    #[error("Retry of operation '{operation}' is not allowed")]
    RetryNotAllowed { operation: String },

    #[error("Asked to retry operation '{operation}' with signature ({signature}), but it was already visited")]
    SignatureAlreadyVisited { operation: String, signature: String },

    #[error("No remaining signature to retry when calling operation '{operation}' with ({first_signature})")]
    ResolutionExhausted {
        operation: String,
        first_signature: String,
    },

    #[error("Operation '{operation}' ({signature}) failed: {source}")]
    OperationFailed {
        operation: String,
        signature: String,
        #[source]
        source: DataObjectError,
    },
}
