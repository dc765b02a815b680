// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for operation dispatch events.

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// An implementation is about to be invoked.
///
/// # Log Level
/// `debug!` - Emitted for every attempt
///
/// # Example
/// ```
/// use bubblegraph::observability::messages::dispatch::OperationCalled;
///
/// let msg = OperationCalled {
///     operation: "distinct",
///     signature: "rows",
/// };
///
/// tracing::debug!("{}", msg);
/// ```
pub struct OperationCalled<'a> {
    pub operation: &'a str,
    pub signature: &'a str,
}

impl Display for OperationCalled<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Calling {}({})", self.operation, self.signature)
    }
}

impl StructuredLog for OperationCalled<'_> {
    fn log(&self) {
        tracing::debug!(
            operation = self.operation,
            signature = self.signature,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "operation_call",
            span_name = name,
            operation = self.operation,
            signature = self.signature,
        )
    }
}

/// An implementation returned a result.
///
/// # Log Level
/// `debug!` - Emitted once per successful dispatch
pub struct OperationCompleted<'a> {
    pub operation: &'a str,
    pub signature: &'a str,
    pub retries: usize,
}

impl Display for OperationCompleted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Completed {}({}) after {} retries",
            self.operation, self.signature, self.retries
        )
    }
}

impl StructuredLog for OperationCompleted<'_> {
    fn log(&self) {
        tracing::debug!(
            operation = self.operation,
            signature = self.signature,
            retries = self.retries,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "operation_completed",
            span_name = name,
            operation = self.operation,
            signature = self.signature,
            retries = self.retries,
        )
    }
}

/// An implementation declined and asked for another candidate.
///
/// # Log Level
/// `info!` - Fallbacks are worth seeing in normal operation
///
/// # Example
/// ```
/// use bubblegraph::observability::messages::dispatch::OperationRetried;
///
/// let msg = OperationRetried {
///     operation: "join_details",
///     signature: "sql, sql",
///     reason: "objects live in different databases",
/// };
///
/// assert!(msg.to_string().contains("different databases"));
/// ```
pub struct OperationRetried<'a> {
    pub operation: &'a str,
    pub signature: &'a str,
    pub reason: &'a str,
}

impl Display for OperationRetried<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Retrying {}({}): {}",
            self.operation, self.signature, self.reason
        )
    }
}

impl StructuredLog for OperationRetried<'_> {
    fn log(&self) {
        tracing::info!(
            operation = self.operation,
            signature = self.signature,
            reason = self.reason,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "operation_retried",
            span_name = name,
            operation = self.operation,
            signature = self.signature,
            reason = self.reason,
        )
    }
}

/// A dispatch ended in an error.
///
/// # Log Level
/// `warn!` - The error is also returned to the caller
///
/// # Example
/// ```
/// use bubblegraph::errors::DispatchError;
/// use bubblegraph::observability::messages::dispatch::DispatchFailed;
///
/// let error = DispatchError::RetryNotAllowed {
///     operation: "distinct".to_string(),
/// };
/// let msg = DispatchFailed {
///     operation: "distinct",
///     signature: "sql",
///     error: &error,
/// };
///
/// assert!(msg.to_string().starts_with("Dispatch of distinct(sql) failed"));
/// ```
pub struct DispatchFailed<'a> {
    pub operation: &'a str,
    pub signature: &'a str,
    pub error: &'a dyn std::error::Error,
}

impl Display for DispatchFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Dispatch of {}({}) failed: {}",
            self.operation, self.signature, self.error
        )
    }
}

impl StructuredLog for DispatchFailed<'_> {
    fn log(&self) {
        tracing::warn!(
            operation = self.operation,
            signature = self.signature,
            error = %self.error,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!(
            "dispatch_failed",
            span_name = name,
            operation = self.operation,
            signature = self.signature,
        )
    }
}

/// An operation marked experimental was called.
///
/// # Log Level
/// `warn!` - Experimental operations may change behavior
pub struct ExperimentalOperationCalled<'a> {
    pub operation: &'a str,
}

impl Display for ExperimentalOperationCalled<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Operation '{}' is experimental and might not work as expected",
            self.operation
        )
    }
}

impl StructuredLog for ExperimentalOperationCalled<'_> {
    fn log(&self) {
        tracing::warn!(operation = self.operation, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!(
            "experimental_operation",
            span_name = name,
            operation = self.operation,
        )
    }
}

/// Fields of a data object passing through `debug_fields`.
///
/// # Log Level
/// `info!` - Explicitly requested by the pipeline
pub struct FieldsInspected<'a> {
    pub label: Option<&'a str>,
    pub fields: &'a str,
}

impl Display for FieldsInspected<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self.label {
            Some(label) => write!(f, "fields ({}): {}", label, self.fields),
            None => write!(f, "fields: {}", self.fields),
        }
    }
}

impl StructuredLog for FieldsInspected<'_> {
    fn log(&self) {
        tracing::info!(label = self.label, fields = self.fields, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "fields_inspected",
            span_name = name,
            label = self.label,
            fields = self.fields,
        )
    }
}
