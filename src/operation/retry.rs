// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::HashSet;

use crate::errors::{DataObjectError, DispatchError};
use crate::operation::Signature;
use crate::traits::DataObjectRef;

/// Request from an implementation to abandon its attempt and let the resolver
/// try another candidate.
///
/// With an `alternative` the named signature is tried next; without one the
/// resolver continues with the next candidate in resolution order.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryRequest {
    pub alternative: Option<Signature>,
    pub reason: String,
}

impl RetryRequest {
    pub fn next(reason: impl Into<String>) -> Self {
        Self {
            alternative: None,
            reason: reason.into(),
        }
    }

    pub fn with(signature: impl Into<Signature>, reason: impl Into<String>) -> Self {
        Self {
            alternative: Some(signature.into()),
            reason: reason.into(),
        }
    }
}

/// Ways an implementation can decline to return a result.
#[derive(Debug, Clone, PartialEq)]
pub enum OperationError {
    Retry(RetryRequest),
    Failed(DataObjectError),
    /// A nested call made through the dispatch context failed.
    Dispatch(Box<DispatchError>),
}

impl OperationError {
    pub fn retry(reason: impl Into<String>) -> Self {
        OperationError::Retry(RetryRequest::next(reason))
    }

    pub fn retry_with(signature: impl Into<Signature>, reason: impl Into<String>) -> Self {
        OperationError::Retry(RetryRequest::with(signature, reason))
    }
}

impl From<DataObjectError> for OperationError {
    fn from(error: DataObjectError) -> Self {
        OperationError::Failed(error)
    }
}

impl From<RetryRequest> for OperationError {
    fn from(request: RetryRequest) -> Self {
        OperationError::Retry(request)
    }
}

impl From<DispatchError> for OperationError {
    fn from(error: DispatchError) -> Self {
        OperationError::Dispatch(Box::new(error))
    }
}

pub type OperationResult = Result<DataObjectRef, OperationError>;

/// Which operations may hand dispatch to another candidate.
///
/// By default every operation may retry. Names on the deny list never may;
/// when the allow list is non-empty only names on it may.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RetryPolicy {
    allow: HashSet<String>,
    deny: HashSet<String>,
}

impl RetryPolicy {
    pub fn new<A, D, S>(allow: A, deny: D) -> Self
    where
        A: IntoIterator<Item = S>,
        D: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allow: allow.into_iter().map(Into::into).collect(),
            deny: deny.into_iter().map(Into::into).collect(),
        }
    }

    pub fn can_retry(&self, operation: &str) -> bool {
        if self.deny.contains(operation) {
            return false;
        }
        self.allow.is_empty() || self.allow.contains(operation)
    }
}
