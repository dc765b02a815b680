// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Dispatch observers shipped with the crate.

use std::sync::{Mutex, PoisonError};

use crate::errors::DispatchError;
use crate::observability::messages::dispatch::{
    DispatchFailed, OperationCalled, OperationCompleted, OperationRetried,
};
use crate::observability::messages::StructuredLog;
use crate::operation::Signature;
use crate::traits::DispatchObserver;

/// Logs every dispatch event through `tracing`. This is the resolver default.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl DispatchObserver for TracingObserver {
    fn will_call_operation(&self, operation: &str, signature: &Signature) {
        OperationCalled {
            operation,
            signature: &signature.to_string(),
        }
        .log();
    }

    fn will_retry_operation(&self, operation: &str, signature: &Signature, reason: &str) {
        OperationRetried {
            operation,
            signature: &signature.to_string(),
            reason,
        }
        .log();
    }

    fn did_call_operation(&self, operation: &str, signature: &Signature, retries: usize) {
        OperationCompleted {
            operation,
            signature: &signature.to_string(),
            retries,
        }
        .log();
    }

    fn did_fail_operation(&self, operation: &str, signature: &Signature, error: &DispatchError) {
        DispatchFailed {
            operation,
            signature: &signature.to_string(),
            error,
        }
        .log();
    }
}

/// One completed dispatch as seen by a [`CollectingObserver`].
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchRecord {
    pub operation: String,
    /// Signature whose implementation produced the result, or the last one
    /// attempted when the dispatch failed.
    pub signature: Signature,
    pub retries: usize,
    /// Signatures that declined, with their reasons, in attempt order.
    pub tried: Vec<(Signature, String)>,
    /// `None` for a successful dispatch.
    pub error: Option<String>,
}

#[derive(Debug)]
struct Frame {
    operation: String,
    attempting: bool,
    tried: Vec<(Signature, String)>,
}

/// Records a history of dispatches, failed ones included.
///
/// Nested calls made from inside an implementation are recorded before the
/// call that made them.
#[derive(Debug, Default)]
pub struct CollectingObserver {
    frames: Mutex<Vec<Frame>>,
    history: Mutex<Vec<DispatchRecord>>,
}

impl CollectingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn history(&self) -> Vec<DispatchRecord> {
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Operations in completion order.
    pub fn operations(&self) -> Vec<String> {
        self.history().into_iter().map(|record| record.operation).collect()
    }

    pub fn clear(&self) {
        self.frames.lock().unwrap_or_else(PoisonError::into_inner).clear();
        self.history.lock().unwrap_or_else(PoisonError::into_inner).clear();
    }
}

impl DispatchObserver for CollectingObserver {
    fn will_call_operation(&self, operation: &str, _signature: &Signature) {
        let mut frames = self.frames.lock().unwrap_or_else(PoisonError::into_inner);
        match frames.last_mut() {
            // Next attempt of a call that just retried.
            Some(frame) if !frame.attempting && frame.operation == operation => {
                frame.attempting = true;
            }
            _ => frames.push(Frame {
                operation: operation.to_string(),
                attempting: true,
                tried: Vec::new(),
            }),
        }
    }

    fn will_retry_operation(&self, _operation: &str, signature: &Signature, reason: &str) {
        let mut frames = self.frames.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(frame) = frames.last_mut() {
            frame.attempting = false;
            frame.tried.push((signature.clone(), reason.to_string()));
        }
    }

    fn did_call_operation(&self, operation: &str, signature: &Signature, retries: usize) {
        self.close(operation, signature, Some(retries), None);
    }

    fn did_fail_operation(&self, operation: &str, signature: &Signature, error: &DispatchError) {
        self.close(operation, signature, None, Some(error.to_string()));
    }
}

impl CollectingObserver {
    /// Pops the frame of the dispatch that just ended and records it.
    fn close(
        &self,
        operation: &str,
        signature: &Signature,
        retries: Option<usize>,
        error: Option<String>,
    ) {
        let frame = self
            .frames
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop();
        let tried = frame.map(|frame| frame.tried).unwrap_or_default();

        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(DispatchRecord {
                operation: operation.to_string(),
                signature: signature.clone(),
                retries: retries.unwrap_or(tried.len()),
                tried,
                error,
            });
    }
}
