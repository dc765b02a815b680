// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::errors::DispatchError;
use crate::operation::Signature;

/// Receives notifications about dispatch attempts made by the resolver.
///
/// Observers are for tracing and auditing only. They never influence which
/// implementation runs or what it returns.
pub trait DispatchObserver: Send + Sync {
    /// An implementation registered under `signature` is about to be invoked.
    fn will_call_operation(&self, operation: &str, signature: &Signature);

    /// The implementation under `signature` asked for a retry.
    fn will_retry_operation(&self, operation: &str, signature: &Signature, reason: &str);

    /// The implementation under `signature` returned a result after `retries` retries.
    fn did_call_operation(&self, operation: &str, signature: &Signature, retries: usize);

    /// The dispatch failed with `error`; `signature` was the last one attempted.
    ///
    /// Every [`will_call_operation`](DispatchObserver::will_call_operation)
    /// is eventually closed by exactly one `did_call_operation` or
    /// `did_fail_operation` for the same dispatch.
    fn did_fail_operation(&self, operation: &str, signature: &Signature, error: &DispatchError);
}
