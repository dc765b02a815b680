// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Stub data objects and implementations for tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::errors::DataObjectError;
use crate::operation::{
    DispatchContext, Implementation, Operand, OperationResult, Representation,
};
use crate::traits::{DataObject, DataObjectRef};

/// A data object with arbitrary representation tags and no content.
///
/// Consumable stubs count how often they are retained; the counter is shared
/// with the retained copies.
#[derive(Debug, Clone)]
pub struct StubObject {
    representations: Vec<Representation>,
    consumable: bool,
    retained: Arc<AtomicUsize>,
}

impl StubObject {
    pub fn new<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            representations: tags.into_iter().map(Representation::new).collect(),
            consumable: false,
            retained: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn consumable(mut self) -> Self {
        self.consumable = true;
        self
    }

    pub fn retain_count(&self) -> usize {
        self.retained.load(Ordering::SeqCst)
    }
}

impl DataObject for StubObject {
    fn representations(&self) -> Vec<Representation> {
        self.representations.clone()
    }

    fn is_consumable(&self) -> bool {
        self.consumable
    }

    fn retained(&self) -> Result<DataObjectRef, DataObjectError> {
        if !self.consumable {
            return Err(DataObjectError::NotRetainable);
        }
        self.retained.fetch_add(1, Ordering::SeqCst);
        Ok(Arc::new(StubObject {
            representations: self.representations.clone(),
            consumable: false,
            retained: Arc::clone(&self.retained),
        }))
    }
}

/// Implementation body returning a fresh non-consumable `rows` stub.
pub fn ok(_: &DispatchContext<'_>, _: &[Operand]) -> OperationResult {
    Ok(Arc::new(StubObject::new(["rows"])))
}

/// Implementation body returning its first operand unchanged.
pub fn identity(_: &DispatchContext<'_>, operands: &[Operand]) -> OperationResult {
    let first = operands
        .first()
        .ok_or(DataObjectError::InvalidOperand {
            position: 0,
            expected: "present".to_string(),
        })?;
    Ok(Arc::clone(first.as_object(0)?))
}

/// Implementation body always returning `object`.
pub fn returning(
    object: StubObject,
) -> impl Fn(&DispatchContext<'_>, &[Operand]) -> OperationResult + Send + Sync + 'static {
    let object: DataObjectRef = Arc::new(object);
    move |_: &DispatchContext<'_>, _: &[Operand]| Ok(Arc::clone(&object))
}

/// Records the labels of invoked implementations in call order.
#[derive(Debug, Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<String>>>);

impl CallLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }

    /// Wraps `outcome` so each invocation is logged as `label`.
    pub fn implementation<F>(&self, label: &str, parameters: &[&str], outcome: F) -> Implementation
    where
        F: Fn(&DispatchContext<'_>, &[Operand]) -> OperationResult + Send + Sync + 'static,
    {
        let log = self.clone();
        let label = label.to_string();
        Implementation::new(parameters.iter().copied(), move |ctx, operands| {
            log.0.lock().unwrap().push(label.clone());
            outcome(ctx, operands)
        })
    }
}
