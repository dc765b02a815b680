// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Representation-based dispatch with the retry protocol.
//!
//! For a call the resolver computes the ordered candidate signatures (see
//! [`Operation::resolution_order`]) and invokes them one at a time. An
//! implementation either returns a result, which ends dispatch, fails, which
//! ends dispatch with an error, or returns a [`RetryRequest`], which hands
//! dispatch to the named alternative or to the next candidate. Every attempted
//! signature is remembered so a retry can never revisit one.

use std::collections::{HashSet, VecDeque};
use std::sync::Arc;

use serde_json::Value;

use crate::errors::{DataObjectError, DispatchError};
use crate::observability::messages::dispatch::ExperimentalOperationCalled;
use crate::observability::messages::StructuredLog;
use crate::observability::TracingObserver;
use crate::operation::{
    Operand, Operation, OperationError, OperationLibrary, Parameters, RetryPolicy, RetryRequest,
    Signature,
};
use crate::traits::{DataObjectRef, DispatchObserver};

#[derive(Clone)]
pub struct Resolver {
    library: Arc<OperationLibrary>,
    policy: RetryPolicy,
    observer: Arc<dyn DispatchObserver>,
}

impl Resolver {
    pub fn new(library: impl Into<Arc<OperationLibrary>>) -> Self {
        Self {
            library: library.into(),
            policy: RetryPolicy::default(),
            observer: Arc::new(TracingObserver),
        }
    }

    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_observer(mut self, observer: Arc<dyn DispatchObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn library(&self) -> &OperationLibrary {
        &self.library
    }

    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Dispatches operation `name` on `operands`.
    pub fn call(
        &self,
        name: &str,
        operands: &[Operand],
        parameters: &Parameters,
    ) -> Result<DataObjectRef, DispatchError> {
        let operation = self
            .library
            .operation(name)
            .ok_or_else(|| DispatchError::UnknownOperation(name.to_string()))?;

        let arity = operation.prototype().arity();
        if operands.len() != arity {
            return Err(DispatchError::OperandCount {
                operation: name.to_string(),
                expected: arity,
                found: operands.len(),
            });
        }

        if let Some(position) = operands.iter().position(Operand::is_empty_list) {
            return Err(DispatchError::EmptyListOperand {
                operation: name.to_string(),
                position,
            });
        }

        let types: Vec<_> = operands.iter().map(Operand::types).collect();
        let mut queue: VecDeque<Signature> = operation.resolution_order(&types).into();

        let Some(first) = queue.front().cloned() else {
            let representations = types
                .iter()
                .map(|tags| {
                    let tags: Vec<String> = tags.iter().map(ToString::to_string).collect();
                    format!("[{}]", tags.join(", "))
                })
                .collect::<Vec<_>>()
                .join(", ");
            return Err(DispatchError::NoMatchingSignature {
                operation: name.to_string(),
                representations,
            });
        };

        if operation.is_experimental() {
            ExperimentalOperationCalled { operation: name }.log();
        }

        let mut visited: HashSet<Signature> = HashSet::new();
        let mut retries = 0;
        let mut last_attempted = first.clone();

        while let Some(signature) = queue.pop_front() {
            visited.insert(signature.clone());

            let implementation =
                operation
                    .implementation(&signature)
                    .ok_or_else(|| DispatchError::UnknownSignature {
                        operation: name.to_string(),
                        signature: signature.to_string(),
                    })?;

            self.observer.will_call_operation(name, &signature);
            last_attempted = signature.clone();

            let context = DispatchContext {
                resolver: self,
                operation,
                signature: &signature,
                parameters,
            };

            let error = match implementation.invoke(&context, operands) {
                Ok(result) => {
                    self.observer.did_call_operation(name, &signature, retries);
                    return Ok(result);
                }
                Err(OperationError::Retry(request)) => {
                    match self.handle_retry(operation, &signature, request, &visited, &mut queue) {
                        Ok(()) => {
                            retries += 1;
                            continue;
                        }
                        Err(error) => error,
                    }
                }
                Err(OperationError::Failed(source)) => DispatchError::OperationFailed {
                    operation: name.to_string(),
                    signature: signature.to_string(),
                    source,
                },
                Err(OperationError::Dispatch(error)) => *error,
            };

            self.observer.did_fail_operation(name, &signature, &error);
            return Err(error);
        }

        let error = DispatchError::ResolutionExhausted {
            operation: name.to_string(),
            first_signature: first.to_string(),
        };
        self.observer.did_fail_operation(name, &last_attempted, &error);
        Err(error)
    }

    fn handle_retry(
        &self,
        operation: &Operation,
        signature: &Signature,
        request: RetryRequest,
        visited: &HashSet<Signature>,
        queue: &mut VecDeque<Signature>,
    ) -> Result<(), DispatchError> {
        let name = operation.name();

        if !self.policy.can_retry(name) {
            return Err(DispatchError::RetryNotAllowed {
                operation: name.to_string(),
            });
        }

        self.observer
            .will_retry_operation(name, signature, &request.reason);

        let Some(alternative) = request.alternative else {
            return Ok(());
        };

        if visited.contains(&alternative) {
            return Err(DispatchError::SignatureAlreadyVisited {
                operation: name.to_string(),
                signature: alternative.to_string(),
            });
        }

        if operation.implementation(&alternative).is_none() {
            return Err(DispatchError::UnknownSignature {
                operation: name.to_string(),
                signature: alternative.to_string(),
            });
        }

        queue.retain(|queued| *queued != alternative);
        queue.push_front(alternative);
        Ok(())
    }
}

/// What an implementation sees of the call it is serving.
pub struct DispatchContext<'a> {
    resolver: &'a Resolver,
    operation: &'a Operation,
    signature: &'a Signature,
    parameters: &'a Parameters,
}

impl<'a> DispatchContext<'a> {
    pub fn resolver(&self) -> &'a Resolver {
        self.resolver
    }

    pub fn operation_name(&self) -> &'a str {
        self.operation.name()
    }

    /// Signature currently being attempted.
    pub fn signature(&self) -> &'a Signature {
        self.signature
    }

    pub fn parameters(&self) -> &'a Parameters {
        self.parameters
    }

    /// Dispatches another operation through the same resolver.
    pub fn call(
        &self,
        name: &str,
        operands: &[Operand],
        parameters: &Parameters,
    ) -> Result<DataObjectRef, DispatchError> {
        self.resolver.call(name, operands, parameters)
    }

    /// Value bound to parameter `name`, by keyword or by its prototype position.
    pub fn param(&self, name: &str) -> Option<&'a Value> {
        let position = self.operation.prototype().parameter_position(name);
        self.parameters.lookup(name, position)
    }

    pub fn str_param(&self, name: &str) -> Result<&'a str, DataObjectError> {
        let value = self.required(name)?;
        value.as_str().ok_or_else(|| invalid(name, "expected a string"))
    }

    pub fn optional_str_param(&self, name: &str) -> Result<Option<&'a str>, DataObjectError> {
        match self.param(name) {
            None => Ok(None),
            Some(value) => value
                .as_str()
                .map(Some)
                .ok_or_else(|| invalid(name, "expected a string")),
        }
    }

    /// A field name list given either as one string or as a list of strings.
    pub fn names_param(&self, name: &str) -> Result<Vec<String>, DataObjectError> {
        match self.required(name)? {
            Value::String(single) => Ok(vec![single.clone()]),
            Value::Array(items) => items
                .iter()
                .map(|item| {
                    item.as_str()
                        .map(str::to_string)
                        .ok_or_else(|| invalid(name, "expected a list of strings"))
                })
                .collect(),
            _ => Err(invalid(name, "expected a string or a list of strings")),
        }
    }

    pub fn usize_param(&self, name: &str, default: usize) -> Result<usize, DataObjectError> {
        match self.param(name) {
            None => Ok(default),
            Some(value) => value
                .as_u64()
                .and_then(|number| usize::try_from(number).ok())
                .ok_or_else(|| invalid(name, "expected a non-negative integer")),
        }
    }

    pub fn bool_param(&self, name: &str, default: bool) -> Result<bool, DataObjectError> {
        match self.param(name) {
            None => Ok(default),
            Some(value) => value
                .as_bool()
                .ok_or_else(|| invalid(name, "expected a boolean")),
        }
    }

    fn required(&self, name: &str) -> Result<&'a Value, DataObjectError> {
        self.param(name)
            .ok_or_else(|| DataObjectError::MissingParameter {
                name: name.to_string(),
            })
    }
}

fn invalid(name: &str, reason: &str) -> DataObjectError {
    DataObjectError::InvalidParameter {
        name: name.to_string(),
        reason: reason.to_string(),
    }
}
