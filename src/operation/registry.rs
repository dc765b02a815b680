// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Operation registry: named operations mapping signatures to implementations.
//!
//! The first implementation registered for an operation fixes its prototype,
//! the operand count and operand names that every later registration must
//! agree with. The library is built during setup and is read-only once it is
//! handed to a [`Resolver`](crate::operation::Resolver).

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::errors::ConfigurationError;
use crate::operation::{DispatchContext, Operand, OperandType, OperationResult, Signature};

pub type OperationFn =
    Arc<dyn Fn(&DispatchContext<'_>, &[Operand]) -> OperationResult + Send + Sync>;

/// A function registered for one signature of an operation, together with
/// its declared parameter names (operand names first).
#[derive(Clone)]
pub struct Implementation {
    parameters: Vec<String>,
    function: OperationFn,
}

impl Implementation {
    pub fn new<I, S, F>(parameters: I, function: F) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        F: Fn(&DispatchContext<'_>, &[Operand]) -> OperationResult + Send + Sync + 'static,
    {
        Self {
            parameters: parameters.into_iter().map(Into::into).collect(),
            function: Arc::new(function),
        }
    }

    pub fn parameters(&self) -> &[String] {
        &self.parameters
    }

    pub(crate) fn invoke(&self, ctx: &DispatchContext<'_>, operands: &[Operand]) -> OperationResult {
        (self.function)(ctx, operands)
    }
}

impl fmt::Debug for Implementation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Implementation")
            .field("parameters", &self.parameters)
            .finish()
    }
}

/// Operand and parameter names of an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prototype {
    operands: Vec<String>,
    parameters: Vec<String>,
}

impl Prototype {
    pub fn operands(&self) -> &[String] {
        &self.operands
    }

    pub fn parameters(&self) -> &[String] {
        &self.parameters
    }

    pub fn arity(&self) -> usize {
        self.operands.len()
    }

    pub fn parameter_position(&self, name: &str) -> Option<usize> {
        self.parameters.iter().position(|parameter| parameter == name)
    }
}

#[derive(Debug, Clone)]
pub struct Operation {
    name: String,
    prototype: Prototype,
    registry: Vec<(Signature, Implementation)>,
    experimental: bool,
}

impl Operation {
    /// Creates an operation whose prototype is derived from its first implementation.
    pub fn new(
        name: impl Into<String>,
        signature: Signature,
        implementation: Implementation,
    ) -> Result<Self, ConfigurationError> {
        let name = name.into();
        let arity = signature.len();
        let declared = implementation.parameters();

        if declared.len() < arity {
            return Err(ConfigurationError::MissingOperandNames {
                operation: name,
                declared: declared.len(),
                required: arity,
            });
        }

        let prototype = Prototype {
            operands: declared[..arity].to_vec(),
            parameters: declared[arity..].to_vec(),
        };

        Ok(Self {
            name,
            prototype,
            registry: vec![(signature, implementation)],
            experimental: false,
        })
    }

    pub fn register(
        &mut self,
        signature: Signature,
        implementation: Implementation,
    ) -> Result<(), ConfigurationError> {
        if signature.len() != self.prototype.arity() {
            return Err(ConfigurationError::ArityMismatch {
                operation: self.name.clone(),
                signature: signature.to_string(),
                expected: self.prototype.arity(),
                found: signature.len(),
            });
        }

        if self.implementation(&signature).is_some() {
            return Err(ConfigurationError::DuplicateSignature {
                operation: self.name.clone(),
                signature: signature.to_string(),
            });
        }

        self.registry.push((signature, implementation));
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn prototype(&self) -> &Prototype {
        &self.prototype
    }

    /// Registered signatures in registration order.
    pub fn signatures(&self) -> impl Iterator<Item = &Signature> {
        self.registry.iter().map(|(signature, _)| signature)
    }

    pub fn implementation(&self, signature: &Signature) -> Option<&Implementation> {
        self.registry
            .iter()
            .find(|(registered, _)| registered == signature)
            .map(|(_, implementation)| implementation)
    }

    pub fn mark_experimental(&mut self) {
        self.experimental = true;
    }

    pub fn is_experimental(&self) -> bool {
        self.experimental
    }

    /// Ordered candidate signatures for operands of the given types.
    ///
    /// Combinations of operand representations are walked in Cartesian
    /// product order, keeping each operand's own preference order. Exact
    /// signatures are collected per combination; every signature containing a
    /// wildcard goes after all of them, the ones with fewer wildcards first.
    pub fn resolution_order(&self, types: &[Vec<OperandType>]) -> Vec<Signature> {
        let mut exact: Vec<Signature> = Vec::new();
        let mut generic: Vec<Signature> = Vec::new();

        for combination in CartesianProduct::new(types) {
            for signature in self.signatures() {
                if !signature.matches(&combination) {
                    continue;
                }
                let bucket = if signature.has_any() {
                    &mut generic
                } else {
                    &mut exact
                };
                if !bucket.contains(signature) {
                    bucket.push(signature.clone());
                }
            }
        }

        generic.sort_by_key(Signature::wildcard_count);
        exact.extend(generic);
        exact
    }

    /// Removes one signature, returning `true` if it was registered.
    fn remove_signature(&mut self, signature: &Signature) -> bool {
        let before = self.registry.len();
        self.registry.retain(|(registered, _)| registered != signature);
        self.registry.len() != before
    }
}

/// Iterates every combination picking one type per operand, the last operand
/// varying fastest.
struct CartesianProduct<'a> {
    lists: &'a [Vec<OperandType>],
    indexes: Vec<usize>,
    done: bool,
}

impl<'a> CartesianProduct<'a> {
    fn new(lists: &'a [Vec<OperandType>]) -> Self {
        Self {
            lists,
            indexes: vec![0; lists.len()],
            done: lists.iter().any(Vec::is_empty),
        }
    }
}

impl Iterator for CartesianProduct<'_> {
    type Item = Vec<OperandType>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let combination = self
            .indexes
            .iter()
            .zip(self.lists)
            .map(|(&index, list)| list[index].clone())
            .collect();

        // Advance the odometer; when every position wraps we are finished.
        self.done = true;
        for position in (0..self.indexes.len()).rev() {
            self.indexes[position] += 1;
            if self.indexes[position] < self.lists[position].len() {
                self.done = false;
                break;
            }
            self.indexes[position] = 0;
        }

        Some(combination)
    }
}

/// Catalogue of operations available to a resolver.
#[derive(Debug, Clone, Default)]
pub struct OperationLibrary {
    operations: HashMap<String, Operation>,
}

impl OperationLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `implementation` for `signature` of operation `name`,
    /// creating the operation on first use.
    pub fn register(
        &mut self,
        name: &str,
        signature: impl Into<Signature>,
        implementation: Implementation,
    ) -> Result<(), ConfigurationError> {
        let signature = signature.into();
        match self.operations.get_mut(name) {
            Some(operation) => operation.register(signature, implementation),
            None => {
                let operation = Operation::new(name, signature, implementation)?;
                self.operations.insert(name.to_string(), operation);
                Ok(())
            }
        }
    }

    /// Registers several implementations, stopping at the first rejected one.
    pub fn register_all<I>(&mut self, entries: I) -> Result<(), ConfigurationError>
    where
        I: IntoIterator<Item = (&'static str, Signature, Implementation)>,
    {
        for (name, signature, implementation) in entries {
            self.register(name, signature, implementation)?;
        }
        Ok(())
    }

    pub fn mark_experimental(&mut self, name: &str) {
        if let Some(operation) = self.operations.get_mut(name) {
            operation.mark_experimental();
        }
    }

    pub fn operation(&self, name: &str) -> Option<&Operation> {
        self.operations.get(name)
    }

    pub fn prototype(&self, name: &str) -> Option<&Prototype> {
        self.operations.get(name).map(Operation::prototype)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.operations.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &String> {
        self.operations.keys()
    }

    /// Removes a single signature of `name`, or the whole operation when no
    /// signature is given. Removing the last signature removes the operation.
    pub fn remove(&mut self, name: &str, signature: Option<&Signature>) -> bool {
        match signature {
            None => self.operations.remove(name).is_some(),
            Some(signature) => {
                let Some(operation) = self.operations.get_mut(name) else {
                    return false;
                };
                let removed = operation.remove_signature(signature);
                if operation.registry.is_empty() {
                    self.operations.remove(name);
                }
                removed
            }
        }
    }

    /// Sorted `(operation, signatures)` listing, for debugging output.
    pub fn catalogue(&self) -> Vec<(String, Vec<String>)> {
        let mut entries: Vec<(String, Vec<String>)> = self
            .operations
            .values()
            .map(|operation| {
                (
                    operation.name().to_string(),
                    operation.signatures().map(ToString::to_string).collect(),
                )
            })
            .collect();
        entries.sort();
        entries
    }
}
