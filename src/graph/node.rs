// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::BTreeMap;
use std::fmt;

use serde_json::Value;

use crate::operation::Parameters;
use crate::traits::DataObjectRef;

/// A graph node: a source producing a data object, or an operation applied to
/// the outputs of the nodes connected to it.
#[derive(Debug, Clone)]
pub enum Node {
    /// Object `object` fetched from the store registered as `store`.
    Store {
        store: String,
        object: String,
        params: BTreeMap<String, Value>,
    },
    /// An object supplied directly.
    Object(DataObjectRef),
    /// Operation with literal arguments bound after its operands.
    Operation {
        operation: String,
        args: Vec<Value>,
        kwargs: BTreeMap<String, Value>,
    },
}

impl Node {
    pub fn store(store: impl Into<String>, object: impl Into<String>) -> Self {
        Node::Store {
            store: store.into(),
            object: object.into(),
            params: BTreeMap::new(),
        }
    }

    pub fn object(object: DataObjectRef) -> Self {
        Node::Object(object)
    }

    pub fn operation(operation: impl Into<String>) -> Self {
        Node::Operation {
            operation: operation.into(),
            args: Vec::new(),
            kwargs: BTreeMap::new(),
        }
    }

    /// Appends a positional argument. Ignored for source nodes.
    pub fn with_arg(mut self, value: impl Into<Value>) -> Self {
        if let Node::Operation { args, .. } = &mut self {
            args.push(value.into());
        }
        self
    }

    /// Binds a keyword argument, or a store parameter for store nodes.
    pub fn with_kwarg(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        match &mut self {
            Node::Operation { kwargs, .. } => {
                kwargs.insert(name.into(), value.into());
            }
            Node::Store { params, .. } => {
                params.insert(name.into(), value.into());
            }
            Node::Object(_) => {}
        }
        self
    }

    pub fn is_source(&self) -> bool {
        !matches!(self, Node::Operation { .. })
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Node::Store { .. } => "store",
            Node::Object(_) => "object",
            Node::Operation { .. } => "operation",
        }
    }

    /// Bound literal arguments of an operation node.
    pub fn parameters(&self) -> Option<Parameters> {
        match self {
            Node::Operation { args, kwargs, .. } => Some(Parameters {
                args: args.clone(),
                kwargs: kwargs.clone(),
            }),
            _ => None,
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Store { store, object, .. } => write!(f, "source {}.{}", store, object),
            Node::Object(_) => f.write_str("source object"),
            Node::Operation {
                operation,
                args,
                kwargs,
            } => {
                let bound: Vec<String> = args
                    .iter()
                    .map(ToString::to_string)
                    .chain(kwargs.iter().map(|(name, value)| format!("{}={}", name, value)))
                    .collect();
                write!(f, "{}({})", operation, bound.join(", "))
            }
        }
    }
}
