// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::BTreeMap;

use serde_json::Value;

use crate::errors::DataObjectError;
use crate::operation::{OperandType, Representation};
use crate::traits::DataObjectRef;

/// An operand of an operation call: a single data object or a list of them.
#[derive(Debug, Clone)]
pub enum Operand {
    Object(DataObjectRef),
    List(Vec<DataObjectRef>),
}

impl Operand {
    /// Ordered representation types this operand can be dispatched on.
    ///
    /// A list contributes the representations shared by all of its members,
    /// in the order of the first member, each marked as list-typed.
    pub fn types(&self) -> Vec<OperandType> {
        match self {
            Operand::Object(object) => object
                .representations()
                .into_iter()
                .map(OperandType::single)
                .collect(),
            Operand::List(objects) => common_representations(objects)
                .into_iter()
                .map(OperandType::list)
                .collect(),
        }
    }

    pub fn as_object(&self, position: usize) -> Result<&DataObjectRef, DataObjectError> {
        match self {
            Operand::Object(object) => Ok(object),
            Operand::List(_) => Err(DataObjectError::InvalidOperand {
                position,
                expected: "a single data object".to_string(),
            }),
        }
    }

    pub fn as_list(&self, position: usize) -> Result<&[DataObjectRef], DataObjectError> {
        match self {
            Operand::List(objects) => Ok(objects),
            Operand::Object(_) => Err(DataObjectError::InvalidOperand {
                position,
                expected: "a list of data objects".to_string(),
            }),
        }
    }

    pub fn is_empty_list(&self) -> bool {
        matches!(self, Operand::List(objects) if objects.is_empty())
    }
}

impl From<DataObjectRef> for Operand {
    fn from(object: DataObjectRef) -> Self {
        Operand::Object(object)
    }
}

impl From<Vec<DataObjectRef>> for Operand {
    fn from(objects: Vec<DataObjectRef>) -> Self {
        Operand::List(objects)
    }
}

/// Representations shared by all `objects`, in the first object's order.
pub fn common_representations(objects: &[DataObjectRef]) -> Vec<Representation> {
    let Some((first, rest)) = objects.split_first() else {
        return Vec::new();
    };

    let others: Vec<Vec<Representation>> =
        rest.iter().map(|object| object.representations()).collect();

    first
        .representations()
        .into_iter()
        .filter(|representation| others.iter().all(|reps| reps.contains(representation)))
        .collect()
}

/// Literal arguments bound to an operation call, after the operands.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Parameters {
    pub args: Vec<Value>,
    pub kwargs: BTreeMap<String, Value>,
}

impl Parameters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_arg(mut self, value: impl Into<Value>) -> Self {
        self.args.push(value.into());
        self
    }

    pub fn with_kwarg(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.kwargs.insert(name.into(), value.into());
        self
    }

    /// Looks `name` up among keyword arguments, then positionally using
    /// `position` (the parameter's index in the operation prototype).
    pub fn lookup(&self, name: &str, position: Option<usize>) -> Option<&Value> {
        self.kwargs
            .get(name)
            .or_else(|| position.and_then(|index| self.args.get(index)))
            .filter(|value| !value.is_null())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::stub::StubObject;
    use serde_json::json;
    use std::sync::Arc;

    #[test]
    fn test_single_operand_types_keep_object_order() {
        let object: DataObjectRef = Arc::new(StubObject::new(["sql", "rows"]));
        let types = Operand::from(object).types();

        assert_eq!(types, vec![OperandType::from("sql"), OperandType::from("rows")]);
    }

    #[test]
    fn test_list_operand_types_are_intersection() {
        let objects: Vec<DataObjectRef> = vec![
            Arc::new(StubObject::new(["sql", "rows", "records"])),
            Arc::new(StubObject::new(["rows", "sql"])),
        ];
        let types = Operand::from(objects).types();

        assert_eq!(types, vec![OperandType::from("sql[]"), OperandType::from("rows[]")]);
    }

    #[test]
    fn test_empty_list_has_no_types() {
        let operand = Operand::List(vec![]);
        assert!(operand.types().is_empty());
        assert!(operand.is_empty_list());
    }

    #[test]
    fn test_parameter_lookup() {
        let parameters = Parameters::new()
            .with_arg("by_position")
            .with_kwarg("named", json!(10))
            .with_kwarg("nothing", Value::Null);

        assert_eq!(parameters.lookup("named", None), Some(&json!(10)));
        assert_eq!(parameters.lookup("key", Some(0)), Some(&json!("by_position")));
        assert_eq!(parameters.lookup("key", Some(1)), None);
        assert_eq!(parameters.lookup("nothing", None), None);
    }
}
