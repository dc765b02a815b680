// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use crate::config::consts::LIST_SUFFIX;

/// A physical access pattern a data object currently supports, such as
/// iterating rows or composing a native SQL statement.
///
/// The set is open: backends may introduce their own tags with
/// [`Representation::new`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Representation(Cow<'static, str>);

impl Representation {
    pub const ROWS: Representation = Representation(Cow::Borrowed("rows"));
    pub const RECORDS: Representation = Representation(Cow::Borrowed("records"));
    pub const SQL: Representation = Representation(Cow::Borrowed("sql"));

    pub fn new(tag: impl Into<String>) -> Self {
        Self(Cow::Owned(tag.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Representation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Representation {
    fn from(tag: &str) -> Self {
        Self::new(tag)
    }
}

/// Concrete type of one operand: a representation of a single object, or the
/// representation shared by every member of a list operand (`rows[]`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OperandType {
    pub representation: Representation,
    pub is_list: bool,
}

impl OperandType {
    pub fn single(representation: Representation) -> Self {
        Self {
            representation,
            is_list: false,
        }
    }

    pub fn list(representation: Representation) -> Self {
        Self {
            representation,
            is_list: true,
        }
    }
}

impl FromStr for OperandType {
    type Err = std::convert::Infallible;

    fn from_str(spec: &str) -> Result<Self, Self::Err> {
        Ok(match spec.strip_suffix(LIST_SUFFIX) {
            Some(tag) => OperandType::list(Representation::new(tag)),
            None => OperandType::single(Representation::new(spec)),
        })
    }
}

impl From<&str> for OperandType {
    fn from(spec: &str) -> Self {
        match spec.parse() {
            Ok(operand_type) => operand_type,
            Err(never) => match never {},
        }
    }
}

impl fmt::Display for OperandType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_list {
            write!(f, "{}{}", self.representation, LIST_SUFFIX)
        } else {
            write!(f, "{}", self.representation)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operand_type_parsing() {
        let test_cases = vec![
            ("rows", "rows", false),
            ("sql[]", "sql", true),
            ("records", "records", false),
        ];

        for (spec, representation, is_list) in test_cases {
            let parsed = OperandType::from(spec);
            assert_eq!(parsed.representation.as_str(), representation, "spec {}", spec);
            assert_eq!(parsed.is_list, is_list, "spec {}", spec);
            assert_eq!(parsed.to_string(), spec);
        }
    }

    #[test]
    fn test_well_known_representations() {
        assert_eq!(Representation::ROWS, Representation::new("rows"));
        assert_eq!(Representation::SQL.to_string(), "sql");
    }
}
