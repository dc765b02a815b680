// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::fmt;

use crate::config::consts::{LIST_SUFFIX, WILDCARD};
use crate::operation::{OperandType, Representation};

/// Matcher for one signature position: an exact representation or anything.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Matcher {
    Any,
    Exact(Representation),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SignatureOperand {
    pub matcher: Matcher,
    pub is_list: bool,
}

impl SignatureOperand {
    fn parse(spec: &str) -> Self {
        let (tag, is_list) = match spec.strip_suffix(LIST_SUFFIX) {
            Some(tag) => (tag, true),
            None => (spec, false),
        };

        let matcher = if tag == WILDCARD {
            Matcher::Any
        } else {
            Matcher::Exact(Representation::new(tag))
        };

        Self { matcher, is_list }
    }

    fn matches(&self, concrete: &OperandType) -> bool {
        if self.is_list != concrete.is_list {
            return false;
        }
        match &self.matcher {
            Matcher::Any => true,
            Matcher::Exact(representation) => *representation == concrete.representation,
        }
    }
}

impl fmt::Display for SignatureOperand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.matcher {
            Matcher::Any => f.write_str(WILDCARD)?,
            Matcher::Exact(representation) => write!(f, "{}", representation)?,
        }
        if self.is_list {
            f.write_str(LIST_SUFFIX)?;
        }
        Ok(())
    }
}

/// Fixed-arity tuple of operand matchers an implementation is registered under.
///
/// * `Signature::new(["sql"])` - unary operation on a SQL object
/// * `Signature::new(["rows", "rows"])` - binary operation on two row iterators
/// * `Signature::new(["rows[]"])` - operation on a list of row iterators
/// * `Signature::new(["*"])` - operation accepting any single object
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Signature {
    operands: Vec<SignatureOperand>,
}

impl Signature {
    pub fn new<I, S>(specs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            operands: specs
                .into_iter()
                .map(|spec| SignatureOperand::parse(spec.as_ref()))
                .collect(),
        }
    }

    /// Signature of `arity` wildcard operands.
    pub fn any(arity: usize) -> Self {
        Self::new(std::iter::repeat(WILDCARD).take(arity))
    }

    pub fn len(&self) -> usize {
        self.operands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operands.is_empty()
    }

    pub fn operands(&self) -> &[SignatureOperand] {
        &self.operands
    }

    /// `true` when at least one position is a wildcard.
    pub fn has_any(&self) -> bool {
        self.wildcard_count() > 0
    }

    pub fn wildcard_count(&self) -> usize {
        self.operands
            .iter()
            .filter(|operand| operand.matcher == Matcher::Any)
            .count()
    }

    /// Positional match against concrete operand types.
    ///
    /// * `rep` matches `rep` and `*`
    /// * `rep[]` matches `rep[]` and `*[]`
    pub fn matches(&self, concrete: &[OperandType]) -> bool {
        self.operands.len() == concrete.len()
            && self
                .operands
                .iter()
                .zip(concrete)
                .all(|(mine, theirs)| mine.matches(theirs))
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, operand) in self.operands.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", operand)?;
        }
        Ok(())
    }
}

impl From<&[&str]> for Signature {
    fn from(specs: &[&str]) -> Self {
        Self::new(specs.iter())
    }
}

impl<const N: usize> From<[&str; N]> for Signature {
    fn from(specs: [&str; N]) -> Self {
        Self::new(specs)
    }
}
