// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Errors reported by data objects, stores and the operations reading them.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DataObjectError {
    /// A single-pass object was read after its content was already consumed.
    #[error("Data object has already been consumed")]
    Consumed,

    /// The object does not currently provide the requested representation.
    #[error("Representation '{representation}' is not available")]
    RepresentationUnavailable { representation: String },

    /// The object cannot produce a re-readable replacement of itself.
    #[error("Data object cannot be retained")]
    NotRetainable,

    #[error("Unknown field '{field}'")]
    UnknownField { field: String },

    #[error("Field mismatch: {reason}")]
    FieldMismatch { reason: String },

    #[error("Missing parameter '{name}'")]
    MissingParameter { name: String },

    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },

    #[error("Operand {position} is not {expected}")]
    InvalidOperand { position: usize, expected: String },

    #[error("No object '{name}' in store")]
    NoSuchObject { name: String },
}
