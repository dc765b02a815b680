// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Operations, their signatures and the resolver that dispatches them.
//!
//! * [`Representation`] / [`OperandType`] - what a data object can currently do
//! * [`Signature`] - per-operand matchers an implementation is registered under
//! * [`OperationLibrary`] - named operations and their implementations
//! * [`Resolver`] - picks and invokes implementations, honoring retry requests

pub mod operand;
pub mod registry;
pub mod representation;
pub mod resolver;
pub mod retry;
pub mod signature;

pub use operand::{common_representations, Operand, Parameters};
pub use registry::{Implementation, Operation, OperationFn, OperationLibrary, Prototype};
pub use representation::{OperandType, Representation};
pub use resolver::{DispatchContext, Resolver};
pub use retry::{OperationError, OperationResult, RetryPolicy, RetryRequest};
pub use signature::{Matcher, Signature, SignatureOperand};
