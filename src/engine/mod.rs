// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Planning and evaluation of pipeline graphs.
//!
//! [`ExecutionPlan::build`] orders a [`Graph`](crate::graph::Graph), binds each
//! operation's operands to the nodes feeding them and counts how many
//! connections read every node. [`ExecutionEngine`] then evaluates the steps
//! in order, sequentially, through a [`Resolver`](crate::operation::Resolver).

pub mod executor;
pub mod plan;
#[cfg(test)]
mod integration_tests;

pub use executor::{ExecutionEngine, RunResults};
pub use plan::{ExecutionPlan, Step};
