// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod config;
mod data;
mod dispatch;
mod execution;
mod graph;

pub use config::{ConfigurationError, RuntimeError, ValidationError};
pub use data::DataObjectError;
pub use dispatch::DispatchError;
pub use execution::ExecutionError;
pub use graph::GraphError;
