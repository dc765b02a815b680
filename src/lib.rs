// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod backends;   // stores, data objects and operations
pub mod config;     // pipeline config + runtime builder
pub mod engine;     // graph planning and evaluation
pub mod errors;     // error handling
pub mod graph;      // nodes and connections
pub mod observability;
pub mod operation;  // signatures, registry and resolver
pub mod traits;     // unified abstractions
