// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

/// Outlet used when a connection does not name one; also the fallback for an
/// operation's first operand.
pub const DEFAULT_OUTLET: &str = "default";
/// Prefix of names generated for nodes added without one.
pub const NODE_NAME_PREFIX: &str = "node";
/// Suffix marking a list-typed operand in signatures (`rows[]`).
pub const LIST_SUFFIX: &str = "[]";
/// Signature matcher accepting any representation.
pub const WILDCARD: &str = "*";
/// Store `type` of the in-memory store.
pub const MEMORY_STORE_TYPE: &str = "memory";
