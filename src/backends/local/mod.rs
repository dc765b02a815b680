// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod factory;
pub mod objects;
pub mod ops;
pub mod store;

pub use factory::StoreFactory;
pub use objects::{IterableObject, RowListObject};
pub use ops::{list_available_operations, local_library, register_operations};
pub use store::MemoryStore;
