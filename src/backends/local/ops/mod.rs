// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod generic;
pub mod rows;

use crate::errors::ConfigurationError;
use crate::operation::OperationLibrary;

/// Registers every local operation in `library`.
pub fn register_operations(library: &mut OperationLibrary) -> Result<(), ConfigurationError> {
    library.register_all(rows::operations())?;
    library.register_all(generic::operations())?;
    for name in generic::EXPERIMENTAL {
        library.mark_experimental(name);
    }
    Ok(())
}

/// Names of every local operation.
pub fn list_available_operations() -> Vec<&'static str> {
    rows::operations()
        .into_iter()
        .chain(generic::operations())
        .map(|(name, _, _)| name)
        .collect()
}

/// Library holding only the local operations.
pub fn local_library() -> Result<OperationLibrary, ConfigurationError> {
    let mut library = OperationLibrary::new();
    register_operations(&mut library)?;
    Ok(library)
}
