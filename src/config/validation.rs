// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Structural validation of pipeline configurations.
//!
//! Checks run independently and every problem found is reported:
//!
//! 1. **Node shape**: node ids are unique and each node is either a source
//!    or an operation
//! 2. **References**: inputs name existing nodes and sources name configured
//!    stores
//! 3. **Stores**: every store type is provided by a backend
//!
//! Cycles are not checked here; plan construction rejects them with the
//! graph's own topological sort.
//!
//! # Examples
//!
//! ```rust
//! use bubblegraph::config::{validate_config, Config, NodeConfig};
//! use bubblegraph::errors::ValidationError;
//!
//! let config = Config {
//!     nodes: vec![NodeConfig {
//!         id: "orphan".to_string(),
//!         ..Default::default()
//!     }],
//!     ..Default::default()
//! };
//!
//! let errors = validate_config(&config).unwrap_err();
//! assert_eq!(
//!     errors,
//!     vec![ValidationError::EmptyNode {
//!         node_id: "orphan".to_string()
//!     }]
//! );
//! ```

use std::collections::HashSet;

use crate::backends::local::StoreFactory;
use crate::config::Config;
use crate::errors::ValidationError;

/// Validates `config`, returning every error found.
pub fn validate_config(config: &Config) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    errors.extend(validate_node_shapes(config));
    errors.extend(validate_references(config));
    errors.extend(validate_store_types(config));

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_node_shapes(config: &Config) -> Vec<ValidationError> {
    let mut seen_ids = HashSet::new();
    let mut errors = Vec::new();

    for node in &config.nodes {
        if !seen_ids.insert(&node.id) {
            errors.push(ValidationError::DuplicateNodeId {
                node_id: node.id.clone(),
            });
        }

        match (&node.source, &node.operation) {
            (Some(_), Some(_)) => errors.push(ValidationError::AmbiguousNode {
                node_id: node.id.clone(),
            }),
            (None, None) => errors.push(ValidationError::EmptyNode {
                node_id: node.id.clone(),
            }),
            _ => {}
        }
    }

    errors
}

fn validate_references(config: &Config) -> Vec<ValidationError> {
    let node_ids: HashSet<&String> = config.nodes.iter().map(|node| &node.id).collect();
    let mut errors = Vec::new();

    for node in &config.nodes {
        for (outlet, input) in &node.inputs {
            if !node_ids.contains(input) {
                errors.push(ValidationError::UnresolvedInput {
                    node_id: node.id.clone(),
                    outlet: outlet.clone(),
                    missing_node: input.clone(),
                });
            }
        }

        if let Some(source) = &node.source {
            if !config.stores.contains_key(&source.store) {
                errors.push(ValidationError::UnknownStore {
                    node_id: node.id.clone(),
                    store: source.store.clone(),
                });
            }
        }
    }

    errors
}

fn validate_store_types(config: &Config) -> Vec<ValidationError> {
    config
        .stores
        .iter()
        .filter(|(_, store)| !StoreFactory::is_store_type_available(&store.store_type))
        .map(|(name, store)| ValidationError::UnsupportedStoreType {
            store: name.clone(),
            store_type: store.store_type.clone(),
        })
        .collect()
}
