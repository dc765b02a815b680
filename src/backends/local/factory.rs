// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use crate::backends::local::MemoryStore;
use crate::config::consts::MEMORY_STORE_TYPE;
use crate::config::StoreConfig;
use crate::traits::{FieldList, Store};

/// Factory for creating in-process stores from configuration
pub struct StoreFactory;

impl StoreFactory {
    /// Create a store instance from configuration
    ///
    /// The `type` field in the config determines which store to create:
    /// - "memory" -> MemoryStore filled with the configured inline objects
    pub fn create_store(name: &str, config: &StoreConfig) -> Result<Arc<dyn Store>, String> {
        match config.store_type.as_str() {
            MEMORY_STORE_TYPE => {
                let mut store = MemoryStore::new();
                for (object_name, object) in &config.objects {
                    store
                        .insert(
                            object_name.clone(),
                            FieldList::new(object.fields.iter().cloned()),
                            object.rows.clone(),
                            object.consumable,
                        )
                        .map_err(|e| {
                            format!("Store '{}' object '{}': {}", name, object_name, e)
                        })?;
                }
                Ok(Arc::new(store))
            }
            other => Err(format!("Unknown store type: '{}'", other)),
        }
    }

    /// List all available store types
    pub fn list_available_store_types() -> Vec<&'static str> {
        vec![MEMORY_STORE_TYPE]
    }

    /// Check if a store type is available
    pub fn is_store_type_available(store_type: &str) -> bool {
        Self::list_available_store_types().contains(&store_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ObjectConfig;
    use serde_json::json;
    use std::collections::BTreeMap;

    fn create_test_config(store_type: &str, rows: Vec<Vec<serde_json::Value>>) -> StoreConfig {
        let mut objects = BTreeMap::new();
        objects.insert(
            "data".to_string(),
            ObjectConfig {
                fields: vec!["x".to_string(), "y".to_string()],
                rows,
                consumable: false,
            },
        );
        StoreConfig {
            store_type: store_type.to_string(),
            objects,
        }
    }

    #[test]
    fn test_create_memory_store() {
        let config = create_test_config("memory", vec![vec![json!(1), json!("a")]]);
        let store = StoreFactory::create_store("default", &config).unwrap();

        assert_eq!(store.name(), "memory");
        let object = store.get_object("data", &BTreeMap::new()).unwrap();
        assert_eq!(object.fields().names(), ["x", "y"]);
        let rows: Vec<_> = object.rows().unwrap().collect();
        assert_eq!(rows, vec![vec![json!(1), json!("a")]]);
    }

    #[test]
    fn test_create_store_errors_table_driven() {
        struct TestCase {
            name: &'static str,
            config: StoreConfig,
            expected: &'static str,
        }

        let test_cases = vec![
            TestCase {
                name: "unknown type",
                config: create_test_config("postgres", vec![]),
                expected: "Unknown store type: 'postgres'",
            },
            TestCase {
                name: "ragged rows",
                config: create_test_config("memory", vec![vec![json!(1)]]),
                expected: "Store 'default' object 'data':",
            },
        ];

        for test_case in test_cases {
            let error = StoreFactory::create_store("default", &test_case.config)
                .err()
                .unwrap();
            assert!(
                error.starts_with(test_case.expected),
                "Test case '{}': got '{}'",
                test_case.name,
                error
            );
        }
    }

    #[test]
    fn test_store_type_availability() {
        assert_eq!(StoreFactory::list_available_store_types(), vec!["memory"]);
        assert!(StoreFactory::is_store_type_available("memory"));
        assert!(!StoreFactory::is_store_type_available("sqlite"));
    }
}
