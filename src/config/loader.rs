// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::operation::RetryPolicy;

/// Pipeline configuration: stores, nodes and the retry policy.
///
/// # Fields
/// * `retry` - Which operations may hand dispatch to another implementation (optional)
/// * `stores` - Named stores source nodes read from (optional)
/// * `nodes` - Sources and operations making up the graph
///
/// # Example
/// ```yaml
/// retry:
///   deny: [join_details]
/// stores:
///   default:
///     type: memory
///     objects:
///       data: { fields: [x], rows: [[1], [2], [2], [3]], consumable: true }
/// nodes:
///   - id: source
///     source: { store: default, object: data }
///   - id: distinct
///     operation: distinct
///     kwargs: { key: x }
///     inputs: { default: source }
/// ```
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub retry: RetryConfig,
    #[serde(default)]
    pub stores: BTreeMap<String, StoreConfig>,
    #[serde(default)]
    pub nodes: Vec<NodeConfig>,
}

/// Retry policy lists. An empty `allow` list allows every operation not
/// on the `deny` list.
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct RetryConfig {
    #[serde(default)]
    pub allow: Vec<String>,
    #[serde(default)]
    pub deny: Vec<String>,
}

impl RetryConfig {
    pub fn policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.allow.iter().cloned(), self.deny.iter().cloned())
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct StoreConfig {
    #[serde(rename = "type")]
    pub store_type: String,
    #[serde(default)]
    pub objects: BTreeMap<String, ObjectConfig>,
}

/// Inline object of a `memory` store.
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct ObjectConfig {
    #[serde(default)]
    pub fields: Vec<String>,
    #[serde(default)]
    pub rows: Vec<Vec<Value>>,
    /// Served as a single-pass iterator when `true`.
    #[serde(default)]
    pub consumable: bool,
}

/// One graph node. Exactly one of `source` and `operation` must be set.
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct NodeConfig {
    pub id: String,
    #[serde(default)]
    pub source: Option<SourceConfig>,
    #[serde(default)]
    pub operation: Option<String>,
    #[serde(default)]
    pub args: Vec<Value>,
    #[serde(default)]
    pub kwargs: BTreeMap<String, Value>,
    /// Outlet name to id of the node feeding it.
    #[serde(default)]
    pub inputs: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SourceConfig {
    pub store: String,
    pub object: String,
    #[serde(default)]
    pub params: BTreeMap<String, Value>,
}

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, Box<dyn std::error::Error>> {
    let content = fs::read_to_string(path)?;
    let cfg: Config = serde_yaml::from_str(&content)?;
    Ok(cfg)
}

pub fn load_and_validate_config<P: AsRef<Path>>(
    path: P,
) -> Result<Config, Box<dyn std::error::Error>> {
    let cfg = load_config(path)?;

    if let Err(validation_errors) = crate::config::validate_config(&cfg) {
        let error_messages: Vec<String> = validation_errors.iter().map(|e| e.to_string()).collect();
        let combined_error = format!(
            "Configuration validation failed:\n{}",
            error_messages.join("\n")
        );
        return Err(combined_error.into());
    }

    Ok(cfg)
}
