// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::io::Write;

use serde_json::{json, Value};

use crate::backends::local::local_library;
use crate::config::{load_and_validate_config, RuntimeBuilder};
use crate::errors::{ExecutionError, GraphError, RuntimeError};
use crate::traits::Row;

fn rows_of(results: &crate::engine::RunResults, name: &str) -> Vec<Row> {
    results
        .by_name(name)
        .unwrap()
        .rows()
        .unwrap()
        .collect()
}

fn write_config(yaml: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(yaml.as_bytes()).unwrap();
    file
}

/// Test that YAML configurations can be loaded and parsed correctly
#[test]
fn test_distinct_fanout_yaml_loading() {
    let config = load_and_validate_config("configs/distinct-fanout.yaml").unwrap();

    assert_eq!(config.nodes.len(), 4);
    assert_eq!(config.nodes[0].id, "source");
    assert_eq!(config.nodes[1].operation.as_deref(), Some("distinct"));
    assert_eq!(config.nodes[2].inputs["default"], "distinct");
    assert!(config.stores["default"].objects["data"].consumable);
}

/// A consumable distinct result read by two sinks is retained once
#[test]
fn test_distinct_fanout_runs_from_yaml() {
    let config = load_and_validate_config("configs/distinct-fanout.yaml").unwrap();
    let (graph, engine) = RuntimeBuilder::from_config(&config, local_library().unwrap()).unwrap();

    let results = engine.run(&graph).unwrap();

    let expected = vec![vec![json!(1)], vec![json!(2)], vec![json!(3)]];
    assert_eq!(rows_of(&results, "first_sink"), expected);
    assert_eq!(rows_of(&results, "second_sink"), expected);
    assert!(!results.by_name("distinct").unwrap().is_consumable());
}

#[test]
fn test_master_detail_runs_from_yaml() {
    let config = load_and_validate_config("configs/master-detail.yaml").unwrap();
    assert!(!config.retry.policy().can_retry("join_details"));

    let (graph, engine) = RuntimeBuilder::from_config(&config, local_library().unwrap()).unwrap();
    let results = engine.run(&graph).unwrap();

    let report = results.by_name("report").unwrap();
    assert_eq!(report.fields().names(), ["order_id", "amount", "name"]);
    assert_eq!(
        rows_of(&results, "report"),
        vec![
            vec![json!(103), json!(55), json!("Ada")],
            vec![json!(100), json!(30), json!("Grace")],
            vec![json!(101), json!(12), json!("Ada")],
        ]
    );
}

#[test]
fn test_store_creation_failure() {
    let file = write_config(
        r#"
stores:
  default:
    type: memory
    objects:
      data: { fields: [x, y], rows: [[1]] }
"#,
    );

    let config = load_and_validate_config(file.path()).unwrap();
    let error = RuntimeBuilder::from_config(&config, local_library().unwrap())
        .err()
        .unwrap();

    assert!(matches!(error, RuntimeError::StoreCreationFailed { ref store, .. } if store == "default"));
    assert!(error.to_string().contains("row 0 has 1 values but [x, y] declares 2"));
}

#[test]
fn test_cycle_is_rejected_at_plan_time() {
    let file = write_config(
        r#"
nodes:
  - id: a
    operation: fetch_all
    inputs: { default: b }
  - id: b
    operation: fetch_all
    inputs: { default: a }
"#,
    );

    let config = load_and_validate_config(file.path()).unwrap();
    let (graph, engine) = RuntimeBuilder::from_config(&config, local_library().unwrap()).unwrap();

    assert!(matches!(
        engine.plan(&graph),
        Err(ExecutionError::Graph(GraphError::CycleDetected { remaining: 2, total: 2 }))
    ));
}

#[test]
fn test_source_params_reach_graph_nodes() {
    let file = write_config(
        r#"
stores:
  default:
    type: memory
    objects:
      data: { fields: [x], rows: [[1]] }
nodes:
  - id: source
    source: { store: default, object: data, params: { limit: 10 } }
"#,
    );

    let config = load_and_validate_config(file.path()).unwrap();
    let (graph, engine) = RuntimeBuilder::from_config(&config, local_library().unwrap()).unwrap();

    match graph.node("source").unwrap() {
        crate::graph::Node::Store { params, .. } => {
            assert_eq!(params.get("limit"), Some(&Value::from(10)))
        }
        other => panic!("unexpected node {}", other),
    }
    assert_eq!(rows_of(&engine.run(&graph).unwrap(), "source"), vec![vec![json!(1)]]);
}
