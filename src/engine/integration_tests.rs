// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Engine runs over the local backend with real stores and operations.

use std::sync::Arc;

use serde_json::{json, Value};

use crate::backends::local::{local_library, MemoryStore, RowListObject};
use crate::engine::ExecutionEngine;
use crate::errors::{DataObjectError, DispatchError, ExecutionError};
use crate::graph::{Graph, Node};
use crate::observability::CollectingObserver;
use crate::operation::{Operand, Parameters, Resolver, Signature};
use crate::traits::{DataObjectRef, FieldList, Row};

fn cities() -> Vec<Row> {
    vec![
        vec![json!(1), json!("Oslo")],
        vec![json!(2), json!("Rome")],
        vec![json!(3), json!("Oslo")],
        vec![json!(4), json!("Lima")],
    ]
}

fn engine_with(resolver: Resolver, rows: Vec<Row>, consumable: bool) -> ExecutionEngine {
    let mut store = MemoryStore::new();
    store
        .insert("cities", FieldList::new(["id", "city"]), rows, consumable)
        .unwrap();
    ExecutionEngine::new(resolver).with_store("default", Arc::new(store))
}

fn engine() -> ExecutionEngine {
    engine_with(Resolver::new(local_library().unwrap()), cities(), true)
}

/// Runs `source -> node` and returns the node's fields and rows.
fn run_single(engine: &ExecutionEngine, node: Node) -> Result<(Vec<String>, Vec<Row>), ExecutionError> {
    let mut graph = Graph::new();
    graph.add(Node::store("default", "cities"), Some("source")).unwrap();
    graph.add(node, Some("target")).unwrap();
    graph.connect("source", "target").unwrap();

    let results = engine.run(&graph)?;
    let target = results.by_name("target").unwrap();
    let rows = target.rows().unwrap().collect();
    Ok((target.fields().names().to_vec(), rows))
}

fn ids(values: &[i64]) -> Vec<Row> {
    values.iter().map(|id| vec![json!(id)]).collect()
}

#[test]
fn test_distinct_shared_by_two_sinks() {
    let mut store = MemoryStore::new();
    store
        .insert(
            "data",
            FieldList::new(["x"]),
            vec![vec![json!(1)], vec![json!(2)], vec![json!(2)], vec![json!(3)]],
            true,
        )
        .unwrap();
    let engine = ExecutionEngine::new(Resolver::new(local_library().unwrap()))
        .with_store("default", Arc::new(store));

    let mut graph = Graph::new();
    let source = graph.add(Node::store("default", "data"), Some("S")).unwrap();
    let distinct = graph.add(Node::operation("distinct"), Some("D")).unwrap();
    let first = graph.add(Node::operation("fetch_all"), None).unwrap();
    let second = graph.add(Node::operation("fetch_all"), None).unwrap();
    graph.connect(source, distinct).unwrap();
    graph.connect(distinct, first).unwrap();
    graph.connect(distinct, second).unwrap();

    let plan = engine.plan(&graph).unwrap();
    assert_eq!(plan.consumption(distinct), 2);

    let results = engine.execute(&graph, &plan).unwrap();

    let expected = ids(&[1, 2, 3]);
    for sink in [first, second] {
        let rows: Vec<Row> = results.get(sink).unwrap().rows().unwrap().collect();
        assert_eq!(rows, expected);
    }
    // The retained distinct result is still readable.
    let retained: Vec<Row> = results.get(distinct).unwrap().rows().unwrap().collect();
    assert_eq!(retained, expected);
}

#[test]
fn test_local_operations_table_driven() {
    struct TestCase {
        name: &'static str,
        node: Node,
        expected_fields: &'static [&'static str],
        expected_rows: Vec<Row>,
    }

    let test_cases = vec![
        TestCase {
            name: "distinct on one key",
            node: Node::operation("distinct").with_kwarg("key", "city"),
            expected_fields: &["city"],
            expected_rows: vec![vec![json!("Oslo")], vec![json!("Rome")], vec![json!("Lima")]],
        },
        TestCase {
            name: "distinct rows keep the first row per key",
            node: Node::operation("distinct_rows").with_kwarg("key", json!(["city"])),
            expected_fields: &["id", "city"],
            expected_rows: vec![cities()[0].clone(), cities()[1].clone(), cities()[3].clone()],
        },
        TestCase {
            name: "filter by value",
            node: Node::operation("filter_by_value")
                .with_kwarg("key", "city")
                .with_kwarg("value", "Oslo"),
            expected_fields: &["id", "city"],
            expected_rows: vec![cities()[0].clone(), cities()[2].clone()],
        },
        TestCase {
            name: "filter by value discarding matches",
            node: Node::operation("filter_by_value")
                .with_arg("city")
                .with_arg("Oslo")
                .with_arg(true),
            expected_fields: &["id", "city"],
            expected_rows: vec![cities()[1].clone(), cities()[3].clone()],
        },
        TestCase {
            name: "filter by set",
            node: Node::operation("filter_by_set")
                .with_kwarg("field", "id")
                .with_kwarg("values", json!([2, 4, 9])),
            expected_fields: &["id", "city"],
            expected_rows: vec![cities()[1].clone(), cities()[3].clone()],
        },
        TestCase {
            name: "sample first rows",
            node: Node::operation("sample").with_arg(2),
            expected_fields: &["id", "city"],
            expected_rows: cities()[..2].to_vec(),
        },
        TestCase {
            name: "sample discarding first rows",
            node: Node::operation("sample").with_arg(3).with_kwarg("discard", true),
            expected_fields: &["id", "city"],
            expected_rows: cities()[3..].to_vec(),
        },
        TestCase {
            name: "sample every second row",
            node: Node::operation("sample").with_arg(2).with_kwarg("mode", "nth"),
            expected_fields: &["id", "city"],
            expected_rows: vec![cities()[0].clone(), cities()[2].clone()],
        },
        TestCase {
            name: "sort descending then ascending",
            node: Node::operation("sort").with_kwarg("orderby", json!([["city", "desc"], "id"])),
            expected_fields: &["id", "city"],
            expected_rows: vec![
                cities()[1].clone(),
                cities()[0].clone(),
                cities()[2].clone(),
                cities()[3].clone(),
            ],
        },
        TestCase {
            name: "keep fields",
            node: Node::operation("keep_fields").with_arg(json!(["id"])),
            expected_fields: &["id"],
            expected_rows: ids(&[1, 2, 3, 4]),
        },
        TestCase {
            name: "drop fields",
            node: Node::operation("drop_fields").with_kwarg("drop", "city"),
            expected_fields: &["id"],
            expected_rows: ids(&[1, 2, 3, 4]),
        },
        TestCase {
            name: "rename fields",
            node: Node::operation("rename_fields").with_kwarg("rename", json!({"city": "town"})),
            expected_fields: &["id", "town"],
            expected_rows: cities(),
        },
        TestCase {
            name: "debug fields passes its operand through",
            node: Node::operation("debug_fields").with_kwarg("label", "cities"),
            expected_fields: &["id", "city"],
            expected_rows: cities(),
        },
        TestCase {
            name: "fetch all",
            node: Node::operation("fetch_all"),
            expected_fields: &["id", "city"],
            expected_rows: cities(),
        },
    ];

    for test_case in test_cases {
        let (fields, rows) = run_single(&engine(), test_case.node)
            .unwrap_or_else(|e| panic!("Test case '{}' failed: {}", test_case.name, e));

        assert_eq!(fields, test_case.expected_fields, "Test case '{}'", test_case.name);
        assert_eq!(rows, test_case.expected_rows, "Test case '{}'", test_case.name);
    }
}

#[test]
fn test_local_operation_failures_table_driven() {
    struct TestCase {
        name: &'static str,
        node: Node,
        expected_source: DataObjectError,
    }

    let test_cases = vec![
        TestCase {
            name: "unknown key field",
            node: Node::operation("distinct").with_kwarg("key", "country"),
            expected_source: DataObjectError::UnknownField {
                field: "country".to_string(),
            },
        },
        TestCase {
            name: "sort needs an order",
            node: Node::operation("sort"),
            expected_source: DataObjectError::MissingParameter {
                name: "orderby".to_string(),
            },
        },
        TestCase {
            name: "random sampling",
            node: Node::operation("sample").with_arg(1).with_kwarg("mode", "random"),
            expected_source: DataObjectError::InvalidParameter {
                name: "mode".to_string(),
                reason: "random sampling is not supported".to_string(),
            },
        },
        TestCase {
            name: "keep and drop together",
            node: Node::operation("field_filter")
                .with_kwarg("keep", "id")
                .with_kwarg("drop", "city"),
            expected_source: DataObjectError::InvalidParameter {
                name: "keep".to_string(),
                reason: "cannot be combined with 'drop'".to_string(),
            },
        },
    ];

    for test_case in test_cases {
        match run_single(&engine(), test_case.node) {
            Err(ExecutionError::Dispatch(DispatchError::OperationFailed { source, .. })) => {
                assert_eq!(source, test_case.expected_source, "Test case '{}'", test_case.name)
            }
            other => panic!("Test case '{}': unexpected {:?}", test_case.name, other.map(|_| ())),
        }
    }
}

#[test]
fn test_consumable_source_read_by_two_operations() {
    let mut graph = Graph::new();
    graph.add(Node::store("default", "cities"), Some("source")).unwrap();
    graph
        .add(Node::operation("filter_by_value").with_kwarg("key", "city").with_kwarg("value", "Oslo"), Some("oslo"))
        .unwrap();
    graph.add(Node::operation("sample").with_arg(1), Some("head")).unwrap();
    graph.connect("source", "oslo").unwrap();
    graph.connect("source", "head").unwrap();

    let results = engine().run(&graph).unwrap();

    let oslo: Vec<Row> = results.by_name("oslo").unwrap().rows().unwrap().collect();
    let head: Vec<Row> = results.by_name("head").unwrap().rows().unwrap().collect();
    assert_eq!(oslo, vec![cities()[0].clone(), cities()[2].clone()]);
    assert_eq!(head, vec![cities()[0].clone()]);
}

#[test]
fn test_consumed_result_cannot_be_read_again() {
    let (_, rows) = run_single(&engine(), Node::operation("sample").with_arg(1)).unwrap();
    assert_eq!(rows.len(), 1);

    let mut graph = Graph::new();
    graph.add(Node::store("default", "cities"), Some("source")).unwrap();
    let results = engine().run(&graph).unwrap();
    let source = results.by_name("source").unwrap();

    assert_eq!(source.rows().unwrap().count(), 4);
    assert_eq!(source.rows().err(), Some(DataObjectError::Consumed));
}

#[test]
fn test_append_list_operand() {
    let resolver = Resolver::new(local_library().unwrap());
    let fields = FieldList::new(["id"]);
    let first: DataObjectRef = Arc::new(RowListObject::new(fields.clone(), ids(&[1, 2])));
    let second: DataObjectRef = Arc::new(RowListObject::new(fields, ids(&[3])));

    let appended = resolver
        .call("append", &[Operand::from(vec![first, second])], &Parameters::new())
        .unwrap();
    assert_eq!(appended.rows().unwrap().collect::<Vec<_>>(), ids(&[1, 2, 3]));

    let mismatched: DataObjectRef = Arc::new(RowListObject::new(FieldList::new(["name"]), vec![]));
    let again: DataObjectRef = Arc::new(RowListObject::new(FieldList::new(["id"]), ids(&[1])));
    let error = resolver
        .call("append", &[Operand::from(vec![again, mismatched])], &Parameters::new())
        .unwrap_err();
    assert!(error.to_string().contains("cannot append [name] to [id]"));
}

#[test]
fn test_delegating_operation_history() {
    let observer = Arc::new(CollectingObserver::new());
    let resolver = Resolver::new(local_library().unwrap()).with_observer(observer.clone());

    let (fields, _) = run_single(
        &engine_with(resolver, cities(), false),
        Node::operation("keep_fields").with_kwarg("keep", json!(["city"])),
    )
    .unwrap();
    assert_eq!(fields, ["city"]);

    assert_eq!(observer.operations(), vec!["field_filter", "keep_fields"]);
    let history = observer.history();
    assert_eq!(history[0].signature, Signature::from(["rows"]));
    assert_eq!(history[1].signature, Signature::any(1));
    assert!(history.iter().all(|record| record.retries == 0 && record.tried.is_empty()));
}

#[test]
fn test_nulls_sort_before_numbers() {
    let rows = vec![
        vec![json!(3), json!("c")],
        vec![Value::Null, json!("n")],
        vec![json!(1), json!("a")],
    ];
    let engine = engine_with(Resolver::new(local_library().unwrap()), rows, false);

    let (_, sorted) = run_single(&engine, Node::operation("sort").with_arg("id")).unwrap();

    let ids: Vec<&Value> = sorted.iter().map(|row| &row[0]).collect();
    assert_eq!(ids, vec![&Value::Null, &json!(1), &json!(3)]);
}
