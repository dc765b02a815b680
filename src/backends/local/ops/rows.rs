// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Operations over the `rows` representation.
//!
//! Every operation except `fetch_all` returns a consumable [`IterableObject`]
//! that reads its input lazily.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use serde_json::Value;

use crate::backends::local::objects::{IterableObject, RowListObject};
use crate::errors::DataObjectError;
use crate::operation::{DispatchContext, Implementation, Operand, OperationResult, Signature};
use crate::traits::{DataObjectRef, FieldList, Row};

pub fn operations() -> Vec<(&'static str, Signature, Implementation)> {
    vec![
        ("distinct", Signature::from(["rows"]), Implementation::new(["obj", "key"], distinct)),
        ("distinct_rows", Signature::from(["rows"]), Implementation::new(["obj", "key"], distinct_rows)),
        (
            "filter_by_value",
            Signature::from(["rows"]),
            Implementation::new(["obj", "key", "value", "discard"], filter_by_value),
        ),
        (
            "filter_by_set",
            Signature::from(["rows"]),
            Implementation::new(["obj", "field", "values", "discard"], filter_by_set),
        ),
        (
            "filter_by_range",
            Signature::from(["rows"]),
            Implementation::new(["obj", "field", "low", "high", "discard"], filter_by_range),
        ),
        ("filter_not_empty", Signature::from(["rows"]), Implementation::new(["obj", "field"], filter_not_empty)),
        ("filter_empty", Signature::from(["rows"]), Implementation::new(["obj", "field"], filter_empty)),
        (
            "first_unique",
            Signature::from(["rows"]),
            Implementation::new(["obj", "keys", "discard"], first_unique),
        ),
        (
            "field_filter",
            Signature::from(["rows"]),
            Implementation::new(["obj", "keep", "drop", "rename"], field_filter),
        ),
        (
            "sample",
            Signature::from(["rows"]),
            Implementation::new(["obj", "value", "discard", "mode"], sample),
        ),
        ("sort", Signature::from(["rows"]), Implementation::new(["obj", "orderby"], sort)),
        ("append", Signature::from(["rows[]"]), Implementation::new(["objects"], append)),
        (
            "join_details",
            Signature::from(["rows", "rows"]),
            Implementation::new(["master", "detail", "master_key", "detail_key"], join_details),
        ),
        ("fetch_all", Signature::from(["rows"]), Implementation::new(["obj"], fetch_all)),
    ]
}

fn iterable<I>(fields: FieldList, rows: I) -> OperationResult
where
    I: Iterator<Item = Row> + Send + 'static,
{
    Ok(Arc::new(IterableObject::new(fields, rows)))
}

/// Hashable identity of a tuple of values.
fn value_key(values: &[Value]) -> String {
    Value::Array(values.to_vec()).to_string()
}

fn project(row: &Row, indexes: &[usize]) -> Row {
    indexes.iter().map(|index| row[*index].clone()).collect()
}

/// Key fields given as `name` or `[names]`, defaulting to every field.
fn key_fields(ctx: &DispatchContext<'_>, name: &str, fields: &FieldList) -> Result<Vec<String>, DataObjectError> {
    match ctx.param(name) {
        None => Ok(fields.names().to_vec()),
        Some(_) => ctx.names_param(name),
    }
}

/// Indexes of the `key` fields in source field order. Repeated names count once.
fn key_indexes(fields: &FieldList, key: &[String]) -> Result<Vec<usize>, DataObjectError> {
    fields.indexes(key)?;
    Ok(fields
        .names()
        .iter()
        .enumerate()
        .filter(|(_, name)| key.contains(name))
        .map(|(index, _)| index)
        .collect())
}

/// Distinct key tuples. The output has only the key fields, in source order.
fn distinct(ctx: &DispatchContext<'_>, operands: &[Operand]) -> OperationResult {
    let obj = operands[0].as_object(0)?;
    let fields = obj.fields();
    let key = key_fields(ctx, "key", &fields)?;
    let indexes = key_indexes(&fields, &key)?;
    let output = FieldList::new(indexes.iter().map(|index| fields.names()[*index].clone()));

    let mut seen = HashSet::new();
    let rows = obj.rows()?.filter_map(move |row| {
        let projected = project(&row, &indexes);
        seen.insert(value_key(&projected)).then_some(projected)
    });

    iterable(output, rows)
}

/// First row of every distinct key.
fn distinct_rows(ctx: &DispatchContext<'_>, operands: &[Operand]) -> OperationResult {
    let obj = operands[0].as_object(0)?;
    let fields = obj.fields();
    let key = key_fields(ctx, "key", &fields)?;
    let indexes = key_indexes(&fields, &key)?;

    let mut seen = HashSet::new();
    let rows = obj
        .rows()?
        .filter(move |row| seen.insert(value_key(&project(row, &indexes))));

    iterable(fields, rows)
}

/// First row of every distinct key, or with `discard` every later duplicate.
fn first_unique(ctx: &DispatchContext<'_>, operands: &[Operand]) -> OperationResult {
    let obj = operands[0].as_object(0)?;
    let fields = obj.fields();
    let keys = key_fields(ctx, "keys", &fields)?;
    let indexes = key_indexes(&fields, &keys)?;
    let discard = ctx.bool_param("discard", false)?;

    let mut seen = HashSet::new();
    let rows = obj
        .rows()?
        .filter(move |row| seen.insert(value_key(&project(row, &indexes))) != discard);

    iterable(fields, rows)
}

fn filter_by_value(ctx: &DispatchContext<'_>, operands: &[Operand]) -> OperationResult {
    let obj = operands[0].as_object(0)?;
    let fields = obj.fields();
    let index = fields.index(ctx.str_param("key")?)?;
    let value = ctx.param("value").cloned().unwrap_or(Value::Null);
    let discard = ctx.bool_param("discard", false)?;

    let rows = obj
        .rows()?
        .filter(move |row| (row[index] == value) != discard);

    iterable(fields, rows)
}

fn filter_by_set(ctx: &DispatchContext<'_>, operands: &[Operand]) -> OperationResult {
    let obj = operands[0].as_object(0)?;
    let fields = obj.fields();
    let index = fields.index(ctx.str_param("field")?)?;
    let discard = ctx.bool_param("discard", false)?;

    let values: HashSet<String> = match ctx.param("values") {
        Some(Value::Array(items)) => items.iter().map(|item| value_key(std::slice::from_ref(item))).collect(),
        Some(_) => {
            return Err(DataObjectError::InvalidParameter {
                name: "values".to_string(),
                reason: "expected a list".to_string(),
            }
            .into())
        }
        None => {
            return Err(DataObjectError::MissingParameter {
                name: "values".to_string(),
            }
            .into())
        }
    };

    let rows = obj.rows()?.filter(move |row| {
        values.contains(&value_key(std::slice::from_ref(&row[index]))) != discard
    });

    iterable(fields, rows)
}

/// Rows with `low <= field <= high`. A missing or null bound is open.
fn filter_by_range(ctx: &DispatchContext<'_>, operands: &[Operand]) -> OperationResult {
    let obj = operands[0].as_object(0)?;
    let fields = obj.fields();
    let index = fields.index(ctx.str_param("field")?)?;
    let low = ctx.param("low").cloned();
    let high = ctx.param("high").cloned();
    let discard = ctx.bool_param("discard", false)?;

    let rows = obj.rows()?.filter(move |row| {
        let value = &row[index];
        let above = low
            .as_ref()
            .map_or(true, |low| compare_values(low, value) != Ordering::Greater);
        let below = high
            .as_ref()
            .map_or(true, |high| compare_values(value, high) != Ordering::Greater);
        (above && below) != discard
    });

    iterable(fields, rows)
}

fn filter_not_empty(ctx: &DispatchContext<'_>, operands: &[Operand]) -> OperationResult {
    let obj = operands[0].as_object(0)?;
    let fields = obj.fields();
    let index = fields.index(ctx.str_param("field")?)?;

    let rows = obj.rows()?.filter(move |row| !row[index].is_null());
    iterable(fields, rows)
}

/// Rows whose `field` is null or an empty string.
fn filter_empty(ctx: &DispatchContext<'_>, operands: &[Operand]) -> OperationResult {
    let obj = operands[0].as_object(0)?;
    let fields = obj.fields();
    let index = fields.index(ctx.str_param("field")?)?;

    let rows = obj
        .rows()?
        .filter(move |row| row[index].is_null() || row[index].as_str() == Some(""));
    iterable(fields, rows)
}

fn optional_names(ctx: &DispatchContext<'_>, name: &str) -> Result<Option<Vec<String>>, DataObjectError> {
    match ctx.param(name) {
        None => Ok(None),
        Some(_) => ctx.names_param(name).map(Some),
    }
}

/// Keeps, drops and renames fields. `keep` and `drop` are exclusive.
fn field_filter(ctx: &DispatchContext<'_>, operands: &[Operand]) -> OperationResult {
    let obj = operands[0].as_object(0)?;
    let fields = obj.fields();
    let keep = optional_names(ctx, "keep")?;
    let drop = optional_names(ctx, "drop")?;

    if keep.is_some() && drop.is_some() {
        return Err(DataObjectError::InvalidParameter {
            name: "keep".to_string(),
            reason: "cannot be combined with 'drop'".to_string(),
        }
        .into());
    }

    let rename: HashMap<String, String> = match ctx.param("rename") {
        None => HashMap::new(),
        Some(Value::Object(map)) => map
            .iter()
            .map(|(from, to)| match to.as_str() {
                Some(to) => Ok((from.clone(), to.to_string())),
                None => Err(DataObjectError::InvalidParameter {
                    name: "rename".to_string(),
                    reason: format!("new name of '{}' is not a string", from),
                }),
            })
            .collect::<Result<_, _>>()?,
        Some(_) => {
            return Err(DataObjectError::InvalidParameter {
                name: "rename".to_string(),
                reason: "expected a mapping of old to new names".to_string(),
            }
            .into())
        }
    };

    for name in keep.iter().chain(drop.iter()).flatten().chain(rename.keys()) {
        fields.index(name)?;
    }

    let mut indexes = Vec::new();
    let mut output = FieldList::default();
    for (index, name) in fields.names().iter().enumerate() {
        let selected = match (&keep, &drop) {
            (Some(keep), _) => keep.contains(name),
            (_, Some(drop)) => !drop.contains(name),
            _ => true,
        };
        if selected {
            indexes.push(index);
            output.push(rename.get(name).unwrap_or(name).clone());
        }
    }

    let rows = obj.rows()?.map(move |row| project(&row, &indexes));
    iterable(output, rows)
}

/// `first`: the first `value` rows. `nth`: every `value`-th row starting
/// with the first. `discard` inverts the selection.
fn sample(ctx: &DispatchContext<'_>, operands: &[Operand]) -> OperationResult {
    let obj = operands[0].as_object(0)?;
    let fields = obj.fields();
    let value = ctx.usize_param("value", 0)?;
    let discard = ctx.bool_param("discard", false)?;
    let mode = ctx.optional_str_param("mode")?.unwrap_or("first");

    let invalid = |reason: &str| DataObjectError::InvalidParameter {
        name: "mode".to_string(),
        reason: reason.to_string(),
    };

    match (mode, discard) {
        ("first", false) => iterable(fields, obj.rows()?.take(value)),
        ("first", true) => iterable(fields, obj.rows()?.skip(value)),
        ("nth", _) if value == 0 => Err(DataObjectError::InvalidParameter {
            name: "value".to_string(),
            reason: "step must be positive".to_string(),
        }
        .into()),
        ("nth", false) => iterable(fields, obj.rows()?.step_by(value)),
        ("nth", true) => iterable(
            fields,
            obj.rows()?
                .enumerate()
                .filter(move |(index, _)| index % value != 0)
                .map(|(_, row)| row),
        ),
        ("random", _) => Err(invalid("random sampling is not supported").into()),
        (other, _) => Err(invalid(&format!("unknown sample mode '{}'", other)).into()),
    }
}

/// Total order over JSON values: null, booleans, numbers, strings, then
/// composite values by their text.
pub(crate) fn compare_values(left: &Value, right: &Value) -> Ordering {
    fn rank(value: &Value) -> u8 {
        match value {
            Value::Null => 0,
            Value::Bool(_) => 1,
            Value::Number(_) => 2,
            Value::String(_) => 3,
            Value::Array(_) => 4,
            Value::Object(_) => 5,
        }
    }

    match (left, right) {
        (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
        (Value::Number(a), Value::Number(b)) => {
            let a = a.as_f64().unwrap_or(f64::NAN);
            let b = b.as_f64().unwrap_or(f64::NAN);
            a.partial_cmp(&b).unwrap_or(Ordering::Equal)
        }
        (Value::String(a), Value::String(b)) => a.cmp(b),
        _ => rank(left)
            .cmp(&rank(right))
            .then_with(|| left.to_string().cmp(&right.to_string())),
    }
}

/// Order list given as `field`, `[field, ...]` or `[[field, "asc"|"desc"], ...]`.
fn order_list(ctx: &DispatchContext<'_>, fields: &FieldList) -> Result<Vec<(usize, bool)>, DataObjectError> {
    let invalid = |reason: String| DataObjectError::InvalidParameter {
        name: "orderby".to_string(),
        reason,
    };

    let entries: Vec<Value> = match ctx.param("orderby") {
        None => return Err(DataObjectError::MissingParameter { name: "orderby".to_string() }),
        Some(Value::Array(items)) => items.clone(),
        Some(single) => vec![single.clone()],
    };

    entries
        .iter()
        .map(|entry| {
            let (field, order) = match entry {
                Value::String(field) => (field.as_str(), "asc"),
                Value::Array(pair) => match pair.as_slice() {
                    [Value::String(field), Value::String(order)] => (field.as_str(), order.as_str()),
                    _ => return Err(invalid(format!("malformed order entry {}", entry))),
                },
                _ => return Err(invalid(format!("malformed order entry {}", entry))),
            };

            let descending = if order.starts_with("asc") {
                false
            } else if order.starts_with("desc") {
                true
            } else {
                return Err(invalid(format!("unknown order '{}' for field '{}'", order, field)));
            };

            Ok((fields.index(field)?, descending))
        })
        .collect()
}

fn sort(ctx: &DispatchContext<'_>, operands: &[Operand]) -> OperationResult {
    let obj = operands[0].as_object(0)?;
    let fields = obj.fields();
    let order = order_list(ctx, &fields)?;

    let mut rows: Vec<Row> = obj.rows()?.collect();
    rows.sort_by(|left, right| {
        order
            .iter()
            .map(|(index, descending)| {
                let ordering = compare_values(&left[*index], &right[*index]);
                if *descending {
                    ordering.reverse()
                } else {
                    ordering
                }
            })
            .find(|ordering| *ordering != Ordering::Equal)
            .unwrap_or(Ordering::Equal)
    });

    iterable(fields, rows.into_iter())
}

/// Concatenates objects that share the same fields.
fn append(_ctx: &DispatchContext<'_>, operands: &[Operand]) -> OperationResult {
    let objects = operands[0].as_list(0)?;
    let Some(first) = objects.first() else {
        return Err(DataObjectError::InvalidOperand {
            position: 0,
            expected: "a non-empty list".to_string(),
        }
        .into());
    };
    let fields = first.fields();

    if let Some(other) = objects.iter().find(|object| object.fields() != fields) {
        return Err(DataObjectError::FieldMismatch {
            reason: format!("cannot append {} to {}", other.fields(), fields),
        }
        .into());
    }

    let iterators = objects
        .iter()
        .map(|object| object.rows())
        .collect::<Result<Vec<_>, _>>()?;

    iterable(fields, iterators.into_iter().flatten())
}

/// Single key name from a `name` or one-element `[name]` parameter.
fn single_key(ctx: &DispatchContext<'_>, name: &str) -> Result<String, DataObjectError> {
    let mut key = ctx.names_param(name)?;
    match key.len() {
        1 => Ok(key.remove(0)),
        _ => Err(DataObjectError::InvalidParameter {
            name: name.to_string(),
            reason: "compound keys are not supported".to_string(),
        }),
    }
}

/// Inner master-detail join on one key; the detail key column is omitted
/// from the output.
fn join_details(ctx: &DispatchContext<'_>, operands: &[Operand]) -> OperationResult {
    let master: &DataObjectRef = operands[0].as_object(0)?;
    let detail: &DataObjectRef = operands[1].as_object(1)?;
    let master_fields = master.fields();
    let detail_fields = detail.fields();

    let master_index = master_fields.index(&single_key(ctx, "master_key")?)?;
    let detail_key = single_key(ctx, "detail_key")?;
    let detail_index = detail_fields.index(&detail_key)?;

    let mut details: HashMap<String, Row> = HashMap::new();
    for mut row in detail.rows()? {
        let key = row.remove(detail_index);
        details.insert(value_key(std::slice::from_ref(&key)), row);
    }

    let mut output = master_fields.clone();
    for name in detail_fields.names() {
        if *name != detail_key {
            output.push(name.clone());
        }
    }

    let rows = master.rows()?.filter_map(move |mut row| {
        let detail_row = details.get(&value_key(std::slice::from_ref(&row[master_index])))?;
        row.extend(detail_row.iter().cloned());
        Some(row)
    });

    iterable(output, rows)
}

/// Materializes all rows into a re-readable object.
fn fetch_all(_ctx: &DispatchContext<'_>, operands: &[Operand]) -> OperationResult {
    let obj = operands[0].as_object(0)?;
    let rows: Vec<Row> = obj.rows()?.collect();
    Ok(Arc::new(RowListObject::new(obj.fields(), rows)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::local::local_library;
    use crate::errors::DispatchError;
    use crate::operation::{Parameters, Resolver};
    use serde_json::json;

    fn people() -> DataObjectRef {
        Arc::new(RowListObject::new(
            FieldList::new(["id", "city", "score"]),
            vec![
                vec![json!(1), json!("Oslo"), json!(10)],
                vec![json!(2), json!("Rome"), Value::Null],
                vec![json!(3), json!("Oslo"), json!(25)],
                vec![json!(4), json!(""), json!(40)],
                vec![json!(5), json!("Rome"), json!(5)],
            ],
        ))
    }

    fn call(name: &str, operands: Vec<Operand>, parameters: Parameters) -> (Vec<String>, Vec<Row>) {
        let resolver = Resolver::new(local_library().unwrap());
        let result = resolver.call(name, &operands, &parameters).unwrap();
        let rows = result.rows().unwrap().collect();
        (result.fields().names().to_vec(), rows)
    }

    fn ids(rows: &[Row]) -> Vec<Value> {
        rows.iter().map(|row| row[0].clone()).collect()
    }

    #[test]
    fn test_distinct_keeps_source_field_order_table_driven() {
        struct TestCase {
            name: &'static str,
            key: Value,
            expected_fields: Vec<&'static str>,
            expected_rows: usize,
        }

        let test_cases = vec![
            TestCase {
                name: "key listed out of source order",
                key: json!(["city", "id"]),
                expected_fields: vec!["id", "city"],
                expected_rows: 5,
            },
            TestCase {
                name: "repeated key name",
                key: json!(["city", "city"]),
                expected_fields: vec!["city"],
                expected_rows: 3,
            },
            TestCase {
                name: "single key",
                key: json!("score"),
                expected_fields: vec!["score"],
                expected_rows: 5,
            },
        ];

        for test_case in test_cases {
            let (fields, rows) = call(
                "distinct",
                vec![people().into()],
                Parameters::new().with_kwarg("key", test_case.key),
            );
            assert_eq!(fields, test_case.expected_fields, "Test case '{}'", test_case.name);
            assert_eq!(rows.len(), test_case.expected_rows, "Test case '{}'", test_case.name);
            assert!(
                rows.iter().all(|row| row.len() == fields.len()),
                "Test case '{}'",
                test_case.name
            );
        }

        let (_, rows) = call(
            "distinct",
            vec![people().into()],
            Parameters::new().with_kwarg("key", json!(["city", "id"])),
        );
        assert_eq!(rows[0], vec![json!(1), json!("Oslo")]);
    }

    #[test]
    fn test_distinct_unknown_key() {
        let resolver = Resolver::new(local_library().unwrap());
        let error = resolver
            .call(
                "distinct",
                &[people().into()],
                &Parameters::new().with_kwarg("key", json!(["id", "town"])),
            )
            .err()
            .unwrap();

        assert!(matches!(
            error,
            DispatchError::OperationFailed {
                source: DataObjectError::UnknownField { ref field },
                ..
            } if field == "town"
        ));
    }

    #[test]
    fn test_row_filters_table_driven() {
        struct TestCase {
            name: &'static str,
            operation: &'static str,
            parameters: Parameters,
            expected_ids: Vec<Value>,
        }

        let test_cases = vec![
            TestCase {
                name: "range with both bounds",
                operation: "filter_by_range",
                parameters: Parameters::new()
                    .with_kwarg("field", "score")
                    .with_kwarg("low", 10)
                    .with_kwarg("high", 25),
                expected_ids: vec![json!(1), json!(3)],
            },
            TestCase {
                name: "range with low bound only",
                operation: "filter_by_range",
                parameters: Parameters::new().with_kwarg("field", "score").with_kwarg("low", 20),
                expected_ids: vec![json!(3), json!(4)],
            },
            TestCase {
                name: "range with null high bound is open",
                operation: "filter_by_range",
                parameters: Parameters::new()
                    .with_kwarg("field", "id")
                    .with_kwarg("low", 4)
                    .with_kwarg("high", Value::Null),
                expected_ids: vec![json!(4), json!(5)],
            },
            TestCase {
                name: "range discard",
                operation: "filter_by_range",
                parameters: Parameters::new()
                    .with_kwarg("field", "score")
                    .with_kwarg("low", 10)
                    .with_kwarg("high", 25)
                    .with_kwarg("discard", true),
                expected_ids: vec![json!(2), json!(4), json!(5)],
            },
            TestCase {
                name: "not empty drops nulls",
                operation: "filter_not_empty",
                parameters: Parameters::new().with_kwarg("field", "score"),
                expected_ids: vec![json!(1), json!(3), json!(4), json!(5)],
            },
            TestCase {
                name: "empty string counts as empty",
                operation: "filter_empty",
                parameters: Parameters::new().with_kwarg("field", "city"),
                expected_ids: vec![json!(4)],
            },
            TestCase {
                name: "null counts as empty",
                operation: "filter_empty",
                parameters: Parameters::new().with_kwarg("field", "score"),
                expected_ids: vec![json!(2)],
            },
            TestCase {
                name: "first unique per key",
                operation: "first_unique",
                parameters: Parameters::new().with_kwarg("keys", "city"),
                expected_ids: vec![json!(1), json!(2), json!(4)],
            },
            TestCase {
                name: "first unique discard keeps duplicates",
                operation: "first_unique",
                parameters: Parameters::new()
                    .with_kwarg("keys", json!(["city"]))
                    .with_kwarg("discard", true),
                expected_ids: vec![json!(3), json!(5)],
            },
            TestCase {
                name: "first unique over every field",
                operation: "first_unique",
                parameters: Parameters::new(),
                expected_ids: vec![json!(1), json!(2), json!(3), json!(4), json!(5)],
            },
            TestCase {
                name: "every second row",
                operation: "sample",
                parameters: Parameters::new().with_kwarg("value", 2).with_kwarg("mode", "nth"),
                expected_ids: vec![json!(1), json!(3), json!(5)],
            },
            TestCase {
                name: "every second row discarded",
                operation: "sample",
                parameters: Parameters::new()
                    .with_kwarg("value", 2)
                    .with_kwarg("mode", "nth")
                    .with_kwarg("discard", true),
                expected_ids: vec![json!(2), json!(4)],
            },
        ];

        for test_case in test_cases {
            let (fields, rows) = call(test_case.operation, vec![people().into()], test_case.parameters);
            assert_eq!(fields, ["id", "city", "score"], "Test case '{}'", test_case.name);
            assert_eq!(ids(&rows), test_case.expected_ids, "Test case '{}'", test_case.name);
        }
    }

    #[test]
    fn test_join_details_last_detail_wins_and_unmatched_masters_drop() {
        let orders: DataObjectRef = Arc::new(RowListObject::new(
            FieldList::new(["order_id", "customer"]),
            vec![
                vec![json!(100), json!("a")],
                vec![json!(101), json!("b")],
                vec![json!(102), json!("z")],
            ],
        ));
        let customers: DataObjectRef = Arc::new(RowListObject::new(
            FieldList::new(["code", "name"]),
            vec![
                vec![json!("a"), json!("Ada")],
                vec![json!("b"), json!("Bob")],
                vec![json!("a"), json!("Alan")],
            ],
        ));

        let (fields, rows) = call(
            "join_details",
            vec![orders.into(), customers.into()],
            Parameters::new()
                .with_kwarg("master_key", "customer")
                .with_kwarg("detail_key", "code"),
        );

        assert_eq!(fields, ["order_id", "customer", "name"]);
        assert_eq!(
            rows,
            vec![
                vec![json!(100), json!("a"), json!("Alan")],
                vec![json!(101), json!("b"), json!("Bob")],
            ]
        );
    }
}
