// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Representation-agnostic operations.

use std::sync::Arc;

use serde_json::Value;

use crate::observability::messages::dispatch::FieldsInspected;
use crate::observability::messages::StructuredLog;
use crate::operation::{DispatchContext, Implementation, Operand, OperationResult, Parameters, Signature};

/// Operations that may change behavior; calls log a warning.
pub const EXPERIMENTAL: &[&str] = &["keep_fields", "drop_fields", "rename_fields"];

pub fn operations() -> Vec<(&'static str, Signature, Implementation)> {
    vec![
        ("keep_fields", Signature::any(1), Implementation::new(["obj", "keep"], keep_fields)),
        ("drop_fields", Signature::any(1), Implementation::new(["obj", "drop"], drop_fields)),
        ("rename_fields", Signature::any(1), Implementation::new(["obj", "rename"], rename_fields)),
        ("debug_fields", Signature::any(1), Implementation::new(["obj", "label"], debug_fields)),
    ]
}

/// Forwards parameter `name` to `field_filter` under the same name.
fn delegate_to_field_filter(ctx: &DispatchContext<'_>, operands: &[Operand], name: &str) -> OperationResult {
    let value = ctx.param(name).cloned().unwrap_or(Value::Null);
    let result = ctx.call("field_filter", operands, &Parameters::new().with_kwarg(name, value))?;
    Ok(result)
}

fn keep_fields(ctx: &DispatchContext<'_>, operands: &[Operand]) -> OperationResult {
    delegate_to_field_filter(ctx, operands, "keep")
}

fn drop_fields(ctx: &DispatchContext<'_>, operands: &[Operand]) -> OperationResult {
    delegate_to_field_filter(ctx, operands, "drop")
}

fn rename_fields(ctx: &DispatchContext<'_>, operands: &[Operand]) -> OperationResult {
    delegate_to_field_filter(ctx, operands, "rename")
}

/// Logs the fields of its operand and passes it through unchanged.
fn debug_fields(ctx: &DispatchContext<'_>, operands: &[Operand]) -> OperationResult {
    let obj = operands[0].as_object(0)?;
    FieldsInspected {
        label: ctx.optional_str_param("label")?,
        fields: &obj.fields().to_string(),
    }
    .log();
    Ok(Arc::clone(obj))
}
