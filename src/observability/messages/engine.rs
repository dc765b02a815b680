// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for execution engine lifecycle events.
//!
//! This module contains message types for logging events related to:
//! * Plan construction
//! * Run lifecycle (start, completion, failure)
//! * Per-step evaluation and consumable retention

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// An execution plan was built from a graph.
///
/// # Log Level
/// `debug!` - Planning detail
pub struct PlanCreated {
    pub step_count: usize,
    pub connection_count: usize,
}

impl Display for PlanCreated {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Planned {} steps over {} connections",
            self.step_count, self.connection_count
        )
    }
}

impl StructuredLog for PlanCreated {
    fn log(&self) {
        tracing::debug!(
            step_count = self.step_count,
            connection_count = self.connection_count,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "plan",
            span_name = name,
            step_count = self.step_count,
            connection_count = self.connection_count,
        )
    }
}

/// Execution started.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use bubblegraph::observability::messages::engine::ExecutionStarted;
///
/// let msg = ExecutionStarted { step_count: 5 };
///
/// tracing::info!("{}", msg);
/// ```
pub struct ExecutionStarted {
    pub step_count: usize,
}

impl Display for ExecutionStarted {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Starting execution of {} steps", self.step_count)
    }
}

impl StructuredLog for ExecutionStarted {
    fn log(&self) {
        tracing::info!(step_count = self.step_count, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!("execution", span_name = name, step_count = self.step_count)
    }
}

/// Execution completed successfully.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use bubblegraph::observability::messages::engine::ExecutionCompleted;
/// use std::time::Duration;
///
/// let msg = ExecutionCompleted {
///     step_count: 5,
///     duration: Duration::from_millis(250),
/// };
///
/// tracing::info!("{}", msg);
/// ```
pub struct ExecutionCompleted {
    pub step_count: usize,
    pub duration: std::time::Duration,
}

impl Display for ExecutionCompleted {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Execution completed: {} steps in {:?}",
            self.step_count, self.duration
        )
    }
}

impl StructuredLog for ExecutionCompleted {
    fn log(&self) {
        tracing::info!(
            step_count = self.step_count,
            duration_ms = self.duration.as_millis() as u64,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "execution_completed",
            span_name = name,
            step_count = self.step_count,
            duration = ?self.duration,
        )
    }
}

/// Execution failed with error.
///
/// # Log Level
/// `error!` - Failure requiring attention
pub struct ExecutionFailed<'a> {
    pub node: &'a str,
    pub error: &'a dyn std::error::Error,
}

impl Display for ExecutionFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Execution failed at node '{}': {}", self.node, self.error)
    }
}

impl StructuredLog for ExecutionFailed<'_> {
    fn log(&self) {
        tracing::error!(node = self.node, error = %self.error, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::error_span!(
            "execution_failed",
            span_name = name,
            node = self.node,
            error = %self.error,
        )
    }
}

/// A step produced its result.
///
/// # Log Level
/// `debug!` - Per-step detail
pub struct StepEvaluated<'a> {
    pub node: &'a str,
    pub description: &'a str,
    pub consumable: bool,
}

impl Display for StepEvaluated<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Evaluated node '{}' ({})", self.node, self.description)
    }
}

impl StructuredLog for StepEvaluated<'_> {
    fn log(&self) {
        tracing::debug!(
            node = self.node,
            description = self.description,
            consumable = self.consumable,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "step",
            span_name = name,
            node = self.node,
            description = self.description,
        )
    }
}

/// A consumable result was replaced by its retained form.
///
/// # Log Level
/// `debug!` - Per-step detail
pub struct ConsumableRetained<'a> {
    pub node: &'a str,
    pub consumption: usize,
}

impl Display for ConsumableRetained<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Retained consumable result of node '{}' for {} readers",
            self.node, self.consumption
        )
    }
}

impl StructuredLog for ConsumableRetained<'_> {
    fn log(&self) {
        tracing::debug!(
            node = self.node,
            consumption = self.consumption,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "retention",
            span_name = name,
            node = self.node,
            consumption = self.consumption,
        )
    }
}
