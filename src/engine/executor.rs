// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::time::Instant;

use crate::engine::{ExecutionPlan, Step};
use crate::errors::ExecutionError;
use crate::graph::{Graph, Node, NodeId};
use crate::observability::messages::engine::{
    ConsumableRetained, ExecutionCompleted, ExecutionFailed, ExecutionStarted, StepEvaluated,
};
use crate::observability::messages::StructuredLog;
use crate::operation::{Operand, Resolver};
use crate::traits::{DataObjectRef, Store};

/// Whether a result may be handed to another reader as is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Retention {
    /// Consumable and read by more than one connection; not read yet.
    Fresh,
    /// Replaced by its retained form.
    Retained,
    /// Non-consumable, or read by at most one connection.
    Reusable,
}

#[derive(Debug, Clone)]
enum StepState {
    Pending,
    Evaluated {
        result: DataObjectRef,
        retention: Retention,
    },
}

/// Evaluates graphs one step at a time through a [`Resolver`].
///
/// A consumable result read by more than one connection is replaced, once,
/// by its retained form before its first reader gets it. Every later reader
/// receives the same retained object.
#[derive(Clone)]
pub struct ExecutionEngine {
    resolver: Resolver,
    stores: HashMap<String, Arc<dyn Store>>,
}

impl ExecutionEngine {
    pub fn new(resolver: Resolver) -> Self {
        Self {
            resolver,
            stores: HashMap::new(),
        }
    }

    /// Registers `store` for source nodes referring to `name`.
    pub fn with_store(mut self, name: impl Into<String>, store: Arc<dyn Store>) -> Self {
        self.stores.insert(name.into(), store);
        self
    }

    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    pub fn store(&self, name: &str) -> Option<&Arc<dyn Store>> {
        self.stores.get(name)
    }

    pub fn plan(&self, graph: &Graph) -> Result<ExecutionPlan, ExecutionError> {
        ExecutionPlan::build(graph, self.resolver.library())
    }

    /// Plans and evaluates `graph`.
    pub fn run(&self, graph: &Graph) -> Result<RunResults, ExecutionError> {
        let plan = self.plan(graph)?;
        self.execute(graph, &plan)
    }

    /// Evaluates a plan previously built from `graph`.
    ///
    /// Fails at the first step that fails; earlier steps are not undone.
    pub fn execute(&self, graph: &Graph, plan: &ExecutionPlan) -> Result<RunResults, ExecutionError> {
        let started = ExecutionStarted {
            step_count: plan.len(),
        };
        let span = started.span("run");
        let _guard = span.enter();
        started.log();

        let start = Instant::now();
        let mut states: HashMap<NodeId, StepState> = plan
            .steps()
            .iter()
            .map(|step| (step.node, StepState::Pending))
            .collect();

        for step in plan.steps() {
            if let Err(error) = self.evaluate_step(graph, plan, step, &mut states) {
                ExecutionFailed {
                    node: &step.name,
                    error: &error,
                }
                .log();
                return Err(error);
            }
        }

        ExecutionCompleted {
            step_count: plan.len(),
            duration: start.elapsed(),
        }
        .log();

        let mut results = RunResults::default();
        for step in plan.steps() {
            if let Some(StepState::Evaluated { result, .. }) = states.remove(&step.node) {
                results.insert(step.node, step.name.clone(), result);
            }
        }
        Ok(results)
    }

    fn evaluate_step(
        &self,
        graph: &Graph,
        plan: &ExecutionPlan,
        step: &Step,
        states: &mut HashMap<NodeId, StepState>,
    ) -> Result<(), ExecutionError> {
        let mut operands = Vec::with_capacity(step.outlets.len());
        for (_, source) in &step.outlets {
            operands.push(Operand::from(self.read(graph, plan, *source, states)?));
        }

        let node = graph.node(step.node)?;
        let result = match node {
            Node::Store {
                store,
                object,
                params,
            } => {
                let backend = self
                    .stores
                    .get(store)
                    .ok_or_else(|| ExecutionError::UnknownStore {
                        node: step.name.clone(),
                        store: store.clone(),
                    })?;
                backend
                    .get_object(object, params)
                    .map_err(|source| ExecutionError::SourceFailed {
                        node: step.name.clone(),
                        source,
                    })?
            }
            Node::Object(object) => Arc::clone(object),
            Node::Operation { operation, .. } => {
                let parameters = node.parameters().unwrap_or_default();
                self.resolver.call(operation, &operands, &parameters)?
            }
        };

        let retention = if result.is_consumable() && plan.consumption(step.node) > 1 {
            Retention::Fresh
        } else {
            Retention::Reusable
        };

        StepEvaluated {
            node: &step.name,
            description: &node.to_string(),
            consumable: result.is_consumable(),
        }
        .log();

        states.insert(step.node, StepState::Evaluated { result, retention });
        Ok(())
    }

    /// Result of `node` for one reader, retaining it first when needed.
    fn read(
        &self,
        graph: &Graph,
        plan: &ExecutionPlan,
        node: NodeId,
        states: &mut HashMap<NodeId, StepState>,
    ) -> Result<DataObjectRef, ExecutionError> {
        let Some(StepState::Evaluated { result, retention }) = states.get_mut(&node) else {
            return Err(ExecutionError::InternalError {
                message: format!(
                    "node '{}' was read before it was evaluated",
                    graph.name_of(node)
                ),
            });
        };

        if *retention == Retention::Fresh {
            let name = graph.name_of(node);
            *result = result
                .retained()
                .map_err(|source| ExecutionError::RetentionFailed {
                    node: name.clone(),
                    source,
                })?;
            *retention = Retention::Retained;

            ConsumableRetained {
                node: &name,
                consumption: plan.consumption(node),
            }
            .log();
        }

        Ok(Arc::clone(result))
    }
}

/// Final result of every evaluated node, in evaluation order.
#[derive(Debug, Clone, Default)]
pub struct RunResults {
    order: Vec<NodeId>,
    results: BTreeMap<NodeId, DataObjectRef>,
    names: HashMap<String, NodeId>,
}

impl RunResults {
    fn insert(&mut self, node: NodeId, name: String, result: DataObjectRef) {
        self.order.push(node);
        self.results.insert(node, result);
        self.names.insert(name, node);
    }

    pub fn get(&self, node: NodeId) -> Option<&DataObjectRef> {
        self.results.get(&node)
    }

    pub fn by_name(&self, name: &str) -> Option<&DataObjectRef> {
        self.names.get(name).and_then(|node| self.results.get(node))
    }

    /// `(node, result)` pairs in evaluation order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &DataObjectRef)> {
        self.order
            .iter()
            .filter_map(|node| self.results.get(node).map(|result| (*node, result)))
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}
