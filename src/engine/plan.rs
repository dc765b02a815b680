// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::HashMap;
use std::fmt;

use crate::config::consts::DEFAULT_OUTLET;
use crate::errors::{DispatchError, ExecutionError};
use crate::graph::{Graph, Node, NodeId};
use crate::observability::messages::engine::PlanCreated;
use crate::observability::messages::StructuredLog;
use crate::operation::OperationLibrary;

/// One node of the plan with its operand outlets resolved to producing nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub node: NodeId,
    pub name: String,
    /// `(outlet, source)` in the operation's operand order; empty for sources.
    pub outlets: Vec<(String, NodeId)>,
}

/// Topologically ordered steps plus the number of connections reading each
/// node, computed once from the graph.
#[derive(Debug, Clone)]
pub struct ExecutionPlan {
    steps: Vec<Step>,
    consumption: HashMap<NodeId, usize>,
}

impl ExecutionPlan {
    /// Orders `graph` and binds every operand outlet of every operation node.
    ///
    /// Operand names come from the operation prototypes in `library`. The
    /// first operand also accepts a connection on the default outlet.
    pub fn build(graph: &Graph, library: &OperationLibrary) -> Result<Self, ExecutionError> {
        let order = graph.sorted_nodes()?;
        let mut steps = Vec::with_capacity(order.len());

        for id in order {
            let name = graph.name_of(id);
            let outlets = match graph.node(id)? {
                Node::Operation { operation, .. } => {
                    let prototype = library
                        .prototype(operation)
                        .ok_or_else(|| DispatchError::UnknownOperation(operation.clone()))?;
                    let sources = graph.sources(id)?;

                    prototype
                        .operands()
                        .iter()
                        .enumerate()
                        .map(|(position, outlet)| {
                            sources
                                .get(outlet)
                                .or_else(|| match position {
                                    0 => sources.get(DEFAULT_OUTLET),
                                    _ => None,
                                })
                                .map(|source| (outlet.clone(), *source))
                                .ok_or_else(|| ExecutionError::UnboundOutlet {
                                    node: name.clone(),
                                    outlet: outlet.clone(),
                                })
                        })
                        .collect::<Result<Vec<_>, _>>()?
                }
                _ => Vec::new(),
            };

            steps.push(Step {
                node: id,
                name,
                outlets,
            });
        }

        let mut consumption: HashMap<NodeId, usize> = HashMap::new();
        for connection in graph.connections() {
            *consumption.entry(connection.source).or_insert(0) += 1;
        }

        PlanCreated {
            step_count: steps.len(),
            connection_count: graph.connections().len(),
        }
        .log();

        Ok(Self { steps, consumption })
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Number of connections reading the output of `node`.
    pub fn consumption(&self, node: NodeId) -> usize {
        self.consumption.get(&node).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

impl fmt::Display for ExecutionPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: HashMap<NodeId, &str> = self
            .steps
            .iter()
            .map(|step| (step.node, step.name.as_str()))
            .collect();

        for step in &self.steps {
            write!(f, "evaluate {}", step.name)?;
            if !step.outlets.is_empty() {
                let inputs: Vec<String> = step
                    .outlets
                    .iter()
                    .map(|(outlet, source)| {
                        format!("{}={}", outlet, names.get(source).copied().unwrap_or("?"))
                    })
                    .collect();
                write!(f, " <- {}", inputs.join(", "))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
