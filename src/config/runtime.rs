// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::backends::local::StoreFactory;
use crate::config::{Config, NodeConfig};
use crate::engine::ExecutionEngine;
use crate::errors::RuntimeError;
use crate::graph::{Graph, Node};
use crate::operation::{OperationLibrary, Resolver};

/// Pipeline runtime builder - creates the graph and the execution engine from configuration.
///
/// The `RuntimeBuilder` coordinates store creation, graph construction and
/// resolver setup so the returned engine can run the returned graph as is.
///
/// # Examples
///
/// ## Building runtime from configuration
/// ```
/// use bubblegraph::backends::local::local_library;
/// use bubblegraph::config::{Config, RuntimeBuilder};
///
/// let config = Config::default();
/// let (graph, engine) = RuntimeBuilder::from_config(&config, local_library().unwrap()).unwrap();
///
/// assert!(graph.is_empty());
/// assert!(engine.resolver().library().contains("distinct"));
/// ```
pub struct RuntimeBuilder;

impl RuntimeBuilder {
    /// Build graph and engine from configuration.
    ///
    /// Creates and returns:
    /// - `Graph`: One node per configured node, named by its id, connected per its inputs
    /// - `ExecutionEngine`: Resolver over `library` with the configured retry policy,
    ///   plus every configured store
    ///
    /// # Arguments
    /// * `cfg` - Configuration, expected to have passed validation
    /// * `library` - Operations available to the graph's operation nodes
    pub fn from_config(
        cfg: &Config,
        library: OperationLibrary,
    ) -> Result<(Graph, ExecutionEngine), RuntimeError> {
        let resolver = Resolver::new(library).with_retry_policy(cfg.retry.policy());
        let mut engine = ExecutionEngine::new(resolver);

        for (name, store_config) in &cfg.stores {
            let store = StoreFactory::create_store(name, store_config).map_err(|reason| {
                RuntimeError::StoreCreationFailed {
                    store: name.clone(),
                    reason,
                }
            })?;
            engine = engine.with_store(name.clone(), store);
        }

        let graph = Self::build_graph(&cfg.nodes)?;
        Ok((graph, engine))
    }

    /// Adds every node first so inputs may reference nodes declared later.
    fn build_graph(nodes: &[NodeConfig]) -> Result<Graph, RuntimeError> {
        let mut graph = Graph::new();

        for node in nodes {
            graph.add(Self::node_from_config(node), Some(&node.id))?;
        }

        for node in nodes {
            for (outlet, input) in &node.inputs {
                graph.connect_outlet(input.as_str(), node.id.as_str(), outlet)?;
            }
        }

        Ok(graph)
    }

    fn node_from_config(node: &NodeConfig) -> Node {
        match (&node.source, &node.operation) {
            (Some(source), _) => Node::Store {
                store: source.store.clone(),
                object: source.object.clone(),
                params: source.params.clone(),
            },
            (None, operation) => Node::Operation {
                operation: operation.clone().unwrap_or_default(),
                args: node.args.clone(),
                kwargs: node.kwargs.clone(),
            },
        }
    }
}
