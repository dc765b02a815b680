// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::{BTreeMap, HashMap, VecDeque};
use std::fmt;

use crate::config::consts::{DEFAULT_OUTLET, NODE_NAME_PREFIX};
use crate::errors::GraphError;
use crate::graph::Node;
use crate::observability::messages::graph::{NodeAdded, TopologicalSortFailed};
use crate::observability::messages::StructuredLog;

/// Stable handle of a node within one [`Graph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A node reference by handle or by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeRef<'a> {
    Id(NodeId),
    Name(&'a str),
}

impl From<NodeId> for NodeRef<'_> {
    fn from(id: NodeId) -> Self {
        NodeRef::Id(id)
    }
}

impl<'a> From<&'a str> for NodeRef<'a> {
    fn from(name: &'a str) -> Self {
        NodeRef::Name(name)
    }
}

impl<'a> From<&'a String> for NodeRef<'a> {
    fn from(name: &'a String) -> Self {
        NodeRef::Name(name)
    }
}

impl fmt::Display for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeRef::Id(id) => write!(f, "{}", id),
            NodeRef::Name(name) => f.write_str(name),
        }
    }
}

/// `source`'s output feeds outlet `outlet` of `target`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    pub source: NodeId,
    pub target: NodeId,
    pub outlet: String,
}

#[derive(Debug, Clone)]
struct Entry {
    name: String,
    node: Node,
}

/// Nodes and the outlet-named connections between them.
///
/// Nodes live in an arena addressed by [`NodeId`]; connections are plain
/// `(source, target, outlet)` triples. Cloning a graph forks the pipeline.
/// Acyclicity is checked by [`Graph::sorted_nodes`], not on insertion.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    nodes: BTreeMap<NodeId, Entry>,
    names: HashMap<String, NodeId>,
    connections: Vec<Connection>,
    next_id: usize,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `node` under `name`, or under a generated unique name.
    pub fn add(&mut self, node: Node, name: Option<&str>) -> Result<NodeId, GraphError> {
        let name = match name {
            Some("") => return Err(GraphError::EmptyNodeName),
            Some(name) if self.names.contains_key(name) => {
                return Err(GraphError::DuplicateNodeName(name.to_string()))
            }
            Some(name) => name.to_string(),
            None => self.generate_name(),
        };

        let id = NodeId(self.next_id);
        self.next_id += 1;

        NodeAdded {
            node: &name,
            kind: node.kind(),
        }
        .log();

        self.names.insert(name.clone(), id);
        self.nodes.insert(id, Entry { name, node });
        Ok(id)
    }

    fn generate_name(&self) -> String {
        let mut index = self.next_id;
        loop {
            let candidate = format!("{}{}", NODE_NAME_PREFIX, index);
            if !self.names.contains_key(&candidate) {
                return candidate;
            }
            index += 1;
        }
    }

    /// Connects `source` to the default outlet of `target`.
    pub fn connect<'s, 't>(
        &mut self,
        source: impl Into<NodeRef<'s>>,
        target: impl Into<NodeRef<'t>>,
    ) -> Result<(), GraphError> {
        self.connect_outlet(source, target, DEFAULT_OUTLET)
    }

    pub fn connect_outlet<'s, 't>(
        &mut self,
        source: impl Into<NodeRef<'s>>,
        target: impl Into<NodeRef<'t>>,
        outlet: &str,
    ) -> Result<(), GraphError> {
        let source = self.node_id(source)?;
        let target = self.node_id(target)?;

        let bound = self
            .connections
            .iter()
            .any(|connection| connection.target == target && connection.outlet == outlet);
        if bound {
            return Err(GraphError::OutletAlreadyBound {
                target: self.name_of(target),
                outlet: outlet.to_string(),
            });
        }

        self.connections.push(Connection {
            source,
            target,
            outlet: outlet.to_string(),
        });
        Ok(())
    }

    pub fn node_id<'a>(&self, node: impl Into<NodeRef<'a>>) -> Result<NodeId, GraphError> {
        match node.into() {
            NodeRef::Id(id) if self.nodes.contains_key(&id) => Ok(id),
            NodeRef::Id(id) => Err(GraphError::UnknownNode(id.to_string())),
            NodeRef::Name(name) => self
                .names
                .get(name)
                .copied()
                .ok_or_else(|| GraphError::UnknownNode(name.to_string())),
        }
    }

    pub fn node<'a>(&self, node: impl Into<NodeRef<'a>>) -> Result<&Node, GraphError> {
        let id = self.node_id(node)?;
        self.nodes
            .get(&id)
            .map(|entry| &entry.node)
            .ok_or_else(|| GraphError::UnknownNode(id.to_string()))
    }

    pub fn node_name(&self, id: NodeId) -> Option<&str> {
        self.nodes.get(&id).map(|entry| entry.name.as_str())
    }

    /// Iterates `(id, name, node)` in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &str, &Node)> {
        self.nodes
            .iter()
            .map(|(id, entry)| (*id, entry.name.as_str(), &entry.node))
    }

    pub fn rename<'a>(&mut self, node: impl Into<NodeRef<'a>>, name: &str) -> Result<(), GraphError> {
        let id = self.node_id(node)?;
        if name.is_empty() {
            return Err(GraphError::EmptyNodeName);
        }
        match self.names.get(name) {
            Some(existing) if *existing == id => return Ok(()),
            Some(_) => return Err(GraphError::DuplicateNodeName(name.to_string())),
            None => {}
        }

        let entry = self
            .nodes
            .get_mut(&id)
            .ok_or_else(|| GraphError::UnknownNode(id.to_string()))?;
        self.names.remove(&entry.name);
        entry.name = name.to_string();
        self.names.insert(entry.name.clone(), id);
        Ok(())
    }

    /// Removes a node together with every connection touching it.
    pub fn remove<'a>(&mut self, node: impl Into<NodeRef<'a>>) -> Result<Node, GraphError> {
        let id = self.node_id(node)?;
        let entry = self
            .nodes
            .remove(&id)
            .ok_or_else(|| GraphError::UnknownNode(id.to_string()))?;
        self.names.remove(&entry.name);
        self.connections
            .retain(|connection| connection.source != id && connection.target != id);
        Ok(entry.node)
    }

    /// Removes every connection from `source` to `target`, returning how many
    /// were removed.
    pub fn remove_connection<'s, 't>(
        &mut self,
        source: impl Into<NodeRef<'s>>,
        target: impl Into<NodeRef<'t>>,
    ) -> Result<usize, GraphError> {
        let source = self.node_id(source)?;
        let target = self.node_id(target)?;
        let before = self.connections.len();
        self.connections
            .retain(|connection| !(connection.source == source && connection.target == target));
        Ok(before - self.connections.len())
    }

    /// Outlet name to source node for every connection into `node`.
    pub fn sources<'a>(
        &self,
        node: impl Into<NodeRef<'a>>,
    ) -> Result<BTreeMap<String, NodeId>, GraphError> {
        let id = self.node_id(node)?;
        Ok(self
            .connections
            .iter()
            .filter(|connection| connection.target == id)
            .map(|connection| (connection.outlet.clone(), connection.source))
            .collect())
    }

    /// Nodes reading the output of `node`, one entry per connection.
    pub fn targets<'a>(&self, node: impl Into<NodeRef<'a>>) -> Result<Vec<NodeId>, GraphError> {
        let id = self.node_id(node)?;
        Ok(self
            .connections
            .iter()
            .filter(|connection| connection.source == id)
            .map(|connection| connection.target)
            .collect())
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Topological order of all nodes (Kahn's algorithm).
    ///
    /// Nodes that become ready at the same time are emitted in insertion
    /// order. Fails with [`GraphError::CycleDetected`] when connections remain
    /// after no node is left without incoming edges.
    pub fn sorted_nodes(&self) -> Result<Vec<NodeId>, GraphError> {
        let mut in_degree: BTreeMap<NodeId, usize> =
            self.nodes.keys().map(|id| (*id, 0)).collect();
        for connection in &self.connections {
            *in_degree.entry(connection.target).or_insert(0) += 1;
        }

        let mut queue: VecDeque<NodeId> = in_degree
            .iter()
            .filter(|(_, degree)| **degree == 0)
            .map(|(id, _)| *id)
            .collect();

        let mut sorted = Vec::with_capacity(self.nodes.len());
        let mut removed_connections = 0;

        while let Some(id) = queue.pop_front() {
            sorted.push(id);

            for connection in self.connections.iter().filter(|c| c.source == id) {
                removed_connections += 1;
                if let Some(degree) = in_degree.get_mut(&connection.target) {
                    *degree -= 1;
                    if *degree == 0 {
                        queue.push_back(connection.target);
                    }
                }
            }
        }

        if removed_connections < self.connections.len() {
            let failure = TopologicalSortFailed {
                remaining: self.connections.len() - removed_connections,
                total: self.connections.len(),
            };
            failure.log();
            return Err(GraphError::CycleDetected {
                remaining: failure.remaining,
                total: failure.total,
            });
        }

        Ok(sorted)
    }

    pub(crate) fn name_of(&self, id: NodeId) -> String {
        self.node_name(id)
            .map(str::to_string)
            .unwrap_or_else(|| id.to_string())
    }
}
