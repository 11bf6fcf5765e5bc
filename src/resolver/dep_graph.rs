//! Named dependency graph with deterministic build ordering.
//!
//! Nodes are identified by name. An edge `a -> b` means `a` depends on `b`,
//! so `b` must be generated before `a`.

use std::collections::{BTreeSet, HashMap, HashSet};

use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;

use crate::resolver::errors::ResolveError;

/// A directed graph of named nodes.
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    graph: DiGraph<String, ()>,
    nodes: HashMap<String, NodeIndex>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node. Adding an existing name is a no-op.
    pub fn add_node(&mut self, name: &str) -> NodeIndex {
        if let Some(&node) = self.nodes.get(name) {
            return node;
        }
        let node = self.graph.add_node(name.to_string());
        self.nodes.insert(name.to_string(), node);
        node
    }

    /// Record that `from` depends on `to`, adding missing nodes.
    pub fn add_dependency(&mut self, from: &str, to: &str) {
        let from = self.add_node(from);
        let to = self.add_node(to);
        if !self.graph.contains_edge(from, to) {
            self.graph.add_edge(from, to, ());
        }
    }

    /// Direct dependencies of `name`, in the order they were added.
    pub fn dependencies(&self, name: &str) -> Vec<&str> {
        let Some(&node) = self.nodes.get(name) else {
            return Vec::new();
        };
        let mut edges: Vec<_> = self.graph.edges(node).collect();
        edges.sort_by_key(|e| e.id());
        edges
            .into_iter()
            .map(|e| self.graph[e.target()].as_str())
            .collect()
    }

    /// Nodes ordered so that every node comes after all of its
    /// dependencies. Ties are broken by insertion order, which makes the
    /// result stable across runs.
    pub fn build_order(&self) -> Result<Vec<String>, ResolveError> {
        if let Some(members) = self.find_cycle() {
            return Err(ResolveError::CycleDetected { members });
        }

        let mut remaining: HashMap<NodeIndex, usize> = self
            .graph
            .node_indices()
            .map(|n| (n, self.graph.neighbors(n).count()))
            .collect();

        let mut ready: BTreeSet<NodeIndex> = remaining
            .iter()
            .filter(|(_, count)| **count == 0)
            .map(|(&n, _)| n)
            .collect();

        let mut order = Vec::with_capacity(self.graph.node_count());
        while let Some(node) = ready.pop_first() {
            order.push(self.graph[node].clone());
            for dependent in self.graph.neighbors_directed(node, Direction::Incoming) {
                if let Some(count) = remaining.get_mut(&dependent) {
                    *count -= 1;
                    if *count == 0 {
                        ready.insert(dependent);
                    }
                }
            }
        }

        Ok(order)
    }

    /// Find one cycle, returned as a closed path (`a -> b -> a`).
    pub fn find_cycle(&self) -> Option<Vec<String>> {
        let component = tarjan_scc(&self.graph).into_iter().find(|scc| {
            scc.len() > 1 || self.graph.contains_edge(scc[0], scc[0])
        })?;

        let start = *component.iter().min()?;
        let members: HashSet<NodeIndex> = component.into_iter().collect();

        let mut path = vec![start];
        let mut visited = HashSet::from([start]);
        if self.walk_back_to(start, start, &members, &mut visited, &mut path) {
            Some(path.into_iter().map(|n| self.graph[n].clone()).collect())
        } else {
            None
        }
    }

    fn walk_back_to(
        &self,
        node: NodeIndex,
        start: NodeIndex,
        members: &HashSet<NodeIndex>,
        visited: &mut HashSet<NodeIndex>,
        path: &mut Vec<NodeIndex>,
    ) -> bool {
        let mut next: Vec<NodeIndex> = self.graph.neighbors(node).collect();
        next.sort();

        for n in next {
            if n == start {
                path.push(start);
                return true;
            }
            if members.contains(&n) && visited.insert(n) {
                path.push(n);
                if self.walk_back_to(n, start, members, visited, path) {
                    return true;
                }
                path.pop();
            }
        }
        false
    }
}
