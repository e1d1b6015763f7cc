// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::{BTreeSet, HashMap};

use crate::errors::ValidationError;

/// Module dependency graph in discovery order.
///
/// Edges point from a module to the modules it depends on. Node order is
/// the order modules were added, which is also the tie-break order of
/// [`DependencyGraph::topological_order`].
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    nodes: Vec<(String, Vec<String>)>,
    duplicates: Vec<String>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a module. A name added twice is recorded as a duplicate and the
    /// first definition is kept.
    pub fn add_module(&mut self, name: impl Into<String>, dependencies: Vec<String>) -> bool {
        let name = name.into();
        if self.contains(&name) {
            self.duplicates.push(name);
            return false;
        }
        self.nodes.push((name, dependencies));
        true
    }

    pub fn contains(&self, name: &str) -> bool {
        self.nodes.iter().any(|(n, _)| n == name)
    }

    pub fn dependencies(&self, name: &str) -> Option<&[String]> {
        self.nodes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, deps)| deps.as_slice())
    }

    /// Module names in discovery order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(|(n, _)| n.as_str())
    }

    pub fn edges(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.nodes.iter().map(|(n, deps)| (n.as_str(), deps.as_slice()))
    }

    pub fn duplicates(&self) -> &[String] {
        &self.duplicates
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Kahn's algorithm: every module comes after all of its dependencies.
    /// Among modules that are ready at the same time, the one discovered
    /// first goes first.
    ///
    /// Dependencies on names outside the graph are ignored here; run
    /// [`crate::config::validate_dependency_graph`] first to report them.
    pub fn topological_order(&self) -> Result<Vec<String>, ValidationError> {
        let index: HashMap<&str, usize> = self
            .nodes
            .iter()
            .enumerate()
            .map(|(i, (n, _))| (n.as_str(), i))
            .collect();

        let mut in_degree = vec![0usize; self.nodes.len()];
        let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); self.nodes.len()];
        for (i, (_, deps)) in self.nodes.iter().enumerate() {
            let unique: BTreeSet<usize> = deps.iter().filter_map(|d| index.get(d.as_str()).copied()).collect();
            in_degree[i] = unique.len();
            for dep in unique {
                dependents[dep].push(i);
            }
        }

        let mut ready: BTreeSet<usize> = (0..self.nodes.len()).filter(|&i| in_degree[i] == 0).collect();
        let mut order = Vec::with_capacity(self.nodes.len());

        while let Some(current) = ready.pop_first() {
            order.push(self.nodes[current].0.clone());
            for &dependent in &dependents[current] {
                in_degree[dependent] -= 1;
                if in_degree[dependent] == 0 {
                    ready.insert(dependent);
                }
            }
        }

        if order.len() < self.nodes.len() {
            let cycle = (0..self.nodes.len())
                .filter(|&i| in_degree[i] > 0)
                .map(|i| self.nodes[i].0.clone())
                .collect();
            return Err(ValidationError::CyclicDependency { cycle });
        }
        Ok(order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph(nodes: &[(&str, Vec<&str>)]) -> DependencyGraph {
        let mut graph = DependencyGraph::new();
        for (name, deps) in nodes {
            graph.add_module(*name, deps.iter().map(|d| d.to_string()).collect());
        }
        graph
    }

    #[test]
    fn test_dependencies_come_first() {
        let g = graph(&[("app", vec!["db", "auth"]), ("auth", vec!["db"]), ("db", vec![])]);
        assert_eq!(g.topological_order().unwrap(), vec!["db", "auth", "app"]);
    }

    #[test]
    fn test_ties_follow_discovery_order() {
        let g = graph(&[("root", vec!["b", "a"]), ("b", vec![]), ("a", vec![])]);
        assert_eq!(g.topological_order().unwrap(), vec!["b", "a", "root"]);
    }

    #[test]
    fn test_diamond_lists_shared_dependency_once() {
        let g = graph(&[
            ("top", vec!["left", "right"]),
            ("left", vec!["base"]),
            ("right", vec!["base"]),
            ("base", vec![]),
        ]);
        assert_eq!(
            g.topological_order().unwrap(),
            vec!["base", "left", "right", "top"]
        );
    }

    #[test]
    fn test_cycle_is_reported() {
        let g = graph(&[("a", vec!["b"]), ("b", vec!["a"]), ("c", vec![])]);
        match g.topological_order().unwrap_err() {
            ValidationError::CyclicDependency { cycle } => assert_eq!(cycle, vec!["a", "b"]),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_duplicate_names_are_recorded() {
        let mut g = graph(&[("a", vec![])]);
        assert!(!g.add_module("a", vec!["x".to_string()]));
        assert_eq!(g.duplicates(), &["a".to_string()]);
        assert_eq!(g.dependencies("a").unwrap().len(), 0);
    }
}
