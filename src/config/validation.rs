// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Structural validation of the module dependency graph.
//!
//! The checks run in a fixed order:
//!
//! 1. **Uniqueness**: every module name is defined once
//! 2. **References**: every dependency names a module in the graph
//! 3. **Cycles**: DFS with a recursion stack, reporting the cycle path
//!
//! Cycle detection only runs on a graph whose references all resolve.
//!
//! # Example
//!
//! ```rust
//! use the_loom::config::{validate_dependency_graph, DependencyGraph};
//! use the_loom::errors::ValidationError;
//!
//! let mut graph = DependencyGraph::new();
//! graph.add_module("acme.crm", vec!["acme.auth".to_string()]);
//! graph.add_module("acme.auth", vec!["acme.crm".to_string()]);
//!
//! let errors = validate_dependency_graph(&graph).unwrap_err();
//! assert!(matches!(errors[0], ValidationError::CyclicDependency { .. }));
//! ```

use std::collections::HashSet;

use crate::config::DependencyGraph;
use crate::errors::ValidationError;

/// Validates `graph`, accumulating every error found.
pub fn validate_dependency_graph(graph: &DependencyGraph) -> Result<(), Vec<ValidationError>> {
    let mut errors: Vec<ValidationError> = graph
        .duplicates()
        .iter()
        .map(|module| ValidationError::DuplicateModule {
            module: module.clone(),
        })
        .collect();

    if let Err(unresolved) = validate_dependency_references(graph) {
        errors.extend(unresolved);
    }

    if errors.is_empty() {
        if let Err(cycle) = validate_acyclic_graph(graph) {
            errors.extend(cycle);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_dependency_references(graph: &DependencyGraph) -> Result<(), Vec<ValidationError>> {
    let known: HashSet<&str> = graph.names().collect();
    let mut errors = Vec::new();

    for (module, dependencies) in graph.edges() {
        for dependency in dependencies {
            if !known.contains(dependency.as_str()) {
                errors.push(ValidationError::UnresolvedDependency {
                    module: module.to_string(),
                    missing_dependency: dependency.clone(),
                });
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Three-colour DFS. Nodes are visited in discovery order so the reported
/// cycle is stable. The cycle reads in dependency direction:
/// `a -> b -> a` means `a` depends on `b` and `b` depends on `a`.
fn validate_acyclic_graph(graph: &DependencyGraph) -> Result<(), Vec<ValidationError>> {
    let mut visited = HashSet::new();
    let mut rec_stack = HashSet::new();
    let mut path = Vec::new();

    for module in graph.names() {
        if !visited.contains(module) {
            if let Some(cycle) =
                dfs_cycle_detection(module, graph, &mut visited, &mut rec_stack, &mut path)
            {
                return Err(vec![ValidationError::CyclicDependency { cycle }]);
            }
        }
    }
    Ok(())
}

fn dfs_cycle_detection<'a>(
    node: &'a str,
    graph: &'a DependencyGraph,
    visited: &mut HashSet<&'a str>,
    rec_stack: &mut HashSet<&'a str>,
    path: &mut Vec<&'a str>,
) -> Option<Vec<String>> {
    visited.insert(node);
    rec_stack.insert(node);
    path.push(node);

    for dependency in graph.dependencies(node).unwrap_or_default() {
        let dependency = dependency.as_str();
        if !visited.contains(dependency) {
            if let Some(cycle) = dfs_cycle_detection(dependency, graph, visited, rec_stack, path) {
                return Some(cycle);
            }
        } else if rec_stack.contains(dependency) {
            let start = path.iter().position(|n| *n == dependency).unwrap_or(0);
            let mut cycle: Vec<String> = path[start..].iter().map(|n| n.to_string()).collect();
            cycle.push(dependency.to_string());
            return Some(cycle);
        }
    }

    rec_stack.remove(node);
    path.pop();
    None
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
    fn test_valid_empty_graph() {
        assert!(validate_dependency_graph(&DependencyGraph::new()).is_ok());
    }

    #[test]
    fn test_valid_linear_chain() {
        let g = graph(&[("a", vec![]), ("b", vec!["a"]), ("c", vec!["b"])]);
        assert!(validate_dependency_graph(&g).is_ok());
    }

    #[test]
    fn test_valid_diamond_dependency() {
        let g = graph(&[
            ("a", vec![]),
            ("b", vec!["a"]),
            ("c", vec!["a"]),
            ("d", vec!["b", "c"]),
        ]);
        assert!(validate_dependency_graph(&g).is_ok());
    }

    #[test]
    fn test_duplicate_module() {
        let mut g = graph(&[("a", vec![])]);
        g.add_module("a", vec![]);

        let errors = validate_dependency_graph(&g).unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::DuplicateModule {
                module: "a".to_string()
            }]
        );
    }

    #[test]
    fn test_unresolved_dependency() {
        let g = graph(&[("a", vec![]), ("b", vec!["nonexistent"])]);

        let errors = validate_dependency_graph(&g).unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::UnresolvedDependency {
                module: "b".to_string(),
                missing_dependency: "nonexistent".to_string(),
            }]
        );
        assert_eq!(
            errors[0].to_string(),
            "Module 'b' depends on 'nonexistent' which does not exist"
        );
    }

    #[test]
    fn test_simple_cycle_path() {
        let g = graph(&[("a", vec!["b"]), ("b", vec!["a"])]);

        let errors = validate_dependency_graph(&g).unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::CyclicDependency {
                cycle: vec!["a".to_string(), "b".to_string(), "a".to_string()]
            }]
        );
        assert_eq!(errors[0].to_string(), "Cyclic dependency detected: a -> b -> a");
    }

    #[test]
    fn test_self_dependency_cycle() {
        let g = graph(&[("a", vec!["a"])]);
        let errors = validate_dependency_graph(&g).unwrap_err();
        assert!(matches!(
            &errors[0],
            ValidationError::CyclicDependency { cycle } if cycle == &vec!["a".to_string(), "a".to_string()]
        ));
    }

    #[test]
    fn test_complex_cycle_excludes_entry_node() {
        let g = graph(&[
            ("a", vec!["b"]),
            ("b", vec!["c"]),
            ("c", vec!["d"]),
            ("d", vec!["b"]),
        ]);

        match &validate_dependency_graph(&g).unwrap_err()[0] {
            ValidationError::CyclicDependency { cycle } => {
                assert_eq!(cycle, &vec!["b", "c", "d", "b"]);
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_long_chain_does_not_overflow() {
        let names: Vec<String> = (0..2_000).map(|i| format!("m{}", i)).collect();
        let mut g = DependencyGraph::new();
        for (i, name) in names.iter().enumerate() {
            let deps = names.get(i + 1).cloned().into_iter().collect();
            g.add_module(name.clone(), deps);
        }
        assert!(validate_dependency_graph(&g).is_ok());
    }

    #[test]
    fn test_multiple_errors() {
        let mut g = graph(&[("a", vec!["nonexistent"]), ("b", vec!["missing"])]);
        g.add_module("a", vec![]);

        let errors = validate_dependency_graph(&g).unwrap_err();
        assert_eq!(errors.len(), 3);
    }
}
