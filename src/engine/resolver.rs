// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::{HashSet, VecDeque};

use crate::config::{DependencyGraph, ModulesConfiguration};
use crate::errors::EngineError;
use crate::module::ModuleRegistry;

/// Collects the transitive closure of `requested` over module
/// dependencies, breadth first, in discovery order.
///
/// A requested name that is not registered is fatal here. A dependency
/// that is not registered is left out of the graph so that validation
/// reports it against the module that asked for it. Any module reached
/// that the configuration explicitly disables is fatal.
pub(crate) fn resolve_closure(
    requested: &[String],
    registry: &ModuleRegistry,
    configured: &ModulesConfiguration,
) -> Result<DependencyGraph, EngineError> {
    let mut graph = DependencyGraph::new();
    let mut seen: HashSet<String> = HashSet::new();
    let mut queue: VecDeque<String> = VecDeque::new();

    for name in requested {
        if !registry.contains(name) {
            return Err(EngineError::UnknownModule { name: name.clone() });
        }
        queue.push_back(name.clone());
    }

    while let Some(name) = queue.pop_front() {
        if !seen.insert(name.clone()) {
            continue;
        }
        if configured.get(&name).is_some_and(|entry| !entry.enabled) {
            return Err(EngineError::ModuleDisabled { name });
        }
        let Some(descriptor) = registry.get(&name) else {
            continue;
        };

        let dependencies = descriptor.dependencies().modules.clone();
        for dependency in &dependencies {
            if registry.contains(dependency) && !seen.contains(dependency) {
                queue.push_back(dependency.clone());
            }
        }
        graph.add_module(name, dependencies);
    }

    Ok(graph)
}
