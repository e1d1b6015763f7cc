// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod dependency_graph;
mod loader;
mod validation;

pub mod consts;
pub mod services;
pub mod template;

pub use dependency_graph::DependencyGraph;
pub use loader::{
    discover_configuration, load_configuration, load_configuration_file, parse_configuration,
    AiMode, EngineConfiguration, GlobalConfig, ModuleEntry, ModulesConfiguration, WorkspaceConfig,
};
pub use services::ServicesConfiguration;
pub use validation::validate_dependency_graph;
