// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Module definitions, registration and the construction context.
//!
//! A module type implements [`crate::traits::Module`] for its runtime
//! behaviour and [`ModuleDefinition`] for its static shape (name,
//! dependencies, configuration type, constructor). Registering it in a
//! [`ModuleRegistry`] makes it loadable by name.

mod configuration;
mod context;
mod contributions;
mod registry;

pub use configuration::validate_module_configuration;
pub use context::{ModuleContext, ModuleServices};
pub use contributions::{Contribution, Contributions, Ontology};
pub use registry::{ModuleDefinition, ModuleDependencies, ModuleDescriptor, ModuleRegistry};
