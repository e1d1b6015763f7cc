// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! The engine: module dependency resolution, service wiring and module
//! lifecycle.
//!
//! `Engine::load` runs these steps:
//!
//! 1. Collect the transitive closure of the requested modules
//! 2. Validate the closure graph (unknown references, cycles)
//! 3. Order it topologically, ties broken by discovery order
//! 4. Construct every service the new modules declare, dependencies first,
//!    and wire each new service to the siblings it collaborates with
//! 5. Construct, register and initialize each new module in order
//! 6. Load the new modules' ontologies into the triple store
//!
//! Steps 1 to 3 are [`Engine::plan`] and finish before anything is
//! constructed. Modules loaded by an earlier call are never constructed
//! again.
//!
//! # Example
//!
//! ```rust,no_run
//! use the_loom::config::load_configuration;
//! use the_loom::engine::Engine;
//! use the_loom::module::ModuleRegistry;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let configuration = load_configuration(None).await?;
//! let mut engine = Engine::new(configuration, ModuleRegistry::with_builtin());
//! engine.load(None).await?;
//!
//! for name in engine.load_order() {
//!     println!("{}", name);
//! }
//! # Ok(())
//! # }
//! ```

mod resolver;

#[cfg(test)]
mod integration_tests;

use serde_yaml::Value;

use crate::config::{validate_dependency_graph, EngineConfiguration};
use crate::errors::EngineError;
use crate::module::{ModuleDefinition, ModuleRegistry, ModuleServices, Ontology};
use crate::observability::messages::engine::{
    LoadOrderComputed, ModuleConstructed, ModuleInitialized, ModuleUnloaded, OntologyLoadOutcome,
    ServiceConstructed, ServiceWired,
};
use crate::observability::messages::validation::log_validation_errors;
use crate::observability::messages::StructuredLog;
use crate::services::{ServiceKind, ServiceRegistry};
use crate::traits::Module;

use resolver::resolve_closure;

struct LoadedModule {
    name: String,
    instance: Box<dyn Module>,
}

/// Owns the configuration, the constructed services and the loaded
/// module instances.
pub struct Engine {
    configuration: EngineConfiguration,
    registry: ModuleRegistry,
    services: ServiceRegistry,
    modules: Vec<LoadedModule>,
}

impl Engine {
    pub fn new(configuration: EngineConfiguration, registry: ModuleRegistry) -> Self {
        Self::with_services(configuration, registry, ServiceRegistry::new())
    }

    /// Starts from already constructed services. Kinds present in
    /// `services` are used as is instead of being built from the
    /// configuration.
    pub fn with_services(
        configuration: EngineConfiguration,
        registry: ModuleRegistry,
        services: ServiceRegistry,
    ) -> Self {
        let engine = Self {
            configuration,
            registry,
            services,
            modules: Vec::new(),
        };
        engine.wire_services();
        engine
    }

    /// Resolves, validates and orders `modules` (or every enabled module)
    /// without constructing anything.
    pub fn plan(&self, modules: Option<Vec<String>>) -> Result<Vec<String>, EngineError> {
        let requested = modules.unwrap_or_else(|| self.configuration.modules.enabled());

        let graph = resolve_closure(&requested, &self.registry, &self.configuration.modules)?;
        if let Err(errors) = validate_dependency_graph(&graph) {
            log_validation_errors(&errors);
            return Err(EngineError::Dependency(errors));
        }
        graph.topological_order().map_err(|e| {
            log_validation_errors(std::slice::from_ref(&e));
            EngineError::Dependency(vec![e])
        })
    }

    /// Loads `modules`, or every module the configuration enables.
    pub async fn load(&mut self, modules: Option<Vec<String>>) -> Result<(), EngineError> {
        let order = self.plan(modules)?;

        let pending: Vec<String> = order
            .into_iter()
            .filter(|name| !self.is_loaded(name))
            .collect();
        LoadOrderComputed { order: &pending }.log();

        self.ensure_service(ServiceKind::Secret)?;
        for name in &pending {
            for kind in self.declared_services(name) {
                self.ensure_service(kind)?;
            }
        }

        for name in &pending {
            self.construct_module(name).await?;
        }

        self.load_ontologies(&pending).await
    }

    /// Calls every module's `on_unloaded` hook in reverse load order and
    /// drops the instances. Services stay constructed. Every hook runs;
    /// the first failure is returned.
    pub async fn unload(&mut self) -> Result<(), EngineError> {
        let mut first_error = None;
        while let Some(mut loaded) = self.modules.pop() {
            match loaded.instance.on_unloaded().await {
                Ok(()) => ModuleUnloaded {
                    module: &loaded.name,
                }
                .log(),
                Err(e) => {
                    if first_error.is_none() {
                        first_error = Some(e.in_module(&loaded.name, "on_unloaded"));
                    }
                }
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    pub fn module(&self, name: &str) -> Option<&dyn Module> {
        self.modules
            .iter()
            .find(|m| m.name == name)
            .map(|m| m.instance.as_ref())
    }

    /// The loaded instance of `M`, downcast to its concrete type.
    pub fn module_as<M: ModuleDefinition>(&self) -> Option<&M> {
        self.module(M::NAME)?.as_any().downcast_ref::<M>()
    }

    pub fn is_loaded(&self, name: &str) -> bool {
        self.modules.iter().any(|m| m.name == name)
    }

    /// Names of loaded modules in the order they were constructed.
    pub fn load_order(&self) -> Vec<&str> {
        self.modules.iter().map(|m| m.name.as_str()).collect()
    }

    /// Whether `name` is loaded and every service kind it declared exists.
    pub fn services_wired(&self, name: &str) -> bool {
        self.is_loaded(name)
            && self
                .declared_services(name)
                .iter()
                .all(|kind| self.services.contains(*kind))
    }

    pub fn services(&self) -> &ServiceRegistry {
        &self.services
    }

    pub fn configuration(&self) -> &EngineConfiguration {
        &self.configuration
    }

    pub fn registry(&self) -> &ModuleRegistry {
        &self.registry
    }

    fn declared_services(&self, name: &str) -> Vec<ServiceKind> {
        self.registry
            .get(name)
            .map(|d| d.dependencies().services.clone())
            .unwrap_or_default()
    }

    /// Builds `kind` once, after the kinds its adapter needs.
    fn ensure_service(&mut self, kind: ServiceKind) -> Result<(), EngineError> {
        if self.services.contains(kind) {
            return Ok(());
        }
        for dependency in self.configuration.services.dependencies(kind) {
            self.ensure_service(dependency)?;
        }

        let service = self
            .configuration
            .services
            .load(kind, &self.services)
            .map_err(|source| EngineError::ServiceConstruction { kind, source })?;
        self.services.insert(service);

        ServiceConstructed {
            kind,
            adapter: &self.configuration.services.adapter_name(kind),
        }
        .log();
        self.wire_services();
        Ok(())
    }

    fn wire_services(&self) {
        for (kind, sibling) in self.services.wire() {
            ServiceWired { kind, sibling }.log();
        }
    }

    async fn construct_module(&mut self, name: &str) -> Result<(), EngineError> {
        let descriptor = self
            .registry
            .get(name)
            .cloned()
            .ok_or_else(|| EngineError::UnknownModule {
                name: name.to_string(),
            })?;
        let declared = descriptor.dependencies().services.clone();
        let raw_configuration = self
            .configuration
            .modules
            .get(name)
            .map(|entry| entry.config.clone())
            .unwrap_or(Value::Null);

        let services = ModuleServices::new(name, &declared, &self.services);
        let instance =
            descriptor.construct(&raw_configuration, &self.configuration.global, services)?;
        ModuleConstructed {
            module: name,
            services: &declared,
        }
        .log();

        self.modules.push(LoadedModule {
            name: name.to_string(),
            instance,
        });
        let Some(loaded) = self.modules.last_mut() else {
            return Ok(());
        };

        if let Err(e) = loaded.instance.on_initialized().await {
            self.modules.pop();
            return Err(e.in_module(name, "on_initialized"));
        }

        let contributions = loaded.instance.contributions();
        ModuleInitialized {
            module: name,
            agents: contributions.agents.len(),
            workflows: contributions.workflows.len(),
            ontologies: contributions.ontologies.len(),
        }
        .log();
        Ok(())
    }

    /// Loads each module's ontologies independently. Failures are logged
    /// and skipped.
    async fn load_ontologies(&mut self, modules: &[String]) -> Result<(), EngineError> {
        let batches: Vec<(String, Vec<Ontology>)> = self
            .modules
            .iter()
            .filter(|m| modules.contains(&m.name))
            .map(|m| (m.name.clone(), m.instance.contributions().ontologies.clone()))
            .filter(|(_, ontologies)| !ontologies.is_empty())
            .collect();
        if batches.is_empty() {
            return Ok(());
        }

        self.ensure_service(ServiceKind::TripleStore)?;
        let Some(store) = self.services.triple_store().cloned() else {
            return Ok(());
        };

        for (module, ontologies) in &batches {
            for (ontology, result) in store.load_schemas(ontologies).await {
                match result {
                    Ok(result) => OntologyLoadOutcome::Loaded {
                        module,
                        ontology: &ontology,
                        result,
                    }
                    .log(),
                    Err(error) => OntologyLoadOutcome::Failed {
                        module,
                        ontology: &ontology,
                        error: &error,
                    }
                    .log(),
                }
            }
        }
        Ok(())
    }
}
