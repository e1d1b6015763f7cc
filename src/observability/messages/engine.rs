// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for engine lifecycle events.
//!
//! This module contains message types for logging events related to:
//! * Service construction and wiring
//! * Module load ordering, construction and initialization
//! * Ontology schema loading
//! * Module teardown

use crate::observability::messages::StructuredLog;
use crate::services::{SchemaLoad, ServiceKind};
use std::fmt::{Display, Formatter};
use tracing::Span;

/// A service instance was constructed and registered.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use the_loom::observability::messages::engine::ServiceConstructed;
/// use the_loom::services::ServiceKind;
///
/// let msg = ServiceConstructed {
///     kind: ServiceKind::ObjectStorage,
///     adapter: "fs",
/// };
///
/// assert_eq!(msg.to_string(), "Constructed object_storage service with adapter 'fs'");
/// ```
pub struct ServiceConstructed<'a> {
    pub kind: ServiceKind,
    pub adapter: &'a str,
}

impl Display for ServiceConstructed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Constructed {} service with adapter '{}'",
            self.kind, self.adapter
        )
    }
}

impl StructuredLog for ServiceConstructed<'_> {
    fn log(&self) {
        tracing::info!(
            kind = self.kind.as_str(),
            adapter = self.adapter,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "service",
            span_name = name,
            kind = self.kind.as_str(),
            adapter = self.adapter,
        )
    }
}

/// A constructed service was connected to a sibling service.
///
/// # Log Level
/// `debug!` - Diagnostic detail
///
/// # Example
/// ```
/// use the_loom::observability::messages::engine::ServiceWired;
/// use the_loom::services::ServiceKind;
///
/// let msg = ServiceWired {
///     kind: ServiceKind::TripleStore,
///     sibling: ServiceKind::Bus,
/// };
///
/// assert_eq!(msg.to_string(), "Wired triple_store service to bus service");
/// ```
pub struct ServiceWired {
    pub kind: ServiceKind,
    pub sibling: ServiceKind,
}

impl Display for ServiceWired {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Wired {} service to {} service", self.kind, self.sibling)
    }
}

impl StructuredLog for ServiceWired {
    fn log(&self) {
        tracing::debug!(
            kind = self.kind.as_str(),
            sibling = self.sibling.as_str(),
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "service",
            span_name = name,
            kind = self.kind.as_str(),
            sibling = self.sibling.as_str(),
        )
    }
}

/// The module instantiation order for one `load` call.
///
/// # Log Level
/// `info!` - Important operational event
pub struct LoadOrderComputed<'a> {
    pub order: &'a [String],
}

impl Display for LoadOrderComputed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Module load order: {}", self.order.join(" -> "))
    }
}

impl StructuredLog for LoadOrderComputed<'_> {
    fn log(&self) {
        tracing::info!(
            module_count = self.order.len(),
            order = %self.order.join(","),
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "engine_load",
            span_name = name,
            module_count = self.order.len(),
        )
    }
}

/// A module instance was constructed with its configuration and services.
///
/// # Log Level
/// `debug!` - Diagnostic detail
pub struct ModuleConstructed<'a> {
    pub module: &'a str,
    pub services: &'a [ServiceKind],
}

impl Display for ModuleConstructed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        let services: Vec<&str> = self.services.iter().map(|k| k.as_str()).collect();
        if services.is_empty() {
            write!(f, "Constructed module '{}'", self.module)
        } else {
            write!(
                f,
                "Constructed module '{}' with services [{}]",
                self.module,
                services.join(", ")
            )
        }
    }
}

impl StructuredLog for ModuleConstructed<'_> {
    fn log(&self) {
        tracing::debug!(
            module = self.module,
            service_count = self.services.len(),
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!("module", span_name = name, module = self.module)
    }
}

/// A module's `on_initialized` hook completed.
///
/// # Log Level
/// `info!` - Important operational event
pub struct ModuleInitialized<'a> {
    pub module: &'a str,
    pub agents: usize,
    pub workflows: usize,
    pub ontologies: usize,
}

impl Display for ModuleInitialized<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Initialized module '{}': {} agents, {} workflows, {} ontologies",
            self.module, self.agents, self.workflows, self.ontologies
        )
    }
}

impl StructuredLog for ModuleInitialized<'_> {
    fn log(&self) {
        tracing::info!(
            module = self.module,
            agents = self.agents,
            workflows = self.workflows,
            ontologies = self.ontologies,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!("module_initialized", span_name = name, module = self.module)
    }
}

/// Outcome of loading one module's ontology into the triple store.
///
/// Successful loads log at `info!` (or `debug!` when unchanged); failures
/// log at `warn!` because they never abort a load.
///
/// # Example
/// ```
/// use the_loom::observability::messages::engine::OntologyLoadOutcome;
/// use the_loom::services::SchemaLoad;
///
/// let msg = OntologyLoadOutcome::Loaded {
///     module: "core.ontology",
///     ontology: "loom-core",
///     result: SchemaLoad::Unchanged,
/// };
///
/// assert_eq!(
///     msg.to_string(),
///     "Ontology 'loom-core' from module 'core.ontology' is unchanged"
/// );
/// ```
pub enum OntologyLoadOutcome<'a> {
    Loaded {
        module: &'a str,
        ontology: &'a str,
        result: SchemaLoad,
    },
    Failed {
        module: &'a str,
        ontology: &'a str,
        error: &'a dyn std::error::Error,
    },
}

impl Display for OntologyLoadOutcome<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            OntologyLoadOutcome::Loaded {
                module,
                ontology,
                result: SchemaLoad::Loaded,
            } => write!(f, "Loaded ontology '{}' from module '{}'", ontology, module),
            OntologyLoadOutcome::Loaded {
                module,
                ontology,
                result: SchemaLoad::Unchanged,
            } => write!(
                f,
                "Ontology '{}' from module '{}' is unchanged",
                ontology, module
            ),
            OntologyLoadOutcome::Failed {
                module,
                ontology,
                error,
            } => write!(
                f,
                "Failed to load ontology '{}' from module '{}': {}",
                ontology, module, error
            ),
        }
    }
}

impl StructuredLog for OntologyLoadOutcome<'_> {
    fn log(&self) {
        match self {
            OntologyLoadOutcome::Loaded {
                module,
                ontology,
                result: SchemaLoad::Loaded,
            } => tracing::info!(module, ontology, "{}", self),
            OntologyLoadOutcome::Loaded {
                module, ontology, ..
            } => tracing::debug!(module, ontology, "{}", self),
            OntologyLoadOutcome::Failed {
                module,
                ontology,
                error,
            } => tracing::warn!(module, ontology, error = %error, "{}", self),
        }
    }

    fn span(&self, name: &str) -> Span {
        let (module, ontology) = match self {
            OntologyLoadOutcome::Loaded {
                module, ontology, ..
            }
            | OntologyLoadOutcome::Failed {
                module, ontology, ..
            } => (*module, *ontology),
        };
        tracing::info_span!("ontology", span_name = name, module, ontology)
    }
}

/// A module's `on_unloaded` hook ran during engine teardown.
///
/// # Log Level
/// `info!` - Important operational event
pub struct ModuleUnloaded<'a> {
    pub module: &'a str,
}

impl Display for ModuleUnloaded<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Unloaded module '{}'", self.module)
    }
}

impl StructuredLog for ModuleUnloaded<'_> {
    fn log(&self) {
        tracing::info!(module = self.module, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!("module_unloaded", span_name = name, module = self.module)
    }
}
