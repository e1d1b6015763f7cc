// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use thiserror::Error;

use crate::errors::{ConfigError, PortError, ValidationError};
use crate::services::ServiceKind;

/// Fatal errors raised by `Engine::load` and the module machinery.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error(transparent)]
    Configuration(#[from] ConfigError),

    /// The module dependency graph is not a DAG or references unknown modules.
    #[error("Module dependency graph is invalid:\n{}", format_validation(.0))]
    Dependency(Vec<ValidationError>),

    #[error("Unknown module '{name}'")]
    UnknownModule { name: String },

    #[error("Module '{name}' is disabled in the configuration but is required")]
    ModuleDisabled { name: String },

    /// The module's configuration block failed validation.
    #[error("Invalid configuration for module '{module}'{}: {reason}", field_suffix(.field))]
    ModuleConfiguration {
        module: String,
        field: Option<String>,
        reason: String,
    },

    /// A module asked for a service kind it did not declare.
    #[error("Module '{module}' did not declare a dependency on the {kind} service")]
    ServiceNotDeclared { module: String, kind: ServiceKind },

    #[error("Failed to construct the {kind} service: {source}")]
    ServiceConstruction {
        kind: ServiceKind,
        #[source]
        source: PortError,
    },

    /// A module lifecycle hook failed.
    #[error("Module '{module}' failed in {hook}: {source}")]
    Module {
        module: String,
        hook: &'static str,
        #[source]
        source: Box<EngineError>,
    },

    #[error(transparent)]
    Port(#[from] PortError),
}

fn format_validation(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| format!("  - {}", e))
        .collect::<Vec<_>>()
        .join("\n")
}

fn field_suffix(field: &Option<String>) -> String {
    match field {
        Some(field) => format!(" (field '{}')", field),
        None => String::new(),
    }
}

impl EngineError {
    /// Attributes a hook failure to `module`. Errors already attributed to a
    /// module are returned unchanged.
    pub fn in_module(self, module: &str, hook: &'static str) -> Self {
        match self {
            EngineError::Module { .. } => self,
            source => EngineError::Module {
                module: module.to_string(),
                hook,
                source: Box::new(source),
            },
        }
    }
}

impl From<Vec<ValidationError>> for EngineError {
    fn from(errors: Vec<ValidationError>) -> Self {
        EngineError::Dependency(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_module_attributes_once() {
        let err = EngineError::from(PortError::Invalid("boom".to_string()))
            .in_module("acme.crm", "on_initialized")
            .in_module("acme.outer", "on_unloaded");

        assert_eq!(
            err.to_string(),
            "Module 'acme.crm' failed in on_initialized: Invalid input: boom"
        );
    }
}
