// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

use crate::errors::PortError;

/// Errors that can occur during module dependency graph validation
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// A circular dependency was detected in the module graph
    CyclicDependency {
        /// The cycle path showing the circular dependency
        cycle: Vec<String>,
    },
    /// A module references a dependency that isn't registered
    UnresolvedDependency {
        /// The module that has the unresolved dependency
        module: String,
        /// The dependency that couldn't be resolved
        missing_dependency: String,
    },
    /// Two module definitions were registered under the same name
    DuplicateModule {
        /// The duplicate module name
        module: String,
    },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::CyclicDependency { cycle } => {
                write!(f, "Cyclic dependency detected: {}", cycle.join(" -> "))
            }
            ValidationError::UnresolvedDependency {
                module,
                missing_dependency,
            } => {
                write!(
                    f,
                    "Module '{}' depends on '{}' which does not exist",
                    module, missing_dependency
                )
            }
            ValidationError::DuplicateModule { module } => {
                write!(f, "Duplicate module name: '{}'", module)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Errors raised while reading, templating and parsing the engine configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found (searched: {})", searched.join(", "))]
    NotFound { searched: Vec<String> },

    #[error("Failed to read configuration file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed YAML.
    #[error("Failed to parse configuration: {0}")]
    Parse(#[source] serde_yaml::Error),

    /// Well-formed YAML that does not match the schema (unknown field,
    /// unknown adapter discriminator, wrong type).
    #[error("Invalid configuration: {0}")]
    Schema(String),

    /// A secret adapter failed while templating the document.
    #[error("Secret resolution failed: {0}")]
    Secret(#[source] PortError),

    #[error("Failed to render configuration: {0}")]
    Render(String),
}
