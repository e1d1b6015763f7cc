// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for module dependency graph errors.
//!
//! This module contains message types for logging events related to:
//! * Cyclic dependency detection
//! * Unresolved dependency detection
//! * Duplicate module detection

use crate::errors::ValidationError;
use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// Cyclic dependency detected between modules.
///
/// # Log Level
/// `error!` - Failure requiring attention
///
/// # Example
/// ```
/// use the_loom::observability::messages::validation::CyclicDependencyDetected;
///
/// let cycle = vec!["acme.crm".to_string(), "acme.auth".to_string(), "acme.crm".to_string()];
/// let msg = CyclicDependencyDetected { cycle: &cycle };
///
/// assert_eq!(
///     msg.to_string(),
///     "Cyclic module dependency detected: acme.crm -> acme.auth -> acme.crm"
/// );
/// ```
pub struct CyclicDependencyDetected<'a> {
    pub cycle: &'a [String],
}

impl Display for CyclicDependencyDetected<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Cyclic module dependency detected: {}", self.cycle.join(" -> "))
    }
}

impl StructuredLog for CyclicDependencyDetected<'_> {
    fn log(&self) {
        tracing::error!(
            cycle = %self.cycle.join(" -> "),
            cycle_length = self.cycle.len(),
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::span!(
            tracing::Level::ERROR,
            "cyclic_dependency",
            span_name = name,
            cycle = %self.cycle.join(" -> "),
        )
    }
}

/// A module depends on a module nobody registered or configured.
///
/// # Log Level
/// `error!` - Failure requiring attention
pub struct UnresolvedDependency<'a> {
    pub module: &'a str,
    pub missing_dependency: &'a str,
}

impl Display for UnresolvedDependency<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Module '{}' depends on unknown module '{}'",
            self.module, self.missing_dependency
        )
    }
}

impl StructuredLog for UnresolvedDependency<'_> {
    fn log(&self) {
        tracing::error!(
            module = self.module,
            missing_dependency = self.missing_dependency,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::span!(
            tracing::Level::ERROR,
            "unresolved_dependency",
            span_name = name,
            module = self.module,
            missing_dependency = self.missing_dependency,
        )
    }
}

/// The same module name was defined twice.
///
/// # Log Level
/// `error!` - Failure requiring attention
pub struct DuplicateModule<'a> {
    pub module: &'a str,
}

impl Display for DuplicateModule<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Duplicate module '{}'", self.module)
    }
}

impl StructuredLog for DuplicateModule<'_> {
    fn log(&self) {
        tracing::error!(module = self.module, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::span!(
            tracing::Level::ERROR,
            "duplicate_module",
            span_name = name,
            module = self.module,
        )
    }
}

/// Logs each validation error at error level.
pub fn log_validation_errors(errors: &[ValidationError]) {
    for error in errors {
        match error {
            ValidationError::CyclicDependency { cycle } => {
                CyclicDependencyDetected { cycle }.log()
            }
            ValidationError::UnresolvedDependency {
                module,
                missing_dependency,
            } => UnresolvedDependency {
                module,
                missing_dependency,
            }
            .log(),
            ValidationError::DuplicateModule { module } => DuplicateModule { module }.log(),
        }
    }
}
