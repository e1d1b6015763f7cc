// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for configuration discovery and loading.

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use std::path::Path;
use tracing::Span;

/// A configuration file was found by discovery.
///
/// # Log Level
/// `debug!` - Diagnostic detail
pub struct ConfigurationDiscovered<'a> {
    pub path: &'a Path,
    pub environment: Option<&'a str>,
}

impl Display for ConfigurationDiscovered<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self.environment {
            Some(env) => write!(
                f,
                "Using configuration file {} for environment '{}'",
                self.path.display(),
                env
            ),
            None => write!(f, "Using configuration file {}", self.path.display()),
        }
    }
}

impl StructuredLog for ConfigurationDiscovered<'_> {
    fn log(&self) {
        tracing::debug!(
            path = %self.path.display(),
            environment = self.environment,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "configuration_discovered",
            span_name = name,
            path = %self.path.display(),
            environment = self.environment,
        )
    }
}

/// The engine configuration was parsed, templated and validated.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use the_loom::observability::messages::config::ConfigurationLoaded;
///
/// let msg = ConfigurationLoaded {
///     source: "config.yaml",
///     workspace: "acme",
///     module_count: 3,
///     enabled_count: 2,
/// };
///
/// assert_eq!(
///     msg.to_string(),
///     "Loaded configuration from config.yaml for workspace 'acme': 3 modules, 2 enabled"
/// );
/// ```
pub struct ConfigurationLoaded<'a> {
    pub source: &'a str,
    pub workspace: &'a str,
    pub module_count: usize,
    pub enabled_count: usize,
}

impl Display for ConfigurationLoaded<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Loaded configuration from {} for workspace '{}': {} modules, {} enabled",
            self.source, self.workspace, self.module_count, self.enabled_count
        )
    }
}

impl StructuredLog for ConfigurationLoaded<'_> {
    fn log(&self) {
        tracing::info!(
            source = self.source,
            workspace = self.workspace,
            module_count = self.module_count,
            enabled_count = self.enabled_count,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "configuration_loaded",
            span_name = name,
            source = self.source,
            workspace = self.workspace,
        )
    }
}
