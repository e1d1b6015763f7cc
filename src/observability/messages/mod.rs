// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Centralized message types for structured logging.
//!
//! Each message type implements `Display` for the human-readable line and
//! [`StructuredLog`] to emit it at its own level with structured fields.
//!
//! # Organization
//!
//! * `config` - configuration discovery and loading
//! * `engine` - service construction and module lifecycle events
//! * `validation` - module dependency graph errors
//!
//! # Usage Pattern
//!
//! ```rust
//! use the_loom::observability::messages::engine::LoadOrderComputed;
//! use the_loom::observability::messages::StructuredLog;
//!
//! let order = vec!["core.ontology".to_string(), "acme.crm".to_string()];
//! let msg = LoadOrderComputed { order: &order };
//!
//! assert_eq!(msg.to_string(), "Module load order: core.ontology -> acme.crm");
//! msg.log();
//! ```

use std::fmt::Display;
use tracing::Span;

pub mod config;
pub mod engine;
pub mod validation;

/// A message that knows its own log level and structured fields.
pub trait StructuredLog: Display {
    /// Emits the event.
    fn log(&self);

    /// Opens a span carrying the same fields.
    fn span(&self, name: &str) -> Span;
}
