// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Observability module for structured logging and tracing.
//!
//! Operational events are message structs rather than inline strings, so
//! that each event has one definition of its text, its level and its
//! structured fields:
//!
//! * `messages::config` - configuration discovery and loading
//! * `messages::engine` - services, module lifecycle, ontology loading
//! * `messages::validation` - module dependency graph errors
//!
//! The library only emits events. Installing a subscriber is left to the
//! binary (or to any embedding application).
//!
//! # Usage
//!
//! ```rust
//! use the_loom::observability::messages::engine::ModuleUnloaded;
//! use the_loom::observability::messages::StructuredLog;
//!
//! let msg = ModuleUnloaded { module: "acme.crm" };
//! let _guard = msg.span("teardown").entered();
//! msg.log();
//! ```

pub mod messages;
