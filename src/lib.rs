// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod backends;      // adapters, one sub-module per service kind
pub mod config;        // engine configuration, templating, module graph
pub mod engine;        // module loading and service wiring
pub mod errors;        // error handling
pub mod module;        // module definitions and registry
pub mod modules;       // built-in modules
pub mod observability;
pub mod services;      // service façades and registry
pub mod traits;        // ports and the module trait
pub mod utils;
