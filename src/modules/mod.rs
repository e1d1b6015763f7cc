// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Modules shipped with the engine.

mod core_ontology;

pub use core_ontology::{
    CoreOntologyConfiguration, CoreOntologyModule, CORE_ONTOLOGY_MODULE, LOOM_NAMESPACE,
};
