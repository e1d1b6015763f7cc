// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::Serialize;

/// A named agent, workflow, integration, pipeline or orchestration exposed
/// by a module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Contribution {
    pub name: String,
    pub description: String,
}

impl Contribution {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

/// An ontology schema fragment, loaded into the triple store after every
/// module is initialized. The content is opaque to the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ontology {
    pub name: String,
    pub content: String,
}

impl Ontology {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }
}

/// Everything a module exposes once initialized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Contributions {
    pub agents: Vec<Contribution>,
    pub workflows: Vec<Contribution>,
    pub integrations: Vec<Contribution>,
    pub pipelines: Vec<Contribution>,
    pub orchestrations: Vec<Contribution>,
    pub ontologies: Vec<Ontology>,
}

impl Contributions {
    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
            && self.workflows.is_empty()
            && self.integrations.is_empty()
            && self.pipelines.is_empty()
            && self.orchestrations.is_empty()
            && self.ontologies.is_empty()
    }
}
