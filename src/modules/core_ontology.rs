// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;

use crate::errors::{EngineError, PortError};
use crate::module::{
    Contribution, Contributions, ModuleContext, ModuleDefinition, ModuleDependencies, Ontology,
};
use crate::services::{ServiceKind, TriplePattern, TripleStoreService};
use crate::traits::{Module, Triple};

pub const CORE_ONTOLOGY_MODULE: &str = "core.ontology";

pub const LOOM_NAMESPACE: &str = "https://the-loom.dev/ontology/core#";
const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
const OWL_CLASS: &str = "http://www.w3.org/2002/07/owl#Class";

const CORE_ONTOLOGY: &str = include_str!("core.ttl");
const CORE_CLASSES: [&str; 5] = ["Module", "Agent", "Workflow", "Integration", "Ontology"];

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CoreOntologyConfiguration {
    /// Name the base ontology is stored under in the triple store.
    #[serde(default = "default_ontology_name")]
    pub ontology_name: String,
}

fn default_ontology_name() -> String {
    "loom-core".to_string()
}

/// Ships the engine's base ontology and a `schema.lookup` workflow over the
/// triple store.
pub struct CoreOntologyModule {
    configuration: CoreOntologyConfiguration,
    triple_store: Arc<TripleStoreService>,
    contributions: Contributions,
}

impl CoreOntologyModule {
    pub fn configuration(&self) -> &CoreOntologyConfiguration {
        &self.configuration
    }

    /// Every triple whose subject is `iri`. A compact `loom:` prefix is
    /// expanded.
    pub async fn lookup(&self, iri: &str) -> Result<Vec<Triple>, PortError> {
        let subject = match iri.strip_prefix("loom:") {
            Some(local) => format!("{}{}", LOOM_NAMESPACE, local),
            None => iri.to_string(),
        };
        self.triple_store
            .query(&TriplePattern::any().subject(subject))
            .await
    }
}

#[async_trait]
impl Module for CoreOntologyModule {
    fn name(&self) -> &str {
        CORE_ONTOLOGY_MODULE
    }

    fn contributions(&self) -> &Contributions {
        &self.contributions
    }

    async fn on_initialized(&mut self) -> Result<(), EngineError> {
        let classes: Vec<Triple> = CORE_CLASSES
            .iter()
            .map(|class| Triple::new(format!("{}{}", LOOM_NAMESPACE, class), RDF_TYPE, OWL_CLASS))
            .collect();
        self.triple_store.insert(&classes).await?;

        self.contributions.ontologies.push(Ontology::new(
            self.configuration.ontology_name.clone(),
            CORE_ONTOLOGY,
        ));
        self.contributions.workflows.push(Contribution::new(
            "schema.lookup",
            "Looks up every statement about an IRI in the triple store",
        ));
        Ok(())
    }
}

impl ModuleDefinition for CoreOntologyModule {
    const NAME: &'static str = CORE_ONTOLOGY_MODULE;

    type Configuration = CoreOntologyConfiguration;

    fn dependencies() -> ModuleDependencies {
        ModuleDependencies::new().service(ServiceKind::TripleStore)
    }

    fn new(context: ModuleContext<Self::Configuration>) -> Result<Self, EngineError> {
        Ok(Self {
            triple_store: context.services.triple_store()?,
            configuration: context.configuration,
            contributions: Contributions::default(),
        })
    }
}
