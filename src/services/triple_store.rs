// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::{Arc, OnceLock};
use tokio::sync::broadcast;

use crate::errors::PortError;
use crate::module::Ontology;
use crate::services::{BusService, ServiceRegistry};
use crate::traits::{SchemaRecord, Triple, TripleStorePort};
use crate::utils::sha256_hex;

const DEFAULT_GRAPH: &str = "default";

/// Outcome of loading one ontology schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaLoad {
    /// New or changed content was stored.
    Loaded,
    /// The stored schema already has the same digest.
    Unchanged,
}

/// Triple filter; `None` matches any term.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TriplePattern {
    pub subject: Option<String>,
    pub predicate: Option<String>,
    pub object: Option<String>,
}

impl TriplePattern {
    pub fn any() -> Self {
        Self::default()
    }

    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    pub fn predicate(mut self, predicate: impl Into<String>) -> Self {
        self.predicate = Some(predicate.into());
        self
    }

    pub fn object(mut self, object: impl Into<String>) -> Self {
        self.object = Some(object.into());
        self
    }

    pub fn matches(&self, triple: &Triple) -> bool {
        fn term(expected: &Option<String>, actual: &str) -> bool {
            expected.as_deref().map_or(true, |e| e == actual)
        }
        term(&self.subject, &triple.subject)
            && term(&self.predicate, &triple.predicate)
            && term(&self.object, &triple.object)
    }
}

/// Change notifications published on the bus once the store is wired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TripleEvent {
    Insert,
    Delete,
}

impl TripleEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            TripleEvent::Insert => "insert",
            TripleEvent::Delete => "delete",
        }
    }
}

/// Bus topic for one changed triple:
/// `ts.<event>.g.<graph>.s.<sha256>.p.<sha256>.o.<sha256>`.
pub fn triple_topic(event: TripleEvent, triple: &Triple) -> String {
    format!(
        "ts.{}.g.{}.s.{}.p.{}.o.{}",
        event.as_str(),
        DEFAULT_GRAPH,
        sha256_hex(&triple.subject),
        sha256_hex(&triple.predicate),
        sha256_hex(&triple.object)
    )
}

/// Subscription topic for `pattern`; unset terms and a missing event match
/// anything.
pub fn subscription_topic(pattern: &TriplePattern, event: Option<TripleEvent>) -> String {
    fn term(value: &Option<String>) -> String {
        value.as_deref().map_or_else(|| "*".to_string(), sha256_hex)
    }
    format!(
        "ts.{}.g.*.s.{}.p.{}.o.{}",
        event.map_or("*", |e| e.as_str()),
        term(&pattern.subject),
        term(&pattern.predicate),
        term(&pattern.object)
    )
}

pub struct TripleStoreService {
    adapter: Arc<dyn TripleStorePort>,
    bus: OnceLock<Arc<BusService>>,
}

impl TripleStoreService {
    pub fn new(adapter: Arc<dyn TripleStorePort>) -> Self {
        Self {
            adapter,
            bus: OnceLock::new(),
        }
    }

    /// Connects the store to its sibling services. Returns whether this
    /// call wired anything new; once wired the store stays wired.
    pub fn wire(&self, services: &ServiceRegistry) -> bool {
        match services.bus() {
            Some(bus) => self.bus.set(bus.clone()).is_ok(),
            None => false,
        }
    }

    /// Whether changes are published on the bus.
    pub fn services_wired(&self) -> bool {
        self.bus.get().is_some()
    }

    pub async fn insert(&self, triples: &[Triple]) -> Result<(), PortError> {
        self.adapter.insert(triples).await?;
        self.notify(TripleEvent::Insert, triples).await
    }

    pub async fn remove(&self, triples: &[Triple]) -> Result<(), PortError> {
        self.adapter.remove(triples).await?;
        self.notify(TripleEvent::Delete, triples).await
    }

    /// Receives every triple (JSON encoded) changed after the call that
    /// matches `pattern` and `event`. Fails until the store is wired to a bus.
    pub async fn subscribe(
        &self,
        pattern: &TriplePattern,
        event: Option<TripleEvent>,
    ) -> Result<broadcast::Receiver<Vec<u8>>, PortError> {
        let bus = self.bus.get().ok_or_else(|| {
            PortError::Invalid("triple store is not wired to a bus".to_string())
        })?;
        bus.subscribe(&subscription_topic(pattern, event)).await
    }

    async fn notify(&self, event: TripleEvent, triples: &[Triple]) -> Result<(), PortError> {
        let Some(bus) = self.bus.get() else {
            return Ok(());
        };
        for triple in triples {
            bus.publish_json(&triple_topic(event, triple), triple).await?;
        }
        Ok(())
    }

    pub async fn triples(&self) -> Result<Vec<Triple>, PortError> {
        self.adapter.triples().await
    }

    pub async fn subject(&self, subject: &str) -> Result<Vec<Triple>, PortError> {
        self.adapter.subject(subject).await
    }

    pub async fn query(&self, pattern: &TriplePattern) -> Result<Vec<Triple>, PortError> {
        let candidates = match &pattern.subject {
            Some(subject) => match self.adapter.subject(subject).await {
                Ok(triples) => triples,
                Err(PortError::NotFound { .. }) => return Ok(Vec::new()),
                Err(e) => return Err(e),
            },
            None => self.adapter.triples().await?,
        };
        Ok(candidates
            .into_iter()
            .filter(|t| pattern.matches(t))
            .collect())
    }

    pub async fn schema(&self, name: &str) -> Result<SchemaRecord, PortError> {
        self.adapter.schema(name).await
    }

    /// Stores `content` under `name` unless an identical schema is already
    /// stored.
    pub async fn load_schema(&self, name: &str, content: &str) -> Result<SchemaLoad, PortError> {
        if content.trim().is_empty() {
            return Err(PortError::Invalid(format!("schema '{}' is empty", name)));
        }

        let hash = sha256_hex(content);
        match self.adapter.schema(name).await {
            Ok(existing) if existing.hash == hash => return Ok(SchemaLoad::Unchanged),
            Ok(_) | Err(PortError::NotFound { .. }) => {}
            Err(e) => return Err(e),
        }

        self.adapter
            .store_schema(SchemaRecord {
                name: name.to_string(),
                hash,
                content: content.to_string(),
            })
            .await?;
        Ok(SchemaLoad::Loaded)
    }

    /// Loads each ontology independently; one failure does not stop the rest.
    pub async fn load_schemas(
        &self,
        ontologies: &[Ontology],
    ) -> Vec<(String, Result<SchemaLoad, PortError>)> {
        let mut results = Vec::with_capacity(ontologies.len());
        for ontology in ontologies {
            let result = self.load_schema(&ontology.name, &ontology.content).await;
            results.push((ontology.name.clone(), result));
        }
        results
    }
}
