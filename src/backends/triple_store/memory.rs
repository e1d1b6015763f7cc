// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use std::collections::{BTreeMap, BTreeSet};
use tokio::sync::RwLock;

use crate::errors::PortError;
use crate::traits::{SchemaRecord, Triple, TripleStorePort};

#[derive(Default)]
pub struct MemoryTripleStoreAdapter {
    triples: RwLock<BTreeSet<Triple>>,
    schemas: RwLock<BTreeMap<String, SchemaRecord>>,
}

impl MemoryTripleStoreAdapter {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TripleStorePort for MemoryTripleStoreAdapter {
    async fn insert(&self, triples: &[Triple]) -> Result<(), PortError> {
        self.triples.write().await.extend(triples.iter().cloned());
        Ok(())
    }

    async fn remove(&self, triples: &[Triple]) -> Result<(), PortError> {
        let mut stored = self.triples.write().await;
        for triple in triples {
            stored.remove(triple);
        }
        Ok(())
    }

    async fn triples(&self) -> Result<Vec<Triple>, PortError> {
        Ok(self.triples.read().await.iter().cloned().collect())
    }

    async fn subject(&self, subject: &str) -> Result<Vec<Triple>, PortError> {
        let matching: Vec<Triple> = self
            .triples
            .read()
            .await
            .iter()
            .filter(|t| t.subject == subject)
            .cloned()
            .collect();
        if matching.is_empty() {
            return Err(PortError::not_found(subject));
        }
        Ok(matching)
    }

    async fn schema(&self, name: &str) -> Result<SchemaRecord, PortError> {
        self.schemas
            .read()
            .await
            .get(name)
            .cloned()
            .ok_or_else(|| PortError::not_found(name))
    }

    async fn store_schema(&self, record: SchemaRecord) -> Result<(), PortError> {
        self.schemas.write().await.insert(record.name.clone(), record);
        Ok(())
    }
}
