// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use std::collections::{BTreeMap, BTreeSet};

use crate::backends::triple_store::MemoryTripleStoreAdapter;
use crate::errors::PortError;
use crate::traits::{SchemaRecord, SecretPort, Triple, TripleStorePort};

/// A triple store that refuses to store the named schemas.
pub struct RejectingTripleStoreAdapter {
    rejected: BTreeSet<String>,
    inner: MemoryTripleStoreAdapter,
}

impl RejectingTripleStoreAdapter {
    pub fn new(rejected: &[&str]) -> Self {
        Self {
            rejected: rejected.iter().map(|s| s.to_string()).collect(),
            inner: MemoryTripleStoreAdapter::new(),
        }
    }
}

#[async_trait]
impl TripleStorePort for RejectingTripleStoreAdapter {
    async fn insert(&self, triples: &[Triple]) -> Result<(), PortError> {
        self.inner.insert(triples).await
    }

    async fn remove(&self, triples: &[Triple]) -> Result<(), PortError> {
        self.inner.remove(triples).await
    }

    async fn triples(&self) -> Result<Vec<Triple>, PortError> {
        self.inner.triples().await
    }

    async fn subject(&self, subject: &str) -> Result<Vec<Triple>, PortError> {
        self.inner.subject(subject).await
    }

    async fn schema(&self, name: &str) -> Result<SchemaRecord, PortError> {
        self.inner.schema(name).await
    }

    async fn store_schema(&self, record: SchemaRecord) -> Result<(), PortError> {
        if self.rejected.contains(&record.name) {
            return Err(PortError::Invalid(format!(
                "simulated failure storing schema '{}'",
                record.name
            )));
        }
        self.inner.store_schema(record).await
    }
}

/// A secret source whose writes always fail.
pub struct FailingSecretAdapter;

#[async_trait]
impl SecretPort for FailingSecretAdapter {
    async fn get(&self, _key: &str) -> Result<Option<String>, PortError> {
        Ok(None)
    }

    async fn set(&self, key: &str, _value: &str) -> Result<(), PortError> {
        Err(PortError::Invalid(format!("simulated failure writing '{}'", key)))
    }

    async fn remove(&self, key: &str) -> Result<(), PortError> {
        Err(PortError::Invalid(format!("simulated failure removing '{}'", key)))
    }

    async fn list(&self) -> Result<BTreeMap<String, String>, PortError> {
        Ok(BTreeMap::new())
    }

    fn name(&self) -> &'static str {
        "failing"
    }
}
