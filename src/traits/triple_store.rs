// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::PortError;

/// A single subject/predicate/object statement. Terms are kept as opaque
/// strings (IRIs or literals); the engine never interprets them.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Triple {
    pub subject: String,
    pub predicate: String,
    pub object: String,
}

impl Triple {
    pub fn new(
        subject: impl Into<String>,
        predicate: impl Into<String>,
        object: impl Into<String>,
    ) -> Self {
        Self {
            subject: subject.into(),
            predicate: predicate.into(),
            object: object.into(),
        }
    }
}

/// Persisted bookkeeping for one loaded ontology schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaRecord {
    pub name: String,
    /// Hex SHA-256 of `content`.
    pub hash: String,
    pub content: String,
}

/// Capability contract for graph stores.
#[async_trait]
pub trait TripleStorePort: Send + Sync {
    async fn insert(&self, triples: &[Triple]) -> Result<(), PortError>;

    async fn remove(&self, triples: &[Triple]) -> Result<(), PortError>;

    /// Every triple currently held by the store.
    async fn triples(&self) -> Result<Vec<Triple>, PortError>;

    /// Fails with `PortError::NotFound` if nothing is stored for `subject`.
    async fn subject(&self, subject: &str) -> Result<Vec<Triple>, PortError>;

    /// Fails with `PortError::NotFound` if no schema was stored under `name`.
    async fn schema(&self, name: &str) -> Result<SchemaRecord, PortError>;

    async fn store_schema(&self, record: SchemaRecord) -> Result<(), PortError>;
}
