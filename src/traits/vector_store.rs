// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::PortError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorDocument {
    pub id: String,
    pub vector: Vec<f32>,
    #[serde(default)]
    pub payload: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit {
    pub id: String,
    pub score: f32,
    pub payload: serde_json::Value,
}

/// Capability contract for similarity search back ends.
#[async_trait]
pub trait VectorStorePort: Send + Sync {
    /// Creates the collection if missing. Re-creating with a different
    /// dimension fails with `PortError::Invalid`.
    async fn ensure_collection(&self, collection: &str, dimension: usize) -> Result<(), PortError>;

    async fn upsert(&self, collection: &str, documents: Vec<VectorDocument>) -> Result<(), PortError>;

    /// Returns at most `limit` hits ordered by descending score.
    async fn search(
        &self,
        collection: &str,
        vector: &[f32],
        limit: usize,
    ) -> Result<Vec<SearchHit>, PortError>;

    async fn get(&self, collection: &str, id: &str) -> Result<VectorDocument, PortError>;

    async fn delete(&self, collection: &str, ids: &[String]) -> Result<(), PortError>;
}
