// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use crate::errors::PortError;
use crate::traits::{SearchHit, VectorDocument, VectorStorePort};

pub struct VectorStoreService {
    adapter: Arc<dyn VectorStorePort>,
}

impl VectorStoreService {
    pub fn new(adapter: Arc<dyn VectorStorePort>) -> Self {
        Self { adapter }
    }

    pub async fn ensure_collection(&self, collection: &str, dimension: usize) -> Result<(), PortError> {
        self.adapter.ensure_collection(collection, dimension).await
    }

    pub async fn upsert(&self, collection: &str, documents: Vec<VectorDocument>) -> Result<(), PortError> {
        self.adapter.upsert(collection, documents).await
    }

    pub async fn search(
        &self,
        collection: &str,
        vector: &[f32],
        limit: usize,
    ) -> Result<Vec<SearchHit>, PortError> {
        self.adapter.search(collection, vector, limit).await
    }

    pub async fn get(&self, collection: &str, id: &str) -> Result<VectorDocument, PortError> {
        self.adapter.get(collection, id).await
    }

    pub async fn delete(&self, collection: &str, ids: &[String]) -> Result<(), PortError> {
        self.adapter.delete(collection, ids).await
    }
}
