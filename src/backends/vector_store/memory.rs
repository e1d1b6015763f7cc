// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use tokio::sync::RwLock;

use crate::errors::PortError;
use crate::traits::{SearchHit, VectorDocument, VectorStorePort};

struct Collection {
    dimension: usize,
    documents: BTreeMap<String, VectorDocument>,
}

impl Collection {
    fn check_dimension(&self, name: &str, vector: &[f32]) -> Result<(), PortError> {
        if vector.len() != self.dimension {
            return Err(PortError::Invalid(format!(
                "collection '{}' expects dimension {}, got {}",
                name,
                self.dimension,
                vector.len()
            )));
        }
        Ok(())
    }
}

/// Brute-force cosine similarity over in-memory collections.
#[derive(Default)]
pub struct MemoryVectorStoreAdapter {
    collections: RwLock<HashMap<String, Collection>>,
}

impl MemoryVectorStoreAdapter {
    pub fn new() -> Self {
        Self::default()
    }
}

fn cosine(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}

#[async_trait]
impl VectorStorePort for MemoryVectorStoreAdapter {
    async fn ensure_collection(&self, collection: &str, dimension: usize) -> Result<(), PortError> {
        if dimension == 0 {
            return Err(PortError::Invalid("dimension must be positive".to_string()));
        }
        let mut collections = self.collections.write().await;
        match collections.get(collection) {
            Some(existing) if existing.dimension != dimension => Err(PortError::Invalid(format!(
                "collection '{}' already exists with dimension {}",
                collection, existing.dimension
            ))),
            Some(_) => Ok(()),
            None => {
                collections.insert(
                    collection.to_string(),
                    Collection {
                        dimension,
                        documents: BTreeMap::new(),
                    },
                );
                Ok(())
            }
        }
    }

    async fn upsert(&self, collection: &str, documents: Vec<VectorDocument>) -> Result<(), PortError> {
        let mut collections = self.collections.write().await;
        let target = collections
            .get_mut(collection)
            .ok_or_else(|| PortError::not_found(collection))?;
        for document in &documents {
            target.check_dimension(collection, &document.vector)?;
        }
        for document in documents {
            target.documents.insert(document.id.clone(), document);
        }
        Ok(())
    }

    async fn search(
        &self,
        collection: &str,
        vector: &[f32],
        limit: usize,
    ) -> Result<Vec<SearchHit>, PortError> {
        let collections = self.collections.read().await;
        let target = collections
            .get(collection)
            .ok_or_else(|| PortError::not_found(collection))?;
        target.check_dimension(collection, vector)?;

        let mut hits: Vec<SearchHit> = target
            .documents
            .values()
            .map(|d| SearchHit {
                id: d.id.clone(),
                score: cosine(vector, &d.vector),
                payload: d.payload.clone(),
            })
            .collect();
        hits.sort_by(|a, b| b.score.total_cmp(&a.score).then_with(|| a.id.cmp(&b.id)));
        hits.truncate(limit);
        Ok(hits)
    }

    async fn get(&self, collection: &str, id: &str) -> Result<VectorDocument, PortError> {
        let collections = self.collections.read().await;
        collections
            .get(collection)
            .ok_or_else(|| PortError::not_found(collection))?
            .documents
            .get(id)
            .cloned()
            .ok_or_else(|| PortError::not_found(format!("{}/{}", collection, id)))
    }

    async fn delete(&self, collection: &str, ids: &[String]) -> Result<(), PortError> {
        let mut collections = self.collections.write().await;
        let target = collections
            .get_mut(collection)
            .ok_or_else(|| PortError::not_found(collection))?;
        for id in ids {
            target.documents.remove(id);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(id: &str, vector: &[f32]) -> VectorDocument {
        VectorDocument {
            id: id.to_string(),
            vector: vector.to_vec(),
            payload: json!({ "id": id }),
        }
    }

    #[tokio::test]
    async fn test_search_orders_by_cosine_similarity() {
        let store = MemoryVectorStoreAdapter::new();
        store.ensure_collection("docs", 2).await.unwrap();
        store
            .upsert(
                "docs",
                vec![doc("x", &[1.0, 0.0]), doc("y", &[0.0, 1.0]), doc("xy", &[1.0, 1.0])],
            )
            .await
            .unwrap();

        let hits = store.search("docs", &[1.0, 0.1], 2).await.unwrap();

        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].id, "x");
        assert_eq!(hits[1].id, "xy");
        assert!(hits[0].score > hits[1].score);
    }

    #[tokio::test]
    async fn test_dimension_is_enforced() {
        let store = MemoryVectorStoreAdapter::new();
        store.ensure_collection("docs", 3).await.unwrap();

        assert!(store.ensure_collection("docs", 4).await.is_err());
        assert!(store.upsert("docs", vec![doc("a", &[1.0])]).await.is_err());
        assert!(store.search("docs", &[1.0, 2.0], 1).await.is_err());
    }

    #[tokio::test]
    async fn test_get_and_delete() {
        let store = MemoryVectorStoreAdapter::new();
        store.ensure_collection("docs", 1).await.unwrap();
        store.upsert("docs", vec![doc("a", &[1.0])]).await.unwrap();

        assert_eq!(store.get("docs", "a").await.unwrap().payload, json!({"id": "a"}));
        store.delete("docs", &["a".to_string()]).await.unwrap();
        assert!(store.get("docs", "a").await.unwrap_err().is_not_found());
        assert!(store.get("missing", "a").await.unwrap_err().is_not_found());
    }
}
