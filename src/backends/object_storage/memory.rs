// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::mpsc::UnboundedSender;
use tokio::sync::RwLock;

use crate::backends::validate_relative_path;
use crate::errors::PortError;
use crate::traits::ObjectStoragePort;

/// Process-local object storage, mainly for tests and ephemeral workspaces.
#[derive(Default)]
pub struct MemoryObjectStorageAdapter {
    objects: RwLock<BTreeMap<String, Vec<u8>>>,
}

impl MemoryObjectStorageAdapter {
    pub fn new() -> Self {
        Self::default()
    }
}

fn full_key(prefix: &str, key: &str) -> Result<String, PortError> {
    validate_relative_path(key)?;
    let prefix = prefix.trim_matches('/');
    if prefix.is_empty() {
        Ok(key.to_string())
    } else {
        validate_relative_path(prefix)?;
        Ok(format!("{}/{}", prefix, key))
    }
}

#[async_trait]
impl ObjectStoragePort for MemoryObjectStorageAdapter {
    async fn get_object(&self, prefix: &str, key: &str) -> Result<Vec<u8>, PortError> {
        let full = full_key(prefix, key)?;
        self.objects
            .read()
            .await
            .get(&full)
            .cloned()
            .ok_or_else(|| PortError::not_found(full))
    }

    async fn put_object(&self, prefix: &str, key: &str, content: Vec<u8>) -> Result<(), PortError> {
        let full = full_key(prefix, key)?;
        self.objects.write().await.insert(full, content);
        Ok(())
    }

    async fn delete_object(&self, prefix: &str, key: &str) -> Result<(), PortError> {
        let full = full_key(prefix, key)?;
        match self.objects.write().await.remove(&full) {
            Some(_) => Ok(()),
            None => Err(PortError::not_found(full)),
        }
    }

    async fn list_objects(
        &self,
        prefix: &str,
        queue: Option<&UnboundedSender<String>>,
    ) -> Result<Vec<String>, PortError> {
        let prefix = prefix.trim_matches('/');
        let scope = if prefix.is_empty() {
            String::new()
        } else {
            format!("{}/", prefix)
        };

        let objects = self.objects.read().await;
        let mut keys = Vec::new();
        for full in objects.keys() {
            if let Some(key) = full.strip_prefix(&scope) {
                if let Some(queue) = queue {
                    let _ = queue.send(key.to_string());
                }
                keys.push(key.to_string());
            }
        }
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_round_trip_and_not_found() {
        let adapter = MemoryObjectStorageAdapter::new();
        adapter.put_object("a/b", "c.txt", b"hello".to_vec()).await.unwrap();

        assert_eq!(adapter.get_object("a/b", "c.txt").await.unwrap(), b"hello".to_vec());
        assert!(adapter.get_object("a/b", "d.txt").await.unwrap_err().is_not_found());

        adapter.delete_object("a/b", "c.txt").await.unwrap();
        assert!(adapter.get_object("a/b", "c.txt").await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_list_is_scoped_to_prefix() {
        let adapter = MemoryObjectStorageAdapter::new();
        adapter.put_object("a", "1", vec![]).await.unwrap();
        adapter.put_object("a/nested", "2", vec![]).await.unwrap();
        adapter.put_object("ab", "3", vec![]).await.unwrap();

        let keys = adapter.list_objects("a", None).await.unwrap();
        assert_eq!(keys, vec!["1".to_string(), "nested/2".to_string()]);
    }
}
