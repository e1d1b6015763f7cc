// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::errors::PortError;
use crate::traits::{CachePort, CachedData};

#[derive(Default)]
pub struct MemoryCacheAdapter {
    entries: RwLock<HashMap<String, CachedData>>,
}

impl MemoryCacheAdapter {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CachePort for MemoryCacheAdapter {
    async fn get(&self, key: &str) -> Result<CachedData, PortError> {
        self.entries
            .read()
            .await
            .get(key)
            .cloned()
            .ok_or_else(|| PortError::not_found(key))
    }

    async fn set(&self, key: &str, data: CachedData) -> Result<(), PortError> {
        self.entries.write().await.insert(key.to_string(), data);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), PortError> {
        match self.entries.write().await.remove(key) {
            Some(_) => Ok(()),
            None => Err(PortError::not_found(key)),
        }
    }

    async fn exists(&self, key: &str) -> Result<bool, PortError> {
        Ok(self.entries.read().await.contains_key(key))
    }
}
