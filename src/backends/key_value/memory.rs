// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;

use crate::errors::PortError;
use crate::traits::KeyValuePort;

struct Entry {
    value: Vec<u8>,
    expires_at: Option<Instant>,
}

impl Entry {
    fn is_live(&self, now: Instant) -> bool {
        self.expires_at.map_or(true, |at| now < at)
    }
}

/// In-memory key-value store. Expired entries are dropped lazily.
#[derive(Default)]
pub struct MemoryKeyValueAdapter {
    entries: RwLock<BTreeMap<String, Entry>>,
}

impl MemoryKeyValueAdapter {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValuePort for MemoryKeyValueAdapter {
    async fn get(&self, key: &str) -> Result<Vec<u8>, PortError> {
        let now = Instant::now();
        let mut entries = self.entries.write().await;
        match entries.get(key) {
            Some(entry) if entry.is_live(now) => Ok(entry.value.clone()),
            Some(_) => {
                entries.remove(key);
                Err(PortError::not_found(key))
            }
            None => Err(PortError::not_found(key)),
        }
    }

    async fn set(&self, key: &str, value: Vec<u8>, ttl: Option<Duration>) -> Result<(), PortError> {
        let expires_at = ttl.map(|ttl| Instant::now() + ttl);
        self.entries
            .write()
            .await
            .insert(key.to_string(), Entry { value, expires_at });
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), PortError> {
        let now = Instant::now();
        match self.entries.write().await.remove(key) {
            Some(entry) if entry.is_live(now) => Ok(()),
            _ => Err(PortError::not_found(key)),
        }
    }

    async fn exists(&self, key: &str) -> Result<bool, PortError> {
        let now = Instant::now();
        Ok(self
            .entries
            .read()
            .await
            .get(key)
            .map_or(false, |e| e.is_live(now)))
    }

    async fn keys(&self, prefix: &str) -> Result<Vec<String>, PortError> {
        let now = Instant::now();
        Ok(self
            .entries
            .read()
            .await
            .iter()
            .filter(|(k, e)| k.starts_with(prefix) && e.is_live(now))
            .map(|(k, _)| k.clone())
            .collect())
    }
}
