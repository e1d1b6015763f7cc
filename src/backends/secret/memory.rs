// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use crate::errors::PortError;
use crate::traits::SecretPort;

/// In-memory secrets, seeded from configuration.
#[derive(Default)]
pub struct MemorySecretAdapter {
    values: RwLock<BTreeMap<String, String>>,
}

impl MemorySecretAdapter {
    pub fn new(values: BTreeMap<String, String>) -> Self {
        Self {
            values: RwLock::new(values),
        }
    }
}

#[async_trait]
impl SecretPort for MemorySecretAdapter {
    async fn get(&self, key: &str) -> Result<Option<String>, PortError> {
        Ok(self.values.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), PortError> {
        self.values
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), PortError> {
        self.values.write().await.remove(key);
        Ok(())
    }

    async fn list(&self) -> Result<BTreeMap<String, String>, PortError> {
        Ok(self.values.read().await.clone())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
