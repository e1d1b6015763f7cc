// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::errors::PortError;
use crate::traits::SecretPort;

/// Secret lookups over an ordered list of adapters.
///
/// Reads return the first adapter's value. Writes go to every adapter in
/// order and stop at the first failure, so a failed `set` or `remove` can
/// leave the adapters disagreeing.
pub struct SecretService {
    adapters: Vec<Arc<dyn SecretPort>>,
}

impl SecretService {
    pub fn new(adapters: Vec<Arc<dyn SecretPort>>) -> Self {
        Self { adapters }
    }

    pub fn adapter_names(&self) -> Vec<&'static str> {
        self.adapters.iter().map(|a| a.name()).collect()
    }

    pub async fn get(&self, key: &str) -> Result<Option<String>, PortError> {
        for adapter in &self.adapters {
            if let Some(value) = adapter.get(key).await? {
                return Ok(Some(value));
            }
        }
        Ok(None)
    }

    pub async fn get_or(&self, key: &str, default: &str) -> Result<String, PortError> {
        Ok(self.get(key).await?.unwrap_or_else(|| default.to_string()))
    }

    pub async fn set(&self, key: &str, value: &str) -> Result<(), PortError> {
        for adapter in &self.adapters {
            adapter.set(key, value).await?;
        }
        Ok(())
    }

    pub async fn remove(&self, key: &str) -> Result<(), PortError> {
        for adapter in &self.adapters {
            adapter.remove(key).await?;
        }
        Ok(())
    }

    /// Union of every adapter's secrets; later adapters win on collision.
    pub async fn list(&self) -> Result<BTreeMap<String, String>, PortError> {
        let mut merged = BTreeMap::new();
        for adapter in &self.adapters {
            merged.extend(adapter.list().await?);
        }
        Ok(merged)
    }
}
