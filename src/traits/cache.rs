// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::PortError;

/// Declared type of a cached payload, persisted next to the data so the
/// original value can be reconstructed on read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataType {
    Text,
    Json,
    Binary,
}

/// Self-describing cache record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachedData {
    pub key: String,
    pub data: String,
    pub data_type: DataType,
    /// Seconds since the Unix epoch.
    pub created_at: u64,
}

#[async_trait]
pub trait CachePort: Send + Sync {
    /// Fails with `PortError::NotFound` when the key is absent.
    async fn get(&self, key: &str) -> Result<CachedData, PortError>;

    /// Always overwrites.
    async fn set(&self, key: &str, data: CachedData) -> Result<(), PortError>;

    /// Fails with `PortError::NotFound` when the key is absent.
    async fn delete(&self, key: &str) -> Result<(), PortError>;

    async fn exists(&self, key: &str) -> Result<bool, PortError>;
}
