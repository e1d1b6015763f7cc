// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::PathBuf;

use crate::errors::PortError;
use crate::traits::{CachePort, CachedData};
use crate::utils::sha256_hex;

/// One JSON file per entry, named by the SHA-256 of the key.
///
/// Concurrent writers of the same key race; the last write wins.
pub struct FsCacheAdapter {
    base_path: PathBuf,
}

impl FsCacheAdapter {
    pub fn new(base_path: impl Into<PathBuf>) -> Result<Self, PortError> {
        let base_path = base_path.into();
        std::fs::create_dir_all(&base_path)?;
        Ok(Self { base_path })
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.base_path.join(format!("{}.json", sha256_hex(key)))
    }
}

#[async_trait]
impl CachePort for FsCacheAdapter {
    async fn get(&self, key: &str) -> Result<CachedData, PortError> {
        match tokio::fs::read(self.entry_path(key)).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(PortError::not_found(key)),
            Err(e) => Err(e.into()),
        }
    }

    async fn set(&self, key: &str, data: CachedData) -> Result<(), PortError> {
        let bytes = serde_json::to_vec(&data)?;
        tokio::fs::write(self.entry_path(key), bytes).await?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), PortError> {
        match tokio::fs::remove_file(self.entry_path(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(PortError::not_found(key)),
            Err(e) => Err(e.into()),
        }
    }

    async fn exists(&self, key: &str) -> Result<bool, PortError> {
        Ok(tokio::fs::try_exists(self.entry_path(key)).await?)
    }
}
