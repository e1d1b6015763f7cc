// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use std::time::Duration;

use crate::errors::PortError;

#[async_trait]
pub trait KeyValuePort: Send + Sync {
    /// Fails with `PortError::NotFound` for absent or expired keys.
    async fn get(&self, key: &str) -> Result<Vec<u8>, PortError>;

    async fn set(&self, key: &str, value: Vec<u8>, ttl: Option<Duration>) -> Result<(), PortError>;

    /// Fails with `PortError::NotFound` for absent keys.
    async fn delete(&self, key: &str) -> Result<(), PortError>;

    async fn exists(&self, key: &str) -> Result<bool, PortError>;

    async fn keys(&self, prefix: &str) -> Result<Vec<String>, PortError>;
}
