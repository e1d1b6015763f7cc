// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use std::collections::BTreeMap;

use crate::errors::PortError;

/// Capability contract for secret sources.
#[async_trait]
pub trait SecretPort: Send + Sync {
    /// Returns `None` when this adapter has no value for `key`.
    async fn get(&self, key: &str) -> Result<Option<String>, PortError>;

    async fn set(&self, key: &str, value: &str) -> Result<(), PortError>;

    /// Removing an absent key is not an error.
    async fn remove(&self, key: &str) -> Result<(), PortError>;

    async fn list(&self) -> Result<BTreeMap<String, String>, PortError>;

    fn name(&self) -> &'static str;
}
