// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use tokio::sync::mpsc::UnboundedSender;

use crate::errors::PortError;

/// Capability contract for blob storage back ends.
///
/// Keys are addressed by a `(prefix, key)` pair. Adapters decide how the
/// pair maps onto their own layout.
#[async_trait]
pub trait ObjectStoragePort: Send + Sync {
    /// Fails with `PortError::NotFound` when the object is absent.
    async fn get_object(&self, prefix: &str, key: &str) -> Result<Vec<u8>, PortError>;

    /// Overwrites silently if the object already exists.
    async fn put_object(&self, prefix: &str, key: &str, content: Vec<u8>) -> Result<(), PortError>;

    /// Fails with `PortError::NotFound` when the object is absent.
    async fn delete_object(&self, prefix: &str, key: &str) -> Result<(), PortError>;

    /// Lists the keys stored under `prefix`.
    ///
    /// When `queue` is supplied every key is also pushed onto it as soon as
    /// it is discovered. The channel is a progress feed only; completion is
    /// signalled by this call returning the full list.
    async fn list_objects(
        &self,
        prefix: &str,
        queue: Option<&UnboundedSender<String>>,
    ) -> Result<Vec<String>, PortError>;
}
