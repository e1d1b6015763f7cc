// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;

use crate::config::consts::RESERVED_STORAGE_PREFIX;
use crate::errors::PortError;
use crate::traits::ObjectStoragePort;

/// Object storage façade.
///
/// Callers may address objects with the local on-disk convention
/// (`storage/datastore/<prefix>`) or with a bare prefix; both reach the
/// same object whichever adapter is configured.
pub struct ObjectStorageService {
    adapter: Arc<dyn ObjectStoragePort>,
}

impl ObjectStorageService {
    pub fn new(adapter: Arc<dyn ObjectStoragePort>) -> Self {
        Self { adapter }
    }

    pub async fn get_object(&self, prefix: &str, key: &str) -> Result<Vec<u8>, PortError> {
        self.adapter.get_object(normalize_prefix(prefix), key).await
    }

    pub async fn put_object(
        &self,
        prefix: &str,
        key: &str,
        content: Vec<u8>,
    ) -> Result<(), PortError> {
        self.adapter
            .put_object(normalize_prefix(prefix), key, content)
            .await
    }

    pub async fn delete_object(&self, prefix: &str, key: &str) -> Result<(), PortError> {
        self.adapter.delete_object(normalize_prefix(prefix), key).await
    }

    pub async fn list_objects(
        &self,
        prefix: &str,
        queue: Option<&UnboundedSender<String>>,
    ) -> Result<Vec<String>, PortError> {
        self.adapter.list_objects(normalize_prefix(prefix), queue).await
    }
}

/// Strips a leading `/` and the reserved local-layout segment.
pub fn normalize_prefix(prefix: &str) -> &str {
    let prefix = prefix.trim_start_matches('/');
    match prefix.strip_prefix(RESERVED_STORAGE_PREFIX) {
        Some("") => "",
        Some(rest) if rest.starts_with('/') => rest.trim_start_matches('/'),
        _ => prefix,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::object_storage::MemoryObjectStorageAdapter;

    #[test]
    fn test_normalize_prefix() {
        assert_eq!(normalize_prefix("reports"), "reports");
        assert_eq!(normalize_prefix("/reports"), "reports");
        assert_eq!(normalize_prefix("storage/datastore/reports"), "reports");
        assert_eq!(normalize_prefix("/storage/datastore/reports/q1"), "reports/q1");
        assert_eq!(normalize_prefix("storage/datastore"), "");
        assert_eq!(normalize_prefix("storage/datastores"), "storage/datastores");
    }

    #[tokio::test]
    async fn test_reserved_prefix_reaches_same_object() {
        let service = ObjectStorageService::new(Arc::new(MemoryObjectStorageAdapter::new()));
        service
            .put_object("storage/datastore/exports", "a.txt", b"a".to_vec())
            .await
            .unwrap();

        assert_eq!(service.get_object("exports", "a.txt").await.unwrap(), b"a".to_vec());
        assert_eq!(
            service.list_objects("/exports", None).await.unwrap(),
            vec!["a.txt".to_string()]
        );
    }

    #[tokio::test]
    async fn test_not_found_propagates_unchanged() {
        let service = ObjectStorageService::new(Arc::new(MemoryObjectStorageAdapter::new()));
        let err = service.get_object("p", "missing").await.unwrap_err();
        assert!(matches!(err, PortError::NotFound { .. }));
    }
}
