// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::sync::mpsc::UnboundedSender;

use crate::backends::validate_relative_path;
use crate::errors::PortError;
use crate::traits::ObjectStoragePort;

/// Object storage on the local file system: `<base_path>/<prefix>/<key>`.
pub struct FsObjectStorageAdapter {
    base_path: PathBuf,
}

impl FsObjectStorageAdapter {
    /// Creates the base directory if it doesn't exist.
    pub fn new(base_path: impl Into<PathBuf>) -> Result<Self, PortError> {
        let base_path = base_path.into();
        std::fs::create_dir_all(&base_path)?;
        Ok(Self { base_path })
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn prefix_dir(&self, prefix: &str) -> Result<PathBuf, PortError> {
        let prefix = prefix.trim_matches('/');
        if prefix.is_empty() {
            return Ok(self.base_path.clone());
        }
        validate_relative_path(prefix)?;
        Ok(self.base_path.join(prefix))
    }

    fn object_path(&self, prefix: &str, key: &str) -> Result<PathBuf, PortError> {
        validate_relative_path(key)?;
        Ok(self.prefix_dir(prefix)?.join(key))
    }
}

fn display_key(prefix: &str, key: &str) -> String {
    let prefix = prefix.trim_matches('/');
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{}/{}", prefix, key)
    }
}

#[async_trait]
impl ObjectStoragePort for FsObjectStorageAdapter {
    async fn get_object(&self, prefix: &str, key: &str) -> Result<Vec<u8>, PortError> {
        let path = self.object_path(prefix, key)?;
        match tokio::fs::read(&path).await {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(PortError::not_found(display_key(prefix, key)))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn put_object(&self, prefix: &str, key: &str, content: Vec<u8>) -> Result<(), PortError> {
        let path = self.object_path(prefix, key)?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&path, content).await?;
        Ok(())
    }

    async fn delete_object(&self, prefix: &str, key: &str) -> Result<(), PortError> {
        let path = self.object_path(prefix, key)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(PortError::not_found(display_key(prefix, key)))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn list_objects(
        &self,
        prefix: &str,
        queue: Option<&UnboundedSender<String>>,
    ) -> Result<Vec<String>, PortError> {
        let root = self.prefix_dir(prefix)?;
        if !tokio::fs::try_exists(&root).await? {
            return Ok(Vec::new());
        }

        let mut keys = Vec::new();
        let mut pending = vec![root.clone()];

        while let Some(dir) = pending.pop() {
            let mut entries = tokio::fs::read_dir(&dir).await?;
            while let Some(entry) = entries.next_entry().await? {
                let path = entry.path();
                if entry.file_type().await?.is_dir() {
                    pending.push(path);
                    continue;
                }

                let Ok(relative) = path.strip_prefix(&root) else {
                    continue;
                };
                let key = relative
                    .components()
                    .map(|c| c.as_os_str().to_string_lossy())
                    .collect::<Vec<_>>()
                    .join("/");

                if let Some(queue) = queue {
                    // A dropped receiver only means nobody is watching progress.
                    let _ = queue.send(key.clone());
                }
                keys.push(key);
            }
        }

        keys.sort();
        Ok(keys)
    }
}
