// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use std::collections::BTreeSet;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::backends::object_storage::FsObjectStorageAdapter;
use crate::errors::PortError;
use crate::services::ObjectStorageService;
use crate::traits::{SchemaRecord, Triple, TripleStorePort};
use crate::utils::sha256_hex;

const SUBJECTS: &str = "subjects";
const SCHEMAS: &str = "schemas";

/// Triple store persisted as JSON blobs in object storage.
///
/// Layout under `prefix`:
/// ```text
/// subjects/<sha256(subject)>.json   all triples for one subject
/// schemas/<sha256(name)>.json       one SchemaRecord
/// ```
pub struct ObjectStorageTripleStoreAdapter {
    storage: Arc<ObjectStorageService>,
    prefix: String,
    write_lock: Mutex<()>,
}

impl ObjectStorageTripleStoreAdapter {
    pub fn new(storage: Arc<ObjectStorageService>, prefix: impl Into<String>) -> Self {
        Self {
            storage,
            prefix: prefix.into().trim_matches('/').to_string(),
            write_lock: Mutex::new(()),
        }
    }

    /// The `fs` triple store: same layout in a private directory.
    pub fn on_file_system(
        store_path: impl Into<PathBuf>,
        triples_path: impl Into<String>,
    ) -> Result<Self, PortError> {
        let adapter = FsObjectStorageAdapter::new(store_path)?;
        let storage = Arc::new(ObjectStorageService::new(Arc::new(adapter)));
        Ok(Self::new(storage, triples_path))
    }

    fn dir(&self, section: &str) -> String {
        if self.prefix.is_empty() {
            section.to_string()
        } else {
            format!("{}/{}", self.prefix, section)
        }
    }

    async fn read_subject(&self, subject: &str) -> Result<BTreeSet<Triple>, PortError> {
        let key = format!("{}.json", sha256_hex(subject));
        match self.storage.get_object(&self.dir(SUBJECTS), &key).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(PortError::NotFound { .. }) => Ok(BTreeSet::new()),
            Err(e) => Err(e),
        }
    }

    async fn write_subject(&self, subject: &str, triples: &BTreeSet<Triple>) -> Result<(), PortError> {
        let key = format!("{}.json", sha256_hex(subject));
        let dir = self.dir(SUBJECTS);
        if triples.is_empty() {
            return match self.storage.delete_object(&dir, &key).await {
                Ok(()) | Err(PortError::NotFound { .. }) => Ok(()),
                Err(e) => Err(e),
            };
        }
        let bytes = serde_json::to_vec_pretty(triples)?;
        self.storage.put_object(&dir, &key, bytes).await
    }

    async fn apply<F>(&self, triples: &[Triple], mut change: F) -> Result<(), PortError>
    where
        F: FnMut(&mut BTreeSet<Triple>, &Triple) + Send,
    {
        let _guard = self.write_lock.lock().await;

        let subjects: BTreeSet<&str> = triples.iter().map(|t| t.subject.as_str()).collect();
        for subject in subjects {
            let mut stored = self.read_subject(subject).await?;
            for triple in triples.iter().filter(|t| t.subject == subject) {
                change(&mut stored, triple);
            }
            self.write_subject(subject, &stored).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl TripleStorePort for ObjectStorageTripleStoreAdapter {
    async fn insert(&self, triples: &[Triple]) -> Result<(), PortError> {
        self.apply(triples, |stored, t| {
            stored.insert(t.clone());
        })
        .await
    }

    async fn remove(&self, triples: &[Triple]) -> Result<(), PortError> {
        self.apply(triples, |stored, t| {
            stored.remove(t);
        })
        .await
    }

    async fn triples(&self) -> Result<Vec<Triple>, PortError> {
        let dir = self.dir(SUBJECTS);
        let mut all = BTreeSet::new();
        for key in self.storage.list_objects(&dir, None).await? {
            let bytes = self.storage.get_object(&dir, &key).await?;
            let triples: Vec<Triple> = serde_json::from_slice(&bytes)?;
            all.extend(triples);
        }
        Ok(all.into_iter().collect())
    }

    async fn subject(&self, subject: &str) -> Result<Vec<Triple>, PortError> {
        let stored = self.read_subject(subject).await?;
        if stored.is_empty() {
            return Err(PortError::not_found(subject));
        }
        Ok(stored.into_iter().collect())
    }

    async fn schema(&self, name: &str) -> Result<SchemaRecord, PortError> {
        let key = format!("{}.json", sha256_hex(name));
        match self.storage.get_object(&self.dir(SCHEMAS), &key).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(PortError::NotFound { .. }) => Err(PortError::not_found(name)),
            Err(e) => Err(e),
        }
    }

    async fn store_schema(&self, record: SchemaRecord) -> Result<(), PortError> {
        let key = format!("{}.json", sha256_hex(&record.name));
        let bytes = serde_json::to_vec_pretty(&record)?;
        self.storage.put_object(&self.dir(SCHEMAS), &key, bytes).await
    }
}
