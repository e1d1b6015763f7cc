// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::errors::PortError;
use crate::traits::{CachePort, CachedData, DataType};

/// A decoded cache value.
#[derive(Debug, Clone, PartialEq)]
pub enum CacheValue {
    Text(String),
    Json(serde_json::Value),
    Binary(Vec<u8>),
}

impl CacheValue {
    pub fn data_type(&self) -> DataType {
        match self {
            CacheValue::Text(_) => DataType::Text,
            CacheValue::Json(_) => DataType::Json,
            CacheValue::Binary(_) => DataType::Binary,
        }
    }

    fn encode(&self, key: &str) -> Result<CachedData, PortError> {
        let data = match self {
            CacheValue::Text(text) => text.clone(),
            CacheValue::Json(value) => serde_json::to_string(value)?,
            CacheValue::Binary(bytes) => BASE64.encode(bytes),
        };
        Ok(CachedData {
            key: key.to_string(),
            data,
            data_type: self.data_type(),
            created_at: now_secs(),
        })
    }

    fn decode(record: CachedData) -> Result<Self, PortError> {
        match record.data_type {
            DataType::Text => Ok(CacheValue::Text(record.data)),
            DataType::Json => Ok(CacheValue::Json(serde_json::from_str(&record.data)?)),
            DataType::Binary => BASE64
                .decode(record.data.as_bytes())
                .map(CacheValue::Binary)
                .map_err(|e| PortError::Serialization(e.to_string())),
        }
    }
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Typed cache on top of a [`CachePort`].
pub struct CacheService {
    adapter: Arc<dyn CachePort>,
}

impl CacheService {
    pub fn new(adapter: Arc<dyn CachePort>) -> Self {
        Self { adapter }
    }

    /// Fails with `Expired` when `ttl` is given and the entry is older.
    pub async fn get(&self, key: &str, ttl: Option<Duration>) -> Result<CacheValue, PortError> {
        let record = self.adapter.get(key).await?;
        if let Some(ttl) = ttl {
            let age = now_secs().saturating_sub(record.created_at);
            if age > ttl.as_secs() {
                return Err(PortError::Expired {
                    key: key.to_string(),
                });
            }
        }
        CacheValue::decode(record)
    }

    pub async fn set(&self, key: &str, value: &CacheValue) -> Result<(), PortError> {
        self.adapter.set(key, value.encode(key)?).await
    }

    pub async fn get_text(&self, key: &str, ttl: Option<Duration>) -> Result<String, PortError> {
        match self.get(key, ttl).await? {
            CacheValue::Text(text) => Ok(text),
            other => Err(type_mismatch(key, DataType::Text, other.data_type())),
        }
    }

    pub async fn get_json(
        &self,
        key: &str,
        ttl: Option<Duration>,
    ) -> Result<serde_json::Value, PortError> {
        match self.get(key, ttl).await? {
            CacheValue::Json(value) => Ok(value),
            other => Err(type_mismatch(key, DataType::Json, other.data_type())),
        }
    }

    pub async fn get_binary(&self, key: &str, ttl: Option<Duration>) -> Result<Vec<u8>, PortError> {
        match self.get(key, ttl).await? {
            CacheValue::Binary(bytes) => Ok(bytes),
            other => Err(type_mismatch(key, DataType::Binary, other.data_type())),
        }
    }

    pub async fn set_text(&self, key: &str, text: &str) -> Result<(), PortError> {
        self.set(key, &CacheValue::Text(text.to_string())).await
    }

    pub async fn set_json(&self, key: &str, value: &serde_json::Value) -> Result<(), PortError> {
        self.set(key, &CacheValue::Json(value.clone())).await
    }

    pub async fn set_binary(&self, key: &str, bytes: &[u8]) -> Result<(), PortError> {
        self.set(key, &CacheValue::Binary(bytes.to_vec())).await
    }

    pub async fn exists(&self, key: &str) -> Result<bool, PortError> {
        self.adapter.exists(key).await
    }

    pub async fn delete(&self, key: &str) -> Result<(), PortError> {
        self.adapter.delete(key).await
    }

    /// Returns the cached value, or runs `producer` and caches its result
    /// when the entry is missing, expired or stored with another type.
    pub async fn get_or_compute<F, Fut>(
        &self,
        key: &str,
        data_type: DataType,
        ttl: Option<Duration>,
        producer: F,
    ) -> Result<CacheValue, PortError>
    where
        F: FnOnce() -> Fut + Send,
        Fut: Future<Output = Result<CacheValue, PortError>> + Send,
    {
        match self.get(key, ttl).await {
            Ok(value) if value.data_type() == data_type => return Ok(value),
            Ok(_) | Err(PortError::NotFound { .. }) | Err(PortError::Expired { .. }) => {}
            Err(e) => return Err(e),
        }

        let value = producer().await?;
        if value.data_type() != data_type {
            return Err(type_mismatch(key, data_type, value.data_type()));
        }
        self.set(key, &value).await?;
        Ok(value)
    }
}

fn type_mismatch(key: &str, expected: DataType, actual: DataType) -> PortError {
    PortError::Invalid(format!(
        "cache entry '{}' holds {:?}, expected {:?}",
        key, actual, expected
    ))
}
