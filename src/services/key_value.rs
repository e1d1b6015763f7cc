// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;
use std::time::Duration;

use crate::errors::PortError;
use crate::traits::KeyValuePort;

pub struct KeyValueService {
    adapter: Arc<dyn KeyValuePort>,
}

impl KeyValueService {
    pub fn new(adapter: Arc<dyn KeyValuePort>) -> Self {
        Self { adapter }
    }

    pub async fn get(&self, key: &str) -> Result<Vec<u8>, PortError> {
        self.adapter.get(key).await
    }

    pub async fn set(&self, key: &str, value: Vec<u8>, ttl: Option<Duration>) -> Result<(), PortError> {
        self.adapter.set(key, value, ttl).await
    }

    pub async fn delete(&self, key: &str) -> Result<(), PortError> {
        self.adapter.delete(key).await
    }

    pub async fn exists(&self, key: &str) -> Result<bool, PortError> {
        self.adapter.exists(key).await
    }

    pub async fn keys(&self, prefix: &str) -> Result<Vec<String>, PortError> {
        self.adapter.keys(prefix).await
    }
}
