// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use std::collections::BTreeMap;

use crate::errors::PortError;
use crate::traits::SecretPort;

/// Reads and writes the process environment.
///
/// Writes mutate process-wide state without synchronisation; callers that
/// `set`/`remove` from several threads must coordinate themselves.
#[derive(Debug, Default, Clone, Copy)]
pub struct EnvSecretAdapter;

impl EnvSecretAdapter {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl SecretPort for EnvSecretAdapter {
    async fn get(&self, key: &str) -> Result<Option<String>, PortError> {
        Ok(std::env::var(key).ok())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), PortError> {
        if key.is_empty() || key.contains('=') || key.contains('\0') {
            return Err(PortError::Invalid(format!("invalid variable name '{}'", key)));
        }
        std::env::set_var(key, value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), PortError> {
        if key.is_empty() || key.contains('=') || key.contains('\0') {
            return Ok(());
        }
        std::env::remove_var(key);
        Ok(())
    }

    async fn list(&self) -> Result<BTreeMap<String, String>, PortError> {
        Ok(std::env::vars().collect())
    }

    fn name(&self) -> &'static str {
        "env"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_get_remove() {
        let adapter = EnvSecretAdapter::new();
        let key = "THE_LOOM_ENV_ADAPTER_TEST";

        adapter.set(key, "value").await.unwrap();
        assert_eq!(adapter.get(key).await.unwrap(), Some("value".to_string()));
        assert_eq!(adapter.list().await.unwrap().get(key), Some(&"value".to_string()));

        adapter.remove(key).await.unwrap();
        assert_eq!(adapter.get(key).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_rejects_invalid_names() {
        let adapter = EnvSecretAdapter::new();
        assert!(adapter.set("A=B", "x").await.is_err());
        assert!(adapter.set("", "x").await.is_err());
    }
}
