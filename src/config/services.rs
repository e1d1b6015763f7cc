// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Per-kind service configuration and adapter construction.
//!
//! Every service block is a tagged union keyed by its `adapter`
//! discriminator, with adapter-specific fields under `config`:
//!
//! ```yaml
//! services:
//!   object_storage:
//!     adapter: fs
//!     config:
//!       base_path: storage/datastore
//!   triple_store:
//!     adapter: object_storage
//!     config:
//!       triples_prefix: ontology
//! ```
//!
//! Unknown discriminators and unknown fields are schema errors. A kind with
//! no block uses its default adapter.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

use crate::backends::bus::MemoryBusAdapter;
use crate::backends::cache::{FsCacheAdapter, MemoryCacheAdapter};
use crate::backends::key_value::MemoryKeyValueAdapter;
use crate::backends::object_storage::{FsObjectStorageAdapter, MemoryObjectStorageAdapter};
use crate::backends::secret::{DotenvSecretAdapter, EnvSecretAdapter, MemorySecretAdapter};
use crate::backends::triple_store::{MemoryTripleStoreAdapter, ObjectStorageTripleStoreAdapter};
use crate::backends::vector_store::MemoryVectorStoreAdapter;
use crate::config::consts::{
    DEFAULT_BUS_CAPACITY, DEFAULT_CACHE_PATH, DEFAULT_DOTENV_PATH, DEFAULT_OBJECT_STORAGE_PATH,
    DEFAULT_TRIPLES_PATH, DEFAULT_TRIPLE_STORE_PATH,
};
use crate::errors::PortError;
use crate::services::{
    BusService, CacheService, KeyValueService, ObjectStorageService, SecretService, Service,
    ServiceKind, ServiceRegistry, TripleStoreService, VectorStoreService,
};
use crate::traits::SecretPort;

/// Wire shape shared by every adapter choice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct AdapterBlock {
    adapter: String,
    #[serde(default, skip_serializing_if = "is_empty_config")]
    config: Value,
}

impl AdapterBlock {
    fn bare(adapter: &str) -> Self {
        Self {
            adapter: adapter.to_string(),
            config: Value::Null,
        }
    }

    fn with<T: Serialize>(adapter: &str, config: &T) -> Self {
        Self {
            adapter: adapter.to_string(),
            config: serde_yaml::to_value(config).unwrap_or(Value::Null),
        }
    }

    fn parse<T: DeserializeOwned>(&self, kind: ServiceKind) -> Result<T, String> {
        let config = match &self.config {
            Value::Null => Value::Mapping(Mapping::new()),
            other => other.clone(),
        };
        serde_yaml::from_value(config)
            .map_err(|e| format!("{} adapter '{}': {}", kind, self.adapter, e))
    }

    fn unknown(&self, kind: ServiceKind, known: &[&str]) -> String {
        format!(
            "unknown {} adapter '{}' (expected one of: {})",
            kind,
            self.adapter,
            known.join(", ")
        )
    }
}

fn is_empty_config(config: &Value) -> bool {
    match config {
        Value::Null => true,
        Value::Mapping(map) => map.is_empty(),
        _ => false,
    }
}

// ---------------------------------------------------------------------------
// secret

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DotenvSecretConfiguration {
    #[serde(default = "default_dotenv_path")]
    pub path: PathBuf,
}

impl Default for DotenvSecretConfiguration {
    fn default() -> Self {
        Self {
            path: default_dotenv_path(),
        }
    }
}

fn default_dotenv_path() -> PathBuf {
    PathBuf::from(DEFAULT_DOTENV_PATH)
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MemorySecretConfiguration {
    #[serde(default)]
    pub values: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "AdapterBlock", into = "AdapterBlock")]
pub enum SecretAdapterConfiguration {
    Env,
    Dotenv(DotenvSecretConfiguration),
    Memory(MemorySecretConfiguration),
}

impl SecretAdapterConfiguration {
    pub fn adapter(&self) -> &'static str {
        match self {
            SecretAdapterConfiguration::Env => "env",
            SecretAdapterConfiguration::Dotenv(_) => "dotenv",
            SecretAdapterConfiguration::Memory(_) => "memory",
        }
    }

    pub fn load(&self) -> Arc<dyn SecretPort> {
        match self {
            SecretAdapterConfiguration::Env => Arc::new(EnvSecretAdapter::new()),
            SecretAdapterConfiguration::Dotenv(c) => Arc::new(DotenvSecretAdapter::new(&c.path)),
            SecretAdapterConfiguration::Memory(c) => {
                Arc::new(MemorySecretAdapter::new(c.values.clone()))
            }
        }
    }
}

impl TryFrom<AdapterBlock> for SecretAdapterConfiguration {
    type Error = String;

    fn try_from(block: AdapterBlock) -> Result<Self, Self::Error> {
        let kind = ServiceKind::Secret;
        match block.adapter.as_str() {
            "env" => Ok(Self::Env),
            "dotenv" => Ok(Self::Dotenv(block.parse(kind)?)),
            "memory" => Ok(Self::Memory(block.parse(kind)?)),
            _ => Err(block.unknown(kind, &["env", "dotenv", "memory"])),
        }
    }
}

impl From<SecretAdapterConfiguration> for AdapterBlock {
    fn from(config: SecretAdapterConfiguration) -> Self {
        match &config {
            SecretAdapterConfiguration::Env => AdapterBlock::bare(config.adapter()),
            SecretAdapterConfiguration::Dotenv(c) => AdapterBlock::with(config.adapter(), c),
            SecretAdapterConfiguration::Memory(c) => AdapterBlock::with(config.adapter(), c),
        }
    }
}

/// Ordered list of secret sources; earlier adapters win on read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SecretServiceConfiguration {
    #[serde(default = "default_secret_adapters")]
    pub adapters: Vec<SecretAdapterConfiguration>,
}

impl Default for SecretServiceConfiguration {
    fn default() -> Self {
        Self {
            adapters: default_secret_adapters(),
        }
    }
}

fn default_secret_adapters() -> Vec<SecretAdapterConfiguration> {
    vec![
        SecretAdapterConfiguration::Env,
        SecretAdapterConfiguration::Dotenv(DotenvSecretConfiguration::default()),
    ]
}

impl SecretServiceConfiguration {
    pub fn load(&self) -> SecretService {
        SecretService::new(self.adapters.iter().map(|a| a.load()).collect())
    }
}

// ---------------------------------------------------------------------------
// object storage

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FsObjectStorageConfiguration {
    #[serde(default = "default_object_storage_path")]
    pub base_path: PathBuf,
}

impl Default for FsObjectStorageConfiguration {
    fn default() -> Self {
        Self {
            base_path: default_object_storage_path(),
        }
    }
}

fn default_object_storage_path() -> PathBuf {
    PathBuf::from(DEFAULT_OBJECT_STORAGE_PATH)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "AdapterBlock", into = "AdapterBlock")]
pub enum ObjectStorageConfiguration {
    Fs(FsObjectStorageConfiguration),
    Memory,
}

impl Default for ObjectStorageConfiguration {
    fn default() -> Self {
        ObjectStorageConfiguration::Fs(FsObjectStorageConfiguration::default())
    }
}

impl ObjectStorageConfiguration {
    pub fn adapter(&self) -> &'static str {
        match self {
            ObjectStorageConfiguration::Fs(_) => "fs",
            ObjectStorageConfiguration::Memory => "memory",
        }
    }

    pub fn load(&self) -> Result<ObjectStorageService, PortError> {
        let service = match self {
            ObjectStorageConfiguration::Fs(c) => {
                ObjectStorageService::new(Arc::new(FsObjectStorageAdapter::new(&c.base_path)?))
            }
            ObjectStorageConfiguration::Memory => {
                ObjectStorageService::new(Arc::new(MemoryObjectStorageAdapter::new()))
            }
        };
        Ok(service)
    }
}

impl TryFrom<AdapterBlock> for ObjectStorageConfiguration {
    type Error = String;

    fn try_from(block: AdapterBlock) -> Result<Self, Self::Error> {
        let kind = ServiceKind::ObjectStorage;
        match block.adapter.as_str() {
            "fs" => Ok(Self::Fs(block.parse(kind)?)),
            "memory" => Ok(Self::Memory),
            _ => Err(block.unknown(kind, &["fs", "memory"])),
        }
    }
}

impl From<ObjectStorageConfiguration> for AdapterBlock {
    fn from(config: ObjectStorageConfiguration) -> Self {
        match &config {
            ObjectStorageConfiguration::Fs(c) => AdapterBlock::with(config.adapter(), c),
            ObjectStorageConfiguration::Memory => AdapterBlock::bare(config.adapter()),
        }
    }
}

// ---------------------------------------------------------------------------
// triple store

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FsTripleStoreConfiguration {
    #[serde(default = "default_triple_store_path")]
    pub store_path: PathBuf,
    #[serde(default = "default_triples_path")]
    pub triples_path: String,
}

impl Default for FsTripleStoreConfiguration {
    fn default() -> Self {
        Self {
            store_path: default_triple_store_path(),
            triples_path: default_triples_path(),
        }
    }
}

fn default_triple_store_path() -> PathBuf {
    PathBuf::from(DEFAULT_TRIPLE_STORE_PATH)
}

fn default_triples_path() -> String {
    DEFAULT_TRIPLES_PATH.to_string()
}

/// Triples kept in object storage. Without an embedded `object_storage`
/// block the engine's own object-storage service is used.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ObjectStorageTripleStoreConfiguration {
    #[serde(default = "default_triples_path")]
    pub triples_prefix: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object_storage: Option<ObjectStorageConfiguration>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "AdapterBlock", into = "AdapterBlock")]
pub enum TripleStoreConfiguration {
    Memory,
    Fs(FsTripleStoreConfiguration),
    ObjectStorage(ObjectStorageTripleStoreConfiguration),
}

impl Default for TripleStoreConfiguration {
    fn default() -> Self {
        TripleStoreConfiguration::Fs(FsTripleStoreConfiguration::default())
    }
}

impl TripleStoreConfiguration {
    pub fn adapter(&self) -> &'static str {
        match self {
            TripleStoreConfiguration::Memory => "memory",
            TripleStoreConfiguration::Fs(_) => "fs",
            TripleStoreConfiguration::ObjectStorage(_) => "object_storage",
        }
    }

    pub fn dependencies(&self) -> Vec<ServiceKind> {
        match self {
            TripleStoreConfiguration::ObjectStorage(ObjectStorageTripleStoreConfiguration {
                object_storage: None,
                ..
            }) => vec![ServiceKind::ObjectStorage],
            _ => Vec::new(),
        }
    }

    pub fn load(&self, services: &ServiceRegistry) -> Result<TripleStoreService, PortError> {
        let service = match self {
            TripleStoreConfiguration::Memory => {
                TripleStoreService::new(Arc::new(MemoryTripleStoreAdapter::new()))
            }
            TripleStoreConfiguration::Fs(c) => TripleStoreService::new(Arc::new(
                ObjectStorageTripleStoreAdapter::on_file_system(&c.store_path, c.triples_path.clone())?,
            )),
            TripleStoreConfiguration::ObjectStorage(c) => {
                let storage = match &c.object_storage {
                    Some(embedded) => Arc::new(embedded.load()?),
                    None => services.object_storage().cloned().ok_or_else(|| {
                        PortError::Invalid(
                            "triple store requires the object_storage service".to_string(),
                        )
                    })?,
                };
                TripleStoreService::new(Arc::new(ObjectStorageTripleStoreAdapter::new(
                    storage,
                    c.triples_prefix.clone(),
                )))
            }
        };
        Ok(service)
    }
}

impl TryFrom<AdapterBlock> for TripleStoreConfiguration {
    type Error = String;

    fn try_from(block: AdapterBlock) -> Result<Self, Self::Error> {
        let kind = ServiceKind::TripleStore;
        match block.adapter.as_str() {
            "memory" => Ok(Self::Memory),
            "fs" => Ok(Self::Fs(block.parse(kind)?)),
            "object_storage" => Ok(Self::ObjectStorage(block.parse(kind)?)),
            _ => Err(block.unknown(kind, &["memory", "fs", "object_storage"])),
        }
    }
}

impl From<TripleStoreConfiguration> for AdapterBlock {
    fn from(config: TripleStoreConfiguration) -> Self {
        match &config {
            TripleStoreConfiguration::Memory => AdapterBlock::bare(config.adapter()),
            TripleStoreConfiguration::Fs(c) => AdapterBlock::with(config.adapter(), c),
            TripleStoreConfiguration::ObjectStorage(c) => AdapterBlock::with(config.adapter(), c),
        }
    }
}

// ---------------------------------------------------------------------------
// vector store, key-value

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "AdapterBlock", into = "AdapterBlock")]
pub enum VectorStoreConfiguration {
    #[default]
    Memory,
}

impl VectorStoreConfiguration {
    pub fn adapter(&self) -> &'static str {
        "memory"
    }

    pub fn load(&self) -> VectorStoreService {
        VectorStoreService::new(Arc::new(MemoryVectorStoreAdapter::new()))
    }
}

impl TryFrom<AdapterBlock> for VectorStoreConfiguration {
    type Error = String;

    fn try_from(block: AdapterBlock) -> Result<Self, Self::Error> {
        match block.adapter.as_str() {
            "memory" => Ok(Self::Memory),
            _ => Err(block.unknown(ServiceKind::VectorStore, &["memory"])),
        }
    }
}

impl From<VectorStoreConfiguration> for AdapterBlock {
    fn from(config: VectorStoreConfiguration) -> Self {
        AdapterBlock::bare(config.adapter())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "AdapterBlock", into = "AdapterBlock")]
pub enum KeyValueConfiguration {
    #[default]
    Memory,
}

impl KeyValueConfiguration {
    pub fn adapter(&self) -> &'static str {
        "memory"
    }

    pub fn load(&self) -> KeyValueService {
        KeyValueService::new(Arc::new(MemoryKeyValueAdapter::new()))
    }
}

impl TryFrom<AdapterBlock> for KeyValueConfiguration {
    type Error = String;

    fn try_from(block: AdapterBlock) -> Result<Self, Self::Error> {
        match block.adapter.as_str() {
            "memory" => Ok(Self::Memory),
            _ => Err(block.unknown(ServiceKind::KeyValue, &["memory"])),
        }
    }
}

impl From<KeyValueConfiguration> for AdapterBlock {
    fn from(config: KeyValueConfiguration) -> Self {
        AdapterBlock::bare(config.adapter())
    }
}

// ---------------------------------------------------------------------------
// cache

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FsCacheConfiguration {
    #[serde(default = "default_cache_path")]
    pub base_path: PathBuf,
}

impl Default for FsCacheConfiguration {
    fn default() -> Self {
        Self {
            base_path: default_cache_path(),
        }
    }
}

fn default_cache_path() -> PathBuf {
    PathBuf::from(DEFAULT_CACHE_PATH)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "AdapterBlock", into = "AdapterBlock")]
pub enum CacheConfiguration {
    Fs(FsCacheConfiguration),
    Memory,
}

impl Default for CacheConfiguration {
    fn default() -> Self {
        CacheConfiguration::Fs(FsCacheConfiguration::default())
    }
}

impl CacheConfiguration {
    pub fn adapter(&self) -> &'static str {
        match self {
            CacheConfiguration::Fs(_) => "fs",
            CacheConfiguration::Memory => "memory",
        }
    }

    pub fn load(&self) -> Result<CacheService, PortError> {
        let service = match self {
            CacheConfiguration::Fs(c) => {
                CacheService::new(Arc::new(FsCacheAdapter::new(&c.base_path)?))
            }
            CacheConfiguration::Memory => CacheService::new(Arc::new(MemoryCacheAdapter::new())),
        };
        Ok(service)
    }
}

impl TryFrom<AdapterBlock> for CacheConfiguration {
    type Error = String;

    fn try_from(block: AdapterBlock) -> Result<Self, Self::Error> {
        let kind = ServiceKind::Cache;
        match block.adapter.as_str() {
            "fs" => Ok(Self::Fs(block.parse(kind)?)),
            "memory" => Ok(Self::Memory),
            _ => Err(block.unknown(kind, &["fs", "memory"])),
        }
    }
}

impl From<CacheConfiguration> for AdapterBlock {
    fn from(config: CacheConfiguration) -> Self {
        match &config {
            CacheConfiguration::Fs(c) => AdapterBlock::with(config.adapter(), c),
            CacheConfiguration::Memory => AdapterBlock::bare(config.adapter()),
        }
    }
}

// ---------------------------------------------------------------------------
// bus

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MemoryBusConfiguration {
    #[serde(default = "default_bus_capacity")]
    pub capacity: usize,
}

impl Default for MemoryBusConfiguration {
    fn default() -> Self {
        Self {
            capacity: default_bus_capacity(),
        }
    }
}

fn default_bus_capacity() -> usize {
    DEFAULT_BUS_CAPACITY
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "AdapterBlock", into = "AdapterBlock")]
pub enum BusConfiguration {
    Memory(MemoryBusConfiguration),
}

impl Default for BusConfiguration {
    fn default() -> Self {
        BusConfiguration::Memory(MemoryBusConfiguration::default())
    }
}

impl BusConfiguration {
    pub fn adapter(&self) -> &'static str {
        "memory"
    }

    pub fn load(&self) -> Result<BusService, PortError> {
        match self {
            BusConfiguration::Memory(c) => {
                Ok(BusService::new(Arc::new(MemoryBusAdapter::new(c.capacity)?)))
            }
        }
    }
}

impl TryFrom<AdapterBlock> for BusConfiguration {
    type Error = String;

    fn try_from(block: AdapterBlock) -> Result<Self, Self::Error> {
        match block.adapter.as_str() {
            "memory" => Ok(Self::Memory(block.parse(ServiceKind::Bus)?)),
            _ => Err(block.unknown(ServiceKind::Bus, &["memory"])),
        }
    }
}

impl From<BusConfiguration> for AdapterBlock {
    fn from(config: BusConfiguration) -> Self {
        match &config {
            BusConfiguration::Memory(c) => AdapterBlock::with(config.adapter(), c),
        }
    }
}

// ---------------------------------------------------------------------------

/// The `services` section of the engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServicesConfiguration {
    #[serde(default)]
    pub secret: SecretServiceConfiguration,
    #[serde(default)]
    pub object_storage: ObjectStorageConfiguration,
    #[serde(default)]
    pub triple_store: TripleStoreConfiguration,
    #[serde(default)]
    pub vector_store: VectorStoreConfiguration,
    #[serde(default)]
    pub key_value: KeyValueConfiguration,
    #[serde(default)]
    pub cache: CacheConfiguration,
    #[serde(default)]
    pub bus: BusConfiguration,
}

impl ServicesConfiguration {
    /// Kinds that must be constructed before `kind`.
    pub fn dependencies(&self, kind: ServiceKind) -> Vec<ServiceKind> {
        match kind {
            ServiceKind::TripleStore => self.triple_store.dependencies(),
            _ => Vec::new(),
        }
    }

    /// Human-readable adapter selection for `kind`.
    pub fn adapter_name(&self, kind: ServiceKind) -> String {
        match kind {
            ServiceKind::Secret => self
                .secret
                .adapters
                .iter()
                .map(|a| a.adapter())
                .collect::<Vec<_>>()
                .join(","),
            ServiceKind::ObjectStorage => self.object_storage.adapter().to_string(),
            ServiceKind::TripleStore => self.triple_store.adapter().to_string(),
            ServiceKind::VectorStore => self.vector_store.adapter().to_string(),
            ServiceKind::KeyValue => self.key_value.adapter().to_string(),
            ServiceKind::Cache => self.cache.adapter().to_string(),
            ServiceKind::Bus => self.bus.adapter().to_string(),
        }
    }

    /// Constructs the service for `kind`. Its dependencies must already be
    /// in `services`.
    pub fn load(&self, kind: ServiceKind, services: &ServiceRegistry) -> Result<Service, PortError> {
        let service = match kind {
            ServiceKind::Secret => Service::Secret(Arc::new(self.secret.load())),
            ServiceKind::ObjectStorage => Service::ObjectStorage(Arc::new(self.object_storage.load()?)),
            ServiceKind::TripleStore => {
                Service::TripleStore(Arc::new(self.triple_store.load(services)?))
            }
            ServiceKind::VectorStore => Service::VectorStore(Arc::new(self.vector_store.load())),
            ServiceKind::KeyValue => Service::KeyValue(Arc::new(self.key_value.load())),
            ServiceKind::Cache => Service::Cache(Arc::new(self.cache.load()?)),
            ServiceKind::Bus => Service::Bus(Arc::new(self.bus.load()?)),
        };
        Ok(service)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(yaml: &str) -> Result<ServicesConfiguration, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    #[test]
    fn test_defaults_when_absent() {
        let config = parse("{}").unwrap();

        assert_eq!(config, ServicesConfiguration::default());
        assert_eq!(config.adapter_name(ServiceKind::Secret), "env,dotenv");
        assert_eq!(config.adapter_name(ServiceKind::ObjectStorage), "fs");
        assert_eq!(config.adapter_name(ServiceKind::TripleStore), "fs");
        assert!(config.dependencies(ServiceKind::TripleStore).is_empty());
    }

    #[test]
    fn test_adapter_specific_fields_and_defaults() {
        let config = parse(
            r#"
secret:
  adapters:
    - adapter: memory
      config:
        values: { A: "1" }
    - adapter: dotenv
object_storage:
  adapter: fs
  config:
    base_path: /tmp/loom
cache:
  adapter: memory
bus:
  adapter: memory
  config:
    capacity: 8
"#,
        )
        .unwrap();

        assert_eq!(config.secret.adapters.len(), 2);
        assert_eq!(
            config.secret.adapters[1],
            SecretAdapterConfiguration::Dotenv(DotenvSecretConfiguration::default())
        );
        assert_eq!(
            config.object_storage,
            ObjectStorageConfiguration::Fs(FsObjectStorageConfiguration {
                base_path: PathBuf::from("/tmp/loom")
            })
        );
        assert_eq!(config.cache, CacheConfiguration::Memory);
        assert_eq!(
            config.bus,
            BusConfiguration::Memory(MemoryBusConfiguration { capacity: 8 })
        );
    }

    #[test]
    fn test_unknown_discriminator_is_rejected() {
        let err = parse("object_storage:\n  adapter: s3\n").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("unknown object_storage adapter 's3'"), "{}", message);
    }

    #[test]
    fn test_unknown_adapter_field_is_rejected() {
        let err = parse("cache:\n  adapter: fs\n  config:\n    base_dir: x\n").unwrap_err();
        assert!(err.to_string().contains("base_dir"), "{}", err);
    }

    #[test]
    fn test_unknown_service_kind_is_rejected() {
        assert!(parse("graph_db:\n  adapter: memory\n").is_err());
    }

    #[test]
    fn test_object_storage_triple_store_dependencies() {
        let shared = parse("triple_store:\n  adapter: object_storage\n").unwrap();
        assert_eq!(
            shared.dependencies(ServiceKind::TripleStore),
            vec![ServiceKind::ObjectStorage]
        );

        let embedded = parse(
            "triple_store:\n  adapter: object_storage\n  config:\n    triples_prefix: kg\n    object_storage:\n      adapter: memory\n",
        )
        .unwrap();
        assert!(embedded.dependencies(ServiceKind::TripleStore).is_empty());
        assert_eq!(
            embedded.triple_store,
            TripleStoreConfiguration::ObjectStorage(ObjectStorageTripleStoreConfiguration {
                triples_prefix: "kg".to_string(),
                object_storage: Some(ObjectStorageConfiguration::Memory),
            })
        );
    }

    #[test]
    fn test_triple_store_without_object_storage_service_fails() {
        let config = parse("triple_store:\n  adapter: object_storage\n").unwrap();
        let err = config
            .load(ServiceKind::TripleStore, &ServiceRegistry::new())
            .err()
            .unwrap();
        assert!(matches!(err, PortError::Invalid(_)));
    }

    #[test]
    fn test_serialises_back_to_adapter_blocks() {
        let config = parse("object_storage:\n  adapter: memory\n").unwrap();
        let yaml = serde_yaml::to_string(&config).unwrap();
        let reparsed = parse(&yaml).unwrap();

        assert!(yaml.contains("adapter: memory"));
        assert_eq!(reparsed, config);
    }
}
