// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use crate::config::GlobalConfig;
use crate::errors::EngineError;
use crate::services::{
    BusService, CacheService, KeyValueService, ObjectStorageService, SecretService, Service,
    ServiceKind, ServiceRegistry, TripleStoreService, VectorStoreService,
};

/// Everything a module receives at construction.
pub struct ModuleContext<C> {
    pub name: String,
    /// The module's validated configuration block.
    pub configuration: C,
    pub global: GlobalConfig,
    pub services: ModuleServices,
}

/// The engine's services, restricted to the kinds a module declared.
///
/// Asking for an undeclared kind fails with
/// [`EngineError::ServiceNotDeclared`] even if the engine has built it for
/// another module.
#[derive(Clone)]
pub struct ModuleServices {
    module: String,
    declared: Vec<ServiceKind>,
    services: ServiceRegistry,
}

impl ModuleServices {
    pub fn new(module: impl Into<String>, declared: &[ServiceKind], engine: &ServiceRegistry) -> Self {
        let mut services = ServiceRegistry::new();
        for kind in declared {
            if let Some(service) = engine.get(*kind) {
                services.insert(service);
            }
        }
        Self {
            module: module.into(),
            declared: declared.to_vec(),
            services,
        }
    }

    pub fn declared(&self) -> &[ServiceKind] {
        &self.declared
    }

    /// Whether every declared kind has an instance.
    pub fn is_wired(&self) -> bool {
        self.declared.iter().all(|kind| self.services.contains(*kind))
    }

    pub fn get(&self, kind: ServiceKind) -> Result<Service, EngineError> {
        self.services.get(kind).ok_or_else(|| self.not_declared(kind))
    }

    pub fn secret(&self) -> Result<Arc<SecretService>, EngineError> {
        self.typed(ServiceKind::Secret, self.services.secret())
    }

    pub fn object_storage(&self) -> Result<Arc<ObjectStorageService>, EngineError> {
        self.typed(ServiceKind::ObjectStorage, self.services.object_storage())
    }

    pub fn triple_store(&self) -> Result<Arc<TripleStoreService>, EngineError> {
        self.typed(ServiceKind::TripleStore, self.services.triple_store())
    }

    pub fn vector_store(&self) -> Result<Arc<VectorStoreService>, EngineError> {
        self.typed(ServiceKind::VectorStore, self.services.vector_store())
    }

    pub fn key_value(&self) -> Result<Arc<KeyValueService>, EngineError> {
        self.typed(ServiceKind::KeyValue, self.services.key_value())
    }

    pub fn cache(&self) -> Result<Arc<CacheService>, EngineError> {
        self.typed(ServiceKind::Cache, self.services.cache())
    }

    pub fn bus(&self) -> Result<Arc<BusService>, EngineError> {
        self.typed(ServiceKind::Bus, self.services.bus())
    }

    fn typed<T>(&self, kind: ServiceKind, slot: Option<&Arc<T>>) -> Result<Arc<T>, EngineError> {
        slot.cloned().ok_or_else(|| self.not_declared(kind))
    }

    fn not_declared(&self, kind: ServiceKind) -> EngineError {
        EngineError::ServiceNotDeclared {
            module: self.module.clone(),
            kind,
        }
    }
}
