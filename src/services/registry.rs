// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use crate::services::{
    BusService, CacheService, KeyValueService, ObjectStorageService, SecretService,
    ServiceKind, TripleStoreService, VectorStoreService,
};

/// A constructed service of any kind.
#[derive(Clone)]
pub enum Service {
    Secret(Arc<SecretService>),
    ObjectStorage(Arc<ObjectStorageService>),
    TripleStore(Arc<TripleStoreService>),
    VectorStore(Arc<VectorStoreService>),
    KeyValue(Arc<KeyValueService>),
    Cache(Arc<CacheService>),
    Bus(Arc<BusService>),
}

impl Service {
    pub fn kind(&self) -> ServiceKind {
        match self {
            Service::Secret(_) => ServiceKind::Secret,
            Service::ObjectStorage(_) => ServiceKind::ObjectStorage,
            Service::TripleStore(_) => ServiceKind::TripleStore,
            Service::VectorStore(_) => ServiceKind::VectorStore,
            Service::KeyValue(_) => ServiceKind::KeyValue,
            Service::Cache(_) => ServiceKind::Cache,
            Service::Bus(_) => ServiceKind::Bus,
        }
    }
}

/// Holds at most one instance per service kind.
#[derive(Default, Clone)]
pub struct ServiceRegistry {
    secret: Option<Arc<SecretService>>,
    object_storage: Option<Arc<ObjectStorageService>>,
    triple_store: Option<Arc<TripleStoreService>>,
    vector_store: Option<Arc<VectorStoreService>>,
    key_value: Option<Arc<KeyValueService>>,
    cache: Option<Arc<CacheService>>,
    bus: Option<Arc<BusService>>,
}

impl ServiceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `service` unless its kind is already present. Returns
    /// whether it was registered; an existing instance is never replaced.
    pub fn insert(&mut self, service: Service) -> bool {
        fn put<T>(slot: &mut Option<Arc<T>>, service: Arc<T>) -> bool {
            if slot.is_some() {
                return false;
            }
            *slot = Some(service);
            true
        }

        match service {
            Service::Secret(s) => put(&mut self.secret, s),
            Service::ObjectStorage(s) => put(&mut self.object_storage, s),
            Service::TripleStore(s) => put(&mut self.triple_store, s),
            Service::VectorStore(s) => put(&mut self.vector_store, s),
            Service::KeyValue(s) => put(&mut self.key_value, s),
            Service::Cache(s) => put(&mut self.cache, s),
            Service::Bus(s) => put(&mut self.bus, s),
        }
    }

    pub fn get(&self, kind: ServiceKind) -> Option<Service> {
        match kind {
            ServiceKind::Secret => self.secret.clone().map(Service::Secret),
            ServiceKind::ObjectStorage => self.object_storage.clone().map(Service::ObjectStorage),
            ServiceKind::TripleStore => self.triple_store.clone().map(Service::TripleStore),
            ServiceKind::VectorStore => self.vector_store.clone().map(Service::VectorStore),
            ServiceKind::KeyValue => self.key_value.clone().map(Service::KeyValue),
            ServiceKind::Cache => self.cache.clone().map(Service::Cache),
            ServiceKind::Bus => self.bus.clone().map(Service::Bus),
        }
    }

    pub fn contains(&self, kind: ServiceKind) -> bool {
        self.get(kind).is_some()
    }

    /// Kinds constructed so far, in declaration order.
    pub fn kinds(&self) -> Vec<ServiceKind> {
        ServiceKind::ALL
            .into_iter()
            .filter(|k| self.contains(*k))
            .collect()
    }

    /// Attaches optional collaborators between constructed services. Safe
    /// to call after every insert; returns the `(service, sibling)` links
    /// made by this call.
    pub fn wire(&self) -> Vec<(ServiceKind, ServiceKind)> {
        let mut wired = Vec::new();
        if let Some(store) = &self.triple_store {
            if store.wire(self) {
                wired.push((ServiceKind::TripleStore, ServiceKind::Bus));
            }
        }
        wired
    }

    pub fn secret(&self) -> Option<&Arc<SecretService>> {
        self.secret.as_ref()
    }

    pub fn object_storage(&self) -> Option<&Arc<ObjectStorageService>> {
        self.object_storage.as_ref()
    }

    pub fn triple_store(&self) -> Option<&Arc<TripleStoreService>> {
        self.triple_store.as_ref()
    }

    pub fn vector_store(&self) -> Option<&Arc<VectorStoreService>> {
        self.vector_store.as_ref()
    }

    pub fn key_value(&self) -> Option<&Arc<KeyValueService>> {
        self.key_value.as_ref()
    }

    pub fn cache(&self) -> Option<&Arc<CacheService>> {
        self.cache.as_ref()
    }

    pub fn bus(&self) -> Option<&Arc<BusService>> {
        self.bus.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::bus::MemoryBusAdapter;
    use crate::backends::key_value::MemoryKeyValueAdapter;
    use crate::backends::triple_store::MemoryTripleStoreAdapter;

    #[test]
    fn test_insert_keeps_first_instance() {
        let mut registry = ServiceRegistry::new();
        let first = Arc::new(KeyValueService::new(Arc::new(MemoryKeyValueAdapter::new())));
        let second = Arc::new(KeyValueService::new(Arc::new(MemoryKeyValueAdapter::new())));

        assert!(registry.insert(Service::KeyValue(first.clone())));
        assert!(!registry.insert(Service::KeyValue(second)));

        assert!(Arc::ptr_eq(registry.key_value().unwrap(), &first));
        assert_eq!(registry.kinds(), vec![ServiceKind::KeyValue]);
        assert!(!registry.contains(ServiceKind::Secret));
    }

    #[test]
    fn test_wire_links_triple_store_to_bus_once() {
        let mut registry = ServiceRegistry::new();
        registry.insert(Service::TripleStore(Arc::new(TripleStoreService::new(Arc::new(
            MemoryTripleStoreAdapter::new(),
        )))));
        assert!(registry.wire().is_empty());

        registry.insert(Service::Bus(Arc::new(BusService::new(Arc::new(
            MemoryBusAdapter::new(4).unwrap(),
        )))));
        assert_eq!(
            registry.wire(),
            vec![(ServiceKind::TripleStore, ServiceKind::Bus)]
        );
        assert!(registry.wire().is_empty());
        assert!(registry.triple_store().unwrap().services_wired());
    }
}
