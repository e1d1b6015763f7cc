// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Service façades, one per [`ServiceKind`].
//!
//! A service wraps exactly one adapter and exposes the port's operations,
//! sometimes with policy on top (prefix normalisation for object storage,
//! schema de-duplication for the triple store, typed values and TTL for the
//! cache). Services that need a sibling to be constructed receive it at
//! construction time; collaborators that are optional (the bus the triple
//! store publishes changes on) are attached afterwards by
//! [`ServiceRegistry::wire`].

mod bus;
mod cache;
mod key_value;
mod kind;
pub mod object_storage;
mod registry;
mod secret;
mod triple_store;
mod vector_store;

pub use bus::BusService;
pub use cache::{CacheService, CacheValue};
pub use key_value::KeyValueService;
pub use kind::ServiceKind;
pub use object_storage::ObjectStorageService;
pub use registry::{Service, ServiceRegistry};
pub use secret::SecretService;
pub use triple_store::{
    subscription_topic, triple_topic, SchemaLoad, TripleEvent, TriplePattern, TripleStoreService,
};
pub use vector_store::VectorStoreService;
