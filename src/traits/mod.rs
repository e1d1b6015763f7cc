// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Port traits (one per service kind) and the module trait.

pub mod bus;
pub mod cache;
pub mod key_value;
pub mod module;
pub mod object_storage;
pub mod secret;
pub mod triple_store;
pub mod vector_store;

pub use bus::BusPort;
pub use cache::{CachePort, CachedData, DataType};
pub use key_value::KeyValuePort;
pub use module::{AsAny, Module};
pub use object_storage::ObjectStoragePort;
pub use secret::SecretPort;
pub use triple_store::{SchemaRecord, Triple, TripleStorePort};
pub use vector_store::{SearchHit, VectorDocument, VectorStorePort};
