// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Adapter implementations for every service kind.
//!
//! Each sub-module holds the back ends for one port. Adapters are selected
//! by the `adapter` discriminator of the matching service block in the
//! engine configuration and are constructed through
//! [`crate::config::services`].
//!
//! # Available Adapters
//!
//! | kind | adapters |
//! |------|----------|
//! | secret | `env`, `dotenv`, `memory` |
//! | object storage | `fs`, `memory` |
//! | triple store | `memory`, `fs`, `object_storage` |
//! | vector store | `memory` |
//! | key-value | `memory` |
//! | cache | `fs`, `memory` |
//! | bus | `memory` |
//!
//! ## Stub Adapters (Test-Only)
//! Failure-injecting adapters used to exercise error paths. Only compiled
//! for tests.
//!
//! # Examples
//!
//! ```rust
//! use the_loom::backends::object_storage::MemoryObjectStorageAdapter;
//! use the_loom::traits::ObjectStoragePort;
//!
//! # tokio_test_block(async {
//! let storage = MemoryObjectStorageAdapter::new();
//! storage.put_object("docs", "readme.md", b"# hi".to_vec()).await?;
//! assert_eq!(storage.get_object("docs", "readme.md").await?, b"# hi".to_vec());
//! # Ok::<(), the_loom::errors::PortError>(())
//! # });
//! # fn tokio_test_block<F: std::future::Future>(f: F) -> F::Output {
//! #     tokio::runtime::Runtime::new().unwrap().block_on(f)
//! # }
//! ```

use std::path::{Component, Path};

use crate::errors::PortError;

pub mod bus;
pub mod cache;
pub mod key_value;
pub mod object_storage;
pub mod secret;
#[cfg(test)]
pub mod stub;
pub mod triple_store;
pub mod vector_store;

/// Rejects keys that are empty, absolute, or contain `..` segments.
pub(crate) fn validate_relative_path(path: &str) -> Result<(), PortError> {
    if path.is_empty() {
        return Err(PortError::InvalidPath("empty path".to_string()));
    }

    let escapes = Path::new(path).components().any(|c| {
        matches!(
            c,
            Component::ParentDir | Component::RootDir | Component::Prefix(_)
        )
    });
    if escapes {
        return Err(PortError::InvalidPath(path.to_string()));
    }
    Ok(())
}
